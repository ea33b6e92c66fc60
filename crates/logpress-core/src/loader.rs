// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Journal loader — parses the exported JSON log and resolves every optional
// field to its default once, up front.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::attachments::AttachmentResolver;
use crate::config::JournalConfig;
use crate::error::{LogpressError, Result};
use crate::types::{Attachment, AttachmentKind, Collection, Entry, EntryId};

// -- Wire records ---------------------------------------------------------------
//
// Mirror the exported JSON shape. Every field is optional; `null` and absent
// are treated the same.

#[derive(Debug, Deserialize)]
struct CollectionRecord {
    name: Option<String>,
    logs: Option<Vec<EntryRecord>>,
}

#[derive(Debug, Deserialize)]
struct EntryRecord {
    /// Any JSON value; see [`entry_id`].
    id: Option<Value>,
    date: Option<String>,
    text: Option<String>,
    attachments: Option<Vec<AttachmentRecord>>,
}

#[derive(Debug, Deserialize)]
struct AttachmentRecord {
    #[serde(rename = "type")]
    kind: Option<String>,
    filename: Option<String>,
}

impl AttachmentRecord {
    fn into_attachment(self) -> Attachment {
        Attachment {
            kind: AttachmentKind::from_type(self.kind.as_deref().unwrap_or_default()),
            filename: self.filename,
        }
    }
}

/// A parsed collection together with where its attachments live.
#[derive(Debug, Clone)]
pub struct LoadedJournal {
    pub collection: Collection,
    pub attachments: AttachmentResolver,
}

/// Read and parse the journal at `path`.
///
/// A missing file or malformed JSON is fatal. Missing fields take the defaults
/// named in `config`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_journal(path: impl AsRef<Path>, config: &JournalConfig) -> Result<LoadedJournal> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| LogpressError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let collection =
        parse_collection(&raw, config).map_err(|source| LogpressError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;

    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let attachments = AttachmentResolver::new(&base_dir, &config.attachment_dir);

    info!(
        name = %collection.name,
        entries = collection.entries.len(),
        attachment_dir = %attachments.root().display(),
        "Journal loaded"
    );

    Ok(LoadedJournal {
        collection,
        attachments,
    })
}

/// Integers and strings are kept. Other numbers keep their JSON spelling.
/// Anything else, including `null`, falls back to the entry's position.
fn entry_id(value: Option<Value>, index: usize) -> EntryId {
    match value {
        Some(Value::Number(number)) => match number.as_i64() {
            Some(n) => EntryId::Number(n),
            None => EntryId::Text(number.to_string()),
        },
        Some(Value::String(text)) => EntryId::Text(text),
        None | Some(Value::Null) => EntryId::positional(index),
        Some(other) => {
            debug!(index, id = %other, "Unusable entry id, numbering by position");
            EntryId::positional(index)
        }
    }
}

/// Parse a collection from JSON text, applying the defaults in `config`.
pub fn parse_collection(
    json: &str,
    config: &JournalConfig,
) -> std::result::Result<Collection, serde_json::Error> {
    let record: CollectionRecord = serde_json::from_str(json)?;

    let entries: Vec<Entry> = record
        .logs
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Entry {
            id: entry_id(entry.id, index),
            date: entry.date.unwrap_or_else(|| config.default_date.clone()),
            text: entry.text.unwrap_or_default(),
            attachments: entry
                .attachments
                .unwrap_or_default()
                .into_iter()
                .map(AttachmentRecord::into_attachment)
                .collect(),
        })
        .collect();

    debug!(entries = entries.len(), "Collection parsed");

    Ok(Collection {
        name: record.name.unwrap_or_else(|| config.default_name.clone()),
        entries,
    })
}
