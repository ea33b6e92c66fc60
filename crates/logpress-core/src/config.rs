// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Journal rendering configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{LogpressError, Result};
use crate::types::{Margins, PageGeometry, PaperSize};

/// How the page label stamped at the foot of every page reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageNumberFormat {
    /// `3`
    #[default]
    Number,
    /// `3 / 7`
    NumberOfTotal,
}

impl PageNumberFormat {
    /// Label for 1-based page `number` of `total`.
    pub fn label(&self, number: usize, total: usize) -> String {
        match self {
            Self::Number => number.to_string(),
            Self::NumberOfTotal => format!("{number} / {total}"),
        }
    }
}

/// Settings for one journal run. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Paper size of every page.
    pub paper_size: PaperSize,
    /// Directory segments, relative to the input file, that hold attachments.
    pub attachment_dir: Vec<String>,
    /// Title used when the collection has no name.
    pub default_name: String,
    /// Header text used when an entry has no date.
    pub default_date: String,
    /// Page label format.
    pub page_number_format: PageNumberFormat,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            attachment_dir: vec!["sawyer".into(), "attachments".into()],
            default_name: "Journal".into(),
            default_date: "No date".into(),
            page_number_format: PageNumberFormat::Number,
        }
    }
}

impl JournalConfig {
    /// Read a JSON config file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            LogpressError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|err| {
            LogpressError::Config(format!("cannot parse {}: {}", path.display(), err))
        })?;
        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Reject settings that cannot produce a page.
    pub fn validate(&self) -> Result<()> {
        let geometry = self.page_geometry();
        if geometry.content_width() <= 0.0 || geometry.content_height() <= 0.0 {
            return Err(LogpressError::Config(format!(
                "paper size {:?} leaves no room inside the margins",
                self.paper_size
            )));
        }
        Ok(())
    }

    /// Page geometry for the configured paper size and the fixed margins.
    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::new(self.paper_size, Margins::default())
    }
}
