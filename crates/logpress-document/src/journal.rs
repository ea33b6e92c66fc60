// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Journal pipeline — load, lay out, render, write.

use std::path::{Path, PathBuf};

use logpress_core::error::Result;
use logpress_core::{JournalConfig, LoadedJournal, SkippedAttachment, load_journal};
use tracing::{info, instrument};

use crate::layout::{BlockBuilder, JournalLayout};
use crate::pdf::JournalWriter;
use crate::style::StyleSheet;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct JournalSummary {
    pub output: PathBuf,
    pub entries: usize,
    pub images: usize,
    pub skipped: Vec<SkippedAttachment>,
    pub pages: usize,
}

/// Build the block sequence for an already-loaded journal.
pub fn layout_journal(journal: &LoadedJournal, config: &JournalConfig) -> JournalLayout {
    let geometry = config.page_geometry();
    BlockBuilder::new(StyleSheet::journal(), &geometry, &journal.attachments)
        .build(&journal.collection)
}

/// Render the journal at `input` to a PDF at `output`.
///
/// Missing input, malformed input and write failures are errors. Unusable
/// attachments are not: they are listed in the summary.
#[instrument(skip_all, fields(input = %input.as_ref().display()))]
pub fn generate_journal(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &JournalConfig,
) -> Result<JournalSummary> {
    let journal = load_journal(input, config)?;
    let layout = layout_journal(&journal, config);

    let mut writer = JournalWriter::new(config.page_geometry());
    writer.set_title(journal.collection.name.clone());
    writer.set_page_number_format(config.page_number_format);
    let rendered = writer.write_to_file(&layout.blocks, output.as_ref())?;

    let summary = JournalSummary {
        output: output.as_ref().to_path_buf(),
        entries: layout.entries,
        images: layout.images,
        skipped: layout.skipped,
        pages: rendered.page_count,
    };
    info!(
        output = %summary.output.display(),
        entries = summary.entries,
        images = summary.images,
        skipped = summary.skipped.len(),
        pages = summary.pages,
        "Journal generated"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutBlock;
    use crate::pdf::PdfReader;
    use image::{Rgb, RgbImage};
    use logpress_core::{LogpressError, SkipReason};

    struct Workspace {
        dir: tempfile::TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::create_dir_all(dir.path().join("sawyer/attachments")).unwrap();
            Self { dir }
        }

        fn input(&self, json: serde_json::Value) -> PathBuf {
            let path = self.dir.path().join("sawyer.json");
            std::fs::write(&path, json.to_string()).unwrap();
            path
        }

        fn image(&self, name: &str, width: u32, height: u32) {
            RgbImage::from_pixel(width, height, Rgb([90, 120, 150]))
                .save(self.dir.path().join("sawyer/attachments").join(name))
                .unwrap();
        }

        fn output(&self) -> PathBuf {
            self.dir.path().join("journal.pdf")
        }
    }

    #[test]
    fn empty_journal_is_title_page_only() {
        let ws = Workspace::new();
        let input = ws.input(serde_json::json!({ "name": "T", "logs": [] }));

        let summary = generate_journal(&input, ws.output(), &JournalConfig::default()).unwrap();
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.pages, 1);

        let journal = load_journal(&input, &JournalConfig::default()).unwrap();
        let layout = layout_journal(&journal, &JournalConfig::default());
        assert!(matches!(&layout.blocks[1], LayoutBlock::Title(t) if t.markup == "T"));
        assert!(!layout.blocks.iter().any(|b| matches!(b, LayoutBlock::DateHeader(_))));

        let reader = PdfReader::open(ws.output()).unwrap();
        assert_eq!(reader.page_count(), 1);
    }

    #[test]
    fn text_entry_renders_header_text_divider() {
        let ws = Workspace::new();
        let input = ws.input(serde_json::json!({
            "name": "Sawyer",
            "logs": [ { "date": "2024-01-01", "text": "Hello\nWorld" } ]
        }));

        let journal = load_journal(&input, &JournalConfig::default()).unwrap();
        let layout = layout_journal(&journal, &JournalConfig::default());
        let entry: Vec<_> = layout.blocks[3..].iter().map(LayoutBlock::kind).collect();
        assert_eq!(entry, vec!["date_header", "spacer", "text", "spacer", "divider"]);
        let LayoutBlock::Text(text) = &layout.blocks[5] else {
            panic!("expected body text");
        };
        assert_eq!(text.markup, "Hello<br/>World");

        let summary = generate_journal(&input, ws.output(), &JournalConfig::default()).unwrap();
        assert_eq!(summary.pages, 1);
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn non_ascii_text_survives_into_the_pdf() {
        let ws = Workspace::new();
        let input = ws.input(serde_json::json!({
            "name": "Caf\u{e9} Notes",
            "logs": [ {
                "date": "12 f\u{e9}vrier",
                "text": "caf\u{e9} \u{2014} it\u{2019}s ok"
            } ]
        }));

        generate_journal(&input, ws.output(), &JournalConfig::default()).unwrap();
        let text = PdfReader::open(ws.output()).unwrap().page_text(1).unwrap();
        let expected = [
            "Caf\u{e9} Notes",
            "12 f\u{e9}vrier",
            "caf\u{e9} \u{2014} it\u{2019}s ok",
        ];
        for expected in expected {
            assert!(text.contains(expected), "{expected:?} missing from {text:?}");
        }
    }

    #[test]
    fn image_entry_places_scaled_image() {
        let ws = Workspace::new();
        ws.image("photo.png", 800, 400);
        let input = ws.input(serde_json::json!({
            "logs": [ {
                "date": "2024-01-02",
                "text": "with a photo",
                "attachments": [ { "type": "image", "filename": "photo.png" } ]
            } ]
        }));

        let journal = load_journal(&input, &JournalConfig::default()).unwrap();
        let layout = layout_journal(&journal, &JournalConfig::default());
        let columns = layout
            .blocks
            .iter()
            .find_map(|b| match b {
                LayoutBlock::TwoColumn(c) => Some(c),
                _ => None,
            })
            .expect("two-column block");
        let size = columns.images[0].size;
        assert!((size.width - 0.4 * 468.0).abs() < 1e-3);
        assert!((size.height - size.width * 0.5).abs() < 1e-3);

        let summary = generate_journal(&input, ws.output(), &JournalConfig::default()).unwrap();
        assert_eq!(summary.images, 1);
        assert_eq!(PdfReader::open(ws.output()).unwrap().page_count(), summary.pages);
    }

    #[test]
    fn missing_attachment_is_reported_not_fatal() {
        let ws = Workspace::new();
        let input = ws.input(serde_json::json!({
            "logs": [ {
                "date": "2024-01-03",
                "text": "photo went missing",
                "attachments": [ { "type": "image", "filename": "gone.jpg" } ]
            } ]
        }));

        let summary = generate_journal(&input, ws.output(), &JournalConfig::default()).unwrap();
        assert_eq!(summary.images, 0);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].filename, "gone.jpg");
        assert!(matches!(summary.skipped[0].reason, SkipReason::NotFound(_)));

        let journal = load_journal(&input, &JournalConfig::default()).unwrap();
        let layout = layout_journal(&journal, &JournalConfig::default());
        assert!(!layout.blocks.iter().any(|b| matches!(b, LayoutBlock::TwoColumn(_))));
    }

    #[test]
    fn many_entries_span_pages_and_keep_order() {
        let ws = Workspace::new();
        let logs: Vec<_> = (1..=40)
            .map(|n| {
                serde_json::json!({
                    "date": format!("2024-02-{:02}", n % 28 + 1),
                    "text": format!("Entry number {n}.\nIt has two lines."),
                })
            })
            .collect();
        let input = ws.input(serde_json::json!({ "name": "Long", "logs": logs }));

        let summary = generate_journal(&input, ws.output(), &JournalConfig::default()).unwrap();
        assert_eq!(summary.entries, 40);
        assert!(summary.pages > 1);
        assert_eq!(PdfReader::open(ws.output()).unwrap().page_count(), summary.pages);
    }

    #[test]
    fn missing_input_is_fatal_and_writes_nothing() {
        let ws = Workspace::new();
        let err = generate_journal(
            ws.dir.path().join("absent.json"),
            ws.output(),
            &JournalConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, LogpressError::ReadInput { .. }));
        assert!(!ws.output().exists());
    }
}
