// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Block builder — turns a journal collection into the ordered block sequence
// the flow engine consumes.
//
// Per entry: date header, spacer, body (single column, or two columns when at
// least one image loaded), spacer, divider. Attachments that cannot be used
// are collected as `SkippedAttachment`s and logged; they never fail the build.

use logpress_core::{
    Attachment, AttachmentResolver, Collection, Entry, EntryId, POINTS_PER_INCH, PageGeometry,
    SkipReason, SkippedAttachment,
};
use tracing::{debug, instrument, trace, warn};

use super::blocks::{
    DateHeaderBlock, DividerBlock, ImageBlock, LayoutBlock, TextBlock, TwoColumnBlock,
};
use crate::image::fit::{IMAGE_WIDTH_RATIO, MAX_IMAGE_HEIGHT};
use crate::image::{SourceImage, fit_image};
use crate::markup;
use crate::style::{BORDER_COLOR, BOX_COLOR, DIVIDER_COLOR, StyleSheet};

/// Share of the content width given to the text column.
pub const TEXT_COLUMN_RATIO: f32 = 0.55;

const TITLE_SPACE_ABOVE: f32 = 0.5 * POINTS_PER_INCH;
const TITLE_SPACE_BELOW: f32 = 0.3 * POINTS_PER_INCH;
const HEADER_PADDING_X: f32 = 10.0;
const HEADER_PADDING_Y: f32 = 8.0;
const HEADER_BORDER_WIDTH: f32 = 1.0;
const HEADER_SPACE_BELOW: f32 = 15.0;
const CELL_PADDING: f32 = 5.0;
const IMAGE_GAP: f32 = 10.0;
const ENTRY_SPACE_BELOW: f32 = 25.0;
const DIVIDER_THICKNESS: f32 = 0.5;
const DIVIDER_SPACE_AFTER: f32 = 25.0;

/// Blocks for a single entry.
#[derive(Debug)]
pub struct EntryLayout {
    pub entry: EntryId,
    pub blocks: Vec<LayoutBlock>,
    /// Images that made it into the layout.
    pub images: usize,
    pub skipped: Vec<SkippedAttachment>,
}

/// Blocks for a whole collection.
#[derive(Debug)]
pub struct JournalLayout {
    pub blocks: Vec<LayoutBlock>,
    pub entries: usize,
    pub images: usize,
    pub skipped: Vec<SkippedAttachment>,
}

pub struct BlockBuilder<'a> {
    styles: StyleSheet,
    content_width: f32,
    resolver: &'a AttachmentResolver,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(
        styles: StyleSheet,
        geometry: &PageGeometry,
        resolver: &'a AttachmentResolver,
    ) -> Self {
        Self {
            styles,
            content_width: geometry.content_width(),
            resolver,
        }
    }

    /// Title section followed by every entry, in input order.
    #[instrument(skip_all, fields(name = %collection.name, entries = collection.entries.len()))]
    pub fn build(&self, collection: &Collection) -> JournalLayout {
        let mut layout = JournalLayout {
            blocks: self.title_blocks(&collection.name),
            entries: collection.entries.len(),
            images: 0,
            skipped: Vec::new(),
        };

        for entry in &collection.entries {
            let mut built = self.entry_blocks(entry);
            trace!(
                entry = %built.entry,
                blocks = built.blocks.len(),
                images = built.images,
                skipped = built.skipped.len(),
                "Entry laid out"
            );
            layout.blocks.append(&mut built.blocks);
            layout.images += built.images;
            layout.skipped.append(&mut built.skipped);
        }

        debug!(
            blocks = layout.blocks.len(),
            images = layout.images,
            skipped = layout.skipped.len(),
            "Journal layout built"
        );
        layout
    }

    pub fn title_blocks(&self, name: &str) -> Vec<LayoutBlock> {
        vec![
            LayoutBlock::Spacer(TITLE_SPACE_ABOVE),
            LayoutBlock::Title(TextBlock {
                markup: markup::to_markup(name),
                style: self.styles.title,
                width: self.content_width,
            }),
            LayoutBlock::Spacer(TITLE_SPACE_BELOW),
        ]
    }

    pub fn entry_blocks(&self, entry: &Entry) -> EntryLayout {
        let mut blocks = vec![
            LayoutBlock::DateHeader(self.date_header(&entry.date)),
            LayoutBlock::Spacer(HEADER_SPACE_BELOW),
        ];

        let mut images = Vec::new();
        let mut skipped = Vec::new();
        for attachment in entry.image_attachments() {
            match self.load_image(&entry.id, attachment) {
                Ok(image) => images.push(image),
                Err(skip) => {
                    warn!(
                        entry = %skip.entry,
                        filename = %skip.filename,
                        reason = %skip.reason,
                        "Skipping attachment"
                    );
                    skipped.push(skip);
                }
            }
        }

        let body = markup::to_markup(&entry.text);
        let image_count = images.len();
        if images.is_empty() {
            blocks.push(LayoutBlock::Text(TextBlock {
                markup: body,
                style: self.styles.body,
                width: self.content_width,
            }));
        } else {
            let left_width = self.content_width * TEXT_COLUMN_RATIO;
            blocks.push(LayoutBlock::TwoColumn(TwoColumnBlock {
                text: TextBlock {
                    markup: body,
                    style: self.styles.body,
                    width: left_width - 2.0 * CELL_PADDING,
                },
                images,
                left_width,
                cell_padding: CELL_PADDING,
                image_gap: IMAGE_GAP,
            }));
        }

        blocks.push(LayoutBlock::Spacer(ENTRY_SPACE_BELOW));
        blocks.push(LayoutBlock::Divider(DividerBlock {
            width: self.content_width,
            thickness: DIVIDER_THICKNESS,
            color: DIVIDER_COLOR,
            space_after: DIVIDER_SPACE_AFTER,
        }));

        EntryLayout {
            entry: entry.id.clone(),
            blocks,
            images: image_count,
            skipped,
        }
    }

    fn date_header(&self, date: &str) -> DateHeaderBlock {
        DateHeaderBlock {
            text: TextBlock {
                markup: markup::to_markup(date),
                style: self.styles.date,
                width: self.content_width - 2.0 * HEADER_PADDING_X,
            },
            width: self.content_width,
            padding_x: HEADER_PADDING_X,
            padding_y: HEADER_PADDING_Y,
            background: BOX_COLOR,
            border: BORDER_COLOR,
            border_width: HEADER_BORDER_WIDTH,
        }
    }

    /// Resolve, decode and scale one image attachment.
    fn load_image(
        &self,
        entry: &EntryId,
        attachment: &Attachment,
    ) -> Result<ImageBlock, SkippedAttachment> {
        let filename = attachment.filename.clone().unwrap_or_default();
        let skip = |reason: SkipReason| SkippedAttachment {
            entry: entry.clone(),
            filename: filename.clone(),
            reason,
        };

        let path = self.resolver.resolve(attachment).map_err(&skip)?;
        let source = SourceImage::open(&path)
            .map_err(|err| skip(SkipReason::Unreadable(err.to_string())))?;
        let size = fit_image(
            source.width(),
            source.height(),
            self.content_width * IMAGE_WIDTH_RATIO,
            MAX_IMAGE_HEIGHT,
        )
        .ok_or_else(|| skip(SkipReason::Unreadable("image has no pixels".into())))?;

        Ok(ImageBlock { source, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use logpress_core::AttachmentKind;

    struct Fixture {
        _dir: tempfile::TempDir,
        resolver: AttachmentResolver,
        geometry: PageGeometry,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let attachments = dir.path().join("sawyer").join("attachments");
            std::fs::create_dir_all(&attachments).unwrap();
            RgbImage::from_pixel(800, 400, Rgb([200, 100, 50]))
                .save(attachments.join("wide.png"))
                .unwrap();
            RgbImage::from_pixel(300, 1200, Rgb([50, 100, 200]))
                .save(attachments.join("tall.png"))
                .unwrap();
            std::fs::write(attachments.join("corrupt.jpg"), b"\xff\xd8 not a jpeg").unwrap();

            let resolver = AttachmentResolver::new(dir.path(), &["sawyer", "attachments"]);
            Self {
                _dir: dir,
                resolver,
                geometry: PageGeometry::letter(),
            }
        }

        fn builder(&self) -> BlockBuilder<'_> {
            BlockBuilder::new(StyleSheet::journal(), &self.geometry, &self.resolver)
        }
    }

    fn entry(index: usize, text: &str, attachments: Vec<Attachment>) -> Entry {
        Entry {
            id: EntryId::positional(index),
            date: "2024-01-01".into(),
            text: text.into(),
            attachments,
        }
    }

    fn two_column(blocks: &[LayoutBlock]) -> Option<&TwoColumnBlock> {
        blocks.iter().find_map(|block| match block {
            LayoutBlock::TwoColumn(columns) => Some(columns),
            _ => None,
        })
    }

    #[test]
    fn text_only_entry_is_single_column() {
        let fixture = Fixture::new();
        let built = fixture.builder().entry_blocks(&entry(0, "Hello\nWorld", vec![]));

        let kinds: Vec<_> = built.blocks.iter().map(LayoutBlock::kind).collect();
        assert_eq!(kinds, vec!["date_header", "spacer", "text", "spacer", "divider"]);

        let LayoutBlock::Text(text) = &built.blocks[2] else {
            panic!("expected a text block");
        };
        assert_eq!(text.markup, "Hello<br/>World");
        assert_eq!(text.width, 468.0);
    }

    #[test]
    fn image_entry_is_two_columns_with_fixed_ratio() {
        let fixture = Fixture::new();
        let built = fixture
            .builder()
            .entry_blocks(&entry(0, "caption", vec![Attachment::image("wide.png")]));

        let columns = two_column(&built.blocks).expect("two-column block");
        assert!((columns.left_width / 468.0 - 0.55).abs() < 1e-6);
        let image_column = 468.0 - columns.left_width;
        assert!((image_column / 468.0 - 0.45).abs() < 1e-6);
        assert!(columns.images[0].size.width + 2.0 * columns.cell_padding <= image_column);
        assert!(built.blocks.iter().all(|b| !matches!(b, LayoutBlock::Text(_))));

        let image = &columns.images[0];
        assert!((image.size.width - 0.4 * 468.0).abs() < 1e-3);
        assert!((image.size.height - image.size.width * 0.5).abs() < 1e-3);
        assert_eq!(built.images, 1);
    }

    #[test]
    fn tall_image_is_capped_at_three_inches() {
        let fixture = Fixture::new();
        let built = fixture
            .builder()
            .entry_blocks(&entry(0, "", vec![Attachment::image("tall.png")]));

        let image = &two_column(&built.blocks).unwrap().images[0];
        assert_eq!(image.size.height, 216.0);
        assert!((image.size.width - 54.0).abs() < 1e-3);
    }

    #[test]
    fn missing_attachment_is_skipped_without_affecting_siblings() {
        let fixture = Fixture::new();
        let built = fixture.builder().entry_blocks(&entry(
            0,
            "text",
            vec![
                Attachment::image("wide.png"),
                Attachment::image("gone.png"),
                Attachment::image("tall.png"),
            ],
        ));

        let columns = two_column(&built.blocks).unwrap();
        let names: Vec<_> = columns
            .images
            .iter()
            .map(|i| i.source.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["wide.png", "tall.png"]);

        assert_eq!(built.skipped.len(), 1);
        assert_eq!(built.skipped[0].filename, "gone.png");
        assert!(matches!(built.skipped[0].reason, SkipReason::NotFound(_)));
    }

    #[test]
    fn only_missing_attachment_falls_back_to_text() {
        let fixture = Fixture::new();
        let built = fixture
            .builder()
            .entry_blocks(&entry(0, "text", vec![Attachment::image("gone.png")]));

        assert!(two_column(&built.blocks).is_none());
        assert!(built.blocks.iter().any(|b| matches!(b, LayoutBlock::Text(_))));
        assert_eq!(built.skipped.len(), 1);
    }

    #[test]
    fn corrupt_image_is_skipped_as_unreadable() {
        let fixture = Fixture::new();
        let built = fixture
            .builder()
            .entry_blocks(&entry(0, "text", vec![Attachment::image("corrupt.jpg")]));

        assert!(two_column(&built.blocks).is_none());
        assert!(matches!(built.skipped[0].reason, SkipReason::Unreadable(_)));
    }

    #[test]
    fn non_image_attachments_are_ignored() {
        let fixture = Fixture::new();
        let audio = Attachment {
            kind: AttachmentKind::Other("audio".into()),
            filename: Some("wide.png".into()),
        };
        let built = fixture.builder().entry_blocks(&entry(0, "text", vec![audio]));

        assert!(two_column(&built.blocks).is_none());
        assert!(built.skipped.is_empty());
    }

    #[test]
    fn one_header_and_divider_per_entry_in_order() {
        let fixture = Fixture::new();
        let collection = Collection {
            name: "T".into(),
            entries: vec![
                entry(0, "", vec![]),
                entry(1, "second", vec![Attachment::image("wide.png")]),
                entry(2, "third", vec![Attachment::image("gone.png")]),
            ],
        };
        let layout = fixture.builder().build(&collection);

        let headers = layout
            .blocks
            .iter()
            .filter(|b| matches!(b, LayoutBlock::DateHeader(_)))
            .count();
        let dividers = layout
            .blocks
            .iter()
            .filter(|b| matches!(b, LayoutBlock::Divider(_)))
            .count();
        assert_eq!((headers, dividers), (3, 3));
        assert!(matches!(layout.blocks.last(), Some(LayoutBlock::Divider(_))));
        assert_eq!(layout.entries, 3);
        assert_eq!(layout.images, 1);
        assert_eq!(layout.skipped.len(), 1);
    }

    #[test]
    fn empty_collection_is_title_only() {
        let fixture = Fixture::new();
        let layout = fixture.builder().build(&Collection {
            name: "T".into(),
            entries: vec![],
        });

        let kinds: Vec<_> = layout.blocks.iter().map(LayoutBlock::kind).collect();
        assert_eq!(kinds, vec!["spacer", "title", "spacer"]);
        let LayoutBlock::Title(title) = &layout.blocks[1] else {
            panic!("expected title");
        };
        assert_eq!(title.markup, "T");
    }
}
