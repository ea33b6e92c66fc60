// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Logpress: the journal collection, its entries and
// attachments, and the page geometry the layout is computed against.

use serde::{Deserialize, Serialize};

/// Points per inch. All layout measurements are PDF points.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Identifier of a journal entry.
///
/// Source files use either numeric or string identifiers; entries without one
/// are numbered by their 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl EntryId {
    /// Identifier assigned to the entry at `index` (0-based) when the source
    /// omits one.
    pub fn positional(index: usize) -> Self {
        Self::Number(index as i64 + 1)
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// What an attachment refers to. Only images affect the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentKind {
    Image,
    /// Any other declared type, kept verbatim for diagnostics.
    Other(String),
}

impl AttachmentKind {
    /// Classify the `type` field of an attachment record.
    pub fn from_type(kind: &str) -> Self {
        if kind == "image" {
            Self::Image
        } else {
            Self::Other(kind.to_string())
        }
    }
}

/// A file associated with an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    /// File name relative to the attachment directory.
    pub filename: Option<String>,
}

impl Attachment {
    pub fn image(filename: impl Into<String>) -> Self {
        Self {
            kind: AttachmentKind::Image,
            filename: Some(filename.into()),
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == AttachmentKind::Image
    }
}

/// One log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub date: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl Entry {
    /// Image attachments in declaration order.
    pub fn image_attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.is_image())
    }
}

/// A named, ordered list of entries. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    /// Arbitrary size in points.
    Custom { width_pt: f32, height_pt: f32 },
}

impl PaperSize {
    /// Dimensions in points (width, height), portrait orientation.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.28, 841.89),
            Self::A3 => (841.89, 1190.55),
            Self::A5 => (419.53, 595.28),
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
            Self::Tabloid => (792.0, 1224.0),
            Self::Custom {
                width_pt,
                height_pt,
            } => (*width_pt, *height_pt),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    /// One inch on three sides, three quarters of an inch at the bottom.
    fn default() -> Self {
        Self {
            top: POINTS_PER_INCH,
            right: POINTS_PER_INCH,
            bottom: 0.75 * POINTS_PER_INCH,
            left: POINTS_PER_INCH,
        }
    }
}

/// Page size plus margins. PDF coordinates: origin bottom-left, y grows up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(paper_size: PaperSize, margins: Margins) -> Self {
        let (width, height) = paper_size.dimensions_pt();
        Self {
            width,
            height,
            margins,
        }
    }

    /// US Letter with the default journal margins.
    pub fn letter() -> Self {
        Self::new(PaperSize::Letter, Margins::default())
    }

    /// Width available to content between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Height available to content between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.height - self.margins.top - self.margins.bottom
    }

    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    /// y coordinate of the top edge of the content frame.
    pub fn content_top(&self) -> f32 {
        self.height - self.margins.top
    }

    /// y coordinate of the bottom edge of the content frame.
    pub fn content_bottom(&self) -> f32 {
        self.margins.bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}
