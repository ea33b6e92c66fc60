// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout blocks — the units the flow engine places on pages.

use crate::image::{ImageSize, SourceImage};
use crate::markup;
use crate::metrics;
use crate::style::{Rgb8, TextStyle};

/// A paragraph of markup set in one style at a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub markup: String,
    pub style: TextStyle,
    /// Wrapping width in points.
    pub width: f32,
}

impl TextBlock {
    /// Display lines after decoding the markup and wrapping to `width`.
    pub fn lines(&self) -> Vec<String> {
        markup::markup_lines(&self.markup)
            .iter()
            .flat_map(|line| {
                metrics::wrap_line(line, self.width, self.style.weight, self.style.size)
            })
            .collect()
    }

    /// Height of the wrapped lines, excluding paragraph spacing.
    pub fn height(&self) -> f32 {
        self.lines().len() as f32 * self.style.leading
    }
}

/// The boxed date callout that opens every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DateHeaderBlock {
    pub text: TextBlock,
    /// Outer width of the box.
    pub width: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub background: Rgb8,
    pub border: Rgb8,
    pub border_width: f32,
}

impl DateHeaderBlock {
    pub fn height(&self) -> f32 {
        self.text.height() + 2.0 * self.padding_y
    }
}

/// A decoded image and the size it is placed at.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    pub source: SourceImage,
    pub size: ImageSize,
}

/// Body text on the left, stacked images on the right.
#[derive(Debug, Clone)]
pub struct TwoColumnBlock {
    /// Left column content; its width is the column width minus padding.
    pub text: TextBlock,
    pub images: Vec<ImageBlock>,
    /// Width of the text column. The image column takes the rest.
    pub left_width: f32,
    /// Horizontal padding inside each column.
    pub cell_padding: f32,
    /// Vertical space between stacked images.
    pub image_gap: f32,
}

impl TwoColumnBlock {
    /// Height of the image stack.
    pub fn images_height(&self) -> f32 {
        let images: f32 = self.images.iter().map(|image| image.size.height).sum();
        let gaps = self.images.len().saturating_sub(1) as f32 * self.image_gap;
        images + gaps
    }

    pub fn height(&self) -> f32 {
        self.text.height().max(self.images_height())
    }
}

/// A horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerBlock {
    pub width: f32,
    pub thickness: f32,
    pub color: Rgb8,
    pub space_after: f32,
}

#[derive(Debug, Clone)]
pub enum LayoutBlock {
    /// The collection name on the first page.
    Title(TextBlock),
    /// Fixed vertical whitespace. Dropped when it would cross a page break.
    Spacer(f32),
    DateHeader(DateHeaderBlock),
    /// Full-width body text.
    Text(TextBlock),
    TwoColumn(TwoColumnBlock),
    Divider(DividerBlock),
}

impl LayoutBlock {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Spacer(_) => "spacer",
            Self::DateHeader(_) => "date_header",
            Self::Text(_) => "text",
            Self::TwoColumn(_) => "two_column",
            Self::Divider(_) => "divider",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSheet;

    fn body(markup: &str, width: f32) -> TextBlock {
        TextBlock {
            markup: markup.into(),
            style: StyleSheet::journal().body,
            width,
        }
    }

    #[test]
    fn text_lines_split_on_breaks_and_wrap() {
        let block = body("Hello<br/>World", 468.0);
        assert_eq!(block.lines(), vec!["Hello", "World"]);
        assert_eq!(block.height(), 28.0);

        let narrow = body("one two three four five six", 40.0);
        assert!(narrow.lines().len() > 1);
    }

    #[test]
    fn empty_text_still_has_a_line() {
        let block = body("", 468.0);
        assert_eq!(block.lines().len(), 1);
        assert_eq!(block.height(), 14.0);
    }
}
