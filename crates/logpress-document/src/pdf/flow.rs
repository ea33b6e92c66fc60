// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flow engine — places layout blocks top-down inside the content frame and
// starts a new page whenever the next piece does not fit.
//
// printpdf 0.8 is data-oriented: each page is a `Vec<Op>`. The engine only
// appends ops to the page being composed; nothing is serialised here, so the
// finished page list can be decorated afterwards (see `writer.rs`).

use logpress_core::PageGeometry;
use printpdf::{
    DictItem, LinePoint, Op, PaintMode, PdfDocument, Point, Polygon, PolygonRing, Pt,
    WindingOrder, XObjectTransform,
};
use tracing::{debug, trace, warn};

use crate::layout::{
    DateHeaderBlock, DividerBlock, ImageBlock, LayoutBlock, TextBlock, TwoColumnBlock,
};
use crate::style::{Rgb8, TextStyle};
use crate::winansi;

/// Slack for floating-point comparisons against the frame edges.
const EPSILON: f32 = 0.01;

/// Native image resolution handed to printpdf: one pixel per point, so the
/// scale factors below map pixels straight onto the placed size.
const IMAGE_DPI: f32 = 72.0;

/// PDF show-text operator.
const SHOW_TEXT: &str = "Tj";

/// A page whose content has been laid out but not yet serialised.
#[derive(Debug, Clone, Default)]
pub struct ComposedPage {
    pub ops: Vec<Op>,
}

/// Lays blocks out across as many pages as they need.
pub struct FlowEngine<'d> {
    doc: &'d mut PdfDocument,
    geometry: PageGeometry,
    finished: Vec<ComposedPage>,
    current: ComposedPage,
    /// y of the top of the free space on the current page.
    cursor: f32,
}

impl<'d> FlowEngine<'d> {
    /// Images are registered with `doc` as they are placed.
    pub fn new(doc: &'d mut PdfDocument, geometry: PageGeometry) -> Self {
        Self {
            doc,
            geometry,
            finished: Vec::new(),
            current: ComposedPage::default(),
            cursor: geometry.content_top(),
        }
    }

    /// Place one block after everything placed so far.
    pub fn flow(&mut self, block: &LayoutBlock) {
        trace!(kind = block.kind(), cursor = self.cursor, "Flowing block");
        match block {
            LayoutBlock::Spacer(height) => self.place_spacer(*height),
            LayoutBlock::Title(text) | LayoutBlock::Text(text) => self.place_paragraph(text),
            LayoutBlock::DateHeader(header) => self.place_header(header),
            LayoutBlock::TwoColumn(columns) => self.place_columns(columns),
            LayoutBlock::Divider(divider) => self.place_divider(divider),
        }
    }

    /// Number of pages started so far, including the one being composed.
    pub fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    /// Close the current page and return every page in order. There is
    /// always at least one page.
    pub fn finish(mut self) -> Vec<ComposedPage> {
        if !self.current.ops.is_empty() || self.finished.is_empty() {
            self.finished.push(self.current);
        }
        debug!(pages = self.finished.len(), "Flow complete");
        self.finished
    }

    // -- Frame bookkeeping -----------------------------------------------------

    fn remaining(&self) -> f32 {
        self.cursor - self.geometry.content_bottom()
    }

    fn fits(&self, height: f32) -> bool {
        height <= self.remaining() + EPSILON
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.geometry.content_top() - EPSILON
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.finished.push(page);
        self.cursor = self.geometry.content_top();
        trace!(page = self.page_count(), "Page break");
    }

    /// Break the page unless `height` fits or the page is still empty. An
    /// oversized block on an empty page is placed anyway and overflows.
    fn ensure_room(&mut self, height: f32) {
        if !self.fits(height) && !self.at_page_top() {
            self.new_page();
        }
    }

    /// Move the cursor down, never below the bottom margin.
    fn advance(&mut self, height: f32) {
        self.cursor = (self.cursor - height).max(self.geometry.content_bottom());
    }

    // -- Block placement --------------------------------------------------------

    fn place_spacer(&mut self, height: f32) {
        if self.fits(height) {
            self.cursor -= height;
        } else {
            self.new_page();
        }
    }

    fn place_paragraph(&mut self, block: &TextBlock) {
        let style = block.style;
        trace!(style = style.name, "Placing paragraph");
        if !self.at_page_top() && style.space_before > 0.0 {
            if self.fits(style.space_before + style.leading) {
                self.cursor -= style.space_before;
            } else {
                self.new_page();
            }
        }

        let x = self.geometry.content_left();
        for line in block.lines() {
            self.ensure_room(style.leading);
            write_line(&mut self.current.ops, &line, &style, x, self.cursor);
            self.cursor -= style.leading;
        }

        self.advance(style.space_after);
    }

    fn place_header(&mut self, header: &DateHeaderBlock) {
        let height = header.height();
        self.ensure_room(height);

        let x = self.geometry.content_left();
        let top = self.cursor;
        let ops = &mut self.current.ops;

        ops.push(Op::SaveGraphicsState);
        ops.push(Op::SetFillColor {
            col: header.background.to_color(),
        });
        ops.push(Op::SetOutlineColor {
            col: header.border.to_color(),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(header.border_width),
        });
        ops.push(Op::DrawPolygon {
            polygon: rectangle(x, top - height, header.width, height),
        });
        ops.push(Op::RestoreGraphicsState);

        let text_x = x + header.padding_x;
        let mut line_top = top - header.padding_y;
        for line in header.text.lines() {
            write_line(ops, &line, &header.text.style, text_x, line_top);
            line_top -= header.text.style.leading;
        }

        self.cursor = top - height;
    }

    /// Text and images flow independently in their columns. When either
    /// column runs out of room the block continues on the next page, both
    /// columns resuming at the top.
    fn place_columns(&mut self, columns: &TwoColumnBlock) {
        let lines = columns.text.lines();
        let style = columns.text.style;

        let total = columns.height();
        if !self.fits(total) && total <= self.geometry.content_height() {
            self.ensure_room(total);
        }

        let text_x = self.geometry.content_left() + columns.cell_padding;
        let image_x = self.geometry.content_left() + columns.left_width + columns.cell_padding;
        let bottom = self.geometry.content_bottom();

        let mut next_line = 0;
        let mut next_image = 0;
        loop {
            let top = self.cursor;
            let fresh_page = self.at_page_top();

            let mut text_y = top;
            let mut placed = 0;
            while let Some(line) = lines.get(next_line) {
                let room = text_y - style.leading >= bottom - EPSILON;
                if !room && !(fresh_page && placed == 0) {
                    break;
                }
                write_line(&mut self.current.ops, line, &style, text_x, text_y);
                text_y -= style.leading;
                next_line += 1;
                placed += 1;
            }

            let mut image_y = top;
            let mut placed = 0;
            while let Some(image) = columns.images.get(next_image) {
                let gap = if placed == 0 { 0.0 } else { columns.image_gap };
                let room = image_y - gap - image.size.height >= bottom - EPSILON;
                if !room && !(fresh_page && placed == 0) {
                    break;
                }
                image_y -= gap;
                self.draw_image(image, image_x, image_y - image.size.height);
                image_y -= image.size.height;
                next_image += 1;
                placed += 1;
            }

            if next_line >= lines.len() && next_image >= columns.images.len() {
                self.cursor = text_y.min(image_y).max(bottom);
                break;
            }
            self.new_page();
        }
    }

    fn place_divider(&mut self, divider: &DividerBlock) {
        self.ensure_room(divider.thickness);

        let x = self.geometry.content_left();
        let y = self.cursor - divider.thickness / 2.0;
        let ops = &mut self.current.ops;
        ops.push(Op::SaveGraphicsState);
        ops.push(Op::SetOutlineColor {
            col: divider.color.to_color(),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(divider.thickness),
        });
        ops.push(Op::DrawLine {
            line: printpdf::Line {
                points: vec![line_point(x, y), line_point(x + divider.width, y)],
                is_closed: false,
            },
        });
        ops.push(Op::RestoreGraphicsState);

        self.advance(divider.thickness + divider.space_after);
    }

    /// Embed an image with its lower-left corner at (`x`, `y`).
    fn draw_image(&mut self, image: &ImageBlock, x: f32, y: f32) {
        let raw = image.source.to_raw_image();
        let (px_w, px_h) = (raw.width as f32, raw.height as f32);
        let id = self.doc.add_image(&raw);

        self.current.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(y)),
                scale_x: Some(image.size.width / px_w),
                scale_y: Some(image.size.height / px_h),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        });
        debug!(
            path = %image.source.path().display(),
            width = image.size.width,
            height = image.size.height,
            "Image placed"
        );
    }
}

// -- Drawing helpers -------------------------------------------------------------

/// Write one line of text whose line box starts at `line_top`.
pub(crate) fn write_line(
    ops: &mut Vec<Op>,
    text: &str,
    style: &TextStyle,
    x: f32,
    line_top: f32,
) {
    if text.is_empty() {
        return;
    }
    let baseline = line_top - baseline_offset(style);
    let font = style.weight.builtin_font();
    write_text(ops, text, font, style.size, style.color, x, baseline);
}

/// Write `text` with its baseline starting at (`x`, `baseline`).
///
/// The string is shown by a raw `Tj` of WinAnsi bytes; the empty
/// `WriteTextBuiltinFont` only registers the font with the page. Pages
/// holding these ops must be saved with `secure: false`.
pub(crate) fn write_text(
    ops: &mut Vec<Op>,
    text: &str,
    font: printpdf::BuiltinFont,
    size: f32,
    color: Rgb8,
    x: f32,
    baseline: f32,
) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetFillColor {
        col: color.to_color(),
    });
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(x),
            y: Pt(baseline),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: Vec::new(),
        font,
    });

    let encoded = winansi::encode(text);
    if encoded.replaced > 0 {
        warn!(
            text,
            replaced = encoded.replaced,
            "Characters outside WinAnsi drawn as '?'"
        );
    }
    ops.push(Op::Unknown {
        key: SHOW_TEXT.to_string(),
        value: vec![DictItem::String {
            data: encoded.bytes,
            literal: false,
        }],
    });
    ops.push(Op::EndTextSection);
}

/// The shown bytes of a text op written by [`write_text`].
#[cfg(test)]
pub(crate) fn shown_bytes(op: &Op) -> Option<&[u8]> {
    match op {
        Op::Unknown { key, value } if key == SHOW_TEXT => match value.as_slice() {
            [DictItem::String { data, .. }] => Some(data.as_slice()),
            _ => None,
        },
        _ => None,
    }
}

/// Distance from the top of a line box to the baseline: the glyph ascent
/// with the extra leading split evenly above and below.
fn baseline_offset(style: &TextStyle) -> f32 {
    const ASCENT: f32 = 0.78;
    (style.leading - style.size) / 2.0 + style.size * ASCENT
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

/// Filled and stroked axis-aligned rectangle with lower-left corner (`x`, `y`).
fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Polygon {
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                line_point(x, y),
                line_point(x + width, y),
                line_point(x + width, y + height),
                line_point(x, y + height),
            ],
        }],
        mode: PaintMode::FillStroke,
        winding_order: WindingOrder::NonZero,
    }
}
