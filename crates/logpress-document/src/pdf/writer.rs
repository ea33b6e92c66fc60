// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Journal writer — renders a block sequence to PDF using `printpdf` 0.8.
//
// Rendering runs in three phases over an owned page buffer:
//
//   collecting  blocks are flowed into `ComposedPage`s
//   stamping    every page gets its label, now that the page count is known
//   finalized   pages are handed to printpdf and serialised
//
// Each phase consumes the previous phase's output, so a page cannot be
// serialised before it has been stamped.

use std::path::Path;

use logpress_core::error::LogpressError;
use logpress_core::{PageGeometry, PageNumberFormat};
use printpdf::{Mm, PdfDocument, PdfPage, PdfParseErrorSeverity, PdfSaveOptions, PdfWarnMsg};
use tracing::{debug, info, instrument, warn};

use super::flow::{ComposedPage, FlowEngine, write_text};
use crate::layout::LayoutBlock;
use crate::metrics;
use crate::style::{FontWeight, LIGHT_GRAY};

const PAGE_NUMBER_SIZE: f32 = 8.0;
/// Baseline of the page label, measured up from the bottom edge.
const PAGE_NUMBER_OFFSET: f32 = 36.0;

/// Points to millimetres, for printpdf's page constructor.
fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// A serialised PDF and the number of pages in it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Pages after flow, before labels.
#[derive(Debug)]
pub struct ComposedPages(Vec<ComposedPage>);

/// Pages carrying their final labels.
#[derive(Debug)]
pub struct StampedPages(Vec<ComposedPage>);

impl ComposedPages {
    pub fn pages(&self) -> &[ComposedPage] {
        &self.0
    }

    /// Append a centered label to the foot of every page.
    pub fn stamp(self, geometry: &PageGeometry, format: PageNumberFormat) -> StampedPages {
        let total = self.0.len();
        let font = FontWeight::Regular.builtin_font();

        let pages = self
            .0
            .into_iter()
            .enumerate()
            .map(|(index, mut page)| {
                let label = format.label(index + 1, total);
                let width = metrics::text_width(&label, FontWeight::Regular, PAGE_NUMBER_SIZE);
                let x = geometry.width / 2.0 - width / 2.0;
                write_text(
                    &mut page.ops,
                    &label,
                    font,
                    PAGE_NUMBER_SIZE,
                    LIGHT_GRAY,
                    x,
                    PAGE_NUMBER_OFFSET,
                );
                page
            })
            .collect();

        StampedPages(pages)
    }
}

impl StampedPages {
    pub fn pages(&self) -> &[ComposedPage] {
        &self.0
    }

    fn into_pdf_pages(self, geometry: &PageGeometry) -> Vec<PdfPage> {
        let (width, height) = (pt_to_mm(geometry.width), pt_to_mm(geometry.height));
        self.0
            .into_iter()
            .map(|page| PdfPage::new(width, height, page.ops))
            .collect()
    }
}

/// Renders journal layouts to PDF.
pub struct JournalWriter {
    geometry: PageGeometry,
    page_numbers: PageNumberFormat,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl JournalWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            page_numbers: PageNumberFormat::default(),
            title: None,
        }
    }

    /// US Letter with the journal margins.
    pub fn letter() -> Self {
        Self::new(PageGeometry::letter())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_page_number_format(&mut self, format: PageNumberFormat) {
        self.page_numbers = format;
    }

    /// Flow `blocks` onto pages, stamp them, and serialise the document.
    #[instrument(skip_all, fields(blocks = blocks.len()))]
    pub fn render(&self, blocks: &[LayoutBlock]) -> Result<RenderedDocument, LogpressError> {
        let title = self.title.as_deref().unwrap_or("Journal");
        let mut doc = PdfDocument::new(title);

        let composed = self.compose(&mut doc, blocks);
        debug!(phase = "collecting", pages = composed.pages().len(), "Content flowed");

        let stamped = composed.stamp(&self.geometry, self.page_numbers);
        debug!(phase = "stamping", "Page labels applied");

        let page_count = stamped.pages().len();
        doc.with_pages(stamped.into_pdf_pages(&self.geometry));

        // Text is written as raw `Tj` ops, which the secure default drops.
        let options = PdfSaveOptions {
            secure: false,
            ..PdfSaveOptions::default()
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&options, &mut warnings);
        let reported = report_save_warnings(&warnings);
        debug!(
            phase = "finalized",
            bytes = bytes.len(),
            warnings = reported,
            "Document serialised"
        );

        info!(title, pages = page_count, "Journal rendered");
        Ok(RenderedDocument { bytes, page_count })
    }

    /// Render and write the document to `path`.
    pub fn write_to_file(
        &self,
        blocks: &[LayoutBlock],
        path: impl AsRef<Path>,
    ) -> Result<RenderedDocument, LogpressError> {
        let rendered = self.render(blocks)?;
        std::fs::write(path.as_ref(), &rendered.bytes)?;
        info!("Wrote journal PDF to {}", path.as_ref().display());
        Ok(rendered)
    }

    fn compose(&self, doc: &mut PdfDocument, blocks: &[LayoutBlock]) -> ComposedPages {
        let mut engine = FlowEngine::new(doc, self.geometry);
        for block in blocks {
            engine.flow(block);
        }
        ComposedPages(engine.finish())
    }
}

/// Log printpdf's save diagnostics. Returns how many were above info level.
fn report_save_warnings(warnings: &[PdfWarnMsg]) -> usize {
    let mut reported = 0;
    for warning in warnings {
        match warning.severity {
            PdfParseErrorSeverity::Info => {
                debug!(
                    page = warning.page,
                    op = warning.op_id,
                    "printpdf: {}",
                    warning.msg
                );
            }
            severity => {
                warn!(
                    page = warning.page,
                    op = warning.op_id,
                    ?severity,
                    "printpdf: {}",
                    warning.msg
                );
                reported += 1;
            }
        }
    }
    reported
}
