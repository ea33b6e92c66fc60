// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — opens a rendered journal with `lopdf` to report what ended up
// on its pages.

use std::path::Path;

use logpress_core::error::LogpressError;
use lopdf::Document;
use tracing::{debug, info, instrument, warn};

/// Read-only view of an existing PDF file.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogpressError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            LogpressError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, LogpressError> {
        let document = Document::load_mem(data).map_err(|err| {
            LogpressError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Text of a single page (1-indexed).
    ///
    /// Extraction is best effort: it depends on the font encodings the
    /// producer wrote.
    pub fn page_text(&self, page_number: u32) -> Result<String, LogpressError> {
        let pages = self.page_count();
        if page_number == 0 || page_number as usize > pages {
            return Err(LogpressError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number, pages
            )));
        }

        self.document.extract_text(&[page_number]).map_err(|err| {
            warn!(page_number, %err, "Text extraction failed");
            LogpressError::PdfError(format!(
                "cannot extract text from page {}: {}",
                page_number, err
            ))
        })
    }
}
