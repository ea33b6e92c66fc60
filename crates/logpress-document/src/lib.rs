// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logpress-document — Layout and PDF output for Logpress journals.
//
// Turns a loaded collection into layout blocks (title, date headers, body
// text, image columns, dividers), flows them onto numbered pages, and writes
// the result with printpdf. lopdf reads finished documents back.

pub mod image;
pub mod journal;
pub mod layout;
pub mod markup;
pub mod metrics;
pub mod pdf;
pub mod style;
pub mod winansi;

// Re-export the primary entry points so callers can use `logpress_document::JournalWriter` etc.
pub use journal::{JournalSummary, generate_journal, layout_journal};
pub use layout::{BlockBuilder, JournalLayout, LayoutBlock};
pub use pdf::{JournalWriter, PdfReader, RenderedDocument};
pub use style::StyleSheet;
