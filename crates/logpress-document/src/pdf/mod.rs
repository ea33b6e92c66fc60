// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — pagination, page labels, serialisation, and read-back of the
// written document.

pub mod flow;
pub mod reader;
pub mod writer;

pub use flow::{ComposedPage, FlowEngine};
pub use reader::PdfReader;
pub use writer::{JournalWriter, RenderedDocument};
