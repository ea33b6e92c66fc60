// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding attachment images and fitting them into the image
// column.

pub mod fit;
pub mod source;

pub use fit::{ImageSize, fit_image};
pub use source::SourceImage;
