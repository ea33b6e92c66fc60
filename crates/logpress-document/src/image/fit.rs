// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Aspect-preserving image scaling.

use logpress_core::POINTS_PER_INCH;

/// Share of the content width an image is scaled to.
pub const IMAGE_WIDTH_RATIO: f32 = 0.4;

/// Tallest an image may be placed, in points.
pub const MAX_IMAGE_HEIGHT: f32 = 3.0 * POINTS_PER_INCH;

/// Placed size of an image in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

/// Scale a `native_width` x `native_height` pixel image to `target_width`,
/// then shrink uniformly if the result is taller than `max_height`.
///
/// Returns `None` for images with a zero dimension.
pub fn fit_image(
    native_width: u32,
    native_height: u32,
    target_width: f32,
    max_height: f32,
) -> Option<ImageSize> {
    if native_width == 0 || native_height == 0 {
        return None;
    }
    let aspect = native_height as f32 / native_width as f32;

    let mut width = target_width;
    let mut height = target_width * aspect;
    if height > max_height {
        height = max_height;
        width = max_height / aspect;
    }
    Some(ImageSize { width, height })
}
