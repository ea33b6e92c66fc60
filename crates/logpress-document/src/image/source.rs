// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source images — decoded attachment images ready to be embedded in a PDF.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba};
use logpress_core::error::LogpressError;
use printpdf::{RawImage, RawImageData, RawImageFormat};
use tracing::{debug, instrument};

/// A decoded attachment image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    path: PathBuf,
}

impl SourceImage {
    /// Decode the image at `path`. The format is inferred from the contents.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogpressError> {
        let path = path.as_ref();
        let image = image::ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| {
                LogpressError::ImageError(format!("failed to open {}: {}", path.display(), err))
            })?
            .decode()
            .map_err(|err| {
                LogpressError::ImageError(format!("failed to decode {}: {}", path.display(), err))
            })?;

        debug!(width = image.width(), height = image.height(), "Image decoded");
        Ok(Self {
            image,
            path: path.to_path_buf(),
        })
    }

    /// Wrap an already-decoded image.
    pub fn from_dynamic(image: DynamicImage, path: impl Into<PathBuf>) -> Self {
        Self {
            image,
            path: path.into(),
        }
    }

    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel data in the form `printpdf` embeds. Transparency is composited
    /// onto white, the page colour.
    pub fn to_raw_image(&self) -> RawImage {
        let rgb = if self.image.color().has_alpha() {
            flatten_on_white(&self.image)
        } else {
            self.image.to_rgb8()
        };

        RawImage {
            width: rgb.width() as usize,
            height: rgb.height() as usize,
            pixels: RawImageData::U8(rgb.into_raw()),
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        }
    }
}

fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    ImageBuffer::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = u32::from(a);
        let blend = |channel: u8| -> u8 {
            ((u32::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}
