// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text styles and the journal colour palette. Fixed constants, no runtime
// configuration.

use printpdf::{BuiltinFont, Color, Rgb};

/// 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Colour from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(Rgb {
            r: f32::from(self.r) / 255.0,
            g: f32::from(self.g) / 255.0,
            b: f32::from(self.b) / 255.0,
            icc_profile: None,
        })
    }
}

/// Near black, used for titles and body text.
pub const TEXT_COLOR: Rgb8 = Rgb8::hex(0x1a1a1a);
/// Dates and page numbers.
pub const LIGHT_GRAY: Rgb8 = Rgb8::hex(0x666666);
pub const DIVIDER_COLOR: Rgb8 = Rgb8::hex(0xe0e0e0);
/// Date header background.
pub const BOX_COLOR: Rgb8 = Rgb8::hex(0xf5f5f5);
/// Date header border.
pub const BORDER_COLOR: Rgb8 = Rgb8::hex(0xcccccc);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    /// The PDF base-14 font used for this weight.
    pub fn builtin_font(self) -> BuiltinFont {
        match self {
            Self::Regular => BuiltinFont::Helvetica,
            Self::Bold => BuiltinFont::HelveticaBold,
        }
    }
}

/// A named paragraph style. Text is always left-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub name: &'static str,
    pub weight: FontWeight,
    /// Font size in points.
    pub size: f32,
    /// Baseline-to-baseline distance in points.
    pub leading: f32,
    pub color: Rgb8,
    pub space_before: f32,
    pub space_after: f32,
}

/// The three styles a journal uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSheet {
    pub title: TextStyle,
    pub date: TextStyle,
    pub body: TextStyle,
}

impl StyleSheet {
    pub fn journal() -> Self {
        Self {
            title: TextStyle {
                name: "title",
                weight: FontWeight::Bold,
                size: 36.0,
                leading: 42.0,
                color: TEXT_COLOR,
                space_before: 20.0,
                space_after: 40.0,
            },
            date: TextStyle {
                name: "date",
                weight: FontWeight::Regular,
                size: 9.0,
                leading: 11.0,
                color: LIGHT_GRAY,
                space_before: 5.0,
                space_after: 12.0,
            },
            body: TextStyle {
                name: "body",
                weight: FontWeight::Regular,
                size: 10.0,
                leading: 14.0,
                color: TEXT_COLOR,
                space_before: 0.0,
                space_after: 8.0,
            },
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::journal()
    }
}
