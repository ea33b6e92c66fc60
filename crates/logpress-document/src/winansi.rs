// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsi (cp1252) text encoding for the base-14 fonts.
//
// printpdf declares its built-in fonts with /WinAnsiEncoding, so every string
// shown with them must be one byte per glyph in that code page. Characters the
// code page lacks get an ASCII spelling where one exists, otherwise `?`.

/// Byte drawn for characters with no WinAnsi code and no spelling.
pub const REPLACEMENT: u8 = b'?';

/// How one character is written in WinAnsi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedChar {
    Byte(u8),
    /// An ASCII spelling, e.g. `>=` for `≥`.
    Spelled(&'static str),
    Replaced,
}

impl EncodedChar {
    fn push_to(self, out: &mut Vec<u8>) {
        match self {
            Self::Byte(byte) => out.push(byte),
            Self::Spelled(text) => out.extend_from_slice(text.as_bytes()),
            Self::Replaced => out.push(REPLACEMENT),
        }
    }
}

/// A string encoded for a built-in font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Characters drawn as [`REPLACEMENT`].
    pub replaced: usize,
}

pub fn encode_char(ch: char) -> EncodedChar {
    if let Some(byte) = code_point(ch) {
        return EncodedChar::Byte(byte);
    }
    match ch {
        '\t' => EncodedChar::Byte(b' '),
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => EncodedChar::Byte(b'-'),
        '\u{2264}' => EncodedChar::Spelled("<="),
        '\u{2265}' => EncodedChar::Spelled(">="),
        '\u{2260}' => EncodedChar::Spelled("!="),
        '\u{2192}' => EncodedChar::Spelled("->"),
        '\u{2190}' => EncodedChar::Spelled("<-"),
        _ => EncodedChar::Replaced,
    }
}

pub fn encode(text: &str) -> Encoded {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for ch in text.chars() {
        let encoded = encode_char(ch);
        if encoded == EncodedChar::Replaced {
            replaced += 1;
        }
        encoded.push_to(&mut bytes);
    }
    Encoded { bytes, replaced }
}

/// The cp1252 code of `ch`. Control characters have none.
pub fn code_point(ch: char) -> Option<u8> {
    let byte = match ch {
        '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Inverse of [`encode`] for bytes it produces.
#[cfg(test)]
pub(crate) fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| match byte {
            0x80..=0x9F => (0x80..=0xFFFF_u32)
                .filter_map(char::from_u32)
                .find(|&ch| code_point(ch) == Some(byte))
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            _ => char::from(byte),
        })
        .collect()
}
