// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font metrics and line wrapping for the base-14 Helvetica faces.
//
// Advance widths are the Adobe AFM values (units of 1/1000 em) for the WinAnsi
// code page. Text is measured as it will be drawn, after encoding, so spelled
// and replaced characters take the width of what replaces them.

use crate::style::FontWeight;
use crate::winansi::{self, EncodedChar};

const FIRST_PRINTABLE: u8 = 0x20;
const FIRST_HIGH: u8 = 0x80;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

// 0x80-0xFF. Codes cp1252 leaves undefined are 0.
#[rustfmt::skip]
const HELVETICA_HIGH: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_HIGH: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Advance width of one WinAnsi code in 1/1000 em.
pub fn code_width(code: u8, weight: FontWeight) -> u16 {
    let (low, high) = match weight {
        FontWeight::Regular => (&HELVETICA, &HELVETICA_HIGH),
        FontWeight::Bold => (&HELVETICA_BOLD, &HELVETICA_BOLD_HIGH),
    };
    match code {
        FIRST_HIGH.. => high[usize::from(code - FIRST_HIGH)],
        FIRST_PRINTABLE.. => low.get(usize::from(code - FIRST_PRINTABLE)).copied().unwrap_or(0),
        _ => 0,
    }
}

/// Advance width of `ch` in 1/1000 em, as drawn.
pub fn char_width(ch: char, weight: FontWeight) -> u16 {
    match winansi::encode_char(ch) {
        EncodedChar::Byte(code) => code_width(code, weight),
        EncodedChar::Spelled(text) => text.bytes().map(|code| code_width(code, weight)).sum(),
        EncodedChar::Replaced => code_width(winansi::REPLACEMENT, weight),
    }
}

/// Width of `text` in points when set at `size`.
pub fn text_width(text: &str, weight: FontWeight, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, weight))).sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap of a single display line to `max_width` points.
///
/// Runs of whitespace collapse to one space. Words wider than `max_width` are
/// broken between characters. A blank line yields one empty line.
pub fn wrap_line(line: &str, max_width: f32, weight: FontWeight, size: f32) -> Vec<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }
    if max_width <= 0.0 {
        return vec![words.join(" ")];
    }

    let space = text_width(" ", weight, size);
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_width = text_width(word, weight, size);

        if word_width > max_width {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            let (mut pieces, tail) = break_word(word, max_width, weight, size);
            result.append(&mut pieces);
            current_width = text_width(&tail, weight, size);
            current = tail;
        } else if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            result.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Split an overlong word into full-width pieces plus the remaining tail.
fn break_word(word: &str, max_width: f32, weight: FontWeight, size: f32) -> (Vec<String>, String) {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for ch in word.chars() {
        let ch_width = f32::from(char_width(ch, weight)) * size / 1000.0;
        if !piece.is_empty() && width + ch_width > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += ch_width;
    }
    (pieces, piece)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        assert_eq!(char_width(' ', FontWeight::Regular), 278);
        assert_eq!(char_width('W', FontWeight::Regular), 944);
        assert_eq!(char_width('m', FontWeight::Bold), 889);
        assert_eq!(char_width('\u{7f}', FontWeight::Regular), 556);
        // "Hi" = 722 + 222 at 10pt
        assert!((text_width("Hi", FontWeight::Regular, 10.0) - 9.44).abs() < 1e-4);
    }

    #[test]
    fn non_ascii_is_measured_as_drawn() {
        assert_eq!(char_width('\u{e9}', FontWeight::Regular), 556);
        assert_eq!(char_width('\u{c9}', FontWeight::Regular), 667);
        assert_eq!(char_width('\u{2014}', FontWeight::Regular), 1000);
        assert_eq!(char_width('\u{2019}', FontWeight::Bold), 278);
        assert_eq!(char_width('\u{fc}', FontWeight::Bold), 611);
        // Spelled as ">=".
        assert_eq!(char_width('\u{2265}', FontWeight::Regular), 1168);
        // Replaced by '?'.
        assert_eq!(char_width('\u{4e2d}', FontWeight::Regular), 556);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let width = text_width("aaaa aaaa", FontWeight::Regular, 10.0) + 0.5;
        let lines = wrap_line("aaaa aaaa aaaa aaaa", width, FontWeight::Regular, 10.0);
        assert_eq!(lines, vec!["aaaa aaaa", "aaaa aaaa"]);
    }

    #[test]
    fn every_line_fits() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running \
                    through the meadow until the sun goes down";
        for line in wrap_line(text, 120.0, FontWeight::Regular, 10.0) {
            assert!(text_width(&line, FontWeight::Regular, 10.0) <= 120.0, "{line}");
        }
    }

    #[test]
    fn overlong_word_is_broken() {
        let word = "x".repeat(100);
        let lines = wrap_line(&word, 50.0, FontWeight::Regular, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, FontWeight::Regular, 10.0) <= 50.0);
        }
    }

    #[test]
    fn blank_line_is_kept() {
        assert_eq!(
            wrap_line("   ", 100.0, FontWeight::Regular, 10.0),
            vec![String::new()]
        );
    }
}
