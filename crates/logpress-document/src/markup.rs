// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paragraph markup. Entry text is normalised into a tiny markup language whose
// only element is `<br/>`; everything else is character data with `&`, `<`
// and `>` escaped. The flow engine turns markup back into display lines.

/// The only element the markup knows.
pub const LINE_BREAK: &str = "<br/>";

/// Normalise plain text into paragraph markup.
///
/// Newlines (`\n`, `\r\n`, `\r`) become `<br/>`. `&`, `<` and `>` are escaped
/// unless they are already part of a character reference or a `<br/>`, so
/// `to_markup(&to_markup(s)) == to_markup(s)`.
pub fn to_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let advance = match ch {
            '\r' if rest.starts_with("\r\n") => {
                out.push_str(LINE_BREAK);
                2
            }
            '\r' | '\n' => {
                out.push_str(LINE_BREAK);
                1
            }
            '<' if rest.starts_with(LINE_BREAK) => {
                out.push_str(LINE_BREAK);
                LINE_BREAK.len()
            }
            '<' => {
                out.push_str("&lt;");
                1
            }
            '>' => {
                out.push_str("&gt;");
                1
            }
            '&' => match reference_len(rest) {
                Some(len) => {
                    out.push_str(&rest[..len]);
                    len
                }
                None => {
                    out.push_str("&amp;");
                    1
                }
            },
            other => {
                out.push(other);
                other.len_utf8()
            }
        };
        rest = &rest[advance..];
    }

    out
}

/// Split markup into display lines, one per `<br/>`-separated segment, with
/// character references decoded.
pub fn markup_lines(markup: &str) -> Vec<String> {
    markup.split(LINE_BREAK).map(unescape).collect()
}

/// Decode the character references in one markup segment.
fn unescape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let decoded = reference_len(rest)
            .and_then(|len| decode_reference(&rest[..len]).map(|ch| (len, ch)));
        match decoded {
            Some((len, ch)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length in bytes of the character reference `s` starts with, if any.
fn reference_len(s: &str) -> Option<usize> {
    let end = s.find(';')?;
    let body = &s[1..end];
    let valid = match body.strip_prefix('#') {
        Some(numeric) => match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => is_digits(hex, 6, |c| c.is_ascii_hexdigit()),
            None => is_digits(numeric, 7, |c| c.is_ascii_digit()),
        },
        None => matches!(body, "amp" | "lt" | "gt" | "quot" | "apos" | "nbsp"),
    };
    valid.then_some(end + 1)
}

fn is_digits(s: &str, max_len: usize, digit: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.len() <= max_len && s.chars().all(digit)
}

fn decode_reference(reference: &str) -> Option<char> {
    let body = &reference[1..reference.len() - 1];
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = body.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(to_markup("Hello\nWorld"), "Hello<br/>World");
        assert_eq!(to_markup("a\r\nb\rc"), "a<br/>b<br/>c");
        assert_eq!(to_markup("\n\n"), "<br/><br/>");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(to_markup("fish & chips"), "fish &amp; chips");
        assert_eq!(to_markup("a < b"), "a &lt; b");
        assert_eq!(to_markup("x<y>z"), "x&lt;y&gt;z");
        assert_eq!(to_markup("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn normalisation_is_idempotent() {
        let samples = [
            "Hello\nWorld",
            "fish & chips <3 >_<",
            "already &amp; escaped &#169; &#x1F600; &lt;",
            "pre-broken<br/>line",
            "& ; &; &#; &#x; &bogus;",
            "",
        ];
        for sample in samples {
            let once = to_markup(sample);
            assert_eq!(to_markup(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn lines_round_trip_display_text() {
        let markup = to_markup("Tom & Jerry\n1 < 2\n\nend");
        assert_eq!(
            markup_lines(&markup),
            vec!["Tom & Jerry", "1 < 2", "", "end"]
        );
    }

    #[test]
    fn numeric_references_decode() {
        assert_eq!(markup_lines("&#169; &#xE9;"), vec!["\u{a9} \u{e9}"]);
        assert_eq!(markup_lines("&bogus;"), vec!["&bogus;"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(markup_lines(&to_markup("")), vec![String::new()]);
    }
}
