//! Line-oriented `key=value` property-file decoding.
//!
//! Bodies are read as ISO-8859-1; characters outside that range are written with
//! `\uXXXX` escapes. A logical line may span several natural lines when a natural
//! line ends in an odd number of backslashes. Lines starting with `#` or `!` are
//! comments. The key ends at the first unescaped `=`, `:` or whitespace.
//!
//! Parsing is lenient except for malformed `\uXXXX` escapes, which fail the whole
//! body instead of producing a partial map.
use std::collections::HashMap;

use crate::errors::PropertiesError;

/// Decoded property set. Later duplicates of a key overwrite earlier ones.
pub type Properties = HashMap<String, String>;

/// Parses a property-file body.
pub fn parse(bytes: &[u8]) -> Result<Properties, PropertiesError> {
    // ISO-8859-1 maps every byte onto the code point with the same value
    let text: String = bytes.iter().map(|&b| b as char).collect();

    let mut props = Properties::new();
    for (line, logical) in logical_lines(&text) {
        let (key, value) = split_entry(&logical);
        props.insert(unescape(key, line)?, unescape(value, line)?);
    }

    Ok(props)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn natural_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Joins continuation lines and drops blanks and comments. Each entry carries the
/// 1-based natural line number the logical line starts on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in natural_lines(text).into_iter().enumerate() {
        let segment = raw.trim_start_matches(is_blank);

        let (start, mut buf) = match pending.take() {
            Some(p) => p,
            None => {
                if segment.is_empty() || segment.starts_with(['#', '!']) {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        let trailing = segment.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            buf.push_str(&segment[..segment.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(segment);
            if !buf.is_empty() {
                out.push((start, buf));
            }
        }
    }

    if let Some((start, buf)) = pending {
        if !buf.is_empty() {
            out.push((start, buf));
        }
    }

    out
}

/// Splits a logical line into its still-escaped key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (idx, c) in line.char_indices() {
        if !preceding_backslash && (c == '=' || c == ':') {
            key_end = idx;
            value_start = idx + 1;
            has_separator = true;
            break;
        }
        if !preceding_backslash && is_blank(c) {
            key_end = idx;
            value_start = idx + 1;
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    // Whitespace, at most one separator, whitespace
    let mut rest = line[value_start..].trim_start_matches(is_blank);
    if !has_separator && rest.starts_with(['=', ':']) {
        rest = rest[1..].trim_start_matches(is_blank);
    }

    (&line[..key_end], rest)
}

fn push_char(units: &mut Vec<u16>, c: char) {
    let mut buf = [0u16; 2];
    units.extend_from_slice(c.encode_utf16(&mut buf));
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    // Collected as UTF-16 so surrogate pairs given as two \u escapes recombine
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut units, c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            break;
        };

        match escaped {
            'u' => {
                let mut value: u16 = 0;
                for _ in 0..4 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(16))
                        .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
                    value = (value << 4) | digit as u16;
                }
                units.push(value);
            }
            't' => push_char(&mut units, '\t'),
            'r' => push_char(&mut units, '\r'),
            'n' => push_char(&mut units, '\n'),
            'f' => push_char(&mut units, '\x0c'),
            other => push_char(&mut units, other),
        }
    }

    Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn simple_pairs() {
        let p = parse(b"a=1\nb=2\n").unwrap();
        assert_eq!(p, props(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn empty_body() {
        assert!(parse(b"").unwrap().is_empty());
        assert!(parse(b"\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn comments_are_skipped() {
        let p = parse(b"# header\n  ! bang comment\nkey=value\n#trailing=no").unwrap();
        assert_eq!(p, props(&[("key", "value")]));
    }

    #[test]
    fn separators_and_whitespace() {
        let p = parse(b"a = 1\nb:2\nc 3\n  d\t=\t4  \ne\nf  :  =6").unwrap();
        assert_eq!(
            p,
            props(&[
                ("a", "1"),
                ("b", "2"),
                ("c", "3"),
                ("d", "4  "),
                ("e", ""),
                ("f", "=6"),
            ])
        );
    }

    #[test]
    fn continuation_lines() {
        let p = parse(b"fruits=apple, \\\n    banana, \\\n    pear\nnext=1").unwrap();
        assert_eq!(p["fruits"], "apple, banana, pear");
        assert_eq!(p["next"], "1");
    }

    #[test]
    fn comment_marker_on_continuation_is_text() {
        let p = parse(b"k=a\\\n#b").unwrap();
        assert_eq!(p, props(&[("k", "a#b")]));
    }

    #[test]
    fn even_backslashes_do_not_continue() {
        let p = parse(b"path=c:\\\\\nother=x").unwrap();
        assert_eq!(p["path"], "c:\\");
        assert_eq!(p["other"], "x");
    }

    #[test]
    fn crlf_and_cr_line_endings() {
        let p = parse(b"a=1\r\nb=2\rc=3").unwrap();
        assert_eq!(p, props(&[("a", "1"), ("b", "2"), ("c", "3")]));
    }

    #[test]
    fn escapes_in_keys_and_values() {
        let p = parse(b"key\\=with\\:seps\\ x=tab\\there\\nnewline\nq=\\q\\\\").unwrap();
        assert_eq!(p["key=with:seps x"], "tab\there\nnewline");
        assert_eq!(p["q"], "q\\");
    }

    #[test]
    fn unicode_escapes() {
        let p = parse(b"greek=\\u03B1\\u03b2\nemoji=\\uD83D\\uDE00").unwrap();
        assert_eq!(p["greek"], "αβ");
        assert_eq!(p["emoji"], "😀");
    }

    #[test]
    fn latin1_bytes() {
        let p = parse(b"name=caf\xe9").unwrap();
        assert_eq!(p["name"], "café");
    }

    #[test]
    fn malformed_unicode_escape_fails() {
        let err = parse(b"ok=1\n\nbad=\\u12G4\n").unwrap_err();
        assert!(matches!(
            err,
            PropertiesError::MalformedUnicodeEscape { line: 3 }
        ));

        let err = parse(b"short=\\u12").unwrap_err();
        assert!(matches!(
            err,
            PropertiesError::MalformedUnicodeEscape { line: 1 }
        ));
    }

    #[test]
    fn later_duplicate_wins() {
        let p = parse(b"a=1\na=2\n").unwrap();
        assert_eq!(p, props(&[("a", "2")]));
    }
}
