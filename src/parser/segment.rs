//! Source segmenter — splits a unit into `/** doc */` + following-code pairs.
//!
//! A byte-level scanner that skips over string, template, regex literals and
//! ordinary comments so that `/**` inside any of them never opens a doc
//! comment. All delimiters are ASCII, so slicing at their offsets is always
//! on a char boundary.

use crate::error::{Error, Result};

/// One doc comment and the code that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text between `/**` and `*/`
    pub comment: String,
    /// Everything up to the next doc comment or end of input, verbatim
    pub code: String,
    /// 1-based line where the doc comment opens
    pub line: usize,
}

/// Keywords after which a `/` begins a regex literal rather than a division.
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "case", "in", "of", "delete", "void", "throw", "new",
];

/// Split source text into ordered doc-comment/code segments.
///
/// Text before the first doc comment is dropped. An unterminated doc
/// comment is an error; an unterminated ordinary comment simply runs to the
/// end of input as part of the code.
pub fn segment(input: &str) -> Result<Vec<Segment>> {
    let bytes = input.as_bytes();
    let mut segments: Vec<Segment> = Vec::new();
    let mut code_start = 0;
    let mut pos = 0;
    let mut regex_allowed = true;
    let mut lines = LineCounter::default();

    while pos < bytes.len() {
        let c = bytes[pos];
        let next = bytes.get(pos + 1).copied();
        match c {
            b'/' if next == Some(b'*') => {
                let is_doc = bytes.get(pos + 2) == Some(&b'*') && bytes.get(pos + 3) != Some(&b'/');
                let body_start = if is_doc { pos + 3 } else { pos + 2 };
                match find_comment_end(bytes, body_start) {
                    Some(close) => {
                        if is_doc {
                            let line = lines.line_at(bytes, pos);
                            if let Some(last) = segments.last_mut() {
                                last.code = input[code_start..pos].to_string();
                            }
                            segments.push(Segment {
                                comment: input[body_start..close].to_string(),
                                code: String::new(),
                                line,
                            });
                            code_start = close + 2;
                        }
                        pos = close + 2;
                    }
                    None if is_doc => {
                        return Err(Error::UnterminatedComment {
                            line: lines.line_at(bytes, pos),
                        });
                    }
                    None => pos = bytes.len(),
                }
            }
            b'/' if next == Some(b'/') => {
                pos = skip_line_comment(bytes, pos);
            }
            b'/' => {
                if regex_allowed {
                    if let Some(end) = skip_regex(bytes, pos) {
                        pos = end;
                        regex_allowed = false;
                        continue;
                    }
                }
                pos += 1;
                regex_allowed = true;
            }
            b'\'' | b'"' | b'`' => {
                pos = skip_string(bytes, pos);
                regex_allowed = false;
            }
            c if c.is_ascii_whitespace() => pos += 1,
            c if is_ident_byte(c) => {
                let start = pos;
                while pos < bytes.len() && is_ident_byte(bytes[pos]) {
                    pos += 1;
                }
                regex_allowed = REGEX_KEYWORDS.contains(&&input[start..pos]);
            }
            b')' | b']' => {
                pos += 1;
                regex_allowed = false;
            }
            _ => {
                pos += 1;
                regex_allowed = true;
            }
        }
    }

    if let Some(last) = segments.last_mut() {
        last.code = input[code_start..].to_string();
    }
    Ok(segments)
}

/// Incremental line numbering for monotonically increasing offsets.
#[derive(Default)]
struct LineCounter {
    scanned: usize,
    newlines: usize,
}

impl LineCounter {
    fn line_at(&mut self, bytes: &[u8], pos: usize) -> usize {
        self.newlines += bytes[self.scanned..pos].iter().filter(|&&b| b == b'\n').count();
        self.scanned = pos;
        self.newlines + 1
    }
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}

/// Offset of the `*/` closing a block comment whose body starts at `from`.
fn find_comment_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|i| from + i)
}

/// Position of the newline ending a `//` comment (newline not consumed).
fn skip_line_comment(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| pos + i)
}

/// Skip a quoted literal starting at `pos`. Plain quotes stop at an
/// unescaped newline; template literals may span lines.
fn skip_string(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skip a regex literal starting at `pos`, including its flags. Returns
/// `None` when no closing `/` is found on the same line.
fn skip_regex(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut i = pos + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                return Some(i);
            }
            _ => i += 1,
        }
    }
    None
}
