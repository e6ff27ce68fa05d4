//! Lexical helpers for JavaScript/TypeScript source text
//!
//! Not a parser. `CodeMap` records which byte ranges are string literals,
//! template literals or comments so that anchor matches and bracket counting
//! can ignore them. Regular-expression literals are not recognised.

#[derive(Debug, Clone, Copy)]
struct Masked {
    start: usize,
    end: usize,
    comment: bool,
}

/// Byte ranges of `text` that are not code
#[derive(Debug, Clone)]
pub struct CodeMap {
    masked: Vec<Masked>,
}

impl CodeMap {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let len = bytes.len();
        let mut masked = Vec::new();
        let mut i = 0;

        while i < len {
            match bytes[i] {
                b'/' if i + 1 < len && bytes[i + 1] == b'/' => {
                    let end = text[i..].find('\n').map_or(len, |n| i + n);
                    masked.push(Masked { start: i, end, comment: true });
                    i = end;
                }
                b'/' if i + 1 < len && bytes[i + 1] == b'*' => {
                    let end = text[i + 2..].find("*/").map_or(len, |n| i + 2 + n + 2);
                    masked.push(Masked { start: i, end, comment: true });
                    i = end;
                }
                quote @ (b'\'' | b'"' | b'`') => {
                    let mut j = i + 1;
                    while j < len {
                        match bytes[j] {
                            b'\\' => j += 2,
                            b if b == quote => {
                                j += 1;
                                break;
                            }
                            b'\n' if quote != b'`' => break,
                            _ => j += 1,
                        }
                    }
                    let end = j.min(len);
                    masked.push(Masked { start: i, end, comment: false });
                    i = end;
                }
                _ => i += 1,
            }
        }

        Self { masked }
    }

    /// Whether the byte at `pos` is code
    pub fn is_code(&self, pos: usize) -> bool {
        self.masked_range(pos).is_none()
    }

    /// Whether the byte at `pos` is inside a comment
    pub fn is_comment(&self, pos: usize) -> bool {
        self.masked_range(pos).is_some_and(|m| m.comment)
    }

    fn masked_range(&self, pos: usize) -> Option<Masked> {
        let idx = self.masked.partition_point(|m| m.start <= pos);
        idx.checked_sub(1)
            .map(|i| self.masked[i])
            .filter(|m| pos < m.end)
    }

    /// Index of the bracket closing the one at `open`, counting only code
    pub fn matching_close(&self, text: &str, open: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        let mut stack: Vec<u8> = Vec::new();
        let mut i = open;

        while i < bytes.len() {
            if let Some(m) = self.masked_range(i) {
                i = m.end;
                continue;
            }
            match bytes[i] {
                b @ (b'[' | b'(' | b'{') => stack.push(b),
                b @ (b']' | b')' | b'}') => {
                    let expected = match b {
                        b']' => b'[',
                        b')' => b'(',
                        _ => b'{',
                    };
                    if stack.pop() != Some(expected) {
                        return None;
                    }
                    if stack.is_empty() {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        None
    }

    /// Last non-whitespace code byte in `from..to`
    pub fn last_code_byte(&self, text: &str, from: usize, to: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        (from..to)
            .rev()
            .find(|&i| !bytes[i].is_ascii_whitespace() && self.is_code(i))
    }
}

/// Split an array or argument body at its top-level commas. Entries holding
/// nothing but whitespace and comments (a trailing comma, say) are dropped.
pub fn split_top_level(body: &str) -> Vec<&str> {
    let code = CodeMap::new(body);
    let bytes = body.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(m) = code.masked_range(i) {
            i = m.end;
            continue;
        }
        match bytes[i] {
            b'[' | b'(' | b'{' => depth += 1,
            b']' | b')' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push((start, i));
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push((start, bytes.len()));

    parts
        .into_iter()
        .filter(|&(s, e)| (s..e).any(|k| !bytes[k].is_ascii_whitespace() && !code.is_comment(k)))
        .map(|(s, e)| body[s..e].trim())
        .collect()
}

/// Remove every whitespace character; used for tolerant containment checks
pub fn squash_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
