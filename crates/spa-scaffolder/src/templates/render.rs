//! Template text rendering
//!
//! Marker syntax:
//!
//! - `<%=key%>` is replaced by the value of `key`
//! - `<%=#flag%>...<%=/flag%>` keeps its content when `flag` is truthy
//! - `<%=^flag%>...<%=/flag%>` keeps its content when `flag` is falsy
//!
//! Whitespace is allowed inside a marker (`<%= key %>`). Blocks are flat: a
//! block may contain value placeholders but not another block. A block marker
//! that sits alone on its line is removed together with that line, so
//! guarding whole lines does not leave blank lines behind.

use super::options::OptionSet;
use crate::error::RenderError;
use regex::Regex;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<%=\s*([#^/]?)\s*([A-Za-z_][A-Za-z0-9_]*)\s*%>").expect("valid marker pattern")
});

struct OpenBlock<'a> {
    key: &'a str,
    emit: bool,
}

/// Render `raw` against `options`
///
/// A value placeholder whose key is absent is an error. A block whose flag is
/// absent is treated as false.
pub fn render(raw: &str, options: &OptionSet) -> Result<String, RenderError> {
    let mut out = String::with_capacity(raw.len());
    let mut cursor = 0;
    let mut open: Option<OpenBlock> = None;

    for caps in MARKER.captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };
        let sigil = caps.get(1).map_or("", |m| m.as_str());
        let key = caps.get(2).map_or("", |m| m.as_str());
        let emitting = open.as_ref().map_or(true, |b| b.emit);

        let (start, end) = if sigil.is_empty() {
            (whole.start(), whole.end())
        } else {
            standalone_span(raw, cursor, whole.start(), whole.end())
                .unwrap_or((whole.start(), whole.end()))
        };

        if emitting {
            out.push_str(&raw[cursor..start]);
        }
        cursor = end;

        match sigil {
            "#" | "^" => {
                if let Some(outer) = &open {
                    return Err(RenderError::NestedBlock {
                        outer: outer.key.to_string(),
                        inner: key.to_string(),
                    });
                }
                let truthy = options.flag(key);
                open = Some(OpenBlock {
                    key,
                    emit: if sigil == "#" { truthy } else { !truthy },
                });
            }
            "/" => match open.take() {
                Some(block) if block.key == key => {}
                _ => {
                    return Err(RenderError::UnexpectedClose {
                        key: key.to_string(),
                    })
                }
            },
            _ => {
                if emitting {
                    let value = options
                        .get(key)
                        .ok_or_else(|| RenderError::MissingOption {
                            key: key.to_string(),
                        })?;
                    out.push_str(&value.to_string());
                }
            }
        }
    }

    if let Some(block) = open {
        return Err(RenderError::UnclosedBlock {
            key: block.key.to_string(),
        });
    }

    out.push_str(&raw[cursor..]);
    Ok(out)
}

/// Span covering a block marker's whole line, when the marker is the only
/// thing on it. `floor` is the first byte not yet consumed by the renderer.
fn standalone_span(raw: &str, floor: usize, start: usize, end: usize) -> Option<(usize, usize)> {
    let line_start = raw[..start].rfind('\n').map_or(0, |i| i + 1);
    if line_start < floor || !is_blank(&raw[line_start..start]) {
        return None;
    }

    let rest = &raw[end..];
    let line_end = rest.find('\n').map_or(raw.len(), |i| end + i + 1);
    let tail = raw[end..line_end].trim_end_matches('\n').trim_end_matches('\r');
    if !is_blank(tail) {
        return None;
    }

    Some((line_start, line_end))
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}
