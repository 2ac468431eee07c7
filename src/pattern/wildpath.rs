use regex::Regex;
use smallvec::SmallVec;

use super::{PatternError, PatternResult};

/// How a wild segment matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildKind {
    /// Captures within one path segment, optionally constrained by a regex.
    Param,
    /// Captures the entire remaining path.
    Wildcard,
}

/// The first wild portion of a registration path.
///
/// Compound segments such as `{y}-{m}-{d}` or `{file}.html` merge into a
/// single `WildPath` whose pattern carries one capture group per key.
#[derive(Debug)]
pub struct WildPath {
    /// Spec text as written, e.g. `{id:[0-9]+}` or `{y}-{m}-{d}`.
    pub spec: String,
    /// Capture names, in order.
    pub keys: SmallVec<[Box<str>; 2]>,
    /// Byte offset where the wild portion begins.
    pub start: usize,
    /// Byte offset one past the wild portion.
    pub end: usize,
    pub kind: WildKind,
    /// Assembled match pattern; only compiled when a constraint or a
    /// compound literal requires it.
    pub pattern: String,
    pub regex: Option<Regex>,
}

/// Byte length of the leading path segment.
///
/// With `include_trailing_slash`, a slash that is the very last byte of
/// `path` is counted into the segment so a trailing-slash variant stays
/// attached to it.
#[inline]
pub fn segment_end_index(path: &str, include_trailing_slash: bool) -> usize {
    let end = memchr::memchr(b'/', path.as_bytes()).unwrap_or(path.len());
    if include_trailing_slash && &path[end..] == "/" {
        end + 1
    } else {
        end
    }
}

/// Finds and parses the first `{...}` block in `path`.
///
/// Returns `Ok(None)` when the path is purely literal. An unterminated `{`
/// is literal text. Braces inside a regex constraint nest; a `{` inside a
/// plain parameter name is an error, as are empty names, adjacent wild
/// segments, and constraints that fail to compile. `full_path` is only used
/// for error reporting.
pub fn find_wild_path(path: &str, full_path: &str) -> PatternResult<Option<WildPath>> {
    let bytes = path.as_bytes();
    let mut search = 0;

    while let Some(offset) = memchr::memchr(b'{', &bytes[search..]) {
        let start = search + offset;
        let mut with_constraint = false;
        let mut depth = 0usize;
        let mut close = None;

        for (rel, &b) in bytes[start + 1..].iter().enumerate() {
            match b {
                b':' => with_constraint = true,
                b'{' => {
                    if !with_constraint && depth == 0 {
                        return Err(PatternError::BraceInParamName {
                            path: full_path.to_string(),
                        });
                    }
                    depth += 1;
                }
                b'}' => {
                    if depth > 0 {
                        depth -= 1;
                    } else {
                        close = Some(start + rel + 2);
                        break;
                    }
                }
                _ => {}
            }
        }

        let Some(end) = close else {
            search = start + 1;
            continue;
        };

        if end < path.len() && bytes[end] == b'{' {
            return Err(PatternError::UnseparatedWildSegments {
                path: full_path.to_string(),
            });
        }

        let inner = &path[start + 1..end - 1];
        let (name, kind, pattern, regex) = match inner.split_once(':') {
            Some((name, constraint)) => {
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName {
                        path: full_path.to_string(),
                    });
                }
                if constraint == "*" {
                    (name, WildKind::Wildcard, String::from("*"), None)
                } else {
                    let pattern = format!("({constraint})");
                    let regex = compile_constraint(&pattern, full_path)?;
                    (name, WildKind::Param, pattern, Some(regex))
                }
            }
            None => {
                if inner.is_empty() {
                    return Err(PatternError::EmptyParamName {
                        path: full_path.to_string(),
                    });
                }
                // A bare parameter only needs a pattern when literal text
                // may follow it within the segment.
                let pattern = if path.ends_with('/') {
                    String::new()
                } else {
                    String::from("(.*)")
                };
                (inner, WildKind::Param, pattern, None)
            }
        };

        let mut keys: SmallVec<[Box<str>; 2]> = SmallVec::new();
        keys.push(name.into());
        let mut wp = WildPath {
            spec: path[start..end].to_string(),
            keys,
            start,
            end,
            kind,
            pattern,
            regex,
        };

        // Fold literal text and further wild blocks from the same segment
        // into this one, so the whole segment matches as a unit.
        let seg_end = end + segment_end_index(&path[end..], true);
        let mut tail = &path[end..seg_end];
        if tail == "/" {
            tail = "";
            wp.end += 1;
        }
        if !tail.is_empty() {
            match find_wild_path(tail, full_path)? {
                Some(nested) => {
                    let prefix = &tail[..nested.start];
                    wp.end += nested.end;
                    wp.spec.push_str(prefix);
                    wp.spec.push_str(&nested.spec);
                    wp.pattern.push_str(prefix);
                    wp.pattern.push_str(&nested.pattern);
                    wp.keys.extend(nested.keys);
                }
                None => {
                    wp.spec.push_str(tail);
                    wp.pattern.push_str(tail);
                    wp.end += tail.len();
                }
            }
            wp.regex = Some(compile_constraint(&wp.pattern, full_path)?);
        }

        return Ok(Some(wp));
    }

    Ok(None)
}

fn compile_constraint(pattern: &str, full_path: &str) -> PatternResult<Regex> {
    Regex::new(pattern).map_err(|err| PatternError::InvalidConstraint {
        path: full_path.to_string(),
        pattern: pattern.to_string(),
        error: err.to_string(),
    })
}
