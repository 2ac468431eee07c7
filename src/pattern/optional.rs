use super::{PatternError, PatternResult};

/// Expands a trailing `{name?}` segment into its two concrete registrations.
///
/// `/users/{id?}` becomes `["/users", "/users/{id}"]`; the caller registers
/// both instead of the original. An empty result means the path carries no
/// optional marker and is registered as written. A `?` inside a
/// `{name:pattern}` constraint is regex text. At most one optional marker is
/// accepted, and it must form the entire final segment.
pub fn expand_optional_paths(path: &str) -> PatternResult<Vec<String>> {
    let bytes = path.as_bytes();
    let mut found: Option<(usize, usize)> = None;
    let mut search = 0;

    while let Some(offset) = memchr::memchr(b'{', &bytes[search..]) {
        let start = search + offset;
        let mut with_constraint = false;
        let mut depth = 0usize;
        let mut close = None;

        for (rel, &b) in bytes[start + 1..].iter().enumerate() {
            match b {
                b':' => with_constraint = true,
                b'{' => depth += 1,
                b'}' => {
                    if depth > 0 {
                        depth -= 1;
                    } else {
                        close = Some(start + 1 + rel);
                        break;
                    }
                }
                _ => {}
            }
        }

        // Malformed blocks are not judged here; insertion reports them
        // against the expanded path.
        let Some(close) = close else {
            search = start + 1;
            continue;
        };

        let optional = !with_constraint && bytes[close - 1] == b'?';
        if optional {
            if found.is_some() {
                return Err(PatternError::MultipleOptionalSegments {
                    path: path.to_string(),
                });
            }
            found = Some((start, close));
        }
        search = close + 1;
    }

    let Some((start, close)) = found else {
        return Ok(Vec::new());
    };

    let terminal = close + 1 == path.len() && start > 0 && bytes[start - 1] == b'/';
    if !terminal {
        return Err(PatternError::OptionalNotTerminal {
            path: path.to_string(),
        });
    }

    let without = if start == 1 {
        String::from("/")
    } else {
        path[..start - 1].to_string()
    };
    let with = format!("{}{}", &path[..close - 1], &path[close..]);

    Ok(vec![without, with])
}
