use regex::Regex;

use crate::params::Params;
use crate::pattern::segment_end_index;

use super::node::{Node, NodeKind};

impl<T> Node<T> {
    /// Resolves `path` against this node's children.
    ///
    /// Returns `(Some(value), false)` on a match, `(None, true)` when only a
    /// trailing-slash variant is registered, `(None, false)` otherwise.
    /// Captured parameters are pushed onto `params` only along a successful
    /// branch; dead ends roll back to their checkpoint before the next
    /// sibling is tried. Param keys borrow from the tree, values from the
    /// request path.
    pub(crate) fn get_from_child<'t, 'p>(
        &'t self,
        path: &'p str,
        params: &mut Params<'t, 'p>,
    ) -> (Option<&'t T>, bool) {
        for child in &self.children {
            match child.kind {
                NodeKind::Static => {
                    // First-byte reject before the full prefix compare.
                    if path.as_bytes().first() != child.path.as_bytes().first() {
                        continue;
                    }

                    if path.len() > child.path.len() {
                        if !path.as_bytes().starts_with(child.path.as_bytes()) {
                            continue;
                        }

                        let checkpoint = params.len();
                        let (value, tsr) =
                            child.get_from_child(&path[child.path.len()..], params);
                        if value.is_some() || tsr {
                            return (value, tsr);
                        }
                        params.truncate(checkpoint);
                    } else if path == &*child.path {
                        if child.tsr {
                            return (None, true);
                        }
                        if let Some(value) = child.value.as_ref() {
                            return (Some(value), false);
                        }
                        if let Some(wildcard) = child.wildcard.as_deref() {
                            params.push(&wildcard.key, "");
                            return (Some(&wildcard.value), false);
                        }

                        // An exact static match that terminates nothing is
                        // final; later siblings are not consulted.
                        return (None, false);
                    }
                }
                NodeKind::Param => {
                    let mut end = segment_end_index(path, false);
                    let checkpoint = params.len();

                    if let Some(regex) = child.param_regex.as_ref() {
                        match capture_params(regex, &path[..end], &child.param_names, params) {
                            Some(consumed) => end = consumed,
                            None => continue,
                        }
                    } else if let Some(name) = child.param_names.first() {
                        params.push(name, &path[..end]);
                    }

                    if path.len() > end {
                        let (value, tsr) = child.get_from_child(&path[end..], params);
                        if tsr {
                            params.truncate(checkpoint);
                            return (None, true);
                        }
                        if value.is_some() {
                            return (value, false);
                        }
                        params.truncate(checkpoint);
                    } else {
                        if child.tsr {
                            params.truncate(checkpoint);
                            return (None, true);
                        }
                        if let Some(value) = child.value.as_ref() {
                            return (Some(value), false);
                        }
                        params.truncate(checkpoint);
                    }
                }
                _ => {}
            }
        }

        // Last resort at this position: the wildcard swallows everything
        // that is left, slashes included.
        if let Some(wildcard) = self.wildcard.as_deref() {
            params.push(&wildcard.key, path);
            return (Some(&wildcard.value), false);
        }

        (None, false)
    }
}

/// Anchored-at-start match of a compiled segment pattern. Pushes one value
/// per capture name and reports how many bytes the match consumed; `None`
/// when the pattern does not match at offset zero.
fn capture_params<'t, 'p>(
    regex: &Regex,
    segment: &'p str,
    names: &'t [Box<str>],
    params: &mut Params<'t, 'p>,
) -> Option<usize> {
    let caps = regex.captures(segment)?;
    let full = caps.get(0)?;
    if full.start() != 0 {
        return None;
    }

    for (at, name) in names.iter().enumerate() {
        let value = caps.get(at + 1).map_or("", |m| m.as_str());
        params.push(name, value);
    }

    Some(full.end())
}
