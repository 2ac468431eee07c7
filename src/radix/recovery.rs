use regex::Regex;

use crate::pattern::segment_end_index;

use super::node::{Node, NodeKind};

impl<T> Node<T> {
    /// Case-insensitive walk that rebuilds the canonical registered path in
    /// `out`. Static fragments are emitted in their registered spelling,
    /// param and wildcard captures in the request's spelling. Returns
    /// `(found, needs_slash_fix)`; on failure `out` is restored to its state
    /// at entry.
    pub(crate) fn find_insensitive(&self, path: &str, out: &mut String) -> (bool, bool) {
        let node_len = self.path.len();

        if path.len() > node_len {
            if !path.as_bytes()[..node_len].eq_ignore_ascii_case(self.path.as_bytes()) {
                return (false, false);
            }

            out.push_str(&self.path);
            let (found, tsr) = self.find_insensitive_from_child(&path[node_len..], out);
            if found {
                return (found, tsr);
            }
            out.truncate(out.len() - node_len);
        } else if path.as_bytes().eq_ignore_ascii_case(self.path.as_bytes()) {
            out.push_str(&self.path);

            if self.tsr {
                if &*self.path == "/" {
                    out.truncate(out.len() - 1);
                } else {
                    out.push('/');
                }
                return (true, true);
            }
            if self.value.is_some() {
                return (true, false);
            }
            out.truncate(out.len() - node_len);
        }

        (false, false)
    }

    fn find_insensitive_from_child(&self, path: &str, out: &mut String) -> (bool, bool) {
        for child in &self.children {
            match child.kind {
                NodeKind::Static => {
                    let (found, tsr) = child.find_insensitive(path, out);
                    if found {
                        return (found, tsr);
                    }
                }
                NodeKind::Param => {
                    let mut end = segment_end_index(path, false);

                    if let Some(regex) = child.param_regex.as_ref() {
                        match consumed_at_start(regex, &path[..end]) {
                            Some(consumed) => end = consumed,
                            None => continue,
                        }
                    }

                    out.push_str(&path[..end]);

                    if path.len() > end {
                        let (found, tsr) = child.find_insensitive_from_child(&path[end..], out);
                        if found {
                            return (found, tsr);
                        }
                    } else {
                        if child.tsr {
                            out.push('/');
                            return (true, true);
                        }
                        if child.value.is_some() {
                            return (true, false);
                        }
                    }

                    out.truncate(out.len() - end);
                }
                _ => {}
            }
        }

        if self.wildcard.is_some() {
            out.push_str(path);
            return (true, false);
        }

        (false, false)
    }
}

fn consumed_at_start(regex: &Regex, segment: &str) -> Option<usize> {
    let found = regex.find(segment)?;
    if found.start() != 0 {
        return None;
    }
    Some(found.end())
}
