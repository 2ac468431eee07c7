use crate::pattern::{WildKind, find_wild_path, segment_end_index};

use super::node::{Node, NodeKind, WildcardEdge, longest_common_prefix};
use super::{RadixError, RadixResult};

impl<T> Node<T> {
    /// Adds `value` at `path` relative to this node, splitting shared
    /// prefixes and descending until the terminus. `full_path` is the
    /// original registration text, kept for error reporting.
    pub(crate) fn add(
        &mut self,
        path: &str,
        full_path: &str,
        value: T,
        mutable: bool,
    ) -> RadixResult<()> {
        if path.is_empty() {
            return self.set_value(value, full_path, mutable);
        }

        for index in 0..self.children.len() {
            let i = longest_common_prefix(path, &self.children[index].path);
            if i == 0 {
                continue;
            }

            match self.children[index].kind {
                NodeKind::Static => {
                    if self.children[index].path.len() > i {
                        self.children[index].split(i);
                    }
                    if path.len() > i {
                        return self.children[index].add(&path[i..], full_path, value, mutable);
                    }
                }
                NodeKind::Param => {
                    match find_wild_path(path, full_path)? {
                        Some(wp) if wp.start == 0 && wp.kind == WildKind::Param => {
                            // One param child per position: a differing spec
                            // here can never coexist with the existing one.
                            if *self.children[index].path != *wp.spec {
                                return Err(
                                    self.children[index].wild_path_conflict(path, full_path)
                                );
                            }
                            if path.len() > i {
                                return self.children[index].add(
                                    &path[i..],
                                    full_path,
                                    value,
                                    mutable,
                                );
                            }
                        }
                        _ => {
                            if path.len() > i {
                                return self.insert(path, full_path, value, mutable);
                            }
                        }
                    }
                }
                _ => {}
            }

            let outcome = self.children[index].set_value(value, full_path, mutable);
            // Only a successful "/" terminus turns this node into a
            // redirect source; a rejected duplicate must not disturb it.
            if outcome.is_ok() && path == "/" {
                self.tsr = true;
            }
            return outcome;
        }

        self.insert(path, full_path, value, mutable)
    }

    /// Creates the node chain for a path no existing child shares a prefix
    /// with: a Static node for any literal prefix, then a Param node or a
    /// wildcard edge, recursing for text following the wild portion.
    pub(crate) fn insert(
        &mut self,
        path: &str,
        full_path: &str,
        value: T,
        mutable: bool,
    ) -> RadixResult<()> {
        let end = segment_end_index(path, true);

        let wp = match find_wild_path(path, full_path)? {
            Some(wp) => wp,
            None => {
                let mut child = Node::new(path);
                child.value = Some(value);
                self.attach_with_tsr(child);
                return Ok(());
            }
        };

        if wp.start > 0 {
            self.children.push(Node::new(&path[..wp.start]));
            let last = self.children.len() - 1;
            return self.children[last].insert(&path[wp.start..], full_path, value, mutable);
        }

        match wp.kind {
            WildKind::Param => {
                let mut child = Node::new(&path[..end]);
                child.kind = NodeKind::Param;
                child.param_names = wp.keys;
                child.param_regex = wp.regex;

                let rest = &path[wp.end..];
                if rest.is_empty() {
                    child.value = Some(value);
                    self.attach_with_tsr(child);
                    return Ok(());
                }

                self.children.push(child);
                let last = self.children.len() - 1;
                self.children[last].insert(rest, full_path, value, mutable)
            }
            WildKind::Wildcard => {
                if path.len() == end && !self.path.ends_with('/') {
                    return Err(RadixError::NoSlashBeforeWildcard {
                        path: full_path.to_string(),
                    });
                }
                if path.len() != end {
                    return Err(RadixError::WildcardNotAtEnd {
                        path: full_path.to_string(),
                    });
                }

                // The wildcard hangs off the slash-terminated node so the
                // slashless variant keeps its redirect marker.
                let host = if &*self.path != "/" && self.path.ends_with('/') {
                    self.split(self.path.len() - 1);
                    self.tsr = true;
                    &mut self.children[0]
                } else {
                    self
                };

                if let Some(existing) = host.wildcard.as_deref_mut() {
                    if &*existing.spec == path {
                        if mutable && !host.tsr {
                            existing.value = value;
                            return Ok(());
                        }
                        return Err(RadixError::WildcardAlreadyRegistered {
                            path: full_path.to_string(),
                        });
                    }
                    return Err(existing.conflict(path, full_path));
                }

                host.wildcard = Some(Box::new(WildcardEdge {
                    spec: wp.spec.into_boxed_str(),
                    key: wp.keys.into_iter().next().unwrap_or_default(),
                    value,
                }));

                Ok(())
            }
        }
    }
}
