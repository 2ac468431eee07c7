use regex::Regex;
use smallvec::SmallVec;

use super::{RadixError, RadixResult};

/// Node kinds in match-priority order. `reorder` sorts children by kind, so
/// the discriminant order here decides that Static is tried before Param.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeKind {
    Root,
    Static,
    Param,
    Wildcard,
}

/// Catch-all edge hanging off a node. Matches the whole remaining path,
/// including slashes, and never has children of its own.
#[derive(Debug)]
pub struct WildcardEdge<T> {
    pub(crate) spec: Box<str>,
    pub(crate) key: Box<str>,
    pub(crate) value: T,
}

impl<T> WildcardEdge<T> {
    pub(crate) fn conflict(&self, path: &str, full_path: &str) -> RadixError {
        let prefix = match full_path.rfind(path) {
            Some(at) => format!("{}{}", &full_path[..at], self.spec),
            None => self.spec.to_string(),
        };

        RadixError::WildcardConflict {
            segment: path.to_string(),
            path: full_path.to_string(),
            existing: self.spec.to_string(),
            prefix,
        }
    }
}

/// A vertex of the compressed prefix tree.
///
/// `path` holds the literal fragment this node consumes, or the spec text
/// (`{id:[0-9]+}`) for Param nodes. A node flagged `tsr` exists only to
/// recommend a trailing-slash redirect. Param capture names and the compiled
/// segment matcher live on the node itself so a compound segment like
/// `{y}-{m}-{d}` stays a single vertex.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) kind: NodeKind,
    pub(crate) path: Box<str>,
    pub(crate) tsr: bool,
    pub(crate) value: Option<T>,
    pub(crate) children: Vec<Node<T>>,
    pub(crate) wildcard: Option<Box<WildcardEdge<T>>>,
    pub(crate) param_names: SmallVec<[Box<str>; 2]>,
    pub(crate) param_regex: Option<Regex>,
}

impl<T> Node<T> {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            kind: NodeKind::Static,
            path: path.into(),
            tsr: false,
            value: None,
            children: Vec::new(),
            wildcard: None,
            param_names: SmallVec::new(),
            param_regex: None,
        }
    }

    /// Splits this node at byte offset `at`: the node keeps the shared prefix
    /// and its param identity, while value, children, wildcard and TSR flag
    /// move onto a demoted Static child owning the suffix.
    pub(crate) fn split(&mut self, at: usize) {
        let suffix: Box<str> = self.path[at..].into();
        let prefix: Box<str> = self.path[..at].into();

        let demoted = Node {
            kind: NodeKind::Static,
            path: suffix,
            tsr: self.tsr,
            value: self.value.take(),
            children: std::mem::take(&mut self.children),
            wildcard: self.wildcard.take(),
            param_names: SmallVec::new(),
            param_regex: None,
        };

        self.path = prefix;
        self.tsr = false;
        self.children.push(demoted);
    }

    /// Marks this node as a route terminus and wires up its trailing-slash
    /// sibling so the slash variant redirects instead of missing. A node that
    /// already carries a value or is itself a TSR marker rejects the new
    /// value, except that mutable mode replaces in place at non-TSR nodes.
    pub(crate) fn set_value(
        &mut self,
        value: T,
        full_path: &str,
        mutable: bool,
    ) -> RadixResult<()> {
        if self.value.is_some() || self.tsr {
            if mutable && !self.tsr {
                self.value = Some(value);
                return Ok(());
            }
            return Err(RadixError::HandlerAlreadyRegistered {
                path: full_path.to_string(),
            });
        }

        self.value = Some(value);

        let mut found_tsr = false;
        for child in self.children.iter_mut() {
            if &*child.path == "/" {
                child.tsr = true;
                found_tsr = true;
                break;
            }
        }

        if &*self.path != "/" && !found_tsr {
            if self.path.ends_with('/') {
                self.split(self.path.len() - 1);
                self.tsr = true;
            } else {
                let mut slash = Node::new("/");
                slash.tsr = true;
                self.children.push(slash);
            }
        }

        Ok(())
    }

    /// Appends a finished child, attaching the trailing-slash marker its
    /// shape requires.
    pub(crate) fn attach_with_tsr(&mut self, mut child: Node<T>) {
        if &*child.path == "/" {
            self.tsr = true;
        } else if child.path.ends_with('/') {
            child.split(child.path.len() - 1);
            child.tsr = true;
        } else {
            let mut slash = Node::new("/");
            slash.tsr = true;
            child.children.push(slash);
        }

        self.children.push(child);
    }

    pub(crate) fn wild_path_conflict(&self, path: &str, full_path: &str) -> RadixError {
        let segment = path.split_once('/').map_or(path, |(seg, _)| seg).to_string();
        let prefix = match full_path.rfind(path) {
            Some(at) => format!("{}{}", &full_path[..at], self.path),
            None => self.path.to_string(),
        };

        RadixError::WildPathConflict {
            segment,
            path: full_path.to_string(),
            existing: self.path.to_string(),
            prefix,
        }
    }

    /// Re-sorts the whole subtree: Static before Param, and within a kind the
    /// larger subtree first. The sort is stable so equal siblings keep their
    /// registration order.
    pub(crate) fn reorder(&mut self) {
        for child in self.children.iter_mut() {
            child.reorder();
        }

        self.children.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| b.children.len().cmp(&a.children.len()))
        });
    }
}

/// Byte length of the longest common prefix, never splitting inside a
/// multi-byte character.
pub(super) fn longest_common_prefix(a: &str, b: &str) -> usize {
    let mut end = 0;
    let mut chars_a = a.char_indices();
    let mut chars_b = b.chars();

    loop {
        match (chars_a.next(), chars_b.next()) {
            (Some((at, ca)), Some(cb)) if ca == cb => end = at + ca.len_utf8(),
            _ => return end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix_stops_at_character_boundary() {
        assert_eq!(longest_common_prefix("/static", "/stable"), 4);
        assert_eq!(longest_common_prefix("/café/a", "/café/b"), 7);
        assert_eq!(longest_common_prefix("/a", "/a"), 2);
        assert_eq!(longest_common_prefix("/a", "x"), 0);
    }

    #[test]
    fn split_demotes_state_onto_suffix_child() {
        let mut node: Node<u32> = Node::new("/users");
        node.value = Some(7);
        node.tsr = true;

        node.split(1);

        assert_eq!(&*node.path, "/");
        assert!(node.value.is_none());
        assert!(!node.tsr);
        assert_eq!(node.children.len(), 1);
        assert_eq!(&*node.children[0].path, "users");
        assert_eq!(node.children[0].value, Some(7));
        assert!(node.children[0].tsr);
        assert_eq!(node.children[0].kind, NodeKind::Static);
    }

    #[test]
    fn set_value_attaches_trailing_slash_marker() {
        let mut node: Node<u32> = Node::new("/ping");
        node.set_value(1, "/ping", false).unwrap();

        assert_eq!(node.children.len(), 1);
        assert_eq!(&*node.children[0].path, "/");
        assert!(node.children[0].tsr);
    }

    #[test]
    fn set_value_rejects_second_value_unless_mutable() {
        let mut node: Node<u32> = Node::new("/ping");
        node.set_value(1, "/ping", false).unwrap();

        match node.set_value(2, "/ping", false) {
            Err(RadixError::HandlerAlreadyRegistered { path }) => assert_eq!(path, "/ping"),
            other => panic!("expected registration error, got {other:?}"),
        }

        node.set_value(3, "/ping", true).unwrap();
        assert_eq!(node.value, Some(3));
    }
}
