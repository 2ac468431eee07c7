use crate::params::Params;
use crate::path::validate_path;

use super::node::{Node, NodeKind, longest_common_prefix};
use super::RadixResult;

/// One radix tree per HTTP method. Insertion runs single-threaded during
/// registration; `get` and `find_case_insensitive` never mutate and are safe
/// for unbounded concurrent callers once registration is done.
#[derive(Debug)]
pub struct Tree<T> {
    pub(crate) root: Node<T>,
    pub(crate) mutable: bool,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        let mut root = Node::new("");
        root.kind = NodeKind::Root;

        Self {
            root,
            mutable: false,
        }
    }

    /// When enabled, re-registering an exact existing route replaces its
    /// value instead of erroring. Trailing-slash marker nodes never accept
    /// replacement.
    pub fn set_mutable(&mut self, mutable: bool) {
        self.mutable = mutable;
    }

    /// Inserts `value` at `path`, splitting nodes as needed and re-sorting
    /// children afterwards so lookup priority stays deterministic.
    pub fn add(&mut self, path: &str, value: T) -> RadixResult<()> {
        tracing::event!(tracing::Level::TRACE, operation = "tree_add", path = %path);
        validate_path(path)?;

        let full_path = path;
        let mut rest = path;

        let shared = longest_common_prefix(rest, &self.root.path);
        if shared > 0 {
            if self.root.path.len() > shared {
                self.root.split(shared);
            }
            rest = &rest[shared..];
        }

        self.root.add(rest, full_path, value, self.mutable)?;

        // The freshly seeded root carries no text of its own; its single
        // child takes over as the real root.
        if self.root.path.is_empty() && self.root.children.len() == 1 {
            let promoted = self.root.children.swap_remove(0);
            self.root = promoted;
            self.root.kind = NodeKind::Root;
        }

        self.root.reorder();
        Ok(())
    }

    /// Resolves `path` to its registered value.
    ///
    /// `(None, true)` recommends a trailing-slash redirect: the path is
    /// registered only with (or without) a final slash. Captures land in
    /// `params` with keys borrowed from the tree and values from `path`.
    pub fn get<'t, 'p>(
        &'t self,
        path: &'p str,
        params: &mut Params<'t, 'p>,
    ) -> (Option<&'t T>, bool) {
        let root = &self.root;

        if path.len() > root.path.len() {
            if !path.as_bytes().starts_with(root.path.as_bytes()) {
                return (None, false);
            }
            return root.get_from_child(&path[root.path.len()..], params);
        } else if path == &*root.path {
            if root.tsr {
                return (None, true);
            }
            if let Some(value) = root.value.as_ref() {
                return (Some(value), false);
            }
            if let Some(wildcard) = root.wildcard.as_deref() {
                params.push(&wildcard.key, "");
                return (Some(&wildcard.value), false);
            }
        }

        (None, false)
    }

    /// Case-insensitive lookup returning the canonical registered path for a
    /// redirect, plus whether a trailing-slash fix was needed. `None` when
    /// nothing matches, or when only a slash-fixed variant matches and
    /// `fix_trailing_slash` is off.
    pub fn find_case_insensitive(
        &self,
        path: &str,
        fix_trailing_slash: bool,
    ) -> Option<(String, bool)> {
        let mut out = String::with_capacity(path.len() + 1);
        let (found, tsr) = self.root.find_insensitive(path, &mut out);

        if !found || (tsr && !fix_trailing_slash) {
            return None;
        }

        Some((out, tsr))
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}
