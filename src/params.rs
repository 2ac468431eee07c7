use smallvec::SmallVec;

/// A single captured route parameter.
///
/// Keys borrow from the route tree, values from the looked-up path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'k, 'v> {
    pub key: &'k str,
    pub value: &'v str,
}

/// Parameters captured during a lookup, in path order.
///
/// The list is only populated for a successful match; branches abandoned
/// while backtracking leave nothing behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'k, 'v> {
    entries: SmallVec<[Param<'k, 'v>; 4]>,
}

impl<'k, 'v> Params<'k, 'v> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first parameter captured under `key`.
    pub fn get(&self, key: &str) -> Option<&'v str> {
        self.entries
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = Param<'k, 'v>> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, key: &'k str, value: &'v str) {
        self.entries.push(Param { key, value });
    }

    /// Rolls back to a checkpoint taken before descending a branch.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a, 'k, 'v> IntoIterator for &'a Params<'k, 'v> {
    type Item = Param<'k, 'v>;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Param<'k, 'v>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
