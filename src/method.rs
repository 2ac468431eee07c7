//! HTTP method names and their fixed tree slots.

pub const METHOD_GET: &str = "GET";
pub const METHOD_HEAD: &str = "HEAD";
pub const METHOD_POST: &str = "POST";
pub const METHOD_PUT: &str = "PUT";
pub const METHOD_PATCH: &str = "PATCH";
pub const METHOD_DELETE: &str = "DELETE";
pub const METHOD_CONNECT: &str = "CONNECT";
pub const METHOD_OPTIONS: &str = "OPTIONS";
pub const METHOD_TRACE: &str = "TRACE";

/// Matches every method, including custom ones.
pub const METHOD_WILD: &str = "*";

/// Tree slot reserved for [`METHOD_WILD`] registrations.
pub(crate) const WILD_TREE_INDEX: usize = 9;

/// Slots 0..=8 hold the standard verbs, 9 the any-method tree. Custom
/// methods are appended after these.
pub(crate) const RESERVED_TREE_COUNT: usize = 10;

/// Fixed index for the standard verbs so dispatch never touches the
/// custom-method map for them.
#[inline]
pub(crate) fn standard_method_index(method: &str) -> Option<usize> {
    match method {
        METHOD_GET => Some(0),
        METHOD_HEAD => Some(1),
        METHOD_POST => Some(2),
        METHOD_PUT => Some(3),
        METHOD_PATCH => Some(4),
        METHOD_DELETE => Some(5),
        METHOD_CONNECT => Some(6),
        METHOD_OPTIONS => Some(7),
        METHOD_TRACE => Some(8),
        METHOD_WILD => Some(WILD_TREE_INDEX),
        _ => None,
    }
}
