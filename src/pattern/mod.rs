mod error;
mod optional;
mod wildpath;

pub use error::{PatternError, PatternResult};
pub use optional::expand_optional_paths;
pub use wildpath::{WildKind, find_wild_path, segment_end_index};
