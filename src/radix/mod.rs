mod error;
mod insert;
mod node;
mod recovery;
mod traversal;
mod tree;

pub use error::{RadixError, RadixResult};
pub use tree::Tree;
