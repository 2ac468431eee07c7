use crate::path::PathError;
use crate::pattern::PatternError;
use crate::radix::RadixError;
use thiserror::Error;

/// Registration-time failures surfaced by [`Router`](crate::Router) and
/// [`Group`](crate::Group).
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("method must not be empty when registering path '{path}'")]
    EmptyMethod { path: String },
    #[error("group prefix must not end with a trailing slash in prefix '{prefix}'")]
    GroupPrefixTrailingSlash { prefix: String },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Radix(#[from] RadixError),
}

pub type RouterResult<T> = Result<T, RouterError>;
