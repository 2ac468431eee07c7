use thiserror::Error;

use crate::path::PathError;
use crate::pattern::PatternError;

#[derive(Debug, Error)]
pub enum RadixError {
    #[error("a handler is already registered for path '{path}'")]
    HandlerAlreadyRegistered { path: String },
    #[error("a wildcard handler is already registered for path '{path}'")]
    WildcardAlreadyRegistered { path: String },
    #[error(
        "'{segment}' in new path '{path}' conflicts with existing wild path '{existing}' in existing prefix '{prefix}'"
    )]
    WildPathConflict {
        segment: String,
        path: String,
        existing: String,
        prefix: String,
    },
    #[error(
        "'{segment}' in new path '{path}' conflicts with existing wildcard '{existing}' in existing prefix '{prefix}'"
    )]
    WildcardConflict {
        segment: String,
        path: String,
        existing: String,
        prefix: String,
    },
    #[error("no / before wildcard in path '{path}'")]
    NoSlashBeforeWildcard { path: String },
    #[error("wildcard routes are only allowed at the end of the path in path '{path}'")]
    WildcardNotAtEnd { path: String },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type RadixResult<T> = Result<T, RadixError>;
