use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("wild segments must be named with a non-empty name in path '{path}'")]
    EmptyParamName { path: String },
    #[error("the character '{{' is not allowed in a parameter name in path '{path}'")]
    BraceInParamName { path: String },
    #[error("wild segments must be separated by at least one character in path '{path}'")]
    UnseparatedWildSegments { path: String },
    #[error("invalid regex constraint '{pattern}' in path '{path}': {error}")]
    InvalidConstraint {
        path: String,
        pattern: String,
        error: String,
    },
    #[error("only one optional segment is supported in path '{path}'")]
    MultipleOptionalSegments { path: String },
    #[error("an optional segment must be the whole final segment in path '{path}'")]
    OptionalNotTerminal { path: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
