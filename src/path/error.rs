use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("path must begin with '/' in path '{path}'")]
    MustStartWithSlash { path: String },
}

pub type PathResult<T> = Result<T, PathError>;
