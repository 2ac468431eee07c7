mod clean;
mod error;

pub use clean::clean_path;
pub use error::{PathError, PathResult};

/// Registration paths and group prefixes must be rooted.
pub(crate) fn validate_path(path: &str) -> PathResult<()> {
    if !path.starts_with('/') {
        return Err(PathError::MustStartWithSlash {
            path: path.to_string(),
        });
    }
    Ok(())
}
