//! # Error Module
//!
//! Error taxonomy for the similarity pipeline. Decode, EXIF, stat, and
//! directory-walk failures are all soft: the affected entry is skipped
//! or treated as "unknown" and never surfaces here. Only invalid
//! arguments surface to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can be returned by the public similarity API.
///
/// Every variant is an invalid-argument error; all other failure kinds
/// (decode, EXIF, stat, walk) are absorbed internally as `Option` and
/// never constructed here.
#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("invalid threshold: {value} (must not exceed the hash bit length)")]
    InvalidThreshold { value: u32 },

    #[error("invalid level: {level} (must be 1, 2, or 3)")]
    InvalidLevel { level: u8 },
}

/// Convenience Result type alias for the crate's public operations.
pub type Result<T> = std::result::Result<T, SimilarityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_directory_includes_path() {
        let error = SimilarityError::NotADirectory {
            path: PathBuf::from("/photos/file.jpg"),
        };
        assert!(error.to_string().contains("/photos/file.jpg"));
    }

    #[test]
    fn invalid_threshold_includes_value() {
        let error = SimilarityError::InvalidThreshold { value: 9000 };
        assert!(error.to_string().contains("9000"));
    }

    #[test]
    fn directory_not_found_includes_path() {
        let error = SimilarityError::DirectoryNotFound {
            path: PathBuf::from("/nope"),
        };
        assert!(error.to_string().contains("/nope"));
    }

    #[test]
    fn invalid_level_includes_value() {
        let error = SimilarityError::InvalidLevel { level: 7 };
        assert!(error.to_string().contains('7'));
    }
}
