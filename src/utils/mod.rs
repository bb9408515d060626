// Utility functions

use std::path::PathBuf;

/// Convert a repository path string to an owned PathBuf.
#[inline]
pub fn to_path_buf(repo_path: &str) -> PathBuf {
    PathBuf::from(repo_path)
}

/// Abbreviate a commit SHA to seven characters for display.
///
/// Strings shorter than that are returned unchanged.
#[inline]
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Extension trait for Result that provides convenient error context methods.
/// Converts any error to a String with a descriptive message prefix.
///
/// # Example
/// ```ignore
/// use crate::utils::ResultExt;
///
/// let text = serde_json::to_string_pretty(&value)
///     .with_context("Failed to serialize result")?;
/// ```
pub trait ResultExt<T> {
    /// Converts the error to a String with context message.
    fn with_context(self, msg: &str) -> Result<T, String>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn with_context(self, msg: &str) -> Result<T, String> {
        self.map_err(|e| format!("{}: {}", msg, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha() {
        assert_eq!(
            short_sha("0123456789abcdef0123456789abcdef01234567"),
            "0123456"
        );
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn test_result_ext_prefixes_message() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ));
        assert_eq!(
            result.with_context("Failed to write").unwrap_err(),
            "Failed to write: disk full"
        );
    }

    #[test]
    fn test_to_path_buf() {
        assert_eq!(to_path_buf("/tmp/repo"), PathBuf::from("/tmp/repo"));
    }
}
