//! Version key validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for a version key
pub const MAX_VERSION_KEY_LENGTH: usize = 32;

/// Plain identifier: alphanumeric start, then alphanumerics, dots, underscores or hyphens
static VERSION_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]*$").unwrap());

/// Version key validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum VersionValidationError {
    /// Version key is empty
    EmptyKey,
    /// Version key exceeds maximum length
    KeyTooLong { length: usize, max: usize },
    /// Version key contains characters that cannot name an artifact
    InvalidKeyFormat { key: String },
}

impl fmt::Display for VersionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "Version key cannot be empty"),
            Self::KeyTooLong { length, max } => {
                write!(f, "Version key too long: {} characters (max {})", length, max)
            }
            Self::InvalidKeyFormat { key } => {
                write!(
                    f,
                    "Invalid version key '{}': must be alphanumeric with dots, underscores or hyphens",
                    key
                )
            }
        }
    }
}

impl std::error::Error for VersionValidationError {}

/// Validate that a version key can be used as an artifact lookup key.
///
/// Keys arrive verbatim from the environment override and from request paths,
/// so anything that could escape the artifact directory is refused here.
pub fn validate_version_key(key: &str) -> Result<(), VersionValidationError> {
    if key.is_empty() {
        return Err(VersionValidationError::EmptyKey);
    }

    if key.len() > MAX_VERSION_KEY_LENGTH {
        return Err(VersionValidationError::KeyTooLong {
            length: key.len(),
            max: MAX_VERSION_KEY_LENGTH,
        });
    }

    if !VERSION_KEY_PATTERN.is_match(key) || key.contains("..") {
        return Err(VersionValidationError::InvalidKeyFormat {
            key: key.to_string(),
        });
    }

    Ok(())
}
