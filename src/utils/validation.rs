//! Centralized validation helpers.

/// Maximum length of an output artifact prefix
pub const MAX_PREFIX_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Prefix too long: exceeds {MAX_PREFIX_LENGTH} characters")]
    PrefixTooLong,
    #[error("Invalid prefix: contains path separators or invalid characters")]
    InvalidPrefix,
}

/// Validate an output artifact prefix.
///
/// Artifacts are written as `<prefix><name>` inside the output directory, so
/// the prefix must not escape it. An empty prefix is allowed.
///
/// # Examples
///
/// ```
/// use consensus_reporter::utils::validation::validate_prefix;
///
/// assert!(validate_prefix("vkgl_").is_ok());
/// assert!(validate_prefix("../etc/").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::PrefixTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidPrefix` if it contains path traversal, path
/// separators or control characters.
pub fn validate_prefix(prefix: &str) -> Result<&str, ValidationError> {
    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(ValidationError::PrefixTooLong);
    }

    // Prevent directory traversal
    if prefix.contains("..") || prefix.contains('/') || prefix.contains('\\') {
        return Err(ValidationError::InvalidPrefix);
    }

    if prefix.chars().any(char::is_control) {
        return Err(ValidationError::InvalidPrefix);
    }

    Ok(prefix)
}
