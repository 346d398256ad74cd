//! Request DTOs for the page cache API
//!
//! Defines the structure of incoming HTTP query parameters.

use serde::Deserialize;

/// Maximum accepted key length in bytes
pub const MAX_KEY_LENGTH: usize = 2048;

/// Query parameters for a page lookup (GET /page?key=...)
///
/// # Fields
/// - `key`: The page key, usually a URL
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// The page key
    #[serde(default)]
    pub key: String,
}

impl PageQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
