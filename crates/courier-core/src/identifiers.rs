//! Tool name validation rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a tool name
pub const MAX_TOOL_NAME_LENGTH: usize = 64;

/// Error type for tool name validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidToolName {
    /// The name is empty
    #[error("Tool name cannot be empty")]
    Empty,
    /// The name contains characters outside `[A-Za-z0-9_-]`
    #[error("Tool name '{0}' can only contain alphanumeric characters, hyphens and underscores")]
    InvalidCharacters(String),
    /// The name exceeds [`MAX_TOOL_NAME_LENGTH`]
    #[error("Tool name too long ({length} chars, max {max})")]
    TooLong { length: usize, max: usize },
}

/// A validated tool name.
///
/// Tool names double as lookup keys in the registry and as identifiers in
/// discovery metadata, so they are restricted to ASCII alphanumerics,
/// hyphens and underscores.
///
/// # Examples
///
/// ```rust
/// use courier_core::ToolName;
///
/// assert!(ToolName::parse("rest_request").is_ok());
/// assert!(ToolName::parse("get-request").is_ok());
/// assert!(ToolName::parse("").is_err());
/// assert!(ToolName::parse("rest request").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolName(String);

impl ToolName {
    /// Parse and validate a tool name.
    pub fn parse(name: &str) -> Result<Self, InvalidToolName> {
        if name.is_empty() {
            return Err(InvalidToolName::Empty);
        }

        if name.len() > MAX_TOOL_NAME_LENGTH {
            return Err(InvalidToolName::TooLong {
                length: name.len(),
                max: MAX_TOOL_NAME_LENGTH,
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(InvalidToolName::InvalidCharacters(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Create a tool name without validation.
    ///
    /// Only for names known to be valid, such as built-in constants.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ToolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ToolName {
    type Error = InvalidToolName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ToolName> for String {
    fn from(name: ToolName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rest_request")]
    #[case("get-request")]
    #[case("Tool42")]
    fn accepts_valid_names(#[case] name: &str) {
        let parsed = ToolName::parse(name).expect("valid tool name");
        assert_eq!(parsed.as_str(), name);
    }

    #[rstest]
    #[case("", InvalidToolName::Empty)]
    #[case("rest request", InvalidToolName::InvalidCharacters("rest request".into()))]
    #[case("../etc", InvalidToolName::InvalidCharacters("../etc".into()))]
    fn rejects_invalid_names(#[case] name: &str, #[case] expected: InvalidToolName) {
        assert_eq!(ToolName::parse(name), Err(expected));
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "a".repeat(MAX_TOOL_NAME_LENGTH + 1);
        assert!(matches!(
            ToolName::parse(&name),
            Err(InvalidToolName::TooLong { length: 65, max: 64 })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let ok: ToolName = serde_json::from_str("\"post_request\"").unwrap();
        assert_eq!(ok.to_string(), "post_request");
        assert!(serde_json::from_str::<ToolName>("\"bad name\"").is_err());
    }
}
