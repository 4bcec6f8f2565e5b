//! Error types for layout parsing.

use thiserror::Error;

/// Error type for layout parsing operations.
///
/// Both variants display the bare message, so `to_string()` equals the
/// parser's `error_string()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The input is not well-formed XML.
    #[error("{message}")]
    Xml {
        /// Error message.
        message: String,
    },

    /// The input is well-formed but violates the layout schema.
    #[error("{message}")]
    Schema {
        /// Error message.
        message: String,
    },
}

impl LayoutError {
    /// Creates a well-formedness error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }

    /// Creates a schema violation error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Xml { message } | Self::Schema { message } => message,
        }
    }

    /// Returns true if the input was well-formed but not a valid layout.
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        let err = LayoutError::schema("Expected '<section>'.");
        assert_eq!(err.to_string(), "Expected '<section>'.");
        assert!(err.is_schema());

        let err = LayoutError::xml("Premature end of document.");
        assert_eq!(err.message(), "Premature end of document.");
        assert!(!err.is_schema());
    }
}
