//! Error type for metadata operations.
//!
//! Only store creation, definition creation and the check runner can fail.
//! Every lookup returns `Option`, `Vec` or `bool` instead.

use thiserror::Error;

use crate::check::CheckFailure;
use crate::types::TypeKind;

/// Errors that can occur during metadata operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    /// The node has no metadata slot at all.
    #[error("invalid schema node: {kind} nodes cannot carry metadata")]
    InvalidSchemaNode { kind: &'static str },
    /// A metadata type was defined with an empty id.
    #[error("metadata type id must not be empty")]
    EmptyMetaTypeId,
    /// A metadata check rejected its value.
    #[error("metadata check failed: {0}")]
    CheckFailed(CheckFailure),
}

impl MetaError {
    /// Create an invalid schema node error for the given node kind.
    #[must_use]
    pub fn invalid_schema_node(kind: &TypeKind) -> Self {
        MetaError::InvalidSchemaNode { kind: kind.name() }
    }

    /// Check if this is an invalid schema node error.
    #[must_use]
    pub fn is_invalid_schema_node(&self) -> bool {
        matches!(self, MetaError::InvalidSchemaNode { .. })
    }
}

impl From<CheckFailure> for MetaError {
    fn from(failure: CheckFailure) -> Self {
        MetaError::CheckFailed(failure)
    }
}

/// Result type for metadata operations.
pub type Result<T> = core::result::Result<T, MetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_schema_node_display() {
        let err = MetaError::invalid_schema_node(&TypeKind::TypeRef("a::B".into()));
        assert_eq!(
            err.to_string(),
            "invalid schema node: TypeRef nodes cannot carry metadata"
        );
        assert!(err.is_invalid_schema_node());
    }

    #[test]
    fn test_check_failed_display() {
        let err = MetaError::from(CheckFailure {
            id: "format".into(),
            field: Some("email".into()),
            message: "unknown format".into(),
        });
        assert_eq!(
            err.to_string(),
            "metadata check failed: field 'email': meta 'format': unknown format"
        );
        assert!(!err.is_invalid_schema_node());
    }
}
