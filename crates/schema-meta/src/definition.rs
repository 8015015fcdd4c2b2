//! Metadata type definitions.
//!
//! A [`MetaType<T>`] names one kind of metadata. Its id keys the entry in a
//! node's store, and its type parameter is how every store operation recovers
//! the value type at the call site. Items are built from the definition, never
//! by hand:
//!
//! ```rust
//! use schema_meta::MetaType;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct PrimaryKey {
//!     alias: Option<String>,
//! }
//!
//! let primary_key = MetaType::<PrimaryKey>::new("primaryKey").unwrap();
//! let item = primary_key.item(PrimaryKey { alias: Some("id".into()) });
//! assert_eq!(item.definition().id(), "primaryKey");
//!
//! // Object-shaped values may be built from their default.
//! let bare = primary_key.default_item();
//! assert_eq!(bare.value(), &PrimaryKey::default());
//! ```

use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::error::{MetaError, Result};
use crate::item::MetaItem;
use crate::types::Schema;

/// Bound for values that can be stored as metadata.
pub trait MetaValue: Any + fmt::Debug + PartialEq + Send + Sync {}

impl<T> MetaValue for T where T: Any + fmt::Debug + PartialEq + Send + Sync {}

/// Signature of a metadata check.
///
/// Receives the node the item is attached to and the item's value.
pub type CheckFn<T> = dyn Fn(&Schema, &T) -> CheckResult + Send + Sync;

/// Outcome of a metadata check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Success,
    Failure { message: String },
}

impl CheckResult {
    /// Create a failed result with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        CheckResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckResult::Success)
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            CheckResult::Success => None,
            CheckResult::Failure { message } => Some(message),
        }
    }
}

/// Options for [`create_meta_type`].
pub struct MetaTypeOptions<T> {
    /// Identity of the metadata type. Must not be empty.
    pub id: String,
    /// Optional check run by [`check_meta`](crate::check_meta).
    pub check: Option<Arc<CheckFn<T>>>,
}

impl<T> MetaTypeOptions<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            check: None,
        }
    }

    /// Set the check for this metadata type.
    #[must_use]
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Schema, &T) -> CheckResult + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(check));
        self
    }
}

/// Definition of one kind of metadata.
///
/// Cheap to clone; clones share the id and check. Two definitions are equal
/// when their ids are equal, which is also how stores key their entries.
pub struct MetaType<T> {
    id: Arc<str>,
    check: Option<Arc<CheckFn<T>>>,
    _value: PhantomData<fn() -> T>,
}

/// Create a metadata type from options.
///
/// Uniqueness of the id is not checked: a second type with the same id
/// addresses the same store entries as the first.
///
/// # Errors
///
/// Returns [`MetaError::EmptyMetaTypeId`] if the id is empty.
pub fn create_meta_type<T>(options: MetaTypeOptions<T>) -> Result<MetaType<T>> {
    if options.id.is_empty() {
        return Err(MetaError::EmptyMetaTypeId);
    }
    Ok(MetaType {
        id: Arc::from(options.id),
        check: options.check,
        _value: PhantomData,
    })
}

impl<T> MetaType<T> {
    /// Create a metadata type without a check.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::EmptyMetaTypeId`] if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        create_meta_type(MetaTypeOptions::new(id))
    }

    /// Create a metadata type with a check.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::EmptyMetaTypeId`] if `id` is empty.
    pub fn with_check<F>(id: impl Into<String>, check: F) -> Result<Self>
    where
        F: Fn(&Schema, &T) -> CheckResult + Send + Sync + 'static,
    {
        create_meta_type(MetaTypeOptions::new(id).check(check))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_check(&self) -> bool {
        self.check.is_some()
    }

    /// Run this type's check against a value.
    ///
    /// Types without a check accept every value.
    pub fn check(&self, schema: &Schema, value: &T) -> CheckResult {
        match &self.check {
            Some(check) => check(schema, value),
            None => CheckResult::Success,
        }
    }

    /// Build an item carrying `value`.
    pub fn item(&self, value: T) -> MetaItem<T> {
        MetaItem::new(self.clone(), value)
    }

    /// Build an item carrying the default value.
    ///
    /// For marker metadata (`T = ()`) this is the only constructor needed.
    pub fn default_item(&self) -> MetaItem<T>
    where
        T: Default,
    {
        self.item(T::default())
    }
}

impl<T> Clone for MetaType<T> {
    fn clone(&self) -> Self {
        Self {
            id: Arc::clone(&self.id),
            check: self.check.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for MetaType<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for MetaType<T> {}

impl<T> fmt::Debug for MetaType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaType")
            .field("id", &self.id)
            .field("has_check", &self.check.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_rejected() {
        let err = MetaType::<()>::new("").unwrap_err();
        assert_eq!(err, MetaError::EmptyMetaTypeId);
    }

    #[test]
    fn test_create_from_options() {
        let ty = create_meta_type(MetaTypeOptions::<u32>::new("maxLength")).unwrap();
        assert_eq!(ty.id(), "maxLength");
        assert!(!ty.has_check());
    }

    #[test]
    fn test_check_defaults_to_success() {
        let ty = MetaType::<u32>::new("maxLength").unwrap();
        assert_eq!(ty.check(&Schema::string(), &3), CheckResult::Success);
    }

    #[test]
    fn test_check_runs_with_value() {
        let ty = MetaType::<u32>::with_check("maxLength", |_, value| {
            if *value == 0 {
                CheckResult::failure("max length must be positive")
            } else {
                CheckResult::Success
            }
        })
        .unwrap();

        assert!(ty.has_check());
        assert!(ty.check(&Schema::string(), &8).is_success());
        let result = ty.check(&Schema::string(), &0);
        assert_eq!(result.message(), Some("max length must be positive"));
    }

    #[test]
    fn test_equality_by_id() {
        let a = MetaType::<u32>::new("size").unwrap();
        let b = MetaType::<u32>::with_check("size", |_, _| CheckResult::Success).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, MetaType::<u32>::new("other").unwrap());
    }

    #[test]
    fn test_marker_item() {
        let hidden = MetaType::<()>::new("hidden").unwrap();
        let item = hidden.default_item();
        assert_eq!(item.value(), &());
        assert_eq!(item.definition(), &hidden);
    }
}
