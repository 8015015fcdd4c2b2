//! Metadata items, typed and erased.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::definition::{CheckResult, MetaType, MetaValue};
use crate::types::Schema;

/// A definition paired with a concrete value.
///
/// Built through [`MetaType::item`] or [`make_item`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetaItem<T> {
    definition: MetaType<T>,
    value: T,
}

/// Build an item for `definition` carrying `value`.
pub fn make_item<T>(definition: &MetaType<T>, value: T) -> MetaItem<T> {
    definition.item(value)
}

impl<T> MetaItem<T> {
    pub(crate) fn new(definition: MetaType<T>, value: T) -> Self {
        Self { definition, value }
    }

    pub fn definition(&self) -> &MetaType<T> {
        &self.definition
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn id(&self) -> &str {
        self.definition.id()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Object-safe view of a [`MetaItem`] with its value type erased.
pub trait DynMetaItem: fmt::Debug + Send + Sync + 'static {
    /// Id of the item's definition.
    fn id(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    /// Run the definition's check against the item's value.
    fn check(&self, schema: &Schema) -> CheckResult;

    /// Compare with another erased item: same value type, id and value.
    fn dyn_eq(&self, other: &dyn DynMetaItem) -> bool;
}

impl<T: MetaValue> DynMetaItem for MetaItem<T> {
    fn id(&self) -> &str {
        self.definition.id()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn check(&self, schema: &Schema) -> CheckResult {
        self.definition.check(schema, &self.value)
    }

    fn dyn_eq(&self, other: &dyn DynMetaItem) -> bool {
        other
            .as_any()
            .downcast_ref::<MetaItem<T>>()
            .is_some_and(|other| self == other)
    }
}

/// A shared, type-erased metadata item.
///
/// This is the form items take inside a [`MetaStore`](crate::MetaStore) and in
/// heterogeneous bundles passed to [`meta`](crate::meta). Convert with
/// `.into()` from any [`MetaItem`].
#[derive(Clone)]
pub struct AnyMetaItem(Arc<dyn DynMetaItem>);

impl AnyMetaItem {
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// Recover the typed item, if it was built from a `MetaType<T>`.
    pub fn downcast<T: MetaValue>(&self) -> Option<&MetaItem<T>> {
        self.0.as_any().downcast_ref::<MetaItem<T>>()
    }

    /// Run the definition's check against the item's value.
    pub fn check(&self, schema: &Schema) -> CheckResult {
        self.0.check(schema)
    }
}

impl<T: MetaValue> From<MetaItem<T>> for AnyMetaItem {
    fn from(item: MetaItem<T>) -> Self {
        AnyMetaItem(Arc::new(item))
    }
}

impl PartialEq for AnyMetaItem {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for AnyMetaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_item() {
        let label = MetaType::<String>::new("label").unwrap();
        let item = make_item(&label, "Name".to_string());
        assert_eq!(item.id(), "label");
        assert_eq!(item.into_value(), "Name");
    }

    #[test]
    fn test_downcast_matching_type() {
        let label = MetaType::<String>::new("label").unwrap();
        let any: AnyMetaItem = label.item("Name".to_string()).into();
        assert_eq!(any.id(), "label");
        assert_eq!(
            any.downcast::<String>().map(MetaItem::value),
            Some(&"Name".to_string())
        );
        assert!(any.downcast::<u32>().is_none());
    }

    #[test]
    fn test_erased_equality() {
        let label = MetaType::<String>::new("label").unwrap();
        let a: AnyMetaItem = label.item("x".to_string()).into();
        let b: AnyMetaItem = label.item("x".to_string()).into();
        let c: AnyMetaItem = label.item("y".to_string()).into();
        let d: AnyMetaItem = MetaType::<u8>::new("label").unwrap().item(1).into();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
