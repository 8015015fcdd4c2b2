//! Per-node metadata stores.
//!
//! A store is an insertion-ordered map from definition id to item. The map is
//! also the store's item list: re-setting an id moves its entry to the end, and
//! removing an id deletes the key, so the two views can never drift apart.
//!
//! Stores live in a node's metadata slot. They are created lazily by
//! [`ensure_meta_store`] (and therefore by [`set_meta_item`]) or up front by
//! attaching a bundle built with [`meta`]:
//!
//! ```rust
//! use schema_meta::{get_meta_item, meta, set_meta_item, MetaType, Schema};
//!
//! let label = MetaType::<String>::new("label").unwrap();
//! let hidden = MetaType::<()>::new("hidden").unwrap();
//!
//! let mut field = Schema::string()
//!     .describe(meta([label.item("Name".into()).into(), hidden.default_item().into()]))
//!     .unwrap();
//!
//! set_meta_item(&mut field, label.item("Full name".into())).unwrap();
//! assert_eq!(get_meta_item(&field, &label).unwrap().value(), "Full name");
//! ```

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::definition::{MetaType, MetaValue};
use crate::error::{MetaError, Result};
use crate::item::{AnyMetaItem, MetaItem};
use crate::types::Schema;

/// The metadata attached to one schema node.
#[derive(Debug, Clone, Default)]
pub struct MetaStore {
    items: IndexMap<String, AnyMetaItem>,
}

impl MetaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the item for `definition`.
    ///
    /// An entry stored under the same id by a definition with a different
    /// value type reads as absent.
    pub fn get<T: MetaValue>(&self, definition: &MetaType<T>) -> Option<&MetaItem<T>> {
        let entry = self.items.get(definition.id())?;
        let item = entry.downcast::<T>();
        if item.is_none() {
            warn!(
                id = definition.id(),
                expected = core::any::type_name::<T>(),
                "metadata entry holds a different value type"
            );
        }
        item
    }

    /// Look up an entry by raw id, whatever its value type.
    pub fn get_any(&self, id: &str) -> Option<&AnyMetaItem> {
        self.items.get(id)
    }

    pub fn contains<T>(&self, definition: &MetaType<T>) -> bool {
        self.items.contains_key(definition.id())
    }

    /// Insert `item`, replacing any entry with the same id.
    ///
    /// Returns `true` if an entry was replaced.
    pub fn insert<T: MetaValue>(&mut self, item: MetaItem<T>) -> bool {
        self.insert_any(item.into()).is_some()
    }

    /// Insert an erased item, replacing any entry with the same id.
    ///
    /// A replaced entry gives up its position; the new item goes last.
    pub fn insert_any(&mut self, item: AnyMetaItem) -> Option<AnyMetaItem> {
        let id = item.id().to_string();
        let previous = self.items.shift_remove(&id);
        if previous.is_some() {
            debug!(id = %id, "replaced metadata item");
        } else {
            debug!(id = %id, "inserted metadata item");
        }
        self.items.insert(id, item);
        previous
    }

    /// Remove the entry for `definition`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove<T>(&mut self, definition: &MetaType<T>) -> bool {
        let removed = self.items.shift_remove(definition.id()).is_some();
        if removed {
            debug!(id = definition.id(), "removed metadata item");
        }
        removed
    }

    /// Ids of all entries, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AnyMetaItem> {
        self.items.values()
    }
}

impl PartialEq for MetaStore {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().eq(other.items.iter())
    }
}

impl FromIterator<AnyMetaItem> for MetaStore {
    fn from_iter<I: IntoIterator<Item = AnyMetaItem>>(iter: I) -> Self {
        let mut store = MetaStore::new();
        for item in iter {
            store.insert_any(item);
        }
        store
    }
}

impl Extend<AnyMetaItem> for MetaStore {
    fn extend<I: IntoIterator<Item = AnyMetaItem>>(&mut self, iter: I) {
        for item in iter {
            self.insert_any(item);
        }
    }
}

/// Bundle items into a store ready to attach with [`Schema::describe`].
///
/// When several items share an id the last one wins, and it takes the
/// position of its own occurrence.
pub fn meta(items: impl IntoIterator<Item = AnyMetaItem>) -> MetaStore {
    items.into_iter().collect()
}

/// The node's store, if metadata was ever attached.
pub fn get_meta_store(schema: &Schema) -> Option<&MetaStore> {
    schema.meta.as_ref()
}

/// The node's store, created and attached first if missing.
///
/// # Errors
///
/// Returns [`MetaError::InvalidSchemaNode`] if the node has no metadata slot.
pub fn ensure_meta_store(schema: &mut Schema) -> Result<&mut MetaStore> {
    if !schema.has_meta_slot() {
        return Err(MetaError::invalid_schema_node(&schema.kind));
    }
    if schema.meta.is_none() {
        debug!(kind = schema.kind.name(), "attached metadata store");
    }
    Ok(schema.meta.get_or_insert_with(MetaStore::new))
}

/// The node's item for `definition`, if present.
pub fn get_meta_item<'a, T: MetaValue>(
    schema: &'a Schema,
    definition: &MetaType<T>,
) -> Option<&'a MetaItem<T>> {
    get_meta_store(schema)?.get(definition)
}

/// Attach `item` to the node, replacing any item with the same id.
///
/// # Errors
///
/// Returns [`MetaError::InvalidSchemaNode`] if the node has no metadata slot.
pub fn set_meta_item<T: MetaValue>(schema: &mut Schema, item: MetaItem<T>) -> Result<()> {
    ensure_meta_store(schema)?.insert(item);
    Ok(())
}

/// Remove the node's item for `definition`.
///
/// Does nothing if the node has no store or no such item. Returns `true` if an
/// item was removed.
pub fn remove_meta_item<T>(schema: &mut Schema, definition: &MetaType<T>) -> bool {
    match schema.meta.as_mut() {
        Some(store) => store.remove(definition),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_and_moves_last() {
        let a = MetaType::<u32>::new("a").unwrap();
        let b = MetaType::<u32>::new("b").unwrap();
        let mut store = MetaStore::new();

        assert!(!store.insert(a.item(1)));
        assert!(!store.insert(b.item(2)));
        assert!(store.insert(a.item(3)));

        assert_eq!(store.len(), 2);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(store.get(&a).map(MetaItem::value), Some(&3));
    }

    #[test]
    fn test_remove_deletes_key() {
        let a = MetaType::<u32>::new("a").unwrap();
        let mut store = meta([a.item(1).into()]);

        assert!(store.remove(&a));
        assert!(!store.remove(&a));
        assert!(store.is_empty());
        assert!(store.get_any("a").is_none());
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let as_number = MetaType::<u32>::new("shared").unwrap();
        let as_text = MetaType::<String>::new("shared").unwrap();
        let store = meta([as_number.item(7).into()]);

        assert!(store.contains(&as_text));
        assert!(store.get(&as_text).is_none());
        assert!(store.get(&as_number).is_some());
    }

    #[test]
    fn test_store_equality_is_ordered() {
        let a = MetaType::<u32>::new("a").unwrap();
        let b = MetaType::<u32>::new("b").unwrap();
        let ab = meta([a.item(1).into(), b.item(2).into()]);
        let ba = meta([b.item(2).into(), a.item(1).into()]);

        assert_eq!(ab, ab.clone());
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_ensure_on_type_ref_fails() {
        let mut schema = Schema::type_ref("my::Type");
        let err = ensure_meta_store(&mut schema).unwrap_err();
        assert!(err.is_invalid_schema_node());
        assert!(get_meta_store(&schema).is_none());
    }

    #[test]
    fn test_ensure_creates_once() {
        let a = MetaType::<u32>::new("a").unwrap();
        let mut schema = Schema::string();

        ensure_meta_store(&mut schema).unwrap().insert(a.item(1));
        let store = ensure_meta_store(&mut schema).unwrap();
        assert_eq!(store.len(), 1);
    }
}
