//! Searching the fields of a node for metadata.
//!
//! ```rust
//! use schema_meta::{find_field_meta_item, meta, Field, MetaType, Schema};
//!
//! let primary_key = MetaType::<()>::new("primaryKey").unwrap();
//! let schema = Schema::object([
//!     Field::new("id", Schema::string().describe(meta([primary_key.default_item().into()])).unwrap()),
//!     Field::new("name", Schema::string()),
//! ]);
//!
//! let found = find_field_meta_item(&schema, &primary_key).unwrap();
//! assert_eq!(found.key, "id");
//! ```

use crate::definition::{MetaType, MetaValue};
use crate::fields::{type_fields, FieldRef};
use crate::item::MetaItem;
use crate::store::get_meta_item;
use crate::types::Schema;

/// A field carrying the searched-for metadata.
#[derive(Debug)]
pub struct FieldMeta<'a, T> {
    /// The matching item.
    pub meta: &'a MetaItem<T>,
    /// The field's name.
    pub key: &'a str,
    /// The item's value.
    pub data: &'a T,
    /// The field's node.
    pub schema: &'a Schema,
}

impl<T> Clone for FieldMeta<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldMeta<'_, T> {}

fn field_meta<'a, T: MetaValue>(
    field: FieldRef<'a>,
    definition: &MetaType<T>,
) -> Option<FieldMeta<'a, T>> {
    let meta = get_meta_item(field.schema, definition)?;
    Some(FieldMeta {
        meta,
        key: field.key,
        data: meta.value(),
        schema: field.schema,
    })
}

/// The first field of `schema`, in walk order, carrying metadata for
/// `definition`.
pub fn find_field_meta_item<'a, T: MetaValue>(
    schema: &'a Schema,
    definition: &MetaType<T>,
) -> Option<FieldMeta<'a, T>> {
    type_fields(schema)
        .into_iter()
        .find_map(|field| field_meta(field, definition))
}

/// Every field of `schema`, in walk order, carrying metadata for `definition`.
pub fn find_field_meta_items<'a, T: MetaValue>(
    schema: &'a Schema,
    definition: &MetaType<T>,
) -> Vec<FieldMeta<'a, T>> {
    type_fields(schema)
        .into_iter()
        .filter_map(|field| field_meta(field, definition))
        .collect()
}
