//! Schema Meta - typed, identity-keyed metadata attached to schema nodes.
//!
//! This crate provides:
//! - A small schema tree ([`Schema`], [`TypeKind`], [`Field`]) whose nodes each
//!   own a metadata slot
//! - Metadata type definitions ([`MetaType`]) that build items and recover the
//!   value type on every lookup
//! - Per-node stores keyed by definition id, created lazily
//! - A one-level field walk over object and intersection nodes, and searches
//!   for metadata on those fields
//! - A check runner for definitions that carry a check
//!
//! # Defining and Attaching Metadata
//!
//! ```rust
//! use schema_meta::{
//!     find_field_meta_items, get_meta_item, meta, remove_meta_item, set_meta_item, Field,
//!     MetaType, Schema,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct PrimaryKey {
//!     alias: Option<String>,
//! }
//!
//! let primary_key = MetaType::<PrimaryKey>::new("primaryKey").unwrap();
//! let indexed = MetaType::<()>::new("indexed").unwrap();
//!
//! let mut schema = Schema::object([
//!     Field::new(
//!         "id",
//!         Schema::string()
//!             .describe(meta([primary_key.item(PrimaryKey { alias: Some("id".into()) }).into()]))
//!             .unwrap(),
//!     ),
//!     Field::new("email", Schema::string()),
//! ]);
//!
//! let email = schema.field_mut("email").unwrap();
//! set_meta_item(email, indexed.default_item()).unwrap();
//!
//! let id = schema.field("id").unwrap();
//! assert_eq!(
//!     get_meta_item(id, &primary_key).unwrap().value().alias.as_deref(),
//!     Some("id")
//! );
//! assert_eq!(find_field_meta_items(&schema, &indexed).len(), 1);
//!
//! remove_meta_item(schema.field_mut("email").unwrap(), &indexed);
//! assert!(find_field_meta_items(&schema, &indexed).is_empty());
//! ```
//!
//! # Checks
//!
//! A definition may carry a check. Stores never run it; [`check_meta`] does:
//!
//! ```rust
//! use schema_meta::{check_meta, meta, CheckResult, MetaType, Schema};
//!
//! let max_length = MetaType::<usize>::with_check("maxLength", |_, len| {
//!     if *len == 0 {
//!         CheckResult::failure("must be positive")
//!     } else {
//!         CheckResult::Success
//!     }
//! })
//! .unwrap();
//!
//! let schema = Schema::string().describe(meta([max_length.item(0).into()])).unwrap();
//! assert!(check_meta(&schema).is_err());
//! ```

pub mod check;
pub mod definition;
pub mod error;
pub mod fields;
pub mod item;
pub mod search;
pub mod store;
pub mod types;

pub use check::{check_meta, check_meta_collect_all, CheckFailure};
pub use definition::{
    create_meta_type, CheckFn, CheckResult, MetaType, MetaTypeOptions, MetaValue,
};
pub use error::{MetaError, Result};
pub use fields::{type_fields, FieldRef};
pub use item::{make_item, AnyMetaItem, DynMetaItem, MetaItem};
pub use search::{find_field_meta_item, find_field_meta_items, FieldMeta};
pub use store::{
    ensure_meta_store, get_meta_item, get_meta_store, meta, remove_meta_item, set_meta_item,
    MetaStore,
};
pub use types::{Field, Schema, TypeKind};
