//! One-level field walk over object and intersection nodes.

use tracing::trace;

use crate::types::{Schema, TypeKind};

/// A named child of an object node, borrowed from the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRef<'a> {
    pub key: &'a str,
    pub schema: &'a Schema,
}

/// The immediate fields of `schema`.
///
/// Struct nodes yield their fields in declaration order. Intersection nodes
/// yield the left operand's fields followed by the right operand's, flattening
/// nested intersections the same way. Every other kind yields nothing. Field
/// nodes are never descended into.
pub fn type_fields(schema: &Schema) -> Vec<FieldRef<'_>> {
    let mut fields = Vec::new();
    collect_fields(schema, &mut fields);
    trace!(
        kind = schema.kind.name(),
        count = fields.len(),
        "walked schema fields"
    );
    fields
}

fn collect_fields<'a>(schema: &'a Schema, out: &mut Vec<FieldRef<'a>>) {
    match &schema.kind {
        TypeKind::Struct { fields } => out.extend(fields.iter().map(|field| FieldRef {
            key: &field.name,
            schema: &field.schema,
        })),
        TypeKind::Intersection { left, right } => {
            collect_fields(left, out);
            collect_fields(right, out);
        }
        _ => {}
    }
}

fn find_field_mut<'a>(schema: &'a mut Schema, key: &str) -> Option<&'a mut Schema> {
    match &mut schema.kind {
        TypeKind::Struct { fields } => fields
            .iter_mut()
            .find(|field| field.name == key)
            .map(|field| &mut field.schema),
        TypeKind::Intersection { left, right } => {
            if let Some(found) = find_field_mut(left, key) {
                return Some(found);
            }
            find_field_mut(right, key)
        }
        _ => None,
    }
}

impl Schema {
    /// The first walked field named `key`.
    pub fn field(&self, key: &str) -> Option<&Schema> {
        type_fields(self)
            .into_iter()
            .find(|field| field.key == key)
            .map(|field| field.schema)
    }

    /// Mutable access to the first walked field named `key`.
    pub fn field_mut(&mut self, key: &str) -> Option<&mut Schema> {
        find_field_mut(self, key)
    }
}
