#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MetaError, Result};
use crate::store::MetaStore;

/// A node in a schema type tree.
///
/// Besides its documentation and kind, every node owns a metadata slot that
/// holds a [`MetaStore`] once metadata has been attached. The slot is separate
/// from `doc`, so attaching metadata never disturbs the human-readable
/// description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schema {
    /// Human-readable description of the node.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub doc: Option<String>,
    /// The kind of type this node represents.
    pub kind: TypeKind,
    /// Metadata slot. Never serialized.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) meta: Option<MetaStore>,
}

/// All node kinds a schema tree can contain.
///
/// Child positions hold full [`Schema`] nodes rather than bare kinds so that
/// every child can carry its own metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    // Primitives
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Char,
    String,

    // Unit type
    Unit,

    // Compound types
    Option(Box<Schema>),
    List(Box<Schema>),
    Map {
        key: Box<Schema>,
        value: Box<Schema>,
    },
    Tuple(Vec<Schema>),

    /// Object type with an ordered set of named fields.
    Struct {
        fields: Vec<Field>,
    },

    /// A value satisfying both operands. Two struct operands present as one
    /// merged field list.
    Intersection {
        left: Box<Schema>,
        right: Box<Schema>,
    },

    /// Reference to another schema by fully-qualified type path.
    ///
    /// A reference is not a definition of its own and therefore has no
    /// metadata slot.
    TypeRef(String),
}

/// A named field of a struct node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name.
    pub name: String,
    /// The field's own schema node.
    pub schema: Schema,
    /// Whether this field may be omitted.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "std::ops::Not::not")
    )]
    pub optional: bool,
}

impl Schema {
    /// Create a new schema with the given kind.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            doc: None,
            kind,
            meta: None,
        }
    }

    /// Create a new schema with documentation.
    pub fn with_doc(doc: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            doc: Some(doc.into()),
            kind,
            meta: None,
        }
    }

    /// Create a struct node from its fields, keeping their order.
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::new(TypeKind::Struct {
            fields: fields.into_iter().collect(),
        })
    }

    /// Create an intersection of two nodes.
    pub fn intersection(left: Schema, right: Schema) -> Self {
        Self::new(TypeKind::Intersection {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Create a reference to a schema defined elsewhere.
    pub fn type_ref(type_path: impl Into<String>) -> Self {
        Self::new(TypeKind::TypeRef(type_path.into()))
    }

    /// Create an optional node wrapping `inner`.
    pub fn optional(inner: Schema) -> Self {
        Self::new(TypeKind::Option(Box::new(inner)))
    }

    /// Create a list node with the given element node.
    pub fn list(element: Schema) -> Self {
        Self::new(TypeKind::List(Box::new(element)))
    }

    /// Create a string node.
    pub fn string() -> Self {
        Self::new(TypeKind::String)
    }

    /// Create a boolean node.
    pub fn boolean() -> Self {
        Self::new(TypeKind::Bool)
    }

    /// Add documentation to this node.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach a metadata bundle built with [`meta`](crate::meta).
    ///
    /// Replaces any store already attached to the node.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::InvalidSchemaNode`] if the node has no metadata slot.
    pub fn describe(mut self, store: MetaStore) -> Result<Self> {
        if !self.has_meta_slot() {
            return Err(MetaError::invalid_schema_node(&self.kind));
        }
        self.meta = Some(store);
        Ok(self)
    }

    /// Whether metadata can be attached to this node.
    pub fn has_meta_slot(&self) -> bool {
        !matches!(self.kind, TypeKind::TypeRef(_))
    }
}

impl TypeKind {
    /// Short name of the kind, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Bool => "Bool",
            TypeKind::I8 => "I8",
            TypeKind::I16 => "I16",
            TypeKind::I32 => "I32",
            TypeKind::I64 => "I64",
            TypeKind::I128 => "I128",
            TypeKind::U8 => "U8",
            TypeKind::U16 => "U16",
            TypeKind::U32 => "U32",
            TypeKind::U64 => "U64",
            TypeKind::U128 => "U128",
            TypeKind::F32 => "F32",
            TypeKind::F64 => "F64",
            TypeKind::Char => "Char",
            TypeKind::String => "String",
            TypeKind::Unit => "Unit",
            TypeKind::Option(_) => "Option",
            TypeKind::List(_) => "List",
            TypeKind::Map { .. } => "Map",
            TypeKind::Tuple(_) => "Tuple",
            TypeKind::Struct { .. } => "Struct",
            TypeKind::Intersection { .. } => "Intersection",
            TypeKind::TypeRef(_) => "TypeRef",
        }
    }
}

impl Field {
    /// Create a new required field.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            optional: false,
        }
    }

    /// Create a new optional field.
    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            optional: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_new_has_no_store() {
        let schema = Schema::new(TypeKind::Bool);
        assert_eq!(schema.doc, None);
        assert!(schema.meta.is_none());
    }

    #[test]
    fn test_describe_keeps_doc() {
        let schema = Schema::string()
            .doc("user name")
            .describe(MetaStore::new())
            .unwrap();
        assert_eq!(schema.doc.as_deref(), Some("user name"));
        assert!(schema.meta.is_some());
    }

    #[test]
    fn test_describe_type_ref_rejected() {
        let err = Schema::type_ref("my::Type")
            .describe(MetaStore::new())
            .unwrap_err();
        assert!(matches!(err, MetaError::InvalidSchemaNode { kind: "TypeRef" }));
    }

    #[test]
    fn test_has_meta_slot() {
        assert!(Schema::string().has_meta_slot());
        assert!(Schema::object([]).has_meta_slot());
        assert!(!Schema::type_ref("a::B").has_meta_slot());
    }
}
