use core::fmt;

use crate::definition::CheckResult;
use crate::error::Result;
use crate::fields::type_fields;
use crate::store::get_meta_store;
use crate::types::Schema;

// =============================================================================
// Check Failures
// =============================================================================

/// A metadata item whose check rejected its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Id of the item's definition.
    pub id: String,
    /// Name of the field the item is attached to, or `None` for the root node.
    pub field: Option<String>,
    /// Message returned by the check.
    pub message: String,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "field '{field}': ")?;
        }
        write!(f, "meta '{}': {}", self.id, self.message)
    }
}

// =============================================================================
// Public Check Functions
// =============================================================================

/// Run the checks of all metadata on `schema` and on its immediate fields.
///
/// Items on the node itself are checked first, then each field in walk order.
/// Stops at the first failure.
///
/// # Errors
///
/// Returns [`MetaError::CheckFailed`](crate::MetaError::CheckFailed) with the
/// first failure.
pub fn check_meta(schema: &Schema) -> Result<()> {
    match failures(schema).next() {
        Some(failure) => Err(failure.into()),
        None => Ok(()),
    }
}

/// Run the checks of all metadata on `schema` and on its immediate fields,
/// collecting every failure.
pub fn check_meta_collect_all(schema: &Schema) -> Vec<CheckFailure> {
    failures(schema).collect()
}

// =============================================================================
// Internal Check Implementation
// =============================================================================

fn failures(schema: &Schema) -> impl Iterator<Item = CheckFailure> + '_ {
    let fields = type_fields(schema)
        .into_iter()
        .flat_map(|field| node_failures(field.schema, Some(field.key)));
    node_failures(schema, None).chain(fields)
}

fn node_failures<'a>(
    schema: &'a Schema,
    field: Option<&'a str>,
) -> impl Iterator<Item = CheckFailure> + 'a {
    get_meta_store(schema)
        .into_iter()
        .flat_map(|store| store.iter())
        .filter_map(move |item| match item.check(schema) {
            CheckResult::Success => None,
            CheckResult::Failure { message } => Some(CheckFailure {
                id: item.id().to_string(),
                field: field.map(str::to_string),
                message,
            }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_root() {
        let failure = CheckFailure {
            id: "maxLength".into(),
            field: None,
            message: "must be positive".into(),
        };
        assert_eq!(failure.to_string(), "meta 'maxLength': must be positive");
    }

    #[test]
    fn test_no_metadata_passes() {
        assert!(check_meta(&Schema::string()).is_ok());
        assert!(check_meta_collect_all(&Schema::object([])).is_empty());
    }
}
