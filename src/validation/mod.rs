//! Schema validation for parsed documents.
//!
//! Checks a [`Document`] against a caller-supplied [`Schema`]: which
//! structures may appear at the root, and for each custom structure which
//! properties, custom children and primitive children it may have.
//!
//! The walk is pre-order and stops at the first violation, reported as a
//! [`DdlError::Schema`](crate::DdlError::Schema) pointing at the offending
//! structure. A custom structure without a rule in the schema is checked
//! against an empty rule, so it may have no properties and no children.

mod checks;
mod schema;

pub use schema::{ChildRule, PrimitiveRule, PropertyRule, Requirement, Schema, StructureRule};

use crate::document::{Document, Structure};
use crate::error::Result;

/// Validate `document` against `schema`.
pub fn validate(document: &Document, schema: &Schema) -> Result<()> {
    log::debug!(
        "validating {} structures against {} structure rules",
        document.structure_count(),
        schema.structures.len()
    );

    checks::check_roots(document, schema)?;
    for root in document.children() {
        validate_structure(root, schema)?;
    }

    log::debug!("document is valid");
    Ok(())
}

fn validate_structure(structure: Structure<'_>, schema: &Schema) -> Result<()> {
    let empty = StructureRule::default();
    let rule = schema.rule_for(structure.identifier()).unwrap_or(&empty);
    log::trace!(
        "checking {} at {}",
        structure.keyword(),
        structure.location()
    );

    checks::check_properties(structure, rule)?;
    checks::check_children(structure, rule)?;
    checks::check_primitives(structure, rule)?;

    for child in structure.children().filter(|c| c.is_custom()) {
        validate_structure(child, schema)?;
    }
    Ok(())
}
