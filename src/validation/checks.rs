//! Individual schema checks.
//!
//! Each check returns the first violation it finds as a schema error
//! pointing at the offending structure or property.

use crate::document::{Document, Structure};
use crate::error::{DdlError, Result};
use crate::parser::span::{Location, Span};
use crate::types::Type;

use super::schema::{ChildRule, Requirement, Schema, StructureRule};

/// Check that every root is an allowed custom structure, in allowed numbers.
pub fn check_roots(document: &Document, schema: &Schema) -> Result<()> {
    let mut counts = vec![0usize; schema.roots.len()];

    for root in document.children() {
        if !root.is_custom() {
            return Err(DdlError::schema(
                format!(
                    "primitive structure {} is not allowed at the document root",
                    root.keyword()
                ),
                root.span(),
            ));
        }
        match position_of(&schema.roots, root) {
            Some(i) => counts[i] += 1,
            None => {
                return Err(DdlError::schema(
                    format!("unexpected root structure {}", root.keyword()),
                    root.span(),
                )
                .with_help("only structures listed in the schema roots may appear at top level"))
            }
        }
    }

    for (rule, &count) in schema.roots.iter().zip(&counts) {
        let name = document.identifier_label(rule.identifier);
        if count < rule.min {
            return Err(DdlError::schema(
                format!(
                    "missing required root structure {} (expected at least {}, found {})",
                    name, rule.min, count
                ),
                Span::point(Location::start()),
            ));
        }
        if !rule.allows(count) {
            return Err(DdlError::schema(
                format!(
                    "too many root structures {} (expected at most {}, found {})",
                    name, rule.max, count
                ),
                Span::point(Location::start()),
            ));
        }
    }

    Ok(())
}

/// Check the properties of a custom structure.
pub fn check_properties(structure: Structure<'_>, rule: &StructureRule) -> Result<()> {
    let document = structure.document();

    for property in structure.properties() {
        let Some(property_rule) = rule
            .properties
            .iter()
            .find(|r| r.identifier == property.identifier())
        else {
            return Err(DdlError::schema(
                format!(
                    "unexpected property {} in {}",
                    property.keyword(),
                    structure.keyword()
                ),
                property.span(),
            ));
        };

        if !property.is_type_compatible_with(property_rule.ty) {
            return Err(DdlError::schema(
                format!(
                    "property {} of {} must be {}, found {}",
                    property.keyword(),
                    structure.keyword(),
                    property_rule.ty,
                    property.ty()
                ),
                property.span(),
            ));
        }
    }

    for property_rule in &rule.properties {
        if property_rule.requirement == Requirement::Required
            && structure.find_property_of(property_rule.identifier).is_none()
        {
            return Err(DdlError::schema(
                format!(
                    "missing required property {} in {}",
                    document.property_label(property_rule.identifier),
                    structure.keyword()
                ),
                structure.span(),
            ));
        }
    }

    Ok(())
}

/// Check which custom children a structure has, and how many of each.
pub fn check_children(structure: Structure<'_>, rule: &StructureRule) -> Result<()> {
    let document = structure.document();
    let mut counts = vec![0usize; rule.children.len()];

    for child in structure.children().filter(|c| c.is_custom()) {
        match position_of(&rule.children, child) {
            Some(i) => counts[i] += 1,
            None if rule.unrestricted_children => {}
            None => {
                return Err(DdlError::schema(
                    format!(
                        "unexpected child structure {} in {}",
                        child.keyword(),
                        structure.keyword()
                    ),
                    child.span(),
                ))
            }
        }
    }

    for (child_rule, &count) in rule.children.iter().zip(&counts) {
        let name = document.identifier_label(child_rule.identifier);
        if count < child_rule.min {
            return Err(DdlError::schema(
                format!(
                    "missing required child structure {} in {} (expected at least {}, found {})",
                    name,
                    structure.keyword(),
                    child_rule.min,
                    count
                ),
                structure.span(),
            ));
        }
        if !child_rule.allows(count) {
            return Err(DdlError::schema(
                format!(
                    "too many {} structures in {} (expected at most {}, found {})",
                    name,
                    structure.keyword(),
                    child_rule.max,
                    count
                ),
                structure.span(),
            ));
        }
    }

    Ok(())
}

/// Check the primitive children of a structure.
pub fn check_primitives(structure: Structure<'_>, rule: &StructureRule) -> Result<()> {
    let primitives: Vec<_> = structure.children().filter(|c| !c.is_custom()).collect();

    let Some(primitive_rule) = &rule.primitives else {
        return match primitives.first() {
            Some(child) => Err(DdlError::schema(
                format!(
                    "unexpected primitive structure {} in {}",
                    child.keyword(),
                    structure.keyword()
                ),
                child.span(),
            )),
            None => Ok(()),
        };
    };

    for child in &primitives {
        if !primitive_rule.types.contains(&child.ty()) {
            return Err(DdlError::schema(
                format!(
                    "primitive structure in {} must be {}, found {}",
                    structure.keyword(),
                    type_list(&primitive_rule.types),
                    child.ty()
                ),
                child.span(),
            ));
        }
        if child.array_size() < primitive_rule.min_array_size {
            return Err(DdlError::schema(
                format!(
                    "{} in {} has {} values, expected at least {}",
                    child.keyword(),
                    structure.keyword(),
                    child.array_size(),
                    primitive_rule.min_array_size
                ),
                child.span(),
            ));
        }
        let sub_array_size = child.sub_array_size().max(1);
        if sub_array_size < primitive_rule.min_sub_array_size {
            return Err(DdlError::schema(
                format!(
                    "{} in {} has sub-array size {}, expected at least {}",
                    child.keyword(),
                    structure.keyword(),
                    sub_array_size,
                    primitive_rule.min_sub_array_size
                ),
                child.span(),
            ));
        }
    }

    if primitive_rule.count != 0 && primitives.len() != primitive_rule.count {
        return Err(DdlError::schema(
            format!(
                "expected {} primitive structures in {}, found {}",
                primitive_rule.count,
                structure.keyword(),
                primitives.len()
            ),
            structure.span(),
        ));
    }

    Ok(())
}

fn position_of(rules: &[ChildRule], structure: Structure<'_>) -> Option<usize> {
    let identifier = structure.identifier();
    rules.iter().position(|r| r.identifier == identifier)
}

fn type_list(types: &[Type]) -> String {
    let names: Vec<_> = types.iter().map(|t| t.keyword()).collect();
    match names.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        _ => format!("one of {}", names.join(", ")),
    }
}
