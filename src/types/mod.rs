//! Primitive type system shared by the parser, document and validator.

mod access;
mod primitive;

pub use access::Primitive;
pub use primitive::Type;

/// Integer role tag of a custom structure or property.
///
/// Identifiers are chosen by the format description layer (for example
/// "this structure is a Mesh") and mapped from keywords by a
/// [`Vocabulary`](crate::parser::Vocabulary).
pub type Identifier = u32;
