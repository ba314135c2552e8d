//! openddl - OpenDDL parser, document model and schema validator
//!
//! A library for reading Open Data Description Language text (the container
//! format of OpenGEX scenes) into a compact, read-only document tree, checking
//! it against a caller-supplied schema, and reading values out through typed
//! accessors.

pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod types;
pub mod validation;
pub mod writer;

pub use config::ParseOptions;
pub use document::{Children, Document, Properties, Property, Scalar, StrArray, StringPool, Structure, Values};
pub use error::{DdlError, ErrorKind, Result};
pub use parser::{parse_document, Location, PropertyKind, Span, StructureKind, Vocabulary};
pub use types::{Identifier, Primitive, Type};
pub use validation::{validate, ChildRule, PrimitiveRule, PropertyRule, Requirement, Schema, StructureRule};
pub use writer::write_document;
