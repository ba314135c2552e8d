//! In-memory document model.
//!
//! A [`Document`] owns everything a parse produced, in flat arenas:
//!
//! - structure records, linked into sibling/child lists by index
//! - property records, linked per owning structure
//! - one typed buffer per primitive type holding all data values
//! - a deduplicating string pool
//!
//! [`Structure`] and [`Property`] are `Copy` handles (document reference plus
//! record index) used to walk and read the tree. The document is read-only
//! once parsing completes.
//!
//! # Usage
//!
//! ```ignore
//! use openddl::{Document, Vocabulary};
//!
//! let vocabulary = Vocabulary::new().structure("Name", NAME);
//! let document = Document::parse(r#"Name { string { "foo" } }"#, &vocabulary)?;
//!
//! let name = document.first_child_of(NAME);
//! assert_eq!(name.first_child().as_value::<String>(), "foo");
//! ```

mod data;
mod property;
mod strings;
mod structure;

use std::collections::HashMap;

pub(crate) use data::DataArenas;
pub use data::{Scalar, StrArray, Values};
pub use property::Property;
pub(crate) use strings::StringId;
pub use strings::StringPool;
pub use structure::{Children, Properties, Structure};

use crate::config::ParseOptions;
use crate::error::Result;
use crate::parser::span::Span;
use crate::parser::Vocabulary;
use crate::types::{Identifier, Type};
use crate::validation::Schema;

/// Index of the sentinel records. Also means "none" in every link.
pub(crate) const NONE: usize = 0;

/// Payload of a structure record; a structure is either custom or primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Payload {
    Primitive {
        begin: usize,
        size: usize,
        sub_array_size: usize,
    },
    Custom {
        identifier: Identifier,
        first_child: usize,
        first_property: usize,
        property_count: usize,
    },
}

/// One node of the structure tree.
#[derive(Debug, Clone)]
pub(crate) struct StructureData {
    /// Raw type tag, decoded with `Type::from_tag`
    pub tag: u8,
    pub keyword: StringId,
    /// Name including its `$`/`%` sigil, 0 if unnamed
    pub name: StringId,
    pub payload: Payload,
    pub next: usize,
    /// Source span of the keyword
    pub span: Span,
}

/// One property of a custom structure.
#[derive(Debug, Clone)]
pub(crate) struct PropertyData {
    pub identifier: Identifier,
    pub keyword: StringId,
    pub tag: u8,
    pub begin: usize,
    pub size: usize,
    pub next: usize,
    pub span: Span,
}

/// A parsed OpenDDL document.
#[derive(Debug)]
pub struct Document {
    pub(crate) structures: Vec<StructureData>,
    pub(crate) properties: Vec<PropertyData>,
    pub(crate) data: DataArenas,
    pub(crate) strings: StringPool,
    identifier_names: HashMap<Identifier, StringId>,
    property_names: HashMap<Identifier, StringId>,
}

impl Document {
    /// Parse a complete document with default options.
    pub fn parse(source: &str, vocabulary: &Vocabulary) -> Result<Document> {
        crate::parser::parse_document(source, vocabulary, &ParseOptions::default())
    }

    /// Parse a complete document.
    pub fn parse_with_options(
        source: &str,
        vocabulary: &Vocabulary,
        options: &ParseOptions,
    ) -> Result<Document> {
        crate::parser::parse_document(source, vocabulary, options)
    }

    /// An empty document whose diagnostics use `vocabulary`'s names.
    pub(crate) fn new(vocabulary: &Vocabulary) -> Self {
        let mut strings = StringPool::new();
        let identifier_names = vocabulary
            .structure_names()
            .map(|(id, name)| (id, strings.intern(name)))
            .collect();
        let property_names = vocabulary
            .property_names()
            .map(|(id, name)| (id, strings.intern(name)))
            .collect();

        let root = StructureData {
            tag: Type::Custom.tag(),
            keyword: 0,
            name: 0,
            payload: Payload::Custom {
                identifier: Identifier::MAX,
                first_child: NONE,
                first_property: NONE,
                property_count: 0,
            },
            next: NONE,
            span: Span::default(),
        };
        let no_property = PropertyData {
            identifier: Identifier::MAX,
            keyword: 0,
            tag: Type::Custom.tag(),
            begin: 0,
            size: 0,
            next: NONE,
            span: Span::default(),
        };

        Document {
            structures: vec![root],
            properties: vec![no_property],
            data: DataArenas::default(),
            strings,
            identifier_names,
            property_names,
        }
    }

    fn root(&self) -> Structure<'_> {
        Structure::new(self, NONE)
    }

    /// Whether the document has no root structures.
    pub fn is_empty(&self) -> bool {
        self.root().find_first_child().is_none()
    }

    /// Number of structures in the whole tree.
    pub fn structure_count(&self) -> usize {
        self.structures.len() - 1
    }

    /// First root structure, if any.
    pub fn find_first_child(&self) -> Option<Structure<'_>> {
        self.root().find_first_child()
    }

    /// First root structure.
    ///
    /// The document must not be empty.
    pub fn first_child(&self) -> Structure<'_> {
        self.find_first_child()
            .unwrap_or_else(|| panic!("openddl::Document::first_child(): the document is empty"))
    }

    /// First root custom structure with the given identifier, if any.
    pub fn find_first_child_of(&self, identifier: Identifier) -> Option<Structure<'_>> {
        self.root().find_first_child_of(identifier)
    }

    /// First root custom structure with the given identifier.
    ///
    /// Such a structure must exist.
    pub fn first_child_of(&self, identifier: Identifier) -> Structure<'_> {
        self.find_first_child_of(identifier).unwrap_or_else(|| {
            panic!(
                "openddl::Document::first_child_of(): no root structure {}",
                self.identifier_label(identifier)
            )
        })
    }

    /// Root structures in source order.
    pub fn children(&self) -> Children<'_> {
        self.root().children()
    }

    /// Keyword registered for a custom structure identifier.
    pub fn identifier_name(&self, identifier: Identifier) -> Option<&str> {
        self.identifier_names
            .get(&identifier)
            .map(|&id| self.strings.get(id))
    }

    /// Keyword registered for a property identifier.
    pub fn property_name(&self, identifier: Identifier) -> Option<&str> {
        self.property_names
            .get(&identifier)
            .map(|&id| self.strings.get(id))
    }

    /// Identifier name for messages, falling back to the number.
    pub(crate) fn identifier_label(&self, identifier: Identifier) -> String {
        match self.identifier_name(identifier) {
            Some(name) => name.to_string(),
            None => format!("#{}", identifier),
        }
    }

    pub(crate) fn property_label(&self, identifier: Identifier) -> String {
        match self.property_name(identifier) {
            Some(name) => name.to_string(),
            None => format!("#{}", identifier),
        }
    }

    /// Validate the document against a schema, stopping at the first violation.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        crate::validation::validate(self, schema)
    }

    /// The document's string pool.
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }
}
