//! Structure and property name tables.
//!
//! A [`Vocabulary`] tells the parser what each keyword means: a primitive
//! data type, a custom structure identifier, or a property identifier. It is
//! supplied by the layer that knows the concrete format (OpenGEX, for
//! example); the parser itself hardcodes no custom names.

use std::collections::HashMap;

use crate::types::{Identifier, Type};

/// What a structure keyword denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// A custom structure with the given identifier.
    Custom(Identifier),
    /// A primitive data structure of the given type.
    Primitive(Type),
}

/// A property keyword and, optionally, the type its values are stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyKind {
    pub identifier: Identifier,
    /// Fixed storage type. `None` infers the type from the literal.
    pub ty: Option<Type>,
}

/// Keyword tables consulted while parsing.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    structures: HashMap<String, StructureKind>,
    properties: HashMap<String, PropertyKind>,
    structure_names: HashMap<Identifier, String>,
    property_names: HashMap<Identifier, String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocabulary {
    /// A vocabulary knowing only the OpenDDL primitive type keywords.
    pub fn new() -> Self {
        let mut vocabulary = Self::empty();
        for &ty in Type::primitives() {
            for keyword in ty.keywords() {
                vocabulary
                    .structures
                    .insert((*keyword).to_string(), StructureKind::Primitive(ty));
            }
        }
        vocabulary
    }

    /// A vocabulary with no keywords at all, not even primitive types.
    pub fn empty() -> Self {
        Self {
            structures: HashMap::new(),
            properties: HashMap::new(),
            structure_names: HashMap::new(),
            property_names: HashMap::new(),
        }
    }

    /// Register a custom structure keyword.
    ///
    /// The first keyword registered for an identifier is the one used in
    /// diagnostics.
    pub fn structure(mut self, name: impl Into<String>, identifier: Identifier) -> Self {
        let name = name.into();
        self.structure_names
            .entry(identifier)
            .or_insert_with(|| name.clone());
        self.structures.insert(name, StructureKind::Custom(identifier));
        self
    }

    /// Register an additional keyword for a primitive type.
    pub fn primitive(mut self, name: impl Into<String>, ty: Type) -> Self {
        assert!(
            !ty.is_custom(),
            "openddl::Vocabulary::primitive(): Custom is not a primitive type"
        );
        self.structures.insert(name.into(), StructureKind::Primitive(ty));
        self
    }

    /// Register a property keyword whose type is inferred from its literal.
    pub fn property(self, name: impl Into<String>, identifier: Identifier) -> Self {
        self.insert_property(name.into(), PropertyKind { identifier, ty: None })
    }

    /// Register a property keyword whose values are always stored as `ty`.
    pub fn typed_property(self, name: impl Into<String>, identifier: Identifier, ty: Type) -> Self {
        assert!(
            !ty.is_custom(),
            "openddl::Vocabulary::typed_property(): Custom is not a primitive type"
        );
        self.insert_property(
            name.into(),
            PropertyKind {
                identifier,
                ty: Some(ty),
            },
        )
    }

    fn insert_property(mut self, name: String, kind: PropertyKind) -> Self {
        self.property_names
            .entry(kind.identifier)
            .or_insert_with(|| name.clone());
        self.properties.insert(name, kind);
        self
    }

    /// Look up a structure keyword.
    pub fn lookup_structure(&self, keyword: &str) -> Option<StructureKind> {
        self.structures.get(keyword).copied()
    }

    /// Look up a property keyword.
    pub fn lookup_property(&self, keyword: &str) -> Option<PropertyKind> {
        self.properties.get(keyword).copied()
    }

    /// Look up a keyword that names a primitive type (for `type` literals).
    pub fn lookup_type(&self, keyword: &str) -> Option<Type> {
        match self.lookup_structure(keyword)? {
            StructureKind::Primitive(ty) if !ty.is_custom() => Some(ty),
            _ => None,
        }
    }

    /// Keyword of a custom structure identifier.
    pub fn structure_name(&self, identifier: Identifier) -> Option<&str> {
        self.structure_names.get(&identifier).map(|s| s.as_str())
    }

    /// Keyword of a property identifier.
    pub fn property_name(&self, identifier: Identifier) -> Option<&str> {
        self.property_names.get(&identifier).map(|s| s.as_str())
    }

    /// All custom structure identifiers with their diagnostic names.
    pub fn structure_names(&self) -> impl Iterator<Item = (Identifier, &str)> {
        self.structure_names.iter().map(|(&id, name)| (id, name.as_str()))
    }

    /// All property identifiers with their diagnostic names.
    pub fn property_names(&self) -> impl Iterator<Item = (Identifier, &str)> {
        self.property_names.iter().map(|(&id, name)| (id, name.as_str()))
    }
}
