use std::fmt;
use std::iter::FusedIterator;

use crate::parser::span::{Location, Span};
use crate::types::{Identifier, Primitive, Type};

use super::{Document, Payload, Property, StructureData, Values, NONE};

/// Handle to one structure of a [`Document`].
///
/// Accessors that only make sense for one kind of structure panic when
/// called on the other kind; check [`Structure::is_custom`] or
/// [`Structure::ty`] first.
#[derive(Clone, Copy)]
pub struct Structure<'a> {
    document: &'a Document,
    index: usize,
}

impl<'a> Structure<'a> {
    pub(crate) fn new(document: &'a Document, index: usize) -> Self {
        Self { document, index }
    }

    fn data(&self) -> &'a StructureData {
        &self.document.structures[self.index]
    }

    pub(crate) fn document(&self) -> &'a Document {
        self.document
    }

    pub(crate) fn span(&self) -> Span {
        self.data().span
    }

    /// Storage type; `Type::Custom` for custom structures.
    pub fn ty(&self) -> Type {
        Type::from_tag(self.data().tag)
    }

    pub fn is_custom(&self) -> bool {
        self.ty().is_custom()
    }

    /// Identifier of a custom structure.
    pub fn identifier(&self) -> Identifier {
        match self.data().payload {
            Payload::Custom { identifier, .. } if self.is_custom() => identifier,
            _ => panic!("openddl::Structure::identifier(): not a custom structure"),
        }
    }

    /// Keyword as written in the source.
    pub fn keyword(&self) -> &'a str {
        self.document.strings.get(self.data().keyword)
    }

    /// Name including its `$` or `%` sigil, or `""` if unnamed.
    pub fn name(&self) -> &'a str {
        self.document.strings.get(self.data().name)
    }

    pub fn has_name(&self) -> bool {
        self.data().name != 0
    }

    /// Where the structure's keyword starts in the source.
    pub fn location(&self) -> Location {
        self.data().span.start
    }

    fn primitive(&self, caller: &str) -> (usize, usize, usize) {
        match self.data().payload {
            Payload::Primitive {
                begin,
                size,
                sub_array_size,
            } if !self.is_custom() => (begin, size, sub_array_size),
            _ => panic!("openddl::Structure::{}(): not a primitive structure", caller),
        }
    }

    /// Total number of values in a primitive structure.
    pub fn array_size(&self) -> usize {
        self.primitive("array_size").1
    }

    /// Declared or inferred sub-array length; 0 for flat data.
    pub fn sub_array_size(&self) -> usize {
        self.primitive("sub_array_size").2
    }

    /// All values of a primitive structure.
    pub fn values(&self) -> Values<'a> {
        let (begin, size, _) = self.primitive("values");
        self.document
            .data
            .view(&self.document.strings, self.ty(), begin..begin + size)
    }

    /// The single value of a primitive structure.
    ///
    /// The structure must hold exactly one value, stored as `T`.
    pub fn as_value<T: Primitive>(&self) -> T::Value<'a> {
        let (_, size, _) = self.primitive("as_value");
        assert!(size == 1, "openddl::Structure::as_value(): not a single value");
        assert!(
            T::accepts(self.ty()),
            "openddl::Structure::as_value(): not of given type"
        );
        self.values()
            .get(0)
            .and_then(T::from_scalar)
            .unwrap_or_else(|| panic!("openddl::Structure::as_value(): not of given type"))
    }

    /// All values of a primitive structure stored as `T`.
    pub fn as_array<T: Primitive>(&self) -> T::Array<'a> {
        self.primitive("as_array");
        assert!(
            T::accepts(self.ty()),
            "openddl::Structure::as_array(): not of given type"
        );
        T::array(self.values())
            .unwrap_or_else(|| panic!("openddl::Structure::as_array(): not of given type"))
    }

    fn custom_links(&self) -> Option<(usize, usize, usize)> {
        match self.data().payload {
            Payload::Custom {
                first_child,
                first_property,
                property_count,
                ..
            } => Some((first_child, first_property, property_count)),
            Payload::Primitive { .. } => None,
        }
    }

    /// Next sibling, if any.
    pub fn find_next(&self) -> Option<Structure<'a>> {
        match self.data().next {
            NONE => None,
            next => Some(Structure::new(self.document, next)),
        }
    }

    /// Next custom sibling with the given identifier, if any.
    pub fn find_next_of(&self, identifier: Identifier) -> Option<Structure<'a>> {
        let mut current = self.find_next();
        while let Some(structure) = current {
            if structure.has_identifier(identifier) {
                return Some(structure);
            }
            current = structure.find_next();
        }
        None
    }

    fn has_identifier(&self, identifier: Identifier) -> bool {
        matches!(self.data().payload, Payload::Custom { identifier: id, .. } if id == identifier)
    }

    /// Whether the structure has any properties. Always false for primitives.
    pub fn has_properties(&self) -> bool {
        self.property_count() != 0
    }

    pub fn property_count(&self) -> usize {
        self.custom_links().map_or(0, |(_, _, count)| count)
    }

    /// Property with the given identifier, if present.
    pub fn find_property_of(&self, identifier: Identifier) -> Option<Property<'a>> {
        self.properties().find(|p| p.identifier() == identifier)
    }

    /// Property with the given identifier.
    ///
    /// The property must be present.
    pub fn property_of(&self, identifier: Identifier) -> Property<'a> {
        self.find_property_of(identifier).unwrap_or_else(|| {
            panic!(
                "openddl::Structure::property_of(): no property {} in {}",
                self.document.property_label(identifier),
                self.keyword()
            )
        })
    }

    /// Properties in source order.
    pub fn properties(&self) -> Properties<'a> {
        Properties {
            document: self.document,
            next: self.custom_links().map_or(NONE, |(_, first, _)| first),
        }
    }

    /// Whether the structure has any children. Always false for primitives.
    pub fn has_children(&self) -> bool {
        self.find_first_child().is_some()
    }

    /// First child, if any.
    pub fn find_first_child(&self) -> Option<Structure<'a>> {
        match self.custom_links() {
            Some((first, _, _)) if first != NONE => Some(Structure::new(self.document, first)),
            _ => None,
        }
    }

    /// First child.
    ///
    /// The structure must have children.
    pub fn first_child(&self) -> Structure<'a> {
        self.find_first_child().unwrap_or_else(|| {
            panic!(
                "openddl::Structure::first_child(): {} has no children",
                self.keyword()
            )
        })
    }

    /// First custom child with the given identifier, if any.
    pub fn find_first_child_of(&self, identifier: Identifier) -> Option<Structure<'a>> {
        self.children().find(|c| c.has_identifier(identifier))
    }

    /// First child of the given type, if any.
    pub fn find_first_child_of_type(&self, ty: Type) -> Option<Structure<'a>> {
        self.children().find(|c| c.ty() == ty)
    }

    /// First custom child with the given identifier.
    ///
    /// Such a child must exist.
    pub fn first_child_of(&self, identifier: Identifier) -> Structure<'a> {
        self.find_first_child_of(identifier).unwrap_or_else(|| {
            panic!(
                "openddl::Structure::first_child_of(): no {} child in {}",
                self.document.identifier_label(identifier),
                self.keyword()
            )
        })
    }

    /// First child of the given type.
    ///
    /// Such a child must exist.
    pub fn first_child_of_type(&self, ty: Type) -> Structure<'a> {
        self.find_first_child_of_type(ty).unwrap_or_else(|| {
            panic!(
                "openddl::Structure::first_child_of_type(): no {} child in {}",
                ty,
                self.keyword()
            )
        })
    }

    /// Children in source order.
    pub fn children(&self) -> Children<'a> {
        Children {
            document: self.document,
            next: self.find_first_child().map_or(NONE, |c| c.index),
        }
    }
}

impl PartialEq for Structure<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.index == other.index
    }
}

impl Eq for Structure<'_> {}

impl fmt::Debug for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure")
            .field("index", &self.index)
            .field("keyword", &self.keyword())
            .field("name", &self.name())
            .field("ty", &self.ty())
            .finish()
    }
}

/// Iterator over sibling structures.
#[derive(Clone)]
pub struct Children<'a> {
    document: &'a Document,
    next: usize,
}

impl<'a> Iterator for Children<'a> {
    type Item = Structure<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NONE {
            return None;
        }
        let structure = Structure::new(self.document, self.next);
        self.next = self.document.structures[self.next].next;
        Some(structure)
    }
}

impl FusedIterator for Children<'_> {}

/// Iterator over the properties of one structure.
#[derive(Clone)]
pub struct Properties<'a> {
    document: &'a Document,
    next: usize,
}

impl<'a> Iterator for Properties<'a> {
    type Item = Property<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NONE {
            return None;
        }
        let property = Property::new(self.document, self.next);
        self.next = self.document.properties[self.next].next;
        Some(property)
    }
}

impl FusedIterator for Properties<'_> {}
