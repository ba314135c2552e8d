use std::fmt;

use crate::parser::span::{Location, Span};
use crate::types::{Identifier, Primitive, Type};

use super::{Document, PropertyData, Values};

/// Handle to one property of a custom structure.
#[derive(Clone, Copy)]
pub struct Property<'a> {
    document: &'a Document,
    index: usize,
}

impl<'a> Property<'a> {
    pub(crate) fn new(document: &'a Document, index: usize) -> Self {
        Self { document, index }
    }

    fn data(&self) -> &'a PropertyData {
        &self.document.properties[self.index]
    }

    pub(crate) fn span(&self) -> Span {
        self.data().span
    }

    pub fn identifier(&self) -> Identifier {
        self.data().identifier
    }

    /// Keyword as written in the source.
    pub fn keyword(&self) -> &'a str {
        self.document.strings.get(self.data().keyword)
    }

    /// Type the values were stored as.
    pub fn ty(&self) -> Type {
        Type::from_tag(self.data().tag)
    }

    pub fn location(&self) -> Location {
        self.data().span.start
    }

    pub fn array_size(&self) -> usize {
        self.data().size
    }

    pub fn values(&self) -> Values<'a> {
        let data = self.data();
        self.document.data.view(
            &self.document.strings,
            self.ty(),
            data.begin..data.begin + data.size,
        )
    }

    /// Whether every value can be read as `ty`.
    ///
    /// Integers are compatible with any integral type whose range holds
    /// them and with both floating-point types. Floating-point values are
    /// compatible with both floating-point types, and references with
    /// strings.
    pub fn is_type_compatible_with(&self, ty: Type) -> bool {
        let stored = self.ty();
        if stored == ty || (ty == Type::String && stored == Type::Reference) {
            return true;
        }
        if ty.is_custom() {
            return false;
        }
        let values = self.values();
        !values.is_empty() && values.scalars().all(|scalar| scalar.fits(ty))
    }

    /// The single value, converted to `T`.
    ///
    /// The property must hold exactly one value compatible with `T`.
    pub fn as_value<T: Primitive>(&self) -> T::Value<'a> {
        assert!(
            self.array_size() == 1,
            "openddl::Property::as_value(): not a single value"
        );
        self.values()
            .get(0)
            .and_then(T::from_scalar)
            .unwrap_or_else(|| panic!("openddl::Property::as_value(): not of given type"))
    }

    /// All values, which must be stored as `T`.
    pub fn as_array<T: Primitive>(&self) -> T::Array<'a> {
        assert!(
            T::accepts(self.ty()),
            "openddl::Property::as_array(): not of given type"
        );
        T::array(self.values())
            .unwrap_or_else(|| panic!("openddl::Property::as_array(): not of given type"))
    }
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("keyword", &self.keyword())
            .field("ty", &self.ty())
            .field("values", &self.values())
            .finish()
    }
}
