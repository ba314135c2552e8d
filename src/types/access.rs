//! Mapping from Rust types to stored primitive data.
//!
//! [`Primitive`] is implemented for the Rust counterpart of every OpenDDL
//! primitive type. `String` is a marker that reads both `string` and `ref`
//! data as `&str`.

use crate::document::{Scalar, StrArray, Values};

use super::primitive::Type;

mod sealed {
    pub trait Sealed {}
}

/// A Rust type that typed accessors can read stored data as.
pub trait Primitive: sealed::Sealed {
    /// Value returned for a single element.
    type Value<'a>;
    /// Borrowed view returned for a whole array.
    type Array<'a>;

    /// Storage type this Rust type corresponds to.
    const TYPE: Type;

    /// Whether data stored as `ty` can be read as this type directly.
    fn accepts(ty: Type) -> bool {
        ty == Self::TYPE
    }

    /// Convert a widened scalar, if it fits this type.
    fn from_scalar(scalar: Scalar<'_>) -> Option<Self::Value<'_>>;

    /// Borrow the array if its storage type matches.
    fn array(values: Values<'_>) -> Option<Self::Array<'_>>;
}

macro_rules! integral_primitive {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Primitive for $t {
            type Value<'a> = $t;
            type Array<'a> = &'a [$t];

            const TYPE: Type = Type::$variant;

            fn from_scalar(scalar: Scalar<'_>) -> Option<Self::Value<'_>> {
                match scalar {
                    Scalar::Unsigned(v) => <$t>::try_from(v).ok(),
                    Scalar::Signed(v) => <$t>::try_from(v).ok(),
                    _ => None,
                }
            }

            fn array(values: Values<'_>) -> Option<Self::Array<'_>> {
                match values {
                    Values::$variant(slice) => Some(slice),
                    _ => None,
                }
            }
        }
    )*};
}

integral_primitive! {
    u8 => UnsignedByte,
    i8 => Byte,
    u16 => UnsignedShort,
    i16 => Short,
    u32 => UnsignedInt,
    i32 => Int,
    u64 => UnsignedLong,
    i64 => Long,
}

macro_rules! float_primitive {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Primitive for $t {
            type Value<'a> = $t;
            type Array<'a> = &'a [$t];

            const TYPE: Type = Type::$variant;

            fn from_scalar(scalar: Scalar<'_>) -> Option<Self::Value<'_>> {
                if !scalar.fits(Type::$variant) {
                    return None;
                }
                match scalar {
                    Scalar::Unsigned(v) => Some(v as $t),
                    Scalar::Signed(v) => Some(v as $t),
                    Scalar::Float(v) => Some(v as $t),
                    _ => None,
                }
            }

            fn array(values: Values<'_>) -> Option<Self::Array<'_>> {
                match values {
                    Values::$variant(slice) => Some(slice),
                    _ => None,
                }
            }
        }
    )*};
}

float_primitive! {
    f32 => Float,
    f64 => Double,
}

impl sealed::Sealed for bool {}

impl Primitive for bool {
    type Value<'a> = bool;
    type Array<'a> = &'a [bool];

    const TYPE: Type = Type::Bool;

    fn from_scalar(scalar: Scalar<'_>) -> Option<Self::Value<'_>> {
        match scalar {
            Scalar::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn array(values: Values<'_>) -> Option<Self::Array<'_>> {
        match values {
            Values::Bool(slice) => Some(slice),
            _ => None,
        }
    }
}

impl sealed::Sealed for String {}

/// Reads `string` and `ref` data as borrowed `&str`.
impl Primitive for String {
    type Value<'a> = &'a str;
    type Array<'a> = StrArray<'a>;

    const TYPE: Type = Type::String;

    fn accepts(ty: Type) -> bool {
        matches!(ty, Type::String | Type::Reference)
    }

    fn from_scalar(scalar: Scalar<'_>) -> Option<Self::Value<'_>> {
        match scalar {
            Scalar::Str(s) | Scalar::Reference(s) => Some(s),
            _ => None,
        }
    }

    fn array(values: Values<'_>) -> Option<Self::Array<'_>> {
        match values {
            Values::String(strings) | Values::Reference(strings) => Some(strings),
            _ => None,
        }
    }
}

impl sealed::Sealed for Type {}

impl Primitive for Type {
    type Value<'a> = Type;
    type Array<'a> = &'a [Type];

    const TYPE: Type = Type::Type;

    fn from_scalar(scalar: Scalar<'_>) -> Option<Self::Value<'_>> {
        match scalar {
            Scalar::Type(ty) => Some(ty),
            _ => None,
        }
    }

    fn array(values: Values<'_>) -> Option<Self::Array<'_>> {
        match values {
            Values::Type(slice) => Some(slice),
            _ => None,
        }
    }
}
