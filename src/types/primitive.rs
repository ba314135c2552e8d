//! Primitive data types and their OpenDDL spellings.

use std::fmt;

/// Data type of a structure or property.
///
/// The first fourteen variants are primitive types that can be stored in a
/// document's data arenas. `Custom` marks structures that hold properties
/// and child structures instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Type {
    Bool,
    UnsignedByte,
    Byte,
    UnsignedShort,
    Short,
    UnsignedInt,
    Int,
    UnsignedLong,
    Long,
    Float,
    Double,
    String,
    Reference,
    Type,
    Custom,
}

const PRIMITIVES: [Type; 14] = [
    Type::Bool,
    Type::UnsignedByte,
    Type::Byte,
    Type::UnsignedShort,
    Type::Short,
    Type::UnsignedInt,
    Type::Int,
    Type::UnsignedLong,
    Type::Long,
    Type::Float,
    Type::Double,
    Type::String,
    Type::Reference,
    Type::Type,
];

impl Type {
    /// All primitive (non-custom) types in tag order.
    pub fn primitives() -> &'static [Type] {
        &PRIMITIVES
    }

    /// Decode a stored tag. Any tag past the last primitive reads as `Custom`.
    pub fn from_tag(tag: u8) -> Type {
        PRIMITIVES
            .get(tag as usize)
            .copied()
            .unwrap_or(Type::Custom)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn is_custom(self) -> bool {
        self == Type::Custom
    }

    pub fn is_integral(self) -> bool {
        self.integral_range().is_some()
    }

    pub fn is_floating_point(self) -> bool {
        matches!(self, Type::Float | Type::Double)
    }

    /// Inclusive value range of an integral type.
    pub fn integral_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Type::UnsignedByte => (0, u8::MAX as i128),
            Type::Byte => (i8::MIN as i128, i8::MAX as i128),
            Type::UnsignedShort => (0, u16::MAX as i128),
            Type::Short => (i16::MIN as i128, i16::MAX as i128),
            Type::UnsignedInt => (0, u32::MAX as i128),
            Type::Int => (i32::MIN as i128, i32::MAX as i128),
            Type::UnsignedLong => (0, u64::MAX as i128),
            Type::Long => (i64::MIN as i128, i64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Width in bits of numeric types.
    pub fn bit_width(self) -> Option<u32> {
        match self {
            Type::UnsignedByte | Type::Byte => Some(8),
            Type::UnsignedShort | Type::Short => Some(16),
            Type::UnsignedInt | Type::Int | Type::Float => Some(32),
            Type::UnsignedLong | Type::Long | Type::Double => Some(64),
            _ => None,
        }
    }

    /// Canonical OpenDDL keyword.
    pub fn keyword(self) -> &'static str {
        self.keywords()[0]
    }

    /// Every OpenDDL spelling of this type, canonical first.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Type::Bool => &["bool", "b"],
            Type::UnsignedByte => &["unsigned_int8", "uint8", "u8"],
            Type::Byte => &["int8", "i8"],
            Type::UnsignedShort => &["unsigned_int16", "uint16", "u16"],
            Type::Short => &["int16", "i16"],
            Type::UnsignedInt => &["unsigned_int32", "uint32", "u32"],
            Type::Int => &["int32", "i32"],
            Type::UnsignedLong => &["unsigned_int64", "uint64", "u64"],
            Type::Long => &["int64", "i64"],
            Type::Float => &["float", "float32", "f", "f32"],
            Type::Double => &["double", "float64", "d", "f64"],
            Type::String => &["string", "s"],
            Type::Reference => &["ref", "r"],
            Type::Type => &["type", "t"],
            Type::Custom => &["custom"],
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
