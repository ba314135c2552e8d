//! Typed data arenas and borrowed views over them.

use std::fmt;
use std::ops::{Index, Range};

use crate::types::Type;

use super::strings::{StringId, StringPool};

/// One contiguous buffer per primitive type.
///
/// Every structure or property stores its data as a `begin..begin + size`
/// range into the buffer matching its type.
#[derive(Debug, Default)]
pub(crate) struct DataArenas {
    pub bools: Vec<bool>,
    pub unsigned_bytes: Vec<u8>,
    pub bytes: Vec<i8>,
    pub unsigned_shorts: Vec<u16>,
    pub shorts: Vec<i16>,
    pub unsigned_ints: Vec<u32>,
    pub ints: Vec<i32>,
    pub unsigned_longs: Vec<u64>,
    pub longs: Vec<i64>,
    pub floats: Vec<f32>,
    pub doubles: Vec<f64>,
    pub strings: Vec<StringId>,
    pub references: Vec<StringId>,
    pub types: Vec<Type>,
}

impl DataArenas {
    /// Current length of the arena for `ty`, i.e. the `begin` of the next range.
    pub fn len_of(&self, ty: Type) -> usize {
        match ty {
            Type::Bool => self.bools.len(),
            Type::UnsignedByte => self.unsigned_bytes.len(),
            Type::Byte => self.bytes.len(),
            Type::UnsignedShort => self.unsigned_shorts.len(),
            Type::Short => self.shorts.len(),
            Type::UnsignedInt => self.unsigned_ints.len(),
            Type::Int => self.ints.len(),
            Type::UnsignedLong => self.unsigned_longs.len(),
            Type::Long => self.longs.len(),
            Type::Float => self.floats.len(),
            Type::Double => self.doubles.len(),
            Type::String => self.strings.len(),
            Type::Reference => self.references.len(),
            Type::Type => self.types.len(),
            Type::Custom => 0,
        }
    }

    /// Borrow `range` of the arena for `ty`.
    ///
    /// Panics if `ty` is `Custom`; callers only pass types of stored data.
    pub fn view<'a>(&'a self, pool: &'a StringPool, ty: Type, range: Range<usize>) -> Values<'a> {
        match ty {
            Type::Bool => Values::Bool(&self.bools[range]),
            Type::UnsignedByte => Values::UnsignedByte(&self.unsigned_bytes[range]),
            Type::Byte => Values::Byte(&self.bytes[range]),
            Type::UnsignedShort => Values::UnsignedShort(&self.unsigned_shorts[range]),
            Type::Short => Values::Short(&self.shorts[range]),
            Type::UnsignedInt => Values::UnsignedInt(&self.unsigned_ints[range]),
            Type::Int => Values::Int(&self.ints[range]),
            Type::UnsignedLong => Values::UnsignedLong(&self.unsigned_longs[range]),
            Type::Long => Values::Long(&self.longs[range]),
            Type::Float => Values::Float(&self.floats[range]),
            Type::Double => Values::Double(&self.doubles[range]),
            Type::String => Values::String(StrArray::new(pool, &self.strings[range])),
            Type::Reference => Values::Reference(StrArray::new(pool, &self.references[range])),
            Type::Type => Values::Type(&self.types[range]),
            Type::Custom => panic!("openddl: custom structures have no data arena"),
        }
    }
}

/// Borrowed view over the data of one structure or property.
#[derive(Debug, Clone, Copy)]
pub enum Values<'a> {
    Bool(&'a [bool]),
    UnsignedByte(&'a [u8]),
    Byte(&'a [i8]),
    UnsignedShort(&'a [u16]),
    Short(&'a [i16]),
    UnsignedInt(&'a [u32]),
    Int(&'a [i32]),
    UnsignedLong(&'a [u64]),
    Long(&'a [i64]),
    Float(&'a [f32]),
    Double(&'a [f64]),
    String(StrArray<'a>),
    Reference(StrArray<'a>),
    Type(&'a [Type]),
}

impl<'a> Values<'a> {
    pub fn ty(&self) -> Type {
        match self {
            Values::Bool(_) => Type::Bool,
            Values::UnsignedByte(_) => Type::UnsignedByte,
            Values::Byte(_) => Type::Byte,
            Values::UnsignedShort(_) => Type::UnsignedShort,
            Values::Short(_) => Type::Short,
            Values::UnsignedInt(_) => Type::UnsignedInt,
            Values::Int(_) => Type::Int,
            Values::UnsignedLong(_) => Type::UnsignedLong,
            Values::Long(_) => Type::Long,
            Values::Float(_) => Type::Float,
            Values::Double(_) => Type::Double,
            Values::String(_) => Type::String,
            Values::Reference(_) => Type::Reference,
            Values::Type(_) => Type::Type,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Values::Bool(v) => v.len(),
            Values::UnsignedByte(v) => v.len(),
            Values::Byte(v) => v.len(),
            Values::UnsignedShort(v) => v.len(),
            Values::Short(v) => v.len(),
            Values::UnsignedInt(v) => v.len(),
            Values::Int(v) => v.len(),
            Values::UnsignedLong(v) => v.len(),
            Values::Long(v) => v.len(),
            Values::Float(v) => v.len(),
            Values::Double(v) => v.len(),
            Values::String(v) | Values::Reference(v) => v.len(),
            Values::Type(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widened copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Scalar<'a>> {
        let scalar = match self {
            Values::Bool(v) => Scalar::Bool(*v.get(index)?),
            Values::UnsignedByte(v) => Scalar::Unsigned((*v.get(index)?).into()),
            Values::Byte(v) => Scalar::Signed((*v.get(index)?).into()),
            Values::UnsignedShort(v) => Scalar::Unsigned((*v.get(index)?).into()),
            Values::Short(v) => Scalar::Signed((*v.get(index)?).into()),
            Values::UnsignedInt(v) => Scalar::Unsigned((*v.get(index)?).into()),
            Values::Int(v) => Scalar::Signed((*v.get(index)?).into()),
            Values::UnsignedLong(v) => Scalar::Unsigned(*v.get(index)?),
            Values::Long(v) => Scalar::Signed(*v.get(index)?),
            Values::Float(v) => Scalar::Float((*v.get(index)?).into()),
            Values::Double(v) => Scalar::Float(*v.get(index)?),
            Values::String(v) => Scalar::Str(v.get(index)?),
            Values::Reference(v) => Scalar::Reference(v.get(index)?),
            Values::Type(v) => Scalar::Type(*v.get(index)?),
        };
        Some(scalar)
    }

    /// Iterate over all elements as widened scalars.
    pub fn scalars(self) -> impl Iterator<Item = Scalar<'a>> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// A single value widened to its category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Str(&'a str),
    Reference(&'a str),
    Type(Type),
}

impl Scalar<'_> {
    /// Whether this value can be read as `ty` without loss of range.
    ///
    /// Integers fit any integral type whose range contains them and any
    /// floating-point type. Floating-point values fit `Double`, and `Float`
    /// unless a finite value overflows it.
    pub fn fits(&self, ty: Type) -> bool {
        match (*self, ty) {
            (Scalar::Bool(_), Type::Bool) => true,
            (Scalar::Unsigned(v), t) if t.is_integral() => in_range(v as i128, t),
            (Scalar::Signed(v), t) if t.is_integral() => in_range(v as i128, t),
            (Scalar::Unsigned(_) | Scalar::Signed(_), Type::Float | Type::Double) => true,
            (Scalar::Float(v), Type::Float) => !v.is_finite() || (v as f32).is_finite(),
            (Scalar::Float(_), Type::Double) => true,
            (Scalar::Str(_), Type::String) => true,
            (Scalar::Reference(_), Type::Reference) => true,
            (Scalar::Type(_), Type::Type) => true,
            _ => false,
        }
    }
}

fn in_range(value: i128, ty: Type) -> bool {
    ty.integral_range()
        .is_some_and(|(min, max)| (min..=max).contains(&value))
}

/// Borrowed array of interned strings.
#[derive(Clone, Copy)]
pub struct StrArray<'a> {
    pool: &'a StringPool,
    ids: &'a [StringId],
}

impl<'a> StrArray<'a> {
    pub(crate) fn new(pool: &'a StringPool, ids: &'a [StringId]) -> Self {
        Self { pool, ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        let pool = self.pool;
        self.ids.get(index).map(|&id| pool.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let pool = self.pool;
        self.ids.iter().map(move |&id| pool.get(id))
    }

    pub fn to_vec(&self) -> Vec<&'a str> {
        self.iter().collect()
    }
}

impl Index<usize> for StrArray<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        self.pool.get(self.ids[index])
    }
}

impl fmt::Debug for StrArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq<[&str]> for StrArray<'_> {
    fn eq(&self, other: &[&str]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == *b)
    }
}
