//! Literal values and their coercion into typed storage.

use crate::document::{DataArenas, StringPool};
use crate::types::Type;

/// A data literal as written in the source, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    /// Signed integer value. `bits` is set for hex, octal and binary
    /// literals, which floating-point types read as IEEE bit patterns.
    Integer { value: i128, bits: bool },
    Float(f64),
    String(String),
    /// Reference path such as `$node%mesh`; empty for `null`.
    Reference(String),
    Type(Type),
}

impl Literal {
    pub fn describe(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "bool",
            Literal::Integer { .. } => "integer",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::Reference(_) => "reference",
            Literal::Type(_) => "type",
        }
    }
}

/// Append `literal` to the arena of `ty`, converting it on the way.
///
/// Returns a message describing why the literal cannot be stored as `ty`.
pub fn push_literal(
    data: &mut DataArenas,
    strings: &mut StringPool,
    ty: Type,
    literal: &Literal,
) -> Result<(), String> {
    match (ty, literal) {
        (Type::Bool, Literal::Bool(v)) => data.bools.push(*v),
        (t, Literal::Integer { value, bits }) if t.is_integral() => {
            push_integer(data, t, integer_value(t, *value, *bits)?)
        }
        (Type::Float, Literal::Integer { value, bits: true }) => {
            let pattern = u32::try_from(*value).map_err(|_| out_of_range(ty))?;
            data.floats.push(f32::from_bits(pattern));
        }
        (Type::Double, Literal::Integer { value, bits: true }) => {
            let pattern = u64::try_from(*value).map_err(|_| out_of_range(ty))?;
            data.doubles.push(f64::from_bits(pattern));
        }
        (Type::Float, Literal::Integer { value, bits: false }) => data.floats.push(*value as f32),
        (Type::Double, Literal::Integer { value, bits: false }) => data.doubles.push(*value as f64),
        (Type::Float, Literal::Float(v)) => {
            let narrowed = *v as f32;
            if v.is_finite() && !narrowed.is_finite() {
                return Err(out_of_range(ty));
            }
            data.floats.push(narrowed);
        }
        (Type::Double, Literal::Float(v)) => data.doubles.push(*v),
        (Type::String, Literal::String(s)) => {
            let id = strings.intern(s);
            data.strings.push(id);
        }
        (Type::Reference, Literal::Reference(s)) => {
            let id = strings.intern(s);
            data.references.push(id);
        }
        (Type::Type, Literal::Type(t)) => data.types.push(*t),
        _ => {
            return Err(format!(
                "expected {} literal, found {} literal",
                ty,
                literal.describe()
            ))
        }
    }
    Ok(())
}

/// Range-check an integer for an integral type.
///
/// Bit-pattern literals may also fill a signed type through its unsigned
/// range, so `int8 {0xFF}` reads as -1.
fn integer_value(ty: Type, value: i128, bits: bool) -> Result<i128, String> {
    let (min, max) = ty.integral_range().ok_or_else(|| out_of_range(ty))?;
    if (min..=max).contains(&value) {
        return Ok(value);
    }
    if bits && min < 0 && value > max {
        let width = ty.bit_width().unwrap_or(64);
        let unsigned_max = (1i128 << width) - 1;
        if value <= unsigned_max {
            return Ok(value - (1i128 << width));
        }
    }
    Err(out_of_range(ty))
}

fn push_integer(data: &mut DataArenas, ty: Type, value: i128) {
    // Callers have range-checked `value` for `ty`.
    match ty {
        Type::UnsignedByte => data.unsigned_bytes.push(value as u8),
        Type::Byte => data.bytes.push(value as i8),
        Type::UnsignedShort => data.unsigned_shorts.push(value as u16),
        Type::Short => data.shorts.push(value as i16),
        Type::UnsignedInt => data.unsigned_ints.push(value as u32),
        Type::Int => data.ints.push(value as i32),
        Type::UnsignedLong => data.unsigned_longs.push(value as u64),
        Type::Long => data.longs.push(value as i64),
        _ => unreachable!("push_integer() called with non-integral type {}", ty),
    }
}

fn out_of_range(ty: Type) -> String {
    format!("literal is out of range for {}", ty)
}

/// Infer the storage type of an untyped property value.
pub fn infer_type(literals: &[Literal]) -> Result<Type, String> {
    let first = literals
        .first()
        .ok_or_else(|| "cannot infer the type of an empty list".to_string())?;

    let mut any_float = false;
    let mut any_integer = false;
    for literal in literals {
        match literal {
            Literal::Float(_) => any_float = true,
            Literal::Integer { .. } => any_integer = true,
            other if std::mem::discriminant(other) != std::mem::discriminant(first) => {
                return Err(format!(
                    "mixed {} and {} literals in one list",
                    first.describe(),
                    other.describe()
                ));
            }
            _ => {}
        }
    }

    if any_float || any_integer {
        if literals
            .iter()
            .any(|l| !matches!(l, Literal::Float(_) | Literal::Integer { .. }))
        {
            return Err(format!(
                "mixed numeric and {} literals in one list",
                first.describe()
            ));
        }
        if any_float {
            return Ok(Type::Double);
        }
        return integer_type(literals);
    }

    Ok(match first {
        Literal::Bool(_) => Type::Bool,
        Literal::String(_) => Type::String,
        Literal::Reference(_) => Type::Reference,
        Literal::Type(_) => Type::Type,
        Literal::Integer { .. } | Literal::Float(_) => unreachable!("numeric literals handled above"),
    })
}

fn integer_type(literals: &[Literal]) -> Result<Type, String> {
    let values = literals.iter().filter_map(|l| match l {
        Literal::Integer { value, .. } => Some(*value),
        _ => None,
    });
    let (min, max) = values.fold((0i128, 0i128), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min >= i64::MIN as i128 && max <= i64::MAX as i128 {
        Ok(Type::Long)
    } else if min >= 0 && max <= u64::MAX as i128 {
        Ok(Type::UnsignedLong)
    } else {
        Err("integer literals do not fit a common 64-bit type".to_string())
    }
}
