//! Literal values.

use std::fmt;

use rust_decimal::Decimal;
use smol_str::SmolStr;

use crate::metadata::{PrimitiveType, TypeRef};

/// An integer literal. Always exactly one of four widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntValue {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
}

impl IntValue {
    /// Width for an unsuffixed literal: the narrowest of int, long, ulong.
    pub fn unsuffixed(value: u64) -> Self {
        if let Ok(v) = i32::try_from(value) {
            IntValue::I32(v)
        } else if let Ok(v) = i64::try_from(value) {
            IntValue::I64(v)
        } else {
            IntValue::U64(value)
        }
    }

    pub fn as_i128(self) -> i128 {
        match self {
            IntValue::I32(v) => i128::from(v),
            IntValue::U32(v) => i128::from(v),
            IntValue::I64(v) => i128::from(v),
            IntValue::U64(v) => i128::from(v),
        }
    }

    pub fn primitive(self) -> PrimitiveType {
        match self {
            IntValue::I32(_) => PrimitiveType::Int32,
            IntValue::U32(_) => PrimitiveType::UInt32,
            IntValue::I64(_) => PrimitiveType::Int64,
            IntValue::U64(_) => PrimitiveType::UInt64,
        }
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntValue::I32(v) => write!(f, "{v}"),
            IntValue::U32(v) => write!(f, "{v}u"),
            IntValue::I64(v) => write!(f, "{v}L"),
            IntValue::U64(v) => write!(f, "{v}UL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Char(char),
    String(SmolStr),
    Int(IntValue),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
}

impl Literal {
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Literal::Null => TypeRef::Null,
            Literal::Bool(_) => TypeRef::BOOL,
            Literal::Char(_) => TypeRef::Primitive(PrimitiveType::Char),
            Literal::String(_) => TypeRef::STRING,
            Literal::Int(v) => TypeRef::Primitive(v.primitive()),
            Literal::Float(_) => TypeRef::Primitive(PrimitiveType::Single),
            Literal::Double(_) => TypeRef::Primitive(PrimitiveType::Double),
            Literal::Decimal(_) => TypeRef::Primitive(PrimitiveType::Decimal),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Char(c) => write!(f, "'{}'", c.escape_default()),
            Literal::String(s) => write!(f, "\"{}\"", s.escape_default()),
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}f"),
            Literal::Double(v) => write!(f, "{v}d"),
            Literal::Decimal(v) => write!(f, "{v}m"),
        }
    }
}
