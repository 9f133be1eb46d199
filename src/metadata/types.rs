//! Type references.

use std::fmt;

/// Handle of a [`TypeDef`](super::TypeDef) inside a [`Catalog`](super::Catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Built-in types with a keyword spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Bool,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    Object,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 16] = [
        Self::Bool,
        Self::Char,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::String,
        Self::Object,
        Self::Void,
    ];

    /// Keyword spelling used in rule text.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::SByte => "sbyte",
            Self::Byte => "byte",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Int64 => "long",
            Self::UInt64 => "ulong",
            Self::Single => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Object => "object",
            Self::Void => "void",
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Char
        )
    }

    pub fn is_floating(self) -> bool {
        matches!(self, Self::Single | Self::Double)
    }

    /// Integral (excluding `char`), floating or decimal.
    pub fn is_numeric(self) -> bool {
        (self.is_integral() && self != Self::Char) || self.is_floating() || self == Self::Decimal
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::Byte | Self::UInt16 | Self::UInt32 | Self::UInt64 | Self::Char)
    }

    /// `string` and `object` are reference types; everything else is a value.
    pub fn is_reference(self) -> bool {
        matches!(self, Self::String | Self::Object)
    }

    /// Inclusive value range of an integral type.
    pub fn integral_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Self::SByte => (i8::MIN as i128, i8::MAX as i128),
            Self::Byte => (0, u8::MAX as i128),
            Self::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Self::UInt16 | Self::Char => (0, u16::MAX as i128),
            Self::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Self::UInt32 => (0, u32::MAX as i128),
            Self::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Self::UInt64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A reference to a (possibly constructed) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    /// A catalogue type used without type arguments.
    Named(TypeId),
    /// A generic definition bound to type arguments.
    Generic { definition: TypeId, args: Vec<TypeRef> },
    Array { element: Box<TypeRef>, rank: u8 },
    /// Generic parameter `index` of the enclosing definition.
    Param(u16),
    /// Type of the `null` literal.
    Null,
}

impl TypeRef {
    pub const BOOL: TypeRef = TypeRef::Primitive(PrimitiveType::Bool);
    pub const INT: TypeRef = TypeRef::Primitive(PrimitiveType::Int32);
    pub const STRING: TypeRef = TypeRef::Primitive(PrimitiveType::String);
    pub const OBJECT: TypeRef = TypeRef::Primitive(PrimitiveType::Object);
    pub const VOID: TypeRef = TypeRef::Primitive(PrimitiveType::Void);

    pub fn array_of(element: TypeRef, rank: u8) -> TypeRef {
        TypeRef::Array {
            element: Box::new(element),
            rank,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    pub fn is_bool(&self) -> bool {
        *self == TypeRef::BOOL
    }

    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// The catalogue definition behind a named or constructed generic type.
    pub fn definition(&self) -> Option<TypeId> {
        match self {
            TypeRef::Named(id) | TypeRef::Generic { definition: id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn generic_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// Replace generic parameters with the given arguments.
    pub fn substitute(&self, args: &[TypeRef]) -> TypeRef {
        if args.is_empty() {
            return self.clone();
        }
        match self {
            TypeRef::Param(index) => args
                .get(usize::from(*index))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeRef::Generic {
                definition,
                args: inner,
            } => TypeRef::Generic {
                definition: *definition,
                args: inner.iter().map(|a| a.substitute(args)).collect(),
            },
            TypeRef::Array { element, rank } => TypeRef::array_of(element.substitute(args), *rank),
            _ => self.clone(),
        }
    }

    pub fn contains_params(&self) -> bool {
        match self {
            TypeRef::Param(_) => true,
            TypeRef::Generic { args, .. } => args.iter().any(TypeRef::contains_params),
            TypeRef::Array { element, .. } => element.contains_params(),
            _ => false,
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(p: PrimitiveType) -> Self {
        TypeRef::Primitive(p)
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::Named(id)
    }
}
