//! Implicit conversions between catalogue types.
//!
//! Covers identity, `null` to reference types, everything to `object`,
//! base-class and interface chains, array covariance for reference elements,
//! the implicit numeric widenings, and constant narrowing for integer literals.

use super::catalog::Catalog;
use super::types::{PrimitiveType, TypeRef};

use PrimitiveType::*;

/// Whether a value of type `from` can be used where `to` is expected.
pub fn is_assignable(catalog: &Catalog, from: &TypeRef, to: &TypeRef) -> bool {
    if from == to {
        return true;
    }
    match (from, to) {
        (TypeRef::Null, _) => is_reference_type(catalog, to),
        (_, TypeRef::Null) => false,
        (TypeRef::Primitive(Void), _) | (_, TypeRef::Primitive(Void)) => false,
        (_, TypeRef::Primitive(Object)) => true,
        (TypeRef::Primitive(a), TypeRef::Primitive(b)) => widens(*a, *b),
        (
            TypeRef::Array {
                element: from_element,
                rank: from_rank,
            },
            TypeRef::Array {
                element: to_element,
                rank: to_rank,
            },
        ) => {
            from_rank == to_rank
                && is_reference_type(catalog, from_element)
                && is_assignable(catalog, from_element, to_element)
        }
        (TypeRef::Named(id), TypeRef::Primitive(p)) => catalog.primitive_binding(*p) == Some(*id),
        _ => {
            if to.definition().is_some_and(|id| {
                catalog.primitive_binding(Object) == Some(id) && to.generic_args().is_empty()
            }) {
                return true;
            }
            let in_chain = catalog
                .type_chain(from)
                .into_iter()
                .any(|(id, args)| constructed(id, args) == *to);
            in_chain || catalog.interfaces_of(from).contains(to)
        }
    }
}

fn constructed(id: super::TypeId, args: Vec<TypeRef>) -> TypeRef {
    if args.is_empty() {
        TypeRef::Named(id)
    } else {
        TypeRef::Generic {
            definition: id,
            args,
        }
    }
}

/// Types whose values can be `null`.
pub fn is_reference_type(catalog: &Catalog, ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Primitive(p) => p.is_reference(),
        TypeRef::Array { .. } | TypeRef::Null => true,
        TypeRef::Named(_) | TypeRef::Generic { .. } => !catalog.is_value_type(ty),
        TypeRef::Param(_) => false,
    }
}

/// Implicit numeric conversion from `from` to `to`.
pub fn widens(from: PrimitiveType, to: PrimitiveType) -> bool {
    if from == to {
        return true;
    }
    match from {
        SByte => matches!(to, Int16 | Int32 | Int64 | Single | Double | Decimal),
        Byte => matches!(
            to,
            Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int16 => matches!(to, Int32 | Int64 | Single | Double | Decimal),
        UInt16 | Char => matches!(
            to,
            UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int32 => matches!(to, Int64 | Single | Double | Decimal),
        UInt32 => matches!(to, Int64 | UInt64 | Single | Double | Decimal),
        Int64 | UInt64 => matches!(to, Single | Double | Decimal),
        Single => to == Double,
        _ => false,
    }
}

/// Whether an integer constant fits `to` without loss, which makes the
/// constant implicitly convertible even where the type itself would not be.
pub fn constant_fits(value: i128, to: &TypeRef) -> bool {
    match to.as_primitive() {
        Some(Char) | None => false,
        Some(p) => p
            .integral_range()
            .is_some_and(|(min, max)| (min..=max).contains(&value)),
    }
}

/// Result type of an arithmetic operator applied to two numeric operands.
pub fn binary_numeric_promotion(
    left: PrimitiveType,
    right: PrimitiveType,
) -> Option<PrimitiveType> {
    let numeric = |p: PrimitiveType| p.is_numeric() || p == Char;
    if !numeric(left) || !numeric(right) {
        return None;
    }
    let either = |p: PrimitiveType| left == p || right == p;
    if either(Decimal) {
        return (!left.is_floating() && !right.is_floating()).then_some(Decimal);
    }
    if either(Double) {
        return Some(Double);
    }
    if either(Single) {
        return Some(Single);
    }
    if either(UInt64) {
        let signed = |p: PrimitiveType| matches!(p, SByte | Int16 | Int32 | Int64);
        return (!signed(left) && !signed(right)).then_some(UInt64);
    }
    if either(Int64) {
        return Some(Int64);
    }
    if either(UInt32) {
        let narrow_signed = |p: PrimitiveType| matches!(p, SByte | Int16 | Int32);
        return Some(if narrow_signed(left) || narrow_signed(right) {
            Int64
        } else {
            UInt32
        });
    }
    Some(Int32)
}
