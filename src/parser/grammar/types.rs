//! Type names: primitive keywords, (generic) catalogue types, nested types
//! and array ranks.

use super::*;
use crate::metadata::TypeId;

/// A type name at the cursor, or `None` with the cursor restored.
///
/// Identifiers resolve through the global table only, so a member of "this"
/// never hides a type here. Once a global name matched, errors in the rest
/// of the type name (arity, type arguments, namespace members) propagate.
pub fn try_parse_type_name<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
) -> PResult<Option<TypeRef>> {
    let token = p.current().clone();
    match token.kind {
        TokenKind::TypeName => {
            p.bump();
            Ok(token.primitive_type().map(TypeRef::Primitive))
        }
        TokenKind::Identifier => {
            let name = ident_of(&token);
            let Some(symbol) = p.lookup_global(&name) else {
                return Ok(None);
            };
            let mark = p.save();
            let expr = parse_symbol(p, symbol, assign_is_equality, ValueCheck::READ)?;
            match expr.kind {
                ExprKind::TypeReference(ty) => Ok(Some(ty)),
                _ => {
                    p.restore(mark);
                    Ok(None)
                }
            }
        }
        _ => Ok(None),
    }
}

/// A type name followed by any number of array ranks: `T`, `T[]`, `T[,]`.
pub fn try_parse_type_specifier<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
) -> PResult<Option<TypeRef>> {
    match try_parse_type_name(p, assign_is_equality)? {
        Some(ty) => parse_array_ranks(p, ty).map(Some),
        None => Ok(None),
    }
}

fn parse_array_ranks<P: RuleGrammar>(p: &mut P, mut ty: TypeRef) -> PResult<TypeRef> {
    while p.at(TokenKind::LBracket) {
        p.bump();
        let mut rank: u8 = 1;
        while p.eat(TokenKind::Comma) {
            rank = rank.saturating_add(1);
        }
        expect(p, TokenKind::RBracket, ErrorCode::E0202)?;
        ty = TypeRef::array_of(ty, rank);
    }
    Ok(ty)
}

/// `<T1, T2, ...>` with the cursor on `<`.
pub fn parse_generic_arguments<P: RuleGrammar>(p: &mut P) -> PResult<Vec<TypeRef>> {
    let mut args = Vec::new();
    loop {
        let separator = p.bump();
        match try_parse_type_specifier(p, true)? {
            Some(ty) => args.push(ty),
            None => {
                let message = format!("expected a type argument after {}", separator.kind);
                return Err(error(ErrorCode::E0211, message, separator.offset));
            }
        }
        if !p.at(TokenKind::Comma) {
            break;
        }
    }
    expect(p, TokenKind::Greater, ErrorCode::E0210)?;
    Ok(args)
}

/// Parse type arguments and pick the candidate definition with that arity.
pub fn parse_generic_type<P: RuleGrammar>(
    p: &mut P,
    candidates: &[(TypeId, u16)],
    name: &str,
) -> PResult<TypeRef> {
    let args = parse_generic_arguments(p)?;
    match candidates
        .iter()
        .find(|(_, arity)| usize::from(*arity) == args.len())
    {
        Some((definition, _)) => Ok(TypeRef::Generic {
            definition: *definition,
            args,
        }),
        None => {
            let message = format!("'{name}' does not take {} type argument(s)", args.len());
            Err(error(ErrorCode::E0306, message, p.offset()))
        }
    }
}

/// Nested types visible from the "this" type: non-public ones only inside
/// the same assembly.
fn nested_filter<P: RuleGrammar>(p: &P, catalog: &Catalog, ty: &TypeRef) -> MemberFilter {
    let same_assembly = catalog
        .definition_of(ty)
        .is_some_and(|id| catalog.get(id).assembly == p.context().this_assembly());
    if same_assembly {
        MemberFilter::PUBLIC | MemberFilter::NON_PUBLIC
    } else {
        MemberFilter::PUBLIC
    }
}

/// Follow `.Inner` segments while they name nested types. A segment that is
/// not a nested type is left unconsumed for member access.
pub fn parse_nested_types<P: RuleGrammar>(p: &mut P, mut ty: TypeRef) -> PResult<TypeRef> {
    let catalog = p.catalog();
    while p.at(TokenKind::Dot) {
        let mark = p.save();
        p.bump();
        if !p.at(TokenKind::Identifier) {
            complete_here(p, || CompletionRequest::TypeMembers {
                ty: ty.clone(),
                is_static: true,
            })?;
            return Err(error_at(ErrorCode::E0205, p.offset()));
        }
        let name = ident_of(&p.bump());
        let filter = nested_filter(p, &catalog, &ty);

        let nested = if p.at(TokenKind::Less) {
            let candidates: Vec<(TypeId, u16)> = catalog
                .nested_types(&ty, filter)
                .into_iter()
                .filter_map(|id| {
                    let def = catalog.get(id);
                    (def.name == name && def.is_generic()).then_some((id, def.generic_arity))
                })
                .collect();
            if candidates.is_empty() {
                None
            } else {
                Some(parse_generic_type(p, &candidates, &name)?)
            }
        } else {
            catalog.nested_type(&ty, &name, filter)
        };

        match nested {
            Some(inner) => ty = inner,
            None => {
                p.restore(mark);
                break;
            }
        }
    }
    Ok(ty)
}
