//! Primary expressions, root identifiers and object creation.

use super::*;
use crate::resolve::{MemberSymbol, OverloadedTypeSymbol, TypeSymbol};
use crate::validation::method_signatures;

/// Literals, `this`, primitive type names, `( expr )`, `new`, and
/// identifiers resolved through the symbol tables.
pub fn parse_primary<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    let token = p.current().clone();
    match token.kind {
        TokenKind::LParen => {
            p.bump();
            let inner = parse_binary(p, true, check)?;
            expect(p, TokenKind::RParen, ErrorCode::E0201)?;
            p.reposition(&inner, token.offset);
            Ok(inner)
        }
        TokenKind::Identifier => parse_root_identifier(p, assign_is_equality, check),
        TokenKind::This => {
            p.bump();
            validated(p, token.offset, ExprKind::This, ValueCheck::READ, assign_is_equality)
        }
        TokenKind::TypeName => {
            p.bump();
            let ty = token
                .primitive_type()
                .map(TypeRef::Primitive)
                .ok_or_else(|| error_at(ErrorCode::E0999, token.offset))?;
            parse_type_reference(p, ty, token.offset, assign_is_equality)
        }
        TokenKind::New => parse_new(p, assign_is_equality),
        TokenKind::EndOfInput => Err(error_at(ErrorCode::E0206, token.offset)),
        kind if kind.is_literal() => {
            p.bump();
            let literal = token
                .literal()
                .ok_or_else(|| error_at(ErrorCode::E0209, token.offset))?;
            validated(
                p,
                token.offset,
                ExprKind::Primitive(literal),
                ValueCheck::READ,
                assign_is_equality,
            )
        }
        kind => Err(error(
            ErrorCode::E0209,
            format!("unexpected {kind}"),
            token.offset,
        )),
    }
}

// =============================================================================
// Root identifiers
// =============================================================================

/// An identifier at the start of a postfix chain.
pub fn parse_root_identifier<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    let token = p.current().clone();
    let name = ident_of(&token);
    let Some(symbol) = p.lookup(&name) else {
        return Err(error(
            ErrorCode::E0301,
            format!("unknown identifier '{name}'"),
            token.offset,
        ));
    };
    parse_symbol(p, symbol, assign_is_equality, check)
}

/// Continue a parse from the symbol the identifier at the cursor named.
pub fn parse_symbol<P: RuleGrammar>(
    p: &mut P,
    symbol: Symbol,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    match symbol {
        Symbol::Namespace(ns) => parse_namespace_chain(p, ns, assign_is_equality),
        Symbol::Type(ty) => parse_type_symbol(p, &ty, assign_is_equality),
        Symbol::OverloadedType(types) => parse_overloaded_type(p, &types, assign_is_equality),
        Symbol::Member(member) => parse_unadorned_member(p, &member, assign_is_equality, check),
    }
}

/// `Ns.Sub.Type`: walk namespace segments until one names a type.
fn parse_namespace_chain<P: RuleGrammar>(
    p: &mut P,
    mut ns: NamespaceId,
    assign_is_equality: bool,
) -> PResult<Expr> {
    p.bump();
    loop {
        if !p.at(TokenKind::Dot) {
            let message = format!("expected '.' after namespace '{}'", p.namespace_name(ns));
            return Err(error(ErrorCode::E0901, message, p.offset()));
        }
        p.bump();
        if !p.at(TokenKind::Identifier) {
            complete_here(p, || CompletionRequest::Namespace(ns))?;
            return Err(error_at(ErrorCode::E0205, p.offset()));
        }

        let token = p.current().clone();
        let name = ident_of(&token);
        match p.namespace_member(ns, &name) {
            Some(Symbol::Namespace(child)) => {
                p.bump();
                ns = child;
            }
            Some(symbol) => return parse_symbol(p, symbol, assign_is_equality, ValueCheck::READ),
            None => {
                let message = format!(
                    "'{name}' is not a member of namespace '{}'",
                    p.namespace_name(ns)
                );
                return Err(error(ErrorCode::E0302, message, token.offset));
            }
        }
    }
}

fn parse_type_symbol<P: RuleGrammar>(
    p: &mut P,
    symbol: &TypeSymbol,
    assign_is_equality: bool,
) -> PResult<Expr> {
    let token = p.bump();
    let ty = if p.at(TokenKind::Less) {
        if symbol.generic_arity == 0 {
            let message = format!("'{}' is not a generic type", symbol.name);
            return Err(error(ErrorCode::E0305, message, p.offset()));
        }
        parse_generic_type(p, &[(symbol.ty, symbol.generic_arity)], &symbol.name)?
    } else if symbol.generic_arity > 0 {
        let message = format!(
            "'{}' needs {} type argument(s)",
            symbol.name, symbol.generic_arity
        );
        return Err(error(ErrorCode::E0304, message, token.offset));
    } else {
        TypeRef::Named(symbol.ty)
    };
    let ty = parse_nested_types(p, ty)?;
    parse_type_reference(p, ty, token.offset, assign_is_equality)
}

fn parse_overloaded_type<P: RuleGrammar>(
    p: &mut P,
    symbol: &OverloadedTypeSymbol,
    assign_is_equality: bool,
) -> PResult<Expr> {
    let token = p.bump();
    let ty = if p.at(TokenKind::Less) {
        let candidates: Vec<_> = symbol
            .candidates
            .iter()
            .filter(|c| c.generic_arity > 0)
            .map(|c| (c.ty, c.generic_arity))
            .collect();
        parse_generic_type(p, &candidates, &symbol.name)?
    } else {
        match symbol.non_generic() {
            Some(plain) => TypeRef::Named(plain.ty),
            None => {
                let message = format!("'{}' needs type arguments", symbol.name);
                return Err(error(ErrorCode::E0304, message, token.offset));
            }
        }
    };
    let ty = parse_nested_types(p, ty)?;
    parse_type_reference(p, ty, token.offset, assign_is_equality)
}

/// A type used as an expression, or `CustomExpression(args)` constructing a
/// custom expression type in place. The construction sits at its `(`.
fn parse_type_reference<P: RuleGrammar>(
    p: &mut P,
    ty: TypeRef,
    offset: TextSize,
    assign_is_equality: bool,
) -> PResult<Expr> {
    let catalog = p.catalog();
    let custom_type = match catalog.definition_of(&ty) {
        Some(id) if p.at(TokenKind::LParen) => catalog
            .has_capability(&ty, Capabilities::RULE_EXPRESSION)
            .then_some(id),
        _ => None,
    };
    let Some(type_id) = custom_type else {
        return validated(
            p,
            offset,
            ExprKind::TypeReference(ty),
            ValueCheck::READ,
            assign_is_equality,
        );
    };
    let lparen = p.bump().offset;
    let what = (ErrorCode::E0503, "custom expression");
    let custom = bind_construction(p, &ty, type_id, lparen, what)?;
    validated(
        p,
        lparen,
        ExprKind::Custom(custom),
        ValueCheck::READ,
        assign_is_equality,
    )
}

// =============================================================================
// Unadorned members of "this"
// =============================================================================

/// `name` or `name(args)` naming a member of "this". The implicit target is
/// `this` for instance members and the "this" type for static ones.
fn parse_unadorned_member<P: RuleGrammar>(
    p: &mut P,
    symbol: &MemberSymbol,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    let token = p.bump();
    let name = symbol.name.clone();
    let this_ty = p.context().this_ref();

    if p.at(TokenKind::LParen) {
        let offset = p.bump().offset;
        complete_here(p, || CompletionRequest::Methods {
            ty: this_ty.clone(),
            name: name.clone(),
            include_static: true,
            include_instance: true,
        })?;
        let args = parse_argument_list(p)?;
        let is_static = unadorned_call_is_static(p, &this_ty, &name, &args, offset)?;
        let target = implicit_target(p, token.offset, this_ty, is_static)?;
        let kind = ExprKind::MethodInvoke {
            target: Box::new(target),
            method: name,
            args,
        };
        return validated(p, offset, kind, ValueCheck::READ, true);
    }

    let catalog = p.catalog();
    let member = catalog.field_or_property(&this_ty, &name, MemberFilter::ALL);
    let (is_static, is_field) = match member {
        Some(member @ FieldOrProperty::Field(_)) => (member.is_static(), true),
        Some(member @ FieldOrProperty::Property(_)) => (member.is_static(), false),
        None => {
            let message = format!(
                "'{name}' is not a field or property of '{}'",
                catalog.display(&this_ty)
            );
            return Err(error(ErrorCode::E0303, message, token.offset));
        }
    };
    let target = Box::new(implicit_target(p, token.offset, this_ty, is_static)?);
    let kind = if is_field {
        ExprKind::FieldReference { target, name }
    } else {
        ExprKind::PropertyReference { target, name }
    };
    validated(p, token.offset, kind, check, assign_is_equality)
}

fn implicit_target<P: RuleGrammar>(
    p: &mut P,
    offset: TextSize,
    this_ty: TypeRef,
    is_static: bool,
) -> PResult<Expr> {
    let kind = if is_static {
        ExprKind::TypeReference(this_ty)
    } else {
        ExprKind::This
    };
    validated(p, offset, kind, ValueCheck::READ, true)
}

/// Resolve an unadorned call over both static and instance methods of
/// "this" to learn which implicit target it needs.
fn unadorned_call_is_static<P: RuleGrammar>(
    p: &P,
    this_ty: &TypeRef,
    name: &str,
    args: &[Expr],
    offset: TextSize,
) -> PResult<bool> {
    let infos = argument_infos(p, args)?;
    let signatures = method_signatures(
        p.context(),
        this_ty,
        name,
        MemberFilter::STATIC | MemberFilter::INSTANCE,
    );
    match overload::resolve(&p.catalog(), &signatures, &infos) {
        Ok(best) => Ok(best.key.is_static),
        Err(OverloadError::NotFound) => Err(error(
            ErrorCode::E0307,
            format!("no overload of '{name}' matches the arguments"),
            offset,
        )),
        Err(OverloadError::Ambiguous(_)) => Err(error(
            ErrorCode::E0308,
            format!("call to '{name}' is ambiguous"),
            offset,
        )),
    }
}

// =============================================================================
// Object and array creation
// =============================================================================

/// `new T(args)`, `new T[size]`, `new T[] { ... }` and `new T[size] { ... }`.
pub fn parse_new<P: RuleGrammar>(p: &mut P, assign_is_equality: bool) -> PResult<Expr> {
    let new_token = p.bump();
    let ty = try_parse_type_name(p, assign_is_equality)?;

    let mut sized = false;
    let mut size = None;
    if ty.is_some() && p.at(TokenKind::LBracket) {
        p.bump();
        sized = true;
        if !p.at(TokenKind::RBracket) {
            size = Some(parse_binary(p, false, ValueCheck::READ)?);
        }
        expect(p, TokenKind::RBracket, ErrorCode::E0202)?;
    }

    let Some(ty) = ty else {
        let message = format!("expected a type name after 'new', found {}", p.current_kind());
        return Err(error(ErrorCode::E0211, message, p.offset()));
    };
    if !sized {
        complete_here(p, || CompletionRequest::NestedTypes { ty: ty.clone() })?;
        return parse_object_creation(p, ty, assign_is_equality);
    }

    let mut initializers = Vec::new();
    let braced = p.eat(TokenKind::LBrace);
    if braced {
        if !p.at(TokenKind::RBrace) {
            initializers.push(parse_binary(p, true, ValueCheck::READ)?);
            while p.eat(TokenKind::Comma) {
                initializers.push(parse_binary(p, true, ValueCheck::READ)?);
            }
        }
        expect(p, TokenKind::RBrace, ErrorCode::E0203)?;
    }
    // `new T[] {}` is a zero-length array
    if size.is_none() && !braced {
        return Err(error_at(ErrorCode::E0502, new_token.offset));
    }

    let kind = ExprKind::ArrayCreate {
        element: ty,
        size: size.map(Box::new),
        initializers,
    };
    validated(p, new_token.offset, kind, ValueCheck::READ, assign_is_equality)
}

fn parse_object_creation<P: RuleGrammar>(
    p: &mut P,
    ty: TypeRef,
    assign_is_equality: bool,
) -> PResult<Expr> {
    let offset = expect(p, TokenKind::LParen, ErrorCode::E0204)?.offset;
    complete_here(p, || CompletionRequest::Constructors { ty: ty.clone() })?;
    let args = parse_argument_list(p)?;
    validated(
        p,
        offset,
        ExprKind::ObjectCreate { ty, args },
        ValueCheck::READ,
        assign_is_equality,
    )
}
