//! Binary, unary and postfix expressions.

use super::*;

#[derive(Debug, Clone, Copy)]
enum Operator {
    Binary(BinaryOp),
    /// `a != b`, built as `(a == b) == false`.
    NotEqual,
}

/// Number of binary precedence levels; level 0 binds loosest.
const LEVELS: usize = 8;

fn operator_at(level: usize, kind: TokenKind) -> Option<Operator> {
    use TokenKind as T;
    let op = match (level, kind) {
        (0, T::Or) => BinaryOp::BooleanOr,
        (1, T::And) => BinaryOp::BooleanAnd,
        (2, T::BitOr) => BinaryOp::BitwiseOr,
        (3, T::BitAnd) => BinaryOp::BitwiseAnd,
        (4, T::Equal | T::Assign) => BinaryOp::ValueEquality,
        (4, T::NotEqual) => return Some(Operator::NotEqual),
        (5, T::Less) => BinaryOp::LessThan,
        (5, T::LessEqual) => BinaryOp::LessThanOrEqual,
        (5, T::Greater) => BinaryOp::GreaterThan,
        (5, T::GreaterEqual) => BinaryOp::GreaterThanOrEqual,
        (6, T::Plus) => BinaryOp::Add,
        (6, T::Minus) => BinaryOp::Subtract,
        (7, T::Multiply) => BinaryOp::Multiply,
        (7, T::Divide) => BinaryOp::Divide,
        (7, T::Modulus) => BinaryOp::Modulus,
        _ => return None,
    };
    Some(Operator::Binary(op))
}

fn binary<P: RuleGrammar>(
    p: &mut P,
    offset: TextSize,
    left: Expr,
    op: BinaryOp,
    right: Expr,
) -> Expr {
    p.node(
        offset,
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
    )
}

/// A literal operand introduced by a lowering, validated like any other node.
fn synthetic_literal<P: RuleGrammar>(
    p: &mut P,
    offset: TextSize,
    literal: Literal,
) -> PResult<Expr> {
    validated(p, offset, ExprKind::Primitive(literal), ValueCheck::READ, true)
}

// =============================================================================
// Binary
// =============================================================================

/// Parse a full binary expression.
///
/// `=` is always read as equality here; `assign_is_equality` only decides
/// whether a `=` following a node turns its validation into a write check.
pub fn parse_binary<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    parse_level(p, 0, assign_is_equality, check)
}

fn parse_level<P: RuleGrammar>(
    p: &mut P,
    level: usize,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    if level == LEVELS {
        return parse_unary(p, assign_is_equality, check);
    }

    let mut left = parse_level(p, level + 1, assign_is_equality, check)?;
    while let Some(op) = operator_at(level, p.current_kind()) {
        let offset = p.bump().offset;
        let right = parse_level(p, level + 1, true, check)?;
        left = match op {
            Operator::Binary(op) => {
                let node = binary(p, offset, left, op, right);
                p.validate(&node, ValueCheck::READ, assign_is_equality)?;
                node
            }
            Operator::NotEqual => {
                let equal = binary(p, offset, left, BinaryOp::ValueEquality, right);
                p.validate(&equal, ValueCheck::READ, true)?;
                let falsity = synthetic_literal(p, offset, Literal::Bool(false))?;
                let node = binary(p, offset, equal, BinaryOp::ValueEquality, falsity);
                p.validate(&node, ValueCheck::READ, assign_is_equality)?;
                node
            }
        };
    }
    Ok(left)
}

// =============================================================================
// Unary
// =============================================================================

/// `!x` becomes `x == false`, `-x` becomes `0 - x`, `(T)x` is a cast.
pub fn parse_unary<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    match p.current_kind() {
        TokenKind::Not => {
            let offset = p.bump().offset;
            let operand = parse_unary(p, true, check)?;
            let falsity = synthetic_literal(p, offset, Literal::Bool(false))?;
            let node = binary(p, offset, operand, BinaryOp::ValueEquality, falsity);
            p.validate(&node, check, assign_is_equality)?;
            Ok(node)
        }
        TokenKind::Minus => {
            let offset = p.bump().offset;
            let operand = parse_unary(p, true, check)?;
            let zero = synthetic_literal(p, offset, Literal::Int(IntValue::I32(0)))?;
            let node = binary(p, offset, zero, BinaryOp::Subtract, operand);
            p.validate(&node, check, assign_is_equality)?;
            Ok(node)
        }
        TokenKind::LParen => match try_parse_cast(p, assign_is_equality, check)? {
            Some(cast) => Ok(cast),
            None => parse_postfix(p, assign_is_equality, check),
        },
        _ => parse_postfix(p, assign_is_equality, check),
    }
}

/// `(Type) operand`, or `None` with the cursor restored when the parenthesis
/// does not hold a type.
fn try_parse_cast<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Option<Expr>> {
    let mark = p.save();
    let offset = p.bump().offset;
    let ty = match try_parse_type_specifier(p, assign_is_equality)? {
        Some(ty) if p.at(TokenKind::RParen) => ty,
        _ => {
            p.restore(mark);
            return Ok(None);
        }
    };
    p.bump();
    let operand = parse_unary(p, true, check)?;
    let kind = ExprKind::Cast {
        ty,
        expr: Box::new(operand),
    };
    validated(p, offset, kind, check, assign_is_equality).map(Some)
}

// =============================================================================
// Postfix
// =============================================================================

/// A primary expression followed by any number of `.member`, `.method(args)`
/// and `[index, ...]` operators.
pub fn parse_postfix<P: RuleGrammar>(
    p: &mut P,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    let mut expr = parse_primary(p, assign_is_equality, check)?;
    loop {
        expr = match p.current_kind() {
            TokenKind::Dot => parse_member_operator(p, expr, assign_is_equality, check)?,
            TokenKind::LBracket => parse_element_operator(p, expr, assign_is_equality)?,
            _ => return Ok(expr),
        };
    }
}

fn parse_member_operator<P: RuleGrammar>(
    p: &mut P,
    target: Expr,
    assign_is_equality: bool,
    check: ValueCheck,
) -> PResult<Expr> {
    p.bump();
    let target_ty = p.type_of(&target)?;
    let is_static = matches!(target.kind, ExprKind::TypeReference(_));

    if !p.at(TokenKind::Identifier) {
        complete_here(p, || CompletionRequest::TypeMembers {
            ty: target_ty.clone(),
            is_static,
        })?;
        return Err(error_at(ErrorCode::E0205, p.offset()));
    }
    let name_token = p.bump();
    let name = ident_of(&name_token);

    if p.at(TokenKind::LParen) {
        let offset = p.bump().offset;
        complete_here(p, || CompletionRequest::Methods {
            ty: target_ty.clone(),
            name: name.clone(),
            include_static: is_static,
            include_instance: !is_static,
        })?;
        let args = parse_argument_list(p)?;
        let kind = ExprKind::MethodInvoke {
            target: Box::new(target),
            method: name,
            args,
        };
        return validated(p, offset, kind, ValueCheck::READ, true);
    }

    let catalog = p.catalog();
    let kind = match catalog.field_or_property(&target_ty, &name, MemberFilter::ALL) {
        Some(FieldOrProperty::Field(_)) => ExprKind::FieldReference {
            target: Box::new(target),
            name,
        },
        Some(FieldOrProperty::Property(_)) => ExprKind::PropertyReference {
            target: Box::new(target),
            name,
        },
        None => {
            let message = format!(
                "'{name}' is not a field or property of '{}'",
                catalog.display(&target_ty)
            );
            return Err(error(ErrorCode::E0303, message, name_token.offset));
        }
    };
    validated(p, name_token.offset, kind, check, assign_is_equality)
}

fn parse_element_operator<P: RuleGrammar>(
    p: &mut P,
    target: Expr,
    assign_is_equality: bool,
) -> PResult<Expr> {
    let offset = p.bump().offset;
    let mut indices = vec![parse_binary(p, true, ValueCheck::READ)?];
    while p.eat(TokenKind::Comma) {
        indices.push(parse_binary(p, true, ValueCheck::READ)?);
    }
    expect(p, TokenKind::RBracket, ErrorCode::E0202)?;

    let target_is_array = p.type_of(&target)?.is_array();
    let target = Box::new(target);
    let kind = if target_is_array {
        ExprKind::ArrayIndexer { target, indices }
    } else {
        ExprKind::Indexer { target, indices }
    };
    validated(p, offset, kind, ValueCheck::READ, assign_is_equality)
}

// =============================================================================
// Arguments
// =============================================================================

/// Arguments after an already consumed `(`, through the closing `)`.
pub fn parse_argument_list<P: RuleGrammar>(p: &mut P) -> PResult<Vec<Expr>> {
    let mut args = Vec::new();
    if !p.at(TokenKind::RParen) {
        args.push(parse_argument(p)?);
        while p.eat(TokenKind::Comma) {
            args.push(parse_argument(p)?);
        }
    }
    expect(p, TokenKind::RParen, ErrorCode::E0201)?;
    Ok(args)
}

/// One argument with an optional `in`, `out` or `ref` direction.
fn parse_argument<P: RuleGrammar>(p: &mut P) -> PResult<Expr> {
    let direction = match p.current_kind() {
        TokenKind::In => Some((ParamDirection::In, ValueCheck::READ)),
        TokenKind::Out => Some((ParamDirection::Out, ValueCheck::WRITE)),
        TokenKind::Ref => Some((ParamDirection::Ref, ValueCheck::READ | ValueCheck::WRITE)),
        _ => None,
    };
    let Some((direction, check)) = direction else {
        return parse_binary(p, true, ValueCheck::READ);
    };

    let offset = p.bump().offset;
    let expr = parse_binary(p, true, check)?;
    let kind = ExprKind::Direction {
        direction,
        expr: Box::new(expr),
    };
    validated(p, offset, kind, ValueCheck::READ, true)
}
