//! Statements: `halt`, `update(...)`, custom actions and assignments.

use super::*;

/// One statement, as a rule action.
pub fn parse_statement<P: RuleGrammar>(p: &mut P) -> PResult<RuleAction> {
    match p.current_kind() {
        TokenKind::Halt => {
            let token = p.bump();
            let action = p.action(token.offset, ActionKind::Halt);
            p.validate_action(&action)?;
            Ok(action)
        }
        TokenKind::Update => parse_update(p),
        _ => match try_parse_custom_action(p)? {
            Some(action) => Ok(action),
            None => parse_assignment(p),
        },
    }
}

/// `update("this/path")` or `update(expr)`, where `expr` must write exactly
/// one path.
fn parse_update<P: RuleGrammar>(p: &mut P) -> PResult<RuleAction> {
    let token = p.bump();
    expect(p, TokenKind::LParen, ErrorCode::E0204)?;

    let argument = p.current().clone();
    let path = match (&argument.kind, argument.literal()) {
        (TokenKind::StringLiteral, Some(Literal::String(path))) => {
            p.bump();
            path.to_string()
        }
        _ => {
            let target = parse_postfix(p, true, ValueCheck::READ)?;
            let mut paths = p.written_paths(&target);
            if paths.len() != 1 {
                let message = format!(
                    "update target must name exactly one path, found {}",
                    paths.len()
                );
                return Err(error(ErrorCode::E0501, message, argument.offset));
            }
            paths.remove(0)
        }
    };
    expect(p, TokenKind::RParen, ErrorCode::E0201)?;

    let action = p.action(token.offset, ActionKind::Update { path });
    p.validate_action(&action)?;
    Ok(action)
}

/// `ActionType(args)` where the type is a rule action. `None`, with the
/// cursor restored, when the statement does not start that way.
fn try_parse_custom_action<P: RuleGrammar>(p: &mut P) -> PResult<Option<RuleAction>> {
    let mark = p.save();
    let start = p.offset();
    let catalog = p.catalog();

    let ty = try_parse_type_specifier(p, false)?;
    let action_type = ty.and_then(|ty| {
        let is_action = p.at(TokenKind::LParen)
            && catalog.has_capability(&ty, Capabilities::RULE_ACTION);
        let id = catalog.definition_of(&ty)?;
        is_action.then_some((ty, id))
    });
    let Some((ty, type_id)) = action_type else {
        p.restore(mark);
        return Ok(None);
    };

    let lparen = p.bump().offset;
    let custom = bind_construction(p, &ty, type_id, lparen, (ErrorCode::E0504, "action"))?;
    let action = p.action(start, ActionKind::Custom(custom));
    p.validate_action(&action)?;
    Ok(Some(action))
}

/// `target = value`, or a bare expression statement.
fn parse_assignment<P: RuleGrammar>(p: &mut P) -> PResult<RuleAction> {
    let start = p.offset();
    let lhs = parse_postfix(p, false, ValueCheck::READ)?;
    let (offset, kind) = if p.at(TokenKind::Assign) {
        let offset = p.bump().offset;
        let rhs = parse_binary(p, true, ValueCheck::READ)?;
        (offset, StmtKind::Assign { lhs, rhs })
    } else {
        (start, StmtKind::Expression(lhs))
    };

    let stmt = p.stmt(offset, kind);
    p.validate_statement(&stmt)?;
    Ok(p.action(offset, ActionKind::Statement(stmt)))
}
