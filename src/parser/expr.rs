use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, AsyncExpr, BinaryExpr, CallExpr, IdentifierExpr, IndexExpr,
            InstanceOfExpr, LiteralExpr, MemberExpr, NewExpr, ObjectExpr, SuperExpr, ThisExpr,
            UnaryExpr, WrappedExpr,
        },
    },
    diagnostics::diagnostics::{Diagnostic, DiagnosticKind},
    lexer::tokens::{LexicalToken, Token},
    Span,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    // First parse NUD
    let kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&kind) {
        Some(handler) => *handler,
        None => {
            let token = parser.current_token();
            return Err(Diagnostic::parser(
                DiagnosticKind::UnexpectedToken {
                    token: token.describe(),
                },
                token.span,
            ));
        }
    };
    let mut left = nud(parser)?;

    // While the current token binds tighter than the requested power, keep
    // extending the left-hand side.
    loop {
        let kind = parser.current_token_kind();
        let power = match parser.get_bp_lookup().get(&kind) {
            Some(power) => *power,
            None => break,
        };
        if power <= bp {
            break;
        }
        let led = match parser.get_led_lookup().get(&kind) {
            Some(handler) => *handler,
            None => {
                let token = parser.current_token();
                return Err(Diagnostic::parser(
                    DiagnosticKind::UnexpectedToken {
                        token: token.describe(),
                    },
                    token.span,
                ));
            }
        };
        left = led(parser, left, power)?;
    }

    Ok(left)
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.advance().clone();
    Ok(Expr::Literal(LiteralExpr {
        kind: token.kind,
        lexeme: token.lexeme,
        span: token.span,
    }))
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.advance().clone();
    Ok(Expr::Identifier(IdentifierExpr {
        name: token.lexeme,
        span: token.span,
    }))
}

pub fn parse_this_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.advance().clone();
    Ok(Expr::This(ThisExpr { span: token.span }))
}

pub fn parse_super_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.advance().clone();
    Ok(Expr::Super(SuperExpr { span: token.span }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let operator = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span::new(operator.span.start, operand.span().end),
        operator,
        operand: Box::new(operand),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let operator = parser.advance().clone();
    // An operator at end of line continues onto the next one.
    parser.ignore_newline();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span::new(left.span().start, right.span().end),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

// Right-associative: the right-hand side is parsed one level below the
// operator's own power so another `**` keeps binding to the right.
pub fn parse_exponent_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let operator = parser.advance().clone();
    parser.ignore_newline();
    let right = parse_expr(parser, BindingPower::Multiplicative)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span::new(left.span().start, right.span().end),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    if !matches!(left, Expr::Identifier(_) | Expr::Member(_) | Expr::Index(_)) {
        parser.report(Diagnostic::parser(
            DiagnosticKind::InvalidAssignmentTarget,
            left.span(),
        ));
    }

    let operator = parser.advance().clone();
    parser.ignore_newline();
    // Right-associative: `a = b = c` assigns `b = c` first.
    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span::new(left.span().start, right.span().end),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_wrapped_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let open = parser.advance().clone();
    parser.ignore_newline();
    let expression = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect_ignore_newline(LexicalToken::CloseParen)?;

    Ok(Expr::Wrapped(WrappedExpr {
        expression: Box::new(expression),
        span: Span::new(open.span.start, close.span.end),
    }))
}

/// Parses a comma-separated expression list up to `close`, tolerating
/// newlines anywhere between the items. Returns the items and the closing
/// token.
pub fn parse_expression_list(
    parser: &mut Parser,
    close: LexicalToken,
) -> Result<(Vec<Expr>, Token), Diagnostic> {
    let mut items = vec![];
    parser.ignore_newline();

    loop {
        if parser.current_token_kind() == close {
            return Ok((items, parser.advance().clone()));
        }

        items.push(parse_expr(parser, BindingPower::Default)?);
        parser.ignore_newline();

        if parser.current_token_kind() == LexicalToken::Comma {
            parser.advance();
            parser.ignore_newline();
            continue;
        }

        let token = parser.expect(close)?;
        return Ok((items, token));
    }
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.advance();

    let (arguments, close) = parse_expression_list(parser, LexicalToken::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span::new(left.span().start, close.span.end),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.advance();
    parser.ignore_newline();
    let index = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect_ignore_newline(LexicalToken::CloseBracket)?;

    Ok(Expr::Index(IndexExpr {
        span: Span::new(left.span().start, close.span.end),
        object: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.advance();
    let property = parser.expect(LexicalToken::Identifier)?;

    Ok(Expr::Member(MemberExpr {
        span: Span::new(left.span().start, property.span.end),
        object: Box::new(left),
        property,
    }))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let open = parser.advance().clone();
    let (elements, close) = parse_expression_list(parser, LexicalToken::CloseBracket)?;

    Ok(Expr::Array(ArrayExpr {
        elements,
        span: Span::new(open.span.start, close.span.end),
    }))
}

pub fn parse_object_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let open = parser.advance().clone();
    let mut entries = vec![];
    parser.ignore_newline();

    let close = loop {
        if parser.current_token_kind() == LexicalToken::CloseCurly {
            break parser.advance().clone();
        }

        let key = parser.expect(LexicalToken::Identifier)?;
        parser.expect(LexicalToken::Colon)?;
        parser.ignore_newline();
        let value = parse_expr(parser, BindingPower::Default)?;
        entries.push((key, value));
        parser.ignore_newline();

        if parser.current_token_kind() == LexicalToken::Comma {
            parser.advance();
            parser.ignore_newline();
            continue;
        }

        break parser.expect(LexicalToken::CloseCurly)?;
    };

    Ok(Expr::Object(ObjectExpr {
        entries,
        span: Span::new(open.span.start, close.span.end),
    }))
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    // new Point<Float>(1, 2)
    let keyword = parser.advance().clone();

    // Member power excludes calls, so the object stays a bare name or a
    // dotted path.
    let object = parse_expr(parser, BindingPower::Call)?;
    if !is_constructor_path(&object) {
        parser.report(Diagnostic::parser(
            DiagnosticKind::InvalidConstructorPath,
            object.span(),
        ));
    }

    let mut generics = vec![];
    if parser.current_token_kind() == LexicalToken::Less {
        parser.advance();
        loop {
            generics.push(parse_type(parser, BindingPower::Default)?);
            if parser.current_token_kind() == LexicalToken::Comma {
                parser.advance();
                continue;
            }
            break;
        }
        parser.expect(LexicalToken::Greater)?;
    }

    if parser.current_token_kind() != LexicalToken::OpenParen {
        let token = parser.current_token();
        return Err(Diagnostic::parser(
            DiagnosticKind::ExpectedToken {
                expected: String::from("'('"),
                found: token.describe(),
            },
            token.span,
        )
        .with_info("Add a '(' after this class expression", object.span()));
    }
    parser.advance();
    let (arguments, close) = parse_expression_list(parser, LexicalToken::CloseParen)?;

    Ok(Expr::New(NewExpr {
        span: Span::new(keyword.span.start, close.span.end),
        object: Box::new(object),
        generics,
        arguments,
    }))
}

fn is_constructor_path(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) => true,
        Expr::Member(member) => is_constructor_path(&member.object),
        _ => false,
    }
}

pub fn parse_async_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let keyword = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Instance)?;

    Ok(Expr::Async(AsyncExpr {
        span: Span::new(keyword.span.start, operand.span().end),
        operand: Box::new(operand),
    }))
}

pub fn parse_instanceof_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.advance();
    let target = parse_type(parser, BindingPower::Default)?;

    Ok(Expr::InstanceOf(InstanceOfExpr {
        span: Span::new(left.span().start, target.span().end),
        object: Box::new(left),
        target,
    }))
}
