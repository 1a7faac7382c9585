use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BreakStmt, ClassDeclStmt, ContinueStmt, ElseBranch, EmptyVariableDeclStmt,
            ExpressionStmt, FallthroughStmt, ForStmt, FunctionDeclStmt, IfStmt, ImportDeclStmt,
            Parameter, RepeatStmt, ReturnStmt, SwitchCase, SwitchStmt, ThrowStmt, TryStmt,
            VariableDeclStmt, WhileStmt,
        },
    },
    diagnostics::diagnostics::{Diagnostic, DiagnosticKind},
    lexer::tokens::LexicalToken,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    expect_statement_end(parser)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: expression.span(),
        expression,
    }))
}

/// A simple statement ends at the line's newline. `OUTDENT` and `EOF` also
/// close it, but stay put for the enclosing block to consume.
pub fn expect_statement_end(parser: &mut Parser) -> Result<(), Diagnostic> {
    match parser.current_token_kind() {
        LexicalToken::Newline => {
            parser.advance();
            Ok(())
        }
        LexicalToken::Outdent | LexicalToken::EOF => Ok(()),
        _ => {
            let token = parser.current_token();
            Err(Diagnostic::parser(
                DiagnosticKind::ExpectedToken {
                    expected: String::from("newline"),
                    found: token.describe(),
                },
                token.span,
            ))
        }
    }
}

/// Parses an indented body: `INDENT`, one or more statements, a matching
/// `OUTDENT`. Errors inside the body are recovered locally so one bad line
/// does not lose the rest of the block.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Diagnostic> {
    parser.expect_ignore_newline(LexicalToken::Indent)?;

    let mut body = vec![];
    loop {
        match parser.current_token_kind() {
            LexicalToken::Newline => {
                parser.advance();
            }
            LexicalToken::Outdent => {
                parser.advance();
                break;
            }
            LexicalToken::EOF => break,
            _ => match parse_stmt(parser) {
                Ok(stmt) => body.push(stmt),
                Err(diagnostic) => {
                    parser.report(diagnostic);
                    parser.synchronize();
                }
            },
        }
    }

    Ok(body)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let identifier = parser.expect(LexicalToken::Identifier)?;

    let explicit_type = if parser.current_token_kind() == LexicalToken::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    if parser.current_token_kind() == LexicalToken::Assignment {
        parser.advance();
        parser.ignore_newline();
        let value = parse_expr(parser, BindingPower::Default)?;
        expect_statement_end(parser)?;

        return Ok(Stmt::VariableDecl(VariableDeclStmt {
            span: Span::new(start.span.start, value.span().end),
            identifier,
            explicit_type,
            value,
        }));
    }

    expect_statement_end(parser)?;

    let end = match &explicit_type {
        Some(annotation) => annotation.span().end,
        None => identifier.span.end,
    };
    Ok(Stmt::EmptyVariableDecl(EmptyVariableDeclStmt {
        span: Span::new(start.span.start, end),
        identifier,
        explicit_type,
    }))
}

pub fn parse_function_decl_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let identifier = parser.expect(LexicalToken::Identifier)?;

    parser.expect(LexicalToken::OpenParen)?;
    let mut parameters = vec![];
    loop {
        parser.ignore_newline();
        if parser.current_token_kind() == LexicalToken::CloseParen {
            break;
        }

        let name = parser.expect(LexicalToken::Identifier)?;
        let explicit_type = if parser.current_token_kind() == LexicalToken::Colon {
            parser.advance();
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };
        parameters.push(Parameter {
            name,
            explicit_type,
        });

        parser.ignore_newline();
        if parser.current_token_kind() == LexicalToken::Comma {
            parser.advance();
            continue;
        }
        break;
    }
    parser.expect(LexicalToken::CloseParen)?;

    let return_type = if parser.current_token_kind() == LexicalToken::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FunctionDecl(FunctionDeclStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        identifier,
        parameters,
        return_type,
        body,
    }))
}

pub fn parse_class_decl_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let identifier = parser.expect(LexicalToken::Identifier)?;

    let extends = if parser.current_token_kind() == LexicalToken::Extends {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect_ignore_newline(LexicalToken::Indent)?;

    let mut static_body = vec![];
    let mut instance_body = vec![];
    loop {
        match parser.current_token_kind() {
            LexicalToken::Newline => {
                parser.advance();
            }
            LexicalToken::Outdent => {
                parser.advance();
                break;
            }
            LexicalToken::EOF => break,
            _ => {
                let is_static = if parser.current_token_kind() == LexicalToken::Static {
                    parser.advance();
                    true
                } else {
                    false
                };

                // Anything statement-shaped is accepted here; the linter
                // flags non-declarations.
                match parse_stmt(parser) {
                    Ok(member) => {
                        if is_static {
                            static_body.push(member);
                        } else {
                            instance_body.push(member);
                        }
                    }
                    Err(diagnostic) => {
                        parser.report(diagnostic);
                        parser.synchronize();
                    }
                }
            }
        }
    }

    Ok(Stmt::ClassDecl(ClassDeclStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        identifier,
        extends,
        static_body,
        instance_body,
    }))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();

    let mut path = vec![parser.expect(LexicalToken::Identifier)?];
    while parser.current_token_kind() == LexicalToken::Dot {
        parser.advance();
        path.push(parser.expect(LexicalToken::Identifier)?);
    }

    expect_statement_end(parser)?;

    let end = path[path.len() - 1].span.end;
    Ok(Stmt::ImportDecl(ImportDeclStmt {
        span: Span::new(start.span.start, end),
        path,
    }))
}

fn parse_if_chain(parser: &mut Parser) -> Result<IfStmt, Diagnostic> {
    let start = parser.advance().clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.current_token_kind() == LexicalToken::Else {
        parser.advance();
        if parser.current_token_kind() == LexicalToken::If {
            let nested = parse_if_chain(parser)?;
            Some(ElseBranch::If(Box::new(Stmt::If(nested))))
        } else {
            Some(ElseBranch::Block(parse_block(parser)?))
        }
    } else {
        None
    };

    Ok(IfStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        condition,
        then_body,
        else_body,
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    Ok(Stmt::If(parse_if_chain(parser)?))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let discriminant = parse_expr(parser, BindingPower::Default)?;

    parser.expect_ignore_newline(LexicalToken::Indent)?;

    let mut cases = vec![];
    let mut default_body = None;
    loop {
        match parser.current_token_kind() {
            LexicalToken::Newline => {
                parser.advance();
            }
            LexicalToken::Outdent => {
                parser.advance();
                break;
            }
            LexicalToken::EOF => break,
            LexicalToken::Case => {
                let case_start = parser.advance().clone();
                let test = parse_expr(parser, BindingPower::Default)?;
                let body = parse_block(parser)?;
                cases.push(SwitchCase {
                    span: Span::new(case_start.span.start, parser.previous_token().span.end),
                    test,
                    body,
                });
            }
            LexicalToken::Default => {
                parser.advance();
                default_body = Some(parse_block(parser)?);
            }
            _ => {
                let token = parser.current_token();
                let diagnostic = Diagnostic::parser(
                    DiagnosticKind::ExpectedToken {
                        expected: String::from("'case'"),
                        found: token.describe(),
                    },
                    token.span,
                );
                parser.report(diagnostic);
                parser.synchronize();
            }
        }
    }

    let span = Span::new(start.span.start, parser.previous_token().span.end);
    if cases.is_empty() {
        parser.report(Diagnostic::parser(DiagnosticKind::SwitchWithoutCase, span));
    }

    Ok(Stmt::Switch(SwitchStmt {
        span,
        discriminant,
        cases,
        default_body,
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let binding = parser.expect(LexicalToken::Identifier)?;
    parser.expect(LexicalToken::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        binding,
        iterable,
        body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        condition,
        body,
    }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let count = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::Repeat(RepeatStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        count,
        body,
    }))
}

pub fn parse_try_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let body = parse_block(parser)?;

    parser.expect(LexicalToken::Catch)?;
    let catch_binding = parser.expect(LexicalToken::Identifier)?;
    let catch_body = parse_block(parser)?;

    let finally_body = if parser.current_token_kind() == LexicalToken::Finally {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Stmt::Try(TryStmt {
        span: Span::new(start.span.start, parser.previous_token().span.end),
        body,
        catch_binding,
        catch_body,
        finally_body,
    }))
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();
    let value = parse_expr(parser, BindingPower::Default)?;
    expect_statement_end(parser)?;

    Ok(Stmt::Throw(ThrowStmt {
        span: Span::new(start.span.start, value.span().end),
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = parser.advance().clone();

    let value = if matches!(
        parser.current_token_kind(),
        LexicalToken::Newline | LexicalToken::Outdent | LexicalToken::EOF
    ) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    expect_statement_end(parser)?;

    let end = match &value {
        Some(expression) => expression.span().end,
        None => start.span.end,
    };
    Ok(Stmt::Return(ReturnStmt {
        span: Span::new(start.span.start, end),
        value,
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let token = parser.advance().clone();
    expect_statement_end(parser)?;
    Ok(Stmt::Break(BreakStmt { span: token.span }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let token = parser.advance().clone();
    expect_statement_end(parser)?;
    Ok(Stmt::Continue(ContinueStmt { span: token.span }))
}

pub fn parse_fallthrough_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let token = parser.advance().clone();
    expect_statement_end(parser)?;
    Ok(Stmt::Fallthrough(FallthroughStmt { span: token.span }))
}
