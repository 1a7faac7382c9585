use std::collections::HashMap;

use crate::{
    ast::types::{GenericType, MemberType, SymbolType, TypeExpr},
    diagnostics::diagnostics::{Diagnostic, DiagnosticKind},
    lexer::tokens::LexicalToken,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub type TypeNudHandler = fn(&mut Parser) -> Result<TypeExpr, Diagnostic>;
pub type TypeLedHandler = fn(&mut Parser, TypeExpr, BindingPower) -> Result<TypeExpr, Diagnostic>;

// Lookup tables for the type grammar, parallel to the expression ones
pub type TypeNudLookup = HashMap<LexicalToken, TypeNudHandler>;
pub type TypeLedLookup = HashMap<LexicalToken, TypeLedHandler>;
pub type TypeBpLookup = HashMap<LexicalToken, BindingPower>;

pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(LexicalToken::Identifier, parse_symbol_type);
    parser.type_led(LexicalToken::Dot, BindingPower::Member, parse_member_type);
    parser.type_led(LexicalToken::Less, BindingPower::Call, parse_generic_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeExpr, Diagnostic> {
    let name = parser.expect(LexicalToken::Identifier)?;
    Ok(TypeExpr::Symbol(SymbolType {
        span: name.span,
        name,
    }))
}

pub fn parse_member_type(
    parser: &mut Parser,
    left: TypeExpr,
    _bp: BindingPower,
) -> Result<TypeExpr, Diagnostic> {
    parser.advance();
    let property = parser.expect(LexicalToken::Identifier)?;

    Ok(TypeExpr::Member(MemberType {
        span: Span::new(left.span().start, property.span.end),
        object: Box::new(left),
        property,
    }))
}

pub fn parse_generic_type(
    parser: &mut Parser,
    left: TypeExpr,
    _bp: BindingPower,
) -> Result<TypeExpr, Diagnostic> {
    parser.advance();

    let mut arguments = vec![parse_type(parser, BindingPower::Default)?];
    while parser.current_token_kind() == LexicalToken::Comma {
        parser.advance();
        arguments.push(parse_type(parser, BindingPower::Default)?);
    }
    let close = parser.expect(LexicalToken::Greater)?;

    Ok(TypeExpr::Generic(GenericType {
        span: Span::new(left.span().start, close.span.end),
        base: Box::new(left),
        arguments,
    }))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeExpr, Diagnostic> {
    // First parse NUD
    let kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&kind) {
        Some(handler) => *handler,
        None => {
            let token = parser.current_token();
            return Err(Diagnostic::parser(
                DiagnosticKind::ExpectedToken {
                    expected: String::from("a type name"),
                    found: token.describe(),
                },
                token.span,
            ));
        }
    };
    let mut left = nud(parser)?;

    loop {
        let kind = parser.current_token_kind();
        let power = match parser.get_type_bp_lookup().get(&kind) {
            Some(power) => *power,
            None => break,
        };
        if power <= bp {
            break;
        }
        let led = match parser.get_type_led_lookup().get(&kind) {
            Some(handler) => *handler,
            None => break,
        };
        left = led(parser, left, power)?;
    }

    Ok(left)
}
