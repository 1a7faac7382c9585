use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    diagnostics::diagnostics::Diagnostic,
    lexer::tokens::LexicalToken,
};

use super::{expr::*, parser::Parser, stmt::*};

/// The precedence ladder, low to high. The expression driver consumes infix
/// forms whose power is strictly greater than the requested minimum.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Comparison,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
    Instance,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Diagnostic>;
pub type NudHandler = fn(&mut Parser) -> Result<Expr, Diagnostic>;
pub type LedHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Diagnostic>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment is right-associative; its handler recurses below its own
    // power.
    parser.led(LexicalToken::Assignment, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(LexicalToken::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(LexicalToken::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality
    parser.led(LexicalToken::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(LexicalToken::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(LexicalToken::Is, BindingPower::Equality, parse_binary_expr);
    parser.led(LexicalToken::IsNot, BindingPower::Equality, parse_binary_expr);

    // Comparison
    parser.led(LexicalToken::Less, BindingPower::Comparison, parse_binary_expr);
    parser.led(LexicalToken::LessEquals, BindingPower::Comparison, parse_binary_expr);
    parser.led(LexicalToken::Greater, BindingPower::Comparison, parse_binary_expr);
    parser.led(LexicalToken::GreaterEquals, BindingPower::Comparison, parse_binary_expr);
    parser.led(LexicalToken::IsLessThan, BindingPower::Comparison, parse_binary_expr);
    parser.led(LexicalToken::IsGreaterThan, BindingPower::Comparison, parse_binary_expr);

    // Additive and multiplicative
    parser.led(LexicalToken::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(LexicalToken::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(LexicalToken::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(LexicalToken::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(LexicalToken::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Exponent is right-associative
    parser.led(LexicalToken::Exponent, BindingPower::Exponent, parse_exponent_expr);

    parser.led(LexicalToken::Instanceof, BindingPower::Instance, parse_instanceof_expr);

    // Call and index
    parser.led(LexicalToken::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(LexicalToken::OpenBracket, BindingPower::Call, parse_index_expr);

    // Member
    parser.led(LexicalToken::Dot, BindingPower::Member, parse_member_expr);

    // Literals and symbols
    parser.nud(LexicalToken::Number, parse_literal_expr);
    parser.nud(LexicalToken::String, parse_literal_expr);
    parser.nud(LexicalToken::True, parse_literal_expr);
    parser.nud(LexicalToken::False, parse_literal_expr);
    parser.nud(LexicalToken::Null, parse_literal_expr);
    parser.nud(LexicalToken::Identifier, parse_identifier_expr);
    parser.nud(LexicalToken::This, parse_this_expr);
    parser.nud(LexicalToken::Super, parse_super_expr);
    parser.nud(LexicalToken::Dash, parse_prefix_expr);
    parser.nud(LexicalToken::Not, parse_prefix_expr);
    parser.nud(LexicalToken::OpenParen, parse_wrapped_expr);
    parser.nud(LexicalToken::OpenBracket, parse_array_expr);
    parser.nud(LexicalToken::OpenCurly, parse_object_expr);
    parser.nud(LexicalToken::New, parse_new_expr);
    parser.nud(LexicalToken::Async, parse_async_expr);

    // Statements
    parser.stmt(LexicalToken::Var, parse_var_decl_stmt);
    parser.stmt(LexicalToken::Function, parse_function_decl_stmt);
    parser.stmt(LexicalToken::Class, parse_class_decl_stmt);
    parser.stmt(LexicalToken::Import, parse_import_stmt);
    parser.stmt(LexicalToken::If, parse_if_stmt);
    parser.stmt(LexicalToken::Switch, parse_switch_stmt);
    parser.stmt(LexicalToken::For, parse_for_stmt);
    parser.stmt(LexicalToken::While, parse_while_stmt);
    parser.stmt(LexicalToken::Repeat, parse_repeat_stmt);
    parser.stmt(LexicalToken::Try, parse_try_stmt);
    parser.stmt(LexicalToken::Throw, parse_throw_stmt);
    parser.stmt(LexicalToken::Return, parse_return_stmt);
    parser.stmt(LexicalToken::Break, parse_break_stmt);
    parser.stmt(LexicalToken::Continue, parse_continue_stmt);
    parser.stmt(LexicalToken::Fallthrough, parse_fallthrough_stmt);
}

// Lookup tables inside the parser struct, so registration stays in one place
pub type StmtLookup = HashMap<LexicalToken, StmtHandler>;
pub type NudLookup = HashMap<LexicalToken, NudHandler>;
pub type LedLookup = HashMap<LexicalToken, LedHandler>;
pub type BpLookup = HashMap<LexicalToken, BindingPower>;
