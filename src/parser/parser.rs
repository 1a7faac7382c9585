use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    diagnostics::diagnostics::{Diagnostic, DiagnosticKind},
    lexer::tokens::{LexicalToken, Token},
    Position, Span, MK_VIRTUAL,
};

use super::{
    lookups::{
        create_token_lookups, BindingPower, BpLookup, LedHandler, LedLookup, NudHandler,
        NudLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{
        create_token_type_lookups, TypeBpLookup, TypeLedHandler, TypeLedLookup, TypeNudHandler,
        TypeNudLookup,
    },
};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    stmt_lookup: StmtLookup,
    nud_lookup: NudLookup,
    led_lookup: LedLookup,
    binding_power_lookup: BpLookup,
    type_nud_lookup: TypeNudLookup,
    type_led_lookup: TypeLedLookup,
    type_binding_power_lookup: TypeBpLookup,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(MK_VIRTUAL!(
                LexicalToken::EOF,
                Span::empty(Position::new(0, 0))
            ));
        }
        Parser {
            tokens,
            pos: 0,
            diagnostics: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> LexicalToken {
        self.tokens[self.pos].kind
    }

    /// Consumes the current token. The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let pos = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[pos]
    }

    pub fn previous_token(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    pub fn expect_error(
        &mut self,
        expected: LexicalToken,
        error: Option<Diagnostic>,
    ) -> Result<Token, Diagnostic> {
        if self.current_token_kind() != expected {
            let token = self.current_token();
            return Err(match error {
                Some(error) => error,
                None => Diagnostic::parser(
                    DiagnosticKind::ExpectedToken {
                        expected: describe_kind(expected),
                        found: token.describe(),
                    },
                    token.span,
                ),
            });
        }
        Ok(self.advance().clone())
    }

    pub fn expect(&mut self, expected: LexicalToken) -> Result<Token, Diagnostic> {
        self.expect_error(expected, None)
    }

    /// Skips any run of newline tokens at the cursor. Used inside bracketed
    /// or explicitly continued constructs.
    pub fn ignore_newline(&mut self) {
        while self.current_token_kind() == LexicalToken::Newline {
            self.advance();
        }
    }

    /// Looks past a run of newlines; if the following token matches, both
    /// the newlines and the token are consumed. Otherwise the cursor is left
    /// untouched.
    pub fn match_ignore_newline(&mut self, expected: LexicalToken) -> Option<Token> {
        let mut index = self.pos;
        while self.tokens[index].kind == LexicalToken::Newline {
            index += 1;
        }
        if self.tokens[index].kind != expected {
            return None;
        }
        self.pos = index;
        Some(self.advance().clone())
    }

    pub fn expect_ignore_newline(&mut self, expected: LexicalToken) -> Result<Token, Diagnostic> {
        if let Some(token) = self.match_ignore_newline(expected) {
            return Ok(token);
        }
        let mut index = self.pos;
        while self.tokens[index].kind == LexicalToken::Newline {
            index += 1;
        }
        let token = &self.tokens[index];
        Err(Diagnostic::parser(
            DiagnosticKind::ExpectedToken {
                expected: describe_kind(expected),
                found: token.describe(),
            },
            token.span,
        ))
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != LexicalToken::EOF
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Panic-mode recovery: discard tokens until the next statement
    /// boundary. A trailing indented region belongs to the failed statement
    /// and is skipped wholesale.
    pub fn synchronize(&mut self) {
        trace!("synchronizing at {:?}", self.current_token().span.start);
        loop {
            match self.current_token_kind() {
                LexicalToken::EOF | LexicalToken::Outdent => return,
                LexicalToken::Newline => {
                    self.advance();
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        if self.current_token_kind() == LexicalToken::Indent {
            let mut depth = 0u32;
            loop {
                match self.current_token_kind() {
                    LexicalToken::Indent => {
                        depth += 1;
                        self.advance();
                    }
                    LexicalToken::Outdent => {
                        depth -= 1;
                        self.advance();
                        if depth == 0 {
                            break;
                        }
                    }
                    LexicalToken::EOF => break,
                    _ => {
                        self.advance();
                    }
                }
            }
        }
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NudLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LedLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BpLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNudLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLedLookup {
        &self.type_led_lookup
    }

    pub fn get_type_bp_lookup(&self) -> &TypeBpLookup {
        &self.type_binding_power_lookup
    }

    pub fn led(&mut self, kind: LexicalToken, binding_power: BindingPower, led_fn: LedHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    // A nud registration must not clobber the binding power of a token that
    // is also an infix operator, so it only fills in a missing entry.
    pub fn nud(&mut self, kind: LexicalToken, nud_fn: NudHandler) {
        self.binding_power_lookup
            .entry(kind)
            .or_insert(BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: LexicalToken, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn type_led(
        &mut self,
        kind: LexicalToken,
        binding_power: BindingPower,
        led_fn: TypeLedHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    pub fn type_nud(&mut self, kind: LexicalToken, nud_fn: TypeNudHandler) {
        self.type_binding_power_lookup
            .entry(kind)
            .or_insert(BindingPower::Primary);
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a token stream into a `Program` plus the diagnostics produced
/// along the way. The parser recovers at statement boundaries and never
/// fails as a whole.
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut body = vec![];
    while parser.has_tokens() {
        // Blank lines and recovery residue between statements.
        if matches!(
            parser.current_token_kind(),
            LexicalToken::Newline | LexicalToken::Outdent
        ) {
            parser.advance();
            continue;
        }

        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(diagnostic) => {
                parser.report(diagnostic);
                parser.synchronize();
            }
        }
    }

    let end = parser.current_token().span.end;
    let diagnostics = parser.take_diagnostics();
    debug!(
        "parsed {} top-level statements, {} diagnostics",
        body.len(),
        diagnostics.len()
    );

    let program = Program {
        body,
        span: Span::new(Position::new(0, 0), end),
    };
    (program, diagnostics)
}

fn describe_kind(kind: LexicalToken) -> String {
    let named = match kind {
        LexicalToken::Newline => "newline",
        LexicalToken::Indent => "indent",
        LexicalToken::Outdent => "outdent",
        LexicalToken::EOF => "end of file",
        LexicalToken::Identifier => "an identifier",
        LexicalToken::Number => "a number",
        LexicalToken::String => "a string",
        LexicalToken::Comment => "a comment",
        other => return format!("'{}'", lexeme_of(other)),
    };
    String::from(named)
}

fn lexeme_of(kind: LexicalToken) -> &'static str {
    match kind {
        LexicalToken::OpenParen => "(",
        LexicalToken::CloseParen => ")",
        LexicalToken::OpenBracket => "[",
        LexicalToken::CloseBracket => "]",
        LexicalToken::OpenCurly => "{",
        LexicalToken::CloseCurly => "}",
        LexicalToken::Comma => ",",
        LexicalToken::Colon => ":",
        LexicalToken::Dot => ".",
        LexicalToken::Assignment => "=",
        LexicalToken::Equals => "==",
        LexicalToken::NotEquals => "!=",
        LexicalToken::Less => "<",
        LexicalToken::LessEquals => "<=",
        LexicalToken::Greater => ">",
        LexicalToken::GreaterEquals => ">=",
        LexicalToken::Plus => "+",
        LexicalToken::Dash => "-",
        LexicalToken::Star => "*",
        LexicalToken::Slash => "/",
        LexicalToken::Percent => "%",
        LexicalToken::Exponent => "**",
        LexicalToken::IsNot => "is not",
        LexicalToken::IsLessThan => "is less than",
        LexicalToken::IsGreaterThan => "is greater than",
        LexicalToken::Var => "var",
        LexicalToken::Function => "function",
        LexicalToken::Class => "class",
        LexicalToken::Extends => "extends",
        LexicalToken::Static => "static",
        LexicalToken::Import => "import",
        LexicalToken::If => "if",
        LexicalToken::Else => "else",
        LexicalToken::Switch => "switch",
        LexicalToken::Case => "case",
        LexicalToken::Default => "default",
        LexicalToken::For => "for",
        LexicalToken::In => "in",
        LexicalToken::While => "while",
        LexicalToken::Repeat => "repeat",
        LexicalToken::Try => "try",
        LexicalToken::Catch => "catch",
        LexicalToken::Finally => "finally",
        LexicalToken::Throw => "throw",
        LexicalToken::Return => "return",
        LexicalToken::Break => "break",
        LexicalToken::Continue => "continue",
        LexicalToken::Fallthrough => "fallthrough",
        LexicalToken::New => "new",
        LexicalToken::Async => "async",
        LexicalToken::This => "this",
        LexicalToken::Super => "super",
        LexicalToken::Instanceof => "instanceof",
        LexicalToken::True => "true",
        LexicalToken::False => "false",
        LexicalToken::Null => "null",
        LexicalToken::Is => "is",
        LexicalToken::Not => "not",
        LexicalToken::And => "and",
        LexicalToken::Or => "or",
        _ => "token",
    }
}
