pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod linter;
pub mod macros;
pub mod parser;

extern crate regex;

use diagnostics::diagnostics::Diagnostic;

/// A source location as a `(line, column)` pair, both 0-based. Columns are
/// byte offsets into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// A half-open `[start, end)` range of positions. Virtual tokens may carry
/// an empty span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn empty(at: Position) -> Self {
        Span { start: at, end: at }
    }

    pub fn contains(&self, other: &Span) -> bool {
        let before = |a: &Position, b: &Position| {
            a.line < b.line || (a.line == b.line && a.column <= b.column)
        };
        before(&self.start, &other.start) && before(&other.end, &self.end)
    }
}

/// Runs the whole front-end over a source string: tokenize, parse, then lint
/// with the built-in rules. Diagnostics are concatenated in pipeline order.
pub fn compile_front_end(source: &str) -> (ast::ast::Program, Vec<Diagnostic>) {
    let (tokens, _comments, mut diagnostics) = lexer::lexer::tokenize(source);
    let (program, parser_diagnostics) = parser::parser::parse(tokens);
    diagnostics.extend(parser_diagnostics);
    diagnostics.extend(linter::lint(&program, linter::rules::default_rules()));
    (program, diagnostics)
}
