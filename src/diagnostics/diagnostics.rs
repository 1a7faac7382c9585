use std::fmt::Display;

use thiserror::Error;

use crate::Span;

/// Severity of a diagnostic. The front-end never filters by level; callers
/// treating any `Error` as fatal are in the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
}

/// The pipeline stage a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Tokenizer,
    Parser,
    Linter,
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Tokenizer => write!(f, "tokenizer"),
            Source::Parser => write!(f, "parser"),
            Source::Linter => write!(f, "linter"),
        }
    }
}

/// A secondary note attached to a diagnostic, pointing at a related span.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub message: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    pub level: Level,
    pub source: Source,
    pub span: Span,
    pub info: Vec<Annotation>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, level: Level, source: Source, span: Span) -> Self {
        Diagnostic {
            kind,
            level,
            source,
            span,
            info: vec![],
        }
    }

    pub fn tokenizer(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic::new(kind, Level::Error, Source::Tokenizer, span)
    }

    pub fn parser(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic::new(kind, Level::Error, Source::Parser, span)
    }

    pub fn linter(level: Level, message: String, span: Span) -> Self {
        Diagnostic::new(DiagnosticKind::RuleViolation { message }, level, Source::Linter, span)
    }

    /// Attaches an `info` annotation pointing at a related prior span.
    pub fn with_info(mut self, message: impl Into<String>, span: Span) -> Self {
        self.info.push(Annotation {
            message: message.into(),
            span,
        });
        self
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    /// The user-facing message for this diagnostic.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("Unexpected character {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("'less' must come after 'is'")]
    BareLess,
    #[error("'greater' must come after 'is'")]
    BareGreater,
    #[error("'than' must come after 'is less' or 'is greater'")]
    BareThan,
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Indentation must use tabs, not spaces")]
    SpaceIndentation,
    #[error("Expected {expected} but found {found}")]
    ExpectedToken { expected: String, found: String },
    #[error("Unexpected token {token}")]
    UnexpectedToken { token: String },
    #[error("Cannot assign to this expression")]
    InvalidAssignmentTarget,
    #[error("'new' expects a class name or a member path")]
    InvalidConstructorPath,
    #[error("Expected a 'case' inside this switch")]
    SwitchWithoutCase,
    #[error("{message}")]
    RuleViolation { message: String },
}
