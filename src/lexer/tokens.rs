use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref WORD_TOKENS: HashMap<&'static str, LexicalToken> = {
        let mut map = HashMap::new();
        map.insert("var", LexicalToken::Var);
        map.insert("function", LexicalToken::Function);
        map.insert("class", LexicalToken::Class);
        map.insert("extends", LexicalToken::Extends);
        map.insert("static", LexicalToken::Static);
        map.insert("import", LexicalToken::Import);
        map.insert("if", LexicalToken::If);
        map.insert("else", LexicalToken::Else);
        map.insert("switch", LexicalToken::Switch);
        map.insert("case", LexicalToken::Case);
        map.insert("default", LexicalToken::Default);
        map.insert("for", LexicalToken::For);
        map.insert("in", LexicalToken::In);
        map.insert("while", LexicalToken::While);
        map.insert("repeat", LexicalToken::Repeat);
        map.insert("try", LexicalToken::Try);
        map.insert("catch", LexicalToken::Catch);
        map.insert("finally", LexicalToken::Finally);
        map.insert("throw", LexicalToken::Throw);
        map.insert("return", LexicalToken::Return);
        map.insert("break", LexicalToken::Break);
        map.insert("continue", LexicalToken::Continue);
        map.insert("fallthrough", LexicalToken::Fallthrough);
        map.insert("new", LexicalToken::New);
        map.insert("async", LexicalToken::Async);
        map.insert("this", LexicalToken::This);
        map.insert("super", LexicalToken::Super);
        map.insert("instanceof", LexicalToken::Instanceof);
        map.insert("true", LexicalToken::True);
        map.insert("false", LexicalToken::False);
        map.insert("null", LexicalToken::Null);
        map.insert("is", LexicalToken::Is);
        map.insert("not", LexicalToken::Not);
        map.insert("and", LexicalToken::And);
        map.insert("or", LexicalToken::Or);
        map
    };

    /// Operator and punctuation table, tried in order. Longer lexemes come
    /// first so `**`, `==`, `<=` win over their one-byte prefixes.
    pub static ref CHAR_TOKENS: Vec<(&'static str, LexicalToken)> = vec![
        ("**", LexicalToken::Exponent),
        ("==", LexicalToken::Equals),
        ("!=", LexicalToken::NotEquals),
        ("<=", LexicalToken::LessEquals),
        (">=", LexicalToken::GreaterEquals),
        ("(", LexicalToken::OpenParen),
        (")", LexicalToken::CloseParen),
        ("[", LexicalToken::OpenBracket),
        ("]", LexicalToken::CloseBracket),
        ("{", LexicalToken::OpenCurly),
        ("}", LexicalToken::CloseCurly),
        (",", LexicalToken::Comma),
        (":", LexicalToken::Colon),
        (".", LexicalToken::Dot),
        ("=", LexicalToken::Assignment),
        ("<", LexicalToken::Less),
        (">", LexicalToken::Greater),
        ("+", LexicalToken::Plus),
        ("-", LexicalToken::Dash),
        ("*", LexicalToken::Star),
        ("/", LexicalToken::Slash),
        ("%", LexicalToken::Percent),
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LexicalToken {
    EOF,
    Number,
    String,
    Comment,
    Identifier,

    // Virtual structure markers
    Newline,
    Indent,
    Outdent,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Comma,
    Colon,
    Dot,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Exponent, // **

    // Multi-word comparison operators
    IsNot,
    IsLessThan,
    IsGreaterThan,

    // Reserved words
    Var,
    Function,
    Class,
    Extends,
    Static,
    Import,
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    In,
    While,
    Repeat,
    Try,
    Catch,
    Finally,
    Throw,
    Return,
    Break,
    Continue,
    Fallthrough,
    New,
    Async,
    This,
    Super,
    Instanceof,
    True,
    False,
    Null,
    Is,
    Not,
    And,
    Or,
}

impl Display for LexicalToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: LexicalToken,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// A short description used in diagnostics. Virtual tokens have empty
    /// lexemes, so they are named instead of quoted.
    pub fn describe(&self) -> String {
        match self.kind {
            LexicalToken::Newline => String::from("newline"),
            LexicalToken::Indent => String::from("indent"),
            LexicalToken::Outdent => String::from("outdent"),
            LexicalToken::EOF => String::from("end of file"),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{ kind: {}, lexeme: {:?} }}", self.kind, self.lexeme)
    }
}
