//! Utility macros for the front-end.
//!
//! This module defines helper macros used throughout the tokenizer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_VIRTUAL!` - Creates a virtual token (empty lexeme) at a span
//!
//! These macros reduce boilerplate in the tokenizer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The LexicalToken
/// * `$lexeme` - The exact source substring the token covers
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(LexicalToken::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
        }
    };
}

/// Creates a virtual token (`NEWLINE`, `INDENT`, `OUTDENT`, `EOF`) carrying
/// an empty lexeme.
#[macro_export]
macro_rules! MK_VIRTUAL {
    ($kind:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: String::new(),
            span: $span,
        }
    };
}
