use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind};
use crate::{Position, Span, MK_TOKEN, MK_VIRTUAL};

use super::tokens::{LexicalToken, Token, CHAR_TOKENS, WORD_TOKENS};

pub type PatternHandler = fn(&mut Tokenizer, &Regex);

struct RegexPattern {
    regex: Regex,
    handler: PatternHandler,
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern {
            regex: Regex::new(r"^[A-Za-z_]\w*").unwrap(),
            handler: word_handler,
        },
        RegexPattern {
            regex: Regex::new(r"^\d(\d|_)*(\.\d(\d|_)*)?").unwrap(),
            handler: number_handler,
        },
        RegexPattern {
            regex: Regex::new(r"^'").unwrap(),
            handler: string_handler,
        },
        RegexPattern {
            regex: Regex::new(r"^#").unwrap(),
            handler: comment_handler,
        },
    ];
    static ref STRING_LITERAL: Regex = Regex::new(r"^'([^'\\]|\\.)*'").unwrap();
    static ref IS_OPERATOR: Regex =
        Regex::new(r"^is[ \t]+(not|(less|greater)[ \t]+than)\b").unwrap();
}

pub struct Tokenizer {
    tokens: Vec<Token>,
    comments: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    line: String,
    row: u32,
    col: u32,
    depth: u32,
    newline_anchor: u32,
}

impl Tokenizer {
    fn new() -> Tokenizer {
        Tokenizer {
            tokens: vec![],
            comments: vec![],
            diagnostics: vec![],
            line: String::new(),
            row: 0,
            col: 0,
            depth: 0,
            newline_anchor: 0,
        }
    }

    pub fn remainder(&self) -> &str {
        &self.line[self.col as usize..]
    }

    pub fn advance_n(&mut self, n: u32) {
        self.col += n;
    }

    pub fn push(&mut self, token: Token) {
        self.newline_anchor = token.span.end.column;
        self.tokens.push(token);
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn span_here(&self, length: u32) -> Span {
        Span::new(
            Position::new(self.row, self.col),
            Position::new(self.row, self.col + length),
        )
    }

    fn process_line(&mut self, raw: &str, row: u32) {
        self.row = row;
        self.line = raw.strip_suffix('\r').unwrap_or(raw).to_string();

        let mut tabs = 0u32;
        let mut content_start = 0usize;
        let mut saw_space = false;
        for ch in self.line.chars() {
            match ch {
                '\t' => {
                    tabs += 1;
                    content_start += 1;
                }
                ' ' => {
                    saw_space = true;
                    content_start += 1;
                }
                _ => break,
            }
        }

        // Blank lines produce no tokens at all, not even indent markers.
        if content_start == self.line.len() {
            return;
        }

        // A line opening with '#' contributes a single out-of-band comment.
        if self.line.as_bytes()[content_start] == b'#' {
            self.col = content_start as u32;
            consume_comment(self);
            return;
        }

        if saw_space {
            self.report(Diagnostic::tokenizer(
                DiagnosticKind::SpaceIndentation,
                Span::new(Position::new(row, 0), Position::new(row, content_start as u32)),
            ));
        }

        if tabs > self.depth {
            let count = tabs - self.depth;
            let span = Span::new(Position::new(row, 0), Position::new(row, count));
            for _ in 0..count {
                self.tokens.push(MK_VIRTUAL!(LexicalToken::Indent, span));
            }
        } else if tabs < self.depth {
            let count = self.depth - tabs;
            let span = Span::new(Position::new(row, 0), Position::new(row, tabs));
            for _ in 0..count {
                self.tokens.push(MK_VIRTUAL!(LexicalToken::Outdent, span));
            }
        }
        self.depth = tabs;

        self.col = content_start as u32;
        self.newline_anchor = content_start as u32;
        self.scan_line();

        self.tokens.push(MK_VIRTUAL!(
            LexicalToken::Newline,
            Span::empty(Position::new(row, self.newline_anchor))
        ));
    }

    fn scan_line(&mut self) {
        while (self.col as usize) < self.line.len() {
            let ch = match self.remainder().chars().next() {
                Some(ch) => ch,
                None => break,
            };

            if ch == ' ' || ch == '\t' {
                self.col += 1;
                continue;
            }

            let matched = PATTERNS
                .iter()
                .position(|pattern| pattern.regex.is_match(self.remainder()));
            if let Some(index) = matched {
                let pattern = &PATTERNS[index];
                (pattern.handler)(self, &pattern.regex);
                continue;
            }

            let symbol = CHAR_TOKENS
                .iter()
                .find(|(lexeme, _)| self.remainder().starts_with(lexeme))
                .copied();
            if let Some((lexeme, kind)) = symbol {
                let span = self.span_here(lexeme.len() as u32);
                self.push(MK_TOKEN!(kind, String::from(lexeme), span));
                self.advance_n(lexeme.len() as u32);
                continue;
            }

            let span = self.span_here(ch.len_utf8() as u32);
            self.report(Diagnostic::tokenizer(
                DiagnosticKind::UnexpectedCharacter { character: ch },
                span,
            ));
            self.advance_n(ch.len_utf8() as u32);
        }
    }
}

fn word_handler(tokenizer: &mut Tokenizer, regex: &Regex) {
    let word = match regex.find(tokenizer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => return,
    };

    // 'is' may open a multi-word operator spanning several whitespace-joined
    // words on the same line.
    if word == "is" {
        if let Some(extended) = IS_OPERATOR.find(tokenizer.remainder()) {
            let lexeme = extended.as_str().to_string();
            let length = lexeme.len() as u32;
            let kind = if lexeme.ends_with("not") {
                LexicalToken::IsNot
            } else if lexeme.contains("less") {
                LexicalToken::IsLessThan
            } else {
                LexicalToken::IsGreaterThan
            };
            let span = tokenizer.span_here(length);
            tokenizer.push(MK_TOKEN!(kind, lexeme, span));
            tokenizer.advance_n(length);
            return;
        }
    }

    let length = word.len() as u32;
    let span = tokenizer.span_here(length);

    let guard = match word.as_str() {
        "less" => Some(DiagnosticKind::BareLess),
        "greater" => Some(DiagnosticKind::BareGreater),
        "than" => Some(DiagnosticKind::BareThan),
        _ => None,
    };
    if let Some(kind) = guard {
        tokenizer.report(Diagnostic::tokenizer(kind, span));
        tokenizer.advance_n(length);
        return;
    }

    let kind = WORD_TOKENS
        .get(word.as_str())
        .copied()
        .unwrap_or(LexicalToken::Identifier);
    tokenizer.push(MK_TOKEN!(kind, word, span));
    tokenizer.advance_n(length);
}

fn number_handler(tokenizer: &mut Tokenizer, regex: &Regex) {
    let lexeme = match regex.find(tokenizer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => return,
    };
    let length = lexeme.len() as u32;
    let span = tokenizer.span_here(length);
    tokenizer.push(MK_TOKEN!(LexicalToken::Number, lexeme, span));
    tokenizer.advance_n(length);
}

fn string_handler(tokenizer: &mut Tokenizer, _regex: &Regex) {
    match STRING_LITERAL.find(tokenizer.remainder()) {
        Some(matched) => {
            let lexeme = matched.as_str().to_string();
            let length = lexeme.len() as u32;
            let span = tokenizer.span_here(length);
            tokenizer.push(MK_TOKEN!(LexicalToken::String, lexeme, span));
            tokenizer.advance_n(length);
        }
        None => {
            let length = tokenizer.remainder().len() as u32;
            let span = tokenizer.span_here(length);
            tokenizer.report(Diagnostic::tokenizer(DiagnosticKind::UnterminatedString, span));
            tokenizer.advance_n(length);
        }
    }
}

fn comment_handler(tokenizer: &mut Tokenizer, _regex: &Regex) {
    consume_comment(tokenizer);
}

fn consume_comment(tokenizer: &mut Tokenizer) {
    let lexeme = tokenizer.remainder().to_string();
    let length = lexeme.len() as u32;
    let span = tokenizer.span_here(length);
    tokenizer.comments.push(MK_TOKEN!(LexicalToken::Comment, lexeme, span));
    tokenizer.advance_n(length);
}

/// Tokenizes a source string into `(tokens, comments, diagnostics)`.
///
/// The token stream always ends in a single `EOF`, indent markers are
/// balanced, and comments never appear in the token stream. Bad input is
/// recorded as a diagnostic and scanning continues.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Token>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new();

    let mut rows = 0u32;
    for (row, raw) in source.split('\n').enumerate() {
        tokenizer.process_line(raw, row as u32);
        rows = row as u32 + 1;
    }

    let at = Position::new(rows, 0);
    for _ in 0..tokenizer.depth {
        tokenizer.tokens.push(MK_VIRTUAL!(LexicalToken::Outdent, Span::empty(at)));
    }
    tokenizer.tokens.push(MK_VIRTUAL!(LexicalToken::EOF, Span::empty(at)));

    debug!(
        "tokenized {} tokens, {} comments, {} diagnostics",
        tokenizer.tokens.len(),
        tokenizer.comments.len(),
        tokenizer.diagnostics.len()
    );

    (tokenizer.tokens, tokenizer.comments, tokenizer.diagnostics)
}
