use crate::{
    lexer::tokens::{LexicalToken, Token},
    Span,
};

use super::{ast::Expr, types::TypeExpr};

// LITERALS

/// Literal Expression
/// A number, string, `true`, `false`, or `null`. The lexeme is the exact
/// source text of the literal.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub kind: LexicalToken,
    pub lexeme: String,
    pub span: Span,
}

/// Identifier Expression
/// A reference to a name. This includes functions and classes.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisExpr {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuperExpr {
    pub span: Span,
}

// COMPLEX

/// Unary Expression
/// A prefix operation (`-`, `not`) on an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// Binary Expression
/// A binary operation between two expressions, including assignment (`=`).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// A parenthesised expression. Kept as its own node so spans cover the
/// brackets.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedExpr {
    pub expression: Box<Expr>,
    pub span: Span,
}

/// Call Expression
/// A function or method call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// Index Expression
/// A subscript access, `object[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// Member Expression
/// A property access, `object.property`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Token,
    pub span: Span,
}

/// New Expression
/// Instantiation of a class. The object is an identifier or a member chain
/// with identifier leaves; generic arguments are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub object: Box<Expr>,
    pub generics: Vec<TypeExpr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOfExpr {
    pub object: Box<Expr>,
    pub target: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsyncExpr {
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

/// Object Expression
/// An `identifier: expression` map literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpr {
    pub entries: Vec<(Token, Expr)>,
    pub span: Span,
}
