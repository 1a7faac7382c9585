use crate::Span;

use super::expressions::{
    ArrayExpr, AsyncExpr, BinaryExpr, CallExpr, IdentifierExpr, IndexExpr, InstanceOfExpr,
    LiteralExpr, MemberExpr, NewExpr, ObjectExpr, SuperExpr, ThisExpr, UnaryExpr, WrappedExpr,
};
use super::statements::{
    BreakStmt, ClassDeclStmt, ContinueStmt, EmptyVariableDeclStmt, ExpressionStmt,
    FallthroughStmt, ForStmt, FunctionDeclStmt, IfStmt, ImportDeclStmt, RepeatStmt, ReturnStmt,
    SwitchStmt, ThrowStmt, TryStmt, VariableDeclStmt, WhileStmt,
};

/// The closed set of AST node kinds. Every walker operation is a match on
/// this tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SyntacticToken {
    Program,

    // Declarations
    VariableDecl,
    EmptyVariableDecl,
    FunctionDecl,
    ClassDecl,
    ImportDecl,

    // Expressions
    Literal,
    Identifier,
    This,
    Super,
    Unary,
    Binary,
    Wrapped,
    Call,
    Index,
    Member,
    New,
    InstanceOf,
    Async,
    Array,
    Object,

    // Statements
    If,
    Switch,
    For,
    While,
    Repeat,
    Try,
    Throw,
    Return,
    Break,
    Continue,
    Fallthrough,
    ExpressionStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    This(ThisExpr),
    Super(SuperExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Wrapped(WrappedExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Member(MemberExpr),
    New(NewExpr),
    InstanceOf(InstanceOfExpr),
    Async(AsyncExpr),
    Array(ArrayExpr),
    Object(ObjectExpr),
}

impl Expr {
    pub fn kind(&self) -> SyntacticToken {
        match self {
            Expr::Literal(_) => SyntacticToken::Literal,
            Expr::Identifier(_) => SyntacticToken::Identifier,
            Expr::This(_) => SyntacticToken::This,
            Expr::Super(_) => SyntacticToken::Super,
            Expr::Unary(_) => SyntacticToken::Unary,
            Expr::Binary(_) => SyntacticToken::Binary,
            Expr::Wrapped(_) => SyntacticToken::Wrapped,
            Expr::Call(_) => SyntacticToken::Call,
            Expr::Index(_) => SyntacticToken::Index,
            Expr::Member(_) => SyntacticToken::Member,
            Expr::New(_) => SyntacticToken::New,
            Expr::InstanceOf(_) => SyntacticToken::InstanceOf,
            Expr::Async(_) => SyntacticToken::Async,
            Expr::Array(_) => SyntacticToken::Array,
            Expr::Object(_) => SyntacticToken::Object,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(expr) => expr.span,
            Expr::Identifier(expr) => expr.span,
            Expr::This(expr) => expr.span,
            Expr::Super(expr) => expr.span,
            Expr::Unary(expr) => expr.span,
            Expr::Binary(expr) => expr.span,
            Expr::Wrapped(expr) => expr.span,
            Expr::Call(expr) => expr.span,
            Expr::Index(expr) => expr.span,
            Expr::Member(expr) => expr.span,
            Expr::New(expr) => expr.span,
            Expr::InstanceOf(expr) => expr.span,
            Expr::Async(expr) => expr.span,
            Expr::Array(expr) => expr.span,
            Expr::Object(expr) => expr.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VariableDecl(VariableDeclStmt),
    EmptyVariableDecl(EmptyVariableDeclStmt),
    FunctionDecl(FunctionDeclStmt),
    ClassDecl(ClassDeclStmt),
    ImportDecl(ImportDeclStmt),
    If(IfStmt),
    Switch(SwitchStmt),
    For(ForStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
    Try(TryStmt),
    Throw(ThrowStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Fallthrough(FallthroughStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn kind(&self) -> SyntacticToken {
        match self {
            Stmt::VariableDecl(_) => SyntacticToken::VariableDecl,
            Stmt::EmptyVariableDecl(_) => SyntacticToken::EmptyVariableDecl,
            Stmt::FunctionDecl(_) => SyntacticToken::FunctionDecl,
            Stmt::ClassDecl(_) => SyntacticToken::ClassDecl,
            Stmt::ImportDecl(_) => SyntacticToken::ImportDecl,
            Stmt::If(_) => SyntacticToken::If,
            Stmt::Switch(_) => SyntacticToken::Switch,
            Stmt::For(_) => SyntacticToken::For,
            Stmt::While(_) => SyntacticToken::While,
            Stmt::Repeat(_) => SyntacticToken::Repeat,
            Stmt::Try(_) => SyntacticToken::Try,
            Stmt::Throw(_) => SyntacticToken::Throw,
            Stmt::Return(_) => SyntacticToken::Return,
            Stmt::Break(_) => SyntacticToken::Break,
            Stmt::Continue(_) => SyntacticToken::Continue,
            Stmt::Fallthrough(_) => SyntacticToken::Fallthrough,
            Stmt::Expression(_) => SyntacticToken::ExpressionStmt,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Stmt::VariableDecl(stmt) => stmt.span,
            Stmt::EmptyVariableDecl(stmt) => stmt.span,
            Stmt::FunctionDecl(stmt) => stmt.span,
            Stmt::ClassDecl(stmt) => stmt.span,
            Stmt::ImportDecl(stmt) => stmt.span,
            Stmt::If(stmt) => stmt.span,
            Stmt::Switch(stmt) => stmt.span,
            Stmt::For(stmt) => stmt.span,
            Stmt::While(stmt) => stmt.span,
            Stmt::Repeat(stmt) => stmt.span,
            Stmt::Try(stmt) => stmt.span,
            Stmt::Throw(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
            Stmt::Break(stmt) => stmt.span,
            Stmt::Continue(stmt) => stmt.span,
            Stmt::Fallthrough(stmt) => stmt.span,
            Stmt::Expression(stmt) => stmt.span,
        }
    }

    /// True for the node kinds allowed inside a class body.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Stmt::VariableDecl(_) | Stmt::EmptyVariableDecl(_) | Stmt::FunctionDecl(_)
        )
    }
}

/// An ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}
