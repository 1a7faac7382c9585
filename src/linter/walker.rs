use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt, SyntacticToken},
        statements::ElseBranch,
    },
    diagnostics::diagnostics::{Diagnostic, Level},
    Span,
};

/// A borrowed view of any AST node, tagged with its kind.
#[derive(Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> SyntacticToken {
        match self {
            NodeRef::Program(_) => SyntacticToken::Program,
            NodeRef::Stmt(stmt) => stmt.kind(),
            NodeRef::Expr(expr) => expr.kind(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::Program(program) => program.span,
            NodeRef::Stmt(stmt) => stmt.span(),
            NodeRef::Expr(expr) => expr.span(),
        }
    }
}

/// The diagnostic sink handed to rule callbacks.
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn report(&mut self, level: Level, message: impl Into<String>, span: Span) {
        self.diagnostics
            .push(Diagnostic::linter(level, message.into(), span));
    }
}

pub type RuleCallback = Box<dyn FnMut(NodeRef<'_>, &mut Reporter)>;

/// Depth-first traversal engine. Enter callbacks run in registration order
/// before a node's children are visited, leave callbacks after the subtree
/// is done.
pub struct Walker {
    enter: HashMap<SyntacticToken, Vec<RuleCallback>>,
    leave: HashMap<SyntacticToken, Vec<RuleCallback>>,
}

impl Walker {
    pub fn new() -> Walker {
        Walker {
            enter: HashMap::new(),
            leave: HashMap::new(),
        }
    }

    pub fn on_enter(&mut self, kind: SyntacticToken, callback: RuleCallback) {
        self.enter.entry(kind).or_default().push(callback);
    }

    pub fn on_leave(&mut self, kind: SyntacticToken, callback: RuleCallback) {
        self.leave.entry(kind).or_default().push(callback);
    }

    pub fn walk(&mut self, program: &Program) -> Vec<Diagnostic> {
        let mut reporter = Reporter {
            diagnostics: vec![],
        };

        self.dispatch_enter(NodeRef::Program(program), &mut reporter);
        for stmt in &program.body {
            self.walk_stmt(stmt, &mut reporter);
        }
        self.dispatch_leave(NodeRef::Program(program), &mut reporter);

        reporter.diagnostics
    }

    fn dispatch_enter(&mut self, node: NodeRef<'_>, reporter: &mut Reporter) {
        if let Some(callbacks) = self.enter.get_mut(&node.kind()) {
            for callback in callbacks.iter_mut() {
                callback(node, reporter);
            }
        }
    }

    fn dispatch_leave(&mut self, node: NodeRef<'_>, reporter: &mut Reporter) {
        if let Some(callbacks) = self.leave.get_mut(&node.kind()) {
            for callback in callbacks.iter_mut() {
                callback(node, reporter);
            }
        }
    }

    fn walk_body(&mut self, body: &[Stmt], reporter: &mut Reporter) {
        for stmt in body {
            self.walk_stmt(stmt, reporter);
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt, reporter: &mut Reporter) {
        self.dispatch_enter(NodeRef::Stmt(stmt), reporter);

        match stmt {
            Stmt::VariableDecl(decl) => self.walk_expr(&decl.value, reporter),
            Stmt::EmptyVariableDecl(_) => {}
            Stmt::FunctionDecl(decl) => self.walk_body(&decl.body, reporter),
            Stmt::ClassDecl(decl) => {
                self.walk_body(&decl.static_body, reporter);
                self.walk_body(&decl.instance_body, reporter);
            }
            Stmt::ImportDecl(_) => {}
            Stmt::If(stmt) => {
                self.walk_expr(&stmt.condition, reporter);
                self.walk_body(&stmt.then_body, reporter);
                match &stmt.else_body {
                    Some(ElseBranch::If(chained)) => self.walk_stmt(chained, reporter),
                    Some(ElseBranch::Block(body)) => self.walk_body(body, reporter),
                    None => {}
                }
            }
            Stmt::Switch(stmt) => {
                self.walk_expr(&stmt.discriminant, reporter);
                for case in &stmt.cases {
                    self.walk_expr(&case.test, reporter);
                    self.walk_body(&case.body, reporter);
                }
                if let Some(body) = &stmt.default_body {
                    self.walk_body(body, reporter);
                }
            }
            Stmt::For(stmt) => {
                self.walk_expr(&stmt.iterable, reporter);
                self.walk_body(&stmt.body, reporter);
            }
            Stmt::While(stmt) => {
                self.walk_expr(&stmt.condition, reporter);
                self.walk_body(&stmt.body, reporter);
            }
            Stmt::Repeat(stmt) => {
                self.walk_expr(&stmt.count, reporter);
                self.walk_body(&stmt.body, reporter);
            }
            Stmt::Try(stmt) => {
                self.walk_body(&stmt.body, reporter);
                self.walk_body(&stmt.catch_body, reporter);
                if let Some(body) = &stmt.finally_body {
                    self.walk_body(body, reporter);
                }
            }
            Stmt::Throw(stmt) => self.walk_expr(&stmt.value, reporter),
            Stmt::Return(stmt) => {
                if let Some(value) = &stmt.value {
                    self.walk_expr(value, reporter);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Fallthrough(_) => {}
            Stmt::Expression(stmt) => self.walk_expr(&stmt.expression, reporter),
        }

        self.dispatch_leave(NodeRef::Stmt(stmt), reporter);
    }

    fn walk_expr(&mut self, expr: &Expr, reporter: &mut Reporter) {
        self.dispatch_enter(NodeRef::Expr(expr), reporter);

        match expr {
            Expr::Literal(_) | Expr::Identifier(_) | Expr::This(_) | Expr::Super(_) => {}
            Expr::Unary(expr) => self.walk_expr(&expr.operand, reporter),
            Expr::Binary(expr) => {
                self.walk_expr(&expr.left, reporter);
                self.walk_expr(&expr.right, reporter);
            }
            Expr::Wrapped(expr) => self.walk_expr(&expr.expression, reporter),
            Expr::Call(expr) => {
                self.walk_expr(&expr.callee, reporter);
                for argument in &expr.arguments {
                    self.walk_expr(argument, reporter);
                }
            }
            Expr::Index(expr) => {
                self.walk_expr(&expr.object, reporter);
                self.walk_expr(&expr.index, reporter);
            }
            Expr::Member(expr) => self.walk_expr(&expr.object, reporter),
            Expr::New(expr) => {
                self.walk_expr(&expr.object, reporter);
                for argument in &expr.arguments {
                    self.walk_expr(argument, reporter);
                }
            }
            Expr::InstanceOf(expr) => self.walk_expr(&expr.object, reporter),
            Expr::Async(expr) => self.walk_expr(&expr.operand, reporter),
            Expr::Array(expr) => {
                for element in &expr.elements {
                    self.walk_expr(element, reporter);
                }
            }
            Expr::Object(expr) => {
                for (_key, value) in &expr.entries {
                    self.walk_expr(value, reporter);
                }
            }
        }

        self.dispatch_leave(NodeRef::Expr(expr), reporter);
    }
}

impl Default for Walker {
    fn default() -> Self {
        Walker::new()
    }
}
