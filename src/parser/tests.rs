//! Unit tests for the parser module.
//!
//! This module contains structural tests for parsing the language
//! constructs:
//! - Declarations (variables, functions, classes, imports)
//! - Expressions and the precedence ladder
//! - Control flow statements and indented bodies
//! - Error recovery at statement boundaries

use crate::ast::ast::{Expr, Program, Stmt};
use crate::ast::statements::ElseBranch;
use crate::ast::types::TypeExpr;
use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::lexer::tokenize;
use crate::lexer::tokens::LexicalToken;

use super::parser::parse;

fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    let (tokens, _, lex_diagnostics) = tokenize(source);
    assert!(
        lex_diagnostics.is_empty(),
        "unexpected tokenizer diagnostics: {:?}",
        lex_diagnostics
    );
    parse(tokens)
}

fn parse_clean(source: &str) -> Program {
    let (program, diagnostics) = parse_source(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected parser diagnostics: {:?}",
        diagnostics
    );
    program
}

fn only_expression(program: &Program) -> &Expr {
    assert_eq!(program.body.len(), 1);
    match &program.body[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other.kind()),
    }
}

#[test]
fn test_parse_call_without_arguments() {
    let program = parse_clean("fn()");

    let Expr::Call(call) = only_expression(&program) else {
        panic!("expected a call expression");
    };
    let Expr::Identifier(callee) = call.callee.as_ref() else {
        panic!("expected an identifier callee");
    };
    assert_eq!(callee.name, "fn");
    assert!(call.arguments.is_empty());
}

#[test]
fn test_parse_call_with_one_argument() {
    let program = parse_clean("fn(true)");

    let Expr::Call(call) = only_expression(&program) else {
        panic!("expected a call expression");
    };
    assert_eq!(call.arguments.len(), 1);
    let Expr::Literal(literal) = &call.arguments[0] else {
        panic!("expected a literal argument");
    };
    assert_eq!(literal.lexeme, "true");
    assert_eq!(literal.kind, LexicalToken::True);
}

#[test]
fn test_parse_call_with_two_arguments() {
    let program = parse_clean("fn(true, 20)");

    let Expr::Call(call) = only_expression(&program) else {
        panic!("expected a call expression");
    };
    assert_eq!(call.arguments.len(), 2);
    let Expr::Literal(first) = &call.arguments[0] else {
        panic!("expected a literal argument");
    };
    let Expr::Literal(second) = &call.arguments[1] else {
        panic!("expected a literal argument");
    };
    assert_eq!(first.lexeme, "true");
    assert_eq!(second.lexeme, "20");
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_clean("var x: Int = 1 + 2");

    assert_eq!(program.body.len(), 1);
    let Stmt::VariableDecl(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.identifier.lexeme, "x");

    let Some(TypeExpr::Symbol(annotation)) = &decl.explicit_type else {
        panic!("expected a symbol type annotation");
    };
    assert_eq!(annotation.name.lexeme, "Int");

    let Expr::Binary(sum) = &decl.value else {
        panic!("expected a binary initialiser");
    };
    assert_eq!(sum.operator.kind, LexicalToken::Plus);
    assert!(matches!(sum.left.as_ref(), Expr::Literal(_)));
    assert!(matches!(sum.right.as_ref(), Expr::Literal(_)));
}

#[test]
fn test_parse_empty_variable_declarations() {
    let program = parse_clean("var x: Int\nvar y");

    let Stmt::EmptyVariableDecl(typed) = &program.body[0] else {
        panic!("expected an empty variable declaration");
    };
    assert!(typed.explicit_type.is_some());

    let Stmt::EmptyVariableDecl(untyped) = &program.body[1] else {
        panic!("expected an empty variable declaration");
    };
    assert!(untyped.explicit_type.is_none());
}

#[test]
fn test_parse_precedence_ladder() {
    let program = parse_clean("x = 1 + 2 * 3");

    let Expr::Binary(assignment) = only_expression(&program) else {
        panic!("expected an assignment");
    };
    assert_eq!(assignment.operator.kind, LexicalToken::Assignment);

    let Expr::Binary(sum) = assignment.right.as_ref() else {
        panic!("expected an additive right-hand side");
    };
    assert_eq!(sum.operator.kind, LexicalToken::Plus);

    let Expr::Binary(product) = sum.right.as_ref() else {
        panic!("expected multiplication to bind tighter");
    };
    assert_eq!(product.operator.kind, LexicalToken::Star);
}

#[test]
fn test_parse_exponent_is_right_associative() {
    let program = parse_clean("2 ** 3 ** 4");

    let Expr::Binary(outer) = only_expression(&program) else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operator.kind, LexicalToken::Exponent);
    assert!(matches!(outer.left.as_ref(), Expr::Literal(_)));
    let Expr::Binary(inner) = outer.right.as_ref() else {
        panic!("expected the right-hand side to nest");
    };
    assert_eq!(inner.operator.kind, LexicalToken::Exponent);
}

#[test]
fn test_parse_assignment_is_right_associative() {
    let program = parse_clean("a = b = c");

    let Expr::Binary(outer) = only_expression(&program) else {
        panic!("expected an assignment");
    };
    assert!(matches!(outer.left.as_ref(), Expr::Identifier(_)));
    let Expr::Binary(inner) = outer.right.as_ref() else {
        panic!("expected the right-hand side to nest");
    };
    assert_eq!(inner.operator.kind, LexicalToken::Assignment);
}

#[test]
fn test_parse_unary_binds_tighter_than_logical() {
    let program = parse_clean("not x and y");

    let Expr::Binary(conjunction) = only_expression(&program) else {
        panic!("expected a binary expression");
    };
    assert_eq!(conjunction.operator.kind, LexicalToken::And);
    assert!(matches!(conjunction.left.as_ref(), Expr::Unary(_)));
}

#[test]
fn test_parse_wrapped_expression() {
    let program = parse_clean("(1 + 2) * 3");

    let Expr::Binary(product) = only_expression(&program) else {
        panic!("expected a binary expression");
    };
    assert_eq!(product.operator.kind, LexicalToken::Star);
    assert!(matches!(product.left.as_ref(), Expr::Wrapped(_)));
}

#[test]
fn test_parse_multi_word_comparison() {
    let program = parse_clean("a is less than b");

    let Expr::Binary(comparison) = only_expression(&program) else {
        panic!("expected a binary expression");
    };
    assert_eq!(comparison.operator.kind, LexicalToken::IsLessThan);
}

#[test]
fn test_parse_member_chain() {
    let program = parse_clean("a.b.c");

    let Expr::Member(outer) = only_expression(&program) else {
        panic!("expected a member expression");
    };
    assert_eq!(outer.property.lexeme, "c");
    let Expr::Member(inner) = outer.object.as_ref() else {
        panic!("expected a nested member expression");
    };
    assert_eq!(inner.property.lexeme, "b");
    assert!(matches!(inner.object.as_ref(), Expr::Identifier(_)));
}

#[test]
fn test_parse_index_expression() {
    let program = parse_clean("xs[0]");

    let Expr::Index(index) = only_expression(&program) else {
        panic!("expected an index expression");
    };
    assert!(matches!(index.object.as_ref(), Expr::Identifier(_)));
    assert!(matches!(index.index.as_ref(), Expr::Literal(_)));
}

#[test]
fn test_parse_chained_calls() {
    let program = parse_clean("f(1)(2)");

    let Expr::Call(outer) = only_expression(&program) else {
        panic!("expected a call expression");
    };
    assert!(matches!(outer.callee.as_ref(), Expr::Call(_)));
}

#[test]
fn test_parse_array_literal() {
    let program = parse_clean("[1, 2, 3]");

    let Expr::Array(array) = only_expression(&program) else {
        panic!("expected an array literal");
    };
    assert_eq!(array.elements.len(), 3);
}

#[test]
fn test_parse_multiline_array_with_trailing_comma() {
    let program = parse_clean("var a = [\n1,\n2,\n]");

    let Stmt::VariableDecl(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    let Expr::Array(array) = &decl.value else {
        panic!("expected an array literal");
    };
    assert_eq!(array.elements.len(), 2);
}

#[test]
fn test_parse_object_literal() {
    let program = parse_clean("var o = {\nx: 1,\ny: 2\n}");

    let Stmt::VariableDecl(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    let Expr::Object(object) = &decl.value else {
        panic!("expected an object literal");
    };
    assert_eq!(object.entries.len(), 2);
    assert_eq!(object.entries[0].0.lexeme, "x");
    assert_eq!(object.entries[1].0.lexeme, "y");
}

#[test]
fn test_parse_new_expression() {
    let program = parse_clean("new Point(1, 2)");

    let Expr::New(new) = only_expression(&program) else {
        panic!("expected a new expression");
    };
    assert!(matches!(new.object.as_ref(), Expr::Identifier(_)));
    assert!(new.generics.is_empty());
    assert_eq!(new.arguments.len(), 2);
}

#[test]
fn test_parse_new_with_generic_arguments() {
    let program = parse_clean("new Dictionary<String, Int>()");

    let Expr::New(new) = only_expression(&program) else {
        panic!("expected a new expression");
    };
    assert_eq!(new.generics.len(), 2);
    assert!(matches!(new.generics[0], TypeExpr::Symbol(_)));
}

#[test]
fn test_parse_new_with_member_path() {
    let program = parse_clean("new geo.Point(0)");

    let Expr::New(new) = only_expression(&program) else {
        panic!("expected a new expression");
    };
    assert!(matches!(new.object.as_ref(), Expr::Member(_)));
}

#[test]
fn test_parse_new_rejects_non_path_object() {
    let (program, diagnostics) = parse_source("new (f)(1)");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(*diagnostics[0].kind(), DiagnosticKind::InvalidConstructorPath);
    // The node is still produced, best effort.
    assert!(matches!(only_expression(&program), Expr::New(_)));
}

#[test]
fn test_parse_new_without_arguments_reports_with_info() {
    let (program, diagnostics) = parse_source("var x = new Point");

    assert!(program.body.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].info.len(), 1);
    assert_eq!(
        diagnostics[0].info[0].message,
        "Add a '(' after this class expression"
    );
}

#[test]
fn test_parse_async_expression() {
    let program = parse_clean("async fetch(url)");

    let Expr::Async(wrapped) = only_expression(&program) else {
        panic!("expected an async expression");
    };
    assert!(matches!(wrapped.operand.as_ref(), Expr::Call(_)));
}

#[test]
fn test_parse_instanceof_with_generic_type() {
    let program = parse_clean("x instanceof List<Int>");

    let Expr::InstanceOf(check) = only_expression(&program) else {
        panic!("expected an instanceof expression");
    };
    assert!(matches!(check.object.as_ref(), Expr::Identifier(_)));
    assert!(matches!(check.target, TypeExpr::Generic(_)));
}

#[test]
fn test_parse_invalid_assignment_target() {
    let (program, diagnostics) = parse_source("1 = 2");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(*diagnostics[0].kind(), DiagnosticKind::InvalidAssignmentTarget);
    // Best-effort assignment node is still built.
    let Expr::Binary(assignment) = only_expression(&program) else {
        panic!("expected an assignment node");
    };
    assert_eq!(assignment.operator.kind, LexicalToken::Assignment);
}

#[test]
fn test_parse_if_else_chain() {
    let source = "if a\n\tf()\nelse if b\n\tg()\nelse\n\th()";
    let program = parse_clean(source);

    let Stmt::If(first) = &program.body[0] else {
        panic!("expected an if statement");
    };
    assert_eq!(first.then_body.len(), 1);

    let Some(ElseBranch::If(chained)) = &first.else_body else {
        panic!("expected a chained else-if");
    };
    let Stmt::If(second) = chained.as_ref() else {
        panic!("expected the chain to hold an if statement");
    };
    assert!(matches!(second.else_body, Some(ElseBranch::Block(_))));
}

#[test]
fn test_parse_switch_statement() {
    let source = "switch x\n\tcase 1\n\t\tf()\n\tcase 2\n\t\tg()\n\tdefault\n\t\th()";
    let program = parse_clean(source);

    let Stmt::Switch(switch) = &program.body[0] else {
        panic!("expected a switch statement");
    };
    assert_eq!(switch.cases.len(), 2);
    assert!(switch.default_body.is_some());
    assert!(matches!(switch.cases[0].test, Expr::Literal(_)));
    assert_eq!(switch.cases[1].body.len(), 1);
}

#[test]
fn test_parse_switch_without_cases_is_reported() {
    let (_, diagnostics) = parse_source("switch x\n\tdefault\n\t\tf()");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(*diagnostics[0].kind(), DiagnosticKind::SwitchWithoutCase);
}

#[test]
fn test_parse_for_statement() {
    let program = parse_clean("for p in points\n\tf(p)");

    let Stmt::For(for_stmt) = &program.body[0] else {
        panic!("expected a for statement");
    };
    assert_eq!(for_stmt.binding.lexeme, "p");
    assert!(matches!(for_stmt.iterable, Expr::Identifier(_)));
    assert_eq!(for_stmt.body.len(), 1);
}

#[test]
fn test_parse_while_statement() {
    let program = parse_clean("while x is not null\n\tstep()");

    let Stmt::While(while_stmt) = &program.body[0] else {
        panic!("expected a while statement");
    };
    assert!(matches!(while_stmt.condition, Expr::Binary(_)));
}

#[test]
fn test_parse_repeat_statement() {
    let program = parse_clean("repeat 3\n\tblink()");

    let Stmt::Repeat(repeat) = &program.body[0] else {
        panic!("expected a repeat statement");
    };
    assert!(matches!(repeat.count, Expr::Literal(_)));
    assert_eq!(repeat.body.len(), 1);
}

#[test]
fn test_parse_try_catch_finally() {
    let source = "try\n\tf()\ncatch e\n\tg(e)\nfinally\n\th()";
    let program = parse_clean(source);

    let Stmt::Try(try_stmt) = &program.body[0] else {
        panic!("expected a try statement");
    };
    assert_eq!(try_stmt.catch_binding.lexeme, "e");
    assert_eq!(try_stmt.body.len(), 1);
    assert_eq!(try_stmt.catch_body.len(), 1);
    assert!(try_stmt.finally_body.is_some());
}

#[test]
fn test_parse_function_declaration() {
    let source = "function add(a: Int, b): Int\n\treturn a + b";
    let program = parse_clean(source);

    let Stmt::FunctionDecl(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(function.identifier.lexeme, "add");
    assert_eq!(function.parameters.len(), 2);
    assert!(function.parameters[0].explicit_type.is_some());
    assert!(function.parameters[1].explicit_type.is_none());
    assert!(function.return_type.is_some());
    assert!(matches!(function.body[0], Stmt::Return(_)));
}

#[test]
fn test_parse_class_routes_static_members() {
    let source = "class Counter extends Base\n\tvar value = 0\n\tstatic var total = 0\n\tfunction bump()\n\t\tvalue = value + 1";
    let program = parse_clean(source);

    let Stmt::ClassDecl(class) = &program.body[0] else {
        panic!("expected a class declaration");
    };
    assert_eq!(class.identifier.lexeme, "Counter");
    assert!(matches!(class.extends, Some(TypeExpr::Symbol(_))));
    assert_eq!(class.static_body.len(), 1);
    assert_eq!(class.instance_body.len(), 2);
    assert!(matches!(class.instance_body[1], Stmt::FunctionDecl(_)));
}

#[test]
fn test_parse_import_path() {
    let program = parse_clean("import geo.shapes");

    let Stmt::ImportDecl(import) = &program.body[0] else {
        panic!("expected an import declaration");
    };
    assert_eq!(import.path.len(), 2);
    assert_eq!(import.path[0].lexeme, "geo");
    assert_eq!(import.path[1].lexeme, "shapes");
}

#[test]
fn test_parse_member_type_annotation() {
    let program = parse_clean("var p: Geo.Point");

    let Stmt::EmptyVariableDecl(decl) = &program.body[0] else {
        panic!("expected an empty variable declaration");
    };
    assert!(matches!(decl.explicit_type, Some(TypeExpr::Member(_))));
}

#[test]
fn test_parse_nested_generic_type() {
    let program = parse_clean("var d: Dictionary<String, List<Int>> = f()");

    let Stmt::VariableDecl(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    let Some(TypeExpr::Generic(generic)) = &decl.explicit_type else {
        panic!("expected a generic type annotation");
    };
    assert_eq!(generic.arguments.len(), 2);
    assert!(matches!(generic.arguments[1], TypeExpr::Generic(_)));
}

#[test]
fn test_parse_top_level_return() {
    // Valid syntax; the linter complains, not the parser.
    let program = parse_clean("return");

    assert!(matches!(program.body[0], Stmt::Return(_)));
}

#[test]
fn test_parse_simple_control_statements() {
    let program = parse_clean("while x\n\tbreak\n\tcontinue\nfallthrough");

    let Stmt::While(while_stmt) = &program.body[0] else {
        panic!("expected a while statement");
    };
    assert!(matches!(while_stmt.body[0], Stmt::Break(_)));
    assert!(matches!(while_stmt.body[1], Stmt::Continue(_)));
    assert!(matches!(program.body[1], Stmt::Fallthrough(_)));
}

#[test]
fn test_parse_throw_statement() {
    let program = parse_clean("throw new Failure('bad')");

    let Stmt::Throw(throw) = &program.body[0] else {
        panic!("expected a throw statement");
    };
    assert!(matches!(throw.value, Expr::New(_)));
}

#[test]
fn test_parse_operator_at_end_of_line_continues() {
    let program = parse_clean("var x = 1 +\n2");

    let Stmt::VariableDecl(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert!(matches!(decl.value, Expr::Binary(_)));
}

#[test]
fn test_parse_newlines_inside_call_arguments() {
    let program = parse_clean("f(1,\n2)");

    let Expr::Call(call) = only_expression(&program) else {
        panic!("expected a call expression");
    };
    assert_eq!(call.arguments.len(), 2);
}

#[test]
fn test_parse_newlines_inside_parens() {
    let program = parse_clean("var x = (\n1 + 2\n)");

    let Stmt::VariableDecl(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert!(matches!(decl.value, Expr::Wrapped(_)));
}

#[test]
fn test_parse_recovers_at_statement_boundary() {
    let (program, diagnostics) = parse_source("var = 1\nvar y = 2");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.body.len(), 1);
    assert!(matches!(program.body[0], Stmt::VariableDecl(_)));
}

#[test]
fn test_parse_recovery_skips_orphaned_body() {
    let (program, diagnostics) = parse_source("if +\n\tf()\nvar y = 2");

    assert_eq!(diagnostics.len(), 1);
    // The indented body of the failed statement is skipped wholesale.
    assert_eq!(program.body.len(), 1);
    assert!(matches!(program.body[0], Stmt::VariableDecl(_)));
}

#[test]
fn test_parse_recovery_inside_block_keeps_rest_of_block() {
    let source = "function f()\n\tvar = 1\n\tvar ok = 2";
    let (program, diagnostics) = parse_source(source);

    assert_eq!(diagnostics.len(), 1);
    let Stmt::FunctionDecl(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(function.body.len(), 1);
    assert!(matches!(function.body[0], Stmt::VariableDecl(_)));
}

#[test]
fn test_parse_missing_statement_end_is_reported() {
    let (program, diagnostics) = parse_source("var x = 1 var y = 2");

    assert_eq!(diagnostics.len(), 1);
    assert!(program.body.is_empty());
}

#[test]
fn test_parse_empty_program() {
    let program = parse_clean("");
    assert!(program.body.is_empty());
}

#[test]
fn test_parse_trailing_newline_equivalence() {
    let with = parse_clean("var x = 1\n");
    let without = parse_clean("var x = 1");
    assert_eq!(with.body, without.body);
}

#[test]
fn test_parse_is_deterministic() {
    let source = "class C\n\tvar x = 1\nf(x)";
    let first = parse_source(source);
    let second = parse_source(source);
    assert_eq!(first.0, second.0);
}

#[test]
fn test_parse_span_invariants() {
    let program = parse_clean("var x = 1\nvar y = 2\nf(x, y)");

    for stmt in &program.body {
        assert!(
            program.span.contains(&stmt.span()),
            "program span must contain {:?}",
            stmt.kind()
        );
    }
    for pair in program.body.windows(2) {
        assert!(pair[0].span().start.line <= pair[1].span().start.line);
    }
}
