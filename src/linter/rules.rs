use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::ast::{Stmt, SyntacticToken};
use crate::diagnostics::diagnostics::Level;

use super::walker::{NodeRef, Walker};

/// A linter rule: a description, a severity level, and a registration
/// function that binds walker callbacks to the diagnostic sink.
pub struct Rule {
    pub description: &'static str,
    pub level: Level,
    pub register: fn(Level, &mut Walker),
}

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            description: "class bodies may only contain declarations",
            level: Level::Error,
            register: register_declarations_in_class,
        },
        Rule {
            description: "control statements must match their context",
            level: Level::Error,
            register: register_invalid_control_statement,
        },
    ]
}

fn register_declarations_in_class(level: Level, walker: &mut Walker) {
    walker.on_enter(
        SyntacticToken::ClassDecl,
        Box::new(move |node, reporter| {
            if let NodeRef::Stmt(Stmt::ClassDecl(class)) = node {
                for member in class.static_body.iter().chain(class.instance_body.iter()) {
                    if !member.is_declaration() {
                        reporter.report(
                            level,
                            "You can only put declarations in a class body",
                            member.span(),
                        );
                    }
                }
            }
        }),
    );
}

#[derive(Default)]
struct ControlContext {
    functions: u32,
    loops: u32,
    switches: u32,
    cases: u32,
    saved: Vec<(u32, u32, u32)>,
}

fn register_invalid_control_statement(level: Level, walker: &mut Walker) {
    let context = Rc::new(RefCell::new(ControlContext::default()));

    // A nested function does not inherit the enclosing loop or switch, so
    // those counters are saved and zeroed at its boundary.
    let ctx = Rc::clone(&context);
    walker.on_enter(
        SyntacticToken::FunctionDecl,
        Box::new(move |_node, _reporter| {
            let mut ctx = ctx.borrow_mut();
            let frame = (ctx.loops, ctx.switches, ctx.cases);
            ctx.saved.push(frame);
            ctx.loops = 0;
            ctx.switches = 0;
            ctx.cases = 0;
            ctx.functions += 1;
        }),
    );
    let ctx = Rc::clone(&context);
    walker.on_leave(
        SyntacticToken::FunctionDecl,
        Box::new(move |_node, _reporter| {
            let mut ctx = ctx.borrow_mut();
            ctx.functions -= 1;
            if let Some((loops, switches, cases)) = ctx.saved.pop() {
                ctx.loops = loops;
                ctx.switches = switches;
                ctx.cases = cases;
            }
        }),
    );

    for kind in [
        SyntacticToken::For,
        SyntacticToken::While,
        SyntacticToken::Repeat,
    ] {
        let ctx = Rc::clone(&context);
        walker.on_enter(
            kind,
            Box::new(move |_node, _reporter| {
                ctx.borrow_mut().loops += 1;
            }),
        );
        let ctx = Rc::clone(&context);
        walker.on_leave(
            kind,
            Box::new(move |_node, _reporter| {
                ctx.borrow_mut().loops -= 1;
            }),
        );
    }

    // Case bodies are the only statement positions inside a switch, so the
    // case counter rides along with the switch one.
    let ctx = Rc::clone(&context);
    walker.on_enter(
        SyntacticToken::Switch,
        Box::new(move |_node, _reporter| {
            let mut ctx = ctx.borrow_mut();
            ctx.switches += 1;
            ctx.cases += 1;
        }),
    );
    let ctx = Rc::clone(&context);
    walker.on_leave(
        SyntacticToken::Switch,
        Box::new(move |_node, _reporter| {
            let mut ctx = ctx.borrow_mut();
            ctx.switches -= 1;
            ctx.cases -= 1;
        }),
    );

    let ctx = Rc::clone(&context);
    walker.on_enter(
        SyntacticToken::Return,
        Box::new(move |node, reporter| {
            if ctx.borrow().functions == 0 {
                reporter.report(
                    level,
                    "You can only place return inside a function",
                    node.span(),
                );
            }
        }),
    );

    let ctx = Rc::clone(&context);
    walker.on_enter(
        SyntacticToken::Break,
        Box::new(move |node, reporter| {
            let ctx = ctx.borrow();
            if ctx.loops == 0 && ctx.cases == 0 {
                reporter.report(
                    level,
                    "You can only place break inside a loop or switch case",
                    node.span(),
                );
            }
        }),
    );

    let ctx = Rc::clone(&context);
    walker.on_enter(
        SyntacticToken::Continue,
        Box::new(move |node, reporter| {
            if ctx.borrow().loops == 0 {
                reporter.report(
                    level,
                    "You can only place continue inside a loop",
                    node.span(),
                );
            }
        }),
    );

    let ctx = Rc::clone(&context);
    walker.on_enter(
        SyntacticToken::Fallthrough,
        Box::new(move |node, reporter| {
            if ctx.borrow().cases == 0 {
                reporter.report(
                    level,
                    "You can only place fallthrough inside a switch case",
                    node.span(),
                );
            }
        }),
    );
}
