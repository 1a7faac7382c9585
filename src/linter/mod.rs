//! Linting module for context-sensitive validation.
//!
//! This module performs rule-based checks over a parsed program. It
//! contains:
//!
//! - A depth-first walker dispatching per-kind enter/leave callbacks
//! - Built-in rules (declarations-only class bodies, control-statement
//!   placement)
//! - A reporter closing over the diagnostic sink
//!
//! Rules keep whatever ancestor context they need in their own closures;
//! the walker itself is stateless aside from callback ordering.

pub mod rules;
pub mod walker;


use log::debug;

use crate::ast::ast::Program;
use crate::diagnostics::diagnostics::Diagnostic;
use rules::Rule;
use walker::Walker;

/// Runs the given rules over a program and collects their diagnostics.
pub fn lint(program: &Program, rules: Vec<Rule>) -> Vec<Diagnostic> {
    let mut walker = Walker::new();
    for rule in &rules {
        (rule.register)(rule.level, &mut walker);
    }
    let diagnostics = walker.walk(program);
    debug!(
        "linted with {} rules, {} diagnostics",
        rules.len(),
        diagnostics.len()
    );
    diagnostics
}
