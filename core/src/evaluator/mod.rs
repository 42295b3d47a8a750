//! Tree-walking evaluator for trigger expressions.
//!
//! The evaluator walks an [`Expr`] produced by the parser against a live
//! [`Combatant`] and produces a [`Value`]. Trees are evaluated many times
//! per second, so nothing here allocates except text and vector values.
//!
//! ## Design Principles
//!
//! - **Never panic**: malformed or adversarial trees produce errors or
//!   degrade to false
//! - **Stack-safe**: depth tracking bounds recursion on deep trees
//! - **Redirect-aware**: the combatant is an explicit argument, so `p2, life`
//!   simply evaluates `life` against another combatant
//!
//! ## Example
//!
//! ```
//! use bumpalo::Bump;
//! use mugen_trigger_core::context::{CombatantState, Fighter, World};
//! use mugen_trigger_core::{evaluator, parser, symbols::SymbolTables};
//! use std::rc::Rc;
//!
//! let arena = Bump::new();
//! let symbols = SymbolTables::standard();
//! let expr = parser::parse(&arena, "life * 2", symbols).unwrap();
//!
//! let kfm = Fighter::new(CombatantState::new("kfm"), Rc::new(World::default()));
//! let value = evaluator::eval(symbols, expr, &kfm).unwrap();
//! assert_eq!(value.to_int(), 2000);
//! ```

pub(crate) mod compare;
mod error;
mod eval;
mod operators;


pub use error::EvalError;
pub use eval::{Evaluator, truthy};
pub use operators::other_file;

use crate::context::Combatant;
use crate::parser::Expr;
use crate::symbols::SymbolTables;
use crate::values::Value;

/// Limits applied while evaluating.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorOptions {
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// What a named comparison routine gets to look at.
///
/// `right` is the unevaluated right-hand side, which `command` needs to
/// see a pre-resolved command index; `value` is that side already
/// evaluated against the original combatant.
#[derive(Debug, Clone, Copy)]
pub struct NamedComparison<'n> {
    /// Lowercased left-hand name, id suffix included (`projhit1200`).
    pub name: &'n str,
    pub right: &'n Expr<'n>,
    pub value: &'n Value,
}

/// Evaluate an expression with default limits.
pub fn eval(
    symbols: &SymbolTables,
    expr: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    Evaluator::new(symbols, EvaluatorOptions::default()).eval(expr, combatant)
}

/// Evaluate an expression with a custom depth limit.
pub fn eval_with_limits(
    symbols: &SymbolTables,
    expr: &Expr<'_>,
    combatant: &dyn Combatant,
    max_depth: usize,
) -> Result<Value, EvalError> {
    Evaluator::new(symbols, EvaluatorOptions { max_depth }).eval(expr, combatant)
}
