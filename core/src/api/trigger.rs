//! Compiled trigger expressions.

use std::fmt;

use super::{Error, EvalOptions};
use crate::context::Combatant;
use crate::evaluator::{Evaluator, EvaluatorOptions, truthy};
use crate::parser::Expr;
use crate::symbols::SymbolTables;
use crate::values::Value;

/// A parsed trigger ready for evaluation.
///
/// Compiled triggers borrow their tree from the engine's arena and their
/// symbol tables from the engine, and can be evaluated any number of times
/// against different combatants.
///
/// `Display` renders the tree as an S-expression.
#[derive(Clone, Copy)]
pub struct CompiledTrigger<'e> {
    expr: &'e Expr<'e>,
    source: &'e str,
    symbols: &'e SymbolTables,
    options: EvalOptions,
}

impl<'e> CompiledTrigger<'e> {
    /// Called by `Engine::compile()`.
    pub(crate) fn new(
        expr: &'e Expr<'e>,
        source: &'e str,
        symbols: &'e SymbolTables,
        options: EvalOptions,
    ) -> Self {
        Self {
            expr,
            source,
            symbols,
            options,
        }
    }

    pub fn expr(&self) -> &'e Expr<'e> {
        self.expr
    }

    /// The text this trigger was compiled from.
    pub fn source(&self) -> &'e str {
        self.source
    }

    /// Overrides the evaluation options the engine supplied.
    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Evaluates the trigger against `combatant`.
    pub fn evaluate(&self, combatant: &dyn Combatant) -> Result<Value, Error> {
        let options = EvaluatorOptions {
            max_depth: self.options.max_depth,
        };
        Evaluator::new(self.symbols, options)
            .eval(self.expr, combatant)
            .map_err(Error::from)
    }

    /// Evaluates the trigger as a condition.
    ///
    /// Unresolved names count as false and are reported through `tracing`.
    pub fn evaluate_bool(&self, combatant: &dyn Combatant) -> Result<bool, Error> {
        self.evaluate(combatant).map(|value| truthy(&value))
    }
}

impl fmt::Display for CompiledTrigger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.expr, f)
    }
}

impl fmt::Debug for CompiledTrigger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTrigger")
            .field("source", &self.source)
            .field("expr", self.expr)
            .finish()
    }
}
