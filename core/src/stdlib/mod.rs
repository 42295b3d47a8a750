//! Trigger Standard Library
//!
//! The names every character script can use, grouped by concern:
//! - Variables: state readers such as `life`, `pos x` or `p2dist x`
//! - Math: `abs`, `ln`, `floor` and friends
//! - Slots: `var`, `fvar`, `sysvar`, `sysfvar`
//! - Queries: animation, hit, constant and projectile lookups
//! - Control: `ifelse`, `sifelse`, `cond`
//! - Targets: redirect arrays such as `helper(id)`
//! - Comparisons: `statetype = S`, `animelem = 3` and other named
//!   comparisons
//!
//! Arrays receive their argument unevaluated. Several arguments arrive as a
//! right-nested vector (`ifelse(a, b, c)` parses as `a , (b , c)`); the
//! helpers here flatten it.

use crate::context::Combatant;
use crate::evaluator::{EvalError, Evaluator};
use crate::parser::Expr;
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub mod comparisons;
pub mod control;
pub mod math;
pub mod queries;
pub mod slots;
pub mod targets;
pub mod variables;

/// Register the standard variables, arrays and named comparisons.
///
/// Hosts that want to add or override triggers can start from
/// [`SymbolTables::standard`](crate::symbols::SymbolTables::standard) and
/// call `to_builder()`, or build from scratch:
///
/// ```
/// use mugen_trigger_core::stdlib::register_stdlib;
/// use mugen_trigger_core::symbols::SymbolTablesBuilder;
///
/// let mut builder = SymbolTablesBuilder::new();
/// register_stdlib(&mut builder);
/// let symbols = builder.build();
/// assert!(symbols.array("var").is_some());
/// ```
pub fn register_stdlib(builder: &mut SymbolTablesBuilder) {
    variables::register(builder);
    math::register(builder);
    slots::register(builder);
    queries::register(builder);
    control::register(builder);
    targets::register(builder);
    comparisons::register(builder);
}

// ============================================================================
// Argument helpers
// ============================================================================

/// The argument nodes of a multi-argument array call.
pub(crate) fn argument_nodes<'e>(argument: &'e Expr<'e>) -> Vec<&'e Expr<'e>> {
    let mut nodes = Vec::new();
    let mut current = argument;
    while let Expr::Vector { x, y } = *current {
        nodes.push(x);
        current = y;
    }
    nodes.push(current);
    nodes
}

/// Evaluates every argument of a multi-argument array call.
pub(crate) fn evaluate_arguments(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Vec<Value>, EvalError> {
    argument_nodes(argument)
        .into_iter()
        .map(|node| evaluator.eval(node, combatant))
        .collect()
}

/// Evaluates a single integer argument. A missing argument is `None`.
pub(crate) fn optional_int(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Option<i32>, EvalError> {
    if matches!(argument, Expr::Null) {
        return Ok(None);
    }
    Ok(Some(evaluator.eval(argument, combatant)?.to_int()))
}

#[cfg(test)]
mod stdlib_test;
