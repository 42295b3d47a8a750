//! Conditional arrays
//!
//! `ifelse(c, a, b)`, `sifelse(c, a, b)` and `cond(c, a, b)` evaluate the
//! condition and then only the branch they return, so an assignment in
//! the untaken branch never happens.

use super::argument_nodes;
use crate::context::Combatant;
use crate::evaluator::{EvalError, Evaluator};
use crate::parser::Expr;
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub fn register(builder: &mut SymbolTablesBuilder) {
    builder
        .register_array("ifelse", ifelse)
        .register_array("sifelse", sifelse)
        .register_array("cond", cond);
}

fn ifelse(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    choose("ifelse", evaluator, argument, combatant)
}

fn sifelse(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    choose("sifelse", evaluator, argument, combatant)
}

fn cond(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    choose("cond", evaluator, argument, combatant)
}

fn choose(
    name: &str,
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let nodes = argument_nodes(argument);
    let [condition, then, otherwise] = nodes.as_slice() else {
        tracing::warn!(name, count = nodes.len(), "conditional takes three arguments");
        return Ok(Value::Bottom);
    };
    if evaluator.eval_bool(condition, combatant)? {
        evaluator.eval(then, combatant)
    } else {
        evaluator.eval(otherwise, combatant)
    }
}
