//! Variable slot arrays: var, fvar, sysvar, sysfvar
//!
//! Reads only. Assignment (`var(3) := 1`) is handled by the evaluator,
//! which recognizes these names on the left of `:=`.

use crate::context::{Combatant, SlotFamily};
use crate::evaluator::{EvalError, Evaluator};
use crate::parser::Expr;
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub fn register(builder: &mut SymbolTablesBuilder) {
    builder
        .register_array("var", var)
        .register_array("fvar", fvar)
        .register_array("sysvar", sysvar)
        .register_array("sysfvar", sysfvar);
}

fn read(
    family: SlotFamily,
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let index = evaluator.eval(argument, combatant)?.to_int();
    Ok(match combatant.variables().get(family, index) {
        Some(value) => value,
        None => {
            tracing::warn!(family = ?family, index, "variable index out of range");
            Value::Bottom
        }
    })
}

fn var(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    read(SlotFamily::Var, ev, arg, c)
}

fn fvar(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    read(SlotFamily::FVar, ev, arg, c)
}

fn sysvar(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    read(SlotFamily::SysVar, ev, arg, c)
}

fn sysfvar(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    read(SlotFamily::SysFVar, ev, arg, c)
}
