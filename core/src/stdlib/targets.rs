//! Redirect arrays
//!
//! `helper(3)`, `enemynear(1)` and friends evaluate to the redirect phrase
//! (`"helper 3"`), which the evaluator resolves when the phrase heads a
//! vector: `helper(3), life`.

use super::optional_int;
use crate::context::{Combatant, Target, redirect};
use crate::evaluator::{EvalError, Evaluator};
use crate::parser::Expr;
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub fn register(builder: &mut SymbolTablesBuilder) {
    builder
        .register_array("helper", helper)
        .register_array("enemy", enemy)
        .register_array("enemynear", enemynear)
        .register_array("target", target)
        .register_array("playerid", playerid)
        .register_array("playeridexist", playeridexist);
}

fn phrase(
    word: &str,
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    Ok(match optional_int(evaluator, argument, combatant)? {
        Some(id) => Value::Text(format!("{} {}", word, id)),
        None => Value::text(word),
    })
}

fn helper(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    phrase("helper", ev, arg, c)
}

fn enemy(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    phrase("enemy", ev, arg, c)
}

fn enemynear(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    phrase("enemynear", ev, arg, c)
}

fn target(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    phrase("target", ev, arg, c)
}

fn playerid(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    phrase("playerid", ev, arg, c)
}

fn playeridexist(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = evaluator.eval(argument, combatant)?.to_int();
    Ok(Value::Boolean(redirect(combatant, Target::PlayerId(id)).is_some()))
}
