//! Math arrays
//!
//! Functions: abs, exp, ln, log, cos, acos, sin, asin, tan, atan, floor,
//!            ceil
//!
//! Results outside a function's domain (`ln(0)`, `acos(2)`) have no value.

use super::evaluate_arguments;
use crate::context::Combatant;
use crate::evaluator::{EvalError, Evaluator};
use crate::parser::Expr;
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub fn register(builder: &mut SymbolTablesBuilder) {
    builder
        .register_array("abs", math_abs)
        .register_array("exp", math_exp)
        .register_array("ln", math_ln)
        .register_array("log", math_log)
        .register_array("cos", math_cos)
        .register_array("acos", math_acos)
        .register_array("sin", math_sin)
        .register_array("asin", math_asin)
        .register_array("tan", math_tan)
        .register_array("atan", math_atan)
        .register_array("floor", math_floor)
        .register_array("ceil", math_ceil);
}

fn finite(value: f64) -> Value {
    if value.is_finite() {
        Value::Float(value)
    } else {
        Value::Bottom
    }
}

/// Applies `f` to the argument as a float.
fn unary_float(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
    f: fn(f64) -> f64,
) -> Result<Value, EvalError> {
    let value = evaluator.eval(argument, combatant)?.to_float();
    Ok(finite(f(value)))
}

// ============================================================================
// Basic Operations
// ============================================================================

/// Absolute value, keeping integers integral
fn math_abs(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let value = evaluator.eval(argument, combatant)?;
    Ok(if value.is_float() {
        Value::Float(value.to_float().abs())
    } else {
        Value::Integer(value.to_int().wrapping_abs())
    })
}

fn math_floor(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let value = evaluator.eval(argument, combatant)?;
    Ok(Value::Integer(value.to_float().floor() as i32))
}

fn math_ceil(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let value = evaluator.eval(argument, combatant)?;
    Ok(Value::Integer(value.to_float().ceil() as i32))
}

// ============================================================================
// Exponentials and Logarithms
// ============================================================================

fn math_exp(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::exp)
}

/// Natural logarithm
fn math_ln(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::ln)
}

/// `log(base, value)`
fn math_log(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let args = evaluate_arguments(evaluator, argument, combatant)?;
    let [base, value] = args.as_slice() else {
        tracing::warn!(count = args.len(), "log takes a base and a value");
        return Ok(Value::Bottom);
    };
    let (base, value) = (base.to_float(), value.to_float());
    if base <= 0.0 || value <= 0.0 {
        return Ok(Value::Bottom);
    }
    Ok(finite(value.ln() / base.ln()))
}

// ============================================================================
// Trigonometry
// ============================================================================

fn math_cos(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::cos)
}

fn math_acos(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::acos)
}

fn math_sin(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::sin)
}

fn math_asin(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::asin)
}

fn math_tan(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::tan)
}

fn math_atan(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    unary_float(evaluator, argument, combatant, f64::atan)
}
