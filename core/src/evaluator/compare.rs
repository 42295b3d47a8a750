//! `=`, `!=` and the ordinal comparisons.

use super::{EvalError, Evaluator, NamedComparison};
use crate::context::Combatant;
use crate::parser::{ComparisonOp, Expr};
use crate::values::Value;

pub(super) fn comparison(
    evaluator: &mut Evaluator<'_>,
    op: ComparisonOp,
    left: &Expr<'_>,
    right: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    // `p2, life > 100`: the right side belongs to the original combatant,
    // the left side to the redirect target.
    if let Expr::Vector { x, y } = *left {
        let first = evaluator.eval(x, combatant)?;
        match evaluator.redirect_target(&first, combatant) {
            Some(Some(other)) => {
                let right_value = evaluator.eval(right, combatant)?;
                return compare_to(evaluator, op, y, right, right_value, other);
            }
            Some(None) => return Ok(Value::Bottom),
            None => {
                let left_value = Value::vector(first, evaluator.eval(y, combatant)?);
                let right_value = evaluator.eval(right, combatant)?;
                return values(op, &left_value, &right_value).map(Value::Boolean);
            }
        }
    }

    let right_value = evaluator.eval(right, combatant)?;
    compare_to(evaluator, op, left, right, right_value, combatant)
}

/// Compares `left`, evaluated on `combatant`, against an already evaluated
/// right side.
fn compare_to(
    evaluator: &mut Evaluator<'_>,
    op: ComparisonOp,
    left: &Expr<'_>,
    right: &Expr<'_>,
    right_value: Value,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    if matches!(op, ComparisonOp::Eq | ComparisonOp::Neq) {
        if let Some((name, negated)) = left.variable_name() {
            if let Some(routine) = evaluator.symbols().comparison(name) {
                let request = NamedComparison {
                    name,
                    right,
                    value: &right_value,
                };
                let holds = routine(&request, combatant) != negated;
                return Ok(Value::Boolean(holds == (op == ComparisonOp::Eq)));
            }
        }
    }

    let left_value = evaluator.eval(left, combatant)?;
    values(op, &left_value, &right_value).map(Value::Boolean)
}

/// Compares two evaluated values.
///
/// A range on the right tests membership. Otherwise equality is numeric
/// when either side is a float and textual (ignoring ASCII case) when
/// neither is; ordinal comparisons are always numeric.
pub(crate) fn values(op: ComparisonOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    if let Value::Range { low, high } = *right {
        let member = (low..=high).contains(&left.to_int());
        return match op {
            ComparisonOp::Eq => Ok(member),
            ComparisonOp::Neq => Ok(!member),
            _ => Err(EvalError::UnsupportedOperands {
                op: op.symbol(),
                left: left.to_string(),
                right: right.to_string(),
            }),
        };
    }

    let float = left.is_float() || right.is_float();
    Ok(match op {
        ComparisonOp::Eq | ComparisonOp::Neq => {
            let equal = if float {
                left.to_float() == right.to_float()
            } else {
                left.as_text().eq_ignore_ascii_case(&right.as_text())
            };
            equal == (op == ComparisonOp::Eq)
        }
        _ if float => op.holds(left.to_float(), right.to_float()),
        _ => op.holds(left.to_int(), right.to_int()),
    })
}
