//! Arithmetic and bitwise operators.
//!
//! Operands are promoted to floating point when either one is a float (or
//! text shaped like one); otherwise integer arithmetic wraps. Integer
//! division by zero has no value.

use super::EvalError;
use crate::parser::BinaryOp;
use crate::values::{Value, atoi};

pub(super) fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    if op == BinaryOp::Add {
        if let Some(offset) = offset_other_file(left, right) {
            return Ok(offset);
        }
    }

    let float = left.is_float() || right.is_float();
    let result = match op {
        BinaryOp::Add if float => Value::Float(left.to_float() + right.to_float()),
        BinaryOp::Add => Value::Integer(left.to_int().wrapping_add(right.to_int())),
        BinaryOp::Sub if float => Value::Float(left.to_float() - right.to_float()),
        BinaryOp::Sub => Value::Integer(left.to_int().wrapping_sub(right.to_int())),
        BinaryOp::Mul if float => Value::Float(left.to_float() * right.to_float()),
        BinaryOp::Mul => Value::Integer(left.to_int().wrapping_mul(right.to_int())),

        BinaryOp::Div if float => {
            let divisor = right.to_float();
            if divisor == 0.0 {
                Value::Bottom
            } else {
                Value::Float(left.to_float() / divisor)
            }
        }
        BinaryOp::Div => match right.to_int() {
            0 => Value::Bottom,
            divisor => Value::Integer(left.to_int().wrapping_div(divisor)),
        },

        BinaryOp::Mod if float => {
            return Err(EvalError::UnsupportedOperands {
                op: op.symbol(),
                left: left.to_string(),
                right: right.to_string(),
            });
        }
        BinaryOp::Mod => match right.to_int() {
            0 => Value::Bottom,
            divisor => Value::Integer(left.to_int().wrapping_rem(divisor)),
        },

        BinaryOp::Pow => power(left, right, float),

        BinaryOp::BitAnd => Value::Integer(left.to_int() & right.to_int()),
        BinaryOp::BitOr => Value::Integer(left.to_int() | right.to_int()),
        BinaryOp::BitXor => Value::Integer(left.to_int() ^ right.to_int()),
    };
    Ok(result)
}

/// `**`: integer exponentiation unless a float is involved or the exponent
/// is negative.
fn power(base: &Value, exponent: &Value, float: bool) -> Value {
    let int_exponent = exponent.to_int();
    if float || int_exponent < 0 {
        return Value::Float(base.to_float().powf(exponent.to_float()));
    }
    let base = base.to_int();
    let exponent = int_exponent.unsigned_abs();
    Value::Integer(base.wrapping_pow(exponent))
}

/// A sprite, sound or animation number in another file: `f` for the fight
/// file, `s` for the common sound file. Formats as `isinotherfilef 100`.
pub fn other_file(file: char, number: i32) -> Value {
    Value::Text(format!("isinotherfile{} {}", file.to_ascii_lowercase(), number))
}

/// `f100 + 5` names element 105 of the other file.
fn offset_other_file(left: &Value, right: &Value) -> Option<Value> {
    let Value::Text(text) = left else {
        return None;
    };
    let (word, number) = text.split_once(' ')?;
    let word = word.to_ascii_lowercase();
    let file = match word.strip_prefix("isinotherfile")? {
        "f" => 'f',
        "s" => 's',
        _ => return None,
    };
    Some(other_file(file, atoi(number).wrapping_add(right.to_int())))
}
