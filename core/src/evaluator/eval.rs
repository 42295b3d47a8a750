//! Core evaluation logic.

use super::{EvalError, EvaluatorOptions, compare, operators};
use crate::context::{Combatant, SlotFamily, Target, redirect};
use crate::parser::{BoolOp, Expr, Literal, UnaryOp};
use crate::symbols::SymbolTables;
use crate::values::{Value, atoi};

/// Truth value of a trigger result.
///
/// A symbol is an unresolved name; using one as a condition is almost
/// always a typo, so it is reported.
pub fn truthy(value: &Value) -> bool {
    if let Value::Symbol(name) = value {
        tracing::warn!(
            name = name.as_str(),
            "unknown name used as a condition; treating it as false"
        );
        return false;
    }
    value.to_bool()
}

/// Evaluator for parsed trigger expressions.
pub struct Evaluator<'s> {
    symbols: &'s SymbolTables,
    options: EvaluatorOptions,
    depth: usize,
}

impl<'s> Evaluator<'s> {
    pub fn new(symbols: &'s SymbolTables, options: EvaluatorOptions) -> Self {
        Self {
            symbols,
            options,
            depth: 0,
        }
    }

    pub fn symbols(&self) -> &'s SymbolTables {
        self.symbols
    }

    /// Evaluates `expr` against `combatant`.
    pub fn eval(&mut self, expr: &Expr<'_>, combatant: &dyn Combatant) -> Result<Value, EvalError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            let depth = self.depth;
            self.depth -= 1;
            return Err(EvalError::StackOverflow {
                depth,
                max_depth: self.options.max_depth,
            });
        }
        let result = self.eval_inner(expr, combatant);
        self.depth -= 1;
        result
    }

    /// Evaluates `expr` and applies trigger truthiness.
    pub fn eval_bool(&mut self, expr: &Expr<'_>, combatant: &dyn Combatant) -> Result<bool, EvalError> {
        Ok(truthy(&self.eval(expr, combatant)?))
    }

    /// Resolves a value that spells a redirect phrase (`p2`, `helper 3`).
    ///
    /// The outer `None` means the value is not a phrase at all; the inner
    /// one means nobody matched it.
    pub fn redirect_target<'c>(
        &self,
        phrase: &Value,
        combatant: &'c dyn Combatant,
    ) -> Option<Option<&'c dyn Combatant>> {
        let target = match phrase {
            Value::Text(text) | Value::Symbol(text) => Target::from_phrase(text)?,
            _ => return None,
        };
        let found = redirect(combatant, target);
        if found.is_none() {
            tracing::warn!(redirect = ?target, "redirect target does not exist");
        }
        Some(found)
    }

    fn eval_inner(&mut self, expr: &Expr<'_>, combatant: &dyn Combatant) -> Result<Value, EvalError> {
        match *expr {
            Expr::Null => Ok(Value::Boolean(false)),
            Expr::Literal(Literal::Integer(i)) => Ok(Value::Integer(i)),
            Expr::Literal(Literal::Float(f)) => Ok(Value::Float(f)),
            Expr::Literal(Literal::Text(text)) => Ok(Value::text(text)),
            Expr::CommandIndex { name, .. } => Ok(Value::text(name)),
            Expr::Variable { accessor, .. } => Ok(accessor(combatant)),
            Expr::RawVariable(name) => Ok(raw_value(name)),

            Expr::Unary { op, operand } => {
                let value = self.eval(operand, combatant)?;
                Ok(match op {
                    UnaryOp::Not => Value::Boolean(!truthy(&value)),
                    UnaryOp::Neg if value.is_float() => Value::Float(-value.to_float()),
                    UnaryOp::Neg => Value::Integer(value.to_int().wrapping_neg()),
                    UnaryOp::BitNot => Value::Integer(!value.to_int()),
                })
            }

            Expr::Binary { op, left, right } => {
                let left = self.eval(left, combatant)?;
                let right = self.eval(right, combatant)?;
                operators::binary(op, &left, &right)
            }

            Expr::Boolean { op, left, right } => {
                let left = self.eval_bool(left, combatant)?;
                let result = match op {
                    BoolOp::And => left && self.eval_bool(right, combatant)?,
                    BoolOp::Or => left || self.eval_bool(right, combatant)?,
                    BoolOp::Xor => left != self.eval_bool(right, combatant)?,
                };
                Ok(Value::Boolean(result))
            }

            Expr::Comparison { op, left, right } => {
                compare::comparison(self, op, left, right, combatant)
            }

            Expr::SetVariable { target, value } => self.assign(target, value, combatant),

            Expr::Vector { x, y } => {
                let first = self.eval(x, combatant)?;
                match self.redirect_target(&first, combatant) {
                    Some(Some(other)) => self.eval(y, other),
                    Some(None) => Ok(Value::Bottom),
                    None => Ok(Value::vector(first, self.eval(y, combatant)?)),
                }
            }

            Expr::OperatorArgument { op, operand } => {
                let value = self.eval(operand, combatant)?;
                Ok(Value::Text(format!("{} {}", op, value)))
            }

            Expr::Range {
                inner,
                exclude_low,
                exclude_high,
            } => match self.eval(inner, combatant)? {
                Value::Vector(low, high) => {
                    let low = low.to_int().saturating_add(i32::from(exclude_low));
                    let high = high.to_int().saturating_sub(i32::from(exclude_high));
                    Ok(Value::range(low, high))
                }
                other => {
                    tracing::warn!(value = %other, "range literal needs two bounds");
                    Ok(Value::Bottom)
                }
            },

            Expr::Array {
                name,
                function,
                argument,
            } => match function.or_else(|| self.symbols.array(name)) {
                Some(function) => function(self, argument, combatant),
                None => {
                    tracing::warn!(name, "unknown array; evaluating to false");
                    Ok(Value::Boolean(false))
                }
            },
        }
    }

    fn assign(
        &mut self,
        target: &Expr<'_>,
        value: &Expr<'_>,
        combatant: &dyn Combatant,
    ) -> Result<Value, EvalError> {
        // `p2, var(3) := 9` writes the redirect target's slot; the value is
        // still computed on the original combatant.
        if let Expr::Vector { x, y } = *target {
            let first = self.eval(x, combatant)?;
            if let Some(found) = self.redirect_target(&first, combatant) {
                let written = self.eval(value, combatant)?;
                return match found {
                    Some(other) => self.store(y, &written, combatant, other),
                    None => Ok(Value::Bottom),
                };
            }
        }

        let written = self.eval(value, combatant)?;
        self.store(target, &written, combatant, combatant)
    }

    /// Writes `value` into the slot `target` names on `owner`. The slot
    /// index is evaluated on `combatant`.
    fn store(
        &mut self,
        target: &Expr<'_>,
        value: &Value,
        combatant: &dyn Combatant,
        owner: &dyn Combatant,
    ) -> Result<Value, EvalError> {
        let family = match *target {
            Expr::Array { name, argument, .. } => {
                SlotFamily::from_name(name).map(|family| (family, name, argument))
            }
            _ => None,
        };
        let Some((family, name, argument)) = family else {
            return Err(EvalError::InvalidAssignment {
                target: target.to_string(),
            });
        };

        let index = self.eval(argument, combatant)?.to_int();
        match owner.variables().set(family, index, value) {
            Some(written) => Ok(written),
            None => {
                tracing::warn!(name, index, "variable index out of range");
                Ok(Value::Bottom)
            }
        }
    }
}

/// Value of a name nothing is registered under.
///
/// `f123` and `s123` refer to a sprite, sound or animation in another file
/// (the fight file or the common sound file); those become a phrase
/// arithmetic can still offset. Everything else is a symbol.
fn raw_value(name: &str) -> Value {
    let mut chars = name.chars();
    match chars.next() {
        Some(file @ ('f' | 's')) if is_number(chars.as_str()) => {
            super::other_file(file, atoi(chars.as_str()))
        }
        _ => Value::symbol(name),
    }
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
