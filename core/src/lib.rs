//! Parser and evaluator for MUGEN-style trigger expressions.
//!
//! Trigger text such as `stateno = 200 && animelem = 3, >= 2` is parsed
//! once into an arena-allocated [`parser::Expr`] tree and evaluated every
//! tick against a [`context::Combatant`]. Most hosts only need the
//! [`api`] module.

pub mod api;
pub mod context;
pub mod evaluator;
pub mod parser;
pub mod stdlib;
pub mod symbols;
pub mod values;
