//! mugen-trigger - MUGEN trigger expressions for Rust hosts
//!
//! # Overview
//!
//! State controllers in MUGEN characters fire when their triggers hold:
//! small expressions such as `stateno = 200 && animelem = 3, >= 2` or
//! `p2, statetype = A`. This crate parses that text once and evaluates it
//! every tick against a host-provided [`Combatant`].
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use mugen_trigger::{Engine, EngineOptions};
//! use mugen_trigger::context::{CombatantState, Fighter, World};
//! use std::rc::Rc;
//!
//! // Compiled triggers live in the arena
//! let arena = Bump::new();
//! let engine = Engine::new(&arena, EngineOptions::default(), |builder| {
//!     // Hosts can add their own names next to the standard ones
//!     builder.register_variable("combo", |c| mugen_trigger::Value::int(c.state().hit_count));
//! });
//!
//! let trigger = engine.compile("life > 500 && combo = 0").unwrap();
//!
//! let kfm = Fighter::new(CombatantState::new("kfm"), Rc::new(World::default()));
//! assert!(trigger.evaluate_bool(&kfm).unwrap());
//! ```
//!
//! # Errors
//!
//! Malformed text fails at compile time with an [`Error::Parse`] carrying
//! diagnostics; [`render_error`] prints them with the offending span
//! highlighted. Unknown names and missing redirect targets are not errors:
//! they evaluate to false and are reported through `tracing`.

// Re-export public API from mugen_trigger_core
pub use mugen_trigger_core::api::{
    CompiledTrigger, Diagnostic, Engine, EngineOptions, Error, EvalOptions, ParseOptions,
    Severity,
};

// Re-export the host-facing building blocks
pub use mugen_trigger_core::context::{self, Combatant, Target};
pub use mugen_trigger_core::symbols::{self, CommandLookup, SymbolTables, SymbolTablesBuilder};
pub use mugen_trigger_core::values::{self, Value};

// Re-export errors
pub use mugen_trigger_core::evaluator::EvalError;
pub use mugen_trigger_core::parser::ParseError;

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
