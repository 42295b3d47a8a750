//! Public API for compiling and evaluating trigger expressions.
//!
//! An [`Engine`] holds the symbol tables (the standard ones plus whatever
//! the host registers) and compiles trigger text into [`CompiledTrigger`]s
//! allocated in the engine's arena. A compiled trigger is evaluated against
//! a [`Combatant`](crate::context::Combatant) every tick.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use mugen_trigger_core::api::{Engine, EngineOptions};
//! use mugen_trigger_core::context::{CombatantState, Fighter, World};
//! use mugen_trigger_core::values::Value;
//! use std::rc::Rc;
//!
//! let arena = Bump::new();
//! let engine = Engine::new(&arena, EngineOptions::default(), |builder| {
//!     builder.register_variable("combo", |c| Value::int(c.state().hit_count * 2));
//! });
//!
//! let trigger = engine.compile("life > 500 && combo = 0").unwrap();
//!
//! let kfm = Fighter::new(CombatantState::new("kfm"), Rc::new(World::default()));
//! assert!(trigger.evaluate_bool(&kfm).unwrap());
//! ```

pub mod engine;
pub mod error;
pub mod options;
pub mod trigger;

pub use engine::Engine;
pub use error::{Diagnostic, Error, Severity};
pub use options::{EngineOptions, EvalOptions, ParseOptions};
pub use trigger::CompiledTrigger;
