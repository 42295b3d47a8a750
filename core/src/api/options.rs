//! Configuration options for the trigger engine.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Options applied while compiling trigger text.
///
/// # Example
///
/// ```
/// use mugen_trigger_core::api::ParseOptions;
///
/// let options = ParseOptions {
///     command_rewriting: false,
///     ..ParseOptions::default()
/// };
/// assert_eq!(options.max_depth, 500);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Rewrite string literals that name a known command into command
    /// indices. Only has an effect when the engine has a command lookup.
    ///
    /// Default: true
    pub command_rewriting: bool,

    /// Maximum nesting depth of the parsed tree.
    ///
    /// Default: 500
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            command_rewriting: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Options applied while evaluating a compiled trigger.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Maximum evaluation depth (recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// Engine-wide defaults, overridable per call.
///
/// # Example
///
/// ```
/// use mugen_trigger_core::api::{EngineOptions, EvalOptions, ParseOptions};
///
/// let options = EngineOptions {
///     default_parse_options: ParseOptions::default(),
///     default_eval_options: EvalOptions { max_depth: 200 },
/// };
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Used by `Engine::compile()`.
    pub default_parse_options: ParseOptions,

    /// Copied into every trigger the engine compiles.
    pub default_eval_options: EvalOptions,
}
