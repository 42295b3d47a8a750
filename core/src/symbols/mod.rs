//! Name registries consulted by the parser and the evaluator.
//!
//! A [`SymbolTables`] maps lowercased names to plain function pointers:
//! variables (`life`, `pos x`), arrays (`var(3)`, `ifelse(...)`) and the
//! named comparisons (`statetype = S`). Variables and arrays are bound into
//! the tree at parse time, so evaluation never looks a name up again unless
//! the parser could not resolve it.
//!
//! The standard tables are built once and shared:
//!
//! ```
//! use mugen_trigger_core::symbols::SymbolTables;
//!
//! let symbols = SymbolTables::standard();
//! assert!(symbols.variable("Life").is_some());
//! assert!(symbols.variable("pos   X").is_some());
//! assert!(symbols.array("ifelse").is_some());
//! ```

use std::borrow::Cow;
use std::fmt;

use hashbrown::HashMap;
use once_cell::sync::Lazy;

use crate::context::Combatant;
use crate::evaluator::{EvalError, Evaluator, NamedComparison};
use crate::parser::Expr;
use crate::values::Value;

#[cfg(test)]
mod symbols_test;

/// Reads a named value off a combatant.
pub type VariableFn = fn(&dyn Combatant) -> Value;

/// Implements `name(argument)`.
///
/// Arrays receive the unevaluated argument so they can decide what to
/// evaluate: `cond` is lazy, and `gethitvar`/`const`/`stagevar` read the
/// argument's name rather than its value.
pub type ArrayFn = fn(&mut Evaluator<'_>, &Expr<'_>, &dyn Combatant) -> Result<Value, EvalError>;

/// Implements `name = right` for names whose equality is not a plain value
/// comparison.
pub type ComparisonFn = fn(&NamedComparison<'_>, &dyn Combatant) -> bool;

/// Maps external command names to the indices the host uses for them.
///
/// When one is supplied at parse time, string literals naming a known
/// command are rewritten to [`Expr::CommandIndex`] nodes.
pub trait CommandLookup {
    fn command_index(&self, name: &str) -> Option<u32>;
}

impl CommandLookup for HashMap<String, u32> {
    fn command_index(&self, name: &str) -> Option<u32> {
        self.get(name).copied()
    }
}

/// Lowercases `name` and collapses runs of whitespace to single spaces.
///
/// `Pos  X` and `pos x` name the same variable.
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    let clean = !trimmed
        .bytes()
        .any(|b| b.is_ascii_uppercase() || (b.is_ascii_whitespace() && b != b' '))
        && !trimmed.contains("  ");
    if clean {
        return Cow::Borrowed(trimmed);
    }
    let mut out = String::with_capacity(trimmed.len());
    for word in trimmed.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(|c| c.to_ascii_lowercase()));
    }
    Cow::Owned(out)
}

/// Immutable registry of variables, arrays and named comparisons.
#[derive(Clone, Default)]
pub struct SymbolTables {
    variables: HashMap<String, VariableFn>,
    arrays: HashMap<String, ArrayFn>,
    comparisons: HashMap<String, ComparisonFn>,
}

static STANDARD: Lazy<SymbolTables> = Lazy::new(|| {
    let mut builder = SymbolTablesBuilder::new();
    crate::stdlib::register_stdlib(&mut builder);
    builder.build()
});

impl SymbolTables {
    /// The tables every character script can use.
    pub fn standard() -> &'static SymbolTables {
        &STANDARD
    }

    /// Starts a builder pre-filled with these tables.
    pub fn to_builder(&self) -> SymbolTablesBuilder {
        SymbolTablesBuilder {
            tables: self.clone(),
        }
    }

    pub fn variable(&self, name: &str) -> Option<VariableFn> {
        self.variables.get(normalize_name(name).as_ref()).copied()
    }

    pub fn array(&self, name: &str) -> Option<ArrayFn> {
        self.arrays.get(normalize_name(name).as_ref()).copied()
    }

    /// Finds the comparison routine for a left-hand name.
    ///
    /// Trailing digits are an id suffix (`projhit1200`), so a name that is
    /// not registered as written is retried without them.
    pub fn comparison(&self, name: &str) -> Option<ComparisonFn> {
        let name = normalize_name(name);
        if let Some(found) = self.comparisons.get(name.as_ref()) {
            return Some(*found);
        }
        let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
        if stem.len() == name.len() || stem.is_empty() {
            return None;
        }
        self.comparisons.get(stem).copied()
    }

    /// Registered variable names, unordered.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Registered array names, unordered.
    pub fn array_names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }
}

impl fmt::Debug for SymbolTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sorted<V>(map: &HashMap<String, V>) -> Vec<&str> {
            let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }
        f.debug_struct("SymbolTables")
            .field("variables", &sorted(&self.variables))
            .field("arrays", &sorted(&self.arrays))
            .field("comparisons", &sorted(&self.comparisons))
            .finish()
    }
}

/// Collects registrations, then freezes them into a [`SymbolTables`].
///
/// Registering a name twice replaces the earlier entry, which is how a host
/// overrides a standard trigger.
///
/// ```
/// use mugen_trigger_core::symbols::{SymbolTables, SymbolTablesBuilder};
/// use mugen_trigger_core::values::Value;
///
/// let mut builder = SymbolTables::standard().to_builder();
/// builder.register_variable("answer", |_| Value::int(42));
/// let symbols = builder.build();
/// assert!(symbols.variable("answer").is_some());
/// assert!(symbols.variable("life").is_some());
/// ```
#[derive(Default)]
pub struct SymbolTablesBuilder {
    tables: SymbolTables,
}

impl SymbolTablesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_variable(&mut self, name: &str, accessor: VariableFn) -> &mut Self {
        self.tables
            .variables
            .insert(normalize_name(name).into_owned(), accessor);
        self
    }

    pub fn register_array(&mut self, name: &str, function: ArrayFn) -> &mut Self {
        self.tables
            .arrays
            .insert(normalize_name(name).into_owned(), function);
        self
    }

    pub fn register_comparison(&mut self, name: &str, comparison: ComparisonFn) -> &mut Self {
        self.tables
            .comparisons
            .insert(normalize_name(name).into_owned(), comparison);
        self
    }

    pub fn build(self) -> SymbolTables {
        self.tables
    }
}
