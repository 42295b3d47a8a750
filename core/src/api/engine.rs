//! The trigger compilation engine.

use bumpalo::Bump;

use super::{CompiledTrigger, EngineOptions, Error, ParseOptions};
use crate::parser::Parser;
use crate::symbols::{CommandLookup, SymbolTables, SymbolTablesBuilder};

/// Compiles trigger text against a fixed set of symbol tables.
///
/// The engine manages:
/// - Symbol tables (the standard library plus host registrations)
/// - An optional command lookup for rewriting `command = "name"` literals
/// - Default parse and evaluation options
///
/// # Lifetimes
///
/// - `'arena`: Lifetime of the arena holding compiled trees. Compiled
///   triggers borrow from both the arena and the engine.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use mugen_trigger_core::api::{Engine, EngineOptions};
/// use mugen_trigger_core::context::CommandList;
///
/// let arena = Bump::new();
/// let commands = CommandList::new(["QCF_x", "holdfwd"]);
/// let engine = Engine::new(&arena, EngineOptions::default(), |_| {})
///     .with_commands(&commands);
///
/// let trigger = engine.compile(r#"command = "holdfwd""#).unwrap();
/// assert_eq!(trigger.to_string(), r#"(= 'command command#1("holdfwd"))"#);
/// ```
pub struct Engine<'arena> {
    arena: &'arena Bump,
    symbols: SymbolTables,
    commands: Option<&'arena dyn CommandLookup>,
    options: EngineOptions,
}

impl<'arena> Engine<'arena> {
    /// Create a new engine over the standard symbol tables.
    ///
    /// The initialization closure can register additional variables,
    /// arrays and named comparisons, or replace standard ones.
    pub fn new(
        arena: &'arena Bump,
        options: EngineOptions,
        init: impl FnOnce(&mut SymbolTablesBuilder),
    ) -> Self {
        let mut builder = SymbolTables::standard().to_builder();
        init(&mut builder);
        Self {
            arena,
            symbols: builder.build(),
            commands: None,
            options,
        }
    }

    /// Create an engine over caller-built symbol tables.
    pub fn with_symbols(arena: &'arena Bump, options: EngineOptions, symbols: SymbolTables) -> Self {
        Self {
            arena,
            symbols,
            commands: None,
            options,
        }
    }

    /// Use `commands` to rewrite command-name literals at compile time.
    pub fn with_commands(mut self, commands: &'arena dyn CommandLookup) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compile a trigger with the engine's default parse options.
    pub fn compile(&self, source: &str) -> Result<CompiledTrigger<'_>, Error> {
        self.compile_with_options(source, self.options.default_parse_options)
    }

    /// Compile a trigger.
    ///
    /// # Returns
    ///
    /// A compiled trigger ready for evaluation, or [`Error::Parse`] with a
    /// diagnostic pointing at the malformed part of `source`.
    pub fn compile_with_options(
        &self,
        source: &str,
        options: ParseOptions,
    ) -> Result<CompiledTrigger<'_>, Error> {
        let mut parser = Parser::new(self.arena, &self.symbols).with_max_depth(options.max_depth);
        if options.command_rewriting {
            if let Some(commands) = self.commands {
                parser = parser.with_commands(commands);
            }
        }

        let expr = parser.parse(source)?;
        Ok(CompiledTrigger::new(
            expr,
            self.arena.alloc_str(source),
            &self.symbols,
            self.options.default_eval_options,
        ))
    }
}
