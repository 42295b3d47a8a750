#![allow(dead_code)]

use std::rc::Rc;

use bumpalo::Bump;
use mugen_trigger::context::{CombatantState, Fighter, World};
use mugen_trigger::{Engine, EngineOptions, Error, Value, render_error_to_string_no_color};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

/// Match-wide state shared by every case.
pub static WORLD: Lazy<World> = Lazy::new(|| World {
    game_time: 1200,
    round_no: 2,
    ..World::default()
});

pub fn fighter(name: &str, id: i32) -> Fighter {
    let mut state = CombatantState::new(name);
    state.id = id;
    Fighter::new(state, Rc::new(WORLD.clone()))
}

/// `kfm` (id 1, life 1000) facing `suave` (id 2, life 750) 100 units ahead.
pub fn versus() -> Fighter {
    let mut kfm = fighter("kfm", 1);
    let mut suave = fighter("suave", 2);
    suave.state.pos.x = 100.0;
    suave.state.life = 750;
    kfm.opponents.push(suave);
    kfm
}

pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Compiles `input` and checks whichever expectations are given.
pub fn check(
    input: &str,
    fighter: &Fighter,
    parsed: Option<&str>,
    value: Option<Value>,
    error: Option<&str>,
) {
    init_test_logging();
    let arena = Bump::new();
    let engine = Engine::new(&arena, EngineOptions::default(), |_| {});

    let result: Result<Value, Error> = engine.compile(input).and_then(|trigger| {
        if let Some(parsed) = parsed {
            assert_eq!(trigger.to_string(), parsed, "parse of {:?}", input);
        }
        trigger.evaluate(fighter)
    });

    match (result, error) {
        (Ok(actual), None) => {
            if let Some(value) = value {
                assert_eq!(actual, value, "value of {:?}", input);
            }
        }
        (Ok(actual), Some(error)) => {
            panic!("{:?} evaluated to {} but should fail with {:?}", input, actual, error)
        }
        (Err(err), Some(error)) => {
            let rendered = render_error_to_string_no_color(&err);
            assert!(
                rendered.contains(error),
                "error for {:?} should mention {:?}:\n{}",
                input,
                error,
                rendered
            );
        }
        (Err(err), None) => panic!(
            "{:?} failed:\n{}",
            input,
            render_error_to_string_no_color(&err)
        ),
    }
}

/// Declares a test that compiles a trigger and checks its S-expression
/// form, its value against [`versus`] (or the given fighter), or the error
/// it fails with.
#[macro_export]
macro_rules! test_case {
    (
        $name:ident,
        input: $input:expr,
        $(fighter: $fighter:expr,)?
        $(parsed: $parsed:expr,)?
        $(value: $value:expr,)?
        $(error: $error:expr,)?
    ) => {
        #[test]
        fn $name() {
            let fighter = $crate::cases::versus();
            $(let fighter = $fighter;)?
            let parsed: Option<&str> = None $(.or(Some($parsed)))?;
            let value: Option<mugen_trigger::Value> = None $(.or(Some($value)))?;
            let error: Option<&str> = None $(.or(Some($error)))?;
            $crate::cases::check($input, &fighter, parsed, value, error);
        }
    };
}
