use std::io::{BufRead, BufReader};
use std::rc::Rc;

use bumpalo::Bump;
use clap::Parser;
use miette::{Diagnostic, Result};
use mugen_trigger::context::{
    CombatantState, CommandList, Facing, Fighter, MoveType, SlotFamily, StateType, World,
};
use mugen_trigger::{Engine, EngineOptions, SymbolTables, Value, render_error};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    ExampleHighlighter, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use thiserror::Error;

/// mugen-trigger - Evaluate MUGEN trigger expressions against a demo character
#[derive(Parser, Debug)]
#[command(name = "mugen-trigger")]
#[command(about = "Evaluate MUGEN trigger expressions", long_about = None)]
struct Args {
    /// Print the parsed tree as an S-expression (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Set a field of the evaluated character, e.g. `--set life=300`,
    /// `--set statetype=C`, `--set var(3)=7`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    settings: Vec<String>,

    /// Set a field of the opponent (`p2`), same keys as `--set`
    #[arg(long = "p2", value_name = "KEY=VALUE")]
    p2_settings: Vec<String>,

    /// Evaluate without an opponent
    #[arg(long, conflicts_with = "p2_settings")]
    solo: bool,

    /// Define an input command that is active this tick (repeatable)
    #[arg(long = "command", value_name = "NAME")]
    commands: Vec<String>,

    /// Trigger to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("expected KEY=VALUE, got '{0}'")]
    #[diagnostic(code(cli::setting_syntax), help("for example: --set life=500"))]
    SettingSyntax(String),

    #[error("unknown setting '{0}'")]
    #[diagnostic(
        code(cli::unknown_setting),
        help("known settings: name, id, life, lifemax, power, powermax, stateno, prevstateno, time, statetype, movetype, ctrl, pos x, pos y, vel x, vel y, facing, anim, hitcount, random, var(N), fvar(N), sysvar(N), sysfvar(N)")
    )]
    UnknownSetting(String),

    #[error("invalid value '{value}' for '{key}'")]
    #[diagnostic(code(cli::invalid_value))]
    InvalidValue { key: String, value: String },
}

// ============================================================================
// Demo characters
// ============================================================================

fn invalid(key: &str, value: &str) -> CliError {
    CliError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_letter<T>(key: &str, value: &str, from_letter: fn(char) -> Option<T>) -> Result<T, CliError> {
    let mut letters = value.trim().chars();
    match (letters.next(), letters.next()) {
        (Some(letter), None) => from_letter(letter).ok_or_else(|| invalid(key, value)),
        _ => Err(invalid(key, value)),
    }
}

/// `var(3)` → (Var, 3)
fn parse_slot(key: &str) -> Option<(SlotFamily, i32)> {
    let (family, rest) = key.split_once('(')?;
    let index = rest.strip_suffix(')')?.trim().parse().ok()?;
    Some((SlotFamily::from_name(family.trim())?, index))
}

/// Applies one `KEY=VALUE` setting to `fighter`.
fn apply_setting(fighter: &mut Fighter, setting: &str) -> Result<(), CliError> {
    let (key, value) = setting
        .split_once('=')
        .ok_or_else(|| CliError::SettingSyntax(setting.to_string()))?;
    let key = mugen_trigger::symbols::normalize_name(key).into_owned();
    let state = &mut fighter.state;

    match key.as_str() {
        "name" => state.name = value.trim().to_string(),
        "id" => state.id = parse_number(&key, value)?,
        "life" => state.life = parse_number(&key, value)?,
        "lifemax" => state.life_max = parse_number(&key, value)?,
        "power" => state.power = parse_number(&key, value)?,
        "powermax" => state.power_max = parse_number(&key, value)?,
        "stateno" => state.state_no = parse_number(&key, value)?,
        "prevstateno" => state.prev_state_no = parse_number(&key, value)?,
        "time" | "statetime" => state.state_time = parse_number(&key, value)?,
        "statetype" => state.state_type = parse_letter(&key, value, StateType::from_letter)?,
        "movetype" => state.move_type = parse_letter(&key, value, MoveType::from_letter)?,
        "ctrl" => state.ctrl = parse_number::<i32>(&key, value)? != 0,
        "pos x" => state.pos.x = parse_number(&key, value)?,
        "pos y" => state.pos.y = parse_number(&key, value)?,
        "vel x" => state.vel.x = parse_number(&key, value)?,
        "vel y" => state.vel.y = parse_number(&key, value)?,
        "facing" => {
            state.facing = match parse_number::<i32>(&key, value)? {
                1 => Facing::Right,
                -1 => Facing::Left,
                _ => return Err(invalid(&key, value)),
            }
        }
        "anim" => state.animation.number = parse_number(&key, value)?,
        "hitcount" => state.hit_count = parse_number(&key, value)?,
        "random" => fighter.fixed_random = Some(parse_number(&key, value)?),
        _ => {
            let (family, index) =
                parse_slot(&key).ok_or_else(|| CliError::UnknownSetting(key.clone()))?;
            fighter
                .variables
                .set(family, index, &Value::from_text(value.trim()))
                .ok_or_else(|| invalid(&key, value))?;
        }
    }
    Ok(())
}

fn build_fighter(args: &Args) -> Result<Fighter, CliError> {
    let world = Rc::new(World::default());

    let mut state = CombatantState::new("kfm");
    state.id = 1;
    let mut fighter = Fighter::new(state, world.clone());
    fighter.commands = CommandList::new(args.commands.iter().cloned());
    for command in &args.commands {
        fighter.commands.set_active(command, true);
    }
    for setting in &args.settings {
        apply_setting(&mut fighter, setting)?;
    }

    if !args.solo {
        let mut state = CombatantState::new("p2");
        state.id = 2;
        state.pos.x = 80.0;
        state.facing = Facing::Left;
        let mut opponent = Fighter::new(state, world);
        for setting in &args.p2_settings {
            apply_setting(&mut opponent, setting)?;
        }
        fighter.opponents.push(opponent);
    }

    tracing::debug!(name = %fighter.state.name, opponents = fighter.opponents.len(), "demo characters ready");
    Ok(fighter)
}

// ============================================================================
// Line editor
// ============================================================================

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(symbols: &SymbolTables) -> (Reedline, DefaultPrompt) {
    // Single-word names only; `pos x` and friends complete on their first word.
    let mut names: Vec<String> = symbols
        .variable_names()
        .chain(symbols.array_names())
        .filter(|name| !name.contains(' '))
        .map(str::to_string)
        .collect();
    names.sort_unstable();
    names.dedup();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['.', '_']);
        completions.insert(names.clone());
        completions
    });

    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(ExampleHighlighter::new(names)))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("trigger".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

// ============================================================================
// Evaluation
// ============================================================================

fn interpret_input(engine: &Engine<'_>, fighter: &Fighter, input: &str, debug_parse: bool) {
    let trigger = match engine.compile(input) {
        Ok(trigger) => trigger,
        Err(e) => {
            render_error(&e);
            return;
        }
    };

    if debug_parse {
        println!("=== Parsed Trigger ===");
        println!("{}", trigger);
        println!();
    }

    match trigger.evaluate(fighter) {
        Ok(Value::Bottom) => println!("<bottom>"),
        Ok(Value::Symbol(name)) => println!("'{} (unknown name, false)", name),
        Ok(value) => println!("{}", value),
        Err(e) => render_error(&e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // MUGEN_TRIGGER_LOG or RUST_LOG control the log level; WARN by default
    // so unknown names are reported.
    let filter = EnvFilter::try_from_env("MUGEN_TRIGGER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let fighter = build_fighter(&args)?;

    let arena = Bump::new();
    let engine =
        Engine::new(&arena, EngineOptions::default(), |_| {}).with_commands(&fighter.commands);

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        interpret_input(&engine, &fighter, expr, args.debug_parse);
        return Ok(());
    }

    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        let (mut line_editor, prompt) = setup_reedline(engine.symbols());

        println!("MUGEN trigger REPL - Type triggers to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    interpret_input(&engine, &fighter, buffer.as_ref(), args.debug_parse);
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            interpret_input(&engine, &fighter, &line, args.debug_parse);
        }
    }

    Ok(())
}
