//! State lookup arrays
//!
//! Arrays that read the character's state by name or by id: hit data,
//! constants, stage info, animation elements, object counts and
//! projectile timers. `f(n)` and `s(n)` name elements of other files.

use super::optional_int;
use crate::context::{Combatant, ProjectileEvent};
use crate::evaluator::{EvalError, Evaluator, other_file};
use crate::parser::Expr;
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub fn register(builder: &mut SymbolTablesBuilder) {
    builder
        .register_array("gethitvar", gethitvar)
        .register_array("const", constant)
        .register_array("stagevar", stagevar)
        .register_array("animelemtime", animelemtime)
        .register_array("animelemno", animelemno)
        .register_array("animexist", animexist)
        .register_array("selfanimexist", animexist)
        .register_array("const240p", const240p)
        .register_array("const480p", const480p)
        .register_array("const720p", const720p)
        .register_array("numtarget", numtarget)
        .register_array("numhelper", numhelper)
        .register_array("numexplod", numexplod)
        .register_array("numprojid", numprojid)
        .register_array("ishelper", ishelper)
        .register_array("projcanceltime", projcanceltime)
        .register_array("projcontacttime", projcontacttime)
        .register_array("projguardedtime", projguardedtime)
        .register_array("projhittime", projhittime)
        .register_array("f", fight_file)
        .register_array("s", sound_file);
}

/// The name an array argument spells, such as `fall.recover` in
/// `gethitvar(fall.recover)`. Falls back to the evaluated text.
fn argument_name(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<String, EvalError> {
    if let Some(name) = argument.as_name() {
        return Ok(name.trim().to_ascii_lowercase());
    }
    let value = evaluator.eval(argument, combatant)?;
    Ok(value.as_text().trim().to_ascii_lowercase())
}

fn int_argument(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<i32, EvalError> {
    Ok(evaluator.eval(argument, combatant)?.to_int())
}

// ============================================================================
// Named lookups
// ============================================================================

fn gethitvar(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let name = argument_name(evaluator, argument, combatant)?;
    let hit = &combatant.state().received_hit;
    Ok(match name.as_str() {
        "animtype" => Value::Integer(hit.anim_type),
        "groundtype" => Value::Integer(hit.ground_type),
        "airtype" => Value::Integer(hit.air_type),
        "xvel" => Value::Float(hit.velocity.x),
        "yvel" => Value::Float(hit.velocity.y),
        "yaccel" => Value::Float(hit.y_accel),
        "fall" => Value::Boolean(hit.fall),
        "fall.recover" => Value::Boolean(hit.fall_recover),
        "fall.yvel" => Value::Float(hit.fall_y_velocity),
        "slidetime" => Value::Integer(hit.slide_time),
        "hitshaketime" => Value::Integer(hit.hit_shake_time),
        "hitcount" => Value::Integer(hit.hit_count),
        "damage" => Value::Integer(hit.damage),
        "fallcount" => Value::Integer(hit.fall_count),
        "ctrltime" => Value::Integer(hit.ctrl_time),
        "isbound" => Value::Boolean(hit.is_bound),
        _ => {
            tracing::warn!(name = name.as_str(), "unknown gethitvar field");
            Value::Bottom
        }
    })
}

fn constant(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let name = argument_name(evaluator, argument, combatant)?;
    Ok(match combatant.state().constants.get(&name) {
        Some(value) => value,
        None => {
            tracing::warn!(name = name.as_str(), "unknown character constant");
            Value::Bottom
        }
    })
}

fn stagevar(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let name = argument_name(evaluator, argument, combatant)?;
    let stage = &combatant.world().stage;
    Ok(match name.as_str() {
        "info.author" => Value::text(stage.author_name.as_str()),
        "info.displayname" => Value::text(stage.display_name.as_str()),
        "info.name" => Value::text(stage.name.as_str()),
        _ => {
            tracing::warn!(name = name.as_str(), "unknown stage variable");
            Value::Bottom
        }
    })
}

// ============================================================================
// Animation
// ============================================================================

/// Ticks since the given element of the current animation started.
fn animelemtime(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let element = int_argument(evaluator, argument, combatant)?;
    let time = combatant.state().animation.time_from_element(element);
    Ok(time.map_or(Value::Bottom, Value::Integer))
}

/// Element shown the given number of ticks from now.
fn animelemno(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let offset = int_argument(evaluator, argument, combatant)?;
    let element = combatant.state().animation.element_at(offset);
    Ok(element.map_or(Value::Bottom, Value::Integer))
}

fn animexist(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let number = int_argument(evaluator, argument, combatant)?;
    Ok(Value::Boolean(combatant.state().animations.contains(&number)))
}

// ============================================================================
// Coordinates
// ============================================================================

fn convert(
    height: f64,
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let value = evaluator.eval(argument, combatant)?.to_float();
    Ok(Value::Float(combatant.world().convert_from_resolution(value, height)))
}

fn const240p(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    convert(240.0, ev, arg, c)
}

fn const480p(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    convert(480.0, ev, arg, c)
}

fn const720p(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    convert(720.0, ev, arg, c)
}

// ============================================================================
// Object counts
// ============================================================================

fn numtarget(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = optional_int(evaluator, argument, combatant)?;
    Ok(Value::Integer(combatant.state().count_targets(id)))
}

fn numhelper(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = optional_int(evaluator, argument, combatant)?;
    Ok(Value::Integer(combatant.state().count_helpers(id)))
}

fn numexplod(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = optional_int(evaluator, argument, combatant)?;
    Ok(Value::Integer(combatant.state().count_explods(id)))
}

fn numprojid(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = int_argument(evaluator, argument, combatant)?;
    Ok(Value::Integer(combatant.state().count_projectiles(Some(id))))
}

/// Whether the character is a helper spawned with the given helper id.
fn ishelper(
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = optional_int(evaluator, argument, combatant)?;
    let state = combatant.state();
    let matches = match id {
        Some(id) => state.helper_id == Some(id),
        None => state.is_helper(),
    };
    Ok(Value::Boolean(matches))
}

// ============================================================================
// Projectile timers
// ============================================================================

/// Ticks since a projectile event, `-1` if it never happened.
fn projectile_time(
    event: ProjectileEvent,
    evaluator: &mut Evaluator<'_>,
    argument: &Expr<'_>,
    combatant: &dyn Combatant,
) -> Result<Value, EvalError> {
    let id = optional_int(evaluator, argument, combatant)?.unwrap_or(0);
    let time = combatant.state().projectile_event_time(event, id);
    Ok(Value::Integer(time.unwrap_or(-1)))
}

fn projcanceltime(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    projectile_time(ProjectileEvent::Cancel, ev, arg, c)
}

fn projcontacttime(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    projectile_time(ProjectileEvent::Contact, ev, arg, c)
}

fn projguardedtime(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    projectile_time(ProjectileEvent::Guarded, ev, arg, c)
}

fn projhittime(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    projectile_time(ProjectileEvent::Hit, ev, arg, c)
}

fn fight_file(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    Ok(other_file('f', ev.eval(arg, c)?.to_int()))
}

fn sound_file(ev: &mut Evaluator<'_>, arg: &Expr<'_>, c: &dyn Combatant) -> Result<Value, EvalError> {
    Ok(other_file('s', ev.eval(arg, c)?.to_int()))
}
