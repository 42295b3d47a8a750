//! The variable table
//!
//! Plain names (`life`, `pos x`, `p2dist x`) bound to accessors at parse
//! time. Coordinates are in the character's local units; distances to
//! another player are measured along the facing direction.

use crate::context::{Combatant, RoundOutcome, Target, redirect};
use crate::symbols::SymbolTablesBuilder;
use crate::values::Value;

pub fn register(builder: &mut SymbolTablesBuilder) {
    register_identity(builder);
    register_status(builder);
    register_position(builder);
    register_others(builder);
    register_match(builder);
}

fn text(value: &str) -> Value {
    Value::text(value)
}

fn letter(letter: char) -> Value {
    Value::Text(letter.to_string())
}

/// The related player a name like `p2life` or `rootdist x` reads from.
fn related(combatant: &dyn Combatant, target: Target) -> Option<&dyn Combatant> {
    let found = redirect(combatant, target);
    if found.is_none() {
        tracing::warn!(redirect = ?target, "no such player for variable");
    }
    found
}

fn p2(combatant: &dyn Combatant) -> Option<&dyn Combatant> {
    related(combatant, Target::EnemyNear(0))
}

fn from_p2(combatant: &dyn Combatant, read: fn(&dyn Combatant) -> Value) -> Value {
    p2(combatant).map_or(Value::Bottom, read)
}

/// Width of the body in front of (or behind) the axis.
fn ground_size(combatant: &dyn Combatant, name: &str) -> f64 {
    combatant
        .state()
        .constants
        .get(name)
        .map_or(0.0, |v| v.to_float())
}

/// Horizontal distance to `other` along `combatant`'s facing direction.
fn distance_x(combatant: &dyn Combatant, other: &dyn Combatant) -> f64 {
    let sign = f64::from(combatant.state().facing.sign());
    (other.state().pos.x - combatant.state().pos.x) * sign
}

fn distance_y(combatant: &dyn Combatant, other: &dyn Combatant) -> f64 {
    other.state().pos.y - combatant.state().pos.y
}

fn distance_to(
    combatant: &dyn Combatant,
    target: Target,
    axis: fn(&dyn Combatant, &dyn Combatant) -> f64,
) -> Value {
    match related(combatant, target) {
        Some(other) => Value::Float(axis(combatant, other)),
        None => Value::Bottom,
    }
}

/// Distance from the axis to the screen edge ahead, and behind.
fn edge_distances(combatant: &dyn Combatant) -> (f64, f64) {
    let world = combatant.world();
    let x = combatant.state().pos.x;
    let to_right = world.right_edge() - x;
    let to_left = x - world.left_edge();
    match combatant.state().facing.sign() {
        1 => (to_right, to_left),
        _ => (to_left, to_right),
    }
}

fn count_while(mut exists: impl FnMut(usize) -> bool) -> i32 {
    let mut count = 0;
    while exists(count) {
        count += 1;
    }
    i32::try_from(count).unwrap_or(i32::MAX)
}

// ============================================================================
// Identity
// ============================================================================

fn register_identity(builder: &mut SymbolTablesBuilder) {
    builder
        .register_variable("name", |c| text(&c.state().name))
        .register_variable("p1name", |c| text(&c.state().name))
        .register_variable("authorname", |c| text(&c.state().author_name))
        .register_variable("id", |c| Value::int(c.state().id))
        .register_variable("palno", |c| Value::int(c.state().palette_no))
        .register_variable("ailevel", |c| Value::int(c.state().ai_level))
        .register_variable("teamside", |c| Value::int(c.state().team_side))
        .register_variable("ishometeam", |c| Value::bool(c.state().is_home_team))
        .register_variable("ishelper", |c| Value::bool(c.state().is_helper()))
        .register_variable("roundsexisted", |c| Value::int(c.state().rounds_existed));
}

// ============================================================================
// Life, state and animation
// ============================================================================

fn register_status(builder: &mut SymbolTablesBuilder) {
    builder
        .register_variable("alive", |c| Value::bool(c.state().alive))
        .register_variable("life", |c| Value::int(c.state().life))
        .register_variable("lifemax", |c| Value::int(c.state().life_max))
        .register_variable("power", |c| Value::int(c.state().power))
        .register_variable("powermax", |c| Value::int(c.state().power_max))
        .register_variable("stateno", |c| Value::int(c.state().state_no))
        .register_variable("prevstateno", |c| Value::int(c.state().prev_state_no))
        .register_variable("time", |c| Value::int(c.state().state_time))
        .register_variable("statetime", |c| Value::int(c.state().state_time))
        .register_variable("statetype", |c| letter(c.state().state_type.letter()))
        .register_variable("movetype", |c| letter(c.state().move_type.letter()))
        .register_variable("ctrl", |c| Value::bool(c.state().ctrl))
        .register_variable("anim", |c| Value::int(c.state().animation.number))
        .register_variable("animtime", |c| Value::int(c.state().animation.time_to_end()))
        .register_variable("random", |c| Value::int(c.random()));

    builder
        .register_variable("hitcount", |c| Value::int(c.state().hit_count))
        .register_variable("uniquehitcount", |c| Value::int(c.state().unique_hit_count))
        .register_variable("hitfall", |c| Value::bool(c.state().hit_fall))
        .register_variable("hitover", |c| Value::bool(c.state().hit_over))
        .register_variable("hitshakeover", |c| Value::bool(c.state().hit_shake_over))
        .register_variable("hitpausetime", |c| Value::int(c.state().hit_pause_time))
        .register_variable("hitvel x", |c| Value::float(c.state().hit_vel.x))
        .register_variable("hitvel y", |c| Value::float(c.state().hit_vel.y))
        .register_variable("canrecover", |c| Value::bool(c.state().can_recover))
        .register_variable("inguarddist", |c| Value::bool(c.state().in_guard_dist))
        .register_variable("movecontact", |c| Value::int(c.state().move_contact))
        .register_variable("moveguarded", |c| Value::int(c.state().move_guarded))
        .register_variable("movehit", |c| Value::int(c.state().move_hit))
        .register_variable("movereversed", |c| Value::int(c.state().move_reversed));

    builder
        .register_variable("numexplod", |c| Value::int(c.state().count_explods(None)))
        .register_variable("numhelper", |c| Value::int(c.state().count_helpers(None)))
        .register_variable("numproj", |c| Value::int(c.state().count_projectiles(None)))
        .register_variable("numtarget", |c| Value::int(c.state().count_targets(None)));
}

// ============================================================================
// Position and screen
// ============================================================================

fn register_position(builder: &mut SymbolTablesBuilder) {
    builder
        .register_variable("pos x", |c| {
            Value::float(c.state().pos.x - c.world().camera_pos.x)
        })
        .register_variable("pos y", |c| Value::float(c.state().pos.y))
        .register_variable("vel x", |c| Value::float(c.state().vel.x))
        .register_variable("vel y", |c| Value::float(c.state().vel.y))
        .register_variable("facing", |c| Value::int(c.state().facing.sign()))
        .register_variable("screenpos x", |c| {
            Value::float(c.state().pos.x - c.world().left_edge())
        })
        .register_variable("screenpos y", |c| {
            Value::float(c.state().pos.y - c.world().top_edge())
        });

    builder
        .register_variable("leftedge", |c| Value::float(c.world().left_edge()))
        .register_variable("rightedge", |c| Value::float(c.world().right_edge()))
        .register_variable("topedge", |c| Value::float(c.world().top_edge()))
        .register_variable("bottomedge", |c| Value::float(c.world().bottom_edge()))
        .register_variable("frontedge", |c| match c.state().facing.sign() {
            1 => Value::float(c.world().right_edge()),
            _ => Value::float(c.world().left_edge()),
        })
        .register_variable("backedge", |c| match c.state().facing.sign() {
            1 => Value::float(c.world().left_edge()),
            _ => Value::float(c.world().right_edge()),
        })
        .register_variable("frontedgedist", |c| Value::float(edge_distances(c).0))
        .register_variable("backedgedist", |c| Value::float(edge_distances(c).1))
        .register_variable("frontedgebodydist", |c| {
            Value::float(edge_distances(c).0 - ground_size(c, "size.ground.front"))
        })
        .register_variable("backedgebodydist", |c| {
            Value::float(edge_distances(c).1 - ground_size(c, "size.ground.back"))
        });
}

// ============================================================================
// Other players
// ============================================================================

fn register_others(builder: &mut SymbolTablesBuilder) {
    builder
        .register_variable("p2life", |c| from_p2(c, |other| Value::int(other.state().life)))
        .register_variable("p2name", |c| from_p2(c, |other| text(&other.state().name)))
        .register_variable("p2stateno", |c| from_p2(c, |other| Value::int(other.state().state_no)))
        .register_variable("p2statetype", |c| {
            from_p2(c, |other| letter(other.state().state_type.letter()))
        })
        .register_variable("p2movetype", |c| {
            from_p2(c, |other| letter(other.state().move_type.letter()))
        })
        .register_variable("p3name", |c| {
            related(c, Target::Partner).map_or(Value::Bottom, |p| text(&p.state().name))
        })
        .register_variable("p4name", |c| {
            related(c, Target::EnemyNear(1)).map_or(Value::Bottom, |p| text(&p.state().name))
        });

    builder
        .register_variable("p2dist x", |c| distance_to(c, Target::EnemyNear(0), distance_x))
        .register_variable("p2dist y", |c| distance_to(c, Target::EnemyNear(0), distance_y))
        .register_variable("p2bodydist x", |c| {
            let Some(other) = p2(c) else {
                return Value::Bottom;
            };
            let bodies = ground_size(c, "size.ground.front") + ground_size(other, "size.ground.front");
            Value::float(distance_x(c, other) - bodies)
        })
        .register_variable("p2bodydist y", |c| distance_to(c, Target::EnemyNear(0), distance_y))
        .register_variable("parentdist x", |c| distance_to(c, Target::Parent, distance_x))
        .register_variable("parentdist y", |c| distance_to(c, Target::Parent, distance_y))
        .register_variable("rootdist x", |c| distance_to(c, Target::Root, distance_x))
        .register_variable("rootdist y", |c| distance_to(c, Target::Root, distance_y));

    builder
        .register_variable("numenemy", |c| {
            Value::int(count_while(|i| c.redirect(Target::Enemy(i)).is_some()))
        })
        .register_variable("numpartner", |c| {
            Value::int(i32::from(c.redirect(Target::Partner).is_some()))
        });
}

// ============================================================================
// Match and world
// ============================================================================

fn register_match(builder: &mut SymbolTablesBuilder) {
    builder
        .register_variable("gametime", |c| Value::int(c.world().game_time))
        .register_variable("roundno", |c| Value::int(c.world().round_no))
        .register_variable("roundstate", |c| Value::int(c.world().round_state))
        .register_variable("matchno", |c| Value::int(c.world().match_no))
        .register_variable("matchover", |c| Value::bool(c.world().match_over))
        .register_variable("drawgame", |c| Value::bool(c.world().draw_game))
        .register_variable("tickspersecond", |c| Value::int(c.world().ticks_per_second))
        .register_variable("gamewidth", |c| Value::int(c.world().game_width))
        .register_variable("gameheight", |c| Value::int(c.world().game_height))
        .register_variable("screenwidth", |c| Value::int(c.world().screen_width))
        .register_variable("screenheight", |c| Value::int(c.world().screen_height))
        .register_variable("camerapos x", |c| Value::float(c.world().camera_pos.x))
        .register_variable("camerapos y", |c| Value::float(c.world().camera_pos.y))
        .register_variable("camerazoom", |c| Value::float(c.world().camera_zoom))
        .register_variable("e", |_| Value::float(std::f64::consts::E))
        .register_variable("pi", |_| Value::float(std::f64::consts::PI));

    builder
        .register_variable("win", |c| outcome(c, |o| o.won))
        .register_variable("winko", |c| outcome(c, |o| o.won && o.ko))
        .register_variable("wintime", |c| outcome(c, |o| o.won && o.time_over))
        .register_variable("winperfect", |c| outcome(c, |o| o.won && o.perfect))
        .register_variable("lose", |c| outcome(c, |o| !o.won))
        .register_variable("loseko", |c| outcome(c, |o| !o.won && o.ko))
        .register_variable("losetime", |c| outcome(c, |o| !o.won && o.time_over));
}

/// False until the round has been decided.
fn outcome(combatant: &dyn Combatant, test: fn(&RoundOutcome) -> bool) -> Value {
    Value::bool(combatant.state().outcome.as_ref().is_some_and(test))
}
