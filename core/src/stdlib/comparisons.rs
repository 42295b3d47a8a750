//! Named comparisons
//!
//! `statetype = SC`, `animelem = 3, >= 2` and the like are not value
//! equality: the left name selects a routine that interprets the right-hand
//! side. Each routine answers the `=` question; the evaluator inverts it for
//! `!=` and for a negated name.

use crate::context::{AttackClass, AttackKind, Combatant, ProjectileEvent, Target, redirect};
use crate::evaluator::NamedComparison;
use crate::parser::{ComparisonOp, Expr};
use crate::symbols::SymbolTablesBuilder;
use crate::values::{Value, atoi};

pub fn register(builder: &mut SymbolTablesBuilder) {
    builder
        .register_comparison("command", command)
        .register_comparison("statetype", statetype)
        .register_comparison("p2statetype", p2statetype)
        .register_comparison("movetype", movetype)
        .register_comparison("p2movetype", p2movetype)
        .register_comparison("animelem", animelem)
        .register_comparison("timemod", timemod)
        .register_comparison("teammode", teammode)
        .register_comparison("hitdefattr", hitdefattr)
        .register_comparison("projcontact", projcontact)
        .register_comparison("projguarded", projguarded)
        .register_comparison("projhit", projhit);
}

/// The items of a comma list, `a , (b , c)` read as `[a, b, c]`.
fn list_items(value: &Value) -> Vec<&Value> {
    let mut items = Vec::new();
    let mut current = value;
    while let Value::Vector(x, y) = current {
        items.push(x.as_ref());
        current = y;
    }
    items.push(current);
    items
}

/// Checks a time against `t` or an operator argument such as `>= 2`.
fn time_matches(actual: i32, expected: &Value) -> bool {
    if let Value::Text(text) = expected {
        if let Some((symbol, operand)) = text.split_once(' ') {
            if let Some(op) = ComparisonOp::from_symbol(symbol) {
                return op.holds(actual, atoi(operand));
            }
        }
    }
    actual == expected.to_int()
}

fn contains_letter(letters: &Value, letter: char) -> bool {
    letters
        .as_text()
        .chars()
        .any(|c| c.eq_ignore_ascii_case(&letter))
}

fn opponent(combatant: &dyn Combatant) -> Option<&dyn Combatant> {
    let found = redirect(combatant, Target::EnemyNear(0));
    if found.is_none() {
        tracing::warn!("no opponent to compare against");
    }
    found
}

// ============================================================================
// Input and stance
// ============================================================================

/// `command = "name"`, by pre-resolved index when the parser rewrote it.
fn command(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    match *request.right {
        Expr::CommandIndex { index, .. } => combatant.is_command_index_active(index),
        _ => combatant.is_command_active(&request.value.as_text()),
    }
}

fn statetype(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    contains_letter(request.value, combatant.state().state_type.letter())
}

fn p2statetype(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    opponent(combatant).is_some_and(|p2| statetype(request, p2))
}

fn movetype(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    contains_letter(request.value, combatant.state().move_type.letter())
}

fn p2movetype(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    opponent(combatant).is_some_and(|p2| movetype(request, p2))
}

fn teammode(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    request
        .value
        .as_text()
        .trim()
        .eq_ignore_ascii_case(combatant.state().team_mode.name())
}

// ============================================================================
// Timing
// ============================================================================

/// `animelem = n` holds on the tick element `n` starts; `animelem = n, t`
/// compares the time since it started.
fn animelem(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    let animation = &combatant.state().animation;
    match list_items(request.value).as_slice() {
        [element] => animation.is_starting_element(element.to_int()),
        [element, time] => animation
            .time_from_element(element.to_int())
            .is_some_and(|actual| time_matches(actual, time)),
        items => {
            tracing::warn!(count = items.len(), "malformed animelem comparison");
            false
        }
    }
}

/// `timemod = d, r`: `statetime % d == r`.
fn timemod(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    let items = list_items(request.value);
    let [divisor, remainder] = items.as_slice() else {
        tracing::warn!(count = items.len(), "timemod needs a divisor and a remainder");
        return false;
    };
    match divisor.to_int() {
        0 => false,
        divisor => time_matches(combatant.state().state_time.wrapping_rem(divisor), remainder),
    }
}

// ============================================================================
// Attacks
// ============================================================================

/// `hitdefattr = SCA, NA, SP`: the active hitdef's stance must be listed,
/// and so must its class and kind when any are given.
fn hitdefattr(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    let Some(attributes) = combatant.state().hit_def else {
        return false;
    };
    let items = list_items(request.value);
    let Some((stances, flags)) = items.split_first() else {
        return false;
    };
    if !contains_letter(stances, attributes.state_type.letter()) {
        return false;
    }
    if flags.is_empty() {
        return true;
    }
    flags.iter().any(|flag| {
        let flag = flag.as_text().trim().to_ascii_lowercase();
        let mut letters = flag.chars();
        let (Some(class), Some(kind), None) = (letters.next(), letters.next(), letters.next())
        else {
            tracing::warn!(flag = flag.as_str(), "hitdefattr flags are two letters");
            return false;
        };
        let class_matches = match attributes.class {
            _ if class == 'a' => true,
            AttackClass::Normal => class == 'n',
            AttackClass::Special => class == 's',
            AttackClass::Hyper => class == 'h',
        };
        let kind_matches = match attributes.kind {
            AttackKind::Attack => kind == 'a',
            AttackKind::Projectile => kind == 'p',
            AttackKind::Throw => kind == 't',
        };
        class_matches && kind_matches
    })
}

/// `projhit1200 = 1` holds when projectile 1200 hit this tick;
/// `projhit = 1, < 10` when any projectile hit within the last ten ticks.
/// A right-hand `0` asks the opposite question.
fn projectile(
    base: &str,
    event: ProjectileEvent,
    request: &NamedComparison<'_>,
    combatant: &dyn Combatant,
) -> bool {
    let id = request.name.strip_prefix(base).map_or(0, atoi);
    let time = combatant.state().projectile_event_time(event, id);
    let items = list_items(request.value);
    let (expected, happened) = match items.as_slice() {
        [expected] => (expected, time == Some(0)),
        [expected, window] => (
            expected,
            time.is_some_and(|actual| time_matches(actual, window)),
        ),
        _ => {
            tracing::warn!(name = request.name, "malformed projectile comparison");
            return false;
        }
    };
    happened == expected.to_bool()
}

fn projcontact(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    projectile("projcontact", ProjectileEvent::Contact, request, combatant)
}

fn projguarded(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    projectile("projguarded", ProjectileEvent::Guarded, request, combatant)
}

fn projhit(request: &NamedComparison<'_>, combatant: &dyn Combatant) -> bool {
    projectile("projhit", ProjectileEvent::Hit, request, combatant)
}
