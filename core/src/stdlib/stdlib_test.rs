use std::rc::Rc;

use bumpalo::Bump;
use pretty_assertions::assert_eq;

use crate::api::{Engine, EngineOptions};
use crate::context::{
    AnimationState, AttackClass, AttackKind, CommandList, HitDefAttributes, MoveType,
    ProjectileRecord, RoundOutcome, StageInfo, StateType, TargetRecord, TeamMode, World,
};
use crate::evaluator;
use crate::parser::Parser;
use crate::symbols::{SymbolTables, SymbolTablesBuilder};
use crate::test_utils::{eval, eval_bool, fighter, init_test_logging, versus};
use crate::values::Value;

use super::register_stdlib;

// ============================================================================
// Registration
// ============================================================================

fn sorted<'a>(mut names: Vec<&'a str>) -> Vec<&'a str> {
    names.sort_unstable();
    names
}

#[test]
fn test_register_stdlib_matches_standard_tables() {
    let mut builder = SymbolTablesBuilder::new();
    register_stdlib(&mut builder);
    let symbols = builder.build();
    let standard = SymbolTables::standard();

    assert_eq!(
        sorted(symbols.variable_names().collect()),
        sorted(standard.variable_names().collect())
    );
    assert_eq!(
        sorted(symbols.array_names().collect()),
        sorted(standard.array_names().collect())
    );
    assert!(symbols.comparison("animelem").is_some());
    assert!(symbols.comparison("projhit1200").is_some());
}

#[test]
fn test_engine_registration_overrides_standard() {
    let arena = Bump::new();
    let engine = Engine::new(&arena, EngineOptions::default(), |builder| {
        builder
            .register_variable("life", |_| Value::Integer(1))
            .register_variable("combo", |c| Value::Integer(c.state().hit_count * 10));
    });
    let mut kfm = fighter("kfm", 1);
    kfm.state.hit_count = 3;

    let trigger = engine.compile("life + combo").unwrap();
    assert_eq!(trigger.evaluate(&kfm).unwrap(), Value::Integer(31));
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_identity_and_status() {
    let mut kfm = fighter("kfm", 7);
    kfm.state.author_name = "Elecbyte".into();
    kfm.state.state_no = 200;
    kfm.state.prev_state_no = 0;
    kfm.state.state_time = 12;
    kfm.state.move_type = MoveType::Attack;
    kfm.fixed_random = Some(42);

    assert_eq!(eval("name", &kfm), Value::text("kfm"));
    assert_eq!(eval("authorname", &kfm), Value::text("Elecbyte"));
    assert_eq!(eval("id", &kfm), Value::Integer(7));
    assert_eq!(eval("stateno", &kfm), Value::Integer(200));
    assert_eq!(eval("time", &kfm), Value::Integer(12));
    assert_eq!(eval("statetype", &kfm), Value::text("S"));
    assert_eq!(eval("movetype", &kfm), Value::text("A"));
    assert_eq!(eval("powermax", &kfm), Value::Integer(3000));
    assert_eq!(eval("random", &kfm), Value::Integer(42));
    assert!(eval_bool("ctrl && alive", &kfm));
    assert!(!eval_bool("ishelper", &kfm));
}

#[test]
fn test_positions_and_distances() {
    let kfm = versus();
    assert_eq!(eval("pos x", &kfm), Value::Float(0.0));
    assert_eq!(eval("p2dist x", &kfm), Value::Float(100.0));
    assert_eq!(eval("p2bodydist x", &kfm), Value::Float(68.0));
    assert_eq!(eval("facing", &kfm), Value::Integer(1));
    assert_eq!(eval("frontedgedist", &kfm), Value::Float(160.0));
    assert_eq!(eval("backedgebodydist", &kfm), Value::Float(145.0));
    assert_eq!(eval("rootdist x", &kfm), Value::Bottom);
}

#[test]
fn test_other_players() {
    let kfm = versus();
    assert_eq!(eval("p2life", &kfm), Value::Integer(750));
    assert_eq!(eval("p2name", &kfm), Value::text("suave"));
    assert_eq!(eval("numenemy", &kfm), Value::Integer(1));
    assert_eq!(eval("numpartner", &kfm), Value::Integer(0));
    assert_eq!(eval("p3name", &kfm), Value::Bottom);
}

#[test]
fn test_world_and_outcome() {
    let mut kfm = fighter("kfm", 1);
    kfm.world = Rc::new(World {
        round_no: 3,
        game_time: 900,
        ..World::default()
    });
    assert_eq!(eval("roundno", &kfm), Value::Integer(3));
    assert_eq!(eval("gametime", &kfm), Value::Integer(900));
    assert!(!eval_bool("win || lose", &kfm));

    kfm.state.outcome = Some(RoundOutcome {
        won: true,
        ko: true,
        ..RoundOutcome::default()
    });
    assert!(eval_bool("win && winko", &kfm));
    assert!(!eval_bool("wintime || winperfect || lose", &kfm));
}

// ============================================================================
// Math
// ============================================================================

#[test]
fn test_math_functions() {
    let kfm = fighter("kfm", 1);
    assert_eq!(eval("abs(-3)", &kfm), Value::Integer(3));
    assert_eq!(eval("abs(-2.5)", &kfm), Value::Float(2.5));
    assert_eq!(eval("floor(2.7)", &kfm), Value::Integer(2));
    assert_eq!(eval("floor(-2.5)", &kfm), Value::Integer(-3));
    assert_eq!(eval("ceil(2.1)", &kfm), Value::Integer(3));
    assert_eq!(eval("exp(0)", &kfm), Value::Float(1.0));
    assert_eq!(eval("cos(0)", &kfm), Value::Float(1.0));

    let log = eval("log(2, 8)", &kfm).to_float();
    assert!((log - 3.0).abs() < 1e-9);
}

#[test]
fn test_math_domain_errors() {
    init_test_logging();
    let kfm = fighter("kfm", 1);
    assert_eq!(eval("ln(0)", &kfm), Value::Bottom);
    assert_eq!(eval("acos(2)", &kfm), Value::Bottom);
    assert_eq!(eval("log(0, 8)", &kfm), Value::Bottom);
    assert_eq!(eval("log(8)", &kfm), Value::Bottom);
}

// ============================================================================
// Control
// ============================================================================

#[test]
fn test_ifelse_evaluates_taken_branch_only() {
    let kfm = fighter("kfm", 1);
    assert_eq!(eval("ifelse(life > 500, 1, 2)", &kfm), Value::Integer(1));
    assert_eq!(eval("ifelse(1, 1, var(1) := 7)", &kfm), Value::Integer(1));
    assert_eq!(eval("var(1)", &kfm), Value::Integer(0));
    assert_eq!(eval("sifelse(0, var(1) := 3, 2)", &kfm), Value::Integer(2));
    assert_eq!(eval("var(1)", &kfm), Value::Integer(0));
    assert_eq!(eval("ifelse(0, 1, var(1) := 7)", &kfm), Value::Integer(7));
}

#[test]
fn test_conditions_with_comparisons_keep_three_arguments() {
    let kfm = versus();
    assert_eq!(eval("ifelse(life > p2life, 5, 7)", &kfm), Value::Integer(5));
    assert_eq!(eval("ifelse(stateno = p2stateno, 5, 7)", &kfm), Value::Integer(5));
    assert_eq!(eval("cond(p2stateno = 0, 5, 7)", &kfm), Value::Integer(5));
    assert_eq!(eval("ifelse(p1name = \"kfm\", 5, 7)", &kfm), Value::Integer(5));
    assert_eq!(eval("ifelse(rootdist x = 0, 5, 7)", &kfm), Value::Integer(7));
    assert_eq!(eval("ifelse(projhittime(1) = 0, 5, 7)", &kfm), Value::Integer(7));

    let kfm = animated();
    assert_eq!(eval("ifelse(animelemno(0) = 2, 5, 7)", &kfm), Value::Integer(5));
    assert_eq!(eval("cond(animelemtime(2) = 0, 5, 7)", &kfm), Value::Integer(5));
    assert_eq!(eval("ifelse(animelemno(0) = 1, 5, 7)", &kfm), Value::Integer(7));
}

#[test]
fn test_cond_evaluates_taken_branch_only() {
    let kfm = fighter("kfm", 1);
    assert_eq!(eval("cond(1, 1, var(2) := 7)", &kfm), Value::Integer(1));
    assert_eq!(eval("var(2)", &kfm), Value::Integer(0));
    assert_eq!(eval("cond(0, 1, var(2) := 7)", &kfm), Value::Integer(7));
}

#[test]
fn test_control_arity() {
    init_test_logging();
    let kfm = fighter("kfm", 1);
    assert_eq!(eval("ifelse(1, 2)", &kfm), Value::Bottom);
    assert_eq!(eval("cond(1)", &kfm), Value::Bottom);
}

// ============================================================================
// Queries
// ============================================================================

fn animated() -> crate::context::Fighter {
    let mut kfm = fighter("kfm", 1);
    kfm.state.animation = AnimationState {
        number: 200,
        element_durations: vec![3, 4, 5],
        elapsed: 3,
    };
    kfm.state.animations = vec![0, 200];
    kfm
}

#[test]
fn test_animation_queries() {
    let kfm = animated();
    assert_eq!(eval("anim", &kfm), Value::Integer(200));
    assert_eq!(eval("animtime", &kfm), Value::Integer(-9));
    assert_eq!(eval("animelemtime(1)", &kfm), Value::Integer(3));
    assert_eq!(eval("animelemtime(2)", &kfm), Value::Integer(0));
    assert_eq!(eval("animelemtime(9)", &kfm), Value::Bottom);
    assert_eq!(eval("animelemno(0)", &kfm), Value::Integer(2));
    assert_eq!(eval("animelemno(5)", &kfm), Value::Integer(3));
    assert!(eval_bool("animexist(200)", &kfm));
    assert!(!eval_bool("selfanimexist(201)", &kfm));
}

#[test]
fn test_named_lookups() {
    init_test_logging();
    let mut kfm = fighter("kfm", 1);
    kfm.state.received_hit.damage = 30;
    kfm.state.received_hit.fall_recover = true;
    kfm.world = Rc::new(World {
        stage: StageInfo {
            name: "Temple".into(),
            ..StageInfo::default()
        },
        ..World::default()
    });

    assert_eq!(eval("gethitvar(damage)", &kfm), Value::Integer(30));
    assert_eq!(eval("gethitvar(fall.recover)", &kfm), Value::Boolean(true));
    assert_eq!(eval("gethitvar(nonsense)", &kfm), Value::Bottom);
    assert_eq!(eval("const(data.life)", &kfm), Value::Integer(1000));
    assert_eq!(eval("const(size.ground.front)", &kfm), Value::Integer(16));
    assert_eq!(eval("const(data.nonsense)", &kfm), Value::Bottom);
    assert_eq!(eval("stagevar(info.name)", &kfm), Value::text("Temple"));
}

#[test]
fn test_resolution_conversion() {
    let kfm = fighter("kfm", 1);
    assert_eq!(eval("const240p(10)", &kfm), Value::Float(10.0));
    assert_eq!(eval("const480p(10)", &kfm), Value::Float(5.0));
    assert_eq!(eval("const720p(30)", &kfm), Value::Float(10.0));
}

#[test]
fn test_object_counts() {
    let mut kfm = fighter("kfm", 1);
    kfm.state.helpers = vec![3, 3, 4];
    kfm.state.targets = vec![TargetRecord {
        player_id: 2,
        hit_id: 10,
    }];
    kfm.state.projectiles = vec![ProjectileRecord {
        id: 5,
        hit_time: Some(2),
        ..ProjectileRecord::default()
    }];

    assert_eq!(eval("numhelper", &kfm), Value::Integer(3));
    assert_eq!(eval("numhelper(3)", &kfm), Value::Integer(2));
    assert_eq!(eval("numtarget(10)", &kfm), Value::Integer(1));
    assert_eq!(eval("numtarget(11)", &kfm), Value::Integer(0));
    assert_eq!(eval("numprojid(5)", &kfm), Value::Integer(1));
    assert_eq!(eval("projhittime(5)", &kfm), Value::Integer(2));
    assert_eq!(eval("projcontacttime(5)", &kfm), Value::Integer(-1));
}

#[test]
fn test_ishelper_by_helper_id() {
    let mut kfm = fighter("kfm", 1);
    let mut helper = fighter("kfm", 57);
    helper.state.helper_id = Some(3);
    helper.state.life = 500;
    kfm.helpers.push(helper.clone());

    assert!(eval_bool("ishelper(3)", &helper));
    assert!(!eval_bool("ishelper(4)", &helper));
    assert!(eval_bool("ishelper", &helper));
    assert_eq!(eval("helper(3), life", &kfm), Value::Integer(500));
    assert_eq!(eval("helper(3), ishelper(3)", &kfm), Value::Boolean(true));
}

// ============================================================================
// Redirect arrays
// ============================================================================

#[test]
fn test_redirect_arrays() {
    init_test_logging();
    let mut kfm = versus();
    kfm.state.targets = vec![TargetRecord {
        player_id: 2,
        hit_id: 10,
    }];

    assert_eq!(eval("enemynear(0)", &kfm), Value::text("enemynear 0"));
    assert_eq!(eval("enemynear(0), name", &kfm), Value::text("suave"));
    assert_eq!(eval("playerid(2), life", &kfm), Value::Integer(750));
    assert_eq!(eval("target(10), life", &kfm), Value::Integer(750));
    assert_eq!(eval("target(11), life", &kfm), Value::Bottom);
    assert!(eval_bool("playeridexist(2)", &kfm));
    assert!(!eval_bool("playeridexist(99)", &kfm));
}

// ============================================================================
// Named comparisons
// ============================================================================

#[test]
fn test_animelem() {
    let kfm = animated();
    assert!(eval_bool("animelem = 2", &kfm));
    assert!(!eval_bool("animelem = 1", &kfm));
    assert!(eval_bool("animelem != 1", &kfm));
    assert!(eval_bool("animelem = 1, 3", &kfm));
    assert!(eval_bool("animelem = 1, >= 2", &kfm));
    assert!(eval_bool("animelem = 3, < 0", &kfm));
    assert!(!eval_bool("animelem = 9", &kfm));
}

#[test]
fn test_timemod() {
    let mut kfm = fighter("kfm", 1);
    kfm.state.state_time = 10;
    assert!(eval_bool("timemod = 4, 2", &kfm));
    assert!(!eval_bool("timemod = 4, 1", &kfm));
    assert!(!eval_bool("timemod = 0, 0", &kfm));
}

#[test]
fn test_stance_comparisons() {
    let kfm = versus();
    assert!(eval_bool("movetype = I", &kfm));
    assert!(eval_bool("p2statetype = S", &kfm));
    assert!(!eval_bool("p2movetype = A", &kfm));
    assert!(eval_bool("teammode = single", &kfm));
    assert!(!eval_bool("teammode = turns", &kfm));

    let mut alone = fighter("kfm", 1);
    alone.state.team_mode = TeamMode::Simul;
    alone.state.state_type = StateType::Air;
    assert!(eval_bool("teammode = simul", &alone));
    assert!(eval_bool("statetype = A", &alone));
    assert!(!eval_bool("p2statetype = S", &alone));
}

#[test]
fn test_hitdefattr() {
    let mut kfm = fighter("kfm", 1);
    assert!(!eval_bool("hitdefattr = SCA", &kfm));

    kfm.state.hit_def = Some(HitDefAttributes {
        state_type: StateType::Standing,
        class: AttackClass::Normal,
        kind: AttackKind::Attack,
    });
    assert!(eval_bool("hitdefattr = S", &kfm));
    assert!(eval_bool("hitdefattr = SC, NA, SA", &kfm));
    assert!(eval_bool("hitdefattr = SCA, AA", &kfm));
    assert!(!eval_bool("hitdefattr = A, NA", &kfm));
    assert!(!eval_bool("hitdefattr = SCA, HT, NP", &kfm));
    assert!(eval_bool("hitdefattr != C, NA", &kfm));
}

#[test]
fn test_projectile_comparisons() {
    let mut kfm = fighter("kfm", 1);
    kfm.state.projectiles = vec![ProjectileRecord {
        id: 1200,
        hit_time: Some(0),
        contact_time: Some(0),
        guarded_time: Some(7),
        ..ProjectileRecord::default()
    }];

    assert!(eval_bool("projhit1200 = 1", &kfm));
    assert!(eval_bool("projhit = 1", &kfm));
    assert!(eval_bool("projcontact1200 = 1, < 5", &kfm));
    assert!(!eval_bool("projguarded1200 = 1", &kfm));
    assert!(eval_bool("projguarded1200 = 1, >= 7", &kfm));
    assert!(!eval_bool("projhit1300 = 1", &kfm));
    assert!(eval_bool("projhit1300 = 0", &kfm));
}

#[test]
fn test_command_by_name_and_index() {
    let commands = CommandList::new(["QCF_x", "holdfwd"]);
    let mut kfm = fighter("kfm", 1);
    kfm.commands = commands.clone();
    kfm.commands.set_active("holdfwd", true);

    assert!(eval_bool(r#"command = "holdfwd""#, &kfm));
    assert!(eval_bool(r#"command != "QCF_x""#, &kfm));
    assert!(!eval_bool(r#"command = "unknown""#, &kfm));

    let arena = Bump::new();
    let symbols = SymbolTables::standard();
    let expr = Parser::new(&arena, symbols)
        .with_commands(&commands)
        .parse(r#"command = "holdfwd""#)
        .unwrap();
    assert_eq!(expr.to_string(), r#"(= 'command command#1("holdfwd"))"#);
    let value = evaluator::eval(symbols, expr, &kfm).unwrap();
    assert!(evaluator::truthy(&value));
}
