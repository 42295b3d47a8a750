//! The combatant side of trigger evaluation.
//!
//! Triggers read from (and occasionally write to) the character whose state
//! controller is being checked. The engine hosting the evaluator implements
//! [`Combatant`] for its player objects; [`Fighter`] is a self-contained
//! implementation backed by plain data, used by the CLI and in tests.

mod combatant;
mod constants;
mod fighter;
mod state;
mod variables;
mod world;

pub use combatant::{Combatant, Target, redirect};
pub use constants::CharacterConstants;
pub use fighter::{CommandList, Fighter};
pub use state::{
    AnimationState, AttackClass, AttackKind, CombatantState, Facing, HitDefAttributes,
    MoveType, ProjectileEvent, ProjectileRecord, ReceivedHit, RoundOutcome, StateType,
    TargetRecord, TeamMode, Vec2,
};
pub use variables::{SlotFamily, VariableBank};
pub use world::{StageInfo, World};
