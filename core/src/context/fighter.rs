use std::rc::Rc;

use super::{Combatant, CombatantState, Target, VariableBank, World};
use crate::symbols::CommandLookup;

/// Command names a character defines, with the ones active this tick.
///
/// Doubles as the parse-time [`CommandLookup`]: a command's index is its
/// position in the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    names: Vec<String>,
    active: Vec<bool>,
}

impl CommandList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let active = vec![false; names.len()];
        Self { names, active }
    }

    /// Marks a command active (or not). Unknown names are ignored.
    pub fn set_active(&mut self, name: &str, active: bool) {
        if let Some(index) = self.position(name) {
            self.active[index] = active;
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.position(name).is_some_and(|index| self.active[index])
    }

    pub fn is_index_active(&self, index: u32) -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.active.get(index).copied())
            .unwrap_or(false)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl CommandLookup for CommandList {
    fn command_index(&self, name: &str) -> Option<u32> {
        self.position(name).and_then(|index| u32::try_from(index).ok())
    }
}

/// A combatant backed entirely by owned data.
///
/// Related players are owned copies: `opponents` in distance order (the
/// first one is `p2`), plus optional partner, root and parent, and the
/// helpers this character spawned.
#[derive(Debug, Clone, Default)]
pub struct Fighter {
    pub state: CombatantState,
    pub world: Rc<World>,
    pub variables: VariableBank,
    pub commands: CommandList,
    pub opponents: Vec<Fighter>,
    pub partner: Option<Box<Fighter>>,
    pub root: Option<Box<Fighter>>,
    pub parent: Option<Box<Fighter>>,
    pub helpers: Vec<Fighter>,
    /// Fixed value for `random`, for reproducible runs.
    pub fixed_random: Option<i32>,
}

impl Fighter {
    pub fn new(state: CombatantState, world: Rc<World>) -> Self {
        Self {
            state,
            world,
            ..Self::default()
        }
    }

    fn find_player(&self, id: i32) -> Option<&Fighter> {
        if self.state.id == id {
            return Some(self);
        }
        self.opponents
            .iter()
            .chain(self.helpers.iter())
            .chain(self.partner.as_deref())
            .chain(self.root.as_deref())
            .chain(self.parent.as_deref())
            .find_map(|f| f.find_player(id))
    }
}

impl Combatant for Fighter {
    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn variables(&self) -> &VariableBank {
        &self.variables
    }

    fn is_command_active(&self, name: &str) -> bool {
        self.commands.is_active(name)
    }

    fn is_command_index_active(&self, index: u32) -> bool {
        self.commands.is_index_active(index)
    }

    fn redirect(&self, target: Target) -> Option<&dyn Combatant> {
        let found: Option<&Fighter> = match target {
            Target::Own => Some(self),
            Target::Target(hit_id) => self
                .state
                .targets
                .iter()
                .filter(|t| hit_id.is_none_or(|id| t.hit_id == id))
                .find_map(|t| self.opponents.iter().find(|o| o.state.id == t.player_id)),
            Target::Enemy(index) | Target::EnemyNear(index) => self.opponents.get(index),
            Target::Root => self.root.as_deref(),
            Target::Parent => self.parent.as_deref(),
            Target::Partner => self.partner.as_deref(),
            Target::Helper(None) => self.helpers.first(),
            Target::Helper(Some(id)) => {
                self.helpers.iter().find(|h| h.state.helper_id == Some(id))
            }
            Target::PlayerId(id) => self.find_player(id),
        };
        found.map(|f| f as &dyn Combatant)
    }

    fn random(&self) -> i32 {
        self.fixed_random.unwrap_or_else(|| fastrand::i32(0..1000))
    }
}
