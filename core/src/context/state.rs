use super::CharacterConstants;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stance of a character, `S`/`C`/`A`/`L` in scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StateType {
    #[default]
    Standing,
    Crouching,
    Air,
    Lying,
}

impl StateType {
    pub fn letter(self) -> char {
        match self {
            StateType::Standing => 'S',
            StateType::Crouching => 'C',
            StateType::Air => 'A',
            StateType::Lying => 'L',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'S' => Some(StateType::Standing),
            'C' => Some(StateType::Crouching),
            'A' => Some(StateType::Air),
            'L' => Some(StateType::Lying),
            _ => None,
        }
    }
}

/// What the character is doing, `A`/`H`/`I` in scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveType {
    Attack,
    Hit,
    #[default]
    Idle,
}

impl MoveType {
    pub fn letter(self) -> char {
        match self {
            MoveType::Attack => 'A',
            MoveType::Hit => 'H',
            MoveType::Idle => 'I',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(MoveType::Attack),
            'H' => Some(MoveType::Hit),
            'I' => Some(MoveType::Idle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> i32 {
        match self {
            Facing::Right => 1,
            Facing::Left => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamMode {
    #[default]
    Single,
    Simul,
    Turns,
}

impl TeamMode {
    pub fn name(self) -> &'static str {
        match self {
            TeamMode::Single => "single",
            TeamMode::Simul => "simul",
            TeamMode::Turns => "turns",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackClass {
    Normal,
    Special,
    Hyper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Attack,
    Projectile,
    Throw,
}

/// The `attr` of the hitdef currently active for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitDefAttributes {
    pub state_type: StateType,
    pub class: AttackClass,
    pub kind: AttackKind,
}

/// Data from the last hit the character received, read by `gethitvar`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceivedHit {
    pub anim_type: i32,
    pub ground_type: i32,
    pub air_type: i32,
    pub velocity: Vec2,
    pub y_accel: f64,
    pub fall: bool,
    pub fall_recover: bool,
    pub fall_y_velocity: f64,
    pub slide_time: i32,
    pub hit_shake_time: i32,
    pub hit_count: i32,
    pub damage: i32,
    pub fall_count: i32,
    pub ctrl_time: i32,
    pub is_bound: bool,
}

/// Which projectile timer a `projcontact`/`projguarded`/`projhit` trigger
/// looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileEvent {
    Contact,
    Guarded,
    Hit,
    Cancel,
}

/// A projectile owned by the character. Times count ticks since the event,
/// zero meaning it happened this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectileRecord {
    pub id: i32,
    pub contact_time: Option<i32>,
    pub guarded_time: Option<i32>,
    pub hit_time: Option<i32>,
    pub cancel_time: Option<i32>,
}

impl ProjectileRecord {
    fn time(&self, event: ProjectileEvent) -> Option<i32> {
        match event {
            ProjectileEvent::Contact => self.contact_time,
            ProjectileEvent::Guarded => self.guarded_time,
            ProjectileEvent::Hit => self.hit_time,
            ProjectileEvent::Cancel => self.cancel_time,
        }
    }
}

/// A player currently registered as a target, with the hit id that made it
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRecord {
    pub player_id: i32,
    pub hit_id: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub won: bool,
    pub ko: bool,
    pub time_over: bool,
    pub perfect: bool,
}

/// Playback position within the current animation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationState {
    pub number: i32,
    /// Tick length of each element, first element at index 0. `-1` holds
    /// forever.
    pub element_durations: Vec<i32>,
    /// Ticks since the animation started.
    pub elapsed: i32,
}

impl AnimationState {
    /// Tick at which 1-based `element` starts, if the animation has it.
    pub fn element_start(&self, element: i32) -> Option<i32> {
        let index = usize::try_from(element).ok()?.checked_sub(1)?;
        if index >= self.element_durations.len() {
            return None;
        }
        Some(
            self.element_durations[..index]
                .iter()
                .map(|d| (*d).max(0))
                .sum(),
        )
    }

    /// Ticks since `element` started; negative while it is still ahead.
    pub fn time_from_element(&self, element: i32) -> Option<i32> {
        self.element_start(element).map(|start| self.elapsed - start)
    }

    pub fn is_starting_element(&self, element: i32) -> bool {
        self.time_from_element(element) == Some(0)
    }

    /// Element shown `offset` ticks from now.
    pub fn element_at(&self, offset: i32) -> Option<i32> {
        let time = self.elapsed + offset;
        if time < 0 {
            return None;
        }
        let mut start = 0;
        for (index, duration) in self.element_durations.iter().enumerate() {
            if *duration < 0 || time < start + duration {
                return i32::try_from(index + 1).ok();
            }
            start += duration;
        }
        None
    }

    /// `animtime`: zero when the animation ends, negative before.
    pub fn time_to_end(&self) -> i32 {
        if self.element_durations.iter().any(|d| *d < 0) {
            return -1;
        }
        self.elapsed - self.element_durations.iter().sum::<i32>()
    }
}

/// Everything the variable table can read from a character.
///
/// Hosts refresh this every tick (or implement [`Combatant`](super::Combatant)
/// over their own storage and keep this struct as the read model).
#[derive(Debug, Clone, Default)]
pub struct CombatantState {
    pub name: String,
    pub author_name: String,
    pub id: i32,
    /// Set for helpers: the helper id given by the spawning controller.
    pub helper_id: Option<i32>,
    pub palette_no: i32,
    pub ai_level: i32,
    pub team_side: i32,
    pub is_home_team: bool,
    pub team_mode: TeamMode,

    pub alive: bool,
    pub life: i32,
    pub life_max: i32,
    pub power: i32,
    pub power_max: i32,

    pub state_no: i32,
    pub prev_state_no: i32,
    pub state_time: i32,
    pub state_type: StateType,
    pub move_type: MoveType,
    pub ctrl: bool,

    pub animation: AnimationState,
    /// Animation numbers defined in the character's air file.
    pub animations: Vec<i32>,

    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,

    pub hit_count: i32,
    pub unique_hit_count: i32,
    pub hit_fall: bool,
    pub hit_over: bool,
    pub hit_shake_over: bool,
    pub hit_pause_time: i32,
    pub hit_vel: Vec2,
    pub can_recover: bool,
    pub in_guard_dist: bool,
    pub move_contact: i32,
    pub move_guarded: i32,
    pub move_hit: i32,
    pub move_reversed: i32,
    pub received_hit: ReceivedHit,
    pub hit_def: Option<HitDefAttributes>,

    pub targets: Vec<TargetRecord>,
    pub helpers: Vec<i32>,
    pub explods: Vec<i32>,
    pub projectiles: Vec<ProjectileRecord>,

    pub rounds_existed: i32,
    pub outcome: Option<RoundOutcome>,

    pub constants: CharacterConstants,
}

impl CombatantState {
    /// A freshly loaded, standing character with full life.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alive: true,
            life: 1000,
            life_max: 1000,
            power_max: 3000,
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn is_helper(&self) -> bool {
        self.helper_id.is_some()
    }

    /// Ticks since `event` for projectiles with `id`; id `0` matches any
    /// projectile, in which case the most recent event wins.
    pub fn projectile_event_time(&self, event: ProjectileEvent, id: i32) -> Option<i32> {
        self.projectiles
            .iter()
            .filter(|p| id == 0 || p.id == id)
            .filter_map(|p| p.time(event))
            .min()
    }

    pub fn count_targets(&self, hit_id: Option<i32>) -> i32 {
        count(self.targets.iter().filter(|t| hit_id.is_none_or(|id| t.hit_id == id)))
    }

    pub fn count_helpers(&self, helper_id: Option<i32>) -> i32 {
        count(self.helpers.iter().filter(|h| helper_id.is_none_or(|id| **h == id)))
    }

    pub fn count_explods(&self, explod_id: Option<i32>) -> i32 {
        count(self.explods.iter().filter(|e| explod_id.is_none_or(|id| **e == id)))
    }

    pub fn count_projectiles(&self, projectile_id: Option<i32>) -> i32 {
        count(
            self.projectiles
                .iter()
                .filter(|p| projectile_id.is_none_or(|id| p.id == id)),
        )
    }
}

fn count<I: Iterator>(iter: I) -> i32 {
    i32::try_from(iter.count()).unwrap_or(i32::MAX)
}
