use super::{CombatantState, VariableBank, World};

/// A character whose state triggers are evaluated against.
///
/// All accessors take `&self`: variable writes (`var(3) := 1`) go through
/// the interior mutability of [`VariableBank`] so a redirected combatant can
/// be handed out as a shared reference.
pub trait Combatant {
    /// Plain-data snapshot of everything the variable table reads.
    fn state(&self) -> &CombatantState;

    /// Match-wide information shared by all combatants.
    fn world(&self) -> &World;

    /// The `var`/`fvar`/`sysvar`/`sysfvar` slots.
    fn variables(&self) -> &VariableBank;

    /// Whether the named input command is active this tick.
    fn is_command_active(&self, name: &str) -> bool;

    /// Whether the command with a pre-resolved index is active this tick.
    ///
    /// Indices come from the [`CommandLookup`](crate::symbols::CommandLookup)
    /// used at parse time.
    fn is_command_index_active(&self, index: u32) -> bool;

    /// Resolves a redirect (`p2`, `helper(3)`, `root`...) to another
    /// combatant, or `None` if nobody matches.
    fn redirect(&self, target: Target) -> Option<&dyn Combatant>;

    /// Uniform integer in `0..=999` for the `random` trigger.
    fn random(&self) -> i32 {
        fastrand::i32(0..1000)
    }
}

/// Resolves `target` against `combatant`, handling [`Target::Own`] locally.
pub fn redirect(combatant: &dyn Combatant, target: Target) -> Option<&dyn Combatant> {
    match target {
        Target::Own => Some(combatant),
        other => combatant.redirect(other),
    }
}

/// Who a redirect phrase points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `p1`: the combatant itself.
    Own,
    /// `target` or `target id`: a player hit by this one, optionally by hit id.
    Target(Option<i32>),
    /// `enemy n`.
    Enemy(usize),
    /// `enemynear n`; `p2` is `EnemyNear(0)`.
    EnemyNear(usize),
    Root,
    Parent,
    Partner,
    /// `helper` or `helper id`.
    Helper(Option<i32>),
    PlayerId(i32),
}

impl Target {
    /// Parses a redirect phrase such as `"p2"`, `"helper 3"` or
    /// `"enemynear 1"`. Matching is case-insensitive.
    pub fn from_phrase(phrase: &str) -> Option<Target> {
        let mut words = phrase.split_whitespace();
        let first = words.next()?.to_ascii_lowercase();
        let id = match words.next() {
            Some(word) => Some(word.parse::<i32>().ok()?),
            None => None,
        };
        if words.next().is_some() {
            return None;
        }

        let index = |id: Option<i32>| usize::try_from(id.unwrap_or(0)).ok();
        match (first.as_str(), id) {
            ("p1", None) => Some(Target::Own),
            ("p2", None) => Some(Target::EnemyNear(0)),
            ("target", id) => Some(Target::Target(id)),
            ("enemy", id) => index(id).map(Target::Enemy),
            ("enemynear", id) => index(id).map(Target::EnemyNear),
            ("root", None) => Some(Target::Root),
            ("parent", None) => Some(Target::Parent),
            ("partner", None) => Some(Target::Partner),
            ("helper", id) => Some(Target::Helper(id)),
            ("playerid", Some(id)) => Some(Target::PlayerId(id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases() {
        assert_eq!(Target::from_phrase("p2"), Some(Target::EnemyNear(0)));
        assert_eq!(Target::from_phrase("P1"), Some(Target::Own));
        assert_eq!(Target::from_phrase("helper 3"), Some(Target::Helper(Some(3))));
        assert_eq!(Target::from_phrase("helper"), Some(Target::Helper(None)));
        assert_eq!(Target::from_phrase("playerid 56"), Some(Target::PlayerId(56)));
        assert_eq!(Target::from_phrase("enemynear 1"), Some(Target::EnemyNear(1)));
        assert_eq!(Target::from_phrase("target"), Some(Target::Target(None)));
        assert_eq!(Target::from_phrase("root"), Some(Target::Root));
    }

    #[test]
    fn test_non_phrases() {
        assert_eq!(Target::from_phrase(""), None);
        assert_eq!(Target::from_phrase("life"), None);
        assert_eq!(Target::from_phrase("playerid"), None);
        assert_eq!(Target::from_phrase("root 2"), None);
        assert_eq!(Target::from_phrase("helper x"), None);
        assert_eq!(Target::from_phrase("enemynear -1"), None);
        assert_eq!(Target::from_phrase("helper 1 2"), None);
    }
}
