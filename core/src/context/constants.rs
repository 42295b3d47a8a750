//! Character constants read by `const(...)`.

use hashbrown::HashMap;

use crate::values::Value;

#[derive(Debug, Clone, Copy)]
enum Fallback {
    Int(i32),
    Float(f64),
}

use Fallback::{Float, Int};

/// Recognized constant names with the values a character gets when its
/// definition file leaves them out.
static DEFAULTS: &[(&str, Fallback)] = &[
    ("data.life", Int(1000)),
    ("data.power", Int(3000)),
    ("data.attack", Int(100)),
    ("data.defence", Int(100)),
    ("data.fall.defence_mul", Float(1.5)),
    ("data.liedown.time", Int(60)),
    ("data.airjuggle", Int(15)),
    ("data.sparkno", Int(2)),
    ("data.guard.sparkno", Int(40)),
    ("data.ko.echo", Int(0)),
    ("data.intpersistindex", Int(60)),
    ("data.floatpersistindex", Int(40)),
    ("size.xscale", Float(1.0)),
    ("size.yscale", Float(1.0)),
    ("size.ground.back", Int(15)),
    ("size.ground.front", Int(16)),
    ("size.air.back", Int(12)),
    ("size.air.front", Int(12)),
    ("size.height", Int(60)),
    ("size.attack.dist", Int(160)),
    ("size.proj.attack.dist", Int(90)),
    ("size.proj.doscale", Int(0)),
    ("size.head.pos.x", Int(-5)),
    ("size.head.pos.y", Int(-90)),
    ("size.mid.pos.x", Int(-5)),
    ("size.mid.pos.y", Int(-60)),
    ("size.shadowoffset", Int(0)),
    ("size.draw.offset.x", Int(0)),
    ("size.draw.offset.y", Int(0)),
    ("velocity.walk.fwd.x", Float(2.4)),
    ("velocity.walk.back.x", Float(-2.2)),
    ("velocity.run.fwd.x", Float(4.6)),
    ("velocity.run.fwd.y", Float(0.0)),
    ("velocity.run.back.x", Float(-4.5)),
    ("velocity.run.back.y", Float(-3.8)),
    ("velocity.jump.y", Float(-8.4)),
    ("velocity.jump.neu.x", Float(0.0)),
    ("velocity.jump.back.x", Float(-2.55)),
    ("velocity.jump.fwd.x", Float(2.5)),
    ("velocity.runjump.back.x", Float(-2.55)),
    ("velocity.runjump.fwd.x", Float(4.0)),
    ("velocity.airjump.y", Float(-8.1)),
    ("velocity.airjump.neu.x", Float(0.0)),
    ("velocity.airjump.back.x", Float(-2.55)),
    ("velocity.airjump.fwd.x", Float(2.5)),
    ("velocity.air.gethit.groundrecover.x", Float(-0.15)),
    ("velocity.air.gethit.groundrecover.y", Float(-3.5)),
    ("velocity.air.gethit.airrecover.mul.x", Float(0.5)),
    ("velocity.air.gethit.airrecover.mul.y", Float(0.2)),
    ("velocity.air.gethit.airrecover.add.x", Float(0.0)),
    ("velocity.air.gethit.airrecover.add.y", Float(-4.5)),
    ("velocity.air.gethit.airrecover.back", Float(-1.0)),
    ("velocity.air.gethit.airrecover.fwd", Float(0.0)),
    ("velocity.air.gethit.airrecover.up", Float(-2.0)),
    ("velocity.air.gethit.airrecover.down", Float(1.5)),
    ("movement.airjump.num", Int(1)),
    ("movement.airjump.height", Int(35)),
    ("movement.yaccel", Float(0.44)),
    ("movement.stand.friction", Float(0.85)),
    ("movement.crouch.friction", Float(0.82)),
    ("movement.stand.friction.threshold", Float(2.0)),
    ("movement.crouch.friction.threshold", Float(0.05)),
    ("movement.jump.changeanim.threshold", Float(0.0)),
    ("movement.air.gethit.groundlevel", Float(25.0)),
    ("movement.air.gethit.groundrecover.ground.threshold", Float(-20.0)),
    ("movement.air.gethit.groundrecover.groundlevel", Float(10.0)),
    ("movement.air.gethit.airrecover.threshold", Float(-1.0)),
    ("movement.air.gethit.airrecover.yaccel", Float(0.35)),
    ("movement.air.gethit.trip.groundlevel", Float(15.0)),
    ("movement.down.bounce.offset.x", Float(0.0)),
    ("movement.down.bounce.offset.y", Float(20.0)),
    ("movement.down.bounce.yaccel", Float(0.4)),
    ("movement.down.bounce.groundlevel", Float(12.0)),
    ("movement.down.friction.threshold", Float(0.05)),
];

/// Per-character constants, falling back to engine defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterConstants {
    overrides: HashMap<String, Value>,
}

impl CharacterConstants {
    /// Overrides a constant. Names are matched case-insensitively.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.overrides.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Looks up a recognized constant. Unknown names return `None` even when
    /// overridden.
    pub fn get(&self, name: &str) -> Option<Value> {
        let name = name.to_ascii_lowercase();
        let default = DEFAULTS.iter().find(|(known, _)| *known == name)?.1;
        if let Some(value) = self.overrides.get(&name) {
            return Some(value.clone());
        }
        Some(match default {
            Int(v) => Value::Integer(v),
            Float(v) => Value::Float(v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let mut constants = CharacterConstants::default();
        assert_eq!(constants.get("data.life"), Some(Value::Integer(1000)));
        assert_eq!(constants.get("Movement.YAccel"), Some(Value::Float(0.44)));

        constants.set("data.life", 1200);
        assert_eq!(constants.get("data.life"), Some(Value::Integer(1200)));

        constants.set("data.bogus", 1);
        assert_eq!(constants.get("data.bogus"), None);
    }
}
