//! Events emitted for the presentation layer.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::entity::EntityHandle;

/// Sound cue kinds fired at a tile position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SoundKind {
    Attack,
    Heal,
    Haste,
    Defense,
}

/// One render-facing event. The core only records these; playing sounds and
/// spawning particles is someone else's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SpatialSound {
        sound: SoundKind,
        position: (i32, i32),
    },
    ParticleEffect {
        entity: EntityHandle,
        script: String,
        nb_turns: u32,
    },
    AttackAnimation {
        attacker: EntityHandle,
        target_position: (i32, i32),
    },
}
