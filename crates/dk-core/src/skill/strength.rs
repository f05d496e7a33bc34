//! Self-strength support skill.

use serde::{Deserialize, Serialize};

use crate::effect::{CreatureEffect, EffectPayload};
use crate::entity::EntityHandle;
use crate::game::{GameMap, SoundKind};
use crate::stream::{self, FieldReader, ParseError};

/// Multiplies the caster's melee strength for a while; fight-gated like
/// haste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthSelfSkill {
    pub level_min: u32,
    pub effect_duration: u32,
    pub effect_value: f64,
}

impl StrengthSelfSkill {
    pub(super) const FORMAT: &'static str = "LevelMin\tEffectDuration\tEffectValue";

    pub(super) fn use_support(&self, game: &mut GameMap, caster: EntityHandle) -> bool {
        let Some(creature) = game.entities.creature(caster) else {
            return false;
        };
        if !creature.is_alive() || !creature.is_fighting() {
            return false;
        }
        let tiles = creature.covered_tiles();
        game.attach_effect(
            caster,
            CreatureEffect::new(
                self.effect_duration,
                "SpellCreatureStrength",
                EffectPayload::strength_change(self.effect_value),
            ),
        );
        // Same audio cue as the heal spell.
        for tile in tiles {
            game.fire_spatial_sound(SoundKind::Heal, tile);
        }
        true
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.level_min);
        stream::push_value(out, self.effect_duration);
        stream::push_value(out, self.effect_value);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            level_min: reader.read("LevelMin")?,
            effect_duration: reader.read("EffectDuration")?,
            effect_value: reader.read("EffectValue")?,
        })
    }
}
