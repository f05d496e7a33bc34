//! Explosion spell skill.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::effect::{CreatureEffect, EffectPayload};
use crate::entity::{EntityHandle, GameEntityType};
use crate::game::GameMap;
use crate::stream::{self, FieldReader, ParseError};

/// Ranged spell attaching a burning, defense-bypassing damage-over-time to
/// a creature target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionSkill {
    pub range_max: f64,
    pub level_min: u32,
    pub effect_duration: u32,
    pub effect_value: f64,
}

impl ExplosionSkill {
    pub(super) const FORMAT: &'static str = "RangeMax\tLevelMin\tEffectDuration\tEffectValue";

    pub(super) fn use_fight(
        &self,
        game: &mut GameMap,
        _caster: EntityHandle,
        target: EntityHandle,
    ) -> bool {
        let Some(entity) = game.entities.get(target) else {
            return false;
        };
        if entity.entity_type() != GameEntityType::Creature {
            error!(
                target = entity.name(),
                "explosion spell cast at a non-creature"
            );
            return false;
        }
        game.attach_effect(
            target,
            CreatureEffect::new(
                self.effect_duration,
                "SpellCreatureExplosion",
                EffectPayload::explosion(self.effect_value),
            ),
        );
        true
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.range_max);
        stream::push_value(out, self.level_min);
        stream::push_value(out, self.effect_duration);
        stream::push_value(out, self.effect_value);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            range_max: reader.read("RangeMax")?,
            level_min: reader.read("LevelMin")?,
            effect_duration: reader.read("EffectDuration")?,
            effect_value: reader.read("EffectValue")?,
        })
    }
}
