//! Self-defense support skill.

use serde::{Deserialize, Serialize};

use crate::effect::{CreatureEffect, EffectPayload};
use crate::entity::EntityHandle;
use crate::game::{GameMap, SoundKind};
use crate::stream::{self, FieldReader, ParseError};

/// Raises the caster's three defenses for a while; fight-gated like haste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseSelfSkill {
    pub level_min: u32,
    pub effect_duration: u32,
    pub phy_def: f64,
    pub mag_def: f64,
    pub ele_def: f64,
}

impl DefenseSelfSkill {
    pub(super) const FORMAT: &'static str = "LevelMin\tEffectDuration\tPhyDef\tMagDef\tEleDef";

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
                "SpellCreatureDefense",
                EffectPayload::defense(self.phy_def, self.mag_def, self.ele_def),
            ),
        );
        for tile in tiles {
            game.fire_spatial_sound(SoundKind::Defense, tile);
        }
        true
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.level_min);
        stream::push_value(out, self.effect_duration);
        stream::push_value(out, self.phy_def);
        stream::push_value(out, self.mag_def);
        stream::push_value(out, self.ele_def);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            level_min: reader.read("LevelMin")?,
            effect_duration: reader.read("EffectDuration")?,
            phy_def: reader.read("PhyDef")?,
            mag_def: reader.read("MagDef")?,
            ele_def: reader.read("EleDef")?,
        })
    }
}
