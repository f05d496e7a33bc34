//! Melee fight skill.

use serde::{Deserialize, Serialize};

use crate::entity::EntityHandle;
use crate::game::{GameEvent, GameMap};
use crate::stream::{self, FieldReader, ParseError};

/// Close-range attack resolved the same turn. The caster's strength
/// modifier scales the hit; missiles never get that bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeleeFightSkill {
    pub level_min: u32,
    pub phy_atk: f64,
    pub phy_atk_per_lvl: f64,
    pub mag_atk: f64,
    pub mag_atk_per_lvl: f64,
    pub ele_atk: f64,
    pub ele_atk_per_lvl: f64,
}

impl MeleeFightSkill {
    pub(super) const FORMAT: &'static str =
        "LevelMin\tPhyAtk\tPhyAtkPerLvl\tMagAtk\tMagAtkPerLvl\tEleAtk\tEleAtkPerLvl";

    pub(super) fn use_fight(
        &self,
        game: &mut GameMap,
        caster: EntityHandle,
        target: EntityHandle,
        ko: bool,
    ) -> bool {
        let Some(attacker) = game.entities.creature(caster) else {
            return false;
        };
        let (phy, mag, ele) = attacker.attack_totals(
            (self.phy_atk, self.mag_atk, self.ele_atk),
            (self.phy_atk_per_lvl, self.mag_atk_per_lvl, self.ele_atk_per_lvl),
            true,
        );
        let Some(defender) = game.entities.creature_mut(target) else {
            return false;
        };
        let target_position = defender.position;
        defender.take_damage(phy, mag, ele, ko);
        game.events.push(GameEvent::AttackAnimation {
            attacker: caster,
            target_position,
        });
        true
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.level_min);
        stream::push_value(out, self.phy_atk);
        stream::push_value(out, self.phy_atk_per_lvl);
        stream::push_value(out, self.mag_atk);
        stream::push_value(out, self.mag_atk_per_lvl);
        stream::push_value(out, self.ele_atk);
        stream::push_value(out, self.ele_atk_per_lvl);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            level_min: reader.read("LevelMin")?,
            phy_atk: reader.read("PhyAtk")?,
            phy_atk_per_lvl: reader.read("PhyAtkPerLvl")?,
            mag_atk: reader.read("MagAtk")?,
            mag_atk_per_lvl: reader.read("MagAtkPerLvl")?,
            ele_atk: reader.read("EleAtk")?,
            ele_atk_per_lvl: reader.read("EleAtkPerLvl")?,
        })
    }
}
