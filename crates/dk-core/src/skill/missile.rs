//! Missile launch skill.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityHandle, GameEntity, Missile};
use crate::game::{GameEvent, GameMap};
use crate::stream::{self, FieldReader, ParseError};

/// Ranged attack that spawns a projectile flying a straight tile line at
/// the target. Damage lands when the projectile reaches it; the caster's
/// strength modifier does not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileLaunchSkill {
    pub range_max: f64,
    pub range_per_lvl: f64,
    pub level_min: u32,
    pub missile_mesh: String,
    pub missile_part_script: String,
    pub missile_speed: f64,
    pub phy_atk: f64,
    pub phy_atk_per_lvl: f64,
    pub mag_atk: f64,
    pub mag_atk_per_lvl: f64,
    pub ele_atk: f64,
    pub ele_atk_per_lvl: f64,
}

impl MissileLaunchSkill {
    pub(super) const FORMAT: &'static str = "RangeMax\tRangePerLvl\tLevelMin\tMissileMesh\t\
         MissilePartScript\tMissileSpeed\tPhyAtk\tPhyAtkPerLvl\tMagAtk\tMagAtkPerLvl\tEleAtk\t\
         EleAtkPerLvl";

    pub(super) fn use_fight(
        &self,
        game: &mut GameMap,
        caster: EntityHandle,
        target: EntityHandle,
    ) -> bool {
        let Some(attacker) = game.entities.creature(caster) else {
            return false;
        };
        let (phy, mag, ele) = attacker.attack_totals(
            (self.phy_atk, self.mag_atk, self.ele_atk),
            (self.phy_atk_per_lvl, self.mag_atk_per_lvl, self.ele_atk_per_lvl),
            false,
        );
        let from = attacker.position;
        let seat_id = attacker.seat_id;
        let name = format!("missile:{}", attacker.name);
        let Some(target_entity) = game.entities.get(target) else {
            return false;
        };
        let to = target_entity.position();
        // Skip the caster's own tile; the projectile starts there.
        let path: VecDeque<(i32, i32)> = game
            .tiles
            .tiles_between(from.0, from.1, to.0, to.1)
            .iter()
            .map(|tile| tile.position())
            .skip(1)
            .collect();
        let missile = game.entities.add(GameEntity::Missile(Missile {
            name,
            seat_id,
            position: from,
            path,
            speed: self.missile_speed,
            phy_atk: phy,
            mag_atk: mag,
            ele_atk: ele,
            target,
            mesh_name: self.missile_mesh.clone(),
            particle_script: self.missile_part_script.clone(),
        }));
        game.events.push(GameEvent::AttackAnimation {
            attacker: caster,
            target_position: to,
        });
        // A fresh projectile moves the same turn it is fired.
        game.upkeep_missile(missile);
        true
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.range_max);
        stream::push_value(out, self.range_per_lvl);
        stream::push_value(out, self.level_min);
        stream::push_name(out, &self.missile_mesh);
        stream::push_name(out, &self.missile_part_script);
        stream::push_value(out, self.missile_speed);
        stream::push_value(out, self.phy_atk);
        stream::push_value(out, self.phy_atk_per_lvl);
        stream::push_value(out, self.mag_atk);
        stream::push_value(out, self.mag_atk_per_lvl);
        stream::push_value(out, self.ele_atk);
        stream::push_value(out, self.ele_atk_per_lvl);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            range_max: reader.read("RangeMax")?,
            range_per_lvl: reader.read("RangePerLvl")?,
            level_min: reader.read("LevelMin")?,
            missile_mesh: reader.read_name()?,
            missile_part_script: reader.read_name()?,
            missile_speed: reader.read("MissileSpeed")?,
            phy_atk: reader.read("PhyAtk")?,
            phy_atk_per_lvl: reader.read("PhyAtkPerLvl")?,
            mag_atk: reader.read("MagAtk")?,
            mag_atk_per_lvl: reader.read("MagAtkPerLvl")?,
            ele_atk: reader.read("EleAtk")?,
            ele_atk_per_lvl: reader.read("EleAtkPerLvl")?,
        })
    }
}
