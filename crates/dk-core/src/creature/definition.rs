//! Creature definitions: the immutable template shared by every creature of
//! a kind, including its skill list.

use serde::{Deserialize, Serialize};

use crate::skill::CreatureSkill;

/// Equipped weapon damage contributions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Weapon {
    pub phy: f64,
    pub mag: f64,
    pub ele: f64,
}

/// Shared, immutable description of a creature kind. Creatures hold it via
/// `Arc`; the skills inside are cloned into per-creature timer state.
///
/// `PartialEq` (kind tag + fields on every skill) is what hot-reload diffing
/// uses to detect definition changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureDefinition {
    pub name: String,
    pub sight_radius: f64,
    pub move_speed: f64,
    pub phy_def: f64,
    pub mag_def: f64,
    pub ele_def: f64,
    pub skills: Vec<CreatureSkill>,
}

impl CreatureDefinition {
    pub fn new(name: &str, sight_radius: f64, move_speed: f64) -> Self {
        Self {
            name: name.to_string(),
            sight_radius,
            move_speed,
            phy_def: 0.0,
            mag_def: 0.0,
            ele_def: 0.0,
            skills: Vec::new(),
        }
    }

    pub fn with_defenses(mut self, phy: f64, mag: f64, ele: f64) -> Self {
        self.phy_def = phy;
        self.mag_def = mag;
        self.ele_def = ele;
        self
    }

    pub fn with_skill(mut self, skill: CreatureSkill) -> Self {
        self.skills.push(skill);
        self
    }
}
