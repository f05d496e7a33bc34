//! Additive defense buff effect.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::stream::{self, FieldReader, ParseError};

/// Adds flat deltas to the three defense modifiers once, then holds. The
/// stored deltas are zeroed on first application so upkeep does not stack
/// them; release subtracts nothing and simply resets the modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseEffect {
    pub phy: f64,
    pub mag: f64,
    pub ele: f64,
}

impl DefenseEffect {
    pub(super) const FORMAT: &'static str = "PhyDef\tMagDef\tEleDef";

    pub(super) fn apply(&mut self, creature: &mut Creature) {
        creature.phy_def_modifier += self.phy;
        creature.mag_def_modifier += self.mag;
        creature.ele_def_modifier += self.ele;
        self.phy = 0.0;
        self.mag = 0.0;
        self.ele = 0.0;
    }

    pub(super) fn release(&self, creature: &mut Creature) {
        creature.phy_def_modifier = 0.0;
        creature.mag_def_modifier = 0.0;
        creature.ele_def_modifier = 0.0;
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.phy);
        stream::push_value(out, self.mag);
        stream::push_value(out, self.ele);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            phy: reader.read("PhyDef")?,
            mag: reader.read("MagDef")?,
            ele: reader.read("EleDef")?,
        })
    }
}
