//! Move-speed modifier effect, used by both haste and slow.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::stream::{self, FieldReader, ParseError};

/// Multiplies the creature's speed modifier once, then holds until release.
/// The stored multiplier drops to 1.0 after the first application so later
/// upkeep turns do not compound it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedChangeEffect {
    pub multiplier: f64,
}

impl SpeedChangeEffect {
    pub(super) const FORMAT: &'static str = "Multiplier";

    pub(super) fn apply(&mut self, creature: &mut Creature) {
        creature.speed_modifier *= self.multiplier;
        self.multiplier = 1.0;
    }

    pub(super) fn release(&self, creature: &mut Creature) {
        creature.speed_modifier = 1.0;
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.multiplier);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            multiplier: reader.read("Multiplier")?,
        })
    }
}
