//! Attack-strength modifier effect.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::stream::{self, FieldReader, ParseError};

/// Multiplies the creature's strength modifier once, then holds until
/// release. Same consume-on-apply scheme as the speed change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthChangeEffect {
    pub multiplier: f64,
}

impl StrengthChangeEffect {
    pub(super) const FORMAT: &'static str = "Multiplier";

    pub(super) fn apply(&mut self, creature: &mut Creature) {
        creature.strength_modifier *= self.multiplier;
        self.multiplier = 1.0;
    }

    pub(super) fn release(&self, creature: &mut Creature) {
        creature.strength_modifier = 1.0;
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
