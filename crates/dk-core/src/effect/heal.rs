//! Heal-over-time effect.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::stream::{self, FieldReader, ParseError};

/// Restores a fixed amount of hp every turn, capped at max hp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealEffect {
    pub amount: f64,
}

impl HealEffect {
    pub(super) const FORMAT: &'static str = "Amount";

    pub(super) fn apply(&mut self, creature: &mut Creature) {
        creature.heal(self.amount);
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.amount);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            amount: reader.read("Amount")?,
        })
    }
}
