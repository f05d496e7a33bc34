//! Lingering explosion burn effect.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::stream::{self, FieldReader, ParseError};

/// Deals raw, defense-bypassing damage every upkeep turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionEffect {
    pub damage: f64,
}

impl ExplosionEffect {
    pub(super) const FORMAT: &'static str = "Damage";

    pub(super) fn apply(&mut self, creature: &mut Creature) {
        creature.damage_raw(self.damage);
    }

    pub(super) fn export(&self, out: &mut String) {
        stream::push_value(out, self.damage);
    }

    pub(super) fn import(reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            damage: reader.read("Damage")?,
        })
    }
}
