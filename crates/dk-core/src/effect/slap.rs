//! Slap marker effect.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::stream::{FieldReader, ParseError};

/// Pure duration-and-particle marker; applies no stat change. The particle
/// script on the carrying effect is the whole point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlapEffect {}

impl SlapEffect {
    pub(super) const FORMAT: &'static str = "";

    pub(super) fn apply(&mut self, _creature: &mut Creature) {}

    pub(super) fn export(&self, _out: &mut String) {}

    pub(super) fn import(_reader: &mut FieldReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}
