//! Timed status effects attached to creatures.
//!
//! Every effect carries a turn countdown and a particle-effect hint for the
//! render layer. Upkeep runs once per turn on the owning creature: an
//! expired effect releases its modifier and is dropped by the caller.

mod defense;
mod explosion;
mod heal;
mod registry;
mod slap;
mod speed;
mod strength;

pub use defense::DefenseEffect;
pub use explosion::ExplosionEffect;
pub use heal::HealEffect;
pub use registry::{EffectFactory, EffectRegistry};
pub use slap::SlapEffect;
pub use speed::SpeedChangeEffect;
pub use strength::StrengthChangeEffect;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::Creature;
use crate::stream::{self, FieldReader, ParseError};

/// Kind tag for effects; the display string is the registered name used on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum EffectKind {
    Heal,
    SpeedChange,
    StrengthChange,
    Defense,
    Explosion,
    Slap,
}

/// Variant payload of an effect: the magnitude(s) it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectPayload {
    Heal(HealEffect),
    SpeedChange(SpeedChangeEffect),
    StrengthChange(StrengthChangeEffect),
    Defense(DefenseEffect),
    Explosion(ExplosionEffect),
    Slap(SlapEffect),
}

impl EffectPayload {
    pub fn heal(amount: f64) -> Self {
        EffectPayload::Heal(HealEffect { amount })
    }

    pub fn speed_change(multiplier: f64) -> Self {
        EffectPayload::SpeedChange(SpeedChangeEffect { multiplier })
    }

    pub fn strength_change(multiplier: f64) -> Self {
        EffectPayload::StrengthChange(StrengthChangeEffect { multiplier })
    }

    pub fn defense(phy: f64, mag: f64, ele: f64) -> Self {
        EffectPayload::Defense(DefenseEffect { phy, mag, ele })
    }

    pub fn explosion(damage: f64) -> Self {
        EffectPayload::Explosion(ExplosionEffect { damage })
    }

    pub fn slap() -> Self {
        EffectPayload::Slap(SlapEffect {})
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            EffectPayload::Heal(_) => EffectKind::Heal,
            EffectPayload::SpeedChange(_) => EffectKind::SpeedChange,
            EffectPayload::StrengthChange(_) => EffectKind::StrengthChange,
            EffectPayload::Defense(_) => EffectKind::Defense,
            EffectPayload::Explosion(_) => EffectKind::Explosion,
            EffectPayload::Slap(_) => EffectKind::Slap,
        }
    }
}

/// A timed effect attached to one creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureEffect {
    nb_turns_effect: u32,
    particle_effect_script: String,
    payload: EffectPayload,
}

impl CreatureEffect {
    pub fn new(nb_turns_effect: u32, particle_effect_script: &str, payload: EffectPayload) -> Self {
        Self {
            nb_turns_effect,
            particle_effect_script: particle_effect_script.to_string(),
            payload,
        }
    }

    pub fn nb_turns_effect(&self) -> u32 {
        self.nb_turns_effect
    }

    pub fn particle_effect_script(&self) -> &str {
        &self.particle_effect_script
    }

    pub fn payload(&self) -> &EffectPayload {
        &self.payload
    }

    pub fn kind(&self) -> EffectKind {
        self.payload.kind()
    }

    /// One per-turn maintenance step. Returns false once expired; the
    /// caller must then drop the effect (release has already run).
    pub fn upkeep_effect(&mut self, creature: &mut Creature) -> bool {
        if self.nb_turns_effect == 0 {
            self.release_effect(creature);
            return false;
        }
        self.nb_turns_effect -= 1;
        self.apply_effect(creature);
        true
    }

    /// Apply this turn's magnitude. Modifier effects consume their stored
    /// magnitude on first application so repeated upkeep does not stack.
    pub fn apply_effect(&mut self, creature: &mut Creature) {
        match &mut self.payload {
            EffectPayload::Heal(effect) => effect.apply(creature),
            EffectPayload::SpeedChange(effect) => effect.apply(creature),
            EffectPayload::StrengthChange(effect) => effect.apply(creature),
            EffectPayload::Defense(effect) => effect.apply(creature),
            EffectPayload::Explosion(effect) => effect.apply(creature),
            EffectPayload::Slap(effect) => effect.apply(creature),
        }
    }

    /// Reverse the modifier on expiry or explicit clearing.
    pub fn release_effect(&mut self, creature: &mut Creature) {
        match &self.payload {
            EffectPayload::Heal(_) | EffectPayload::Explosion(_) | EffectPayload::Slap(_) => {}
            EffectPayload::SpeedChange(effect) => effect.release(creature),
            EffectPayload::StrengthChange(effect) => effect.release(creature),
            EffectPayload::Defense(effect) => effect.release(creature),
        }
    }

    /// Serialize as `<Name>\t<NbTurnsEffect>\t<ParticleScript>` plus the
    /// variant fields.
    pub fn export_to_stream(&self, out: &mut String) {
        out.push_str(&self.kind().to_string());
        out.push('\t');
        out.push_str(&self.nb_turns_effect.to_string());
        stream::push_name(out, &self.particle_effect_script);
        match &self.payload {
            EffectPayload::Heal(effect) => effect.export(out),
            EffectPayload::SpeedChange(effect) => effect.export(out),
            EffectPayload::StrengthChange(effect) => effect.export(out),
            EffectPayload::Defense(effect) => effect.export(out),
            EffectPayload::Explosion(effect) => effect.export(out),
            EffectPayload::Slap(effect) => effect.export(out),
        }
    }

    /// Column header line matching [`export_to_stream`](Self::export_to_stream).
    pub fn format_string(&self) -> String {
        let mut format = String::from("# EffectName\tNbTurnsEffect\tParticleScript");
        let tail = match &self.payload {
            EffectPayload::Heal(_) => HealEffect::FORMAT,
            EffectPayload::SpeedChange(_) => SpeedChangeEffect::FORMAT,
            EffectPayload::StrengthChange(_) => StrengthChangeEffect::FORMAT,
            EffectPayload::Defense(_) => DefenseEffect::FORMAT,
            EffectPayload::Explosion(_) => ExplosionEffect::FORMAT,
            EffectPayload::Slap(_) => SlapEffect::FORMAT,
        };
        if !tail.is_empty() {
            format.push('\t');
            format.push_str(tail);
        }
        format
    }

    pub(crate) fn import_base(
        reader: &mut FieldReader<'_>,
    ) -> Result<(u32, String), ParseError> {
        let nb_turns = reader.read("NbTurnsEffect")?;
        let script = reader.read_name()?;
        Ok((nb_turns, script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::CreatureDefinition;
    use std::sync::Arc;

    fn creature() -> Creature {
        let def = Arc::new(CreatureDefinition::new("test", 10.0, 1.0));
        Creature::new("test", 0, 1, 20.0, (0, 0), def)
    }

    #[test]
    fn test_speed_change_expiry() {
        let mut c = creature();
        let mut effect =
            CreatureEffect::new(2, "SpellCreatureSlow", EffectPayload::speed_change(0.5));
        assert!(effect.upkeep_effect(&mut c));
        assert_eq!(c.speed_modifier, 0.5);
        assert!(effect.upkeep_effect(&mut c));
        assert_eq!(c.speed_modifier, 0.5);
        assert!(!effect.upkeep_effect(&mut c));
        assert_eq!(c.speed_modifier, 1.0);
    }

    #[test]
    fn test_modifier_does_not_double_stack() {
        let mut c = creature();
        let mut effect =
            CreatureEffect::new(5, "SpellCreatureHaste", EffectPayload::speed_change(2.0));
        effect.upkeep_effect(&mut c);
        effect.upkeep_effect(&mut c);
        effect.upkeep_effect(&mut c);
        assert_eq!(c.speed_modifier, 2.0);
    }

    #[test]
    fn test_heal_applies_every_turn() {
        let mut c = creature();
        c.hp = 10.0;
        let mut effect = CreatureEffect::new(3, "SpellCreatureHeal", EffectPayload::heal(2.0));
        effect.upkeep_effect(&mut c);
        effect.upkeep_effect(&mut c);
        assert_eq!(c.hp, 14.0);
    }

    #[test]
    fn test_heal_capped_at_max_hp() {
        let mut c = creature();
        c.hp = 19.5;
        let mut effect = CreatureEffect::new(2, "SpellCreatureHeal", EffectPayload::heal(5.0));
        effect.upkeep_effect(&mut c);
        assert_eq!(c.hp, 20.0);
    }

    #[test]
    fn test_explosion_damages_every_turn() {
        let mut c = creature();
        let mut effect =
            CreatureEffect::new(2, "SpellCreatureExplosion", EffectPayload::explosion(4.0));
        effect.upkeep_effect(&mut c);
        effect.upkeep_effect(&mut c);
        assert_eq!(c.hp, 12.0);
    }

    #[test]
    fn test_defense_applies_once_and_releases() {
        let mut c = creature();
        let mut effect = CreatureEffect::new(
            3,
            "SpellCreatureDefense",
            EffectPayload::defense(2.0, 1.0, 0.5),
        );
        effect.upkeep_effect(&mut c);
        effect.upkeep_effect(&mut c);
        assert_eq!(c.phy_def_modifier, 2.0);
        assert_eq!(c.mag_def_modifier, 1.0);
        assert_eq!(c.ele_def_modifier, 0.5);
        effect.release_effect(&mut c);
        assert_eq!(c.phy_def_modifier, 0.0);
        assert_eq!(c.mag_def_modifier, 0.0);
        assert_eq!(c.ele_def_modifier, 0.0);
    }

    #[test]
    fn test_slap_is_inert() {
        let mut c = creature();
        let mut effect = CreatureEffect::new(1, "SpellCreatureSlap", EffectPayload::slap());
        assert!(effect.upkeep_effect(&mut c));
        assert_eq!(c.hp, 20.0);
        assert!(!effect.upkeep_effect(&mut c));
    }
}
