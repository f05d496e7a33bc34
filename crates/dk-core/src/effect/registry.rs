//! Effect registry: name to payload-parser mapping for the wire format.

use tracing::error;

use super::{
    CreatureEffect, DefenseEffect, EffectPayload, ExplosionEffect, HealEffect, SlapEffect,
    SpeedChangeEffect, StrengthChangeEffect,
};
use crate::stream::{FieldReader, LoadError, ParseError};

/// Parses the variant fields of one registered effect kind.
pub type EffectFactory = fn(&mut FieldReader<'_>) -> Result<EffectPayload, ParseError>;

/// Explicit name-to-factory table. Lookups are a linear scan over a handful
/// of entries.
pub struct EffectRegistry {
    factories: Vec<(&'static str, EffectFactory)>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registry preloaded with every built-in effect kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("Heal", |r| Ok(EffectPayload::Heal(HealEffect::import(r)?)));
        registry.register("SpeedChange", |r| {
            Ok(EffectPayload::SpeedChange(SpeedChangeEffect::import(r)?))
        });
        registry.register("StrengthChange", |r| {
            Ok(EffectPayload::StrengthChange(StrengthChangeEffect::import(
                r,
            )?))
        });
        registry.register("Defense", |r| {
            Ok(EffectPayload::Defense(DefenseEffect::import(r)?))
        });
        registry.register("Explosion", |r| {
            Ok(EffectPayload::Explosion(ExplosionEffect::import(r)?))
        });
        registry.register("Slap", |r| Ok(EffectPayload::Slap(SlapEffect::import(r)?)));
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: EffectFactory) {
        self.factories.push((name, factory));
    }

    /// Read one effect record: `<Name>\t<NbTurnsEffect>\t<ParticleScript>`
    /// plus the variant fields.
    pub fn load(&self, reader: &mut FieldReader<'_>) -> Result<CreatureEffect, LoadError> {
        let name = reader.next_field()?;
        let Some((_, factory)) = self.factories.iter().find(|(n, _)| *n == name) else {
            error!(name, "unknown creature effect");
            return Err(LoadError::UnknownName(name.to_string()));
        };
        let (nb_turns, script) = CreatureEffect::import_base(reader)?;
        let payload = factory(reader)?;
        Ok(CreatureEffect::new(nb_turns, &script, payload))
    }

    /// Write one effect record, matching what [`load`](Self::load) reads.
    pub fn write(&self, effect: &CreatureEffect, out: &mut String) {
        effect.export_to_stream(out);
    }

    /// Field-for-field equality, kind tag included.
    pub fn are_equal(&self, a: &CreatureEffect, b: &CreatureEffect) -> bool {
        a == b
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_round_trip() {
        let registry = EffectRegistry::builtin();
        let effect = CreatureEffect::new(4, "SpellCreatureHeal", EffectPayload::heal(1.5));
        let mut wire = String::new();
        registry.write(&effect, &mut wire);
        assert_eq!(wire, "Heal\t4\tSpellCreatureHeal\t1.5");
        let loaded = registry.load(&mut FieldReader::new(&wire)).unwrap();
        assert_eq!(loaded, effect);
    }

    #[test]
    fn test_empty_script_uses_none_placeholder() {
        let registry = EffectRegistry::builtin();
        let effect = CreatureEffect::new(2, "", EffectPayload::slap());
        let mut wire = String::new();
        registry.write(&effect, &mut wire);
        assert_eq!(wire, "Slap\t2\tnone");
        let loaded = registry.load(&mut FieldReader::new(&wire)).unwrap();
        assert_eq!(loaded.particle_effect_script(), "");
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let registry = EffectRegistry::builtin();
        let err = registry
            .load(&mut FieldReader::new("Petrify\t3\tnone"))
            .unwrap_err();
        assert_eq!(err, LoadError::UnknownName("Petrify".to_string()));
    }

    #[test]
    fn test_every_variant_round_trips() {
        let registry = EffectRegistry::builtin();
        let effects = [
            CreatureEffect::new(3, "SpellCreatureHeal", EffectPayload::heal(2.0)),
            CreatureEffect::new(5, "SpellCreatureHaste", EffectPayload::speed_change(2.0)),
            CreatureEffect::new(5, "SpellCreatureStrength", EffectPayload::strength_change(1.5)),
            CreatureEffect::new(4, "SpellCreatureDefense", EffectPayload::defense(2.0, 1.0, 0.5)),
            CreatureEffect::new(2, "SpellCreatureExplosion", EffectPayload::explosion(4.0)),
            CreatureEffect::new(1, "SpellCreatureSlap", EffectPayload::slap()),
        ];
        for effect in effects {
            let mut wire = String::new();
            registry.write(&effect, &mut wire);
            let loaded = registry.load(&mut FieldReader::new(&wire)).unwrap();
            assert!(registry.are_equal(&loaded, &effect), "mismatch for {wire}");
        }
    }
}
