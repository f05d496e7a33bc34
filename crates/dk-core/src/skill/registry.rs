//! Skill registry: name to payload-parser mapping for the wire format.

use tracing::error;

use super::{
    CreatureSkill, DefenseSelfSkill, ExplosionSkill, HasteSelfSkill, HealSelfSkill,
    MeleeFightSkill, MissileLaunchSkill, SkillPayload, SlowSkill, StrengthSelfSkill,
};
use crate::stream::{FieldReader, LoadError, ParseError};

/// Parses the variant fields of one registered skill kind.
pub type SkillFactory = fn(&mut FieldReader<'_>) -> Result<SkillPayload, ParseError>;

/// Explicit name-to-factory table, populated by [`builtin`](Self::builtin)
/// or by callers registering their own kinds.
pub struct SkillRegistry {
    factories: Vec<(&'static str, SkillFactory)>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registry preloaded with every built-in skill kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("Melee", |r| {
            Ok(SkillPayload::MeleeFight(MeleeFightSkill::import(r)?))
        });
        registry.register("MissileLaunch", |r| {
            Ok(SkillPayload::MissileLaunch(MissileLaunchSkill::import(r)?))
        });
        registry.register("HealSelf", |r| {
            Ok(SkillPayload::HealSelf(HealSelfSkill::import(r)?))
        });
        registry.register("HasteSelf", |r| {
            Ok(SkillPayload::HasteSelf(HasteSelfSkill::import(r)?))
        });
        registry.register("StrengthSelf", |r| {
            Ok(SkillPayload::StrengthSelf(StrengthSelfSkill::import(r)?))
        });
        registry.register("DefenseSelf", |r| {
            Ok(SkillPayload::DefenseSelf(DefenseSelfSkill::import(r)?))
        });
        registry.register("Slow", |r| Ok(SkillPayload::Slow(SlowSkill::import(r)?)));
        registry.register("Explosion", |r| {
            Ok(SkillPayload::Explosion(ExplosionSkill::import(r)?))
        });
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: SkillFactory) {
        self.factories.push((name, factory));
    }

    /// Read one skill record: `<Name>\t<CooldownNbTurns>\t<WarmupNbTurns>`
    /// plus the variant fields.
    pub fn load(&self, reader: &mut FieldReader<'_>) -> Result<CreatureSkill, LoadError> {
        let name = reader.next_field()?;
        let Some((_, factory)) = self.factories.iter().find(|(n, _)| *n == name) else {
            error!(name, "unknown creature skill");
            return Err(LoadError::UnknownName(name.to_string()));
        };
        let (cooldown, warmup) = CreatureSkill::import_base(reader)?;
        let payload = factory(reader)?;
        Ok(CreatureSkill::new(cooldown, warmup, payload))
    }

    /// Write one skill record, matching what [`load`](Self::load) reads.
    pub fn write(&self, skill: &CreatureSkill, out: &mut String) {
        skill.export_to_stream(out);
    }

    /// Field-for-field equality, used to diff reloaded definitions against
    /// the ones already in play.
    pub fn are_equal(&self, a: &CreatureSkill, b: &CreatureSkill) -> bool {
        a == b
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melee() -> CreatureSkill {
        CreatureSkill::new(
            4,
            0,
            SkillPayload::MeleeFight(MeleeFightSkill {
                level_min: 1,
                phy_atk: 2.0,
                phy_atk_per_lvl: 0.5,
                mag_atk: 0.0,
                mag_atk_per_lvl: 0.0,
                ele_atk: 0.0,
                ele_atk_per_lvl: 0.0,
            }),
        )
    }

    #[test]
    fn test_melee_round_trip() {
        let registry = SkillRegistry::builtin();
        let skill = melee();
        let mut wire = String::new();
        registry.write(&skill, &mut wire);
        assert_eq!(wire, "Melee\t4\t0\t1\t2\t0.5\t0\t0\t0\t0");
        let loaded = registry.load(&mut FieldReader::new(&wire)).unwrap();
        assert!(registry.are_equal(&loaded, &skill));
    }

    #[test]
    fn test_missile_round_trip_with_none_placeholder() {
        let registry = SkillRegistry::builtin();
        let skill = CreatureSkill::new(
            6,
            2,
            SkillPayload::MissileLaunch(MissileLaunchSkill {
                range_max: 5.0,
                range_per_lvl: 0.25,
                level_min: 2,
                missile_mesh: "Boulder".to_string(),
                missile_part_script: String::new(),
                missile_speed: 2.0,
                phy_atk: 3.0,
                phy_atk_per_lvl: 0.2,
                mag_atk: 0.0,
                mag_atk_per_lvl: 0.0,
                ele_atk: 1.0,
                ele_atk_per_lvl: 0.1,
            }),
        );
        let mut wire = String::new();
        registry.write(&skill, &mut wire);
        assert!(wire.starts_with("MissileLaunch\t6\t2\t5\t0.25\t2\tBoulder\tnone\t2"));
        let loaded = registry.load(&mut FieldReader::new(&wire)).unwrap();
        assert_eq!(loaded, skill);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let registry = SkillRegistry::builtin();
        let err = registry
            .load(&mut FieldReader::new("Petrify\t1\t0"))
            .unwrap_err();
        assert_eq!(err, LoadError::UnknownName("Petrify".to_string()));
    }

    #[test]
    fn test_every_variant_round_trips() {
        let registry = SkillRegistry::builtin();
        let skills = [
            melee(),
            CreatureSkill::new(
                6,
                2,
                SkillPayload::MissileLaunch(MissileLaunchSkill {
                    range_max: 5.0,
                    range_per_lvl: 0.25,
                    level_min: 2,
                    missile_mesh: "Boulder".to_string(),
                    missile_part_script: "MissileMagic".to_string(),
                    missile_speed: 2.0,
                    phy_atk: 3.0,
                    phy_atk_per_lvl: 0.2,
                    mag_atk: 0.0,
                    mag_atk_per_lvl: 0.0,
                    ele_atk: 1.0,
                    ele_atk_per_lvl: 0.1,
                }),
            ),
            CreatureSkill::new(
                8,
                0,
                SkillPayload::HealSelf(HealSelfSkill {
                    level_min: 1,
                    effect_duration: 3,
                    effect_value: 2.0,
                }),
            ),
            CreatureSkill::new(
                8,
                0,
                SkillPayload::HasteSelf(HasteSelfSkill {
                    level_min: 2,
                    effect_duration: 4,
                    effect_value: 2.0,
                }),
            ),
            CreatureSkill::new(
                8,
                0,
                SkillPayload::StrengthSelf(StrengthSelfSkill {
                    level_min: 2,
                    effect_duration: 4,
                    effect_value: 1.5,
                }),
            ),
            CreatureSkill::new(
                8,
                0,
                SkillPayload::DefenseSelf(DefenseSelfSkill {
                    level_min: 2,
                    effect_duration: 4,
                    phy_def: 2.0,
                    mag_def: 1.0,
                    ele_def: 0.5,
                }),
            ),
            CreatureSkill::new(
                6,
                1,
                SkillPayload::Slow(SlowSkill {
                    range_max: 5.0,
                    level_min: 3,
                    effect_duration: 2,
                    effect_value: 0.5,
                }),
            ),
            CreatureSkill::new(
                10,
                2,
                SkillPayload::Explosion(ExplosionSkill {
                    range_max: 4.0,
                    level_min: 4,
                    effect_duration: 2,
                    effect_value: 4.0,
                }),
            ),
        ];
        for skill in skills {
            let mut wire = String::new();
            registry.write(&skill, &mut wire);
            let loaded = registry.load(&mut FieldReader::new(&wire)).unwrap();
            assert!(registry.are_equal(&loaded, &skill), "mismatch for {wire}");
        }
    }

    #[test]
    fn test_kind_tag_differs_across_variants() {
        let registry = SkillRegistry::builtin();
        let heal = CreatureSkill::new(
            4,
            0,
            SkillPayload::HealSelf(HealSelfSkill {
                level_min: 1,
                effect_duration: 3,
                effect_value: 2.0,
            }),
        );
        assert!(!registry.are_equal(&melee(), &heal));
    }

    #[test]
    fn test_format_string_matches_record_shape() {
        let skill = melee();
        let mut wire = String::new();
        skill.export_to_stream(&mut wire);
        let header_fields = skill.format_string().split('\t').count();
        let record_fields = wire.split('\t').count();
        assert_eq!(header_fields, record_fields);
    }
}
