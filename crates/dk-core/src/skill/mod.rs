//! Creature skills: the attacks and self-buffs a creature definition grants.
//!
//! A skill is shared timer configuration (cooldown, warmup) plus a variant
//! payload with the per-kind tuning. Fight skills resolve against a target
//! entity; support skills only ever target the caster. The per-creature
//! timer counters live in [`crate::creature::CreatureSkillData`], not here.

mod defense;
mod explosion;
mod haste;
mod heal;
mod melee;
mod missile;
mod registry;
mod slow;
mod strength;

pub use defense::DefenseSelfSkill;
pub use explosion::ExplosionSkill;
pub use haste::HasteSelfSkill;
pub use heal::HealSelfSkill;
pub use melee::MeleeFightSkill;
pub use missile::MissileLaunchSkill;
pub use registry::{SkillFactory, SkillRegistry};
pub use slow::SlowSkill;
pub use strength::StrengthSelfSkill;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::Creature;
use crate::entity::{EntityHandle, GameEntityType};
use crate::game::GameMap;
use crate::stream::{FieldReader, ParseError};

/// Kind tag for skills; the display string is the registered name used on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum SkillKind {
    #[strum(serialize = "Melee")]
    MeleeFight,
    MissileLaunch,
    HealSelf,
    HasteSelf,
    StrengthSelf,
    DefenseSelf,
    Slow,
    Explosion,
}

/// Variant payload of a skill: the kind-specific tuning fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillPayload {
    MeleeFight(MeleeFightSkill),
    MissileLaunch(MissileLaunchSkill),
    HealSelf(HealSelfSkill),
    HasteSelf(HasteSelfSkill),
    StrengthSelf(StrengthSelfSkill),
    DefenseSelf(DefenseSelfSkill),
    Slow(SlowSkill),
    Explosion(ExplosionSkill),
}

impl SkillPayload {
    pub fn kind(&self) -> SkillKind {
        match self {
            SkillPayload::MeleeFight(_) => SkillKind::MeleeFight,
            SkillPayload::MissileLaunch(_) => SkillKind::MissileLaunch,
            SkillPayload::HealSelf(_) => SkillKind::HealSelf,
            SkillPayload::HasteSelf(_) => SkillKind::HasteSelf,
            SkillPayload::StrengthSelf(_) => SkillKind::StrengthSelf,
            SkillPayload::DefenseSelf(_) => SkillKind::DefenseSelf,
            SkillPayload::Slow(_) => SkillKind::Slow,
            SkillPayload::Explosion(_) => SkillKind::Explosion,
        }
    }
}

/// One configured skill on a creature definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSkill {
    cooldown_nb_turns: u32,
    warmup_nb_turns: u32,
    payload: SkillPayload,
}

impl CreatureSkill {
    pub fn new(cooldown_nb_turns: u32, warmup_nb_turns: u32, payload: SkillPayload) -> Self {
        Self {
            cooldown_nb_turns,
            warmup_nb_turns,
            payload,
        }
    }

    pub fn cooldown_nb_turns(&self) -> u32 {
        self.cooldown_nb_turns
    }

    pub fn warmup_nb_turns(&self) -> u32 {
        self.warmup_nb_turns
    }

    pub fn payload(&self) -> &SkillPayload {
        &self.payload
    }

    pub fn kind(&self) -> SkillKind {
        self.payload.kind()
    }

    fn level_min(&self) -> u32 {
        match &self.payload {
            SkillPayload::MeleeFight(s) => s.level_min,
            SkillPayload::MissileLaunch(s) => s.level_min,
            SkillPayload::HealSelf(s) => s.level_min,
            SkillPayload::HasteSelf(s) => s.level_min,
            SkillPayload::StrengthSelf(s) => s.level_min,
            SkillPayload::DefenseSelf(s) => s.level_min,
            SkillPayload::Slow(s) => s.level_min,
            SkillPayload::Explosion(s) => s.level_min,
        }
    }

    /// Level gate: whether this creature is experienced enough to use the
    /// skill at all.
    pub fn can_be_used_by(&self, creature: &Creature) -> bool {
        creature.level >= self.level_min()
    }

    /// Maximum reach against a target of the given type, in tiles. Zero
    /// means the skill cannot engage that target (support skills against
    /// anything, creature-only spells against non-creatures).
    pub fn range_max(&self, level: u32, target_type: GameEntityType) -> f64 {
        match &self.payload {
            SkillPayload::MeleeFight(_) => 1.0,
            SkillPayload::MissileLaunch(s) => s.range_max + f64::from(level) * s.range_per_lvl,
            SkillPayload::Slow(s) => {
                if target_type == GameEntityType::Creature {
                    s.range_max
                } else {
                    0.0
                }
            }
            SkillPayload::Explosion(s) => {
                if target_type == GameEntityType::Creature {
                    s.range_max
                } else {
                    0.0
                }
            }
            SkillPayload::HealSelf(_)
            | SkillPayload::HasteSelf(_)
            | SkillPayload::StrengthSelf(_)
            | SkillPayload::DefenseSelf(_) => 0.0,
        }
    }

    /// Resolve a fight skill against a target. Returns false when the skill
    /// is not a fight skill or the target cannot be engaged.
    pub fn try_use_fight(
        &self,
        game: &mut GameMap,
        caster: EntityHandle,
        target: EntityHandle,
        ko: bool,
    ) -> bool {
        match &self.payload {
            SkillPayload::MeleeFight(s) => s.use_fight(game, caster, target, ko),
            SkillPayload::MissileLaunch(s) => s.use_fight(game, caster, target),
            SkillPayload::Slow(s) => s.use_fight(game, caster, target),
            SkillPayload::Explosion(s) => s.use_fight(game, caster, target),
            _ => false,
        }
    }

    /// Resolve a self-targeted support skill. Returns false when the skill
    /// is not a support skill or its usefulness gate fails.
    pub fn try_use_support(&self, game: &mut GameMap, caster: EntityHandle) -> bool {
        match &self.payload {
            SkillPayload::HealSelf(s) => s.use_support(game, caster),
            SkillPayload::HasteSelf(s) => s.use_support(game, caster),
            SkillPayload::StrengthSelf(s) => s.use_support(game, caster),
            SkillPayload::DefenseSelf(s) => s.use_support(game, caster),
            _ => false,
        }
    }

    /// Serialize as `<Name>\t<CooldownNbTurns>\t<WarmupNbTurns>` plus the
    /// variant fields.
    pub fn export_to_stream(&self, out: &mut String) {
        out.push_str(&self.kind().to_string());
        out.push('\t');
        out.push_str(&self.cooldown_nb_turns.to_string());
        out.push('\t');
        out.push_str(&self.warmup_nb_turns.to_string());
        match &self.payload {
            SkillPayload::MeleeFight(s) => s.export(out),
            SkillPayload::MissileLaunch(s) => s.export(out),
            SkillPayload::HealSelf(s) => s.export(out),
            SkillPayload::HasteSelf(s) => s.export(out),
            SkillPayload::StrengthSelf(s) => s.export(out),
            SkillPayload::DefenseSelf(s) => s.export(out),
            SkillPayload::Slow(s) => s.export(out),
            SkillPayload::Explosion(s) => s.export(out),
        }
    }

    /// Column header line matching [`export_to_stream`](Self::export_to_stream).
    pub fn format_string(&self) -> String {
        let mut format = String::from("# SkillName\tCooldownNbTurns\tWarmupNbTurns");
        let tail = match &self.payload {
            SkillPayload::MeleeFight(_) => MeleeFightSkill::FORMAT,
            SkillPayload::MissileLaunch(_) => MissileLaunchSkill::FORMAT,
            SkillPayload::HealSelf(_) => HealSelfSkill::FORMAT,
            SkillPayload::HasteSelf(_) => HasteSelfSkill::FORMAT,
            SkillPayload::StrengthSelf(_) => StrengthSelfSkill::FORMAT,
            SkillPayload::DefenseSelf(_) => DefenseSelfSkill::FORMAT,
            SkillPayload::Slow(_) => SlowSkill::FORMAT,
            SkillPayload::Explosion(_) => ExplosionSkill::FORMAT,
        };
        format.push('\t');
        format.push_str(tail);
        format
    }

    pub(crate) fn import_base(reader: &mut FieldReader<'_>) -> Result<(u32, u32), ParseError> {
        let cooldown = reader.read("CooldownNbTurns")?;
        let warmup = reader.read("WarmupNbTurns")?;
        Ok((cooldown, warmup))
    }
}
