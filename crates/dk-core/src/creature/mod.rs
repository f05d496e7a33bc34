//! Creature state: combat stats, modifiers, skill timers, active effects and
//! the action stack.

mod definition;

pub use definition::{CreatureDefinition, Weapon};

use std::sync::Arc;

use crate::action::CreatureAction;
use crate::effect::CreatureEffect;
use crate::skill::CreatureSkill;

/// Per-creature mutable timer state for one skill. The skill configuration
/// itself stays shared and immutable on the definition; only these counters
/// change as the creature fights.
#[derive(Debug, Clone)]
pub struct CreatureSkillData {
    pub skill: CreatureSkill,
    pub warmup: u32,
    pub cooldown: u32,
}

impl CreatureSkillData {
    pub fn new(skill: CreatureSkill) -> Self {
        let warmup = skill.warmup_nb_turns();
        Self {
            skill,
            warmup,
            cooldown: 0,
        }
    }

    /// Whether the timers allow firing this turn.
    pub fn is_ready(&self) -> bool {
        self.warmup == 0 && self.cooldown == 0
    }

    /// Restart both counters after a use.
    pub fn reset_timers(&mut self) {
        self.warmup = self.skill.warmup_nb_turns();
        self.cooldown = self.skill.cooldown_nb_turns();
    }

    pub fn decrement_timers(&mut self) {
        if self.warmup > 0 {
            self.warmup -= 1;
        } else if self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }
}

#[derive(Debug)]
pub struct Creature {
    pub name: String,
    pub seat_id: i32,
    pub level: u32,
    pub hp: f64,
    pub max_hp: f64,
    pub position: (i32, i32),
    /// Drops as the creature exerts itself; fighting is tiring.
    pub wakefulness: f64,
    pub experience: f64,
    /// Multiplicative move-speed modifier applied by effects; 1.0 = none.
    pub speed_modifier: f64,
    /// Multiplicative attack modifier applied by effects; 1.0 = none.
    pub strength_modifier: f64,
    /// Additive defense deltas applied by effects.
    pub phy_def_modifier: f64,
    pub mag_def_modifier: f64,
    pub ele_def_modifier: f64,
    pub weapon_l: Option<Weapon>,
    pub weapon_r: Option<Weapon>,
    /// Knocked out: still alive but out of the fight.
    pub ko: bool,
    pub nb_turns_without_battle: u32,
    pub definition: Arc<CreatureDefinition>,
    pub skills: Vec<CreatureSkillData>,
    pub effects: Vec<CreatureEffect>,
    actions: Vec<CreatureAction>,
}

impl Creature {
    pub fn new(
        name: &str,
        seat_id: i32,
        level: u32,
        max_hp: f64,
        position: (i32, i32),
        definition: Arc<CreatureDefinition>,
    ) -> Self {
        let skills = definition
            .skills
            .iter()
            .cloned()
            .map(CreatureSkillData::new)
            .collect();
        Self {
            name: name.to_string(),
            seat_id,
            level,
            hp: max_hp,
            max_hp,
            position,
            wakefulness: 100.0,
            experience: 0.0,
            speed_modifier: 1.0,
            strength_modifier: 1.0,
            phy_def_modifier: 0.0,
            mag_def_modifier: 0.0,
            ele_def_modifier: 0.0,
            weapon_l: None,
            weapon_r: None,
            ko: false,
            nb_turns_without_battle: 0,
            definition,
            skills,
            effects: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_hurt(&self) -> bool {
        self.hp < self.max_hp
    }

    /// Whether another seat may attack this creature.
    pub fn is_attackable(&self, by_seat: i32) -> bool {
        self.is_alive() && !self.ko && self.seat_id != by_seat
    }

    /// Tiles this creature occupies. Single-tile creatures only.
    pub fn covered_tiles(&self) -> Vec<(i32, i32)> {
        vec![self.position]
    }

    pub fn phy_defense(&self) -> f64 {
        self.definition.phy_def + self.phy_def_modifier
    }

    pub fn mag_defense(&self) -> f64 {
        self.definition.mag_def + self.mag_def_modifier
    }

    pub fn ele_defense(&self) -> f64 {
        self.definition.ele_def + self.ele_def_modifier
    }

    /// Apply a three-component hit, each reduced by the matching defense.
    /// With `ko` set a lethal hit knocks the creature out at 1 hp instead of
    /// killing it. Returns the total damage dealt.
    pub fn take_damage(&mut self, phy: f64, mag: f64, ele: f64, ko: bool) -> f64 {
        let total = (phy - self.phy_defense()).max(0.0)
            + (mag - self.mag_defense()).max(0.0)
            + (ele - self.ele_defense()).max(0.0);
        if total >= self.hp {
            if ko {
                self.hp = 1.0;
                self.ko = true;
            } else {
                self.hp = 0.0;
            }
        } else {
            self.hp -= total;
        }
        total
    }

    /// Direct hp loss, bypassing defenses (explosion effect upkeep).
    pub fn damage_raw(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f64) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn receive_exp(&mut self, experience: f64) {
        self.experience += experience;
    }

    pub fn decrease_wakefulness(&mut self, amount: f64) {
        self.wakefulness = (self.wakefulness - amount).max(0.0);
    }

    /// Total attack magnitudes for this creature: level-scaled base plus
    /// both weapons. The strength modifier is applied only when asked for
    /// (melee applies it, missiles do not).
    pub fn attack_totals(
        &self,
        base: (f64, f64, f64),
        per_lvl: (f64, f64, f64),
        apply_strength: bool,
    ) -> (f64, f64, f64) {
        let level = f64::from(self.level);
        let mut phy = base.0 + level * per_lvl.0;
        let mut mag = base.1 + level * per_lvl.1;
        let mut ele = base.2 + level * per_lvl.2;
        for weapon in [&self.weapon_l, &self.weapon_r].into_iter().flatten() {
            phy += weapon.phy;
            mag += weapon.mag;
            ele += weapon.ele;
        }
        if apply_strength && self.strength_modifier != 1.0 {
            phy *= self.strength_modifier;
            mag *= self.strength_modifier;
            ele *= self.strength_modifier;
        }
        (phy, mag, ele)
    }

    pub fn add_effect(&mut self, effect: CreatureEffect) {
        self.effects.push(effect);
    }

    /// Run one upkeep pass over the active effects, dropping the expired
    /// ones after their release has run.
    pub fn upkeep_effects(&mut self) {
        let mut effects = std::mem::take(&mut self.effects);
        effects.retain_mut(|effect| effect.upkeep_effect(self));
        self.effects = effects;
    }

    /// Release and drop every active effect (death, explicit clearing).
    pub fn clear_effects(&mut self) {
        let mut effects = std::mem::take(&mut self.effects);
        for effect in &mut effects {
            effect.release_effect(self);
        }
    }

    // --- action stack ---

    pub fn push_action(&mut self, action: CreatureAction) {
        self.actions.push(action);
    }

    pub fn pop_action(&mut self) -> Option<CreatureAction> {
        self.actions.pop()
    }

    pub fn top_action(&self) -> Option<&CreatureAction> {
        self.actions.last()
    }

    /// The whole stack, bottom first.
    pub fn actions(&self) -> &[CreatureAction] {
        &self.actions
    }

    pub fn top_action_mut(&mut self) -> Option<&mut CreatureAction> {
        self.actions.last_mut()
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    /// Whether any fight behavior sits anywhere in the stack. Support
    /// buffs consult this so they are not wasted outside combat.
    pub fn is_fighting(&self) -> bool {
        self.actions.iter().any(|action| action.is_fight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{CreatureEffect, EffectPayload};

    fn creature() -> Creature {
        let def = Arc::new(CreatureDefinition::new("test", 10.0, 1.0).with_defenses(2.0, 1.0, 0.0));
        Creature::new("test", 0, 3, 30.0, (1, 1), def)
    }

    #[test]
    fn test_take_damage_reduced_by_defense() {
        let mut c = creature();
        let dealt = c.take_damage(5.0, 2.0, 1.0, false);
        // (5-2) + (2-1) + (1-0) = 5
        assert_eq!(dealt, 5.0);
        assert_eq!(c.hp, 25.0);
    }

    #[test]
    fn test_defense_never_heals() {
        let mut c = creature();
        let dealt = c.take_damage(1.0, 0.0, 0.0, false);
        assert_eq!(dealt, 0.0);
        assert_eq!(c.hp, 30.0);
    }

    #[test]
    fn test_lethal_hit_with_ko_leaves_one_hp() {
        let mut c = creature();
        c.take_damage(100.0, 0.0, 0.0, true);
        assert!(c.is_alive());
        assert!(c.ko);
        assert_eq!(c.hp, 1.0);
        assert!(!c.is_attackable(1));
    }

    #[test]
    fn test_lethal_hit_without_ko_kills() {
        let mut c = creature();
        c.take_damage(100.0, 0.0, 0.0, false);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_attack_totals_with_weapons_and_strength() {
        let mut c = creature();
        c.weapon_l = Some(Weapon {
            phy: 2.0,
            mag: 0.0,
            ele: 0.0,
        });
        c.strength_modifier = 2.0;
        let (phy, mag, ele) = c.attack_totals((1.0, 0.0, 0.0), (1.0, 0.0, 0.0), true);
        // (1 + 3*1 + 2) * 2
        assert_eq!(phy, 12.0);
        assert_eq!(mag, 0.0);
        assert_eq!(ele, 0.0);
        let (phy, _, _) = c.attack_totals((1.0, 0.0, 0.0), (1.0, 0.0, 0.0), false);
        assert_eq!(phy, 6.0);
    }

    #[test]
    fn test_clear_effects_releases_modifiers() {
        let mut c = creature();
        c.add_effect(CreatureEffect::new(
            5,
            "SpellCreatureHaste",
            EffectPayload::speed_change(2.0),
        ));
        c.upkeep_effects();
        assert_eq!(c.speed_modifier, 2.0);
        c.clear_effects();
        assert_eq!(c.speed_modifier, 1.0);
        assert!(c.effects.is_empty());
    }
}
