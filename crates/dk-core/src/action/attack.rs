//! One-shot attack handler.

use tracing::debug;

use crate::entity::EntityHandle;
use crate::game::{GameMap, SoundKind};

/// Strike the target with the chosen skill. The action pops itself before
/// anything else so a failed strike never loops.
pub(super) fn handle(
    game: &mut GameMap,
    handle: EntityHandle,
    target: EntityHandle,
    tile: (i32, i32),
    skill_index: usize,
    ko: bool,
) -> bool {
    let Some(creature) = game.entities.creature_mut(handle) else {
        return false;
    };
    creature.pop_action();

    if game.entities.get(target).is_none() {
        // Target died or was removed since the attack was scheduled.
        return true;
    }

    let Some(creature) = game.entities.creature(handle) else {
        return false;
    };
    let Some(skill_data) = creature.skills.get(skill_index) else {
        debug!(creature = %creature.name, skill_index, "attack with unknown skill slot");
        return true;
    };
    let skill = skill_data.skill.clone();

    game.fire_spatial_sound(SoundKind::Attack, tile);
    // The strike may still fizzle, out of range or on a target-type
    // mismatch; the turn, the timers and the exertion are spent either way.
    skill.try_use_fight(game, handle, target, ko);

    if let Some(creature) = game.entities.creature_mut(handle) {
        if let Some(skill_data) = creature.skills.get_mut(skill_index) {
            skill_data.reset_timers();
        }
        creature.decrease_wakefulness(0.5);
        creature.receive_exp(1.5);
        creature.nb_turns_without_battle = 0;
    }
    false
}
