//! Path-following walk handler.

use crate::action::CreatureAction;
use crate::entity::EntityHandle;
use crate::game::GameMap;

/// Advance along the stored path. With a fight behavior below, walking
/// yields back after one turn so the fight can re-aim at a moving target.
pub(super) fn handle(game: &mut GameMap, handle: EntityHandle) -> bool {
    let Some(creature) = game.entities.creature_mut(handle) else {
        return false;
    };
    let stack = creature.actions();
    let fight_below = stack.len() >= 2 && stack[stack.len() - 2].is_fight();
    let speed = creature.definition.move_speed * creature.speed_modifier;
    let steps = speed.round().max(1.0) as usize;

    let mut new_position = None;
    let mut done = false;
    match creature.top_action_mut() {
        Some(CreatureAction::WalkToTile { path, nb_turns }) => {
            if path.is_empty() || (fight_below && *nb_turns >= 1) {
                done = true;
            } else {
                for _ in 0..steps {
                    match path.pop_front() {
                        Some(position) => new_position = Some(position),
                        None => break,
                    }
                }
                *nb_turns += 1;
            }
        }
        _ => return false,
    }
    if done {
        creature.pop_action();
        return true;
    }
    if let Some(position) = new_position {
        creature.position = position;
    }
    false
}
