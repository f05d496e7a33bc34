//! Durable arena fight handler.

use std::collections::VecDeque;

use tracing::error;

use crate::action::CreatureAction;
use crate::entity::{EntityHandle, GameEntityType};
use crate::game::{self, GameMap};

/// Keep engaging one target: strike when a ready skill reaches it, close
/// the distance otherwise. Arena strikes knock out rather than kill.
pub(super) fn handle(game: &mut GameMap, handle: EntityHandle, target: EntityHandle) -> bool {
    let Some(creature) = game.entities.creature(handle) else {
        return false;
    };
    let seat_id = creature.seat_id;
    let position = creature.position;
    let level = creature.level;
    let name = creature.name.clone();

    if game.tiles.get_tile(position.0, position.1).is_none() {
        error!(creature = %name, "fighting creature is not standing on a map tile");
        if let Some(creature) = game.entities.creature_mut(handle) {
            creature.pop_action();
        }
        return false;
    }

    let target_position = match game.entities.creature(target) {
        Some(other)
            if other.is_attackable(seat_id)
                && game
                    .tiles
                    .get_tile(other.position.0, other.position.1)
                    .is_some() =>
        {
            other.position
        }
        _ => {
            // Target gone, dead, off the map or already knocked out.
            if let Some(creature) = game.entities.creature_mut(handle) {
                creature.pop_action();
            }
            return true;
        }
    };

    // Longest-reaching ready skill that can engage a creature.
    let Some(creature) = game.entities.creature(handle) else {
        return false;
    };
    let mut best: Option<(usize, f64)> = None;
    for (index, skill_data) in creature.skills.iter().enumerate() {
        if !skill_data.is_ready() || !skill_data.skill.can_be_used_by(creature) {
            continue;
        }
        let range = skill_data.skill.range_max(level, GameEntityType::Creature);
        if range <= 0.0 {
            continue;
        }
        if best.is_none_or(|(_, best_range)| range > best_range) {
            best = Some((index, range));
        }
    }
    let Some((skill_index, range)) = best else {
        // Every fight skill is warming up or cooling down. The fight is
        // deliberately kept on the stack rather than popped: the target is
        // still engageable and a timer will clear shortly.
        return false;
    };

    if game::distance_tile(position, target_position) <= range {
        if let Some(creature) = game.entities.creature_mut(handle) {
            creature.push_action(CreatureAction::Attack {
                target,
                tile: target_position,
                skill_index,
                ko: true,
            });
        }
        return true;
    }

    // Close in, a few steps at a time so the fight re-evaluates often. The
    // path ends at the first tile from which the skill reaches the target.
    let mut path = game.path(position, target_position);
    if path.is_empty() {
        error!(creature = %name, ?target_position, "no path to the fight target");
        if let Some(creature) = game.entities.creature_mut(handle) {
            creature.pop_action();
        }
        return true;
    }
    if let Some(stop) = path
        .iter()
        .position(|&step| game::distance_tile(step, target_position) <= range)
    {
        path.truncate(stop + 1);
    }
    path.truncate(3);
    if let Some(creature) = game.entities.creature_mut(handle) {
        creature.push_action(CreatureAction::WalkToTile {
            path: VecDeque::from(path),
            nb_turns: 0,
        });
    }
    false
}
