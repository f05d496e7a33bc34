//! Creature action stack processing.
//!
//! Actions are plain tagged descriptors kept on a per-creature stack; a
//! dispatch function interprets the top one each turn. A handler returns
//! true when the turn should keep processing (it popped or pushed something
//! and the new top deserves a look) and false once the turn is spent.

mod attack;
mod fight_arena;
mod walk;

use std::collections::VecDeque;

use strum::Display;
use tracing::warn;

use crate::entity::EntityHandle;
use crate::game::GameMap;

/// An entry on a creature's action stack.
#[derive(Debug, Clone, Display)]
pub enum CreatureAction {
    /// One strike with a chosen skill, then gone. Pops itself no matter
    /// what happens.
    Attack {
        target: EntityHandle,
        tile: (i32, i32),
        skill_index: usize,
        ko: bool,
    },
    /// Durable fight behavior: keep engaging the target until it is gone,
    /// dead or no longer attackable.
    FightArena { target: EntityHandle },
    /// Follow a precomputed path, re-evaluating any fight below each turn.
    WalkToTile {
        path: VecDeque<(i32, i32)>,
        nb_turns: u32,
    },
}

impl CreatureAction {
    /// Whether this entry counts as fight behavior, for support-skill gates
    /// and walk interruption.
    pub fn is_fight(&self) -> bool {
        matches!(
            self,
            CreatureAction::Attack { .. } | CreatureAction::FightArena { .. }
        )
    }
}

/// Upper bound on handler dispatches per creature per turn. A stack that
/// keeps rescheduling past this is cycling.
const MAX_ACTIONS_PER_TURN: u32 = 8;

/// Run the creature's action stack for one turn.
pub fn process_actions(game: &mut GameMap, handle: EntityHandle) {
    let mut processed = 0;
    loop {
        let Some(action) = game
            .entities
            .creature(handle)
            .and_then(|creature| creature.top_action().cloned())
        else {
            return;
        };
        processed += 1;
        if processed > MAX_ACTIONS_PER_TURN {
            let name = game
                .entities
                .creature(handle)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            warn!(creature = %name, action = %action, "action stack is cycling, dropping it");
            if let Some(creature) = game.entities.creature_mut(handle) {
                creature.clear_actions();
            }
            return;
        }
        let proceed = match action {
            CreatureAction::Attack {
                target,
                tile,
                skill_index,
                ko,
            } => attack::handle(game, handle, target, tile, skill_index, ko),
            CreatureAction::FightArena { target } => fight_arena::handle(game, handle, target),
            CreatureAction::WalkToTile { .. } => walk::handle(game, handle),
        };
        if !proceed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fight() {
        let walk = CreatureAction::WalkToTile {
            path: VecDeque::new(),
            nb_turns: 0,
        };
        assert!(!walk.is_fight());
    }
}
