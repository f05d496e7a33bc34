//! Turn driver tying the tile grid, the entity table and the action stacks
//! together.
//!
//! One [`tick`](GameMap::tick) runs effect upkeep, skill timers, support
//! casts and action processing for every creature, moves every missile and
//! sweeps the dead. Everything the renderer needs to know about comes out
//! as [`GameEvent`]s.

mod events;

pub use events::{GameEvent, SoundKind};

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::action;
use crate::effect::CreatureEffect;
use crate::entity::{Entities, EntityHandle, GameEntity};
use crate::map::TileContainer;

/// Euclidean distance between two tile coordinates.
pub fn distance_tile(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = f64::from(a.0 - b.0);
    let dy = f64::from(a.1 - b.1);
    (dx * dx + dy * dy).sqrt()
}

/// The whole simulation state.
pub struct GameMap {
    pub tiles: TileContainer,
    pub entities: Entities,
    pub events: Vec<GameEvent>,
    pub turn: u64,
}

impl GameMap {
    pub fn new(tiles: TileContainer) -> Self {
        Self {
            tiles,
            entities: Entities::new(),
            events: Vec::new(),
            turn: 0,
        }
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn fire_spatial_sound(&mut self, sound: SoundKind, position: (i32, i32)) {
        self.events.push(GameEvent::SpatialSound { sound, position });
    }

    /// Attach an effect to a creature, announcing its particle script when
    /// it has one. Silently a no-op on a stale handle.
    pub fn attach_effect(&mut self, handle: EntityHandle, effect: CreatureEffect) {
        let Some(creature) = self.entities.creature_mut(handle) else {
            return;
        };
        if !effect.particle_effect_script().is_empty() {
            self.events.push(GameEvent::ParticleEffect {
                entity: handle,
                script: effect.particle_effect_script().to_string(),
                nb_turns: effect.nb_turns_effect(),
            });
        }
        creature.add_effect(effect);
    }

    /// Shortest walkable path from `from` to `to` over the cardinal
    /// neighbor links, excluding the start tile and including the
    /// destination. Empty when unreachable or already there.
    pub fn path(&self, from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
        if from == to || self.tiles.get_tile(from.0, from.1).is_none() {
            return Vec::new();
        }
        if !self
            .tiles
            .get_tile(to.0, to.1)
            .is_some_and(|tile| tile.is_walkable())
        {
            return Vec::new();
        }

        let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            if current == to {
                break;
            }
            let Some(tile) = self.tiles.get_tile(current.0, current.1) else {
                continue;
            };
            for &next in tile.neighbors() {
                if next == from || came_from.contains_key(&next) {
                    continue;
                }
                let walkable = self
                    .tiles
                    .get_tile(next.0, next.1)
                    .is_some_and(|t| t.is_walkable());
                if !walkable {
                    continue;
                }
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }

        if !came_from.contains_key(&to) {
            return Vec::new();
        }
        let mut path = vec![to];
        let mut current = to;
        while let Some(&previous) = came_from.get(&current) {
            if previous == from {
                break;
            }
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }

    /// Advance the whole simulation by one turn.
    pub fn tick(&mut self) {
        self.turn += 1;
        // Snapshot: entities spawned mid-turn wait until the next one.
        let handles = self.entities.handles();
        for handle in handles {
            match self.entities.get(handle) {
                Some(GameEntity::Creature(_)) => self.upkeep_creature(handle),
                Some(GameEntity::Missile(_)) => self.upkeep_missile(handle),
                None => {}
            }
        }
        self.sweep_dead();
    }

    fn upkeep_creature(&mut self, handle: EntityHandle) {
        if let Some(creature) = self.entities.creature_mut(handle) {
            if !creature.is_alive() {
                return;
            }
            creature.upkeep_effects();
            for skill_data in &mut creature.skills {
                skill_data.decrement_timers();
            }
            creature.nb_turns_without_battle = creature.nb_turns_without_battle.saturating_add(1);
        }

        // A knocked-out creature keeps its effects ticking but does not act.
        if self.entities.creature(handle).is_none_or(|c| c.ko) {
            return;
        }

        // Support skills fire on their own, in definition order.
        let skill_count = self
            .entities
            .creature(handle)
            .map_or(0, |creature| creature.skills.len());
        for index in 0..skill_count {
            let Some(creature) = self.entities.creature(handle) else {
                return;
            };
            let Some(skill_data) = creature.skills.get(index) else {
                continue;
            };
            if !skill_data.is_ready() || !skill_data.skill.can_be_used_by(creature) {
                continue;
            }
            let skill = skill_data.skill.clone();
            if skill.try_use_support(self, handle) {
                if let Some(creature) = self.entities.creature_mut(handle) {
                    if let Some(skill_data) = creature.skills.get_mut(index) {
                        skill_data.reset_timers();
                    }
                }
            }
        }

        action::process_actions(self, handle);
    }

    /// Move one missile along its path, damaging its target on contact and
    /// dissipating at the end of the line.
    pub(crate) fn upkeep_missile(&mut self, handle: EntityHandle) {
        let steps = match self.entities.get(handle) {
            Some(GameEntity::Missile(missile)) => missile.speed.round().max(1.0) as usize,
            _ => return,
        };
        for _ in 0..steps {
            let advanced = match self.entities.get_mut(handle) {
                Some(GameEntity::Missile(missile)) => match missile.path.pop_front() {
                    Some(position) => {
                        missile.position = position;
                        Some((position, missile.target, missile.phy_atk, missile.mag_atk, missile.ele_atk))
                    }
                    None => None,
                },
                _ => return,
            };
            let Some((position, target, phy, mag, ele)) = advanced else {
                self.entities.remove(handle);
                return;
            };
            let hit = self
                .entities
                .creature(target)
                .is_some_and(|creature| creature.position == position);
            if hit {
                if let Some(creature) = self.entities.creature_mut(target) {
                    creature.take_damage(phy, mag, ele, false);
                }
                self.entities.remove(handle);
                return;
            }
        }
        let spent = match self.entities.get(handle) {
            Some(GameEntity::Missile(missile)) => missile.path.is_empty(),
            _ => return,
        };
        if spent {
            self.entities.remove(handle);
        }
    }

    fn sweep_dead(&mut self) {
        for handle in self.entities.handles() {
            let dead = self
                .entities
                .creature(handle)
                .is_some_and(|creature| !creature.is_alive());
            if dead {
                if let Some(creature) = self.entities.creature_mut(handle) {
                    debug!(creature = %creature.name, "creature died");
                    creature.clear_effects();
                    creature.clear_actions();
                }
                self.entities.remove(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{Creature, CreatureDefinition};
    use crate::effect::{CreatureEffect, EffectPayload};
    use crate::map::Tile;
    use std::sync::Arc;

    fn arena(size: i32) -> GameMap {
        let mut tiles = TileContainer::new();
        assert!(tiles.allocate_map_memory(size, size));
        for x in 0..size {
            for y in 0..size {
                tiles.add_tile(Tile::ground(x, y));
                tiles.set_tile_neighbors(x, y);
            }
        }
        GameMap::new(tiles)
    }

    fn spawn(game: &mut GameMap, name: &str, seat: i32, at: (i32, i32)) -> EntityHandle {
        let def = Arc::new(CreatureDefinition::new(name, 10.0, 1.0));
        game.entities
            .add(GameEntity::Creature(Creature::new(name, seat, 1, 20.0, at, def)))
    }

    #[test]
    fn test_distance_tile() {
        assert_eq!(distance_tile((0, 0), (3, 4)), 5.0);
        assert_eq!(distance_tile((2, 2), (2, 2)), 0.0);
    }

    #[test]
    fn test_path_excludes_start_includes_destination() {
        let game = arena(5);
        let path = game.path((0, 0), (3, 0));
        assert_eq!(path.first(), Some(&(1, 0)));
        assert_eq!(path.last(), Some(&(3, 0)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_path_routes_around_walls() {
        // Wall column with a gap at the top.
        let mut game = arena(5);
        for y in 0..4 {
            game.tiles.add_tile(Tile::wall(2, y));
        }
        let path = game.path((0, 0), (4, 0));
        assert!(!path.is_empty());
        assert!(path.contains(&(2, 4)));
        assert!(!path.iter().any(|&(x, y)| x == 2 && y < 4));
    }

    #[test]
    fn test_path_unreachable_is_empty() {
        let mut game = arena(5);
        for y in 0..5 {
            game.tiles.add_tile(Tile::wall(2, y));
        }
        assert!(game.path((0, 0), (4, 0)).is_empty());
    }

    #[test]
    fn test_tick_expires_effects_and_sweeps_dead() {
        // The burn kills on turn two; the sweep removes the corpse.
        let mut game = arena(3);
        let victim = spawn(&mut game, "victim", 1, (1, 1));
        if let Some(creature) = game.entities.creature_mut(victim) {
            creature.hp = 5.0;
        }
        game.attach_effect(
            victim,
            CreatureEffect::new(3, "SpellCreatureExplosion", EffectPayload::explosion(4.0)),
        );
        game.tick();
        assert!(game.entities.creature(victim).is_some());
        game.tick();
        assert!(game.entities.creature(victim).is_none());
    }

    #[test]
    fn test_attach_effect_emits_particle_event() {
        let mut game = arena(3);
        let creature = spawn(&mut game, "hasted", 0, (0, 0));
        game.attach_effect(
            creature,
            CreatureEffect::new(4, "SpellCreatureHaste", EffectPayload::speed_change(2.0)),
        );
        let events = game.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            GameEvent::ParticleEffect { script, nb_turns: 4, .. } if script == "SpellCreatureHaste"
        )));
    }
}
