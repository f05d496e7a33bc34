//! Game entity table with generational handles.
//!
//! Anything that needs to point at another entity keeps an [`EntityHandle`],
//! never a reference. A handle goes stale the moment its entity is removed
//! (death, pickup, map removal); `get` then returns `None`. This replaces
//! notify-on-destroy listener bookkeeping: validity is checked at the point
//! of use instead.

mod missile;

pub use missile::Missile;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::creature::Creature;

/// Kind of entity, for target-type gates on skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameEntityType {
    Creature,
    Missile,
}

/// Index plus generation counter; stale after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
pub enum GameEntity {
    Creature(Creature),
    Missile(Missile),
}

impl GameEntity {
    pub fn entity_type(&self) -> GameEntityType {
        match self {
            GameEntity::Creature(_) => GameEntityType::Creature,
            GameEntity::Missile(_) => GameEntityType::Missile,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        match self {
            GameEntity::Creature(creature) => creature.position,
            GameEntity::Missile(missile) => missile.position,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GameEntity::Creature(creature) => &creature.name,
            GameEntity::Missile(missile) => &missile.name,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entity: Option<GameEntity>,
}

/// Arena of all live entities.
#[derive(Debug, Default)]
pub struct Entities {
    slots: Vec<Slot>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: GameEntity) -> EntityHandle {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.is_none() {
                slot.entity = Some(entity);
                return EntityHandle {
                    index: index as u32,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityHandle {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// `None` once the handle is stale; the expected steady-state signal
    /// that a tracked entity is gone.
    pub fn get(&self, handle: EntityHandle) -> Option<&GameEntity> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut GameEntity> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    /// Remove the entity and invalidate every outstanding handle to it.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<GameEntity> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation += 1;
        Some(entity)
    }

    pub fn creature(&self, handle: EntityHandle) -> Option<&Creature> {
        match self.get(handle)? {
            GameEntity::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn creature_mut(&mut self, handle: EntityHandle) -> Option<&mut Creature> {
        match self.get_mut(handle)? {
            GameEntity::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    /// Handles of every live entity, in slot order.
    pub fn handles(&self) -> Vec<EntityHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.entity.is_some())
            .map(|(index, slot)| EntityHandle {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entity.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{Creature, CreatureDefinition};
    use std::sync::Arc;

    fn creature(name: &str) -> GameEntity {
        let def = Arc::new(CreatureDefinition::new(name, 10.0, 1.0));
        GameEntity::Creature(Creature::new(name, 0, 1, 20.0, (0, 0), def))
    }

    #[test]
    fn test_handle_goes_stale_on_remove() {
        let mut entities = Entities::new();
        let handle = entities.add(creature("rat"));
        assert!(entities.get(handle).is_some());
        entities.remove(handle).unwrap();
        assert!(entities.get(handle).is_none());
        assert!(entities.remove(handle).is_none());
    }

    #[test]
    fn test_slot_reuse_does_not_revive_old_handle() {
        let mut entities = Entities::new();
        let old = entities.add(creature("rat"));
        entities.remove(old);
        let new = entities.add(creature("bat"));
        assert!(entities.get(old).is_none());
        assert_eq!(entities.get(new).unwrap().name(), "bat");
    }

    #[test]
    fn test_handles_lists_live_entities() {
        let mut entities = Entities::new();
        let a = entities.add(creature("a"));
        let b = entities.add(creature("b"));
        entities.remove(a);
        let handles = entities.handles();
        assert_eq!(handles, vec![b]);
        assert_eq!(entities.len(), 1);
    }
}
