//! Missile entity spawned by ranged skills.

use std::collections::VecDeque;

use crate::entity::EntityHandle;

/// A projectile in flight. Follows a precomputed tile path toward the tile
/// it was aimed at; damages the tracked target when it reaches it, or
/// dissipates at the end of the path.
#[derive(Debug, Clone)]
pub struct Missile {
    pub name: String,
    pub seat_id: i32,
    pub position: (i32, i32),
    /// Remaining tiles toward the attacked tile, nearest first.
    pub path: VecDeque<(i32, i32)>,
    /// Tiles advanced per turn.
    pub speed: f64,
    pub phy_atk: f64,
    pub mag_atk: f64,
    pub ele_atk: f64,
    pub target: EntityHandle,
    /// Render hints carried for the presentation layer.
    pub mesh_name: String,
    pub particle_script: String,
}
