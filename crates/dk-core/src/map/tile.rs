//! Map tile: terrain type, fullness and neighbor links.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Terrain type of a tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileType {
    /// Placeholder for out-of-map lookups.
    #[default]
    Null = 0,
    Dirt = 1,
    Gold = 2,
    Rock = 3,
    Water = 4,
    Lava = 5,
    Claimed = 6,
}

/// One cell of the map grid.
///
/// Tiles are owned exclusively by the [`TileContainer`](super::TileContainer);
/// everything else refers to them by coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub tile_type: TileType,
    /// Amount of material left in the tile. Anything above zero is solid.
    pub fullness: f64,
    /// Coordinates of linked neighbors (cardinal + diagonal, up to 8).
    /// Links are symmetric: if A lists B then B lists A.
    neighbors: Vec<(i32, i32)>,
}

impl Tile {
    pub fn new(x: i32, y: i32, tile_type: TileType, fullness: f64) -> Self {
        Self {
            x,
            y,
            tile_type,
            fullness,
            neighbors: Vec::new(),
        }
    }

    /// Ground tile with nothing in it.
    pub fn ground(x: i32, y: i32) -> Self {
        Self::new(x, y, TileType::Dirt, 0.0)
    }

    /// Solid wall tile.
    pub fn wall(x: i32, y: i32) -> Self {
        Self::new(x, y, TileType::Rock, 100.0)
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Whether sight lines pass through this tile. Independent of
    /// walkability: a water tile can be seen across but not walked on.
    pub fn permits_vision(&self) -> bool {
        self.fullness == 0.0
    }

    /// Whether a ground creature can stand on this tile.
    pub fn is_walkable(&self) -> bool {
        self.fullness == 0.0 && !matches!(self.tile_type, TileType::Water | TileType::Lava)
    }

    pub fn neighbors(&self) -> &[(i32, i32)] {
        &self.neighbors
    }

    pub(crate) fn add_neighbor(&mut self, coord: (i32, i32)) {
        if !self.neighbors.contains(&coord) {
            self.neighbors.push(coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_follows_fullness() {
        assert!(Tile::ground(0, 0).permits_vision());
        assert!(!Tile::wall(0, 0).permits_vision());
    }

    #[test]
    fn test_water_seen_through_but_not_walkable() {
        let water = Tile::new(2, 3, TileType::Water, 0.0);
        assert!(water.permits_vision());
        assert!(!water.is_walkable());
    }

    #[test]
    fn test_add_neighbor_deduplicates() {
        let mut tile = Tile::ground(1, 1);
        tile.add_neighbor((0, 1));
        tile.add_neighbor((0, 1));
        assert_eq!(tile.neighbors(), &[(0, 1)]);
    }
}
