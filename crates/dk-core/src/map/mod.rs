//! Tile grid and spatial queries: regions, line tracing, visibility.

mod container;
mod distance;
mod tile;
mod vision;

pub use container::TileContainer;
pub use distance::{TileDistance, TileDistanceKind};
pub use tile::{Tile, TileType};
