//! The tile grid and its spatial queries.

use tracing::error;

use super::distance::TileDistanceCache;
use super::tile::Tile;

/// Owns the full 2D tile grid and answers every spatial query over it.
///
/// Slots start empty; tiles are inserted one by one and neighbor links are
/// wired incrementally as adjacent tiles appear.
#[derive(Debug, Default)]
pub struct TileContainer {
    map_size_x: i32,
    map_size_y: i32,
    tiles: Vec<Option<Tile>>,
    tile_distance: TileDistanceCache,
}

impl TileContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_size_x(&self) -> i32 {
        self.map_size_x
    }

    pub fn map_size_y(&self) -> i32 {
        self.map_size_y
    }

    pub fn num_tiles(&self) -> usize {
        (self.map_size_x * self.map_size_y) as usize
    }

    /// Allocate a `size_x` by `size_y` grid of empty slots, freeing any
    /// previous grid. Fails on non-positive dimensions.
    pub fn allocate_map_memory(&mut self, size_x: i32, size_y: i32) -> bool {
        if size_x <= 0 || size_y <= 0 {
            error!(size_x, size_y, "invalid map size, couldn't allocate map memory");
            return false;
        }

        self.map_size_x = size_x;
        self.map_size_y = size_y;
        self.tiles = vec![None; (size_x * size_y) as usize];
        true
    }

    fn slot_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.map_size_x && y < self.map_size_y {
            Some((x * self.map_size_y + y) as usize)
        } else {
            None
        }
    }

    /// Insert a tile at its own coordinates, replacing any prior occupant.
    /// Does NOT link neighbors; call [`set_tile_neighbors`] afterwards.
    ///
    /// [`set_tile_neighbors`]: TileContainer::set_tile_neighbors
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        match self.slot_index(tile.x, tile.y) {
            Some(index) => {
                self.tiles[index] = Some(tile);
                true
            }
            None => false,
        }
    }

    /// Link the tile at `(x, y)` with its west and south neighbors, both
    /// ways. Only these two directions are wired here: the remaining links
    /// are established when the other neighboring tiles are added and call
    /// this same function, so the completed grid is independent of insertion
    /// order.
    pub fn set_tile_neighbors(&mut self, x: i32, y: i32) {
        for (nx, ny) in [(x - 1, y), (x, y - 1)] {
            if self.get_tile(nx, ny).is_none() || self.get_tile(x, y).is_none() {
                continue;
            }
            if let Some(index) = self.slot_index(nx, ny) {
                if let Some(neighbor) = self.tiles[index].as_mut() {
                    neighbor.add_neighbor((x, y));
                }
            }
            if let Some(index) = self.slot_index(x, y) {
                if let Some(tile) = self.tiles[index].as_mut() {
                    tile.add_neighbor((nx, ny));
                }
            }
        }
    }

    /// Bounds-checked lookup. `None` is the designated "no tile" signal for
    /// out-of-range coordinates and unallocated grids.
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        let index = self.slot_index(x, y)?;
        self.tiles[index].as_ref()
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let index = self.slot_index(x, y)?;
        self.tiles[index].as_mut()
    }

    /// All existing tiles in the axis-aligned box, inclusive. Reversed
    /// coordinates are swapped; missing tiles are skipped silently.
    pub fn rectangular_region(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<&Tile> {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };

        let mut tiles = Vec::new();
        for x in x1..=x2 {
            for y in y1..=y2 {
                if let Some(tile) = self.get_tile(x, y) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// Extend the cached distance table up to `distance`. Idempotent and
    /// monotonic; see [`TileDistance`](super::TileDistance).
    pub fn build_tile_distance(&mut self, distance: u32) {
        self.tile_distance.build(distance);
    }

    /// All existing tiles within Euclidean `radius` of `(x, y)`, using
    /// `dist_squared <= radius * radius` as the inclusion test. Tiles come
    /// out in non-decreasing distance order; visibility relies on that.
    pub fn circular_region(&mut self, x: i32, y: i32, radius: f64) -> Vec<&Tile> {
        let radius = radius.max(0.0);
        self.tile_distance.build(radius.ceil() as u32 + 1);
        let radius_squared = radius * radius;

        let mut tiles = Vec::new();
        for td in self.tile_distance.entries() {
            if f64::from(td.dist_squared()) > radius_squared {
                break;
            }
            for (dx, dy) in td.offsets() {
                if let Some(tile) = self.get_tile(x + dx, y + dy) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// Bresenham line rasterization from `(x1, y1)` to `(x2, y2)`, inclusive
    /// of the destination tile. Truncates the moment it steps onto a missing
    /// tile.
    pub fn tiles_between(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<&Tile> {
        let mut path = Vec::new();

        if x2 == x1 {
            // Vertical line, no need to compute
            let diff_y = if y1 > y2 { -1 } else { 1 };
            let mut y = y1;
            while y != y2 {
                match self.get_tile(x1, y) {
                    Some(tile) => path.push(tile),
                    None => break,
                }
                y += diff_y;
            }
        } else if (x2 - x1).abs() >= (y2 - y1).abs() {
            let delta_err = ((y2 - y1) as f64 / (x2 - x1) as f64).abs();
            let diff_x = if x1 > x2 { -1 } else { 1 };
            let diff_y = if y1 > y2 { -1 } else { 1 };

            let mut error = 0.0;
            let mut y = y1;
            let mut x = x1;
            while x != x2 {
                match self.get_tile(x, y) {
                    Some(tile) => path.push(tile),
                    None => break,
                }
                error += delta_err;
                if error >= 0.5 {
                    y += diff_y;
                    error -= 1.0;
                }
                x += diff_x;
            }
        } else {
            // Steep line: drive along y instead so every step lands on a
            // distinct row.
            let delta_err = ((x2 - x1) as f64 / (y2 - y1) as f64).abs();
            let diff_x = if x1 > x2 { -1 } else { 1 };
            let diff_y = if y1 > y2 { -1 } else { 1 };

            let mut error = 0.0;
            let mut x = x1;
            let mut y = y1;
            while y != y2 {
                match self.get_tile(x, y) {
                    Some(tile) => path.push(tile),
                    None => break,
                }
                error += delta_err;
                if error >= 0.5 {
                    x += diff_x;
                    error -= 1.0;
                }
                y += diff_y;
            }
        }

        // The destination tile is always included when it exists.
        if let Some(tile) = self.get_tile(x2, y2) {
            path.push(tile);
        }

        path
    }
}
