//! Line-of-sight computation over a candidate tile set.

use std::collections::{BTreeMap, HashMap};

use super::container::TileContainer;

impl TileContainer {
    /// Which of `tiles_within_radius` can be seen from `start`.
    ///
    /// Returns an empty set when the start tile itself blocks vision. Each
    /// candidate is resolved by tracing the ray from `start` with
    /// [`tiles_between`](TileContainer::tiles_between); a tile blocks vision
    /// when it does not permit vision, and a diagonal step additionally
    /// requires at least one of the two corner tiles to permit vision, so
    /// nothing can be seen diagonally through two corner walls. The first
    /// blocking tile is itself visible (the wall can be seen); everything
    /// beyond it on the ray is not.
    ///
    /// Candidates are bucketed by x and traced farthest-first inside each
    /// bucket; a per-query memo lets the nearer candidates reuse the verdicts
    /// already collected along the longer rays.
    pub fn visible_tiles(
        &self,
        start: (i32, i32),
        tiles_within_radius: &[(i32, i32)],
    ) -> Vec<(i32, i32)> {
        let Some(start_tile) = self.get_tile(start.0, start.1) else {
            return Vec::new();
        };
        if !start_tile.permits_vision() {
            return Vec::new();
        }

        let mut memo: HashMap<(i32, i32), bool> = HashMap::new();
        memo.insert(start, true);

        let dist2 = |(x, y): (i32, i32)| (x - start.0).pow(2) + (y - start.1).pow(2);

        let mut buckets: BTreeMap<i32, Vec<(i32, i32)>> = BTreeMap::new();
        for &coord in tiles_within_radius {
            buckets.entry(coord.0).or_default().push(coord);
        }

        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|&coord| std::cmp::Reverse(dist2(coord)));
            for &candidate in bucket.iter() {
                if !memo.contains_key(&candidate) {
                    self.trace_ray(start, candidate, &mut memo);
                }
            }
        }

        tiles_within_radius
            .iter()
            .copied()
            .filter(|coord| memo.get(coord).copied().unwrap_or(false))
            .collect()
    }

    /// Walk one ray and record a verdict for every tile on it. Verdicts from
    /// earlier (longer) rays win; this only fills gaps.
    fn trace_ray(
        &self,
        start: (i32, i32),
        end: (i32, i32),
        memo: &mut HashMap<(i32, i32), bool>,
    ) {
        let path = self.tiles_between(start.0, start.1, end.0, end.1);
        let mut blocked = false;

        for i in 0..path.len() {
            let cur = path[i].position();
            if i == 0 {
                memo.entry(cur).or_insert(true);
                continue;
            }
            if blocked {
                memo.entry(cur).or_insert(false);
                continue;
            }

            let prev = path[i - 1].position();
            let diagonal = prev.0 != cur.0 && prev.1 != cur.1;
            let corner_open = !diagonal
                || self
                    .get_tile(prev.0, cur.1)
                    .is_some_and(|t| t.permits_vision())
                || self
                    .get_tile(cur.0, prev.1)
                    .is_some_and(|t| t.permits_vision());

            if !corner_open {
                // Occluded by the two corner walls; the tile itself is not
                // seen, nor is anything past it.
                memo.entry(cur).or_insert(false);
                blocked = true;
            } else if !path[i].permits_vision() {
                // The wall itself is visible, nothing behind it is.
                memo.entry(cur).or_insert(true);
                blocked = true;
            } else {
                memo.entry(cur).or_insert(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Tile;

    fn corridor() -> TileContainer {
        // 7x1 corridor with a wall at x == 3.
        let mut tiles = TileContainer::new();
        tiles.allocate_map_memory(7, 1);
        for x in 0..7 {
            let tile = if x == 3 {
                Tile::wall(x, 0)
            } else {
                Tile::ground(x, 0)
            };
            tiles.add_tile(tile);
            tiles.set_tile_neighbors(x, 0);
        }
        tiles
    }

    fn open_grid(size: i32) -> TileContainer {
        let mut tiles = TileContainer::new();
        tiles.allocate_map_memory(size, size);
        for x in 0..size {
            for y in 0..size {
                tiles.add_tile(Tile::ground(x, y));
                tiles.set_tile_neighbors(x, y);
            }
        }
        tiles
    }

    #[test]
    fn test_corridor_occlusion() {
        let tiles = corridor();
        let candidates: Vec<(i32, i32)> = (0..7).map(|x| (x, 0)).collect();
        let visible = tiles.visible_tiles((0, 0), &candidates);

        // Tiles before the wall stay visible, the wall itself is visible,
        // everything strictly beyond it is not.
        for x in 0..=3 {
            assert!(visible.contains(&(x, 0)), "tile {} should be seen", x);
        }
        for x in 4..7 {
            assert!(!visible.contains(&(x, 0)), "tile {} should be hidden", x);
        }
    }

    #[test]
    fn test_blind_start_tile_sees_nothing() {
        let mut tiles = corridor();
        tiles.add_tile(Tile::wall(0, 0));
        let visible = tiles.visible_tiles((0, 0), &[(1, 0), (2, 0)]);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_open_grid_fully_visible() {
        let mut tiles = open_grid(5);
        let candidates: Vec<(i32, i32)> = tiles
            .circular_region(2, 2, 2.0)
            .iter()
            .map(|t| t.position())
            .collect();
        let visible = tiles.visible_tiles((2, 2), &candidates);
        assert_eq!(visible.len(), candidates.len());
    }

    #[test]
    fn test_no_vision_through_corner_walls() {
        // Two walls forming a corner between (0,0) and (1,1): the diagonal
        // tile must be hidden even though it is open ground.
        let mut tiles = open_grid(3);
        tiles.add_tile(Tile::wall(0, 1));
        tiles.add_tile(Tile::wall(1, 0));
        let visible = tiles.visible_tiles((0, 0), &[(1, 1)]);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_vision_through_one_open_corner() {
        let mut tiles = open_grid(3);
        tiles.add_tile(Tile::wall(0, 1));
        let visible = tiles.visible_tiles((0, 0), &[(1, 1)]);
        assert_eq!(visible, vec![(1, 1)]);
    }
}
