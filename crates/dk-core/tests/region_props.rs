//! Property tests for the spatial queries.

use proptest::prelude::*;

use dk_core::map::{Tile, TileContainer};

fn full_grid(size: i32) -> TileContainer {
    let mut tiles = TileContainer::new();
    assert!(tiles.allocate_map_memory(size, size));
    for x in 0..size {
        for y in 0..size {
            tiles.add_tile(Tile::ground(x, y));
            tiles.set_tile_neighbors(x, y);
        }
    }
    tiles
}

proptest! {
    #[test]
    fn circular_region_stays_in_disk_and_sorted(
        x in 0..9i32,
        y in 0..9i32,
        radius in 0.0..4.0f64,
    ) {
        let mut tiles = full_grid(9);
        let region = tiles.circular_region(x, y, radius);
        let mut last = -1i32;
        for tile in region {
            let d2 = (tile.x - x).pow(2) + (tile.y - y).pow(2);
            prop_assert!(f64::from(d2) <= radius * radius);
            prop_assert!(d2 >= last, "region not in non-decreasing distance order");
            last = d2;
        }
    }

    #[test]
    fn circular_region_is_complete(
        x in 0..9i32,
        y in 0..9i32,
        radius in 0.0..4.0f64,
    ) {
        let mut tiles = full_grid(9);
        let coords: Vec<(i32, i32)> = tiles
            .circular_region(x, y, radius)
            .iter()
            .map(|tile| tile.position())
            .collect();
        for cx in 0..9 {
            for cy in 0..9 {
                let d2 = (cx - x).pow(2) + (cy - y).pow(2);
                if f64::from(d2) <= radius * radius {
                    prop_assert!(coords.contains(&(cx, cy)), "missing {:?}", (cx, cy));
                }
            }
        }
    }

    #[test]
    fn tiles_between_reaches_destination_in_adjacent_steps(
        x1 in 0..10i32,
        y1 in 0..10i32,
        x2 in 0..10i32,
        y2 in 0..10i32,
    ) {
        let tiles = full_grid(10);
        let path = tiles.tiles_between(x1, y1, x2, y2);
        prop_assert!(!path.is_empty());
        prop_assert_eq!(path.last().unwrap().position(), (x2, y2));
        for pair in path.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            prop_assert!(dx <= 1 && dy <= 1, "non-adjacent step");
        }
    }

    #[test]
    fn visible_tiles_are_a_subset_of_candidates(x in 0..9i32, y in 0..9i32) {
        let mut tiles = full_grid(9);
        let candidates: Vec<(i32, i32)> = tiles
            .circular_region(x, y, 3.0)
            .iter()
            .map(|tile| tile.position())
            .collect();
        let visible = tiles.visible_tiles((x, y), &candidates);
        prop_assert!(visible.contains(&(x, y)));
        for position in visible {
            prop_assert!(candidates.contains(&position));
        }
    }

    #[test]
    fn open_grid_hides_nothing(x in 0..9i32, y in 0..9i32) {
        let mut tiles = full_grid(9);
        let candidates: Vec<(i32, i32)> = tiles
            .circular_region(x, y, 3.0)
            .iter()
            .map(|tile| tile.position())
            .collect();
        let visible = tiles.visible_tiles((x, y), &candidates);
        prop_assert_eq!(visible.len(), candidates.len());
    }
}
