//! Incremental distance-offset table for circular tile queries.
//!
//! Offsets are stored for one eighth of the disk only (`diff_y <= diff_x`);
//! the remaining positions are produced by symmetry when a query expands an
//! entry. The table is extended monotonically and kept sorted ascending by
//! squared distance so radius queries can stop at the first entry past the
//! radius and emit tiles closest-first.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Symmetry class of a wedge offset.
///
/// Horizontal offsets (`diff_y == 0`) collapse two of the eight octant
/// reflections, so they only ever expand 4-fold, never 8-fold. Changing this
/// casing would silently change the tile count per distance class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TileDistanceKind {
    Horizontal,
    Diagonal,
    Other,
}

/// One equivalence class of offsets at a given squared distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDistance {
    diff_x: i32,
    diff_y: i32,
    kind: TileDistanceKind,
    dist_squared: i32,
}

impl TileDistance {
    pub fn diff_x(&self) -> i32 {
        self.diff_x
    }

    pub fn diff_y(&self) -> i32 {
        self.diff_y
    }

    pub fn kind(&self) -> TileDistanceKind {
        self.kind
    }

    pub fn dist_squared(&self) -> i32 {
        self.dist_squared
    }

    /// All grid offsets represented by this entry: 1 for the origin, 4 for
    /// horizontal or diagonal offsets, 8 otherwise.
    pub fn offsets(&self) -> Vec<(i32, i32)> {
        let (dx, dy) = (self.diff_x, self.diff_y);
        match self.kind {
            TileDistanceKind::Horizontal if dx == 0 => vec![(0, 0)],
            TileDistanceKind::Horizontal => vec![(dx, 0), (-dx, 0), (0, dx), (0, -dx)],
            TileDistanceKind::Diagonal => vec![(dx, dx), (dx, -dx), (-dx, dx), (-dx, -dx)],
            TileDistanceKind::Other => vec![
                (dx, dy),
                (dx, -dy),
                (-dx, dy),
                (-dx, -dy),
                (dy, dx),
                (dy, -dx),
                (-dy, dx),
                (-dy, -dx),
            ],
        }
    }
}

/// Lazily extended wedge-offset table.
#[derive(Debug, Clone, Default)]
pub(crate) struct TileDistanceCache {
    computed: u32,
    entries: Vec<TileDistance>,
}

impl TileDistanceCache {
    /// Extend the table so it covers every offset with `diff_x < distance`.
    /// Idempotent: a no-op when the table already reaches that far.
    pub fn build(&mut self, distance: u32) {
        if distance <= self.computed {
            return;
        }

        for x in self.computed..distance {
            let x = x as i32;
            for y in 0..=x {
                let kind = if y == 0 {
                    TileDistanceKind::Horizontal
                } else if y == x {
                    TileDistanceKind::Diagonal
                } else {
                    TileDistanceKind::Other
                };
                self.entries.push(TileDistance {
                    diff_x: x,
                    diff_y: y,
                    kind,
                    dist_squared: x * x + y * y,
                });
            }
        }
        self.computed = distance;
        // Extension is rare relative to query volume, so a full re-sort is
        // acceptable here.
        self.entries.sort_by_key(|td| td.dist_squared);
    }

    pub fn entries(&self) -> &[TileDistance] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_monotonic_and_sorted() {
        let mut cache = TileDistanceCache::default();
        cache.build(3);
        let small: Vec<TileDistance> = cache.entries().to_vec();
        cache.build(6);
        let large = cache.entries();

        for td in &small {
            assert!(large.contains(td));
        }
        for pair in large.windows(2) {
            assert!(pair[0].dist_squared() <= pair[1].dist_squared());
        }
    }

    #[test]
    fn test_build_smaller_is_noop() {
        let mut cache = TileDistanceCache::default();
        cache.build(4);
        let before = cache.entries().len();
        cache.build(2);
        assert_eq!(cache.entries().len(), before);
    }

    #[test]
    fn test_origin_is_horizontal_and_emits_once() {
        let mut cache = TileDistanceCache::default();
        cache.build(1);
        let origin = cache.entries()[0];
        assert_eq!(origin.dist_squared(), 0);
        assert_eq!(origin.kind(), TileDistanceKind::Horizontal);
        assert_eq!(origin.offsets(), vec![(0, 0)]);
    }

    #[test]
    fn test_symmetry_counts() {
        let mut cache = TileDistanceCache::default();
        cache.build(4);
        for td in cache.entries() {
            let n = td.offsets().len();
            match td.kind() {
                TileDistanceKind::Horizontal if td.diff_x() == 0 => assert_eq!(n, 1),
                TileDistanceKind::Horizontal | TileDistanceKind::Diagonal => assert_eq!(n, 4),
                TileDistanceKind::Other => assert_eq!(n, 8),
            }
        }
    }

    #[test]
    fn test_offsets_cover_full_disk() {
        // Expanding every entry must reproduce each offset of the square
        // exactly once.
        let mut cache = TileDistanceCache::default();
        cache.build(3);
        let mut seen = std::collections::HashSet::new();
        for td in cache.entries() {
            for offset in td.offsets() {
                assert!(seen.insert(offset), "duplicate offset {:?}", offset);
            }
        }
        for dx in -2i32..=2 {
            for dy in -2i32..=2 {
                assert!(seen.contains(&(dx, dy)), "missing offset {:?}", (dx, dy));
            }
        }
    }
}
