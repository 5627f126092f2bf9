//! Occupancy grid
//!
//! Fixed-size table of cell states over the play field. Every lookup is O(1);
//! out-of-bounds coordinates answer "not occupied" instead of failing, because
//! a head that has just left the field is an ordinary input.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a cell currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Food,
    Obstacle,
    SnakeBody,
}

impl CellState {
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == CellState::Empty
    }
}

/// Occupancy table for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    /// Row-major, index = y * width + x
    cells: Vec<CellState>,
    occupied: usize,
    revision: u64,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Empty; width as usize * height as usize],
            occupied: 0,
            revision: 0,
        }
    }

    /// Field size in cells
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Whether a cell holds anything. Out of bounds is never occupied.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| !c.is_empty())
    }

    /// State of a cell, or `None` when out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Claim an empty in-bounds cell for `kind`.
    ///
    /// Returns false (and changes nothing) when the cell is out of bounds,
    /// already occupied, or `kind` is `Empty`.
    pub fn mark(&mut self, x: i32, y: i32, kind: CellState) -> bool {
        if kind.is_empty() {
            return false;
        }
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if !self.cells[i].is_empty() {
            return false;
        }
        self.cells[i] = kind;
        self.occupied += 1;
        self.revision += 1;
        true
    }

    /// Empty a cell. No-op when out of bounds or already empty.
    pub fn clear(&mut self, x: i32, y: i32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i].is_empty() {
            return;
        }
        self.cells[i] = CellState::Empty;
        self.occupied -= 1;
        self.revision += 1;
    }

    /// Replace an occupied cell's state regardless of what it held.
    /// Only grid maintenance needs this; everything else claims via `mark`.
    pub(crate) fn overwrite(&mut self, x: i32, y: i32, kind: CellState) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let old = self.cells[i];
        if old == kind {
            return;
        }
        match (old.is_empty(), kind.is_empty()) {
            (true, false) => self.occupied += 1,
            (false, true) => self.occupied -= 1,
            _ => {}
        }
        self.cells[i] = kind;
        self.revision += 1;
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
        self.occupied = 0;
        self.revision += 1;
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.occupied
    }

    /// Bumped on every successful mutation
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position_of(&self, index: usize) -> IVec2 {
        let w = self.width as usize;
        IVec2::new((index % w) as i32, (index / w) as i32)
    }

    /// Every empty cell, row-major. O(width * height); meant for spawning only.
    pub fn empty_positions(&self) -> Vec<IVec2> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| self.position_of(i))
            .collect()
    }

    /// Uniformly chosen empty cell, or `None` when the field is full
    pub fn random_empty_position<R: Rng>(&self, rng: &mut R) -> Option<IVec2> {
        let empty = self.empty_count();
        if empty == 0 {
            return None;
        }
        let nth = rng.random_range(0..empty);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .nth(nth)
            .map(|(i, _)| self.position_of(i))
    }

    /// Cells currently holding `kind`
    pub fn positions_of(&self, kind: CellState) -> impl Iterator<Item = IVec2> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == kind)
            .map(move |(i, _)| self.position_of(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;
    use proptest::prelude::*;

    #[test]
    fn test_dimensions() {
        let grid = OccupancyGrid::new(50, 35);
        assert_eq!(grid.dimensions(), (50, 35));
        assert_eq!(grid.empty_count(), 50 * 35);
    }

    #[test]
    fn test_out_of_bounds_reads_are_negative() {
        let grid = OccupancyGrid::new(10, 8);
        assert!(!grid.is_occupied(-1, 0));
        assert!(!grid.is_occupied(0, -1));
        assert!(!grid.is_occupied(10, 0));
        assert!(!grid.is_occupied(0, 8));
        assert_eq!(grid.cell(10, 3), None);
        assert_eq!(grid.cell(9, 7), Some(CellState::Empty));
    }

    #[test]
    fn test_mark_twice_fails_and_keeps_first_kind() {
        let mut grid = OccupancyGrid::new(10, 10);
        assert!(grid.mark(3, 4, CellState::Food));
        assert!(!grid.mark(3, 4, CellState::Obstacle));
        assert!(!grid.mark(3, 4, CellState::Food));
        assert_eq!(grid.cell(3, 4), Some(CellState::Food));

        grid.clear(3, 4);
        assert!(grid.mark(3, 4, CellState::Obstacle));
        assert_eq!(grid.cell(3, 4), Some(CellState::Obstacle));
    }

    #[test]
    fn test_mark_rejects_out_of_bounds_and_empty_kind() {
        let mut grid = OccupancyGrid::new(5, 5);
        let rev = grid.revision();
        assert!(!grid.mark(-1, 2, CellState::Food));
        assert!(!grid.mark(5, 2, CellState::Food));
        assert!(!grid.mark(2, 2, CellState::Empty));
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.revision(), rev);
    }

    #[test]
    fn test_mark_clear_round_trip() {
        let mut grid = OccupancyGrid::new(5, 5);
        assert!(grid.mark(1, 1, CellState::SnakeBody));
        grid.clear(1, 1);
        assert!(!grid.is_occupied(1, 1));
        // Clearing again or out of bounds is a no-op
        grid.clear(1, 1);
        grid.clear(-3, 9);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_empty_positions_excludes_marked() {
        let mut grid = OccupancyGrid::new(3, 2);
        grid.mark(0, 0, CellState::Food);
        grid.mark(2, 1, CellState::Obstacle);
        let empty = grid.empty_positions();
        assert_eq!(empty.len(), 4);
        assert!(!empty.contains(&IVec2::new(0, 0)));
        assert!(!empty.contains(&IVec2::new(2, 1)));
        assert!(empty.contains(&IVec2::new(1, 1)));
    }

    #[test]
    fn test_random_empty_position_full_grid() {
        let mut grid = OccupancyGrid::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                assert!(grid.mark(x, y, CellState::Obstacle));
            }
        }
        let mut rng = RngState::new(7).to_rng();
        assert_eq!(grid.random_empty_position(&mut rng), None);
        assert!(grid.empty_positions().is_empty());
    }

    #[test]
    fn test_random_empty_position_finds_last_hole() {
        let mut grid = OccupancyGrid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                if (x, y) != (2, 3) {
                    grid.mark(x, y, CellState::SnakeBody);
                }
            }
        }
        let mut rng = RngState::new(99).to_rng();
        for _ in 0..10 {
            assert_eq!(grid.random_empty_position(&mut rng), Some(IVec2::new(2, 3)));
        }
    }

    #[test]
    fn test_random_empty_position_covers_field() {
        let grid = OccupancyGrid::new(3, 3);
        let mut rng = RngState::new(1).to_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            if let Some(p) = grid.random_empty_position(&mut rng) {
                seen.insert(p);
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_overwrite_tracks_counts() {
        let mut grid = OccupancyGrid::new(4, 4);
        grid.mark(1, 1, CellState::Food);
        grid.overwrite(1, 1, CellState::SnakeBody);
        assert_eq!(grid.cell(1, 1), Some(CellState::SnakeBody));
        assert_eq!(grid.occupied_count(), 1);
        grid.overwrite(2, 2, CellState::SnakeBody);
        assert_eq!(grid.occupied_count(), 2);
        grid.overwrite(2, 2, CellState::Empty);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_reset_and_positions_of() {
        let mut grid = OccupancyGrid::new(4, 4);
        grid.mark(0, 1, CellState::Food);
        grid.mark(3, 3, CellState::Food);
        grid.mark(2, 0, CellState::Obstacle);
        let food: Vec<_> = grid.positions_of(CellState::Food).collect();
        assert_eq!(food, vec![IVec2::new(0, 1), IVec2::new(3, 3)]);

        grid.reset();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.empty_positions().len(), 16);
    }

    proptest! {
        #[test]
        fn proptest_empty_count_matches_marks(
            ops in proptest::collection::vec((-2i32..12, -2i32..10, any::<bool>()), 0..200)
        ) {
            let mut grid = OccupancyGrid::new(10, 8);
            let mut marked = std::collections::HashSet::new();
            for (x, y, mark) in ops {
                if mark {
                    if grid.mark(x, y, CellState::Food) {
                        prop_assert!(marked.insert((x, y)));
                    }
                } else {
                    grid.clear(x, y);
                    marked.remove(&(x, y));
                }
                prop_assert_eq!(grid.empty_positions().len(), 10 * 8 - marked.len());
                prop_assert_eq!(grid.occupied_count(), marked.len());
            }
        }
    }
}
