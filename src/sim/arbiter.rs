//! Collision arbiter
//!
//! Owns the session's occupancy grid, composes the per-tick verdict and keeps
//! the grid in step with the creature's cells.

use std::collections::HashSet;

use glam::{IVec2, Vec2};
use rand::Rng;

use super::collision::CollisionResult;
use super::grid::{CellState, OccupancyGrid};
use super::query;
use super::state::Segment;
use crate::settings::GridSettings;
use crate::to_cell;

/// Per-session collision authority
#[derive(Debug, Clone)]
pub struct CollisionArbiter {
    grid: OccupancyGrid,
    cell_size: f32,
    /// In-bounds cells written as `SnakeBody` by the last maintenance pass
    snake_cells: HashSet<IVec2>,
    /// Scratch set reused between passes
    next_cells: HashSet<IVec2>,
}

impl CollisionArbiter {
    pub fn new(settings: &GridSettings) -> Self {
        Self {
            grid: OccupancyGrid::new(settings.width, settings.height),
            cell_size: settings.cell_size,
            snake_cells: HashSet::new(),
            next_cells: HashSet::new(),
        }
    }

    /// Field size in cells
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// Presentation cell size, echoed back for renderers and input mapping
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Read-only view of the occupancy grid
    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Cells written as snake body by the last `update_snake_grid`
    pub fn snake_cells(&self) -> &HashSet<IVec2> {
        &self.snake_cells
    }

    pub fn check_boundary(&self, head: Vec2) -> CollisionResult {
        let (width, height) = self.dimensions();
        query::boundary_collision(head, width, height)
    }

    pub fn check_self(&self, head: Vec2, segments: &[Segment]) -> CollisionResult {
        query::self_collision(head, segments)
    }

    pub fn check_continuous(
        &self,
        head: Vec2,
        segments: &[Segment],
        previous_head: Vec2,
    ) -> CollisionResult {
        query::continuous_collision(head, segments, previous_head)
    }

    pub fn check_food(&self, head: Vec2, food: &[Vec2]) -> CollisionResult {
        query::food_collision(head, food)
    }

    pub fn check_obstacles(&self, head: Vec2, obstacles: &[Vec2]) -> CollisionResult {
        query::obstacle_collision(head, obstacles)
    }

    /// The default per-tick verdict: boundary first, then self collision.
    ///
    /// A boundary hit returns immediately; an off-grid head is never judged
    /// against the body. Food, obstacle and swept checks are left to the driver.
    pub fn perform_optimized_collision_check(
        &self,
        head: Vec2,
        segments: &[Segment],
    ) -> CollisionResult {
        let boundary = self.check_boundary(head);
        if boundary.is_hit() {
            return boundary;
        }

        let body = self.check_self(head, segments);
        if body.is_hit() {
            return body;
        }

        CollisionResult::miss()
    }

    /// Sync the grid with the creature's current cells.
    ///
    /// Clears cells the creature left since the previous call and marks the
    /// head and every segment as `SnakeBody`. Work is proportional to body
    /// length. Food or obstacles under the creature are overwritten; off-grid
    /// cells are skipped.
    pub fn update_snake_grid(&mut self, head: Vec2, segments: &[Segment]) {
        let mut current = std::mem::take(&mut self.next_cells);
        current.clear();
        current.extend(
            std::iter::once(head)
                .chain(segments.iter().map(|s| s.pos))
                .filter(|p| p.is_finite())
                .map(to_cell)
                .filter(|c| self.grid.in_bounds(c.x, c.y)),
        );

        for cell in self.snake_cells.difference(&current) {
            if self.grid.cell(cell.x, cell.y) == Some(CellState::SnakeBody) {
                self.grid.clear(cell.x, cell.y);
            }
        }

        for cell in &current {
            match self.grid.cell(cell.x, cell.y) {
                Some(CellState::SnakeBody) | None => {}
                Some(CellState::Empty) => {
                    self.grid.mark(cell.x, cell.y, CellState::SnakeBody);
                }
                Some(other) => {
                    log::debug!("snake covers {:?} at {}, overwriting", other, cell);
                    self.grid.overwrite(cell.x, cell.y, CellState::SnakeBody);
                }
            }
        }

        self.next_cells = std::mem::replace(&mut self.snake_cells, current);
    }

    /// Claim a cell for food or an obstacle. Snake cells are only written by
    /// `update_snake_grid`, so `SnakeBody` is refused.
    pub fn claim(&mut self, x: i32, y: i32, kind: CellState) -> bool {
        if kind == CellState::SnakeBody {
            return false;
        }
        self.grid.mark(x, y, kind)
    }

    /// Release a food or obstacle cell. Snake cells are left alone.
    pub fn release(&mut self, x: i32, y: i32) {
        if self.grid.cell(x, y) != Some(CellState::SnakeBody) {
            self.grid.clear(x, y);
        }
    }

    pub fn empty_positions(&self) -> Vec<IVec2> {
        self.grid.empty_positions()
    }

    pub fn random_empty_position<R: Rng>(&self, rng: &mut R) -> Option<IVec2> {
        self.grid.random_empty_position(rng)
    }

    /// Forget everything (new round)
    pub fn reset(&mut self) {
        self.grid.reset();
        self.snake_cells.clear();
        log::debug!("collision grid reset");
    }
}
