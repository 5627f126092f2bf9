//! Per-tick collision protocol
//!
//! Runs the arbiter's checks in the order a driver is expected to call them,
//! then commits the move to the occupancy grid.

use glam::Vec2;
use serde::Serialize;

use super::arbiter::CollisionArbiter;
use super::collision::CollisionResult;
use super::query::requires_sweep;
use super::state::Segment;

/// Positions for a single tick, borrowed from the driver
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Head after this tick's move
    pub head: Vec2,
    /// Head before this tick's move (enables the swept check)
    pub previous_head: Option<Vec2>,
    /// Body, head-first
    pub segments: &'a [Segment],
    pub food: &'a [Vec2],
    pub obstacles: &'a [Vec2],
}

/// What happened this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickReport {
    /// Terminal verdict (boundary, self or obstacle), or `Miss`
    pub collision: CollisionResult,
    /// Food eaten this tick, or `Miss`
    pub food: CollisionResult,
}

impl TickReport {
    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.collision.is_fatal()
    }
}

/// Judge one tick and update the grid
pub fn tick(arbiter: &mut CollisionArbiter, input: &TickInput) -> TickReport {
    let mut collision = arbiter.perform_optimized_collision_check(input.head, input.segments);

    if !collision.is_hit()
        && let Some(previous) = input.previous_head
        && requires_sweep(previous, input.head)
    {
        collision = arbiter.check_continuous(input.head, input.segments, previous);
    }

    if !collision.is_hit() {
        collision = arbiter.check_obstacles(input.head, input.obstacles);
    }

    arbiter.update_snake_grid(input.head, input.segments);

    let food = if collision.is_fatal() {
        CollisionResult::miss()
    } else {
        arbiter.check_food(input.head, input.food)
    };

    if collision.is_hit() {
        log::debug!("tick verdict: {} at {}", collision.as_str(), input.head);
    }

    TickReport { collision, food }
}
