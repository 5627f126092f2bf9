//! Collision queries
//!
//! Pure geometric predicates over driver-supplied positions. Two comparison
//! strategies live here and stay separate on purpose:
//! - proximity (distance below a radius) for the self test, where head and body
//!   positions carry interpolated fractions
//! - exact cell equality for food, obstacles and the swept path, where
//!   everything is grid aligned

use glam::{IVec2, Vec2};

use super::collision::{Boundary, CollisionResult};
use super::state::Segment;
use crate::consts::*;
use crate::{cell_displacement, distance_squared, to_cell};

/// Check the head against the play field edges.
///
/// Valid range is `[0, width)` x `[0, height)`. Edges are tested left, right,
/// top, bottom so a corner violation always reports the x edge.
pub fn boundary_collision(head: Vec2, width: u32, height: u32) -> CollisionResult {
    let edge = if head.x < 0.0 {
        Boundary::Left
    } else if head.x >= width as f32 {
        Boundary::Right
    } else if head.y < 0.0 {
        Boundary::Top
    } else if head.y >= height as f32 {
        Boundary::Bottom
    } else {
        return CollisionResult::miss();
    };
    CollisionResult::Boundary { edge }
}

/// Check the head against its own body by proximity.
///
/// The first `SELF_COLLISION_SAFE_SEGMENTS` segments are skipped; the first
/// remaining segment closer than `SELF_COLLISION_RADIUS` is reported.
pub fn self_collision(head: Vec2, segments: &[Segment]) -> CollisionResult {
    let radius_sq = SELF_COLLISION_RADIUS * SELF_COLLISION_RADIUS;

    segments
        .iter()
        .enumerate()
        .skip(SELF_COLLISION_SAFE_SEGMENTS)
        .find(|(_, seg)| distance_squared(head, seg.pos) < radius_sq)
        .map_or(CollisionResult::miss(), |(segment_index, _)| {
            CollisionResult::SelfCollision {
                segment_index,
                continuous: false,
            }
        })
}

/// Whether the head moved more than one cell since the previous tick
#[inline]
pub fn requires_sweep(previous_head: Vec2, head: Vec2) -> bool {
    cell_displacement(previous_head, head) > 1
}

/// Cells on the straight path from `from` to `to`.
///
/// The starting cell is excluded (the body's first segment normally sits
/// there) and the destination is included. Uses Bresenham stepping, so a
/// diagonal step does not add the two corner cells. Stops after
/// `MAX_SWEEP_CELLS`; non-finite input yields an empty path.
pub fn sweep_cells(from: Vec2, to: Vec2) -> Vec<IVec2> {
    if !from.is_finite() || !to.is_finite() {
        return Vec::new();
    }

    let start = to_cell(from);
    let end = to_cell(to);
    let (x1, y1) = (end.x as i64, end.y as i64);
    let (mut x, mut y) = (start.x as i64, start.y as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let steps = dx.max(-dy) as usize;
    let mut cells = Vec::with_capacity(steps.min(MAX_SWEEP_CELLS));

    while (x, y) != (x1, y1) && cells.len() < MAX_SWEEP_CELLS {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        cells.push(IVec2::new(x as i32, y as i32));
    }

    if cells.len() == MAX_SWEEP_CELLS && (x, y) != (x1, y1) {
        log::trace!("sweep from {} to {} truncated at {} cells", start, end, MAX_SWEEP_CELLS);
    }
    cells
}

/// Check every cell the head passed through since `previous_head` against the
/// whole body. No safe zone: any segment on the path is a real intersection.
pub fn continuous_collision(
    head: Vec2,
    segments: &[Segment],
    previous_head: Vec2,
) -> CollisionResult {
    if segments.is_empty() {
        return CollisionResult::miss();
    }

    for cell in sweep_cells(previous_head, head) {
        if let Some(segment_index) = segments.iter().position(|seg| to_cell(seg.pos) == cell) {
            return CollisionResult::SelfCollision {
                segment_index,
                continuous: true,
            };
        }
    }
    CollisionResult::miss()
}

/// Index of the first target sharing the head's cell
fn exact_cell_match(head: Vec2, targets: &[Vec2]) -> Option<usize> {
    let cell = to_cell(head);
    targets.iter().position(|&t| to_cell(t) == cell)
}

/// Check the head against food positions (exact cell match)
pub fn food_collision(head: Vec2, food: &[Vec2]) -> CollisionResult {
    exact_cell_match(head, food)
        .map_or(CollisionResult::miss(), |index| CollisionResult::Food { index })
}

/// Check the head against obstacle positions (exact cell match)
pub fn obstacle_collision(head: Vec2, obstacles: &[Vec2]) -> CollisionResult {
    exact_cell_match(head, obstacles)
        .map_or(CollisionResult::miss(), |index| CollisionResult::Obstacle { index })
}
