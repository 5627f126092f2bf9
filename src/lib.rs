//! Snake Collide - grid collision engine for a snake arcade game
//!
//! Core modules:
//! - `sim`: Occupancy grid, collision queries and the per-tick arbiter
//! - `settings`: Grid configuration and cell/pixel conversion
//!
//! Rendering, input, audio and scoring live outside this crate. A driver feeds
//! head and segment positions in every tick and acts on the returned verdict.

pub mod settings;
pub mod sim;

pub use settings::{GridSettings, SettingsError};

use glam::{IVec2, Vec2};

/// Engine constants (all distances are in grid-cell units, never pixels)
pub mod consts {
    /// Default play field size in cells
    pub const DEFAULT_GRID_WIDTH: u32 = 50;
    pub const DEFAULT_GRID_HEIGHT: u32 = 35;
    /// Default presentation size of one cell (pixels); not used by collision math
    pub const DEFAULT_CELL_SIZE: f32 = 20.0;

    /// Body segments nearest the head that are skipped by the self-collision test.
    ///
    /// A body cannot fold back onto its first few links within a single tick, so
    /// these segments are kinematically unreachable from the head. Testing them
    /// would only report the neck touching the head after interpolation jitter.
    pub const SELF_COLLISION_SAFE_SEGMENTS: usize = 5;

    /// Head-to-segment distance below which the self-collision test reports a hit.
    ///
    /// Half a cell: interpolated positions drift by a fraction of a cell, while
    /// two distinct cells are always at least one full cell apart.
    pub const SELF_COLLISION_RADIUS: f32 = 0.5;

    /// Upper bound on cells walked by a single swept check
    pub const MAX_SWEEP_CELLS: usize = 4096;
}

/// Squared euclidean distance between two positions
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Cell containing a position (floor, so small negative offsets land off-grid)
#[inline]
pub fn to_cell(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}

/// Chebyshev distance in cells between the cells of two positions
#[inline]
pub fn cell_displacement(from: Vec2, to: Vec2) -> u32 {
    let (a, b) = (to_cell(from), to_cell(to));
    // Far-off positions saturate to the i32 range; abs_diff cannot overflow there
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}
