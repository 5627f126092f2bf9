//! Collision simulation module
//!
//! Everything here is synchronous and single-threaded:
//! - No I/O, no global state (one arbiter per session)
//! - Bad coordinates degrade to "not occupied" / "no collision"
//! - Bounded work per call

pub mod arbiter;
pub mod collision;
pub mod grid;
pub mod query;
pub mod state;
pub mod tick;

pub use arbiter::CollisionArbiter;
pub use collision::{Boundary, CollisionResult};
pub use grid::{CellState, OccupancyGrid};
pub use query::{
    boundary_collision, continuous_collision, food_collision, obstacle_collision,
    requires_sweep, self_collision, sweep_cells,
};
pub use state::{RngState, Segment, segments_from};
pub use tick::{TickInput, TickReport, tick};
