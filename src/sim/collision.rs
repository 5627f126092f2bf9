//! Collision verdicts
//!
//! Every query produces a fresh `CollisionResult`; nothing mutates one in place.

use serde::{Deserialize, Serialize};

/// Which field edge the head crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// x < 0
    Left,
    /// x >= width
    Right,
    /// y < 0
    Top,
    /// y >= height
    Bottom,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionResult {
    /// Nothing hit
    #[default]
    Miss,
    /// Head left the play field
    Boundary { edge: Boundary },
    /// Head hit its own body
    SelfCollision {
        /// Index into the segment sequence (head-first)
        segment_index: usize,
        /// Found by the swept path check rather than the point check
        continuous: bool,
    },
    /// Head is on a food cell
    Food { index: usize },
    /// Head is on an obstacle cell
    Obstacle { index: usize },
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::Miss
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    /// Collisions that end the run (eating food does not)
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Boundary { .. } | Self::SelfCollision { .. } | Self::Obstacle { .. }
        )
    }

    /// Matched body segment, for self collisions
    pub fn segment_index(&self) -> Option<usize> {
        match *self {
            Self::SelfCollision { segment_index, .. } => Some(segment_index),
            _ => None,
        }
    }

    /// Short label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miss => "miss",
            Self::Boundary { .. } => "boundary",
            Self::SelfCollision {
                continuous: true, ..
            } => "self (swept)",
            Self::SelfCollision { .. } => "self",
            Self::Food { .. } => "food",
            Self::Obstacle { .. } => "obstacle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(!CollisionResult::miss().is_hit());
        assert!(!CollisionResult::miss().is_fatal());
        assert!(CollisionResult::Food { index: 0 }.is_hit());
        assert!(!CollisionResult::Food { index: 0 }.is_fatal());
        assert!(CollisionResult::Obstacle { index: 2 }.is_fatal());
        assert!(
            CollisionResult::Boundary {
                edge: Boundary::Top
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_segment_index() {
        let hit = CollisionResult::SelfCollision {
            segment_index: 7,
            continuous: true,
        };
        assert_eq!(hit.segment_index(), Some(7));
        assert_eq!(hit.as_str(), "self (swept)");
        assert_eq!(CollisionResult::Food { index: 7 }.segment_index(), None);
    }
}
