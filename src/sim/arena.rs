//! Fixed per-session arena geometry
//!
//! The play field is a vertical column: solid walls on both sides, open at
//! the top, lethal past the bottom. Geometry is fixed for a session's
//! lifetime; every derived bound comes from here so the rest of the
//! simulation never touches a raw canvas size.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Column dimensions in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 800.0,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Leftmost x an entity flush against the left wall can occupy
    #[inline]
    pub fn min_x(&self) -> f32 {
        WALL_THICKNESS
    }

    /// Rightmost x for an entity of the given width
    #[inline]
    pub fn max_x(&self, entity_width: f32) -> f32 {
        self.width - WALL_THICKNESS - entity_width
    }

    /// Screen height a high-landing player is scrolled back down to
    #[inline]
    pub fn target_player_y(&self) -> f32 {
        self.height * TARGET_HEIGHT_FRACTION
    }

    /// Platforms at or below this line are trimmed
    #[inline]
    pub fn platform_cull_y(&self) -> f32 {
        self.height + 80.0
    }

    /// Cannons at or below this line are trimmed
    #[inline]
    pub fn cannon_cull_y(&self) -> f32 {
        self.height + 120.0
    }

    /// Projectiles below this line are trimmed
    #[inline]
    pub fn projectile_cull_y(&self) -> f32 {
        self.height + 80.0
    }

    /// Generation keeps topping the column up until the highest platform
    /// sits above this line
    #[inline]
    pub fn spawn_horizon_y(&self) -> f32 {
        -60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_bounds_leave_room() {
        let arena = Arena::default();
        let max = arena.max_x(PLAYER_WIDTH);
        assert!(arena.min_x() < max);
        // Both walls plus a positive player width cannot overlap, so the two
        // wall contacts are mutually exclusive by construction
        assert!(max - arena.min_x() > 0.0);
    }

    #[test]
    fn test_target_band_is_inside_the_column() {
        let arena = Arena::new(480.0, 800.0);
        let target = arena.target_player_y();
        assert!(target > 0.0 && target < arena.height);
        assert_eq!(target, 800.0 * TARGET_HEIGHT_FRACTION);
    }

    #[test]
    fn test_cull_lines_are_below_the_view() {
        let arena = Arena::default();
        assert!(arena.platform_cull_y() > arena.height);
        assert!(arena.cannon_cull_y() > arena.platform_cull_y());
        assert!(arena.projectile_cull_y() > arena.height);
    }
}
