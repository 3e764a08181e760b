//! Collision predicates for the climb
//!
//! Two tests matter here: a swept landing check comparing the player's
//! bottom edge across consecutive frames against a platform top (a fast fall
//! must not tunnel through a 14-unit slab), and a circle-vs-box test for
//! projectiles against the player.

use glam::Vec2;

/// Swept crossing of a horizontal surface: the bottom edge was at or above
/// the surface last frame and is at or below it now.
#[inline]
pub fn sweeps_across(prev_bottom: f32, bottom: f32, surface_y: f32) -> bool {
    prev_bottom <= surface_y && bottom >= surface_y
}

/// Horizontal overlap between two spans (touching edges do not count)
#[inline]
pub fn spans_overlap(a_start: f32, a_end: f32, b_start: f32, b_end: f32) -> bool {
    a_end > b_start && a_start < b_end
}

/// Circle-vs-axis-aligned-box test.
///
/// Clamps the circle center into the box to find the nearest point, then
/// compares squared distance against the squared radius. Touching counts
/// as a hit.
pub fn circle_hits_rect(center: Vec2, radius: f32, rect_min: Vec2, rect_max: Vec2) -> bool {
    let nearest = center.clamp(rect_min, rect_max);
    center.distance_squared(nearest) <= radius * radius
}
