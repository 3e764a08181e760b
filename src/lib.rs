//! Sky Ascend - an endless vertical-climb platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, platforms, hazards, scroll)
//! - `input`: Polled input snapshot with an edge-triggered jump queue
//! - `persistence`: Best-score storage behind a small trait seam
//!
//! Rendering, DOM glue and HUD text are external collaborators: a host drives
//! `Session::tick` once per animation frame and reads the public state back.

pub mod input;
pub mod persistence;
pub mod sim;

pub use input::InputState;
pub use persistence::{JsonFileStore, MemoryStore, ScoreStore};

/// Game tuning constants
pub mod consts {
    /// Maximum simulated time per tick; frame hitches are clamped to this
    pub const MAX_DT: f32 = 0.05;

    /// Downward acceleration on an airborne player (units/s²)
    pub const GRAVITY: f32 = 1500.0;

    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 52.0;

    /// Horizontal run speed (units/s)
    pub const MOVE_SPEED: f32 = 230.0;
    /// Upward launch speed of a ground jump
    pub const JUMP_STRENGTH: f32 = 760.0;
    /// Upward launch speed of a wall jump
    pub const WALL_JUMP_STRENGTH: f32 = 800.0;
    /// Lateral kick of a wall jump, as a multiple of MOVE_SPEED
    pub const WALL_JUMP_PUSH: f32 = 1.3;
    /// Per-frame geometric decay of residual lateral push
    pub const PUSH_DECAY: f32 = 0.9;

    /// Side wall thickness
    pub const WALL_THICKNESS: f32 = 22.0;

    /// Platform slab height
    pub const PLATFORM_HEIGHT: f32 = 14.0;
    /// Generated platform width: MIN + rand * RANGE
    pub const PLATFORM_MIN_WIDTH: f32 = 55.0;
    pub const PLATFORM_WIDTH_RANGE: f32 = 70.0;
    /// Gap between a platform and the wall face it hugs
    pub const PLATFORM_INNER_MARGIN: f32 = 4.0;
    /// Downward acceleration of a collapsing platform body
    pub const COLLAPSE_GRAVITY: f32 = 1200.0;
    /// Debris pieces spawned when a fragile platform collapses
    pub const FRAGMENT_COUNT: usize = 5;
    /// Height of the vision-obscuring cloud above a smoke platform
    pub const CLOUD_HEIGHT: f32 = 48.0;

    /// Chance a ground jump succeeds on a sticky platform
    pub const STICKY_SUCCESS_CHANCE: f32 = 0.33;
    /// Stuck-shake duration after a failed sticky jump (seconds)
    pub const STICKY_SHAKE_DURATION: f32 = 0.25;

    /// Camera catch-up speed while draining pending shift (units/s)
    pub const SHIFT_SPEED: f32 = 320.0;
    /// Screen-height fraction the player is scrolled back down to
    pub const TARGET_HEIGHT_FRACTION: f32 = 0.62;
    /// Upward distance worth one point of score
    pub const SCORE_UNIT: f32 = 10.0;

    /// Base climb distance between cannon-spawn opportunities
    pub const CANNON_SPACING: f32 = 260.0;
    /// Chance an opportunity actually places a cannon
    pub const CANNON_CHANCE: f32 = 0.3;
    /// Cannon body height along the wall
    pub const CANNON_HEIGHT: f32 = 34.0;

    /// Projectile muzzle speed (units/s)
    pub const PROJECTILE_SPEED: f32 = 320.0;
    pub const PROJECTILE_RADIUS: f32 = 9.0;
    /// Knockback duration after a projectile hit (seconds)
    pub const KNOCKBACK_DURATION: f32 = 0.8;
}
