//! Simulation state and core entity types
//!
//! Everything a renderer needs to draw a frame lives here as plain data;
//! entity behavior that does not need the whole session (collapse physics,
//! cannon fuses, projectile flight) lives on the entities themselves.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::consts::*;
use crate::persistence::ScoreStore;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Fresh session, nothing simulated yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; frozen until an external restart
    Over,
}

/// Which wall a cannon hangs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal fire direction, aimed at the opposite wall
    #[inline]
    pub fn direction(&self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Platform variant, with per-variant data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Plain solid surface
    Basic,
    /// Cracks on the first jump, collapses on the second
    Fragile { damage: u8, crack_progress: f32 },
    /// Ground jumps only succeed a third of the time
    Sticky,
    /// Carries an obscuring cloud above its body; otherwise behaves as basic
    Smoke { cloud_phase: f32 },
}

impl PlatformKind {
    pub fn fragile() -> Self {
        PlatformKind::Fragile {
            damage: 0,
            crack_progress: 0.0,
        }
    }
}

/// Debris from a collapsing platform. Presentation payload with its own tiny
/// physics; it never collides with anything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fragment {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub spin: f32,
}

/// A platform slab between the walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    /// Terminal flag; set once the collapsed body leaves the view
    pub destroyed: bool,
    pub collidable: bool,
    /// Mid-collapse. Never cleared once set.
    pub falling: bool,
    pub fall_velocity: f32,
    /// Owned only while falling
    pub fragments: Vec<Fragment>,
}

impl Platform {
    pub fn new(id: u32, x: f32, y: f32, width: f32, kind: PlatformKind) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            width,
            height: PLATFORM_HEIGHT,
            kind,
            destroyed: false,
            collidable: true,
            falling: false,
            fall_velocity: 0.0,
            fragments: Vec::new(),
        }
    }

    /// A platform supports the player iff it is collidable, not destroyed
    /// and not mid-collapse
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.collidable && !self.destroyed && !self.falling
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Record a qualifying jump launched from this platform. Only fragile
    /// platforms take damage; the second jump begins the collapse.
    pub fn register_jump(&mut self, rng: &mut impl Rng) {
        if !self.is_solid() {
            return;
        }
        let collapse = match &mut self.kind {
            PlatformKind::Fragile { damage, .. } => {
                *damage += 1;
                *damage >= 2
            }
            _ => return,
        };
        if collapse {
            self.begin_collapse(rng);
        }
    }

    /// Irreversibly drop out of the level: no longer solid, body and debris
    /// fall until they leave the view
    pub fn begin_collapse(&mut self, rng: &mut impl Rng) {
        if self.falling {
            return;
        }
        self.collidable = false;
        self.falling = true;
        self.fragments = (0..FRAGMENT_COUNT)
            .map(|_| Fragment {
                pos: Vec2::new(
                    self.pos.x + rng.random::<f32>() * self.width,
                    self.pos.y + rng.random::<f32>() * self.height,
                ),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 120.0,
                    -80.0 - rng.random::<f32>() * 60.0,
                ),
                rotation: rng.random::<f32>() * std::f32::consts::TAU,
                spin: (rng.random::<f32>() - 0.5) * 5.0,
            })
            .collect();
        log::debug!("Platform {} collapsing", self.id);
    }

    /// Advance crack animation and collapse physics
    pub fn update(&mut self, dt: f32, arena_height: f32, rng: &mut impl Rng) {
        if let PlatformKind::Fragile {
            damage,
            crack_progress,
        } = &mut self.kind
            && *damage > 0
            && !self.falling
        {
            *crack_progress = (*crack_progress + dt * 2.0).min(1.0);
        }

        if self.falling {
            self.fall_velocity += COLLAPSE_GRAVITY * dt;
            self.pos.y += self.fall_velocity * dt;
            for fragment in &mut self.fragments {
                fragment.pos.x += fragment.vel.x * dt;
                fragment.pos.y += (self.fall_velocity + fragment.vel.y) * dt;
                fragment.spin += (rng.random::<f32>() - 0.5) * 2.0 * dt;
                fragment.rotation += fragment.spin * dt;
                fragment.vel.y += 200.0 * dt;
            }
            if self.pos.y > arena_height + 100.0 {
                self.destroyed = true;
            }
        }
    }

    /// Vertical extent of the obscuring cloud, for smoke platforms only
    pub fn cloud_zone(&self) -> Option<(f32, f32)> {
        match self.kind {
            PlatformKind::Smoke { .. } => {
                Some((self.pos.y - CLOUD_HEIGHT - 6.0, self.pos.y + 2.0))
            }
            _ => None,
        }
    }
}

/// The climbing player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Top y at the start of the current tick, for the swept landing test
    pub prev_y: f32,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Decaying lateral impulse from wall jumps and projectile hits
    pub extra_push: f32,
    pub on_ground: bool,
    pub touching_left_wall: bool,
    pub touching_right_wall: bool,
    /// Id of the supporting platform; cleared in the same pass that removes
    /// the platform, never stale across a frame
    pub ground_platform: Option<u32>,
    /// Jump-strength multiplier from the surface being stood on
    pub sticky_factor: f32,
    /// Stuck-shake countdown after a failed sticky jump
    pub shake_timer: f32,
    /// While positive, jumping and landing are suppressed
    pub knock_timer: f32,
    /// Standing inside a smoke cloud this frame
    pub in_smoke: bool,
}

impl Player {
    /// Spawn with feet centered on (`center_x`, `bottom_y`)
    pub fn new(center_x: f32, bottom_y: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - PLAYER_WIDTH / 2.0, bottom_y - PLAYER_HEIGHT),
            prev_y: bottom_y - PLAYER_HEIGHT,
            vel: Vec2::ZERO,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            extra_push: 0.0,
            on_ground: false,
            touching_left_wall: false,
            touching_right_wall: false,
            ground_platform: None,
            sticky_factor: 1.0,
            shake_timer: 0.0,
            knock_timer: 0.0,
            in_smoke: false,
        }
    }

    /// Launch speed of a ground jump from the current surface
    #[inline]
    pub fn ground_jump_force(&self) -> f32 {
        JUMP_STRENGTH * self.sticky_factor
    }

    /// Forget whatever surface the player was standing on
    pub fn clear_surface_effects(&mut self) {
        self.sticky_factor = 1.0;
        self.shake_timer = 0.0;
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Bounding box as (min, max) corners
    pub fn rect(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + Vec2::new(self.width, self.height))
    }
}

/// A horizontally-traveling cannonball
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vx: f32,
    pub radius: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vx: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vx,
            radius: PROJECTILE_RADIUS,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x += self.vx * dt;
    }

    /// Past either wall with margin to spare
    pub fn is_out_of_bounds(&self, arena_width: f32) -> bool {
        self.pos.x < -self.radius * 2.0 || self.pos.x > arena_width + self.radius * 2.0
    }
}

/// A wall-mounted cannon
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cannon {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Seconds until the next shot
    pub cooldown: f32,
}

impl Cannon {
    pub fn new(side: Side, y: f32, arena: &Arena, rng: &mut impl Rng) -> Self {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => arena.width - WALL_THICKNESS,
        };
        Self {
            side,
            x,
            y,
            width: WALL_THICKNESS,
            height: CANNON_HEIGHT,
            cooldown: 1.0 + rng.random::<f32>() * 2.0,
        }
    }

    /// Count the fuse down and fire when it expires. Every shot re-arms with
    /// a freshly randomized interval so cannons never fall into lockstep.
    pub fn update(
        &mut self,
        dt: f32,
        arena: &Arena,
        projectiles: &mut Vec<Projectile>,
        rng: &mut impl Rng,
    ) {
        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            self.cooldown = 2.8 + rng.random::<f32>() * 1.5;
            self.fire(arena, projectiles);
        }
    }

    fn fire(&self, arena: &Arena, projectiles: &mut Vec<Projectile>) {
        let origin_x = match self.side {
            Side::Left => WALL_THICKNESS + 6.0,
            Side::Right => arena.width - WALL_THICKNESS - 6.0,
        };
        let origin_y = self.y + self.height * 0.5;
        projectiles.push(Projectile::new(
            origin_x,
            origin_y,
            self.side.direction() * PROJECTILE_SPEED,
        ));
    }
}

/// One run of the game: the player, the column of platforms, the hazards and
/// all scroll/score bookkeeping. Owns its random source and best-score store;
/// all mutation happens inside `tick`.
pub struct Session<R: Rng = Pcg32> {
    pub arena: Arena,
    pub player: Option<Player>,
    pub platforms: Vec<Platform>,
    pub cannons: Vec<Cannon>,
    pub projectiles: Vec<Projectile>,
    pub phase: Phase,
    /// Cumulative upward scroll, monotonic within a run
    pub distance: f32,
    /// floor(distance / 10), recomputed on every shift
    pub score: u32,
    /// Smoothed toward `score` for presentation; snaps on game over
    pub display_score: f32,
    pub best_score: u32,
    /// Scroll owed to the camera, drained at a bounded rate
    pub pending_shift: f32,
    /// Total simulated time, for renderer animation phases
    pub time: f32,
    pub(crate) next_cannon_distance: f32,
    pub(crate) rng: R,
    pub(crate) store: Box<dyn ScoreStore>,
    next_platform_id: u32,
}

impl Session<Pcg32> {
    /// Create an idle session with a seeded default RNG
    pub fn new(arena: Arena, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        Self::with_rng(arena, Pcg32::seed_from_u64(seed), store)
    }
}

impl<R: Rng> Session<R> {
    /// Create an idle session with a caller-supplied random source
    pub fn with_rng(arena: Arena, rng: R, store: Box<dyn ScoreStore>) -> Self {
        let best_score = store.load_best();
        Self {
            arena,
            player: None,
            platforms: Vec::new(),
            cannons: Vec::new(),
            projectiles: Vec::new(),
            phase: Phase::Idle,
            distance: 0.0,
            score: 0,
            display_score: 0.0,
            best_score,
            pending_shift: 0.0,
            time: 0.0,
            next_cannon_distance: CANNON_SPACING,
            rng,
            store,
            next_platform_id: 1,
        }
    }

    /// Allocate a platform id
    pub(crate) fn alloc_platform_id(&mut self) -> u32 {
        let id = self.next_platform_id;
        self.next_platform_id += 1;
        id
    }

    /// The platform currently supporting the player, if any
    pub fn ground_platform(&self) -> Option<&Platform> {
        let id = self.player.as_ref()?.ground_platform?;
        self.platforms.iter().find(|p| p.id == id)
    }
}
