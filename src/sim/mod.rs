//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - A single `tick(dt)` entry point, driven by the host's frame scheduler
//! - Injected, seedable RNG only
//! - Entity references are ids into insertion-stable collections
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use collision::{circle_hits_rect, spans_overlap, sweeps_across};
pub use state::{
    Cannon, Fragment, Phase, Platform, PlatformKind, Player, Projectile, Session, Side,
};
