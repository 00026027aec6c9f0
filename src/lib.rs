//! Rockfield - a toroidal-arena asteroids simulation engine
//!
//! Core modules:
//! - `sim`: The simulation (physics, collisions, spawning, game state)
//! - `config`: Immutable game configuration passed at construction
//! - `highscore`: Single-integer file-backed score persistence
//! - `runner`: Threaded driver that owns the simulation and publishes snapshots
//!
//! Rendering, input decoding, and window chrome are the caller's problem: the
//! engine consumes boolean intents per tick and exposes read-only snapshots.

pub mod config;
pub mod highscore;
pub mod runner;
pub mod sim;

pub use config::{GameConfig, SpawnRanges};
pub use highscore::HighScoreStore;

use glam::Vec2;

/// Engine-wide constants
pub mod consts {
    /// Simulation tick period in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Spawn maintenance cadence in ticks (~1 s at the tick rate)
    pub const SPAWN_MAINTENANCE_TICKS: u64 = 60;

    /// Thrust impulse added to ship velocity per tick
    pub const THRUST_IMPULSE: f32 = 0.1;
    /// Universal friction applied to ship velocity every tick
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Velocity damping while actively braking
    pub const BRAKE_FACTOR: f32 = 0.96;
    /// Below this speed, braking stops the ship outright
    pub const BRAKE_EPSILON: f32 = 0.05;

    /// Projectile muzzle speed (added to the ship's velocity)
    pub const PROJECTILE_SPEED: f32 = 5.0;
    /// Distance from ship center to the muzzle tip
    pub const MUZZLE_OFFSET: f32 = 16.0;

    /// Score awarded per destroyed asteroid
    pub const KILL_SCORE: u32 = 100;
    /// Placement attempts before accepting an overlapping spawn position
    pub const SPAWN_ATTEMPTS: u32 = 100;
}

/// Wrap a coordinate into `[0, extent)`.
///
/// Handles inputs arbitrarily far out of bounds, not just one arena-width
/// over. The explicit clamp covers the rounding case where `rem_euclid` of a
/// tiny negative value lands exactly on `extent`.
#[inline]
pub fn wrap_coordinate(v: f32, extent: f32) -> f32 {
    let wrapped = v.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Wrap a position into the arena on both axes independently.
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coordinate(pos.x, width), wrap_coordinate(pos.y, height))
}

/// Unit vector for a ship heading.
///
/// Heading 0 points "up" on screen, so the angle is corrected by -90 degrees
/// before the usual cos/sin decomposition.
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    let forward = heading - std::f32::consts::FRAC_PI_2;
    Vec2::new(forward.cos(), forward.sin())
}
