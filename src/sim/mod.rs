//! The simulation engine
//!
//! A single owner advances every entity in one coordinated sweep per tick:
//! - No per-entity threads; asteroid lifecycle is data, not a schedule
//! - Stable iteration order, so first-match collision semantics are stable
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{SplitChild, split_children};
pub use spawn::{Placement, plan_one};
pub use state::{
    Asteroid, AsteroidPhase, AsteroidView, GameState, Projectile, Ship, ShipView, Snapshot,
};
pub use tick::{TickInput, tick};
