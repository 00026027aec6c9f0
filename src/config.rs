//! Game configuration
//!
//! An explicit immutable value passed at construction. Defaults carry the
//! classic tuning: an 800x600 arena, five asteroids, and a two-second
//! invincibility window after losing a life.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;

/// Size and speed ranges for newly spawned asteroids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRanges {
    /// Minimum asteroid radius (pixels)
    pub min_size: i32,
    /// Maximum asteroid radius (pixels)
    pub max_size: i32,
    /// Minimum drift speed (pixels per tick)
    pub min_speed: f32,
    /// Maximum drift speed (pixels per tick)
    pub max_speed: f32,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            min_size: 20,
            max_size: 60,
            min_speed: 0.5,
            max_speed: 2.5,
        }
    }
}

impl SpawnRanges {
    /// Order-corrected copy: reversed min/max pairs are swapped, never
    /// rejected.
    pub fn normalized(self) -> Self {
        let (min_size, max_size) = if self.min_size > self.max_size {
            (self.max_size, self.min_size)
        } else {
            (self.min_size, self.max_size)
        };
        let (min_speed, max_speed) = if self.min_speed > self.max_speed {
            (self.max_speed, self.min_speed)
        } else {
            (self.min_speed, self.max_speed)
        };
        Self {
            min_size,
            max_size,
            min_speed,
            max_speed,
        }
    }
}

/// Full simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Arena width in pixels
    pub arena_width: f32,
    /// Arena height in pixels
    pub arena_height: f32,
    /// Lives at the start of a run
    pub initial_lives: u32,
    /// Ship collision radius
    pub ship_radius: f32,
    /// Asteroid population the spawn maintenance tops up to
    pub target_asteroids: usize,
    /// Minimum clearance between spawned asteroid circles
    pub spawn_clearance: f32,
    /// Asteroids larger than this split into two children on destruction
    pub split_threshold: i32,
    /// Ship turn rate in radians per tick
    pub turn_rate: f32,
    /// Invincibility window after losing a life, in milliseconds
    pub invincibility_ms: u64,
    /// Initial spawn parameter ranges
    pub spawn: SpawnRanges,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            initial_lives: 3,
            ship_radius: 10.0,
            target_asteroids: 5,
            spawn_clearance: 10.0,
            split_threshold: 25,
            turn_rate: 0.07,
            invincibility_ms: 2000,
            spawn: SpawnRanges::default(),
        }
    }
}

impl GameConfig {
    /// Arena center, where the ship starts and respawns.
    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Invincibility window length in ticks at the fixed tick cadence.
    pub fn invincibility_ticks(&self) -> u64 {
        self.invincibility_ms / TICK_INTERVAL_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_keeps_ordered_ranges() {
        let ranges = SpawnRanges::default();
        assert_eq!(ranges.normalized(), ranges);
    }

    #[test]
    fn test_normalized_swaps_reversed_ranges() {
        let ranges = SpawnRanges {
            min_size: 60,
            max_size: 20,
            min_speed: 2.5,
            max_speed: 0.5,
        };
        let fixed = ranges.normalized();
        assert_eq!(fixed.min_size, 20);
        assert_eq!(fixed.max_size, 60);
        assert_eq!(fixed.min_speed, 0.5);
        assert_eq!(fixed.max_speed, 2.5);
    }

    #[test]
    fn test_arena_center() {
        let config = GameConfig::default();
        assert_eq!(config.arena_center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_invincibility_ticks() {
        let config = GameConfig::default();
        // 2000 ms at 16 ms per tick
        assert_eq!(config.invincibility_ticks(), 125);
    }
}
