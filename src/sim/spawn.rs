//! Bounded-retry spawn placement
//!
//! New asteroids get a random size, speed, and direction from the configured
//! ranges, then a position drawn uniformly over the arena. Candidates whose
//! circle would overlap an existing asteroid (plus clearance) are rejected
//! and redrawn, up to a fixed attempt budget. After the budget the last
//! candidate is accepted as-is: placement is best-effort, not a guarantee.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::{GameConfig, SpawnRanges};
use crate::consts::SPAWN_ATTEMPTS;

/// A planned asteroid: everything but an entity id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: i32,
}

/// Plan one asteroid clear of `existing` bodies, given as (center, size).
pub fn plan_one(
    rng: &mut Pcg32,
    config: &GameConfig,
    ranges: &SpawnRanges,
    existing: &[(Vec2, i32)],
) -> Placement {
    let size = rng.random_range(ranges.min_size..=ranges.max_size);
    let speed = rng.random_range(ranges.min_speed..=ranges.max_speed);
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let vel = Vec2::new(angle.cos(), angle.sin()) * speed;

    let mut pos;
    let mut attempts = 0;
    loop {
        pos = Vec2::new(
            rng.random_range(0.0..config.arena_width),
            rng.random_range(0.0..config.arena_height),
        );
        attempts += 1;
        if !overlaps_any(pos, size, existing, config.spawn_clearance) {
            break;
        }
        if attempts >= SPAWN_ATTEMPTS {
            log::warn!(
                "placement budget exhausted after {} attempts; accepting overlapping position",
                attempts
            );
            break;
        }
    }

    Placement { pos, vel, size }
}

/// Whether a candidate circle intrudes on any existing circle plus clearance.
fn overlaps_any(pos: Vec2, size: i32, existing: &[(Vec2, i32)], clearance: f32) -> bool {
    existing
        .iter()
        .any(|&(center, other_size)| pos.distance(center) < (size + other_size) as f32 + clearance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_placements_respect_clearance() {
        let mut rng = Pcg32::seed_from_u64(42);
        let config = GameConfig::default();
        let ranges = config.spawn;

        let mut placed: Vec<(Vec2, i32)> = Vec::new();
        for _ in 0..config.target_asteroids {
            let p = plan_one(&mut rng, &config, &ranges, &placed);
            placed.push((p.pos, p.size));
        }

        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                let (pos_a, size_a) = placed[i];
                let (pos_b, size_b) = placed[j];
                let min_dist = (size_a + size_b) as f32 + config.spawn_clearance;
                assert!(
                    pos_a.distance(pos_b) >= min_dist,
                    "asteroids {} and {} overlap",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_placement_within_arena() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = GameConfig::default();
        for _ in 0..50 {
            let p = plan_one(&mut rng, &config, &config.spawn, &[]);
            assert!(p.pos.x >= 0.0 && p.pos.x < config.arena_width);
            assert!(p.pos.y >= 0.0 && p.pos.y < config.arena_height);
        }
    }

    #[test]
    fn test_speed_and_size_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let config = GameConfig::default();
        let ranges = config.spawn;
        for _ in 0..100 {
            let p = plan_one(&mut rng, &config, &ranges, &[]);
            assert!(p.size >= ranges.min_size && p.size <= ranges.max_size);
            let speed = p.vel.length();
            assert!(speed >= ranges.min_speed - 1e-4);
            assert!(speed <= ranges.max_speed + 1e-4);
        }
    }

    #[test]
    fn test_budget_exhaustion_accepts_overlap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = GameConfig::default();
        // One body covering the entire arena: every candidate overlaps
        let blocker = vec![(Vec2::new(400.0, 300.0), 100_000)];

        let p = plan_one(&mut rng, &config, &config.spawn, &blocker);
        assert!(overlaps_any(p.pos, p.size, &blocker, config.spawn_clearance));
        assert!(p.pos.x >= 0.0 && p.pos.x < config.arena_width);
    }
}
