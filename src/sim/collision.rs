//! Collision geometry
//!
//! Circle tests and split geometry, kept pure so the tick orchestration in
//! `tick.rs` owns all state changes. Both overlap tests use strict
//! less-than: touching circles do not collide.

use glam::Vec2;

/// Point-vs-circle test for a projectile against an asteroid body.
#[inline]
pub fn projectile_hits_asteroid(projectile_pos: Vec2, asteroid_pos: Vec2, size: i32) -> bool {
    projectile_pos.distance(asteroid_pos) < size as f32
}

/// Circle-vs-circle test for the ship against an asteroid body.
#[inline]
pub fn ship_hits_asteroid(ship_pos: Vec2, ship_radius: f32, asteroid_pos: Vec2, size: i32) -> bool {
    ship_pos.distance(asteroid_pos) < size as f32 + ship_radius
}

/// One child of a split asteroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitChild {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: i32,
}

/// Children of a destroyed asteroid large enough to split.
///
/// Both children are half the parent's size (integer division) and keep the
/// parent's speed, flung along `base_angle` and its opposite. Each starts
/// offset from the parent center by child size + 2 so the pair doesn't spawn
/// overlapping.
pub fn split_children(
    parent_pos: Vec2,
    parent_vel: Vec2,
    parent_size: i32,
    base_angle: f32,
) -> [SplitChild; 2] {
    let size = parent_size / 2;
    let speed = parent_vel.length();
    let offset = (size + 2) as f32;

    let make = |angle: f32| {
        let dir = Vec2::new(angle.cos(), angle.sin());
        SplitChild {
            pos: parent_pos + dir * offset,
            vel: dir * speed,
            size,
        }
    };

    [make(base_angle), make(base_angle + std::f32::consts::PI)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_projectile_hit_inside_circle() {
        let asteroid = Vec2::new(100.0, 100.0);
        assert!(projectile_hits_asteroid(Vec2::new(110.0, 100.0), asteroid, 20));
        assert!(!projectile_hits_asteroid(Vec2::new(130.0, 100.0), asteroid, 20));
    }

    #[test]
    fn test_projectile_touching_is_a_miss() {
        let asteroid = Vec2::new(100.0, 100.0);
        // Exactly on the rim: strict less-than, no hit
        assert!(!projectile_hits_asteroid(Vec2::new(120.0, 100.0), asteroid, 20));
    }

    #[test]
    fn test_ship_hit_uses_combined_radius() {
        let asteroid = Vec2::new(100.0, 100.0);
        assert!(ship_hits_asteroid(Vec2::new(128.0, 100.0), 10.0, asteroid, 20));
        assert!(!ship_hits_asteroid(Vec2::new(130.0, 100.0), 10.0, asteroid, 20));
    }

    #[test]
    fn test_split_children_geometry() {
        let children = split_children(Vec2::new(200.0, 200.0), Vec2::new(3.0, 4.0), 40, 0.0);
        assert_eq!(children[0].size, 20);
        assert_eq!(children[1].size, 20);
        // Offset by size + 2 along the base angle and its opposite
        assert!((children[0].pos.x - 222.0).abs() < 1e-4);
        assert!((children[1].pos.x - 178.0).abs() < 1e-4);
        // Parent speed preserved
        assert!((children[0].vel.length() - 5.0).abs() < 1e-4);
        assert!((children[1].vel.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_split_integer_division() {
        let children = split_children(Vec2::ZERO, Vec2::new(1.0, 0.0), 27, 1.0);
        assert_eq!(children[0].size, 13);
    }

    proptest! {
        #[test]
        fn prop_split_children_anti_parallel(
            size in 26i32..200,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
            base_angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let parent_vel = Vec2::new(vx, vy);
            let children = split_children(Vec2::new(400.0, 300.0), parent_vel, size, base_angle);
            let speed = parent_vel.length();

            prop_assert!((children[0].vel.length() - speed).abs() < 1e-3);
            prop_assert!((children[1].vel.length() - speed).abs() < 1e-3);
            // Velocities are anti-parallel: their sum cancels
            prop_assert!((children[0].vel + children[1].vel).length() < 1e-2);
            prop_assert_eq!(children[0].size, size / 2);
        }
    }
}
