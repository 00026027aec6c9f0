//! Per-tick simulation advance
//!
//! One call advances everything: ship steering and physics, projectile
//! integration, the asteroid sweep, collision resolution, invincibility
//! expiry, and the spawn-maintenance cadence. The order is fixed:
//! projectiles integrate before collisions resolve, and the invincibility
//! expiry check runs last.

use crate::consts::*;
use crate::wrap_position;

use super::collision;
use super::state::{Asteroid, GameState, Projectile};

/// Input intents for a single tick.
///
/// All flags are level-triggered except `fire`, which produces exactly one
/// projectile per rising edge no matter how long it stays held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub decelerate: bool,
    pub fire: bool,
}

/// Advance the simulation by one tick.
///
/// A terminal (`game_over`) or paused state is left completely untouched.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.game_over || state.paused {
        return;
    }
    state.time_ticks += 1;

    // Steering applies before the ship integrates
    if input.turn_left {
        state.ship.heading -= state.config.turn_rate;
    }
    if input.turn_right {
        state.ship.heading += state.config.turn_rate;
    }
    state.ship.thrusting = input.thrust;
    state.ship.decelerating = input.decelerate;

    // Edge-triggered fire
    if input.fire && !state.fire_held {
        let projectile = Projectile::fired_from(&state.ship);
        state.projectiles.push(projectile);
    }
    state.fire_held = input.fire;

    let (width, height) = (state.config.arena_width, state.config.arena_height);
    state.ship.update(width, height);

    for projectile in &mut state.projectiles {
        projectile.update(width, height);
    }
    state.projectiles.retain(|p| p.active);

    // The asteroid sweep: every running asteroid advances one step
    for asteroid in &mut state.asteroids {
        asteroid.step(width, height);
    }

    resolve_projectile_hits(state);
    resolve_ship_hit(state);

    if state.invincible && state.time_ticks >= state.invincible_until {
        state.invincible = false;
        log::debug!("invincibility expired at tick {}", state.time_ticks);
    }

    if state.time_ticks % SPAWN_MAINTENANCE_TICKS == 0 {
        maintain_population(state);
    }
}

/// Projectile-vs-asteroid pass.
///
/// First-match-wins per projectile, in iteration order: a projectile
/// resolves against the first overlapping asteroid and stops scanning. Hit
/// asteroids are stopped, marked with the size sentinel, and removed at the
/// end of the pass; large ones leave two children behind.
fn resolve_projectile_hits(state: &mut GameState) {
    let mut children: Vec<Asteroid> = Vec::new();
    let (width, height) = (state.config.arena_width, state.config.arena_height);

    for pi in 0..state.projectiles.len() {
        if !state.projectiles[pi].active {
            continue;
        }
        for ai in 0..state.asteroids.len() {
            let hit = {
                let asteroid = &state.asteroids[ai];
                asteroid.size > 0
                    && collision::projectile_hits_asteroid(
                        state.projectiles[pi].pos,
                        asteroid.pos,
                        asteroid.size,
                    )
            };
            if !hit {
                continue;
            }

            state.projectiles[pi].active = false;
            let (parent_pos, parent_vel, parent_size) = {
                let asteroid = &mut state.asteroids[ai];
                let parent = (asteroid.pos, asteroid.vel, asteroid.size);
                asteroid.stop();
                asteroid.size = -1;
                parent
            };
            state.award_kill();

            if parent_size > state.config.split_threshold {
                let base_angle = state.random_angle();
                for child in collision::split_children(parent_pos, parent_vel, parent_size, base_angle)
                {
                    let id = state.next_entity_id();
                    let pos = wrap_position(child.pos, width, height);
                    children.push(Asteroid::new(id, pos, child.vel, child.size));
                }
                log::debug!(
                    "asteroid split: size {} -> 2x size {}",
                    parent_size,
                    parent_size / 2
                );
            }
            break;
        }
    }

    state.asteroids.retain(|a| !a.marked_for_removal());
    // Children join the sweep immediately
    state.asteroids.append(&mut children);
}

/// Ship-vs-asteroid pass. Skipped entirely while invincible; at most one
/// life is lost per tick (first overlapping asteroid wins, scan stops).
fn resolve_ship_hit(state: &mut GameState) {
    if state.invincible {
        return;
    }

    let ship_pos = state.ship.pos;
    let ship_radius = state.config.ship_radius;
    let hit = state
        .asteroids
        .iter()
        .any(|a| a.size > 0 && collision::ship_hits_asteroid(ship_pos, ship_radius, a.pos, a.size));
    if !hit {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    log::info!("ship hit; {} lives left", state.lives);

    if state.lives == 0 {
        state.game_over = true;
        log::info!("game over at score {}", state.score);
        // Terminal: nothing keeps moving past this point
        for asteroid in &mut state.asteroids {
            asteroid.stop();
        }
    } else {
        state.respawn_ship();
    }
}

/// Top up the asteroid population, one spawn per maintenance interval.
fn maintain_population(state: &mut GameState) {
    if state.asteroids.len() < state.config.target_asteroids {
        state.spawn_one();
    }
}
