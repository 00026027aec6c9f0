//! Simulation entities and coordinator state
//!
//! The coordinator owns every entity and advances them in one sweep per tick.
//! Asteroids keep the tri-state lifecycle they had when each drove its own
//! schedule: `Running` bodies move, `Paused` bodies hold position, `Stopped`
//! bodies are permanently out and only await removal.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::config::{GameConfig, SpawnRanges};
use crate::consts::*;
use crate::highscore::HighScoreStore;
use crate::{heading_to_dir, wrap_position};

/// Lifecycle of an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidPhase {
    /// Advancing every tick
    Running,
    /// Holding position; resumes exactly where it froze
    Paused,
    /// Permanently out of the sweep, awaiting removal
    Stopped,
}

/// A drifting asteroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius in pixels; <= 0 marks the asteroid for removal
    pub size: i32,
    pub phase: AsteroidPhase,
}

impl Asteroid {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: i32) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            phase: AsteroidPhase::Running,
        }
    }

    /// Advance one step: integrate and wrap. No-op unless running.
    pub fn step(&mut self, width: f32, height: f32) {
        if self.phase != AsteroidPhase::Running {
            return;
        }
        self.pos = wrap_position(self.pos + self.vel, width, height);
    }

    /// Suspend or resume motion. Stopped asteroids stay stopped.
    pub fn set_paused(&mut self, paused: bool) {
        if self.phase == AsteroidPhase::Stopped {
            return;
        }
        self.phase = if paused {
            AsteroidPhase::Paused
        } else {
            AsteroidPhase::Running
        };
    }

    /// Permanently retire this asteroid from the sweep.
    pub fn stop(&mut self) {
        self.phase = AsteroidPhase::Stopped;
    }

    pub fn marked_for_removal(&self) -> bool {
        self.size <= 0
    }
}

/// The player's ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in radians; 0 points up after the -90 degree correction
    pub heading: f32,
    pub vel: Vec2,
    pub thrusting: bool,
    pub decelerating: bool,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: 0.0,
            vel: Vec2::ZERO,
            thrusting: false,
            decelerating: false,
        }
    }

    /// Per-tick physics: thrust, brake, integrate, wrap, friction.
    ///
    /// Friction lands after integration, so a tick's displacement is the
    /// pre-friction velocity.
    pub fn update(&mut self, width: f32, height: f32) {
        if self.thrusting {
            self.vel += heading_to_dir(self.heading) * THRUST_IMPULSE;
        }

        if self.decelerating {
            if self.vel.length() > BRAKE_EPSILON {
                self.vel *= BRAKE_FACTOR;
            } else {
                self.vel = Vec2::ZERO;
            }
        }

        self.pos = wrap_position(self.pos + self.vel, width, height);
        self.vel *= SHIP_FRICTION;
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Projectile {
    /// Fire from the ship's muzzle tip, inheriting the ship's velocity.
    pub fn fired_from(ship: &Ship) -> Self {
        let dir = heading_to_dir(ship.heading);
        Self {
            pos: ship.pos + dir * MUZZLE_OFFSET,
            vel: dir * PROJECTILE_SPEED + ship.vel,
            active: true,
        }
    }

    /// Integrate; deactivate on leaving the arena. Projectiles do not wrap.
    pub fn update(&mut self, width: f32, height: f32) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x >= width || self.pos.y < 0.0 || self.pos.y >= height {
            self.active = false;
        }
    }
}

/// Read-only ship pose for renderers and HUDs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub heading: f32,
    pub vel: Vec2,
}

/// Read-only asteroid view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: i32,
}

/// A consistent copy of everything a renderer or HUD needs.
///
/// Published by the runner only at tick boundaries, so consumers never see a
/// mid-mutation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub projectiles: Vec<Vec2>,
    pub score: u32,
    pub lives: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub paused: bool,
    pub invincible: bool,
}

/// The authoritative simulation state.
///
/// Owned by exactly one caller (in production, the runner thread); everything
/// else reads snapshots.
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
    pub paused: bool,
    pub invincible: bool,
    /// Tick at which the invincibility window closes
    pub(crate) invincible_until: u64,
    pub time_ticks: u64,
    /// Current spawn ranges; starts from config, mutable via the apply command
    pub spawn_ranges: SpawnRanges,
    pub(crate) fire_held: bool,
    pub(crate) rng: Pcg32,
    pub(crate) highscore: HighScoreStore,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run and spawn the initial asteroid field.
    pub fn new(config: GameConfig, seed: u64, highscore: HighScoreStore) -> Self {
        let mut state = Self {
            ship: Ship::new(config.arena_center()),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            lives: config.initial_lives,
            game_over: false,
            paused: false,
            invincible: false,
            invincible_until: 0,
            time_ticks: 0,
            spawn_ranges: config.spawn.normalized(),
            fire_held: false,
            rng: Pcg32::seed_from_u64(seed),
            highscore,
            next_id: 1,
            config,
        };
        state.spawn_field();
        state
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn high_score(&self) -> u32 {
        self.highscore.best()
    }

    /// Award the fixed per-kill score and persist a new record if beaten.
    pub(crate) fn award_kill(&mut self) {
        self.score += KILL_SCORE;
        if self.highscore.record(self.score) {
            log::info!("new high score: {}", self.score);
        }
    }

    /// Place one asteroid, best-effort clear of the existing field.
    pub fn spawn_one(&mut self) {
        let existing: Vec<(Vec2, i32)> = self.asteroids.iter().map(|a| (a.pos, a.size)).collect();
        let placement = spawn::plan_one(&mut self.rng, &self.config, &self.spawn_ranges, &existing);
        let id = self.next_entity_id();
        let mut asteroid = Asteroid::new(id, placement.pos, placement.vel, placement.size);
        // New arrivals must honor a pause already in effect
        asteroid.set_paused(self.paused);
        log::debug!(
            "spawned asteroid {} size {} at ({:.1}, {:.1})",
            id,
            placement.size,
            placement.pos.x,
            placement.pos.y
        );
        self.asteroids.push(asteroid);
    }

    /// Replace the whole field with a fresh target-count population.
    pub fn spawn_field(&mut self) {
        for asteroid in &mut self.asteroids {
            asteroid.stop();
        }
        self.asteroids.clear();
        for _ in 0..self.config.target_asteroids {
            self.spawn_one();
        }
    }

    /// Move the ship back to center with zero velocity and open the
    /// invincibility window.
    pub(crate) fn respawn_ship(&mut self) {
        self.ship.pos = self.config.arena_center();
        self.ship.vel = Vec2::ZERO;
        self.invincible = true;
        self.invincible_until = self.time_ticks + self.config.invincibility_ticks();
    }

    /// Pause or resume. Propagates to every asteroid so the whole field
    /// freezes and resumes uniformly.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        for asteroid in &mut self.asteroids {
            asteroid.set_paused(paused);
        }
    }

    /// Reinitialize everything to defaults. The high score survives.
    pub fn restart(&mut self) {
        log::info!("restarting run; high score {}", self.high_score());
        self.ship = Ship::new(self.config.arena_center());
        self.projectiles.clear();
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.game_over = false;
        self.invincible = false;
        self.invincible_until = 0;
        self.time_ticks = 0;
        self.fire_held = false;
        self.paused = false;
        self.spawn_field();
    }

    /// Apply new spawn ranges (order-corrected) and respawn the field with
    /// them.
    pub fn apply_spawn_ranges(&mut self, ranges: SpawnRanges) {
        self.spawn_ranges = ranges.normalized();
        self.spawn_field();
    }

    /// Retire every asteroid and flush the high score. Called once when the
    /// owning session ends; nothing may keep moving past this point.
    pub fn shutdown(&mut self) {
        for asteroid in &mut self.asteroids {
            asteroid.stop();
        }
        self.highscore.persist();
    }

    /// Copy out everything a renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            ship: ShipView {
                pos: self.ship.pos,
                heading: self.ship.heading,
                vel: self.ship.vel,
            },
            asteroids: self
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    vel: a.vel,
                    size: a.size,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .filter(|p| p.active)
                .map(|p| p.pos)
                .collect(),
            score: self.score,
            lives: self.lives,
            high_score: self.high_score(),
            game_over: self.game_over,
            paused: self.paused,
            invincible: self.invincible,
        }
    }

    /// Random base angle for a split, uniform in [0, 2pi).
    pub(crate) fn random_angle(&mut self) -> f32 {
        self.rng.random_range(0.0..std::f32::consts::TAU)
    }
}
