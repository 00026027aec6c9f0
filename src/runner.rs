//! Threaded simulation driver
//!
//! One thread owns the `GameState` outright and advances it at the fixed
//! tick cadence. Control arrives over a channel and is drained at tick
//! boundaries; consumers read through a shared snapshot slot that is only
//! republished between ticks. Shutdown is deterministic: the sim thread is
//! signaled, retires every asteroid, flushes the high score, and is joined
//! before `shutdown` returns. Nothing outlives the session that owns it.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{GameConfig, SpawnRanges};
use crate::consts::TICK_INTERVAL_MS;
use crate::highscore::HighScoreStore;
use crate::sim::{GameState, Snapshot, TickInput, tick};

/// Control messages drained at tick boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Replace the held input intents
    Input(TickInput),
    Pause,
    Resume,
    Restart,
    ApplySpawnRanges(SpawnRanges),
    Shutdown,
}

/// Handle to a running simulation thread.
pub struct Runner {
    commands: Sender<Command>,
    snapshot: Arc<RwLock<Snapshot>>,
    handle: Option<JoinHandle<()>>,
}

impl Runner {
    /// Start the simulation thread. The game begins paused, waiting for
    /// [`Runner::start`].
    pub fn spawn(config: GameConfig, seed: u64, highscore: HighScoreStore) -> Self {
        let mut state = GameState::new(config, seed, highscore);
        state.set_paused(true);

        let snapshot = Arc::new(RwLock::new(state.snapshot()));
        let slot = snapshot.clone();
        let (commands, receiver) = mpsc::channel();
        let handle = thread::spawn(move || run_loop(state, receiver, slot));

        log::info!("simulation thread started, waiting for start");
        Self {
            commands,
            snapshot,
            handle: Some(handle),
        }
    }

    fn send(&self, command: Command) {
        // A closed channel means the sim thread is already gone; nothing to do
        let _ = self.commands.send(command);
    }

    /// Begin (or resume) ticking.
    pub fn start(&self) {
        self.send(Command::Resume);
    }

    pub fn pause(&self) {
        self.send(Command::Pause);
    }

    pub fn resume(&self) {
        self.send(Command::Resume);
    }

    /// Reinitialize the run; the high score survives.
    pub fn restart(&self) {
        self.send(Command::Restart);
    }

    /// Replace the input intents applied on every following tick.
    pub fn set_input(&self, input: TickInput) {
        self.send(Command::Input(input));
    }

    /// Apply new spawn ranges (order-corrected on the sim side).
    pub fn apply_spawn_ranges(&self, ranges: SpawnRanges) {
        self.send(Command::ApplySpawnRanges(ranges));
    }

    /// Latest published snapshot. Always a tick-boundary state.
    pub fn snapshot(&self) -> Snapshot {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stop the sim thread and join it. Idempotent.
    pub fn shutdown(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            log::info!("simulation thread joined");
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(mut state: GameState, commands: Receiver<Command>, slot: Arc<RwLock<Snapshot>>) {
    let period = Duration::from_millis(TICK_INTERVAL_MS);
    let mut input = TickInput::default();
    let mut next_tick = Instant::now() + period;

    loop {
        // Wait out the tick period, draining commands as they arrive
        loop {
            let now = Instant::now();
            if now >= next_tick {
                break;
            }
            match commands.recv_timeout(next_tick - now) {
                Ok(command) => {
                    if apply_command(&mut state, &mut input, command) {
                        publish(&slot, state.snapshot());
                        return;
                    }
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    // Every handle dropped without an explicit shutdown
                    state.shutdown();
                    return;
                }
            }
        }

        next_tick += period;
        // Don't chase an unrecoverable backlog
        if next_tick < Instant::now() {
            next_tick = Instant::now() + period;
        }

        tick(&mut state, &input);
        publish(&slot, state.snapshot());
    }
}

/// Apply one control message. Returns true on shutdown.
fn apply_command(state: &mut GameState, input: &mut TickInput, command: Command) -> bool {
    match command {
        Command::Input(new_input) => *input = new_input,
        Command::Pause => state.set_paused(true),
        Command::Resume => state.set_paused(false),
        Command::Restart => state.restart(),
        Command::ApplySpawnRanges(ranges) => state.apply_spawn_ranges(ranges),
        Command::Shutdown => {
            state.shutdown();
            return true;
        }
    }
    false
}

fn publish(slot: &Arc<RwLock<Snapshot>>, snapshot: Snapshot) {
    if let Ok(mut guard) = slot.write() {
        *guard = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_runner() -> Runner {
        Runner::spawn(GameConfig::default(), 1234, HighScoreStore::in_memory())
    }

    #[test]
    fn test_starts_paused_until_started() {
        let mut runner = test_runner();
        thread::sleep(Duration::from_millis(80));
        assert_eq!(runner.snapshot().tick, 0);
        assert!(runner.snapshot().paused);

        runner.start();
        thread::sleep(Duration::from_millis(150));
        let snapshot = runner.snapshot();
        assert!(!snapshot.paused);
        assert!(snapshot.tick > 0);
        runner.shutdown();
    }

    #[test]
    fn test_pause_freezes_tick_counter() {
        let mut runner = test_runner();
        runner.start();
        thread::sleep(Duration::from_millis(100));
        runner.pause();
        thread::sleep(Duration::from_millis(50));

        let frozen = runner.snapshot();
        assert!(frozen.paused);
        thread::sleep(Duration::from_millis(100));
        let later = runner.snapshot();
        assert_eq!(frozen.tick, later.tick);
        assert_eq!(frozen.asteroids, later.asteroids);
        runner.shutdown();
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut runner = test_runner();
        runner.start();
        thread::sleep(Duration::from_millis(100));
        runner.restart();
        thread::sleep(Duration::from_millis(100));

        let snapshot = runner.snapshot();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.lives, GameConfig::default().initial_lives);
        assert!(!snapshot.game_over);
        runner.shutdown();
    }

    #[test]
    fn test_apply_spawn_ranges_order_corrected() {
        let mut runner = test_runner();
        // Reversed on purpose; the sim side swaps them
        runner.apply_spawn_ranges(SpawnRanges {
            min_size: 80,
            max_size: 70,
            min_speed: 1.0,
            max_speed: 1.0,
        });
        thread::sleep(Duration::from_millis(100));

        let snapshot = runner.snapshot();
        assert!(!snapshot.asteroids.is_empty());
        for asteroid in &snapshot.asteroids {
            assert!(asteroid.size >= 70 && asteroid.size <= 80);
        }
        runner.shutdown();
    }

    #[test]
    fn test_shutdown_is_idempotent_and_joins() {
        let mut runner = test_runner();
        runner.start();
        thread::sleep(Duration::from_millis(50));
        runner.shutdown();
        assert!(runner.handle.is_none());
        // A second call must be a no-op
        runner.shutdown();
    }

    #[test]
    fn test_drop_shuts_down() {
        let runner = test_runner();
        runner.start();
        thread::sleep(Duration::from_millis(50));
        drop(runner);
    }
}
