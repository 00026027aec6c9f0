//! Headless demo entry point
//!
//! Runs the engine without a renderer: starts the sim thread, holds thrust
//! and fire for a couple of seconds, then prints the final snapshot as JSON.

use std::time::Duration;

use rockfield::config::GameConfig;
use rockfield::highscore::HighScoreStore;
use rockfield::runner::Runner;
use rockfield::sim::TickInput;

fn main() {
    env_logger::init();
    log::info!("rockfield headless demo starting");

    let highscore = HighScoreStore::open("highscore.txt");
    let mut runner = Runner::spawn(GameConfig::default(), rand::random(), highscore);
    runner.start();

    runner.set_input(TickInput {
        thrust: true,
        fire: true,
        ..Default::default()
    });
    std::thread::sleep(Duration::from_secs(2));

    let snapshot = runner.snapshot();
    runner.shutdown();

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}
