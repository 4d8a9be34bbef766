//! Neon Pong - headless attract mode
//!
//! Runs a full match on a simulated 60 fps clock with a computer-driven
//! player, logging as it goes and printing the final snapshot as JSON.
//!
//! Usage: `neon-pong [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use neon_pong::{Game, Settings, audio::LogSink, sim::MatchPhase};

/// Simulated frame interval (ms)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(seed_from_clock);
    log::info!("Neon Pong (headless) starting with seed {}", seed);

    let mut game = Game::new(&settings, seed);
    let mut sink = LogSink::new(settings.master_volume);
    game.start();

    let mut now_ms = 0.0;
    for frame in 0..MAX_FRAMES {
        steer_player(&mut game);
        game.frame(now_ms, &mut sink);

        if game.phase() == MatchPhase::GameOver {
            break;
        }
        if game.show_fps() && frame > 0 && frame % 600 == 0 {
            log::info!("FPS: {}", game.fps());
        }
        now_ms += FRAME_MS;
    }

    match game.winner() {
        Some(side) => log::info!("{:?} wins after {:.1}s", side, now_ms / 1000.0),
        None => log::warn!("No winner after {:.1}s", now_ms / 1000.0),
    }
    log::debug!("{} sound cues played", sink.played());

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}

/// Follow the ball while it comes toward the player, drift home otherwise
#[cfg(not(target_arch = "wasm32"))]
fn steer_player(game: &mut Game) {
    let state = game.state();
    let half_height = state.field_height / 2.0;
    let target = if state.ball.vel.x > 0.0 { state.ball.pos.y } else { 0.0 };
    game.input_mut().pointer_moved(target / half_height);
}

#[cfg(not(target_arch = "wasm32"))]
fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds are driven through the library; nothing to run here
}
