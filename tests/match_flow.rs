//! Whole-match behavior through the public API

use glam::Vec3;
use neon_pong::audio::SoundCue;
use neon_pong::sim::{MatchPhase, Side};
use neon_pong::{Game, Settings};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn short_match() -> Settings {
    Settings {
        win_score: 2,
        difficulty: 0.1,
        ..Settings::default()
    }
}

/// Run frames until game over (or the frame budget runs out); returns the
/// time reached in ms
fn play_out(game: &mut Game, cues: &mut Vec<SoundCue>, mut now_ms: f64) -> f64 {
    for _ in 0..60 * 600 {
        // Player parks at the top edge and mostly watches
        game.input_mut().pointer_moved(1.0);
        game.frame(now_ms, cues);
        if game.phase() == MatchPhase::GameOver {
            break;
        }
        now_ms += FRAME_MS;
    }
    now_ms
}

#[test]
fn test_full_match_reaches_game_over() {
    let mut game = Game::new(&short_match(), 2024);
    let mut cues: Vec<SoundCue> = Vec::new();
    game.start();
    play_out(&mut game, &mut cues, 0.0);

    assert_eq!(game.phase(), MatchPhase::GameOver);
    let winner = game.winner().expect("someone won");
    let scores = game.scores();
    assert_eq!(scores.get(winner), 2);
    assert!(scores.get(winner.other()) < 2);
    assert!(cues.iter().filter(|c| **c == SoundCue::Score).count() >= 2);
    assert_eq!(game.snapshot().phase, MatchPhase::GameOver);
}

#[test]
fn test_game_over_then_restart() {
    let mut game = Game::new(&short_match(), 7);
    let mut cues: Vec<SoundCue> = Vec::new();
    game.start();
    let now = play_out(&mut game, &mut cues, 0.0);
    assert_eq!(game.phase(), MatchPhase::GameOver);

    // Frozen: more frames change nothing
    let ball = game.state().ball.pos;
    let ticks = game.state().time_ticks;
    for i in 1..120 {
        game.frame(now + i as f64 * FRAME_MS, &mut cues);
    }
    assert_eq!(game.state().ball.pos, ball);
    assert_eq!(game.state().time_ticks, ticks);
    assert!(game.state().pending_serve().is_none());

    game.restart();
    assert_eq!(game.phase(), MatchPhase::Playing);
    assert_eq!(game.scores().player, 0);
    assert_eq!(game.scores().opponent, 0);
    assert!(game.state().ball.is_moving());
    assert_eq!(game.state().ball.pos, Vec3::ZERO);
    assert!(game.winner().is_none());
}

#[test]
fn test_pause_freezes_match() {
    let mut game = Game::new(&Settings::default(), 11);
    let mut cues: Vec<SoundCue> = Vec::new();
    game.start();
    let mut now = 0.0;
    for _ in 0..30 {
        game.frame(now, &mut cues);
        now += FRAME_MS;
    }

    assert!(game.set_paused(true));
    let before = serde_json::to_string(&game.snapshot()).unwrap();
    for _ in 0..300 {
        game.frame(now, &mut cues);
        now += FRAME_MS;
    }
    let after = serde_json::to_string(&game.snapshot()).unwrap();
    assert_eq!(before, after);

    assert!(game.set_paused(false));
    let ticks = game.state().time_ticks;
    game.frame(now, &mut cues);
    assert_eq!(game.state().time_ticks, ticks, "no catch-up after resume");
    game.frame(now + 20.0, &mut cues);
    assert_eq!(game.state().time_ticks, ticks + 1);
}

#[test]
fn test_serve_after_point_waits_one_second() {
    let settings = Settings {
        trails: false,
        ..Settings::default()
    };
    let mut game = Game::new(&settings, 3);
    let mut cues: Vec<SoundCue> = Vec::new();
    game.start();
    {
        let state = game.state_mut();
        state.ball.pos = Vec3::new(6.5, 0.0, 0.0);
        state.ball.set_velocity(5.0, 0.0);
    }

    game.frame(0.0, &mut cues);
    game.frame(20.0, &mut cues);
    assert_eq!(game.scores().opponent, 1);
    assert_eq!(cues, vec![SoundCue::Score]);
    let due = game.state().pending_serve().expect("serve queued").due_at;
    assert!((due - 1.02).abs() < 1e-9);

    let mut now = 20.0;
    while now < 1000.0 {
        now += FRAME_MS;
        game.frame(now, &mut cues);
        assert!(!game.state().ball.is_moving(), "served early at {now}ms");
    }
    game.frame(1100.0, &mut cues);
    assert!(game.state().ball.is_moving());
    assert!(game.state().pending_serve().is_none());
}

#[test]
fn test_restart_drops_queued_serve() {
    let mut game = Game::new(&Settings::default(), 5);
    let mut cues: Vec<SoundCue> = Vec::new();
    game.start();
    {
        let state = game.state_mut();
        state.ball.pos = Vec3::new(-6.5, 0.0, 0.0);
        state.ball.set_velocity(-5.0, 0.0);
    }
    game.frame(0.0, &mut cues);
    game.frame(20.0, &mut cues);
    assert_eq!(game.scores().player, 1);
    let stale = game.state().pending_serve().expect("serve queued");

    game.restart();
    assert_ne!(stale.session, game.state().session());
    assert!(game.state().pending_serve().is_none());
    assert_eq!(game.scores().player, 0);
}

#[test]
fn test_same_seed_same_match() {
    let run = |seed| {
        let mut game = Game::new(&Settings::default(), seed);
        let mut cues: Vec<SoundCue> = Vec::new();
        game.start();
        for i in 0..1200 {
            game.input_mut().pointer_moved(((i as f32) * 0.03).sin());
            game.frame(i as f64 * FRAME_MS, &mut cues);
        }
        (serde_json::to_string(&game.snapshot()).unwrap(), cues)
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn test_difficulty_is_clamped_at_runtime() {
    let mut game = Game::new(&Settings::default(), 1);
    game.set_difficulty(5.0);
    assert_eq!(game.state().opponent.difficulty(), 1.0);
    game.set_difficulty(-1.0);
    assert_eq!(game.state().opponent.difficulty(), 0.1);
    assert_eq!(Side::Player.other(), Side::Opponent);
}
