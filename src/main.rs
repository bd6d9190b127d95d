mod display;
mod input;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::{cursor, event::Event, terminal, ExecutableCommand};
use rand::thread_rng;

use flappy_game::compute::{
    flap, new_game_state, pause, restart, resume, select_difficulty, spawn_pipe, tick,
};
use flappy_game::entities::{Config, DifficultyLevel, GamePhase};

use input::Intent;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Terminal as a scoped resource ─────────────────────────────────────────────

/// Raw mode, alternate screen and hidden cursor, held for the guard's
/// lifetime.  `Drop` restores everything, so every exit path — quit key,
/// I/O error, panic unwind — puts the terminal back exactly once.
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> std::io::Result<TerminalGuard> {
        terminal::enable_raw_mode()?;
        stdout()
            .execute(terminal::EnterAlternateScreen)?
            .execute(cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = stdout().execute(cursor::Show);
        let _ = stdout().execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Optional difficulty argument skips the menu for the first game.
    // Parsed before the terminal is touched so the error prints normally.
    let start_level = match std::env::args().nth(1) {
        Some(arg) => match DifficultyLevel::from_name(&arg) {
            Ok(level) => Some(level),
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let _guard = TerminalGuard::acquire()?;
    let mut out = BufWriter::new(stdout());
    let rx = input::spawn_reader();

    run(&mut out, &rx, &Config::default(), start_level)
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// The driver owns the single authoritative `GameState`, the wall clock
/// and the RNG.  Each frame it drains pending input (intents apply
/// between ticks, never mid-tick), feeds the spawn timer, advances the
/// simulation by the measured dt and renders the result.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cfg: &Config,
    start_level: Option<DifficultyLevel>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    let mut state = new_game_state(cfg);
    if let Some(level) = start_level {
        state = select_difficulty(&state, level, cfg);
    }

    let mut last_frame = Instant::now();
    let mut since_spawn = Duration::ZERO;

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f64();
        last_frame = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match input::map_key(&state.phase, &key) {
                    Some(Intent::Quit) => return Ok(()),
                    Some(Intent::Flap) => state = flap(&state, cfg),
                    Some(Intent::SelectDifficulty(level)) => {
                        state = select_difficulty(&state, level, cfg);
                        since_spawn = Duration::ZERO;
                    }
                    Some(Intent::Pause) => state = pause(&state),
                    Some(Intent::Resume) => {
                        state = resume(&state);
                        // The pause gap must not enter the next dt.
                        last_frame = Instant::now();
                    }
                    Some(Intent::Restart) => state = restart(&state, cfg),
                    None => {}
                },
                // A resize mid-flight would garble the playfield; freeze
                // the game and let the player resume when ready.
                Event::Resize(..) => state = pause(&state),
                _ => {}
            }
        }

        if state.phase == GamePhase::Playing {
            since_spawn += Duration::from_secs_f64(dt);
            if since_spawn.as_millis() as u64 >= state.difficulty.spawn_interval_ms {
                state = spawn_pipe(&state, cfg, &mut rng);
                since_spawn = Duration::ZERO;
            }
            state = tick(&state, dt, cfg);
        }

        display::render(out, &state, cfg)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}
