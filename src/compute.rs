/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// value (plus the world `Config` and, where randomness is involved, an
/// RNG handle) and returns a brand-new value.  Nothing in here touches a
/// clock, a terminal or a global RNG; side effects are limited to the
/// injected RNG.

use rand::Rng;

use crate::entities::{
    Bird, BoundingBox, Config, Difficulty, DifficultyLevel, GamePhase, GameState, Pipe,
};

// ── Difficulty presets ────────────────────────────────────────────────────────

/// The fixed preset behind each of the three levels.
pub fn difficulty_preset(level: DifficultyLevel) -> Difficulty {
    match level {
        DifficultyLevel::Low => Difficulty {
            level: DifficultyLevel::Low,
            gap_height: 180.0,
            scroll_speed: 120.0,
            spawn_interval_ms: 2000,
        },
        DifficultyLevel::Middle => Difficulty {
            level: DifficultyLevel::Middle,
            gap_height: 140.0,
            scroll_speed: 180.0,
            spawn_interval_ms: 1600,
        },
        DifficultyLevel::High => Difficulty {
            level: DifficultyLevel::High,
            gap_height: 100.0,
            scroll_speed: 240.0,
            spawn_interval_ms: 1200,
        },
    }
}

/// Frame deltas come from wall-clock measurement in the driver and are
/// assumed non-negative.  A negative or non-finite delta is clamped to
/// zero instead of being integrated.
fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

// ── Bird physics ──────────────────────────────────────────────────────────────

/// A fresh bird at the configured start position with zero velocity.
pub fn create_bird(cfg: &Config) -> Bird {
    Bird {
        x: cfg.bird_start_x,
        y: cfg.bird_start_y,
        velocity: 0.0,
        width: cfg.bird_width,
        height: cfg.bird_height,
    }
}

/// A flap hard-sets the velocity to the flap impulse, independent of the
/// current value.  Flapping mid-ascent simply resets it again; there is
/// no accumulation and no cooldown.
pub fn flap_bird(bird: &Bird, cfg: &Config) -> Bird {
    Bird {
        velocity: cfg.flap_velocity,
        ..bird.clone()
    }
}

/// Advance the bird by `dt` seconds.  Gravity is added to the velocity
/// first (capped at the terminal fall speed), then the position
/// integrates the post-gravity velocity (semi-implicit Euler).  `y` is
/// never clamped here; leaving the screen is the collision layer's call.
pub fn advance_bird(bird: &Bird, dt: f64, cfg: &Config) -> Bird {
    let dt = sanitize_dt(dt);
    let velocity = (bird.velocity + cfg.gravity * dt).min(cfg.max_velocity);
    Bird {
        y: bird.y + velocity * dt,
        velocity,
        ..bird.clone()
    }
}

/// The bird's collision box is its own rectangle, with no hitbox margin.
pub fn bird_bounding_box(bird: &Bird) -> BoundingBox {
    BoundingBox {
        x: bird.x,
        y: bird.y,
        width: bird.width,
        height: bird.height,
    }
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

/// Spawn a pipe at the right screen edge.  The gap center is uniformly
/// random in the inclusive `[min_gap_y, max_gap_y]` range, independent of
/// `gap_height`: a wide gap drawn near an extreme can poke past the
/// screen edge, and the collision rects preserve that rather than clamp.
pub fn create_pipe(gap_height: f64, cfg: &Config, rng: &mut impl Rng) -> Pipe {
    Pipe {
        x: cfg.screen_width,
        gap_y: rng.gen_range(cfg.min_gap_y..=cfg.max_gap_y),
        gap_height,
        width: cfg.pipe_width,
        passed: false,
    }
}

/// Scroll the pipe left by `scroll_speed` world units per second.
pub fn advance_pipe(pipe: &Pipe, dt: f64, scroll_speed: f64) -> Pipe {
    Pipe {
        x: pipe.x - scroll_speed * sanitize_dt(dt),
        ..pipe.clone()
    }
}

/// True once the pipe's right edge has fully left the screen.
pub fn pipe_off_screen(pipe: &Pipe) -> bool {
    pipe.x < -pipe.width
}

/// Solid rectangle above the gap, from the screen top down to the gap.
pub fn top_rect(pipe: &Pipe) -> BoundingBox {
    BoundingBox {
        x: pipe.x,
        y: 0.0,
        width: pipe.width,
        height: pipe.gap_y - pipe.gap_height / 2.0,
    }
}

/// Solid rectangle below the gap, down to the screen bottom.
pub fn bottom_rect(pipe: &Pipe, cfg: &Config) -> BoundingBox {
    let gap_bottom = pipe.gap_y + pipe.gap_height / 2.0;
    BoundingBox {
        x: pipe.x,
        y: gap_bottom,
        width: pipe.width,
        height: cfg.screen_height - gap_bottom,
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// Strict AABB overlap.  Rectangles that merely touch along an edge do
/// not overlap.
pub fn rects_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

/// True when the box pokes above the screen top or below the bottom.
/// Resting exactly on either edge is still in bounds.
pub fn out_of_bounds(bird_box: &BoundingBox, cfg: &Config) -> bool {
    bird_box.y < 0.0 || bird_box.y + bird_box.height > cfg.screen_height
}

// ── Phase transitions (unguarded) ─────────────────────────────────────────────
//
// These mirror the raw phase moves; the guarded intent functions below
// decide when each of them may fire.

/// The state the program boots into: menu phase, middle preset, fresh
/// bird, no pipes.
pub fn new_game_state(cfg: &Config) -> GameState {
    GameState {
        phase: GamePhase::Menu,
        difficulty: difficulty_preset(DifficultyLevel::Middle),
        score: 0,
        bird: create_bird(cfg),
        pipes: Vec::new(),
    }
}

/// Enter play with the chosen preset and everything else reset.
pub fn transition_to_playing(
    state: &GameState,
    level: DifficultyLevel,
    cfg: &Config,
) -> GameState {
    GameState {
        phase: GamePhase::Playing,
        difficulty: difficulty_preset(level),
        ..transition_to_menu(state, cfg)
    }
}

/// Freeze play into the game-over phase.  Score, bird and pipes stay as
/// the caller left them, so the final screen shows the crash as it was.
pub fn transition_to_game_over(state: &GameState) -> GameState {
    GameState {
        phase: GamePhase::GameOver,
        ..state.clone()
    }
}

/// Phase flip only; bird, pipes and score are untouched.
pub fn transition_to_paused(state: &GameState) -> GameState {
    GameState {
        phase: GamePhase::Paused,
        ..state.clone()
    }
}

/// Phase flip only, back into play.
pub fn transition_to_resumed(state: &GameState) -> GameState {
    GameState {
        phase: GamePhase::Playing,
        ..state.clone()
    }
}

/// Back to the menu with score, bird and pipes reset.  The difficulty
/// selection carries over as the menu's remembered choice.
pub fn transition_to_menu(state: &GameState, cfg: &Config) -> GameState {
    GameState {
        phase: GamePhase::Menu,
        score: 0,
        bird: create_bird(cfg),
        pipes: Vec::new(),
        ..state.clone()
    }
}

// ── Intents (guarded by the phase table) ──────────────────────────────────────
//
// Each intent has exactly one phase it acts in; in every other phase it
// returns the state unchanged.  That silent pass-through is a designed
// no-op, not an error.

/// Flap intent: only a playing bird flaps.
pub fn flap(state: &GameState, cfg: &Config) -> GameState {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }
    GameState {
        bird: flap_bird(&state.bird, cfg),
        ..state.clone()
    }
}

/// Difficulty selection: only acts on the menu screen, where it starts a
/// run at the chosen level.
pub fn select_difficulty(state: &GameState, level: DifficultyLevel, cfg: &Config) -> GameState {
    if state.phase != GamePhase::Menu {
        return state.clone();
    }
    transition_to_playing(state, level, cfg)
}

/// Pause intent: only a playing game can pause.
pub fn pause(state: &GameState) -> GameState {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }
    transition_to_paused(state)
}

/// Resume intent: only a paused game can resume.
pub fn resume(state: &GameState) -> GameState {
    if state.phase != GamePhase::Paused {
        return state.clone();
    }
    transition_to_resumed(state)
}

/// Restart intent: from the game-over screen back to the menu.
pub fn restart(state: &GameState, cfg: &Config) -> GameState {
    if state.phase != GamePhase::GameOver {
        return state.clone();
    }
    transition_to_menu(state, cfg)
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt` seconds.  A no-op in any
/// phase but Playing.
///
/// The bird moves first.  If it has left the screen the frame ends right
/// there in the game-over phase, carrying the updated bird and an empty
/// pipe list (no pipe has been processed yet this frame).  Otherwise each
/// pipe is, in spawn order: scrolled, collision-checked against the bird,
/// scored once its trailing edge passes the bird's column, and dropped
/// once fully off screen.  A mid-loop collision ends the frame with the
/// pipes accumulated so far and the score from the start of the frame;
/// pipes not yet reached are dropped with it.  The game-over screen shows
/// exactly this partial view, so the early exit must stay as is.
pub fn tick(state: &GameState, dt: f64, cfg: &Config) -> GameState {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }

    let bird = advance_bird(&state.bird, dt, cfg);
    let bird_box = bird_bounding_box(&bird);

    if out_of_bounds(&bird_box, cfg) {
        return transition_to_game_over(&GameState {
            bird,
            pipes: Vec::new(),
            ..state.clone()
        });
    }

    let mut score = state.score;
    let mut kept: Vec<Pipe> = Vec::new();

    for pipe in &state.pipes {
        let mut moved = advance_pipe(pipe, dt, state.difficulty.scroll_speed);

        if rects_overlap(&bird_box, &top_rect(&moved))
            || rects_overlap(&bird_box, &bottom_rect(&moved, cfg))
        {
            // Score gains from pipes already passed this frame are
            // discarded along with the unprocessed tail of the list.
            return transition_to_game_over(&GameState {
                bird,
                pipes: kept,
                ..state.clone()
            });
        }

        if !moved.passed && moved.x + moved.width < cfg.bird_start_x {
            moved.passed = true;
            score += 1;
        }

        if !pipe_off_screen(&moved) {
            kept.push(moved);
        }
    }

    GameState {
        bird,
        pipes: kept,
        score,
        ..state.clone()
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Append one pipe built from the active difficulty's gap height.  Called
/// by the driver on its spawn timer, never from `tick` itself, so the
/// cadence stays a driver concern.
pub fn spawn_pipe(state: &GameState, cfg: &Config, rng: &mut impl Rng) -> GameState {
    let mut pipes = state.pipes.clone();
    pipes.push(create_pipe(state.difficulty.gap_height, cfg, rng));
    GameState {
        pipes,
        ..state.clone()
    }
}
