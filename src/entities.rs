/// All game entity types - pure data, no game logic.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum DifficultyLevel {
    Low,
    Middle,
    High,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Error for a difficulty name that matches none of the three levels.
/// The core never falls back to a default on bad input.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown difficulty '{}' (expected low, middle or high)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDifficulty {}

impl DifficultyLevel {
    /// The identifier used on outward-facing surfaces (CLI argument).
    pub fn name(&self) -> &'static str {
        match self {
            DifficultyLevel::Low => "low",
            DifficultyLevel::Middle => "middle",
            DifficultyLevel::High => "high",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, UnknownDifficulty> {
        match name {
            "low" => Ok(DifficultyLevel::Low),
            "middle" => Ok(DifficultyLevel::Middle),
            "high" => Ok(DifficultyLevel::High),
            other => Err(UnknownDifficulty(other.to_string())),
        }
    }
}

/// One of the three fixed presets. Gap height shrinks and scroll speed
/// grows from Low to High; the spawn interval is driver-side cadence.
#[derive(Clone, Debug)]
pub struct Difficulty {
    pub level: DifficultyLevel,
    /// Vertical opening in each pipe, in world units.
    pub gap_height: f64,
    /// Leftward pipe speed in world units per second.
    pub scroll_speed: f64,
    /// Milliseconds between pipe spawns.
    pub spawn_interval_ms: u64,
}

// ── Moving bodies ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bird {
    /// Horizontal position. Fixed at creation, never changes afterwards.
    pub x: f64,
    pub y: f64,
    /// Vertical velocity, positive = downward.
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug)]
pub struct Pipe {
    /// Left edge. Only ever decreases as the pipe scrolls.
    pub x: f64,
    /// Vertical center of the gap.
    pub gap_y: f64,
    /// Fixed at creation from the active difficulty.
    pub gap_height: f64,
    pub width: f64,
    /// Flipped exactly once when the pipe clears the bird's column, so a
    /// pipe scores a single point.
    pub passed: bool,
}

/// Axis-aligned rectangle for overlap and boundary queries. Derived on
/// demand from birds and pipes, never stored in the game state.
#[derive(Clone, Debug)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub bird: Bird,
    /// Pipes in spawn order, which is also screen order left to right.
    pub pipes: Vec<Pipe>,
}

// ── World configuration ───────────────────────────────────────────────────────

/// Every world and physics constant in one place, so tests can override
/// single fields instead of fighting hardcoded literals. `Default` is the
/// 400x600 world the game ships with.
#[derive(Clone, Debug)]
pub struct Config {
    pub screen_width: f64,
    pub screen_height: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub bird_start_x: f64,
    pub bird_start_y: f64,
    /// Downward acceleration in world units per second squared.
    pub gravity: f64,
    /// Velocity a flap sets, negative = upward.
    pub flap_velocity: f64,
    /// Terminal fall speed. Gravity never accelerates past this; a flap
    /// may still set any upward velocity.
    pub max_velocity: f64,
    pub pipe_width: f64,
    /// Inclusive range the random gap center is drawn from.
    pub min_gap_y: f64,
    pub max_gap_y: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: 400.0,
            screen_height: 600.0,
            bird_width: 34.0,
            bird_height: 24.0,
            bird_start_x: 80.0,
            bird_start_y: 300.0,
            gravity: 1200.0,
            flap_velocity: -400.0,
            max_velocity: 600.0,
            pipe_width: 52.0,
            min_gap_y: 100.0,
            max_gap_y: 500.0,
        }
    }
}
