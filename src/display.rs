/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The fixed 400×600 world is scaled onto
/// whatever grid the terminal currently offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use flappy_game::compute::{bottom_rect, top_rect};
use flappy_game::entities::{
    Bird, BoundingBox, Config, DifficultyLevel, GamePhase, GameState,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_BIRD: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;
const C_BANNER: Color = Color::Red;

fn level_color(level: &DifficultyLevel) -> Color {
    match level {
        DifficultyLevel::Low => Color::Green,
        DifficultyLevel::Middle => Color::Yellow,
        DifficultyLevel::High => Color::Red,
    }
}

// ── World → terminal grid scaling ─────────────────────────────────────────────

struct Grid {
    cols: u16,
    rows: u16,
    sx: f64,
    sy: f64,
}

impl Grid {
    fn current(cfg: &Config) -> std::io::Result<Grid> {
        let (cols, rows) = terminal::size()?;
        Ok(Grid {
            cols,
            rows,
            sx: cols as f64 / cfg.screen_width,
            sy: rows as f64 / cfg.screen_height,
        })
    }

    fn col(&self, x: f64) -> i32 {
        (x * self.sx).round() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.sy).round() as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, cfg: &Config) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let grid = Grid::current(cfg)?;

    match state.phase {
        GamePhase::Menu => draw_menu(out, &grid)?,
        GamePhase::Playing => {
            draw_playfield(out, &grid, state, cfg)?;
            draw_hud(out, &grid, state)?;
        }
        GamePhase::Paused => {
            draw_playfield(out, &grid, state, cfg)?;
            draw_hud(out, &grid, state)?;
            draw_pause_banner(out, &grid)?;
        }
        GamePhase::GameOver => {
            draw_playfield(out, &grid, state, cfg)?;
            draw_hud(out, &grid, state)?;
            draw_game_over(out, &grid, state)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(
    out: &mut W,
    grid: &Grid,
    state: &GameState,
    cfg: &Config,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PIPE))?;
    for pipe in &state.pipes {
        draw_pipe_rect(out, grid, &top_rect(pipe))?;
        draw_pipe_rect(out, grid, &bottom_rect(pipe, cfg))?;
    }
    draw_bird(out, grid, &state.bird)?;
    Ok(())
}

/// One solid half of a pipe.  A gap drawn near the random-range extremes
/// can leave a rect with non-positive height; there is nothing to paint
/// for it.
fn draw_pipe_rect<W: Write>(out: &mut W, grid: &Grid, rect: &BoundingBox) -> std::io::Result<()> {
    if rect.height <= 0.0 {
        return Ok(());
    }
    let left = grid.col(rect.x).max(0);
    let right = grid.col(rect.x + rect.width).min(grid.cols as i32 - 1);
    let top = grid.row(rect.y).max(1); // row 0 is the HUD
    let bottom = grid.row(rect.y + rect.height).min(grid.rows as i32 - 2);

    for row in top..=bottom {
        for col in left..=right {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print("█"))?;
        }
    }
    Ok(())
}

fn draw_bird<W: Write>(out: &mut W, grid: &Grid, bird: &Bird) -> std::io::Result<()> {
    let col = grid.col(bird.x).clamp(0, grid.cols as i32 - 1) as u16;
    let row = grid
        .row(bird.y + bird.height / 2.0)
        .clamp(0, grid.rows as i32 - 1) as u16;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BIRD))?;
    // Beak tilts with the vertical velocity
    out.queue(Print(if bird.velocity < 0.0 { "◉⌃" } else { "◉⌄" }))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> std::io::Result<()> {
    // Score — centre
    let score_str = format!("Score: {}", state.score);
    let sx = (grid.cols / 2).saturating_sub(score_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    // Difficulty tag — right
    let tag = format!("[ {} ]", state.difficulty.level.name().to_uppercase());
    let tx = grid.cols.saturating_sub(tag.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(level_color(&state.difficulty.level)))?;
    out.queue(Print(&tag))?;

    // Controls hint — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Flap   P : Pause   Q : Quit"))?;

    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let cx = grid.cols / 2;
    let cy = grid.rows / 2;

    let title = "·•  FLAPPY  BIRD  •·";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Low   ", Color::Green,  "wide gap, gentle scroll"),
        ("2", "Middle", Color::Yellow, "the classic balance"),
        ("3", "High  ", Color::Red,    "narrow gap, fast pipes"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 4))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Flap   P : Pause   Q : Quit"))?;

    Ok(())
}

// ── Pause banner ──────────────────────────────────────────────────────────────

fn draw_pause_banner<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let lines: &[&str] = &[
        "╔══════════════╗",
        "║    PAUSED    ║",
        "╚══════════════╝",
    ];
    let cx = grid.cols / 2;
    let start_row = (grid.rows / 2).saturating_sub(2);

    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let hint = "SPACE - Resume  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> std::io::Result<()> {
    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];
    let score_line = format!("Final Score: {:>4}", state.score);
    let hint = "SPACE - Menu  Q - Quit";

    let cx = grid.cols / 2;
    let total_rows = lines.len() as u16 + 2;
    let start_row = (grid.rows / 2).saturating_sub(total_rows / 2);

    out.queue(style::SetForegroundColor(C_BANNER))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
