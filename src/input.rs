/// Input layer — translates raw terminal key events into the abstract
/// intents the simulation understands, plus `Quit` for the driver itself.
///
/// The mapping depends on the current phase (the same key flaps, resumes
/// or restarts depending on where the game is), but it is a pure lookup:
/// no state lives here beyond the reader thread's channel.

use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use flappy_game::entities::{DifficultyLevel, GamePhase};

#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Flap,
    SelectDifficulty(DifficultyLevel),
    Pause,
    Resume,
    Restart,
    /// Driver-level: tear down and exit. Not a simulation intent.
    Quit,
}

/// Map one key event to an intent under the given phase, or `None` when
/// the key means nothing there.  Only `Press` events count; repeats and
/// releases are ignored so a held key cannot machine-gun flaps.
pub fn map_key(phase: &GamePhase, key: &KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Quit works from every phase.
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Intent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Intent::Quit)
        }
        _ => {}
    }

    match phase {
        GamePhase::Menu => match key.code {
            KeyCode::Char('1') => Some(Intent::SelectDifficulty(DifficultyLevel::Low)),
            KeyCode::Char('2') => Some(Intent::SelectDifficulty(DifficultyLevel::Middle)),
            KeyCode::Char('3') => Some(Intent::SelectDifficulty(DifficultyLevel::High)),
            _ => None,
        },
        GamePhase::Playing => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Some(Intent::Flap),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::Pause),
            _ => None,
        },
        GamePhase::Paused => match key.code {
            KeyCode::Char(' ')
            | KeyCode::Enter
            | KeyCode::Up
            | KeyCode::Char('p')
            | KeyCode::Char('P') => Some(Intent::Resume),
            _ => None,
        },
        GamePhase::GameOver => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Some(Intent::Restart),
            _ => None,
        },
    }
}

/// Dedicate a thread exclusively to blocking event reads, sending them
/// through a channel so the frame loop never has to block on I/O.  The
/// thread exits on its own once the receiver is dropped.
pub fn spawn_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });
    rx
}
