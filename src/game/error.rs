use thiserror::Error;

use super::action::Direction;
use super::state::GamePhase;

/// Expected game conditions reported back from engine commands.
///
/// None of these are failures: an `Err` means the command left the game
/// untouched and the caller is free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {command} while the game is {phase}")]
    InvalidTransition {
        command: &'static str,
        phase: GamePhase,
    },
    #[error("cannot turn {requested:?} while moving {current:?}")]
    RejectedDirection {
        requested: Direction,
        current: Direction,
    },
    #[error("no free cell left for food")]
    BoardFull,
}
