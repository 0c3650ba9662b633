//! Food placement on free cells

use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::GameError;
use super::state::{Position, Snake};

/// Random draws attempted before falling back to scanning the free cells
const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Pick a uniformly random cell that the snake does not occupy.
///
/// Rejection sampling is tried first since the board is mostly empty in
/// practice. A crowded board falls back to choosing among the enumerated free
/// cells, so placement always terminates.
pub fn place_food<R: Rng>(
    rng: &mut R,
    board_size: usize,
    snake: &Snake,
) -> Result<Position, GameError> {
    let area = board_size * board_size;
    if snake.len() >= area {
        return Err(GameError::BoardFull);
    }

    let size = board_size as i32;
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.contains(pos) {
            return Ok(pos);
        }
    }

    (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.contains(*pos))
        .choose(rng)
        .ok_or(GameError::BoardFull)
}
