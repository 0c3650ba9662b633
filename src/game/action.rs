use serde::{Deserialize, Serialize};

/// Movement axis on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Direction the snake can move
///
/// `None` is the resting direction after a reset, before any input arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn axis(&self) -> Option<Axis> {
        match self {
            Direction::Up | Direction::Down => Some(Axis::Vertical),
            Direction::Left | Direction::Right => Some(Axis::Horizontal),
            Direction::None => None,
        }
    }

    /// Whether a snake moving in `self` may be steered towards `requested`.
    ///
    /// Only a change of axis is accepted. This rules out reversals and
    /// same-axis repeats, while any real direction is accepted from rest.
    pub fn accepts(&self, requested: Direction) -> bool {
        match requested.axis() {
            Some(axis) => self.axis() != Some(axis),
            None => false,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Direction::None
    }
}
