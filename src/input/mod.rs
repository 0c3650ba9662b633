pub mod handler;

pub use handler::{InputHandler, KeyAction, swipe_direction};
