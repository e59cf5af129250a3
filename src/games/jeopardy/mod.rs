/// Jeopardy game module
pub mod board;
pub mod game;
pub mod loader;
pub mod player;
pub mod renderer;

pub use board::{Board, BoardError, Column, Tile};
pub use game::{Choice, GameError, JeopardyGame, JeopardyState};
pub use player::Player;
pub use renderer::JeopardyRenderer;
