/// Game renderer trait
use std::io::{self, Write};

use crate::core::terminal::TerminalContext;

/// Draws a game's state; holds no game logic.
pub trait GameRenderer<State> {
    fn render<W: Write>(&self, state: &State, ctx: &mut TerminalContext<W>) -> io::Result<()>;
}
