use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::core::console::Console;
use crate::core::game::{TerminalGame, TurnOutcome};
use crate::core::terminal::TerminalContext;

pub struct Engine<G: TerminalGame> {
    game: G,
    skip_intro: bool,
}

impl<G: TerminalGame> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game, skip_intro: false }
    }

    pub fn skip_intro(mut self, skip: bool) -> Self {
        self.skip_intro = skip;
        self
    }

    /// Drive the game to completion and hand it back for inspection.
    pub fn run<C: Console, W: Write>(
        mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<G> {
        info!(game = G::NAME, "session started");

        let mut outcome = TurnOutcome::Continue;
        if !self.skip_intro {
            outcome = self.game.intro(console, ctx)?;
        }

        let mut turns = 0usize;
        while outcome == TurnOutcome::Continue && !self.game.is_finished() {
            outcome = self.game.play_turn(console, ctx)?;
            turns += 1;
        }

        if outcome == TurnOutcome::Quit {
            info!(turns, "session ended early");
        }

        self.game.finish(console, ctx)?;
        ctx.flush()?;

        info!(game = G::NAME, turns, "session finished");
        Ok(self.game)
    }
}
