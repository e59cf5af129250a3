/// Core game interface for console games
use std::io::Write;

use anyhow::Result;

use crate::core::console::Console;
use crate::core::terminal::TerminalContext;

/// What the engine should do after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Keep playing (also used when a turn was abandoned with BACK).
    Continue,
    /// A player asked to end the session.
    Quit,
}

/// Main game trait that all console games implement.
///
/// The engine owns the loop; the game owns its state and decides when it
/// is finished.
pub trait TerminalGame {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const MIN_PLAYERS: usize;
    const MAX_PLAYERS: usize;

    /// Opening sequence shown once before the first turn.
    fn intro<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<TurnOutcome>;

    /// Play a single turn, prompting until it completes or is abandoned.
    fn play_turn<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<TurnOutcome>;

    fn is_finished(&self) -> bool;

    /// Closing sequence: final standings and the winner.
    fn finish<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<()>;
}
