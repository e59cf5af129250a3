/// Terminal output context that handles the low-level escape sequences
use crossterm::{
    cursor,
    style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};
use std::io::{self, Stdout, Write};

/// Line-oriented writer over any `Write`, with colour and screen clearing.
///
/// The game renders through this instead of `println!` so tests can capture
/// everything in a `Vec<u8>`.
pub struct TerminalContext<W: Write = Stdout> {
    out: W,
    clears: bool,
}

impl TerminalContext<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout(), clears: true }
    }
}

impl<W: Write> TerminalContext<W> {
    /// Wrap an arbitrary writer. Screen clears are skipped so captured
    /// output stays readable.
    pub fn new(out: W) -> Self {
        Self { out, clears: false }
    }

    /// Clear the entire screen and home the cursor
    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.clears {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.out.queue(cursor::MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn print_colored_line(&mut self, text: &str, color: TerminalColor) -> io::Result<()> {
        self.out.queue(SetForegroundColor(color.into()))?;
        writeln!(self.out, "{}", text)?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    /// Large, bold announcement with an underline rule.
    pub fn banner(&mut self, text: &str) -> io::Result<()> {
        let rule = "═".repeat(text.chars().count().max(8) + 4);

        self.out.queue(SetForegroundColor(Color::Cyan))?;
        self.out.queue(SetAttribute(Attribute::Bold))?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "  {}", text)?;
        writeln!(self.out, "{}", rule)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    pub fn empty_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Flush all output at once - call this at the end of render
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TerminalColor {
    Red,
    Green,
    Yellow,
    Default,
}

impl From<TerminalColor> for Color {
    fn from(color: TerminalColor) -> Self {
        match color {
            TerminalColor::Red => Color::Red,
            TerminalColor::Green => Color::Green,
            TerminalColor::Yellow => Color::Yellow,
            TerminalColor::Default => Color::Reset,
        }
    }
}
