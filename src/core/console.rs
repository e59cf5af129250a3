/// Line-oriented input for console games
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context as _, Result};
use dialoguer::{theme::ColorfulTheme, Input};

/// Source of player input, one line per prompt.
///
/// Games never read stdin directly so a session can be replayed from a
/// script in tests.
pub trait Console {
    /// Show `prompt` and block until a line is entered.
    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Console backed by the process's stdin.
///
/// Uses dialoguer prompts on an interactive terminal and plain buffered
/// reads when stdin is piped.
pub struct TerminalConsole {
    interactive: bool,
    theme: ColorfulTheme,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
            theme: ColorfulTheme::default(),
        }
    }

    fn read_piped(prompt: &str) -> Result<Option<String>> {
        let mut out = io::stdout();
        write!(out, "{} ", prompt)?;
        out.flush()?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if !self.interactive {
            return Self::read_piped(prompt);
        }

        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt.trim_end())
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(line) => Ok(Some(line)),
            // Ctrl-D / closed terminal
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e).context("failed to read from terminal"),
        }
    }
}

/// Console that replays a fixed list of lines and records every prompt.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
