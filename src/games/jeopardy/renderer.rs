/// Jeopardy renderer - board grid and scoreboard
use std::io::{self, Write};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use super::board::Board;
use super::game::JeopardyState;
use crate::core::renderer::GameRenderer;
use crate::core::terminal::{TerminalColor, TerminalContext};

const COLUMN_SPACING: u16 = 1;

pub struct JeopardyRenderer;

impl GameRenderer<JeopardyState> for JeopardyRenderer {
    fn render<W: Write>(&self, state: &JeopardyState, ctx: &mut TerminalContext<W>) -> io::Result<()> {
        self.render_earnings(state, ctx)?;
        ctx.empty_line()?;
        ctx.print_colored_line(
            &format!("{}'s board", state.board_control().name),
            TerminalColor::Yellow,
        )?;
        for line in board_lines(&state.board) {
            ctx.print_line(&line)?;
        }
        Ok(())
    }
}

impl JeopardyRenderer {
    pub fn render_earnings<W: Write>(
        &self,
        state: &JeopardyState,
        ctx: &mut TerminalContext<W>,
    ) -> io::Result<()> {
        for player in state.players() {
            let color = match player.earnings {
                e if e > 0 => TerminalColor::Green,
                e if e < 0 => TerminalColor::Red,
                _ => TerminalColor::Default,
            };
            ctx.print_colored_line(&player.earnings_label(), color)?;
        }
        Ok(())
    }
}

/// Draw the board as a bordered table, one category per column, and
/// return it as plain text lines.
pub fn board_lines(board: &Board) -> Vec<String> {
    let columns = board.columns();
    if columns.is_empty() {
        return Vec::new();
    }

    let widths: Vec<u16> = columns
        .iter()
        .map(|c| {
            let widest = c
                .tiles()
                .iter()
                .map(|t| t.label().chars().count())
                .chain(std::iter::once(c.category.chars().count()))
                .max()
                .unwrap_or(0);
            to_u16(widest)
        })
        .collect();

    let header = Row::new(columns.iter().map(|c| Cell::from(c.category.clone())))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = (0..board.row_count()).map(|r| {
        Row::new(columns.iter().map(|c| Cell::from(c.tiles()[r].label())))
    });

    let table = Table::new(rows, widths.iter().map(|&w| Constraint::Length(w)))
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(Block::default().borders(Borders::ALL));

    // borders + content + gaps
    let width = widths
        .iter()
        .fold(2u16, |acc, w| acc.saturating_add(*w))
        .saturating_add(COLUMN_SPACING.saturating_mul(to_u16(widths.len() - 1)));
    let height = to_u16(board.row_count()).saturating_add(3);

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);

    (0..height)
        .map(|y| {
            let line: String = (0..width).map(|x| buf[(x, y)].symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
