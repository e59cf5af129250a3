use std::io::Write;

use anyhow::Result;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::board::{format_thousands, Board, BoardError, Column};
use super::player::Player;
use super::renderer::JeopardyRenderer;
use crate::core::console::Console;
use crate::core::game::{TerminalGame, TurnOutcome};
use crate::core::renderer::GameRenderer;
use crate::core::terminal::TerminalContext;

pub const BACK: &str = "BACK";
pub const QUIT: &str = "QUIT";
pub const SKIP: &str = "SKIP";

/// Words intercepted at prompts before any name lookup.
pub const RESERVED: [&str; 3] = [BACK, QUIT, SKIP];

const YES: [&str; 5] = ["y", "Y", "yes", "Yes", "YES"];
const NO: [&str; 5] = ["n", "N", "no", "No", "NO"];

#[derive(Debug, Error)]
pub enum GameError {
    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("Player names must be unique, {0} appears twice")]
    DuplicatePlayer(String),

    #[error("{0} is a reserved word and cannot be a player name")]
    ReservedName(String),

    #[error("No player with index {0}")]
    UnknownPlayer(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Result of checking one line of input at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Accept(T),
    Back,
    Quit,
    Skip,
    /// Not acceptable; re-prompt, prefixed by the reason when non-empty.
    Reject(&'static str),
}

/// Board, players and board control. Every rule lives here; prompting
/// lives in [`JeopardyGame`].
#[derive(Debug, Clone)]
pub struct JeopardyState {
    pub topic: String,
    pub board: Board,
    players: Vec<Player>,
    board_control: usize,
}

impl JeopardyState {
    /// Start a game with board control given to a random player.
    pub fn new<R: Rng>(
        topic: impl Into<String>,
        board: Board,
        players: Vec<Player>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let control = rng.random_range(0..players.len());
        Self::with_control(topic, board, players, control)
    }

    pub fn with_control(
        topic: impl Into<String>,
        board: Board,
        players: Vec<Player>,
        board_control: usize,
    ) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        for (i, player) in players.iter().enumerate() {
            if RESERVED.contains(&player.name.as_str()) {
                return Err(GameError::ReservedName(player.name.clone()));
            }
            if players[..i].iter().any(|p| p.name == player.name) {
                return Err(GameError::DuplicatePlayer(player.name.clone()));
            }
        }
        if board_control >= players.len() {
            return Err(GameError::UnknownPlayer(board_control));
        }

        Ok(Self {
            topic: topic.into(),
            board,
            players,
            board_control,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// The player who picks the next question.
    pub fn board_control(&self) -> &Player {
        &self.players[self.board_control]
    }

    pub fn is_finished(&self) -> bool {
        self.board.all_done()
    }

    pub fn check_category(&self, input: &str) -> Choice<String> {
        match input {
            BACK => Choice::Back,
            QUIT => Choice::Quit,
            _ => {
                if !self.board.categories().contains(&input) {
                    Choice::Reject("That is not a category.")
                } else if !self.board.categories_playable().contains(&input) {
                    Choice::Reject("There are no more questions for that category.")
                } else {
                    Choice::Accept(input.to_string())
                }
            }
        }
    }

    pub fn check_dollar(column: &Column, input: &str) -> Choice<u32> {
        if input == BACK {
            return Choice::Back;
        }
        let digits = input.strip_prefix(['-', '+']).unwrap_or(input);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Choice::Reject("Enter a number.");
        }

        // Negative or oversized amounts are numbers, just never on the board.
        match input.parse::<u32>() {
            Ok(dollar) if column.dollars_playable().contains(&dollar) => Choice::Accept(dollar),
            Ok(dollar) if column.dollars().contains(&dollar) => {
                Choice::Reject("That amount has already been won.")
            }
            _ => Choice::Reject("Not a possible dollar amount."),
        }
    }

    /// Who is answering. Players in `answered` already had their go.
    pub fn check_player(&self, input: &str, answered: &[usize]) -> Choice<usize> {
        if input == SKIP {
            return Choice::Skip;
        }
        match self.players.iter().position(|p| p.name == input) {
            Some(i) if answered.contains(&i) => Choice::Reject("Already answered."),
            Some(i) => Choice::Accept(i),
            None => Choice::Reject("Not a player."),
        }
    }

    pub fn check_verdict(input: &str) -> Choice<bool> {
        if input == BACK {
            Choice::Back
        } else if YES.contains(&input) {
            Choice::Accept(true)
        } else if NO.contains(&input) {
            Choice::Accept(false)
        } else {
            Choice::Reject("")
        }
    }

    /// Credit or debit `player` by the tile's value. A correct answer also
    /// takes board control. The tile stays open until [`Self::close_tile`].
    pub fn score(
        &mut self,
        player: usize,
        category: &str,
        dollar: u32,
        correct: bool,
    ) -> Result<i64, GameError> {
        let value = i64::from(self.board.get_column(category)?.get_tile(dollar)?.dollar);
        let delta = if correct { value } else { -value };

        let answering = self
            .players
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        answering.award_money(delta);

        info!(
            player = %answering.name,
            category,
            dollar,
            correct,
            earnings = answering.earnings,
            "answer scored"
        );

        if correct {
            self.board_control = player;
        }
        Ok(delta)
    }

    pub fn close_tile(&mut self, category: &str, dollar: u32) -> Result<(), GameError> {
        self.board
            .get_column_mut(category)?
            .get_tile_mut(dollar)?
            .mark_done();
        Ok(())
    }

    /// Highest earnings; ties go to whoever joined first.
    pub fn winner(&self) -> Option<&Player> {
        self.players
            .iter()
            .reduce(|best, p| if p.earnings > best.earnings { p } else { best })
    }
}

/// Console front end over [`JeopardyState`].
pub struct JeopardyGame {
    state: JeopardyState,
    renderer: JeopardyRenderer,
    pause: bool,
}

impl JeopardyGame {
    pub fn new(state: JeopardyState) -> Self {
        Self {
            state,
            renderer: JeopardyRenderer,
            pause: false,
        }
    }

    /// Wait for Enter after each reveal and announcement.
    pub fn pause(mut self, pause: bool) -> Self {
        self.pause = pause;
        self
    }

    pub fn state(&self) -> &JeopardyState {
        &self.state
    }

    pub fn into_state(self) -> JeopardyState {
        self.state
    }

    fn wait<C: Console>(&self, console: &mut C, prompt: &str) -> Result<TurnOutcome> {
        if self.pause && console.read_line(prompt)?.is_none() {
            return Ok(TurnOutcome::Quit);
        }
        Ok(TurnOutcome::Continue)
    }

    /// Question on screen while players buzz in. Ends on a correct answer,
    /// SKIP, or once everyone has answered.
    fn take_answers<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
        category: &str,
        dollar: u32,
    ) -> Result<TurnOutcome> {
        let question = self
            .state
            .board
            .get_column(category)?
            .get_tile(dollar)?
            .question
            .clone();
        let mut answered: Vec<usize> = Vec::new();

        while answered.len() < self.state.players().len() {
            ctx.clear_screen()?;
            self.renderer.render_earnings(&self.state, ctx)?;
            ctx.print_line(&format!("{} for ${}", category, format_thousands(i64::from(dollar))))?;
            ctx.banner(&question)?;
            ctx.flush()?;

            let state = &self.state;
            let player = match prompt_until(console, "Who?", |input| {
                state.check_player(input, &answered)
            })? {
                Choice::Accept(player) => player,
                Choice::Quit => return Ok(TurnOutcome::Quit),
                Choice::Skip | Choice::Back | Choice::Reject(_) => break,
            };

            match prompt_until(console, "Correct?", JeopardyState::check_verdict)? {
                Choice::Accept(correct) => {
                    self.state.score(player, category, dollar, correct)?;
                    answered.push(player);
                    if correct {
                        break;
                    }
                }
                Choice::Quit => return Ok(TurnOutcome::Quit),
                Choice::Back | Choice::Skip | Choice::Reject(_) => continue,
            }
        }

        Ok(TurnOutcome::Continue)
    }

    fn reveal<C: Console, W: Write>(
        &self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
        category: &str,
        dollar: u32,
    ) -> Result<TurnOutcome> {
        let tile = self.state.board.get_column(category)?.get_tile(dollar)?;

        ctx.clear_screen()?;
        ctx.print_line(&tile.question)?;
        ctx.empty_line()?;
        ctx.banner(&tile.answer)?;
        ctx.flush()?;

        self.wait(console, "Press Enter to continue")
    }
}

impl TerminalGame for JeopardyGame {
    const NAME: &'static str = "Jeopardy";
    const DESCRIPTION: &'static str = "Pick a category and a dollar amount, then answer the clue";
    const MIN_PLAYERS: usize = 1;
    const MAX_PLAYERS: usize = 8;

    fn intro<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<TurnOutcome> {
        ctx.clear_screen()?;
        ctx.banner("Welcome to Jeopardy!")?;
        ctx.banner(&format!("Tonight's topic is {}", self.state.topic))?;

        let players = self.state.players();
        ctx.print_line(if players.len() > 1 { "Our players are" } else { "Our player is" })?;
        for player in players {
            ctx.print_line(&format!("  {}", player.name))?;
        }

        let categories = self.state.board.categories();
        ctx.print_line(if categories.len() > 1 { "The categories are" } else { "The category is" })?;
        for category in categories {
            ctx.print_line(&format!("  {}", category))?;
        }

        ctx.banner("Good luck!")?;
        ctx.flush()?;

        self.wait(console, "Press Enter to begin")
    }

    fn play_turn<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<TurnOutcome> {
        ctx.clear_screen()?;
        self.renderer.render(&self.state, ctx)?;
        ctx.flush()?;

        let state = &self.state;
        let category = match prompt_until(console, "Select a category:", |input| {
            state.check_category(input)
        })? {
            Choice::Accept(category) => category,
            Choice::Quit => return Ok(TurnOutcome::Quit),
            Choice::Back | Choice::Skip | Choice::Reject(_) => return Ok(TurnOutcome::Continue),
        };

        let column = state.board.get_column(&category)?;
        let dollar = match prompt_until(console, "Choose a dollar amount:", |input| {
            JeopardyState::check_dollar(column, input)
        })? {
            Choice::Accept(dollar) => dollar,
            Choice::Quit => return Ok(TurnOutcome::Quit),
            Choice::Back | Choice::Skip | Choice::Reject(_) => return Ok(TurnOutcome::Continue),
        };

        debug!(
            control = %self.state.board_control().name,
            %category,
            dollar,
            "question selected"
        );

        let answered = self.take_answers(console, ctx, &category, dollar)?;
        self.state.close_tile(&category, dollar)?;

        let revealed = self.reveal(console, ctx, &category, dollar)?;
        if answered == TurnOutcome::Quit {
            return Ok(TurnOutcome::Quit);
        }
        Ok(revealed)
    }

    fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    fn finish<C: Console, W: Write>(
        &mut self,
        console: &mut C,
        ctx: &mut TerminalContext<W>,
    ) -> Result<()> {
        ctx.clear_screen()?;
        self.renderer.render_earnings(&self.state, ctx)?;

        if let Some(winner) = self.state.winner() {
            info!(winner = %winner.name, earnings = winner.earnings, "game over");
            ctx.banner(&format!("Congratulations {}!", winner.name))?;
        }
        ctx.flush()?;

        self.wait(console, "Press Enter to exit")?;
        Ok(())
    }
}

/// Prompt until `check` accepts the input or a sentinel ends the prompt.
/// End of input counts as QUIT.
fn prompt_until<C, T>(
    console: &mut C,
    base: &str,
    mut check: impl FnMut(&str) -> Choice<T>,
) -> Result<Choice<T>>
where
    C: Console,
{
    let mut prompt = base.to_string();
    loop {
        let Some(line) = console.read_line(&prompt)? else {
            return Ok(Choice::Quit);
        };

        match check(line.trim()) {
            Choice::Reject(reason) => {
                debug!(input = %line, reason, "input rejected");
                prompt = if reason.is_empty() {
                    base.to_string()
                } else {
                    format!("{} {}", reason, base)
                };
            }
            choice => return Ok(choice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::ScriptedConsole;
    use crate::core::rng::game_rng;

    fn board() -> Board {
        Board::new(vec![
            Column::from_pairs("SCIENCE", [("H2O", "Water"), ("Fe", "Iron")]),
            Column::from_pairs("ART", [("Mona Lisa", "da Vinci")]),
        ])
    }

    fn players(names: &[&str]) -> Vec<Player> {
        names.iter().map(|n| Player::new(*n)).collect()
    }

    fn state(names: &[&str]) -> JeopardyState {
        JeopardyState::with_control("Trivia", board(), players(names), 0).unwrap()
    }

    #[test]
    fn test_setup_validation() {
        let mut rng = game_rng(Some(7));
        assert!(matches!(
            JeopardyState::new("T", board(), Vec::new(), &mut rng),
            Err(GameError::NoPlayers)
        ));
        assert!(matches!(
            JeopardyState::new("T", board(), players(&["A", "B", "A"]), &mut rng),
            Err(GameError::DuplicatePlayer(name)) if name == "A"
        ));
        assert!(matches!(
            JeopardyState::with_control("T", board(), players(&["A"]), 1),
            Err(GameError::UnknownPlayer(1))
        ));
    }

    #[test]
    fn test_sentinel_words_are_not_player_names() {
        for name in RESERVED {
            assert!(matches!(
                JeopardyState::with_control("T", board(), players(&[name, "Bob"]), 0),
                Err(GameError::ReservedName(n)) if n == name
            ));
        }
        // case matters, as it does at the prompts
        assert!(JeopardyState::with_control("T", board(), players(&["Skip", "Bob"]), 0).is_ok());
    }

    #[test]
    fn test_initial_control_is_seeded() {
        let names = ["A", "B", "C", "D"];
        let first = JeopardyState::new("T", board(), players(&names), &mut game_rng(Some(3)))
            .unwrap()
            .board_control()
            .name
            .clone();

        for _ in 0..5 {
            let again = JeopardyState::new("T", board(), players(&names), &mut game_rng(Some(3))).unwrap();
            assert_eq!(again.board_control().name, first);
        }
    }

    #[test]
    fn test_check_category() {
        let mut s = state(&["A"]);
        assert_eq!(s.check_category("BACK"), Choice::Back);
        assert_eq!(s.check_category("QUIT"), Choice::Quit);
        assert_eq!(s.check_category("SPORTS"), Choice::Reject("That is not a category."));
        assert_eq!(s.check_category("ART"), Choice::Accept("ART".to_string()));

        s.close_tile("ART", 100).unwrap();
        assert_eq!(
            s.check_category("ART"),
            Choice::Reject("There are no more questions for that category.")
        );
    }

    #[test]
    fn test_check_dollar() {
        let mut s = state(&["A"]);
        let check = |s: &JeopardyState, category: &str, input: &str| {
            JeopardyState::check_dollar(s.board.get_column(category).unwrap(), input)
        };

        assert_eq!(check(&s, "SCIENCE", "BACK"), Choice::Back);
        assert_eq!(check(&s, "SCIENCE", "lots"), Choice::Reject("Enter a number."));
        assert_eq!(check(&s, "SCIENCE", "300"), Choice::Reject("Not a possible dollar amount."));
        assert_eq!(check(&s, "SCIENCE", "-100"), Choice::Reject("Not a possible dollar amount."));
        assert_eq!(
            check(&s, "SCIENCE", "99999999999999999999999"),
            Choice::Reject("Not a possible dollar amount.")
        );
        assert_eq!(check(&s, "SCIENCE", "-"), Choice::Reject("Enter a number."));
        assert_eq!(check(&s, "SCIENCE", "1e3"), Choice::Reject("Enter a number."));
        assert_eq!(check(&s, "SCIENCE", "+100"), Choice::Accept(100));
        assert_eq!(check(&s, "SCIENCE", "200"), Choice::Accept(200));

        s.close_tile("SCIENCE", 200).unwrap();
        assert_eq!(
            check(&s, "SCIENCE", "200"),
            Choice::Reject("That amount has already been won.")
        );
        // padding tiles are never playable
        assert_eq!(check(&s, "ART", "0"), Choice::Reject("That amount has already been won."));
    }

    #[test]
    fn test_check_player_and_verdict() {
        let s = state(&["A", "B"]);
        assert_eq!(s.check_player("SKIP", &[]), Choice::Skip);
        assert_eq!(s.check_player("B", &[]), Choice::Accept(1));
        assert_eq!(s.check_player("B", &[1]), Choice::Reject("Already answered."));
        assert_eq!(s.check_player("Z", &[]), Choice::Reject("Not a player."));

        for yes in YES {
            assert_eq!(JeopardyState::check_verdict(yes), Choice::Accept(true));
        }
        for no in NO {
            assert_eq!(JeopardyState::check_verdict(no), Choice::Accept(false));
        }
        assert_eq!(JeopardyState::check_verdict("BACK"), Choice::Back);
        assert_eq!(JeopardyState::check_verdict("yep"), Choice::Reject(""));
    }

    #[test]
    fn test_correct_answer_takes_control() {
        let mut s = state(&["A", "B"]);
        assert_eq!(s.board_control().name, "A");

        assert_eq!(s.score(1, "SCIENCE", 200, true).unwrap(), 200);
        assert_eq!(s.player("B").unwrap().earnings, 200);
        assert_eq!(s.board_control().name, "B");
    }

    #[test]
    fn test_wrong_answer_costs_money_but_not_control() {
        let mut s = state(&["A", "B"]);

        assert_eq!(s.score(1, "SCIENCE", 100, false).unwrap(), -100);
        assert_eq!(s.player("B").unwrap().earnings, -100);
        assert_eq!(s.board_control().name, "A");
        assert!(!s.board.get_column("SCIENCE").unwrap().get_tile(100).unwrap().is_done());
        assert!(matches!(s.score(5, "SCIENCE", 100, true), Err(GameError::UnknownPlayer(5))));
    }

    #[test]
    fn test_finishes_only_when_every_tile_closed() {
        let mut s = state(&["A"]);
        for (category, dollar) in [("SCIENCE", 100), ("ART", 100)] {
            s.close_tile(category, dollar).unwrap();
            assert!(!s.is_finished());
        }
        s.close_tile("SCIENCE", 200).unwrap();
        assert!(s.is_finished());
    }

    #[test]
    fn test_winner_ties_go_to_first() {
        let mut s = state(&["A", "B", "C"]);
        s.players[0].award_money(10);
        s.players[1].award_money(50);
        s.players[2].award_money(50);
        assert_eq!(s.winner().unwrap().name, "B");
    }

    #[test]
    fn test_prompt_until_reprompts_with_reason() {
        let s = state(&["A"]);
        let mut console = ScriptedConsole::new(["SPORTS", "", "ART"]);

        let choice = prompt_until(&mut console, "Select a category:", |i| s.check_category(i)).unwrap();

        assert_eq!(choice, Choice::Accept("ART".to_string()));
        assert_eq!(
            console.prompts(),
            [
                "Select a category:",
                "That is not a category. Select a category:",
                "That is not a category. Select a category:",
            ]
        );
    }

    #[test]
    fn test_prompt_until_end_of_input_quits() {
        let mut console = ScriptedConsole::new(["maybe"]);
        let choice = prompt_until(&mut console, "Correct?", JeopardyState::check_verdict).unwrap();
        assert_eq!(choice, Choice::Quit);
        assert_eq!(console.prompts(), ["Correct?", "Correct?"]);
    }
}
