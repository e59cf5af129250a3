use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::info;

use crate::core::console::TerminalConsole;
use crate::core::engine::Engine;
use crate::core::rng::game_rng;
use crate::core::terminal::TerminalContext;
use crate::games::jeopardy::renderer::board_lines;
use crate::games::jeopardy::game::RESERVED;
use crate::games::jeopardy::{Board, GameError, JeopardyGame, JeopardyState, Player};
use crate::games::GameInfo;

#[derive(Parser, Debug)]
#[command(name = "jeopardy")]
#[command(about = "Console Jeopardy for a room full of players")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Tracing filter, e.g. "info" or "jeopardy=debug". Logs go to stderr.
    #[arg(long, global = true, default_value = "warn")]
    pub log: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a game from a question file
    Play(PlayArgs),
    /// Print a board without playing it
    Show {
        /// Question file (.json or .csv)
        board: PathBuf,

        /// Keep at most this many questions per category
        #[arg(short = 'n', long)]
        max_questions: Option<usize>,

        /// Print the loaded board as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Question file (.json or .csv)
    pub board: PathBuf,

    /// Player name; repeat for each player
    #[arg(short, long = "player", required = true)]
    pub players: Vec<String>,

    /// Tonight's topic, announced in the intro
    #[arg(short, long, default_value = "Trivia")]
    pub topic: String,

    /// Keep at most this many questions per category
    #[arg(short = 'n', long)]
    pub max_questions: Option<usize>,

    /// Seed for picking who starts with the board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Jump straight to the first turn
    #[arg(long)]
    pub skip_intro: bool,

    /// Wait for Enter after each answer is revealed
    #[arg(long)]
    pub pause: bool,
}

pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Show { board, max_questions, json }) => show(&board, max_questions, json),
        // No subcommand provided - show interactive menu
        None => show_main_menu(),
    }
}

pub fn game_info() -> GameInfo {
    GameInfo::of::<JeopardyGame>("jeopardy")
}

pub fn play(args: PlayArgs) -> Result<()> {
    let players = validate_players(&args.players)?;
    let board = Board::from_file(&args.board, args.max_questions)
        .with_context(|| format!("failed to load board from {}", args.board.display()))?;

    let mut rng = game_rng(args.seed);
    let state = JeopardyState::new(args.topic, board, players, &mut rng)?;
    info!(control = %state.board_control().name, "board control drawn");

    let game = JeopardyGame::new(state).pause(args.pause);
    let mut console = TerminalConsole::new();
    let mut ctx = TerminalContext::stdout();

    Engine::new(game)
        .skip_intro(args.skip_intro)
        .run(&mut console, &mut ctx)?;
    Ok(())
}

fn show(path: &Path, max_questions: Option<usize>, json: bool) -> Result<()> {
    let board = Board::from_file(path, max_questions)
        .with_context(|| format!("failed to load board from {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        for line in board_lines(&board) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Trim names, drop blanks, refuse prompt keywords, and check the count
/// against the game's limits.
pub fn validate_players(names: &[String]) -> Result<Vec<Player>> {
    let info = game_info();
    let players: Vec<Player> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(Player::new)
        .collect();

    if players.len() < info.min_players || players.len() > info.max_players {
        bail!(
            "{} needs {}-{} players, got {}",
            info.name,
            info.min_players,
            info.max_players,
            players.len()
        );
    }
    if let Some(player) = players.iter().find(|p| RESERVED.contains(&p.name.as_str())) {
        return Err(GameError::ReservedName(player.name.clone()).into());
    }
    Ok(players)
}

/// Split "Ada, Bob" into names.
pub fn parse_player_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

fn show_main_menu() -> Result<()> {
    let info = game_info();
    println!("🎮 {}", info.name);
    println!("   {}", info.description);
    println!("   Players: {}-{}", info.min_players, info.max_players);
    println!();

    let theme = ColorfulTheme::default();
    let options = ["Play a game", "Show a board", "Exit"];

    let selection = Select::with_theme(&theme)
        .with_prompt("What would you like to do?")
        .items(&options[..])
        .default(0)
        .interact()?;

    match selection {
        0 => {
            let board: String = Input::with_theme(&theme)
                .with_prompt("Question file")
                .interact_text()?;

            let topic: String = Input::with_theme(&theme)
                .with_prompt("Topic")
                .default("Trivia".to_string())
                .interact_text()?;

            let names: String = Input::with_theme(&theme)
                .with_prompt("Players (comma separated)")
                .interact_text()?;

            play(PlayArgs {
                board: PathBuf::from(board),
                players: parse_player_list(&names),
                topic,
                max_questions: None,
                seed: None,
                skip_intro: false,
                pause: true,
            })
        }
        1 => {
            let board: String = Input::with_theme(&theme)
                .with_prompt("Question file")
                .interact_text()?;
            show(&PathBuf::from(board), None, false)
        }
        2 => {
            println!("👋 Goodbye!");
            Ok(())
        }
        _ => unreachable!(),
    }
}
