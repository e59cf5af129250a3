pub mod jeopardy;

/// Metadata about a game
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub min_players: usize,
    pub max_players: usize,
}

impl GameInfo {
    pub fn of<G: crate::core::game::TerminalGame>(id: &'static str) -> Self {
        Self {
            id,
            name: G::NAME,
            description: G::DESCRIPTION,
            min_players: G::MIN_PLAYERS,
            max_players: G::MAX_PLAYERS,
        }
    }
}
