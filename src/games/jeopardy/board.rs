use serde::Serialize;
use thiserror::Error;

/// Dollar step between consecutive questions in a category.
pub const DOLLAR_STEP: u32 = 100;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Cannot find column with category: {0}")]
    CategoryNotFound(String),

    #[error("Cannot find tile with dollar: {0}")]
    TileNotFound(u32),

    #[error("'{field}' is not a key in {category}'s element {index}")]
    MissingField {
        category: String,
        index: usize,
        field: &'static str,
    },

    #[error("'{0}' is not a column in your csv")]
    MissingColumn(&'static str),

    #[error("Malformed question source: {0}")]
    Malformed(String),

    #[error("Unsupported question file {0}, expected .json or .csv")]
    UnsupportedFormat(String),

    #[error("Failed to read question source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Question source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Question source is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A single question cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub question: String,
    pub answer: String,
    pub dollar: u32,
    done: bool,
}

impl Tile {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, dollar: u32) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            dollar,
            done: false,
        }
    }

    /// Filler used to square up short columns. Never playable.
    pub fn blank() -> Self {
        Self {
            question: String::new(),
            answer: String::new(),
            dollar: 0,
            done: true,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Cell text on the board: the remaining value, or `X` once played.
    pub fn label(&self) -> String {
        if self.done {
            "X".to_string()
        } else {
            format_thousands(i64::from(self.dollar))
        }
    }
}

/// One category's tiles, top (cheapest) to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub category: String,
    tiles: Vec<Tile>,
}

impl Column {
    pub fn new(category: impl Into<String>, tiles: Vec<Tile>) -> Self {
        Self { category: category.into(), tiles }
    }

    /// Build a column from question/answer pairs, valuing them 100, 200, ...
    pub fn from_pairs<I, Q, A>(category: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        let tiles = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (q, a))| Tile::new(q, a, dollar_for_row(i)))
            .collect();
        Self::new(category, tiles)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn all_done(&self) -> bool {
        self.tiles.iter().all(Tile::is_done)
    }

    pub fn dollars(&self) -> Vec<u32> {
        self.tiles.iter().map(|t| t.dollar).collect()
    }

    pub fn dollars_playable(&self) -> Vec<u32> {
        self.tiles.iter().filter(|t| !t.done).map(|t| t.dollar).collect()
    }

    fn fill_blank_tiles(&mut self, rows: usize) {
        if self.tiles.len() < rows {
            self.tiles.resize_with(rows, Tile::blank);
        }
    }

    pub fn get_tile(&self, dollar: u32) -> Result<&Tile, BoardError> {
        self.tiles
            .iter()
            .find(|t| t.dollar == dollar)
            .ok_or(BoardError::TileNotFound(dollar))
    }

    pub fn get_tile_mut(&mut self, dollar: u32) -> Result<&mut Tile, BoardError> {
        self.tiles
            .iter_mut()
            .find(|t| t.dollar == dollar)
            .ok_or(BoardError::TileNotFound(dollar))
    }
}

/// The playing grid. Every column has the same number of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// Square up the grid by padding short columns with blank tiles.
    pub fn new(mut columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(Column::len).max().unwrap_or(0);
        for column in &mut columns {
            column.fill_blank_tiles(rows);
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn all_done(&self) -> bool {
        self.columns.iter().all(Column::all_done)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.category.as_str()).collect()
    }

    /// Categories that still have at least one unplayed tile.
    pub fn categories_playable(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !c.all_done())
            .map(|c| c.category.as_str())
            .collect()
    }

    pub fn get_column(&self, category: &str) -> Result<&Column, BoardError> {
        self.columns
            .iter()
            .find(|c| c.category == category)
            .ok_or_else(|| BoardError::CategoryNotFound(category.to_string()))
    }

    pub fn get_column_mut(&mut self, category: &str) -> Result<&mut Column, BoardError> {
        self.columns
            .iter_mut()
            .find(|c| c.category == category)
            .ok_or_else(|| BoardError::CategoryNotFound(category.to_string()))
    }
}

/// Value of the question at zero-based `row`.
pub fn dollar_for_row(row: usize) -> u32 {
    u32::try_from(row + 1).map_or(u32::MAX, |r| r.saturating_mul(DOLLAR_STEP))
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
