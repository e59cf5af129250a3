//! Question source loading.
//!
//! The source is a JSON object mapping each category to its questions in
//! board order:
//!
//! ```json
//! {
//!   "SCIENCE": [
//!     { "Question": "The chemical symbol Fe", "Answer": "What is iron?" }
//!   ]
//! }
//! ```
//!
//! or a CSV file with `Category`, `Question` and `Answer` columns, one row
//! per question. CSV categories come out sorted by name; rows keep their
//! order within a category.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::board::{dollar_for_row, Board, BoardError, Column, Tile};
use super::game::{BACK, QUIT};

const CSV_COLUMNS: [&str; 3] = ["Category", "Question", "Answer"];

/// One entry as written in the file. Both fields are checked explicitly so
/// the error can name the category and position.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "Question")]
    question: Option<String>,
    #[serde(rename = "Answer")]
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Answer")]
    answer: String,
}

impl Board {
    /// Load a board, picking the format from the file extension.
    pub fn from_file(
        path: impl AsRef<Path>,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                Self::from_json_file(path, max_questions_per_category)
            }
            Some(ext) if ext.eq_ignore_ascii_case("csv") => {
                Self::from_csv_file(path, max_questions_per_category)
            }
            _ => Err(BoardError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load a board from a JSON file, keeping at most
    /// `max_questions_per_category` questions per category.
    pub fn from_json_file(
        path: impl AsRef<Path>,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let board = Self::from_json_str(&text, max_questions_per_category)?;

        info!(
            path = %path.display(),
            categories = board.column_count(),
            rows = board.row_count(),
            "board loaded"
        );
        Ok(board)
    }

    pub fn from_json_str(
        text: &str,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        let data: Value = serde_json::from_str(text)?;
        Self::from_json_value(data, max_questions_per_category)
    }

    pub fn from_json_value(
        data: Value,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        let Value::Object(categories) = data else {
            return Err(BoardError::Malformed(
                "top level must be an object of categories".to_string(),
            ));
        };
        if categories.is_empty() {
            return Err(BoardError::Malformed("no categories".to_string()));
        }

        let columns = parse_columns(categories, max_questions_per_category)?;
        Ok(Board::new(columns))
    }

    pub fn from_csv_file(
        path: impl AsRef<Path>,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        let path = path.as_ref();
        let board = Self::from_csv_reader(fs::File::open(path)?, max_questions_per_category)?;

        info!(
            path = %path.display(),
            categories = board.column_count(),
            rows = board.row_count(),
            "board loaded"
        );
        Ok(board)
    }

    pub fn from_csv_str(
        text: &str,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        Self::from_csv_reader(text.as_bytes(), max_questions_per_category)
    }

    pub fn from_csv_reader<R: Read>(
        source: R,
        max_questions_per_category: Option<usize>,
    ) -> Result<Self, BoardError> {
        let mut reader = csv::Reader::from_reader(source);

        let headers = reader.headers()?;
        for column in CSV_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(BoardError::MissingColumn(column));
            }
        }

        let mut grouped: BTreeMap<String, Vec<Tile>> = BTreeMap::new();
        for row in reader.deserialize() {
            let row: CsvRow = row?;
            let tiles = grouped.entry(row.category).or_default();
            if max_questions_per_category.map_or(true, |cap| tiles.len() < cap) {
                let dollar = dollar_for_row(tiles.len());
                tiles.push(Tile::new(row.question, row.answer, dollar));
            }
        }
        if grouped.is_empty() {
            return Err(BoardError::Malformed("no categories".to_string()));
        }

        let mut columns = Vec::with_capacity(grouped.len());
        for (category, tiles) in grouped {
            check_category_name(&category)?;
            columns.push(Column::new(category, tiles));
        }
        Ok(Board::new(columns))
    }
}

/// `BACK` and `QUIT` are taken at the category prompt, so a column with
/// either name could never be played.
fn check_category_name(category: &str) -> Result<(), BoardError> {
    if category == BACK || category == QUIT {
        return Err(BoardError::Malformed(format!(
            "{} cannot be used as a category name",
            category
        )));
    }
    Ok(())
}

fn parse_columns(
    categories: Map<String, Value>,
    cap: Option<usize>,
) -> Result<Vec<Column>, BoardError> {
    let mut columns = Vec::with_capacity(categories.len());

    for (category, questions) in categories {
        check_category_name(&category)?;
        let Value::Array(questions) = questions else {
            return Err(BoardError::Malformed(format!(
                "{} must be a list of questions",
                category
            )));
        };

        let mut tiles = Vec::with_capacity(questions.len());
        for (i, question) in questions.into_iter().enumerate() {
            tiles.push(parse_tile(&category, i, question)?);
        }

        // Every entry is validated before the cap applies.
        if let Some(cap) = cap {
            if tiles.len() > cap {
                debug!(%category, kept = cap, dropped = tiles.len() - cap, "truncating category");
                tiles.truncate(cap);
            }
        }

        columns.push(Column::new(category, tiles));
    }

    Ok(columns)
}

fn parse_tile(category: &str, index: usize, entry: Value) -> Result<Tile, BoardError> {
    if !entry.is_object() {
        return Err(BoardError::Malformed(format!(
            "{}'s element {} is not an object",
            category, index
        )));
    }

    let raw: RawQuestion = serde_json::from_value(entry).map_err(|e| {
        BoardError::Malformed(format!("{}'s element {}: {}", category, index, e))
    })?;

    let missing = |field| BoardError::MissingField {
        category: category.to_string(),
        index,
        field,
    };
    let question = raw.question.ok_or_else(|| missing("Question"))?;
    let answer = raw.answer.ok_or_else(|| missing("Answer"))?;

    Ok(Tile::new(question, answer, dollar_for_row(index)))
}
