//! Loading boards from question files on disk

use std::io::Write;

use jeopardy::games::jeopardy::{Board, BoardError};

fn write_source(contents: &str) -> tempfile::NamedTempFile {
    write_source_with(".json", contents)
}

fn write_source_with(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SOURCE: &str = r#"{
    "ZOOLOGY": [
        { "Question": "Largest land animal", "Answer": "What is the elephant?" },
        { "Question": "Only mammal that flies", "Answer": "What is the bat?" }
    ],
    "ASTRONOMY": [
        { "Question": "Red planet", "Answer": "What is Mars?" },
        { "Question": "Closest star", "Answer": "What is the Sun?" },
        { "Question": "Our galaxy", "Answer": "What is the Milky Way?" }
    ]
}"#;

#[test]
fn test_load_from_file_keeps_file_order_and_pads() {
    let file = write_source(SOURCE);
    let board = Board::from_json_file(file.path(), None).unwrap();

    assert_eq!(board.categories(), vec!["ZOOLOGY", "ASTRONOMY"]);
    assert_eq!(board.row_count(), 3);
    for column in board.columns() {
        assert_eq!(column.len(), 3);
    }

    let zoology = board.get_column("ZOOLOGY").unwrap();
    assert_eq!(zoology.dollars_playable(), vec![100, 200]);
    assert_eq!(zoology.get_tile(200).unwrap().answer, "What is the bat?");
}

#[test]
fn test_cap_applies_per_category() {
    let file = write_source(SOURCE);
    let board = Board::from_json_file(file.path(), Some(1)).unwrap();

    assert_eq!(board.row_count(), 1);
    assert_eq!(board.get_column("ASTRONOMY").unwrap().dollars(), vec![100]);
}

#[test]
fn test_missing_field_aborts_load() {
    let file = write_source(r#"{ "ZOOLOGY": [ { "Answer": "What is the bat?" } ] }"#);

    let err = Board::from_json_file(file.path(), None).unwrap_err();
    assert!(matches!(
        err,
        BoardError::MissingField { ref category, index: 0, field: "Question" } if category == "ZOOLOGY"
    ));
}

#[test]
fn test_invalid_json_is_reported() {
    let file = write_source("{ \"ZOOLOGY\": [ ");
    assert!(matches!(
        Board::from_json_file(file.path(), None),
        Err(BoardError::Json(_))
    ));
}

const CSV_SOURCE: &str = "Category,Question,Answer
ZOOLOGY,Largest land animal,What is the elephant?
ASTRONOMY,Red planet,What is Mars?
ZOOLOGY,Only mammal that flies,What is the bat?
ASTRONOMY,Closest star,What is the Sun?
ASTRONOMY,Our galaxy,What is the Milky Way?
";

#[test]
fn test_csv_file_groups_by_sorted_category_and_pads() {
    let file = write_source_with(".csv", CSV_SOURCE);
    let board = Board::from_csv_file(file.path(), None).unwrap();

    assert_eq!(board.categories(), vec!["ASTRONOMY", "ZOOLOGY"]);
    assert_eq!(board.row_count(), 3);
    for column in board.columns() {
        assert_eq!(column.len(), 3);
    }

    let zoology = board.get_column("ZOOLOGY").unwrap();
    assert_eq!(zoology.dollars(), vec![100, 200, 0]);
    assert_eq!(zoology.dollars_playable(), vec![100, 200]);
    assert_eq!(zoology.get_tile(200).unwrap().answer, "What is the bat?");
    assert!(zoology.get_tile(0).unwrap().is_done());
}

#[test]
fn test_csv_cap_keeps_first_rows_of_each_category() {
    let file = write_source_with(".csv", CSV_SOURCE);
    let board = Board::from_csv_file(file.path(), Some(2)).unwrap();

    let astronomy = board.get_column("ASTRONOMY").unwrap();
    assert_eq!(astronomy.dollars(), vec![100, 200]);
    assert_eq!(astronomy.get_tile(200).unwrap().question, "Closest star");
}

#[test]
fn test_csv_missing_header_aborts_load() {
    let file = write_source_with(".csv", "Category,Answer\nZOOLOGY,What is the bat?\n");
    assert!(matches!(
        Board::from_csv_file(file.path(), None),
        Err(BoardError::MissingColumn("Question"))
    ));
}

#[test]
fn test_loader_follows_file_extension() {
    let json = write_source(SOURCE);
    let csv = write_source_with(".csv", CSV_SOURCE);

    let from_json = Board::from_file(json.path(), None).unwrap();
    let from_csv = Board::from_file(csv.path(), None).unwrap();
    assert_eq!(from_json.categories(), vec!["ZOOLOGY", "ASTRONOMY"]);
    assert_eq!(from_csv.categories(), vec!["ASTRONOMY", "ZOOLOGY"]);

    let other = write_source_with(".txt", SOURCE);
    assert!(matches!(
        Board::from_file(other.path(), None),
        Err(BoardError::UnsupportedFormat(_))
    ));
}
