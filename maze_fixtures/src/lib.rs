//! Reference mazes stored as text in `mazes/`, with the expected minimum cost and number of
//! tiles on optimal routes listed in `mazes/answers.csv`. An empty cost means the end cannot be
//! reached.
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub name: String,
    pub cost: Option<u32>,
    pub tiles: Option<usize>,
}

/// A maze as drawn in its file together with its known answer.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub text: String,
    pub answer: Answer,
}

fn maze_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("mazes")
}

fn load_answers() -> Vec<Answer> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(maze_dir().join("answers.csv"))
        .expect("Could not open answers file");
    csv_reader
        .deserialize()
        .map(|record| record.expect("Could not parse answer record"))
        .collect()
}

/// Names of all mazes in the fixture directory, sorted.
pub fn get_fixture_names() -> Vec<String> {
    let root = maze_dir()
        .canonicalize()
        .expect("Failed to canonicalize maze directory");
    let mut names = Vec::new();
    for entry in WalkDir::new(&root).max_depth(1).into_iter() {
        let entry = entry.expect("Could not get dir entry");
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
    }
    names.sort();
    names
}

/// Loads the maze `name` and its answer. Panics if either is missing.
pub fn get_fixture(name: &str) -> Fixture {
    let text = fs::read_to_string(maze_dir().join(format!("{}.txt", name)))
        .expect("Could not read maze file");
    let answer = load_answers()
        .into_iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("No answer recorded for maze {}", name));
    Fixture {
        name: name.to_owned(),
        text,
        answer,
    }
}

/// Every fixture maze with its answer.
pub fn get_fixtures() -> Vec<Fixture> {
    get_fixture_names()
        .iter()
        .map(|name| get_fixture(name))
        .collect()
}
