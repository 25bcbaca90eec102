//! JSONL corpus loader
//!
//! One `{"text": "...", "label": 0|1}` object per line. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::TrainingExample;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Load training examples from a JSONL file
pub fn load_examples(path: &Path) -> Result<Vec<TrainingExample>, DatasetError> {
    let reader = BufReader::new(File::open(path)?);
    let mut examples = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let example: TrainingExample = serde_json::from_str(trimmed)
            .map_err(|source| DatasetError::Parse { line: idx + 1, source })?;
        examples.push(example);
    }

    log::info!("Loaded {} training examples from {:?}", examples.len(), path);
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(
            &path,
            "{\"text\": \"Great\", \"label\": 1}\n\n{\"text\": \"Awful\", \"label\": 0}\n",
        )
        .unwrap();

        let examples = load_examples(&path).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0], TrainingExample::new("Great", 1));
        assert_eq!(examples[1].label, 0);
    }

    #[test]
    fn test_reports_bad_line_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(&path, "{\"text\": \"ok\", \"label\": 1}\nnot json\n").unwrap();

        match load_examples(&path) {
            Err(DatasetError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_examples(&dir.path().join("nope.jsonl")),
            Err(DatasetError::Io(_))
        ));
    }
}
