//! Tree file selection: list candidates and let the user pick one.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::errors::{TreeError, TreeResult};

/// Chooses one entry out of a list of candidate files.
pub trait Selector {
    fn select_one(&self, items: &[PathBuf], prompt: &str) -> Result<Option<PathBuf>, String>;
}

/// Files directly inside `dir` with the given extension, sorted by path.
#[instrument(level = "debug")]
pub fn candidate_files(dir: &Path, extension: &str) -> TreeResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| TreeError::io(format!("scan {}", dir.display()), e.into()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == extension)
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    debug!("{} candidate files in {}", files.len(), dir.display());
    Ok(files)
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(&self, items: &[PathBuf], prompt: &str) -> Result<Option<PathBuf>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        match Skim::run_with(&options, Some(items_arc)) {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => Ok(out.selected_items.first().and_then(|selected| {
                let display = selected.output().to_string();
                items
                    .iter()
                    .find(|p| p.display().to_string() == display)
                    .cloned()
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_files_filters_by_extension_and_depth() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "B:C\n").unwrap();
        fs::write(temp.path().join("a.txt"), "A:B\n").unwrap();
        fs::write(temp.path().join("notes.md"), "# notes\n").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested/c.txt"), "C:D\n").unwrap();

        let files = candidate_files(temp.path(), "txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_candidate_files_missing_dir_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = candidate_files(&temp.path().join("absent"), "txt");
        assert!(matches!(result, Err(TreeError::Io { .. })));
    }
}
