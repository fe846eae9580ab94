//! Runs a pass over the corpus files on disk.
//!
//! Documents are handled as untyped JSON so a rewrite touches nothing but
//! `books[].chapters[].content` strings. Key order and every other field
//! survive (serde_json is built with `preserve_order`).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use super::Pass;
use super::rewrite::Rewriter;
use super::rules::RulesError;

#[derive(Debug)]
pub enum PipelineError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Rules(RulesError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            PipelineError::Parse { path, source } => {
                write!(f, "invalid JSON in {}: {source}", path.display())
            }
            PipelineError::Rules(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

/// What happened to one corpus file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Processed(FileReport),
    Missing(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Chapters with non-empty content that went through the pass.
    pub chapters: usize,
    /// Chapters whose content actually changed.
    pub changed: usize,
    pub written: bool,
}

/// Rewrite every chapter's `content` in a corpus document.
/// Returns `(chapters processed, chapters changed)`.
pub fn transform_document<F>(doc: &mut Value, mut rewrite: F) -> (usize, usize)
where
    F: FnMut(&str) -> String,
{
    let mut processed = 0;
    let mut changed = 0;

    let Some(books) = doc.get_mut("books").and_then(Value::as_array_mut) else {
        return (0, 0);
    };
    for book in books {
        let Some(chapters) = book.get_mut("chapters").and_then(Value::as_array_mut) else {
            continue;
        };
        for chapter in chapters {
            if let Some(Value::String(content)) = chapter.get_mut("content") {
                if content.is_empty() {
                    continue;
                }
                let rewritten = rewrite(content.as_str());
                if rewritten != *content {
                    *content = rewritten;
                    changed += 1;
                }
                processed += 1;
            }
        }
    }
    (processed, changed)
}

/// Atomically write `data` as pretty JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Apply one pass to one file.
pub fn process_file(
    rewriter: &Rewriter,
    pass: Pass,
    path: &Path,
    dry_run: bool,
) -> Result<FileReport, PipelineError> {
    let io_err = |source: io::Error| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let raw = fs::read_to_string(path).map_err(io_err)?;
    let mut doc: Value = serde_json::from_str(&raw).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let (chapters, changed) = transform_document(&mut doc, |content| rewriter.apply(pass, content));

    if !dry_run {
        atomic_write_json(path, &doc).map_err(io_err)?;
    }
    info!(
        "{} {}: {} chapters, {} changed{}",
        pass.label(),
        path.display(),
        chapters,
        changed,
        if dry_run { " (dry run)" } else { "" }
    );

    Ok(FileReport {
        path: path.to_path_buf(),
        chapters,
        changed,
        written: !dry_run,
    })
}

/// Apply one pass to each file in order, printing progress to stdout.
///
/// A missing file is warned about and skipped. Any other failure stops the run.
pub fn run_pass(
    rewriter: &Rewriter,
    pass: Pass,
    files: &[PathBuf],
    dry_run: bool,
) -> Result<Vec<FileOutcome>, PipelineError> {
    if dry_run {
        println!("DRY RUN: no files will be written.\n");
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        if !path.exists() {
            warn!("File not found: {}", path.display());
            outcomes.push(FileOutcome::Missing(path.clone()));
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("Processing {name}...");
        let report = process_file(rewriter, pass, path, dry_run)?;
        println!("  Updated {} chapters.", report.chapters);
        outcomes.push(FileOutcome::Processed(report));
    }
    println!("Done.");
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pronouns::rules::RuleSet;
    use serde_json::json;

    fn rewriter() -> Rewriter {
        Rewriter::new(&RuleSet::default()).unwrap()
    }

    fn sample_doc() -> Value {
        json!({
            "bibleName": "World English Bible",
            "bibleId": "web",
            "books": [{
                "id": "GEN",
                "name": "Genesis",
                "abbreviation": "Gen",
                "chapters": [
                    {
                        "id": "GEN.1",
                        "number": "1",
                        "reference": "Genesis 1",
                        "content": "[1] God saw that he was good."
                    },
                    {
                        "id": "GEN.2",
                        "number": "2",
                        "reference": "Genesis 2",
                        "content": "[1] The man took his wife."
                    },
                    {
                        "id": "GEN.3",
                        "number": "3",
                        "reference": "Genesis 3",
                        "content": ""
                    }
                ]
            }]
        })
    }

    #[test]
    fn test_transform_document_counts() {
        let mut doc = sample_doc();
        let r = rewriter();
        let (processed, changed) = transform_document(&mut doc, |c| r.capitalize(c));
        assert_eq!(processed, 2);
        assert_eq!(changed, 1);
        assert_eq!(
            doc["books"][0]["chapters"][0]["content"],
            "[1] God saw that He was good."
        );
    }

    #[test]
    fn test_transform_document_preserves_structure() {
        let mut doc = sample_doc();
        let r = rewriter();
        transform_document(&mut doc, |c| r.capitalize(c));

        let mut expected = sample_doc();
        expected["books"][0]["chapters"][0]["content"] = json!("[1] God saw that He was good.");
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_transform_document_without_books() {
        let mut doc = json!({"bibleName": "Empty"});
        assert_eq!(transform_document(&mut doc, |c| c.to_uppercase()), (0, 0));
    }

    #[test]
    fn test_process_file_writes_pretty_json_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old-testament-data.json");
        fs::write(&path, serde_json::to_string(&sample_doc()).unwrap()).unwrap();

        let report = process_file(&rewriter(), Pass::Capitalize, &path, false).unwrap();
        assert!(report.written);
        assert_eq!(report.changed, 1);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"bibleName\""));
        let name_at = written.find("\"bibleName\"").unwrap();
        let books_at = written.find("\"books\"").unwrap();
        assert!(name_at < books_at);
        assert!(written.contains("He was good"));
        assert!(!dir.path().join("old-testament-data.tmp").exists());
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nt.json");
        let original = serde_json::to_string(&sample_doc()).unwrap();
        fs::write(&path, &original).unwrap();

        let report = process_file(&rewriter(), Pass::Capitalize, &path, true).unwrap();
        assert!(!report.written);
        assert_eq!(report.changed, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_run_pass_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("old-testament-data.json");
        let present = dir.path().join("new-testament-data.json");
        fs::write(&present, serde_json::to_string(&sample_doc()).unwrap()).unwrap();

        let outcomes = run_pass(
            &rewriter(),
            Pass::Revert,
            &[missing.clone(), present.clone()],
            false,
        )
        .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0], FileOutcome::Missing(missing));
        assert!(matches!(&outcomes[1], FileOutcome::Processed(r) if r.path == present));
    }

    #[test]
    fn test_malformed_file_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old-testament-data.json");
        fs::write(&path, "not json").unwrap();
        let err = run_pass(&rewriter(), Pass::Repair, &[path], true).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
    }

    #[test]
    fn test_second_capitalize_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ot.json");
        fs::write(&path, serde_json::to_string(&sample_doc()).unwrap()).unwrap();

        let r = rewriter();
        process_file(&r, Pass::Capitalize, &path, false).unwrap();
        let after_first = fs::read_to_string(&path).unwrap();
        let report = process_file(&r, Pass::Capitalize, &path, false).unwrap();
        assert_eq!(report.changed, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }
}
