use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser as ClapParser;
use serde::Deserialize;

use crate::models::{DocumentId, DocumentStatus};

#[derive(ClapParser, Debug)]
#[command(author, version, about = "In-memory TF-IDF text search over a JSON document file", long_about = None)]
pub struct Args {
    /// Queries in the plus/minus dialect, e.g. "curly cat -nasty"
    #[arg(value_name = "QUERY", required = true)]
    pub queries: Vec<String>,

    /// JSON file holding an array of {id, text, status, ratings} records
    #[arg(short, long, value_name = "FILE")]
    pub documents: PathBuf,

    /// Space-separated stop words excluded from documents and queries
    #[arg(short = 'w', long = "stop-words", default_value = "")]
    pub stop_words: String,

    /// Restrict results to documents with this status instead of ACTUAL
    #[arg(short, long, value_enum)]
    pub status: Option<DocumentStatus>,

    /// Score queries on the worker pool instead of the calling thread
    #[arg(short, long)]
    pub parallel: bool,

    /// Drop duplicate documents (equal term sets) before searching
    #[arg(long)]
    pub dedup: bool,

    /// Print results in pages of this many documents
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Emit results as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// One document as it appears in the input file.
#[derive(Debug, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub text: String,
    #[serde(default = "DocumentRecord::default_status")]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

impl DocumentRecord {
    fn default_status() -> DocumentStatus {
        DocumentStatus::Actual
    }
}

/// Reads and deserializes the document file.
pub fn load_documents(path: &Path) -> anyhow::Result<Vec<DocumentRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read document file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse document file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_records_with_defaults() {
        let raw = r#"[
            {"id": 1, "text": "funny pet", "status": "BANNED", "ratings": [1, 2]},
            {"id": 2, "text": "nasty rat"}
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(raw.as_bytes()).unwrap();

        let records = load_documents(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, DocumentStatus::Banned);
        assert_eq!(records[1].status, DocumentStatus::Actual);
        assert!(records[1].ratings.is_empty());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_documents(Path::new("no/such/file.json")).unwrap_err();
        assert!(err.to_string().contains("no/such/file.json"));
    }
}
