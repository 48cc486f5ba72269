//! Incremental checkpoint persistence.
//!
//! A checkpoint is a full-overwrite snapshot: every write rewrites the
//! whole file with all rows processed so far, so the file on disk is
//! always a complete, consistent prefix of the batch. The last completed
//! checkpoint is the durable record of progress after an interrupt.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::mapper::REQUIRED_COLUMNS;
use crate::types::ScoredContact;

/// Columns appended to the contact columns in the output file.
pub const OUTPUT_COLUMNS: [&str; 5] = [
    "Score",
    "Reasoning",
    "Data Message",
    "Sentiment Message",
    "Connection Message",
];

/// Persistence target for batch progress.
pub trait Checkpoint: Send + Sync {
    /// Persist the full set of rows processed so far, replacing any
    /// previous snapshot.
    fn persist(&self, rows: &[ScoredContact]) -> Result<()>;
}

/// CSV checkpoint file: contact columns plus [`OUTPUT_COLUMNS`], one row
/// per processed contact, input order.
pub struct CsvCheckpoint {
    path: PathBuf,
}

impl CsvCheckpoint {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Checkpoint for CsvCheckpoint {
    fn persist(&self, rows: &[ScoredContact]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .chain(OUTPUT_COLUMNS.iter())
            .copied()
            .collect();
        writer.write_record(&headers)?;

        for row in rows {
            let score = row.result.score.to_string();
            writer.write_record([
                row.contact.first_name.as_str(),
                row.contact.last_name.as_str(),
                row.contact.email.as_str(),
                row.contact.website.as_str(),
                row.contact.title.as_str(),
                row.contact.profile_url.as_str(),
                score.as_str(),
                row.result.reasoning.as_str(),
                row.result.data_message.as_str(),
                row.result.sentiment_message.as_str(),
                row.result.connection_message.as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContactRecord, EnrichmentResult};

    fn scored(first: &str, score: u8) -> ScoredContact {
        ScoredContact {
            contact: ContactRecord {
                first_name: first.into(),
                last_name: "Test".into(),
                email: format!("{}@x.test", first.to_lowercase()),
                website: "https://x.test".into(),
                title: "CEO".into(),
                profile_url: "https://linkedin.com/in/x".into(),
            },
            result: EnrichmentResult {
                name: format!("{first} Test"),
                score,
                reasoning: "r".into(),
                data_message: "d".into(),
                sentiment_message: "s".into(),
                connection_message: "c".into(),
            },
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("checkpoint-{}-{}.csv", name, std::process::id()))
    }

    #[test]
    fn writes_headers_and_rows_in_order() {
        let path = temp_path("shape");
        let checkpoint = CsvCheckpoint::new(&path);

        checkpoint
            .persist(&[scored("A", 5), scored("B", 2)])
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 11);
        assert_eq!(&headers[0], "First Name");
        assert_eq!(&headers[6], "Score");
        assert_eq!(&headers[10], "Connection Message");

        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "A");
        assert_eq!(&rows[0][6], "5");
        assert_eq!(&rows[1][0], "B");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn persist_overwrites_previous_snapshot() {
        let path = temp_path("overwrite");
        let checkpoint = CsvCheckpoint::new(&path);

        checkpoint.persist(&[scored("A", 1)]).unwrap();
        checkpoint
            .persist(&[scored("A", 1), scored("B", 2), scored("C", 3)])
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        // The file holds the full set, not an append of both writes.
        assert_eq!(rows.len(), 3);

        std::fs::remove_file(&path).ok();
    }
}
