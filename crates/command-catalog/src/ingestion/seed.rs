//! Seeding the catalog from a directory of command guides

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, IngestError, Result};

use super::processor::IngestPipeline;
use super::source::RawDocument;

/// Summary of a seeding run
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Commands stored
    pub accepted: Vec<String>,
    /// Commands already present in the store
    pub duplicates: Vec<String>,
    /// Files that are not markdown
    pub skipped: Vec<PathBuf>,
    /// Files rejected for any other reason, with the message
    pub rejected: Vec<(PathBuf, String)>,
}

impl SeedReport {
    /// Number of files looked at
    pub fn total(&self) -> usize {
        self.accepted.len() + self.duplicates.len() + self.skipped.len() + self.rejected.len()
    }
}

/// Push every file under `dir` through the ingestion pipeline
///
/// Files are visited in name order and symlinks are followed. Individual
/// rejections and unreadable entries are recorded in the report and do not
/// stop the run; a missing directory is an error.
pub async fn seed_from_dir(pipeline: &IngestPipeline, dir: &Path) -> Result<SeedReport> {
    if !dir.is_dir() {
        return Err(Error::config(format!(
            "Seed directory does not exist: {}",
            dir.display()
        )));
    }

    let mut report = SeedReport::default();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                tracing::warn!("Cannot read {} while seeding: {}", path.display(), e);
                report.rejected.push((path, e.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();

        match pipeline.ingest(RawDocument::from_path(&path)).await {
            Ok(command) => report.accepted.push(command.id),
            Err(IngestError::DuplicateId(id)) => report.duplicates.push(id),
            Err(IngestError::UnsupportedFileType(_)) => report.skipped.push(path),
            Err(e) => report.rejected.push((path, e.to_string())),
        }
    }

    tracing::info!(
        "Seeded from {}: {} accepted, {} already present, {} skipped, {} rejected",
        dir.display(),
        report.accepted.len(),
        report.duplicates.len(),
        report.skipped.len(),
        report.rejected.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::CategoryPolicy;
    use crate::providers::InMemoryCommandStore;
    use std::sync::Arc;

    fn guide(id: &str, category: &str) -> String {
        format!(
            "---\nid: {id}\ntitle: {id}\ndescription: about {id}\ncategory: {category}\ntags: seed\n---\nbody of {id}\n"
        )
    }

    #[test]
    fn test_seed_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), guide("postgres-backup", "Database")).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/b.md"), guide("ufw-basics", "Security")).unwrap();
        std::fs::write(dir.path().join("c.md"), guide("postgres-backup", "Database")).unwrap();
        std::fs::write(dir.path().join("d.md"), "no frontmatter").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = Arc::new(InMemoryCommandStore::new());
        let pipeline = IngestPipeline::new(store.clone(), CategoryPolicy::Open);

        let report = tokio_test::block_on(seed_from_dir(&pipeline, dir.path())).unwrap();

        assert_eq!(report.accepted, vec!["postgres-backup", "ufw-basics"]);
        assert_eq!(report.duplicates, vec!["postgres-backup"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.total(), 5);
        assert_eq!(store.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), guide("postgres-backup", "Database")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.md"), dir.path().join("b.md")).unwrap();

        let store = Arc::new(InMemoryCommandStore::new());
        let pipeline = IngestPipeline::new(store, CategoryPolicy::Open);

        let report = tokio_test::block_on(seed_from_dir(&pipeline, dir.path())).unwrap();

        assert_eq!(report.accepted, vec!["postgres-backup"]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, dir.path().join("b.md"));
    }

    #[test]
    fn test_missing_directory() {
        let store = Arc::new(InMemoryCommandStore::new());
        let pipeline = IngestPipeline::new(store, CategoryPolicy::Open);

        let result = tokio_test::block_on(seed_from_dir(&pipeline, Path::new("/no/such/seed/dir")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
