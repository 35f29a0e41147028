use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use strum::Display;

/// Size class of a candidate file, derived from its touch cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Large,
    Medium,
    Small,
}

impl SizeCategory {
    pub fn of(max_touches: u32) -> Self {
        if max_touches >= 5 {
            SizeCategory::Large
        } else if max_touches >= 3 {
            SizeCategory::Medium
        } else {
            SizeCategory::Small
        }
    }
}

/// A repository-relative path eligible for fabricated edits
#[derive(Debug, Clone, Serialize)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub max_touches: u32,
}

impl CandidateFile {
    pub fn category(&self) -> SizeCategory {
        SizeCategory::of(self.max_touches)
    }

    pub fn display(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// The full candidate pool, immutable for the run
#[derive(Debug, Clone, Default)]
pub struct FilePool {
    files: Vec<CandidateFile>,
}

impl FilePool {
    pub fn new(files: Vec<CandidateFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop candidates that do not exist on disk under `root`.
    /// Missing paths are skipped, not errors.
    pub fn retain_existing(&mut self, root: &Path) {
        self.files.retain(|file| {
            let exists = root.join(&file.path).is_file();
            if !exists {
                info!("skipping missing candidate: {}", file.display());
            }
            exists
        });
    }
}

/// Per-file count of successful edits, single writer, never persisted
#[derive(Debug, Default)]
pub struct TouchCounters {
    counts: HashMap<PathBuf, u32>,
}

impl TouchCounters {
    pub fn new(pool: &FilePool) -> Self {
        let counts = pool
            .files()
            .iter()
            .map(|file| (file.path.clone(), 0))
            .collect();
        Self { counts }
    }

    pub fn count(&self, path: &Path) -> u32 {
        self.counts.get(path).copied().unwrap_or(0)
    }

    pub fn under_cap(&self, file: &CandidateFile) -> bool {
        self.count(&file.path) < file.max_touches
    }

    pub fn record(&mut self, path: &Path) {
        *self.counts.entry(path.to_path_buf()).or_insert(0) += 1;
    }

    /// Counts sorted by count descending, then path for a stable order
    pub fn sorted_desc(&self) -> Vec<(&Path, u32)> {
        let mut entries: Vec<(&Path, u32)> = self
            .counts
            .iter()
            .map(|(path, count)| (path.as_path(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_thresholds() {
        assert_eq!(SizeCategory::of(5), SizeCategory::Large);
        assert_eq!(SizeCategory::of(7), SizeCategory::Large);
        assert_eq!(SizeCategory::of(4), SizeCategory::Medium);
        assert_eq!(SizeCategory::of(3), SizeCategory::Medium);
        assert_eq!(SizeCategory::of(2), SizeCategory::Small);
        assert_eq!(SizeCategory::of(0), SizeCategory::Small);
    }

    #[test]
    fn counters_start_at_zero_and_track_caps() {
        let pool = FilePool::new(vec![
            CandidateFile {
                path: PathBuf::from("a.txt"),
                max_touches: 2,
            },
            CandidateFile {
                path: PathBuf::from("b.txt"),
                max_touches: 1,
            },
        ]);
        let mut counters = TouchCounters::new(&pool);
        assert_eq!(counters.count(Path::new("a.txt")), 0);
        assert!(counters.under_cap(&pool.files()[0]));

        counters.record(Path::new("b.txt"));
        assert!(!counters.under_cap(&pool.files()[1]));
    }

    #[test]
    fn sorted_desc_orders_by_count_then_path() {
        let pool = FilePool::new(vec![
            CandidateFile {
                path: PathBuf::from("a.txt"),
                max_touches: 3,
            },
            CandidateFile {
                path: PathBuf::from("b.txt"),
                max_touches: 3,
            },
        ]);
        let mut counters = TouchCounters::new(&pool);
        counters.record(Path::new("b.txt"));
        counters.record(Path::new("b.txt"));
        counters.record(Path::new("a.txt"));

        let sorted = counters.sorted_desc();
        assert_eq!(sorted[0], (Path::new("b.txt"), 2));
        assert_eq!(sorted[1], (Path::new("a.txt"), 1));
    }
}
