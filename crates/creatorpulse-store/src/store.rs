use std::collections::BTreeMap;
use std::path::Path;

use crate::snapshot::RawCreatorRecord;
use crate::StoreError;

/// In-memory, creator-keyed view of the snapshot directory.
///
/// Loaded once at startup and treated as read-only for the process
/// lifetime. Files that fail to parse are logged and skipped — one bad
/// snapshot never takes down the rest of the corpus.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    records: BTreeMap<String, RawCreatorRecord>,
}

impl SnapshotStore {
    /// Load every `*.json` snapshot under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DataDirIo`] if the directory itself cannot
    /// be read. Individual unreadable or unparsable files are skipped
    /// with a `warn`, not propagated.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let entries = std::fs::read_dir(dir).map_err(|e| StoreError::DataDirIo {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut records = BTreeMap::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "unreadable directory entry, skipping");
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "unreadable snapshot file, skipping");
                    continue;
                }
            };

            match serde_json::from_str::<RawCreatorRecord>(&content) {
                Ok(record) => {
                    if let Some(prev) = records.insert(record.user_id.clone(), record) {
                        tracing::warn!(
                            creator = prev.user_id,
                            file = %path.display(),
                            "duplicate creator id, keeping later file"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "malformed snapshot, skipping");
                }
            }
        }

        tracing::info!(
            dir = %dir.display(),
            creators = records.len(),
            "snapshot store loaded"
        );
        Ok(Self { records })
    }

    /// Build a store directly from records (test seams and the CLI's
    /// single-file mode).
    #[must_use]
    pub fn from_records(records: Vec<RawCreatorRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.user_id.clone(), r))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, creator_id: &str) -> Option<&RawCreatorRecord> {
        self.records.get(creator_id)
    }

    /// All records, ordered by creator id for deterministic iteration.
    pub fn all(&self) -> impl Iterator<Item = &RawCreatorRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
