//! Field snapshots.
//!
//! A [`Snapshot`] is the bincode encoding of a [`Field`] paired with its
//! state root, which is recomputed and checked on decode.
//! [`FileSnapshotStore`] keeps one snapshot file per tick.

use std::fs;
use std::path::{Path, PathBuf};

use battle_core::{Field, Tick};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: Field,
    pub state_root: [u8; 32],
}

impl Snapshot {
    pub fn capture(field: &Field) -> Result<Self> {
        let state_root = field.state_root().map_err(RuntimeError::Snapshot)?;
        Ok(Self {
            field: field.clone(),
            state_root,
        })
    }

    pub fn tick(&self) -> Tick {
        self.field.tick
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(RuntimeError::Snapshot)
    }

    /// Decodes a snapshot and verifies its state root.
    ///
    /// # Errors
    ///
    /// Fails with [`RuntimeError::CorruptedSnapshot`] when the recorded root
    /// does not match the decoded field.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes).map_err(RuntimeError::Snapshot)?;
        let actual = snapshot
            .field
            .state_root()
            .map_err(RuntimeError::Snapshot)?;
        if actual != snapshot.state_root {
            return Err(RuntimeError::CorruptedSnapshot {
                expected: hex::encode(snapshot.state_root),
                actual: hex::encode(actual),
            });
        }
        Ok(snapshot)
    }
}

/// Stores snapshots as individual bincode files indexed by tick.
///
/// Files are named `field_{tick}.bin` and written through a temporary file
/// followed by a rename.
pub struct FileSnapshotStore {
    base_dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn snapshot_path(&self, tick: Tick) -> PathBuf {
        self.base_dir.join(format!("field_{}.bin", tick.0))
    }

    /// Writes `snapshot` and returns the path it was written to.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.snapshot_path(snapshot.tick());
        let temp_path = path.with_extension("bin.tmp");

        fs::write(&temp_path, snapshot.encode()?)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(tick = %snapshot.tick(), path = %path.display(), "saved snapshot");
        Ok(path)
    }

    pub fn load(&self, tick: Tick) -> Result<Option<Snapshot>> {
        let path = self.snapshot_path(tick);
        if !path.exists() {
            return Ok(None);
        }

        let snapshot = Snapshot::decode(&fs::read(&path)?)?;
        tracing::debug!(%tick, path = %path.display(), "loaded snapshot");
        Ok(Some(snapshot))
    }

    /// Ticks with a stored snapshot, ascending.
    pub fn list_ticks(&self) -> Result<Vec<Tick>> {
        let mut ticks = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(tick) = filename
                    .strip_prefix("field_")
                    .and_then(|s| s.strip_suffix(".bin"))
                    .and_then(|s| s.parse::<u64>().ok())
            {
                ticks.push(Tick(tick));
            }
        }

        ticks.sort_unstable();
        Ok(ticks)
    }

    pub fn latest(&self) -> Result<Option<Snapshot>> {
        match self.list_ticks()?.last() {
            Some(&tick) => self.load(tick),
            None => Ok(None),
        }
    }
}
