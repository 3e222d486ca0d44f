//! Save slot persistence.
//!
//! The ordered slot list is written to a single checksummed binary file.

use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::session::SaveSnapshot;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SAVE_FILE_NAME: &str = "saves.dat";

/// Magic (8) + length (4) + checksum (32)
const FRAME_OVERHEAD: u64 = 8 + 4 + 32;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode save slots: {0}")]
    Encode(bincode::Error),
    #[error("failed to decode save slots: {0}")]
    Decode(bincode::Error),
    #[error("invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },
    #[error("declared payload of {declared} bytes but the file holds {available}")]
    LengthMismatch { declared: u64, available: u64 },
    #[error("checksum verification failed")]
    ChecksumMismatch,
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Reads and writes the save slot list
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store in the platform config directory, created if needed
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs =
            ProjectDirs::from("", "", "mecha-delver").ok_or(SaveError::NoConfigDir)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes all slots, replacing the previous file
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode slot list (variable length)
    /// - SHA256 over everything above (32 bytes)
    pub fn save(&self, saves: &[SaveSnapshot]) -> Result<(), SaveError> {
        let data = bincode::serialize(saves).map_err(SaveError::Encode)?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        tracing::debug!(slots = saves.len(), path = %self.path.display(), "save slots written");
        Ok(())
    }

    /// Reads all slots, verifying magic and checksum
    pub fn load(&self) -> Result<Vec<SaveSnapshot>, SaveError> {
        let mut file = fs::File::open(&self.path)?;
        let file_len = file.metadata()?.len();

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(SaveError::BadMagic {
                expected: SAVE_VERSION_MAGIC,
                found: version,
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        // Never size a buffer from the header alone
        let available = file_len.saturating_sub(FRAME_OVERHEAD);
        if data_len as u64 != available {
            return Err(SaveError::LengthMismatch {
                declared: data_len as u64,
                available,
            });
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(SaveError::ChecksumMismatch);
        }

        let saves: Vec<SaveSnapshot> = bincode::deserialize(&data).map_err(SaveError::Decode)?;
        tracing::debug!(slots = saves.len(), "save slots loaded");
        Ok(saves)
    }

    /// Like [`load`](Self::load), but a missing file is an empty list
    pub fn load_or_empty(&self) -> Result<Vec<SaveSnapshot>, SaveError> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::Unit;

    fn snapshot(name: &str, level: u32) -> SaveSnapshot {
        SaveSnapshot {
            id: format!("id-{name}"),
            name: name.to_string(),
            level,
            player: Unit::new(),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::at(dir.path().join("saves.dat"));
        let slots = vec![snapshot("Save 1", 3), snapshot("Save 2", 7)];

        store.save(&slots).expect("save");
        let loaded = store.load().expect("load");

        assert_eq!(loaded, slots);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::at(dir.path().join("none.dat"));
        assert!(matches!(store.load(), Err(SaveError::Io(_))));
        assert!(store.load_or_empty().expect("empty").is_empty());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saves.dat");
        let store = SnapshotStore::at(&path);
        store.save(&[snapshot("Save 1", 1)]).expect("save");

        let mut bytes = fs::read(&path).expect("read");
        bytes[0] ^= 0xFF;
        fs::write(&path, bytes).expect("write");

        assert!(matches!(store.load(), Err(SaveError::BadMagic { .. })));
    }

    #[test]
    fn test_oversized_length_header_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saves.dat");
        let store = SnapshotStore::at(&path);
        store.save(&[snapshot("Save 1", 1)]).expect("save");

        let mut bytes = fs::read(&path).expect("read");
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        fs::write(&path, bytes).expect("write");

        assert!(matches!(
            store.load(),
            Err(SaveError::LengthMismatch {
                declared,
                ..
            }) if declared == u32::MAX as u64
        ));
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saves.dat");
        let store = SnapshotStore::at(&path);
        store.save(&[snapshot("Save 1", 1)]).expect("save");

        let mut bytes = fs::read(&path).expect("read");
        bytes[14] ^= 0x01;
        fs::write(&path, bytes).expect("write");

        assert!(matches!(store.load(), Err(SaveError::ChecksumMismatch)));
    }
}
