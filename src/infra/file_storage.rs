// src/infra/file_storage.rs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::infra::persistence::{MatchStorage, PersistenceError, SnapshotEnvelope};

/// Снапшот в одном файле.
///
/// Запись идёт через временный файл + rename, чтобы убитый посреди записи
/// процесс не оставил полфайла.
#[derive(Clone, Debug)]
pub struct FileMatchStorage {
    path: PathBuf,
}

impl FileMatchStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl MatchStorage for FileMatchStorage {
    fn save(&mut self, envelope: &SnapshotEnvelope) -> Result<(), PersistenceError> {
        let bytes = envelope.encode()?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SnapshotEnvelope>, PersistenceError> {
        match fs::read(&self.path) {
            Ok(bytes) => SnapshotEnvelope::decode(&bytes).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
