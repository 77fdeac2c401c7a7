use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto;
use crate::models::HistoryData;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("crypto error: {0}")]
    Crypto(#[from] crypto::CryptoError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("data directory not found")]
    NoDataDir,
}

/// Default location of the encrypted history file.
pub fn default_history_path() -> Result<PathBuf, StorageError> {
    Ok(dirs::data_local_dir()
        .ok_or(StorageError::NoDataDir)?
        .join("gestdate")
        .join("history.gestdate"))
}

/// Encrypt and write the history, creating parent directories as needed.
pub fn save(path: &Path, passphrase: &str, data: &HistoryData) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_vec(data)?;
    let sealed = crypto::seal(passphrase, &json)?;
    fs::write(path, sealed)?;
    tracing::debug!(path = %path.display(), records = data.records.len(), "history saved");
    Ok(())
}

/// Read and decrypt the history. A missing file yields an empty history.
pub fn load(path: &Path, passphrase: &str) -> Result<HistoryData, StorageError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no history file yet");
        return Ok(HistoryData::default());
    }
    let sealed = fs::read(path)?;
    let json = crypto::open(passphrase, &sealed)?;
    let data: HistoryData = serde_json::from_slice(&json)?;
    Ok(data)
}

/// Delete the history file permanently.
pub fn wipe(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "history wiped");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate;
    use crate::history::History;
    use crate::models::{CycleParameters, GestationalInput};
    use chrono::NaiveDate;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("gestdate-test-{}", uuid::Uuid::new_v4()))
            .join("history.gestdate")
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = temp_path();
        assert!(!path.exists());
        assert!(load(&path, "pass").unwrap().records.is_empty());
    }

    #[test]
    fn save_load_wipe() {
        let path = temp_path();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let input = GestationalInput::Lmp {
            last_period_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        let cycle = CycleParameters::default();
        let result = calculate(&input, &cycle, today).unwrap();

        let mut history = History::new(10);
        history.append(today, input, cycle, result);
        save(&path, "pass", history.data()).unwrap();
        assert!(path.exists());

        let loaded = load(&path, "pass").unwrap();
        assert_eq!(&loaded, history.data());
        assert!(matches!(
            load(&path, "nope"),
            Err(StorageError::Crypto(crypto::CryptoError::Decryption))
        ));

        wipe(&path).unwrap();
        assert!(!path.exists());
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir(dir);
        }
    }
}
