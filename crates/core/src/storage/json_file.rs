use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::transaction::Transaction;

use super::repository::TransactionRepository;

/// Current on-disk ledger file version.
pub const CURRENT_VERSION: u16 = 1;

/// On-disk envelope: a version tag plus the transaction log.
///
/// Layout (JSON):
/// ```text
/// { "version": 1, "transactions": [ ... ] }
/// ```
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    version: u16,
    transactions: Vec<Transaction>,
}

/// File-backed repository storing the ledger as versioned JSON.
///
/// A missing file reads as "no prior data"; a present file with an
/// unknown version or malformed content is an error, never silently
/// replaced.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TransactionRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Ledger>, CoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: LedgerFile = serde_json::from_slice(&bytes)?;

        if file.version == 0 || file.version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(file.version));
        }

        Ok(Some(Ledger {
            transactions: file.transactions,
        }))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        let file = LedgerFile {
            version: CURRENT_VERSION,
            transactions: ledger.transactions.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&file)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}
