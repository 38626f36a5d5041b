use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::repository::TransactionRepository;

/// In-memory repository, for tests and for hosts that manage persistence
/// themselves (e.g. a frontend that writes the bytes elsewhere).
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    stored: Mutex<Option<Ledger>>,
    save_count: Mutex<usize>,
}

fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    // a poisoned lock still holds valid ledger data
    result.unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryRepository {
    /// Repository with no prior data; the first `load` returns `None`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Repository pre-populated with an existing ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            stored: Mutex::new(Some(ledger)),
            save_count: Mutex::new(0),
        }
    }

    /// The most recently saved ledger, if any. For inspection in tests.
    #[must_use]
    pub fn saved(&self) -> Option<Ledger> {
        recover(self.stored.lock()).clone()
    }

    /// How many times `save` has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *recover(self.save_count.lock())
    }
}

impl TransactionRepository for InMemoryRepository {
    fn load(&self) -> Result<Option<Ledger>, CoreError> {
        Ok(recover(self.stored.lock()).clone())
    }

    fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        *recover(self.stored.lock()) = Some(ledger.clone());
        *recover(self.save_count.lock()) += 1;
        Ok(())
    }
}
