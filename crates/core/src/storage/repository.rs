use crate::errors::CoreError;
use crate::models::ledger::Ledger;

/// Trait abstraction for ledger persistence.
///
/// The concrete backend (a file, a browser storage bridge, a database row)
/// is an external collaborator; the core only needs these two operations.
/// `load` is called once at startup, `save` after every mutation.
pub trait TransactionRepository: Send + Sync {
    /// Load the previously saved ledger. `Ok(None)` means no prior data
    /// exists, which triggers the first-run demo seed.
    fn load(&self) -> Result<Option<Ledger>, CoreError>;

    /// Persist the full ledger, replacing whatever was stored before.
    fn save(&self, ledger: &Ledger) -> Result<(), CoreError>;
}
