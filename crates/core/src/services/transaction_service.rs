use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::ids::IdGenerator;
use crate::models::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Manages the append-only transaction log: validation, id assignment,
/// append and whole-record removal.
///
/// Pure in-memory logic with no I/O. Persistence is driven by the facade
/// after every successful mutation.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft, assign it an id and append it to the log.
    /// A rejected draft never reaches the ledger; the log is unchanged.
    pub fn append(
        &self,
        ledger: &mut Ledger,
        draft: TransactionDraft,
        ids: &dyn IdGenerator,
    ) -> Result<Transaction, CoreError> {
        self.validate(&draft)?;

        let transaction = Transaction {
            id: ids.new_id(),
            kind: draft.kind,
            asset_id: draft.asset_id,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            timestamp: draft.timestamp,
        };
        ledger.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Remove a transaction by its id. Returns the removed record.
    /// Fails with `TransactionNotFound` and no state change for unknown ids.
    pub fn remove(&self, ledger: &mut Ledger, id: Uuid) -> Result<Transaction, CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;

        Ok(ledger.transactions.remove(idx))
    }

    /// Validate a draft before it is allowed into the log.
    ///
    /// Rules:
    /// - Quantity must be strictly positive
    /// - Unit price must be strictly positive
    /// - Asset id must not be empty
    ///
    /// Selling more than is currently held is NOT rejected here; the
    /// holdings computation clamps such positions to zero.
    pub fn validate(&self, draft: &TransactionDraft) -> Result<(), CoreError> {
        if draft.quantity <= Decimal::ZERO {
            return Err(CoreError::NonPositiveAmount {
                field: "quantity",
                value: draft.quantity,
            });
        }
        if draft.unit_price <= Decimal::ZERO {
            return Err(CoreError::NonPositiveAmount {
                field: "unit price",
                value: draft.unit_price,
            });
        }
        if draft.asset_id.is_empty() {
            return Err(CoreError::MissingAssetId);
        }
        Ok(())
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
