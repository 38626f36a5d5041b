pub mod errors;
pub mod ids;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use errors::CoreError;
use ids::IdGenerator;
use models::holding::Holding;
use models::ledger::Ledger;
use models::transaction::{Transaction, TransactionDraft, TransactionKind, TransactionSortOrder};
use services::holdings_service::HoldingsService;
use services::transaction_service::TransactionService;
use storage::repository::TransactionRepository;

/// How the ledger was initialized on `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// Prior data was found and loaded from the repository.
    Loaded,
    /// No prior data existed; the demo history was seeded.
    Seeded,
}

/// Main entry point for the CoinFolio core library.
///
/// Exclusively owns the transaction ledger and the holdings derived from
/// it. Every mutation runs as one unit: mutate the log in memory,
/// recompute the full holdings map, then persist through the repository.
/// Readers only ever observe a log/holdings pair produced by the same
/// recomputation.
///
/// Persistence is best-effort: the in-memory ledger stays authoritative
/// for the session even when a save fails; the failure is logged at warn
/// level and kept available via [`CoinFolio::last_persist_error`].
#[must_use]
pub struct CoinFolio {
    ledger: Ledger,
    holdings: HashMap<String, Holding>,
    transaction_service: TransactionService,
    holdings_service: HoldingsService,
    repository: Box<dyn TransactionRepository>,
    ids: Box<dyn IdGenerator>,
    bootstrap: Bootstrap,
    last_persist_error: Option<CoreError>,
}

impl std::fmt::Debug for CoinFolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinFolio")
            .field("transactions", &self.ledger.transactions.len())
            .field("holdings", &self.holdings.len())
            .field("bootstrap", &self.bootstrap)
            .field("persist_failed", &self.last_persist_error.is_some())
            .finish()
    }
}

impl CoinFolio {
    /// Open the ledger: load prior data through the repository, or seed
    /// the demo history when none exists. The seeded ledger is persisted
    /// right away (best-effort) so the next `open` loads it.
    ///
    /// A failing `load` is returned to the caller rather than silently
    /// replaced; hosts that want a fresh start use [`CoinFolio::create_empty`].
    pub fn open(
        repository: Box<dyn TransactionRepository>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, CoreError> {
        let (ledger, bootstrap) = match repository.load()? {
            Some(ledger) => (ledger, Bootstrap::Loaded),
            None => {
                log::info!("no prior ledger data, seeding demo history");
                (Ledger::demo(ids.as_ref()), Bootstrap::Seeded)
            }
        };

        let mut folio = Self::build(ledger, bootstrap, repository, ids);
        if bootstrap == Bootstrap::Seeded {
            folio.persist_best_effort();
        }
        Ok(folio)
    }

    /// Start with an intentionally empty ledger, skipping the demo seed.
    /// Nothing is persisted until the first mutation.
    pub fn create_empty(
        repository: Box<dyn TransactionRepository>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self::build(Ledger::default(), Bootstrap::Loaded, repository, ids)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Validate and append a transaction to the ledger.
    ///
    /// On success the holdings map is recomputed and the ledger is
    /// persisted. A rejected draft changes nothing and the error names
    /// the violated constraint so hosts can show it verbatim.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let transaction =
            self.transaction_service
                .append(&mut self.ledger, draft, self.ids.as_ref())?;
        self.after_mutation();
        Ok(transaction)
    }

    /// Remove a transaction by its id, then recompute holdings and persist.
    pub fn remove_transaction(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.transaction_service.remove(&mut self.ledger, id)?;
        self.after_mutation();
        Ok(())
    }

    // ── Ledger Queries ──────────────────────────────────────────────

    /// The full transaction log, insertion order preserved.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Get a single transaction by its id.
    #[must_use]
    pub fn get_transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|t| t.id == id)
    }

    /// Number of transactions in the ledger.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    /// Transactions for one asset (case-insensitive), insertion order.
    #[must_use]
    pub fn transactions_for_asset(&self, asset_id: &str) -> Vec<&Transaction> {
        let upper = asset_id.trim().to_uppercase();
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.asset_id == upper)
            .collect()
    }

    /// Transactions of one kind (Buy or Sell), insertion order.
    #[must_use]
    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .collect()
    }

    /// Transactions sorted for display. Sorting is a view concern only;
    /// the underlying log keeps insertion order.
    #[must_use]
    pub fn transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.ledger.transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => {
                transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            }
            TransactionSortOrder::DateAsc => {
                transactions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            }
            TransactionSortOrder::QuantityDesc => {
                transactions.sort_by(|a, b| b.quantity.cmp(&a.quantity));
            }
            TransactionSortOrder::QuantityAsc => {
                transactions.sort_by(|a, b| a.quantity.cmp(&b.quantity));
            }
            TransactionSortOrder::AssetAsc => {
                transactions.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
            }
            TransactionSortOrder::AssetDesc => {
                transactions.sort_by(|a, b| b.asset_id.cmp(&a.asset_id));
            }
        }
        transactions
    }

    /// Timestamp of the earliest transaction in the ledger.
    #[must_use]
    pub fn earliest_transaction_time(&self) -> Option<DateTime<Utc>> {
        self.ledger.transactions.iter().map(|t| t.timestamp).min()
    }

    /// Timestamp of the most recent transaction in the ledger.
    #[must_use]
    pub fn latest_transaction_time(&self) -> Option<DateTime<Utc>> {
        self.ledger.transactions.iter().map(|t| t.timestamp).max()
    }

    // ── Holdings View ───────────────────────────────────────────────

    /// Current holdings, sorted by asset id. Only assets with a strictly
    /// positive quantity appear.
    #[must_use]
    pub fn holdings(&self) -> Vec<&Holding> {
        let mut holdings: Vec<&Holding> = self.holdings.values().collect();
        holdings.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
        holdings
    }

    /// The current holding for one asset (case-insensitive), if any is held.
    #[must_use]
    pub fn get_holding(&self, asset_id: &str) -> Option<&Holding> {
        self.holdings.get(&asset_id.trim().to_uppercase())
    }

    /// The portfolio's aggregate cost basis: the sum of
    /// `quantity * average_cost` over all current holdings.
    #[must_use]
    pub fn total_invested(&self) -> Decimal {
        self.holdings_service.total_invested(&self.holdings)
    }

    // ── Bootstrap & Persistence State ───────────────────────────────

    /// Whether `open` loaded prior data or seeded the demo history.
    #[must_use]
    pub fn bootstrap(&self) -> Bootstrap {
        self.bootstrap
    }

    /// Convenience for `bootstrap() == Bootstrap::Seeded`.
    #[must_use]
    pub fn was_seeded(&self) -> bool {
        self.bootstrap == Bootstrap::Seeded
    }

    /// The error from the most recent failed save, if the ledger has not
    /// been successfully persisted since.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&CoreError> {
        self.last_persist_error.as_ref()
    }

    /// `true` while the in-memory ledger is newer than what the
    /// repository holds (i.e. the last save failed).
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.last_persist_error.is_some()
    }

    /// Persist the current ledger now. Retry hook for hosts reacting to
    /// [`CoinFolio::last_persist_error`]; clears the stored error on success.
    pub fn persist(&mut self) -> Result<(), CoreError> {
        match self.repository.save(&self.ledger) {
            Ok(()) => {
                self.last_persist_error = None;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        ledger: Ledger,
        bootstrap: Bootstrap,
        repository: Box<dyn TransactionRepository>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let holdings_service = HoldingsService::new();
        let holdings = holdings_service.compute_holdings(&ledger);

        Self {
            ledger,
            holdings,
            transaction_service: TransactionService::new(),
            holdings_service,
            repository,
            ids,
            bootstrap,
            last_persist_error: None,
        }
    }

    /// Recompute holdings from the mutated log, then persist best-effort.
    /// The in-memory state is already final when the save runs; a failed
    /// save never rolls it back.
    fn after_mutation(&mut self) {
        self.holdings = self.holdings_service.compute_holdings(&self.ledger);
        self.persist_best_effort();
    }

    fn persist_best_effort(&mut self) {
        match self.repository.save(&self.ledger) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                log::warn!("failed to persist ledger, in-memory state remains authoritative: {e}");
                self.last_persist_error = Some(e);
            }
        }
    }
}
