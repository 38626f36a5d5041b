use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::holding::Holding;
use crate::models::ledger::Ledger;
use crate::models::transaction::TransactionKind;

/// Derives current holdings from the transaction log.
///
/// Pure business logic: no I/O and no stored state. The full log is replayed
/// from scratch on every call, so the holdings map is always a reproducible
/// function of the ledger alone.
pub struct HoldingsService;

impl HoldingsService {
    pub fn new() -> Self {
        Self
    }

    /// Replay the transaction log into a map of asset id -> current holding.
    ///
    /// Transactions are replayed in insertion order, never sorted by
    /// timestamp: a backdated record entered after later sells replays
    /// where it was inserted.
    ///
    /// Buys blend the new lot into a single weighted-average cost across
    /// the whole position. Sells reduce quantity, clamped at zero, and
    /// leave the average cost of the remainder unchanged; a position that
    /// reaches zero is removed from the map entirely.
    ///
    /// Total function: defined for every input, including the empty log,
    /// and never fails. Records with a non-positive quantity are skipped;
    /// the store rejects them before they ever reach the ledger.
    #[must_use]
    pub fn compute_holdings(&self, ledger: &Ledger) -> HashMap<String, Holding> {
        let mut holdings: HashMap<String, Holding> = HashMap::new();

        for transaction in &ledger.transactions {
            if transaction.quantity <= Decimal::ZERO {
                continue;
            }

            match transaction.kind {
                TransactionKind::Buy => {
                    let holding = holdings
                        .entry(transaction.asset_id.clone())
                        .or_insert_with(|| Holding::opened(&transaction.asset_id));

                    let new_quantity = holding.quantity + transaction.quantity;
                    holding.average_cost = (holding.quantity * holding.average_cost
                        + transaction.quantity * transaction.unit_price)
                        / new_quantity;
                    holding.quantity = new_quantity;
                }
                TransactionKind::Sell => {
                    let closed = match holdings.get_mut(&transaction.asset_id) {
                        Some(holding) => {
                            // average_cost is kept for whatever remains
                            holding.quantity =
                                (holding.quantity - transaction.quantity).max(Decimal::ZERO);
                            holding.quantity.is_zero()
                        }
                        None => false,
                    };
                    if closed {
                        holdings.remove(&transaction.asset_id);
                    }
                }
            }
        }

        holdings
    }

    /// Portfolio-level aggregate: the sum of `quantity * average_cost`
    /// over all current holdings.
    #[must_use]
    pub fn total_invested(&self, holdings: &HashMap<String, Holding>) -> Decimal {
        holdings.values().map(Holding::cost_basis).sum()
    }
}

impl Default for HoldingsService {
    fn default() -> Self {
        Self::new()
    }
}
