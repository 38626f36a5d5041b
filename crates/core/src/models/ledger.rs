use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;

use super::transaction::{Transaction, TransactionDraft, TransactionKind};

/// The main data container: the append-only, insertion-ordered sequence of
/// buy/sell transactions that is the sole source of truth for holdings.
///
/// Everything in here gets serialized and saved through the injected
/// repository after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All transactions, oldest insertion first
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    /// Fixed first-run history, seeded when the repository has no prior
    /// data: three crypto positions built from a handful of buys and one
    /// partial sell. Quantities and prices are constants; timestamps are
    /// relative to now so listings look recent; ids come from the injected
    /// generator.
    #[must_use]
    pub fn demo(ids: &dyn IdGenerator) -> Self {
        let now = Utc::now();
        let drafts = [
            (
                TransactionKind::Buy,
                "BTC",
                dec!(0.5),
                dec!(45000),
                Duration::days(120),
            ),
            (
                TransactionKind::Buy,
                "ETH",
                dec!(10),
                dec!(2500),
                Duration::days(95),
            ),
            (
                TransactionKind::Buy,
                "BTC",
                dec!(0.25),
                dec!(51000),
                Duration::days(60),
            ),
            (
                TransactionKind::Buy,
                "SOL",
                dec!(150),
                dec!(95),
                Duration::days(45),
            ),
            (
                TransactionKind::Sell,
                "ETH",
                dec!(2.5),
                dec!(3100),
                Duration::days(20),
            ),
        ];

        let transactions = drafts
            .into_iter()
            .map(|(kind, asset_id, quantity, unit_price, age)| {
                let draft =
                    TransactionDraft::new(kind, asset_id, quantity, unit_price, now - age);
                Transaction {
                    id: ids.new_id(),
                    kind: draft.kind,
                    asset_id: draft.asset_id,
                    quantity: draft.quantity,
                    unit_price: draft.unit_price,
                    timestamp: draft.timestamp,
                }
            })
            .collect();

        Self { transactions }
    }
}
