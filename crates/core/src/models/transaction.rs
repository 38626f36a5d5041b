use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Buying / acquiring an asset
    Buy,
    /// Selling / disposing of an asset
    Sell,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "Buy"),
            TransactionKind::Sell => write!(f, "Sell"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest timestamp first (default for display)
    DateDesc,
    /// Oldest timestamp first
    DateAsc,
    /// Largest quantity first
    QuantityDesc,
    /// Smallest quantity first
    QuantityAsc,
    /// Alphabetical by asset id
    AssetAsc,
    /// Reverse alphabetical by asset id
    AssetDesc,
}

/// A single buy/sell record in the ledger.
///
/// **Important**: transactions are immutable once created. The log is
/// append-only; the only other mutation is whole-record removal by id.
/// The timestamp is a display ordering key only; ledger replay always
/// runs in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store
    pub id: Uuid,

    /// Buy or Sell
    pub kind: TransactionKind,

    /// Asset symbol/slug, uppercased (e.g., "BTC", "ETH", "SOL")
    pub asset_id: String,

    /// Quantity of the asset traded (always strictly positive)
    pub quantity: Decimal,

    /// Price paid/received per unit, in the reference currency
    pub unit_price: Decimal,

    /// Entry time of the record
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Gross value of this transaction (`quantity * unit_price`).
    #[must_use]
    pub fn gross_value(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Caller-supplied fields of a transaction, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub asset_id: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl TransactionDraft {
    /// Create a draft, normalizing the asset id (trim + uppercase) so
    /// lookups are consistent regardless of how the caller spelled it.
    pub fn new(
        kind: TransactionKind,
        asset_id: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            asset_id: asset_id.into().trim().to_uppercase(),
            quantity,
            unit_price,
            timestamp,
        }
    }
}
