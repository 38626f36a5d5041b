use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The current position in one asset: quantity owned and its
/// weighted-average cost per unit.
///
/// Holdings are fully derived: they are recomputed from the transaction
/// log on every mutation and never persisted on their own. A holding only
/// exists while its quantity is strictly positive; positions that reach
/// zero are dropped from the holdings map entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset symbol/slug, uppercased
    pub asset_id: String,

    /// Quantity currently owned (never negative)
    pub quantity: Decimal,

    /// Weighted-average cost per unit; meaningful only while quantity > 0
    pub average_cost: Decimal,
}

impl Holding {
    /// A freshly opened, empty position for an asset.
    pub(crate) fn opened(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            quantity: Decimal::ZERO,
            average_cost: Decimal::ZERO,
        }
    }

    /// Cost basis of the whole position (`quantity * average_cost`).
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.average_cost
    }
}
