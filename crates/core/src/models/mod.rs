pub mod holding;
pub mod ledger;
pub mod transaction;
