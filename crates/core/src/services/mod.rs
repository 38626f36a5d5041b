pub mod holdings_service;
pub mod transaction_service;
