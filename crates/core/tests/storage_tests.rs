// ═══════════════════════════════════════════════════════════════════
// Storage Tests: JsonFileRepository, InMemoryRepository
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;

use coinfolio_core::errors::CoreError;
use coinfolio_core::models::ledger::Ledger;
use coinfolio_core::models::transaction::{Transaction, TransactionKind};
use coinfolio_core::storage::json_file::{JsonFileRepository, CURRENT_VERSION};
use coinfolio_core::storage::memory::InMemoryRepository;
use coinfolio_core::storage::repository::TransactionRepository;

fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap()
}

fn sample_ledger() -> Ledger {
    Ledger {
        transactions: vec![
            Transaction {
                id: uuid::Uuid::from_u128(1),
                kind: TransactionKind::Buy,
                asset_id: "BTC".into(),
                quantity: dec!(0.5),
                unit_price: dec!(45000),
                timestamp: at("2025-01-15T10:00:00Z"),
            },
            Transaction {
                id: uuid::Uuid::from_u128(2),
                kind: TransactionKind::Sell,
                asset_id: "BTC".into(),
                quantity: dec!(0.1),
                unit_price: dec!(52000),
                timestamp: at("2025-02-01T09:00:00Z"),
            },
        ],
    }
}

// ═══════════════════════════════════════════════════════════════════
// JsonFileRepository
// ═══════════════════════════════════════════════════════════════════

mod json_file {
    use super::*;

    #[test]
    fn save_then_load_roundtrips_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonFileRepository::new(dir.path().join("ledger.json"));

        let ledger = sample_ledger();
        repository.save(&ledger).unwrap();

        let loaded = repository.load().unwrap().unwrap();
        assert_eq!(loaded.transactions, ledger.transactions);
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonFileRepository::new(dir.path().join("does-not-exist.json"));

        assert!(repository.load().unwrap().is_none());
    }

    #[test]
    fn decimal_precision_survives_the_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonFileRepository::new(dir.path().join("ledger.json"));

        let mut ledger = sample_ledger();
        ledger.transactions[0].quantity = dec!(0.00000001);
        repository.save(&ledger).unwrap();

        let loaded = repository.load().unwrap().unwrap();
        assert_eq!(loaded.transactions[0].quantity.to_string(), "0.00000001");
    }

    #[test]
    fn saved_file_carries_the_current_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let repository = JsonFileRepository::new(&path);

        repository.save(&sample_ledger()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], u64::from(CURRENT_VERSION));
        assert!(raw["transactions"].is_array());
    }

    #[test]
    fn load_rejects_version_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"version":0,"transactions":[]}"#).unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(0)));
    }

    #[test]
    fn load_rejects_newer_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"version":99,"transactions":[]}"#).unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(99)));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, b"not json at all").unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn load_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"version":1}"#).unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("ledger.json");
        let repository = JsonFileRepository::new(&path);

        repository.save(&sample_ledger()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonFileRepository::new(dir.path().join("ledger.json"));

        repository.save(&sample_ledger()).unwrap();
        repository.save(&Ledger::default()).unwrap();

        let loaded = repository.load().unwrap().unwrap();
        assert!(loaded.transactions.is_empty());
    }

    #[test]
    fn path_accessor_returns_the_backing_file() {
        let repository = JsonFileRepository::new("/tmp/coinfolio/ledger.json");
        assert_eq!(
            repository.path(),
            std::path::Path::new("/tmp/coinfolio/ledger.json")
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// InMemoryRepository
// ═══════════════════════════════════════════════════════════════════

mod in_memory {
    use super::*;

    #[test]
    fn empty_loads_none() {
        let repository = InMemoryRepository::empty();
        assert!(repository.load().unwrap().is_none());
        assert!(repository.saved().is_none());
    }

    #[test]
    fn with_ledger_loads_the_prepopulated_data() {
        let repository = InMemoryRepository::with_ledger(sample_ledger());
        let loaded = repository.load().unwrap().unwrap();
        assert_eq!(loaded.transactions.len(), 2);
    }

    #[test]
    fn save_then_load_returns_the_saved_ledger() {
        let repository = InMemoryRepository::empty();
        repository.save(&sample_ledger()).unwrap();

        let loaded = repository.load().unwrap().unwrap();
        assert_eq!(loaded.transactions, sample_ledger().transactions);
    }

    #[test]
    fn save_count_tracks_every_save() {
        let repository = InMemoryRepository::empty();
        assert_eq!(repository.save_count(), 0);

        repository.save(&sample_ledger()).unwrap();
        repository.save(&Ledger::default()).unwrap();
        assert_eq!(repository.save_count(), 2);
    }

    #[test]
    fn saved_exposes_the_latest_snapshot() {
        let repository = InMemoryRepository::empty();
        repository.save(&sample_ledger()).unwrap();
        repository.save(&Ledger::default()).unwrap();

        assert!(repository.saved().unwrap().transactions.is_empty());
    }
}
