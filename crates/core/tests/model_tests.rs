// ═══════════════════════════════════════════════════════════════════
// Model Tests — Holding, Portfolio, PriceSeries, Settings
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::path::PathBuf;

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::holding::{round_cents, Holding, HoldingRecord, HoldingRow};
use portfolio_tracker_core::models::portfolio::Portfolio;
use portfolio_tracker_core::models::price::{PricePoint, PriceSeries};
use portfolio_tracker_core::models::settings::{Settings, DEFAULT_BASE_URL, DEFAULT_PORTFOLIO_PATH};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn value_is_quantity_times_price() {
        let h = Holding::new("AAPL", 10, 150.0);
        assert_eq!(h.value(), 1500.0);
    }

    #[test]
    fn value_is_rounded_to_cents() {
        let h = Holding::new("XYZ", 7, 0.333);
        let v = h.value();
        assert_eq!(v, 2.33);
        assert_eq!(round_cents(v), v);
    }

    #[test]
    fn row_from_holding() {
        let h = Holding::new("MSFT", 2, 410.255);
        let row = HoldingRow::from(&h);
        assert_eq!(row.symbol, "MSFT");
        assert_eq!(row.quantity, 2);
        assert_eq!(row.last_price, 410.255);
        assert_eq!(row.value, 820.51);
    }

    #[test]
    fn record_drops_symbol() {
        let h = Holding::new("AAPL", 10, 150.0);
        let r = HoldingRecord::from(&h);
        assert_eq!(
            r,
            HoldingRecord {
                quantity: 10,
                last_price: 150.0
            }
        );
    }

    #[test]
    fn round_cents_examples() {
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.236), 1.24);
        assert_eq!(round_cents(1500.0), 1500.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Portfolio
// ═══════════════════════════════════════════════════════════════════

mod portfolio {
    use super::*;

    #[test]
    fn new_is_empty() {
        let p = Portfolio::new();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p.symbols().count(), 0);
    }

    #[test]
    fn insert_replaces_same_symbol() {
        let mut p = Portfolio::new();
        assert!(p.insert(Holding::new("AAPL", 10, 150.0)).is_none());
        let old = p.insert(Holding::new("AAPL", 5, 200.0)).unwrap();
        assert_eq!(old.quantity, 10);
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("AAPL").unwrap().quantity, 5);
    }

    #[test]
    fn symbols_are_sorted() {
        let mut p = Portfolio::new();
        p.insert(Holding::new("TSLA", 1, 1.0));
        p.insert(Holding::new("AAPL", 1, 1.0));
        p.insert(Holding::new("MSFT", 1, 1.0));
        let symbols: Vec<&str> = p.symbols().collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn remove_returns_holding() {
        let mut p = Portfolio::new();
        p.insert(Holding::new("AAPL", 10, 150.0));
        assert_eq!(p.remove("AAPL").unwrap().symbol, "AAPL");
        assert!(p.remove("AAPL").is_none());
        assert!(!p.contains("AAPL"));
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut p = Portfolio::new();
        p.insert(Holding::new("AAPL", 10, 150.0));
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "AAPL": { "quantity": 10, "last_price": 150.0 } })
        );
    }

    #[test]
    fn deserializes_symbol_from_key() {
        let p: Portfolio = serde_json::from_str(
            r#"{ "MSFT": { "quantity": 3, "last_price": 401.5 } }"#,
        )
        .unwrap();
        let h = p.get("MSFT").unwrap();
        assert_eq!(h.symbol, "MSFT");
        assert_eq!(h.quantity, 3);
        assert_eq!(h.last_price, 401.5);
    }

    #[test]
    fn negative_quantity_is_rejected_on_load() {
        let res: Result<Portfolio, _> =
            serde_json::from_str(r#"{ "X": { "quantity": -1, "last_price": 1.0 } }"#);
        assert!(res.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceSeries
// ═══════════════════════════════════════════════════════════════════

mod price_series {
    use super::*;

    #[test]
    fn sorts_points_ascending() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint::new(d(2025, 1, 3), 3.0),
                PricePoint::new(d(2025, 1, 1), 1.0),
                PricePoint::new(d(2025, 1, 2), 2.0),
            ],
        );
        let dates: Vec<NaiveDate> = series.dates().collect();
        assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 1, 2), d(2025, 1, 3)]);
        let prices: Vec<f64> = series.prices().collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn duplicate_dates_keep_later_entry() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint::new(d(2025, 1, 1), 1.0),
                PricePoint::new(d(2025, 1, 1), 9.0),
            ],
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series.first().unwrap().price, 9.0);
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::empty("AAPL");
        assert!(series.is_empty());
        assert!(series.first().is_none());
        assert!(series.last().is_none());
        assert_eq!(series.symbol, "AAPL");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.api_key, "demo");
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.portfolio_path, PathBuf::from(DEFAULT_PORTFOLIO_PATH));
        assert_eq!(s.request_timeout_secs, 30);
        assert!(!s.enable_fallback);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_api_key_is_invalid() {
        let s = Settings {
            api_key: "  ".into(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn non_http_base_url_is_invalid() {
        let s = Settings {
            base_url: "ftp://example.com".into(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let s = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "api_key": "KEY" }"#).unwrap();
        assert_eq!(s.api_key, "KEY");
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }
}
