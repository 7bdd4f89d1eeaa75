// ═══════════════════════════════════════════════════════════════════
// Provider Tests — Alpha Vantage response parsing, registry
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::price::PricePoint;
use portfolio_tracker_core::models::settings::Settings;
use portfolio_tracker_core::providers::alphavantage::{
    parse_daily_series, parse_global_quote, AlphaVantageProvider,
};
use portfolio_tracker_core::providers::registry::QuoteProviderRegistry;
use portfolio_tracker_core::providers::traits::QuoteProvider;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Mock Providers
// ═══════════════════════════════════════════════════════════════════

struct NamedProvider(&'static str);

#[async_trait]
impl QuoteProvider for NamedProvider {
    fn name(&self) -> &str {
        self.0
    }

    async fn get_last_price(&self, _symbol: &str) -> Result<f64, CoreError> {
        Ok(1.0)
    }

    async fn get_daily_history(&self, _symbol: &str) -> Result<Vec<PricePoint>, CoreError> {
        Ok(vec![])
    }
}

// ═══════════════════════════════════════════════════════════════════
// GLOBAL_QUOTE parsing
// ═══════════════════════════════════════════════════════════════════

mod global_quote {
    use super::*;

    const AAPL_QUOTE: &str = r#"{
        "Global Quote": {
            "01. symbol": "AAPL",
            "02. open": "148.1000",
            "03. high": "151.2000",
            "04. low": "147.9000",
            "05. price": "150.0000",
            "06. volume": "51234567",
            "07. latest trading day": "2025-01-15",
            "08. previous close": "148.5000",
            "09. change": "1.5000",
            "10. change percent": "1.0101%"
        }
    }"#;

    #[test]
    fn reads_price_field() {
        let price = parse_global_quote("AAPL", AAPL_QUOTE).unwrap();
        assert_eq!(price, 150.0);
    }

    #[test]
    fn empty_quote_object_is_data_unavailable() {
        let err = parse_global_quote("NOPE", r#"{ "Global Quote": {} }"#).unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable { ref symbol, .. } if symbol == "NOPE"));
    }

    #[test]
    fn rate_limit_note_is_data_unavailable() {
        let body = r#"{ "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day." }"#;
        let err = parse_global_quote("AAPL", body).unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable { .. }));
    }

    #[test]
    fn non_numeric_price_is_api_error() {
        let body = r#"{ "Global Quote": { "05. price": "n/a" } }"#;
        let err = parse_global_quote("AAPL", body).unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[test]
    fn malformed_body_is_api_error() {
        let err = parse_global_quote("AAPL", "<html>502</html>").unwrap_err();
        assert!(matches!(err, CoreError::Api { ref provider, .. } if provider == "Alpha Vantage"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// TIME_SERIES_DAILY parsing
// ═══════════════════════════════════════════════════════════════════

mod daily_series {
    use super::*;

    const UNORDERED_SERIES: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM"
        },
        "Time Series (Daily)": {
            "2025-01-14": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "221.5000", "5. volume": "1" },
            "2025-01-16": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "223.2500", "5. volume": "1" },
            "2025-01-10": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "219.0000", "5. volume": "1" },
            "2025-01-15": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "222.0000", "5. volume": "1" }
        }
    }"#;

    #[test]
    fn reads_every_close() {
        let mut points = parse_daily_series("IBM", UNORDERED_SERIES).unwrap();
        points.sort_by_key(|p| p.date);
        assert_eq!(
            points,
            vec![
                PricePoint::new(d(2025, 1, 10), 219.0),
                PricePoint::new(d(2025, 1, 14), 221.5),
                PricePoint::new(d(2025, 1, 15), 222.0),
                PricePoint::new(d(2025, 1, 16), 223.25),
            ]
        );
    }

    #[test]
    fn missing_series_is_data_unavailable() {
        let body = r#"{ "Error Message": "Invalid API call." }"#;
        let err = parse_daily_series("ZZZZ", body).unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable { ref symbol, .. } if symbol == "ZZZZ"));
    }

    #[test]
    fn bad_date_key_is_api_error() {
        let body = r#"{ "Time Series (Daily)": { "15/01/2025": { "4. close": "1.0" } } }"#;
        assert!(matches!(
            parse_daily_series("IBM", body),
            Err(CoreError::Api { .. })
        ));
    }

    #[test]
    fn bad_close_is_api_error() {
        let body = r#"{ "Time Series (Daily)": { "2025-01-15": { "4. close": "abc" } } }"#;
        assert!(matches!(
            parse_daily_series("IBM", body),
            Err(CoreError::Api { .. })
        ));
    }

    #[test]
    fn empty_series_object_yields_no_points() {
        let body = r#"{ "Time Series (Daily)": {} }"#;
        assert!(parse_daily_series("IBM", body).unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// QuoteProviderRegistry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn new_creates_empty_registry() {
        let registry = QuoteProviderRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn default_creates_empty_registry() {
        assert!(QuoteProviderRegistry::default().is_empty());
    }

    #[test]
    fn register_keeps_priority_order() {
        let mut registry = QuoteProviderRegistry::new();
        registry.register(Box::new(NamedProvider("primary")));
        registry.register(Box::new(NamedProvider("fallback")));
        assert_eq!(registry.names(), vec!["primary", "fallback"]);
    }

    #[test]
    fn defaults_without_fallback_is_alpha_vantage_only() {
        let registry = QuoteProviderRegistry::new_with_defaults(&Settings::default());
        assert_eq!(registry.names(), vec!["Alpha Vantage"]);
    }

    #[test]
    fn alpha_vantage_name() {
        let p = AlphaVantageProvider::new("demo".into());
        assert_eq!(p.name(), "Alpha Vantage");
    }
}
