//! Offline unit tests for fmdb-db pool configuration and row types.
//! These tests do not require a live database connection.

use fmdb_core::{AppConfig, Environment};
use fmdb_db::{MarketRecord, MarketRow, PoolConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
        log_level: "info".to_string(),
        markets_path: PathBuf::from("./config/markets.yaml"),
        mail_api_url: None,
        mail_api_token: None,
        contact_recipient: "contact@example.com".to_string(),
        contact_sender: "no-reply@example.com".to_string(),
        mail_request_timeout_secs: 30,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`MarketRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn market_row_has_expected_fields() {
    use chrono::Utc;

    let row = MarketRow {
        id: 1_i64,
        name: "Union Square Greenmarket".to_string(),
        address: "E 17th St & Union Square W".to_string(),
        state: "NY".to_string(),
        zip_code: Some("10003".to_string()),
        latitude: Some(40.7359),
        longitude: Some(-73.9911),
        usda_listing_id: None,
        phone: None,
        website: Some("https://www.grownyc.org/greenmarket".to_string()),
        image_url: None,
        google_maps_link: None,
        google_place_id: None,
        rating: Some(4.7),
        products: vec!["produce".to_string()],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.state, "NY");
    assert_eq!(row.zip_code.as_deref(), Some("10003"));
    assert_eq!(row.products.len(), 1);
}

#[test]
fn market_record_supports_missing_point() {
    let record = MarketRecord {
        name: "No Point Market".to_string(),
        address: "1 Somewhere Rd".to_string(),
        state: "VT".to_string(),
        zip_code: None,
        latitude: None,
        longitude: None,
        usda_listing_id: None,
        phone: None,
        website: None,
        image_url: None,
        google_maps_link: None,
        google_place_id: None,
        rating: None,
        products: vec![],
    };

    assert!(record.latitude.is_none());
    assert!(record.longitude.is_none());
}
