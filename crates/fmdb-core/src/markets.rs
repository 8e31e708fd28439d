use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One market entry in the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub name: String,
    pub address: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub usda_listing_id: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub google_maps_link: Option<String>,
    pub google_place_id: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub products: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketsFile {
    pub markets: Vec<MarketConfig>,
}

/// Load and validate the markets seed file from YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_markets(path: &Path) -> Result<MarketsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MarketsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let markets_file: MarketsFile = serde_yaml::from_str(&content)?;

    validate_markets(&markets_file)?;

    Ok(markets_file)
}

fn validate_markets(markets_file: &MarketsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for market in &markets_file.markets {
        if market.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "market name must be non-empty".to_string(),
            ));
        }
        if market.address.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "market '{}' has an empty address",
                market.name
            )));
        }
        if market.state.len() != 2 || !market.state.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::Validation(format!(
                "market '{}' has invalid state '{}'; must be a 2-letter code",
                market.name, market.state
            )));
        }
        if let Some(ref zip) = market.zip_code {
            if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConfigError::Validation(format!(
                    "market '{}' has invalid zip code '{zip}'",
                    market.name
                )));
            }
        }

        // A point is all-or-nothing: distance math is undefined on half a point.
        match (market.latitude, market.longitude) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(ConfigError::Validation(format!(
                        "market '{}' has latitude {lat} out of range",
                        market.name
                    )));
                }
                if !(-180.0..=180.0).contains(&lng) {
                    return Err(ConfigError::Validation(format!(
                        "market '{}' has longitude {lng} out of range",
                        market.name
                    )));
                }
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "market '{}' has a partial coordinate pair",
                    market.name
                )));
            }
        }

        if let Some(rating) = market.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ConfigError::Validation(format!(
                    "market '{}' has rating {rating} outside 0..=5",
                    market.name
                )));
            }
        }

        let key = (market.name.to_lowercase(), market.address.to_lowercase());
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate market: '{}' at '{}'",
                market.name, market.address
            )));
        }
    }

    Ok(())
}
