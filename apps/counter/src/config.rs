//! # Counter Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CAFE_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup, so no locking is needed.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use cafe_core::menu::MenuCatalog;
use cafe_core::validation::validate_tax_rate_bps;
use cafe_core::{TaxRate, DEFAULT_TAX_RATE};

use crate::error::{AppError, ErrorCode};

/// Counter configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterConfig {
    /// Store name (printed in the banner)
    pub store_name: String,

    /// Tax applied to every bill
    pub tax_rate: TaxRate,

    /// JSON menu file; `None` uses the built-in sample menu
    pub menu_path: Option<PathBuf>,
}

impl Default for CounterConfig {
    /// ## Default Values
    /// - Store: "Cafe Counter"
    /// - Tax: 20%
    /// - Menu: built-in sample
    fn default() -> Self {
        CounterConfig {
            store_name: "Cafe Counter".to_string(),
            tax_rate: DEFAULT_TAX_RATE,
            menu_path: None,
        }
    }
}

impl CounterConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CAFE_STORE_NAME`: Override store name
    /// - `CAFE_TAX_RATE`: Tax rate in percent (e.g., "20" or "8.25")
    /// - `CAFE_MENU_PATH`: Path to a JSON menu file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CounterConfig::default();

        if let Some(store_name) = lookup("CAFE_STORE_NAME") {
            let store_name = store_name.trim();
            if store_name.is_empty() {
                warn!("CAFE_STORE_NAME is blank, keeping default");
            } else {
                config.store_name = store_name.to_string();
            }
        }

        if let Some(rate_text) = lookup("CAFE_TAX_RATE") {
            match parse_tax_percent(&rate_text) {
                Some(rate) => config.tax_rate = rate,
                None => warn!(value = %rate_text, "Ignoring invalid CAFE_TAX_RATE"),
            }
        }

        if let Some(path) = lookup("CAFE_MENU_PATH") {
            if !path.trim().is_empty() {
                config.menu_path = Some(PathBuf::from(path.trim()));
            }
        }

        config
    }

    /// Loads the configured menu, or the sample menu when none is set.
    ///
    /// ## Errors
    /// - `IO` when the file cannot be read
    /// - `MENU_ERROR` when its contents are not a valid menu
    pub fn load_catalog(&self) -> Result<MenuCatalog, AppError> {
        let Some(path) = &self.menu_path else {
            return Ok(MenuCatalog::sample());
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::io(format!("Cannot read menu file {}: {}", path.display(), e))
        })?;
        let catalog = MenuCatalog::from_json(&text)
            .map_err(|e| AppError::new(ErrorCode::MenuError, e.to_string()))?;
        info!(path = %path.display(), items = catalog.len(), "Menu loaded");
        Ok(catalog)
    }
}

/// Parses a percentage such as "20" or "8.25" into a rate between 0 and 100%.
fn parse_tax_percent(text: &str) -> Option<TaxRate> {
    let percent: f64 = text.trim().parse().ok()?;
    if !percent.is_finite() || percent < 0.0 {
        return None;
    }
    let rate = TaxRate::from_percentage(percent);
    validate_tax_rate_bps(rate.bps()).ok()?;
    Some(rate)
}
