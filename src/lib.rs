//! `MiniMate` - weather companion that tells you what to wear
//!
//! This library provides current weather and forecasts from Open-Meteo, a
//! rule-based clothing recommendation for the current conditions, and the
//! profile, cache and localization around them.

pub mod cache;
pub mod clothing;
pub mod config;
pub mod error;
pub mod i18n;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod profile;
pub mod report;
pub mod search;
pub mod weather;

// Re-export core types for public API
pub use cache::PersistentCache;
pub use clothing::{
    Advisory, ClothingItem, ClothingRecommendation, WeatherCategory, classify, select_avatar,
};
pub use config::MiniMateConfig;
pub use error::{ErrorCode, MiniMateError};
pub use i18n::{Language, Localizer};
pub use location_resolver::{LocationInput, LocationParser, LocationResolver};
pub use models::{CurrentConditions, Location, UserProfile, WeatherSnapshot};
pub use profile::ProfileStore;
pub use report::WeatherReport;
pub use search::{DebouncedSearch, SearchOutcome};
pub use weather::{CachedWeatherSource, OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MiniMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
