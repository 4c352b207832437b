//! Data models for the MiniMate application
//!
//! This module contains the core domain models organized by concern:
//! - Weather: current conditions and the classifier snapshot
//! - Forecast: hourly and daily forecast rows
//! - Location: coordinates and geocoding results
//! - Profile: persisted user settings

pub mod forecast;
pub mod location;
pub mod profile;
pub mod weather;

pub use forecast::{DailyForecast, HourlyForecast, HourlyOutlook};
pub use location::{Location, LocationRecord};
pub use profile::UserProfile;
pub use weather::{CurrentConditions, WeatherSnapshot};
