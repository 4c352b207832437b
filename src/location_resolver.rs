//! Location Resolution Module
//!
//! Turns user input (coordinates or a place name) into a named [`Location`]
//! the weather can be fetched for.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::i18n::{Localizer, Message};
use crate::models::{Location, UserProfile};
use crate::weather::WeatherSource;
use crate::MiniMateError;

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Coordinates (latitude, longitude)
    Coordinates(f64, f64),
    /// Location name (city, region, etc.)
    Name(String),
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse "lat,lon", "lat lon" or a place name
    pub fn parse(input: &str) -> crate::Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MiniMateError::validation("Location must not be empty"));
        }

        match Self::split_coordinates(input) {
            Some((lat, lon)) => {
                Self::validate_coordinates(lat, lon)?;
                Ok(LocationInput::Coordinates(lat, lon))
            }
            None => Ok(LocationInput::Name(input.to_string())),
        }
    }

    /// Two numbers separated by a comma and/or whitespace
    fn split_coordinates(input: &str) -> Option<(f64, f64)> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        match parts.as_slice() {
            [lat, lon] => Some((lat.parse::<f64>().ok()?, lon.parse::<f64>().ok()?)),
            _ => None,
        }
    }

    pub fn validate_coordinates(lat: f64, lon: f64) -> crate::Result<()> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MiniMateError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(MiniMateError::validation(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            )));
        }

        Ok(())
    }
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve explicit input, or fall back to the profile's default location
    pub async fn resolve(
        source: &dyn WeatherSource,
        input: Option<&str>,
        profile: &UserProfile,
        localizer: &Localizer,
    ) -> Result<Location> {
        match input {
            Some(input) => {
                let parsed = LocationParser::parse(input)?;
                Self::resolve_location(source, parsed, localizer).await
            }
            None => profile.default_location().ok_or_else(|| {
                MiniMateError::validation(
                    "No location given and no default location in the profile. \
                     Use --location or `minimate profile set --location`.",
                )
                .into()
            }),
        }
    }

    /// Resolve a parsed location input into a structured Location
    pub async fn resolve_location(
        source: &dyn WeatherSource,
        location_input: LocationInput,
        localizer: &Localizer,
    ) -> Result<Location> {
        debug!("Resolving location input: {:?}", location_input);

        let location = match location_input {
            LocationInput::Coordinates(lat, lon) => {
                Self::resolve_coordinates(source, lat, lon, localizer).await
            }
            LocationInput::Name(name) => Self::resolve_name(source, &name, localizer).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );

        Ok(location)
    }

    /// Name coordinates via reverse geocoding; never fails
    pub async fn resolve_coordinates(
        source: &dyn WeatherSource,
        lat: f64,
        lon: f64,
        localizer: &Localizer,
    ) -> Location {
        debug!("Resolving coordinates: ({}, {})", lat, lon);

        let name = match source.reverse_geocode(lat, lon, localizer.api_language()).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                debug!("No reverse geocoding result");
                localizer.message(Message::UnknownLocation).to_string()
            }
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                localizer.message(Message::MyLocation).to_string()
            }
        };

        Location::new(lat, lon, name)
    }

    /// Resolve a location name to coordinates via geocoding
    async fn resolve_name(
        source: &dyn WeatherSource,
        name: &str,
        localizer: &Localizer,
    ) -> Result<Location> {
        debug!("Geocoding location name: {}", name);

        let results = source
            .search_location(name, localizer.api_language())
            .await
            .with_context(|| format!("Failed to look up '{name}'"))?;

        let Some(best) = results.into_iter().next() else {
            return Err(MiniMateError::api(
                format!("Location not found: {name}"),
                crate::ErrorCode::ApiLocationNotFound,
            )
            .into());
        };

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            best.name, best.latitude, best.longitude
        );

        Ok(Location::from(best))
    }
}
