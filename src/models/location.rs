//! Location models for geographic coordinates and geocoding results

use serde::{Deserialize, Serialize};

/// A named point the weather is fetched for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country name
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Cache key for one kind of weather data at this location
    #[must_use]
    pub fn cache_key(&self, kind: &str) -> String {
        cache_key(kind, self.latitude, self.longitude)
    }
}

/// Cache key from rounded coordinates, shared by everything keyed on a position
#[must_use]
pub fn cache_key(kind: &str, latitude: f64, longitude: f64) -> String {
    let lat = (latitude * 100.0).round() / 100.0;
    let lon = (longitude * 100.0).round() / 100.0;
    format!("weather:{kind}:{lat:.2}:{lon:.2}")
}

/// One result of the Open-Meteo geocoding search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub feature_code: Option<String>,
    pub country_code: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
    pub admin4: Option<String>,
    pub timezone: Option<String>,
    pub population: Option<i64>,
    pub country_id: Option<i64>,
    pub country: Option<String>,
    pub postcodes: Option<Vec<String>>,
}

impl LocationRecord {
    /// "Name, Region, Country" with absent parts left out
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut name = self.name.clone();
        for part in [&self.admin1, &self.country].into_iter().flatten() {
            name.push_str(", ");
            name.push_str(part);
        }
        name
    }
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Location {
            latitude: record.latitude,
            longitude: record.longitude,
            name: record.display_name(),
            country: record.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LocationRecord {
        LocationRecord {
            id: 2950159,
            name: "Berlin".to_string(),
            latitude: 52.52437,
            longitude: 13.41053,
            elevation: Some(74.0),
            feature_code: Some("PPLC".to_string()),
            country_code: Some("DE".to_string()),
            admin1: Some("Land Berlin".to_string()),
            admin2: None,
            admin3: None,
            admin4: None,
            timezone: Some("Europe/Berlin".to_string()),
            population: Some(3426354),
            country_id: Some(2921044),
            country: Some("Deutschland".to_string()),
            postcodes: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(record().display_name(), "Berlin, Land Berlin, Deutschland");

        let bare = LocationRecord {
            admin1: None,
            country: None,
            ..record()
        };
        assert_eq!(bare.display_name(), "Berlin");

        let no_region = LocationRecord {
            admin1: None,
            ..record()
        };
        assert_eq!(no_region.display_name(), "Berlin, Deutschland");
    }

    #[test]
    fn test_record_to_location() {
        let location: Location = record().into();
        assert_eq!(location.name, "Berlin, Land Berlin, Deutschland");
        assert_eq!(location.latitude, 52.52437);
        assert_eq!(location.country.as_deref(), Some("Deutschland"));
    }

    #[test]
    fn test_location_cache_key() {
        let location = Location::new(46.8182, 8.2275, "Interlaken".to_string());
        assert_eq!(location.cache_key("current"), "weather:current:46.82:8.23");
    }
}
