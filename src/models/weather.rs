//! Current weather data model and display methods

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Readings the clothing classifier works on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature in °C
    pub temperature_c: f64,
    /// "Feels like" temperature in °C
    pub apparent_temperature_c: f64,
    /// Rain in mm
    pub rain_mm: f64,
    /// Snowfall in cm
    pub snowfall_cm: f64,
    /// Wind speed at 10 m in km/h
    pub wind_speed_kmh: f64,
    /// WMO weather code (0-99)
    pub weather_code: i32,
}

impl WeatherSnapshot {
    /// WMO codes 45 (fog) and 48 (depositing rime fog)
    #[must_use]
    pub fn is_foggy(&self) -> bool {
        matches!(self.weather_code, 45 | 48)
    }

    /// Degrees the apparent temperature sits below the measured one
    #[must_use]
    pub fn wind_chill(&self) -> f64 {
        self.temperature_c - self.apparent_temperature_c
    }
}

/// Full "current" block as delivered by Open-Meteo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time in the location's local time
    pub time: NaiveDateTime,
    /// Offset of the location's timezone from UTC
    pub utc_offset_seconds: i32,
    /// Timezone name reported by the API (e.g. "Europe/Berlin")
    pub timezone: Option<String>,
    pub temperature: f64,
    pub relative_humidity: u8,
    pub apparent_temperature: f64,
    pub is_day: bool,
    pub precipitation: f64,
    pub rain: f64,
    pub showers: f64,
    /// Snowfall in cm
    pub snowfall: f64,
    pub weather_code: i32,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: u8,
    /// Surface pressure in hPa
    pub surface_pressure: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: i32,
    /// Wind gusts in km/h
    pub wind_gusts: f64,
    pub uv_index: f64,
    /// Visibility in meters
    pub visibility: f64,
}

impl CurrentConditions {
    /// Extract the classifier input
    #[must_use]
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: self.temperature,
            apparent_temperature_c: self.apparent_temperature,
            rain_mm: self.rain,
            snowfall_cm: self.snowfall,
            wind_speed_kmh: self.wind_speed,
            weather_code: self.weather_code,
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    #[must_use]
    pub fn format_apparent_temperature(&self) -> String {
        format!("{:.1}°C", self.apparent_temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!(
            "{:.1} km/h {} (gusts {:.1} km/h)",
            self.wind_speed,
            wind_direction_to_cardinal(self.wind_direction),
            self.wind_gusts
        )
    }

    #[must_use]
    pub fn format_precipitation(&self) -> String {
        format!("{:.1} mm", self.precipitation)
    }

    #[must_use]
    pub fn format_snowfall(&self) -> String {
        format!("{:.1} cm", self.snowfall)
    }

    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("{:.1} hPa", self.surface_pressure)
    }

    /// Visibility is reported in meters, displayed in kilometers
    #[must_use]
    pub fn format_visibility(&self) -> String {
        format!("{:.1} km", self.visibility / 1000.0)
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        weather_icon(self.weather_code, self.is_day)
    }
}

/// Convert wind direction from degrees to a 16-point cardinal direction
#[must_use]
pub fn wind_direction_to_cardinal(degrees: i32) -> &'static str {
    match degrees.rem_euclid(360) {
        0..12 => "N",
        12..34 => "NNE",
        34..56 => "NE",
        56..78 => "ENE",
        78..102 => "E",
        102..124 => "ESE",
        124..146 => "SE",
        146..168 => "SSE",
        168..192 => "S",
        192..214 => "SSW",
        214..236 => "SW",
        236..258 => "WSW",
        258..282 => "W",
        282..304 => "WNW",
        304..326 => "NW",
        326..348 => "NNW",
        _ => "N",
    }
}

/// Emoji icon for a WMO weather code
#[must_use]
pub fn weather_icon(code: i32, is_day: bool) -> &'static str {
    match code {
        0 | 1 if !is_day => "🌙",
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 53 | 55 => "🌦️",
        56 | 57 => "🌨️",
        61 | 63 | 65 => "🌧️",
        66 | 67 => "🌨️",
        71 | 73 | 75 | 77 => "❄️",
        80 | 81 | 82 => "🌦️",
        85 | 86 => "🌨️",
        95 | 96 | 99 => "⛈️",
        _ => "❓",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            time: NaiveDateTime::parse_from_str("2025-01-15T08:00", "%Y-%m-%dT%H:%M").unwrap(),
            utc_offset_seconds: 3600,
            timezone: Some("Europe/Berlin".to_string()),
            temperature: 4.2,
            relative_humidity: 81,
            apparent_temperature: 0.9,
            is_day: true,
            precipitation: 0.0,
            rain: 0.0,
            showers: 0.0,
            snowfall: 0.0,
            weather_code: 45,
            cloud_cover: 100,
            surface_pressure: 1012.4,
            wind_speed: 14.8,
            wind_direction: 250,
            wind_gusts: 31.0,
            uv_index: 0.4,
            visibility: 2400.0,
        }
    }

    #[test]
    fn test_wind_direction_to_cardinal() {
        assert_eq!(wind_direction_to_cardinal(0), "N");
        assert_eq!(wind_direction_to_cardinal(11), "N");
        assert_eq!(wind_direction_to_cardinal(12), "NNE");
        assert_eq!(wind_direction_to_cardinal(45), "NE");
        assert_eq!(wind_direction_to_cardinal(90), "E");
        assert_eq!(wind_direction_to_cardinal(180), "S");
        assert_eq!(wind_direction_to_cardinal(270), "W");
        assert_eq!(wind_direction_to_cardinal(348), "N");
        assert_eq!(wind_direction_to_cardinal(360), "N");
        assert_eq!(wind_direction_to_cardinal(-90), "W");
    }

    #[test]
    fn test_snapshot_takes_classifier_fields() {
        let snapshot = conditions().snapshot();
        assert_eq!(snapshot.temperature_c, 4.2);
        assert_eq!(snapshot.apparent_temperature_c, 0.9);
        assert_eq!(snapshot.wind_speed_kmh, 14.8);
        assert!(snapshot.is_foggy());
        assert!((snapshot.wind_chill() - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_fog_codes() {
        let mut snapshot = conditions().snapshot();
        snapshot.weather_code = 48;
        assert!(snapshot.is_foggy());
        snapshot.weather_code = 3;
        assert!(!snapshot.is_foggy());
    }

    #[test]
    fn test_formatting() {
        let current = conditions();
        assert_eq!(current.format_temperature(), "4.2°C");
        assert_eq!(current.format_wind(), "14.8 km/h WSW (gusts 31.0 km/h)");
        assert_eq!(current.format_visibility(), "2.4 km");
        assert_eq!(current.icon(), "🌫️");
    }

    #[test]
    fn test_night_icon() {
        assert_eq!(weather_icon(0, false), "🌙");
        assert_eq!(weather_icon(0, true), "☀️");
        assert_eq!(weather_icon(2, false), "⛅");
        assert_eq!(weather_icon(42, true), "❓");
    }
}
