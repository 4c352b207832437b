//! Terminal and JSON rendering of weather and clothing results

use std::fmt;

use serde::Serialize;

use crate::clothing::{ClothingRecommendation, classify, select_avatar};
use crate::i18n::{Localizer, Message};
use crate::models::weather::wind_direction_to_cardinal;
use crate::models::{CurrentConditions, DailyForecast, HourlyForecast, Location};

/// Clothing recommendation rendered in the report language
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedClothing {
    pub category: &'static str,
    pub items: Vec<&'static str>,
    pub advisory: &'static str,
}

/// Current weather at a location with what to wear
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub greeting: Option<String>,
    pub location: Location,
    pub current: CurrentConditions,
    pub description: &'static str,
    pub recommendation: ClothingRecommendation,
    pub clothing: LocalizedClothing,
    pub avatar: &'static str,
    #[serde(skip)]
    localizer: Localizer,
}

impl WeatherReport {
    /// Classify `current` and localize the outcome
    pub fn new(location: Location, current: CurrentConditions, localizer: Localizer) -> Self {
        let recommendation = classify(&current.snapshot());
        let clothing = LocalizedClothing {
            category: localizer.category(recommendation.category),
            items: localizer.items(&recommendation.items),
            advisory: localizer.advisory(recommendation.advisory),
        };

        Self {
            greeting: None,
            avatar: select_avatar(recommendation.category),
            description: localizer.weather_code(current.weather_code),
            location,
            current,
            recommendation,
            clothing,
            localizer,
        }
    }

    /// Open the report with "Hello, {name}!"
    #[must_use]
    pub fn with_greeting(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.greeting = Some(format!("{}, {}!", self.localizer.message(Message::Greeting), name));
        }
        self
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.localizer;
        let c = &self.current;

        if let Some(greeting) = &self.greeting {
            writeln!(f, "{greeting}")?;
        }
        writeln!(f, "📍 {} ({})", self.location.name, self.location.format_coordinates())?;
        writeln!(f, "{} {}", c.icon(), self.description)?;
        writeln!(f)?;
        writeln!(f, "  {:<18} {}", l.message(Message::Temperature), c.format_temperature())?;
        writeln!(f, "  {:<18} {}", l.message(Message::FeelsLike), c.format_apparent_temperature())?;
        writeln!(f, "  {:<18} {}", l.message(Message::Wind), c.format_wind())?;
        writeln!(f, "  {:<18} {}", l.message(Message::Precipitation), c.format_precipitation())?;
        if c.snowfall > 0.0 {
            writeln!(f, "  {:<18} {}", l.message(Message::Snowfall), c.format_snowfall())?;
        }
        writeln!(f, "  {:<18} {}%", l.message(Message::Humidity), c.relative_humidity)?;
        writeln!(f, "  {:<18} {}", l.message(Message::Pressure), c.format_pressure())?;
        writeln!(f, "  {:<18} {}", l.message(Message::Visibility), c.format_visibility())?;
        writeln!(f, "  {:<18} {:.1}", l.message(Message::UvIndex), c.uv_index)?;
        writeln!(f)?;
        writeln!(f, "👗 {}: {}", l.message(Message::WhatToWear), self.clothing.category)?;
        for (item, text) in self.recommendation.items.iter().zip(&self.clothing.items) {
            writeln!(f, "  {} {}", item.icon(), text)?;
        }
        writeln!(f)?;
        writeln!(f, "💬 {}", self.clothing.advisory)?;
        write!(f, "🖼  {}", self.avatar)
    }
}

/// Table of upcoming hours
pub fn render_hourly(hours: &[&HourlyForecast], localizer: &Localizer) -> String {
    let mut out = format!("{}\n", localizer.message(Message::NextHours));
    for hour in hours {
        out.push_str(&format!(
            "  {}  {:>6.1}°C  {:>3}%  {:>5.1} mm  {:>5.1} km/h {:<3}  {}\n",
            hour.format_time(),
            hour.temperature,
            hour.precipitation_probability,
            hour.precipitation,
            hour.wind_speed,
            wind_direction_to_cardinal(hour.wind_direction),
            localizer.weather_code(hour.weather_code),
        ));
    }
    out
}

/// Table of daily summaries
pub fn render_daily(days: &[DailyForecast], localizer: &Localizer) -> String {
    let mut out = format!("{}\n", localizer.message(Message::NextDays));
    for day in days {
        let sun = match (day.sunrise, day.sunset) {
            (Some(rise), Some(set)) => format!(
                "  {} {}  {} {}",
                localizer.message(Message::Sunrise),
                rise.format("%H:%M"),
                localizer.message(Message::Sunset),
                set.format("%H:%M")
            ),
            _ => String::new(),
        };
        out.push_str(&format!(
            "  {}  {:<12}  {:>3}%  {:>5.1} mm  {}{}\n",
            day.date.format("%a %d.%m."),
            day.format_range(),
            day.precipitation_probability,
            day.precipitation_sum,
            localizer.weather_code(day.weather_code),
            sun,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clothing::WeatherCategory;
    use chrono::{NaiveDate, NaiveDateTime};

    fn conditions(temperature: f64, weather_code: i32) -> CurrentConditions {
        CurrentConditions {
            time: NaiveDateTime::parse_from_str("2025-01-15T08:00", "%Y-%m-%dT%H:%M").unwrap(),
            utc_offset_seconds: 3600,
            timezone: Some("Europe/Berlin".to_string()),
            temperature,
            relative_humidity: 88,
            apparent_temperature: temperature - 1.0,
            is_day: true,
            precipitation: 0.0,
            rain: 0.0,
            showers: 0.0,
            snowfall: 0.0,
            weather_code,
            cloud_cover: 100,
            surface_pressure: 1012.0,
            wind_speed: 8.0,
            wind_direction: 270,
            wind_gusts: 15.0,
            uv_index: 0.5,
            visibility: 900.0,
        }
    }

    fn berlin() -> Location {
        Location::new(52.52, 13.405, "Berlin, Deutschland".to_string())
    }

    #[test]
    fn test_report_classifies_and_localizes() {
        let report = WeatherReport::new(berlin(), conditions(5.0, 45), Localizer::new("de"));

        assert_eq!(report.recommendation.category, WeatherCategory::Cool);
        assert_eq!(report.clothing.category, "Kühl");
        assert!(report.clothing.items.contains(&"Mütze"));
        assert_eq!(report.description, "Nebel");
        assert_eq!(report.avatar, "images/avatars/cool.jpg");
    }

    #[test]
    fn test_display_contains_sections() {
        let report = WeatherReport::new(berlin(), conditions(22.0, 0), Localizer::new("en"))
            .with_greeting("Max");
        let text = report.to_string();

        assert!(text.starts_with("Hello, Max!"));
        assert!(text.contains("Berlin, Deutschland"));
        assert!(text.contains("Clear sky"));
        assert!(text.contains("What to wear: Hot"));
        assert!(text.contains("Sandals"));
        assert!(text.contains("Don't forget sun protection"));
        assert!(text.contains("images/avatars/hot.jpg"));
    }

    #[test]
    fn test_blank_name_has_no_greeting() {
        let report = WeatherReport::new(berlin(), conditions(22.0, 0), Localizer::new("en"))
            .with_greeting("  ");
        assert!(report.greeting.is_none());
    }

    #[test]
    fn test_json_form() {
        let report = WeatherReport::new(berlin(), conditions(-15.0, 0), Localizer::new("en"));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["recommendation"]["category"], "ExtremeCold");
        assert_eq!(json["clothing"]["category"], "Extreme cold");
        assert_eq!(json["location"]["name"], "Berlin, Deutschland");
        assert_eq!(json["avatar"], "images/avatars/extreme-cold.jpg");
        assert!(json.get("localizer").is_none());
    }

    #[test]
    fn test_render_daily_with_sun_times() {
        let day = DailyForecast {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            temperature_max: 24.4,
            temperature_min: 12.2,
            precipitation_probability: 20,
            precipitation_sum: 0.4,
            rain_sum: 0.4,
            weather_code: 2,
            sunrise: NaiveDateTime::parse_from_str("2025-06-02T05:33", "%Y-%m-%dT%H:%M").ok(),
            sunset: NaiveDateTime::parse_from_str("2025-06-02T21:20", "%Y-%m-%dT%H:%M").ok(),
            wind_speed_max: 12.0,
            wind_gusts_max: 25.0,
        };
        let text = render_daily(&[day], &Localizer::new("de"));

        assert!(text.starts_with("Nächste Tage"));
        assert!(text.contains("12° / 24°"));
        assert!(text.contains("Teilweise bewölkt"));
        assert!(text.contains("Sonnenaufgang 05:33"));
    }
}
