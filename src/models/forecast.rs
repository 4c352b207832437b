//! Hourly and daily forecast models

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Forecast for a single hour, times are local to the forecast location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: NaiveDateTime,
    pub temperature: f64,
    /// Precipitation probability in percent
    pub precipitation_probability: u8,
    pub precipitation: f64,
    pub rain: f64,
    pub showers: f64,
    pub weather_code: i32,
    pub cloud_cover: u8,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub wind_direction: i32,
    /// Relative humidity in percent
    pub humidity: u8,
    pub is_day: bool,
}

impl HourlyForecast {
    #[must_use]
    pub fn format_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// Hourly rows of a forecast plus the timezone they are expressed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyOutlook {
    pub utc_offset_seconds: i32,
    pub hours: Vec<HourlyForecast>,
}

impl HourlyOutlook {
    /// Local wall-clock time for a UTC instant
    #[must_use]
    pub fn to_local(&self, now_utc: NaiveDateTime) -> NaiveDateTime {
        now_utc + Duration::seconds(i64::from(self.utc_offset_seconds))
    }

    /// The `count` hours starting at the next full hour after `now_local`
    #[must_use]
    pub fn upcoming(&self, now_local: NaiveDateTime, count: u32) -> Vec<&HourlyForecast> {
        let current_hour = now_local
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now_local);
        let Some(start) = current_hour.checked_add_signed(Duration::hours(1)) else {
            return Vec::new();
        };

        self.hours
            .iter()
            .filter(|hour| hour.time >= start)
            .take(usize::try_from(count).unwrap_or(usize::MAX))
            .collect()
    }
}

/// Forecast summary for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_probability: u8,
    pub precipitation_sum: f64,
    pub rain_sum: f64,
    pub weather_code: i32,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    /// Maximum wind speed in km/h
    pub wind_speed_max: f64,
    pub wind_gusts_max: f64,
}

impl DailyForecast {
    #[must_use]
    pub fn format_range(&self) -> String {
        format!("{:.0}° / {:.0}°", self.temperature_min, self.temperature_max)
    }

    /// Daylight duration when both sunrise and sunset are known
    #[must_use]
    pub fn daylight(&self) -> Option<Duration> {
        match (self.sunrise, self.sunset) {
            (Some(rise), Some(set)) if set > rise => Some(set - rise),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn hour(time: &str) -> HourlyForecast {
        HourlyForecast {
            time: at(time),
            temperature: 10.0,
            precipitation_probability: 0,
            precipitation: 0.0,
            rain: 0.0,
            showers: 0.0,
            weather_code: 0,
            cloud_cover: 0,
            wind_speed: 5.0,
            wind_direction: 180,
            humidity: 50,
            is_day: true,
        }
    }

    fn outlook() -> HourlyOutlook {
        let start = at("2025-03-01T00:00");
        let hours = (0..48)
            .map(|i| {
                let time = start + Duration::hours(i);
                hour(&time.format("%Y-%m-%dT%H:%M").to_string())
            })
            .collect();
        HourlyOutlook {
            utc_offset_seconds: 3600,
            hours,
        }
    }

    #[test]
    fn test_upcoming_starts_at_next_full_hour() {
        let outlook = outlook();
        let upcoming = outlook.upcoming(at("2025-03-01T09:41"), 24);

        assert_eq!(upcoming.len(), 24);
        assert_eq!(upcoming[0].time, at("2025-03-01T10:00"));
        assert_eq!(upcoming[23].time, at("2025-03-02T09:00"));
    }

    #[test]
    fn test_upcoming_on_the_hour_skips_current_hour() {
        let outlook = outlook();
        let upcoming = outlook.upcoming(at("2025-03-01T09:00"), 3);
        let times: Vec<String> = upcoming.iter().map(|h| h.format_time()).collect();
        assert_eq!(times, vec!["10:00", "11:00", "12:00"]);
    }

    #[test]
    fn test_upcoming_truncated_at_end_of_data() {
        let outlook = outlook();
        let upcoming = outlook.upcoming(at("2025-03-02T20:30"), 24);
        assert_eq!(upcoming.len(), 3);
    }

    #[test]
    fn test_upcoming_with_huge_count_returns_remaining_rows() {
        let outlook = outlook();
        let upcoming = outlook.upcoming(at("2025-03-01T09:41"), u32::MAX);
        assert_eq!(upcoming.len(), 38);
        assert_eq!(upcoming[0].time, at("2025-03-01T10:00"));
    }

    #[test]
    fn test_upcoming_at_end_of_time_is_empty() {
        let outlook = outlook();
        assert!(outlook.upcoming(NaiveDateTime::MAX, 24).is_empty());
    }

    #[test]
    fn test_to_local_applies_offset() {
        let outlook = outlook();
        assert_eq!(outlook.to_local(at("2025-03-01T08:00")), at("2025-03-01T09:00"));
    }

    #[test]
    fn test_daylight() {
        let day = DailyForecast {
            date: NaiveDate::from_ymd_opt(2025, 6, 21).unwrap(),
            temperature_max: 24.0,
            temperature_min: 12.0,
            precipitation_probability: 10,
            precipitation_sum: 0.0,
            rain_sum: 0.0,
            weather_code: 1,
            sunrise: Some(at("2025-06-21T05:00")),
            sunset: Some(at("2025-06-21T21:30")),
            wind_speed_max: 12.0,
            wind_gusts_max: 25.0,
        };
        assert_eq!(day.daylight(), Some(Duration::minutes(16 * 60 + 30)));
        assert_eq!(day.format_range(), "12° / 24°");

        let unknown = DailyForecast { sunset: None, ..day };
        assert_eq!(unknown.daylight(), None);
    }
}
