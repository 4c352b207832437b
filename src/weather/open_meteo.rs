//! HTTP client for the Open-Meteo forecast and geocoding APIs and Nominatim
//! reverse geocoding

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::WeatherSource;
use super::nominatim::NominatimResponse;
use super::rate_limit::RateLimiter;
use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, DailyForecast, HourlyForecast, HourlyOutlook, LocationRecord};
use crate::{ErrorCode, MiniMateError, Result};

const CURRENT_PARAMS: [&str; 16] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "is_day",
    "precipitation",
    "rain",
    "showers",
    "snowfall",
    "weather_code",
    "cloud_cover",
    "surface_pressure",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "uv_index",
    "visibility",
];

const HOURLY_PARAMS: [&str; 11] = [
    "temperature_2m",
    "precipitation_probability",
    "precipitation",
    "rain",
    "showers",
    "weather_code",
    "cloud_cover",
    "wind_speed_10m",
    "wind_direction_10m",
    "relative_humidity_2m",
    "is_day",
];

const DAILY_PARAMS: [&str; 10] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_probability_max",
    "precipitation_sum",
    "rain_sum",
    "weather_code",
    "sunrise",
    "sunset",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
];

/// Timestamp format of Open-Meteo's `timezone=auto` responses
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum trimmed length of a location search query
pub const MIN_QUERY_LENGTH: usize = 2;

pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    forecast_url: String,
    geocoding_url: String,
    reverse_geocoding_url: String,
    search_results: u32,
    rate_limiter: Mutex<RateLimiter>,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig, search_results: u32) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MiniMateError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            reverse_geocoding_url: config.reverse_geocoding_url.trim_end_matches('/').to_string(),
            search_results,
            rate_limiter: Mutex::new(RateLimiter::new(config.requests_per_minute)),
        })
    }

    fn forecast_request_url(&self, lat: f64, lon: f64, block: &str, params: &[&str], days: u8) -> String {
        format!(
            "{}/forecast?latitude={:.4}&longitude={:.4}&{}={}&timezone=auto&forecast_days={}",
            self.forecast_url,
            lat,
            lon,
            block,
            params.join(","),
            days
        )
    }

    fn check_rate_limit(&self) -> Result<()> {
        let mut limiter = self
            .rate_limiter
            .lock()
            .map_err(|_| MiniMateError::general("Rate limiter lock poisoned"))?;
        if limiter.allow_request() {
            return Ok(());
        }
        let wait_time = limiter.time_until_next_request();
        warn!("Rate limit exceeded, next request in {:.1}s", wait_time.as_secs_f64());
        Err(MiniMateError::api_with_context(
            format!(
                "Rate limit exceeded. Please wait {} seconds.",
                wait_time.as_secs().max(1)
            ),
            ErrorCode::ApiRateLimit,
            HashMap::from([("wait_time".to_string(), wait_time.as_secs().to_string())]),
        ))
    }

    /// GET `url` and decode the JSON body, mapping failures to API error codes
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request_start = Instant::now();
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            MiniMateError::api_with_context(
                format!("Request failed: {e}"),
                ErrorCode::ApiNetworkError,
                HashMap::from([("url".to_string(), url.to_string())]),
            )
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            request_start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(status_error(status, url));
        }

        let body = response.text().await.map_err(|e| {
            MiniMateError::api(format!("Failed to read response body: {e}"), ErrorCode::ApiNetworkError)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected response body: {}", e);
            MiniMateError::api_with_context(
                format!("Failed to parse response: {e}"),
                ErrorCode::ApiInvalidResponse,
                HashMap::from([("url".to_string(), url.to_string())]),
            )
        })
    }
}

fn status_error(status: StatusCode, url: &str) -> MiniMateError {
    let context = HashMap::from([
        ("status".to_string(), status.as_u16().to_string()),
        ("url".to_string(), url.to_string()),
    ]);
    match status {
        StatusCode::NOT_FOUND => {
            warn!("Location not found (HTTP 404)");
            MiniMateError::api_with_context(
                "Location not found",
                ErrorCode::ApiLocationNotFound,
                context,
            )
        }
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limited by server (HTTP 429)");
            MiniMateError::api_with_context(
                "Rate limited by server",
                ErrorCode::ApiRateLimit,
                context,
            )
        }
        _ => {
            warn!("Request failed with HTTP {}", status);
            MiniMateError::api_with_context(
                format!("Request failed with HTTP {status}"),
                ErrorCode::ApiNetworkError,
                context,
            )
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        let url = self.forecast_request_url(latitude, longitude, "current", &CURRENT_PARAMS, 1);
        let response: ForecastResponse = self.get_json(&url).await?;
        let current = response.current.ok_or_else(|| {
            MiniMateError::api("Response has no current weather block", ErrorCode::ApiInvalidResponse)
        })?;
        let conditions = current.into_conditions(response.utc_offset_seconds, response.timezone)?;
        info!(
            "Current weather: {:.1}°C, code {}",
            conditions.temperature, conditions.weather_code
        );
        Ok(conditions)
    }

    #[instrument(skip(self))]
    async fn hourly_forecast(&self, latitude: f64, longitude: f64) -> Result<HourlyOutlook> {
        let url = self.forecast_request_url(latitude, longitude, "hourly", &HOURLY_PARAMS, 2);
        let response: ForecastResponse = self.get_json(&url).await?;
        let hours = response
            .hourly
            .map(|hourly| hourly.into_rows())
            .unwrap_or_default();
        debug!("Received {} hourly rows", hours.len());
        Ok(HourlyOutlook {
            utc_offset_seconds: response.utc_offset_seconds,
            hours,
        })
    }

    #[instrument(skip(self))]
    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>> {
        let url = self.forecast_request_url(latitude, longitude, "daily", &DAILY_PARAMS, 7);
        let response: ForecastResponse = self.get_json(&url).await?;
        let days = response
            .daily
            .map(|daily| daily.into_rows())
            .unwrap_or_default();
        debug!("Received {} daily rows", days.len());
        Ok(days)
    }

    #[instrument(skip(self))]
    async fn search_location(&self, query: &str, language: &str) -> Result<Vec<LocationRecord>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            debug!("Query too short, skipping search");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/search?name={}&count={}&language={}&format=json",
            self.geocoding_url,
            urlencoding::encode(query),
            self.search_results,
            urlencoding::encode(language)
        );
        let response: GeocodingResponse = self.get_json(&url).await?;
        let results = response.results.unwrap_or_default();
        info!("Found {} locations for '{}'", results.len(), query);
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, latitude: f64, longitude: f64, language: &str) -> Result<Option<String>> {
        self.check_rate_limit()?;

        let url = format!(
            "{}/reverse?lat={:.6}&lon={:.6}&format=json&addressdetails=1&accept-language={}",
            self.reverse_geocoding_url,
            latitude,
            longitude,
            urlencoding::encode(language)
        );
        let response: NominatimResponse = self.get_json(&url).await?;
        let name = response.location_name();
        if let Some(name) = &name {
            info!("Reverse geocoded to: {}", name);
        }
        Ok(name)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    timezone: Option<String>,
    current: Option<CurrentBlock>,
    hourly: Option<HourlyBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<LocationRecord>>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    #[serde(rename = "temperature_2m")]
    temperature: Option<f64>,
    #[serde(rename = "relative_humidity_2m")]
    relative_humidity: Option<f64>,
    apparent_temperature: Option<f64>,
    is_day: Option<u8>,
    precipitation: Option<f64>,
    rain: Option<f64>,
    showers: Option<f64>,
    snowfall: Option<f64>,
    weather_code: Option<i32>,
    cloud_cover: Option<f64>,
    surface_pressure: Option<f64>,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: Option<f64>,
    #[serde(rename = "wind_direction_10m")]
    wind_direction: Option<f64>,
    #[serde(rename = "wind_gusts_10m")]
    wind_gusts: Option<f64>,
    uv_index: Option<f64>,
    visibility: Option<f64>,
}

impl CurrentBlock {
    fn into_conditions(self, utc_offset_seconds: i32, timezone: Option<String>) -> Result<CurrentConditions> {
        let time = NaiveDateTime::parse_from_str(&self.time, TIME_FORMAT).map_err(|e| {
            MiniMateError::api(
                format!("Invalid observation time '{}': {e}", self.time),
                ErrorCode::ApiInvalidResponse,
            )
        })?;
        // A missing temperature must not look like 0 °C to the classifier
        let temperature = self.temperature.unwrap_or(f64::NAN);

        Ok(CurrentConditions {
            time,
            utc_offset_seconds,
            timezone,
            temperature,
            relative_humidity: percent(self.relative_humidity),
            apparent_temperature: self.apparent_temperature.unwrap_or(temperature),
            is_day: self.is_day.unwrap_or(1) == 1,
            precipitation: self.precipitation.unwrap_or_default(),
            rain: self.rain.unwrap_or_default(),
            showers: self.showers.unwrap_or_default(),
            snowfall: self.snowfall.unwrap_or_default(),
            weather_code: self.weather_code.unwrap_or_default(),
            cloud_cover: percent(self.cloud_cover),
            surface_pressure: self.surface_pressure.unwrap_or_default(),
            wind_speed: self.wind_speed.unwrap_or_default(),
            wind_direction: degrees(self.wind_direction),
            wind_gusts: self.wind_gusts.unwrap_or_default(),
            uv_index: self.uv_index.unwrap_or_default(),
            visibility: self.visibility.unwrap_or_default(),
        })
    }
}

type Column<T> = Option<Vec<Option<T>>>;

fn cell<T: Copy>(column: &Column<T>, index: usize) -> Option<T> {
    column.as_ref().and_then(|values| values.get(index).copied().flatten())
}

fn percent(value: Option<f64>) -> u8 {
    value.map_or(0, |v| v.clamp(0.0, 100.0).round() as u8)
}

fn degrees(value: Option<f64>) -> i32 {
    value.map_or(0, |v| v.round() as i32)
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    temperature: Column<f64>,
    precipitation_probability: Column<f64>,
    precipitation: Column<f64>,
    rain: Column<f64>,
    showers: Column<f64>,
    weather_code: Column<i32>,
    cloud_cover: Column<f64>,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: Column<f64>,
    #[serde(rename = "wind_direction_10m")]
    wind_direction: Column<f64>,
    #[serde(rename = "relative_humidity_2m")]
    humidity: Column<f64>,
    is_day: Column<u8>,
}

impl HourlyBlock {
    fn into_rows(self) -> Vec<HourlyForecast> {
        self.time
            .iter()
            .enumerate()
            .filter_map(|(i, raw_time)| {
                let time = match NaiveDateTime::parse_from_str(raw_time, TIME_FORMAT) {
                    Ok(time) => time,
                    Err(e) => {
                        warn!("Skipping hourly row {} with time '{}': {}", i, raw_time, e);
                        return None;
                    }
                };
                Some(HourlyForecast {
                    time,
                    temperature: cell(&self.temperature, i).unwrap_or_default(),
                    precipitation_probability: percent(cell(&self.precipitation_probability, i)),
                    precipitation: cell(&self.precipitation, i).unwrap_or_default(),
                    rain: cell(&self.rain, i).unwrap_or_default(),
                    showers: cell(&self.showers, i).unwrap_or_default(),
                    weather_code: cell(&self.weather_code, i).unwrap_or_default(),
                    cloud_cover: percent(cell(&self.cloud_cover, i)),
                    wind_speed: cell(&self.wind_speed, i).unwrap_or_default(),
                    wind_direction: degrees(cell(&self.wind_direction, i)),
                    humidity: percent(cell(&self.humidity, i)),
                    is_day: cell(&self.is_day, i).unwrap_or(1) == 1,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Column<f64>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Column<f64>,
    precipitation_probability_max: Column<f64>,
    precipitation_sum: Column<f64>,
    rain_sum: Column<f64>,
    weather_code: Column<i32>,
    sunrise: Option<Vec<Option<String>>>,
    sunset: Option<Vec<Option<String>>>,
    #[serde(rename = "wind_speed_10m_max")]
    wind_speed_max: Column<f64>,
    #[serde(rename = "wind_gusts_10m_max")]
    wind_gusts_max: Column<f64>,
}

fn time_cell(column: &Option<Vec<Option<String>>>, index: usize) -> Option<NaiveDateTime> {
    let raw = column.as_ref()?.get(index)?.as_deref()?;
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT).ok()
}

impl DailyBlock {
    fn into_rows(self) -> Vec<DailyForecast> {
        self.time
            .iter()
            .enumerate()
            .filter_map(|(i, raw_date)| {
                let date = match NaiveDate::parse_from_str(raw_date, DATE_FORMAT) {
                    Ok(date) => date,
                    Err(e) => {
                        warn!("Skipping daily row {} with date '{}': {}", i, raw_date, e);
                        return None;
                    }
                };
                Some(DailyForecast {
                    date,
                    temperature_max: cell(&self.temperature_max, i).unwrap_or_default(),
                    temperature_min: cell(&self.temperature_min, i).unwrap_or_default(),
                    precipitation_probability: percent(cell(&self.precipitation_probability_max, i)),
                    precipitation_sum: cell(&self.precipitation_sum, i).unwrap_or_default(),
                    rain_sum: cell(&self.rain_sum, i).unwrap_or_default(),
                    weather_code: cell(&self.weather_code, i).unwrap_or_default(),
                    sunrise: time_cell(&self.sunrise, i),
                    sunset: time_cell(&self.sunset, i),
                    wind_speed_max: cell(&self.wind_speed_max, i).unwrap_or_default(),
                    wind_gusts_max: cell(&self.wind_gusts_max, i).unwrap_or_default(),
                })
            })
            .collect()
    }
}
