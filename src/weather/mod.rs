//! Weather and location data sources
//!
//! [`WeatherSource`] is the seam between the application and the remote
//! APIs. [`OpenMeteoClient`] talks HTTP; [`CachedWeatherSource`] wraps any
//! source with the persistent response cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::Result;
use crate::cache::{self, PersistentCache};
use crate::models::location::cache_key;
use crate::models::{CurrentConditions, DailyForecast, HourlyOutlook, LocationRecord};

pub mod nominatim;
pub mod open_meteo;
pub mod rate_limit;

pub use open_meteo::{MIN_QUERY_LENGTH, OpenMeteoClient};
pub use rate_limit::RateLimiter;

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions at a position
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions>;

    /// Hourly rows for today and tomorrow, in the location's local time
    async fn hourly_forecast(&self, latitude: f64, longitude: f64) -> Result<HourlyOutlook>;

    /// Seven daily summaries starting today
    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>>;

    /// Places matching `query`, names in `language`
    async fn search_location(&self, query: &str, language: &str) -> Result<Vec<LocationRecord>>;

    /// Human readable name of a position, `None` if the service knows none
    async fn reverse_geocode(&self, latitude: f64, longitude: f64, language: &str) -> Result<Option<String>>;
}

#[async_trait]
impl<S: WeatherSource + ?Sized> WeatherSource for Arc<S> {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        (**self).current_weather(latitude, longitude).await
    }

    async fn hourly_forecast(&self, latitude: f64, longitude: f64) -> Result<HourlyOutlook> {
        (**self).hourly_forecast(latitude, longitude).await
    }

    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>> {
        (**self).daily_forecast(latitude, longitude).await
    }

    async fn search_location(&self, query: &str, language: &str) -> Result<Vec<LocationRecord>> {
        (**self).search_location(query, language).await
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64, language: &str) -> Result<Option<String>> {
        (**self).reverse_geocode(latitude, longitude, language).await
    }
}

/// Serves forecasts from the cache when fresh, fetching and storing them otherwise
pub struct CachedWeatherSource<S> {
    inner: S,
    cache: PersistentCache,
    ttl: Duration,
}

impl<S: WeatherSource> CachedWeatherSource<S> {
    pub fn new(inner: S, cache: PersistentCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    async fn cached<T, F>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + std::fmt::Debug + Clone + 'static,
        F: Future<Output = Result<T>> + Send,
    {
        match self.cache.get::<T>(&key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for {}", key);
                return Ok(value);
            }
            Ok(None) => debug!("Cache miss for {}", key),
            Err(e) => warn!("Cache read failed for {}: {}", key, e),
        }

        let value = fetch.await?;
        if let Err(e) = self.cache.put(&key, value.clone(), cache::jittered(self.ttl)).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
        Ok(value)
    }
}

#[async_trait]
impl<S: WeatherSource> WeatherSource for CachedWeatherSource<S> {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        self.cached(
            cache_key("current", latitude, longitude),
            self.inner.current_weather(latitude, longitude),
        )
        .await
    }

    async fn hourly_forecast(&self, latitude: f64, longitude: f64) -> Result<HourlyOutlook> {
        self.cached(
            cache_key("hourly", latitude, longitude),
            self.inner.hourly_forecast(latitude, longitude),
        )
        .await
    }

    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>> {
        self.cached(
            cache_key("daily", latitude, longitude),
            self.inner.daily_forecast(latitude, longitude),
        )
        .await
    }

    async fn search_location(&self, query: &str, language: &str) -> Result<Vec<LocationRecord>> {
        self.inner.search_location(query, language).await
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64, language: &str) -> Result<Option<String>> {
        self.inner.reverse_geocode(latitude, longitude, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::open_database;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        daily_calls: AtomicUsize,
        search_calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherSource for CountingSource {
        async fn current_weather(&self, _: f64, _: f64) -> Result<CurrentConditions> {
            Err(crate::MiniMateError::general("not used"))
        }

        async fn hourly_forecast(&self, _: f64, _: f64) -> Result<HourlyOutlook> {
            Err(crate::MiniMateError::general("not used"))
        }

        async fn daily_forecast(&self, _: f64, _: f64) -> Result<Vec<DailyForecast>> {
            let call = self.daily_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![DailyForecast {
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                temperature_max: 24.0 + call as f64,
                temperature_min: 12.0,
                precipitation_probability: 10,
                precipitation_sum: 0.0,
                rain_sum: 0.0,
                weather_code: 1,
                sunrise: None,
                sunset: None,
                wind_speed_max: 10.0,
                wind_gusts_max: 20.0,
            }])
        }

        async fn search_location(&self, _: &str, _: &str) -> Result<Vec<LocationRecord>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn reverse_geocode(&self, _: f64, _: f64, _: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn cached_source(dir: &tempfile::TempDir) -> CachedWeatherSource<Arc<CountingSource>> {
        let db = open_database(dir.path()).unwrap();
        let cache = PersistentCache::new(&db).unwrap();
        CachedWeatherSource::new(
            Arc::new(CountingSource::default()),
            cache,
            Duration::from_secs(600),
        )
    }

    #[tokio::test]
    async fn test_forecasts_are_cached_per_rounded_position() {
        let dir = tempfile::tempdir().unwrap();
        let source = cached_source(&dir);

        let first = source.daily_forecast(47.3769, 8.5417).await.unwrap();
        // 47.3751, 8.5449 also rounds to 47.38, 8.54
        let second = source.daily_forecast(47.3751, 8.5449).await.unwrap();
        assert_eq!(source.inner.daily_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second[0].temperature_max, first[0].temperature_max);

        // 47.3712 rounds to 47.37, a different key
        let other = source.daily_forecast(47.3712, 8.5391).await.unwrap();
        assert_eq!(source.inner.daily_calls.load(Ordering::SeqCst), 2);
        assert_ne!(other[0].temperature_max, first[0].temperature_max);
    }

    #[tokio::test]
    async fn test_search_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let source = cached_source(&dir);

        source.search_location("Bern", "de").await.unwrap();
        source.search_location("Bern", "de").await.unwrap();
        assert_eq!(source.inner.search_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let source = cached_source(&dir);

        assert!(source.current_weather(47.37, 8.54).await.is_err());
        assert!(source.current_weather(47.37, 8.54).await.is_err());
    }
}
