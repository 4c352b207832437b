//! Location search-as-you-type
//!
//! Every input restarts a quiet period; only the latest input is searched and
//! only its result is published.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::LocationRecord;
use crate::weather::{MIN_QUERY_LENGTH, WeatherSource};

/// Published search result for one input
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<LocationRecord>,
}

pub struct DebouncedSearch {
    source: Arc<dyn WeatherSource>,
    language: String,
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
}

impl DebouncedSearch {
    /// Search handle plus the receiver its outcomes are published on
    pub fn new(
        source: Arc<dyn WeatherSource>,
        language: impl Into<String>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let search = Self {
            source,
            language: language.into(),
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            outcomes,
        };
        (search, receiver)
    }

    /// Feed the current query text, superseding any pending search
    pub fn input(&mut self, query: &str) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim().to_string();

        if query.chars().count() < MIN_QUERY_LENGTH {
            let _ = self.outcomes.send(SearchOutcome {
                query,
                results: Vec::new(),
            });
            return;
        }

        let source = Arc::clone(&self.source);
        let language = self.language.clone();
        let delay = self.delay;
        let latest = Arc::clone(&self.generation);
        let outcomes = self.outcomes.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            debug!("Searching for '{}'", query);
            let results = match source.search_location(&query, &language).await {
                Ok(results) => results,
                Err(e) => {
                    warn!("Location search for '{}' failed: {}", query, e);
                    Vec::new()
                }
            };

            if latest.load(Ordering::SeqCst) == generation {
                let _ = outcomes.send(SearchOutcome { query, results });
            } else {
                debug!("Dropping superseded results for '{}'", query);
            }
        }));
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailyForecast, HourlyOutlook};
    use crate::{ErrorCode, MiniMateError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::mpsc::error::TryRecvError;

    #[derive(Default)]
    struct RecordingSource {
        queries: Mutex<Vec<String>>,
        latency: Duration,
        fail: bool,
    }

    #[async_trait]
    impl WeatherSource for RecordingSource {
        async fn current_weather(&self, _: f64, _: f64) -> Result<CurrentConditions> {
            unimplemented!()
        }

        async fn hourly_forecast(&self, _: f64, _: f64) -> Result<HourlyOutlook> {
            unimplemented!()
        }

        async fn daily_forecast(&self, _: f64, _: f64) -> Result<Vec<DailyForecast>> {
            unimplemented!()
        }

        async fn search_location(&self, query: &str, _: &str) -> Result<Vec<LocationRecord>> {
            self.queries.lock().unwrap().push(query.to_string());
            tokio::time::sleep(self.latency).await;
            if self.fail {
                return Err(MiniMateError::api("offline", ErrorCode::ApiNetworkError));
            }
            Ok(vec![
                serde_json::from_value(serde_json::json!({
                    "id": 1,
                    "name": query,
                    "latitude": 47.0,
                    "longitude": 8.0
                }))
                .unwrap(),
            ])
        }

        async fn reverse_geocode(&self, _: f64, _: f64, _: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn debounced(
        source: &Arc<RecordingSource>,
    ) -> (DebouncedSearch, mpsc::UnboundedReceiver<SearchOutcome>) {
        DebouncedSearch::new(
            Arc::clone(source) as Arc<dyn WeatherSource>,
            "de",
            Duration::from_millis(300),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_inputs_trigger_one_search() {
        let source = Arc::new(RecordingSource::default());
        let (mut search, mut outcomes) = debounced(&source);

        search.input("Be");
        search.input("Ber");
        search.input("Bern");

        let outcome = outcomes.recv().await.unwrap();
        assert_eq!(outcome.query, "Bern");
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(*source.queries.lock().unwrap(), vec!["Bern".to_string()]);
        assert!(matches!(outcomes.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_waits_for_quiet_period() {
        let source = Arc::new(RecordingSource::default());
        let (mut search, mut outcomes) = debounced(&source);

        search.input("Basel");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(source.queries.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(outcomes.recv().await.unwrap().query, "Basel");
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_search_is_superseded() {
        let source = Arc::new(RecordingSource {
            latency: Duration::from_millis(500),
            ..RecordingSource::default()
        });
        let (mut search, mut outcomes) = debounced(&source);

        search.input("Bern");
        // First search is running when the next input arrives
        tokio::time::sleep(Duration::from_millis(400)).await;
        search.input("Basel");

        let outcome = outcomes.recv().await.unwrap();
        assert_eq!(outcome.query, "Basel");
        assert_eq!(source.queries.lock().unwrap().len(), 2);
        assert!(matches!(outcomes.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_publishes_empty_result_immediately() {
        let source = Arc::new(RecordingSource::default());
        let (mut search, mut outcomes) = debounced(&source);

        search.input("Bern");
        search.input(" B ");

        let outcome = outcomes.try_recv().unwrap();
        assert_eq!(outcome.query, "B");
        assert!(outcome.results.is_empty());

        // The pending "Bern" search was cancelled
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(source.queries.lock().unwrap().is_empty());
        assert!(matches!(outcomes.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_publishes_empty_result() {
        let source = Arc::new(RecordingSource {
            fail: true,
            ..RecordingSource::default()
        });
        let (mut search, mut outcomes) = debounced(&source);

        search.input("Chur");
        let outcome = outcomes.recv().await.unwrap();
        assert_eq!(outcome.query, "Chur");
        assert!(outcome.results.is_empty());
    }
}
