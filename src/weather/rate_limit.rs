use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

/// Sliding one-minute request budget
#[derive(Debug)]
pub struct RateLimiter {
    max_requests_per_minute: u32,
    /// Request timestamps within the current window, oldest first
    request_times: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_requests_per_minute: u32) -> Self {
        Self {
            max_requests_per_minute,
            request_times: VecDeque::new(),
        }
    }

    /// Check if a request is allowed and record it
    pub fn allow_request(&mut self) -> bool {
        self.allow_request_at(Instant::now())
    }

    /// Time until the next request is allowed, zero if one is allowed now
    pub fn time_until_next_request(&mut self) -> Duration {
        self.time_until_next_request_at(Instant::now())
    }

    fn allow_request_at(&mut self, now: Instant) -> bool {
        self.cleanup_old_requests(now);

        if self.request_times.len() >= self.max_requests_per_minute as usize {
            false
        } else {
            self.request_times.push_back(now);
            true
        }
    }

    fn time_until_next_request_at(&mut self, now: Instant) -> Duration {
        self.cleanup_old_requests(now);

        if self.request_times.len() < self.max_requests_per_minute as usize {
            return Duration::ZERO;
        }
        self.request_times
            .front()
            .map_or(Duration::ZERO, |oldest| {
                WINDOW.saturating_sub(now.duration_since(*oldest))
            })
    }

    fn cleanup_old_requests(&mut self, now: Instant) {
        while let Some(oldest) = self.request_times.front() {
            if now.duration_since(*oldest) >= WINDOW {
                self.request_times.pop_front();
            } else {
                break;
            }
        }
    }
}
