use dashmap::DashMap;
use std::time::{Duration, Instant};

// Rate limit entry - tracks requests per client key
pub struct ClientWindow {
    pub count: u32,
    pub window_start: Instant,
}

// Fixed-window limiter keyed by client address. The window resets entirely
// when it expires, so a client can burst up to 2x the limit across a window
// boundary. That is the intended behavior, not a bug.
pub struct RateLimiter {
    clients: DashMap<String, ClientWindow>,
    limit: u32,
    window: Duration,
    bypass: bool,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            clients: DashMap::new(),
            limit,
            window,
            bypass: false,
        }
    }

    // Limiter that admits everything (test/admin mode)
    pub fn bypassed(limit: u32, window: Duration) -> Self {
        Self {
            bypass: true,
            ..Self::new(limit, window)
        }
    }

    // Check-and-count for one request. The entry guard holds the map shard
    // lock, so the read-check-increment is atomic per key and concurrent
    // requests from the same client cannot slip past the limit.
    pub fn admit(&self, key: &str, now: Instant) -> bool {
        if self.bypass {
            return true;
        }

        let mut entry = self
            .clients
            .entry(key.to_string())
            .or_insert(ClientWindow {
                count: 0,
                window_start: now,
            });

        // window expired? reset it
        if now.saturating_duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        // over limit? reject without touching the counter
        if entry.count >= self.limit {
            return false;
        }

        entry.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const WINDOW: Duration = Duration::from_secs(3600);

    #[test]
    fn admits_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new(50, WINDOW);
        let now = Instant::now();

        for _ in 0..50 {
            assert!(limiter.admit("10.0.0.1", now));
        }
        assert!(!limiter.admit("10.0.0.1", now));
        // still rejected, counter unchanged
        assert!(!limiter.admit("10.0.0.1", now));
    }

    #[test]
    fn window_expiry_resets_the_counter() {
        let limiter = RateLimiter::new(50, WINDOW);
        let now = Instant::now();

        for _ in 0..50 {
            assert!(limiter.admit("10.0.0.1", now));
        }
        assert!(!limiter.admit("10.0.0.1", now));

        // one second past the window boundary
        let later = now + WINDOW + Duration::from_secs(1);
        assert!(limiter.admit("10.0.0.1", later));
    }

    #[test]
    fn reset_happens_exactly_at_the_boundary() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(limiter.admit("10.0.0.1", now));
        assert!(!limiter.admit("10.0.0.1", now + WINDOW - Duration::from_secs(1)));
        // now - window_start >= window resets
        assert!(limiter.admit("10.0.0.1", now + WINDOW));
    }

    #[test]
    fn full_burst_on_both_sides_of_a_boundary_is_allowed() {
        // a client can spend the whole budget at the end of one window and
        // again right after the reset: 2x limit in a short span
        let limiter = RateLimiter::new(50, WINDOW);
        let now = Instant::now();

        for _ in 0..50 {
            assert!(limiter.admit("10.0.0.1", now));
        }
        let after_reset = now + WINDOW;
        for _ in 0..50 {
            assert!(limiter.admit("10.0.0.1", after_reset));
        }
        assert!(!limiter.admit("10.0.0.1", after_reset));
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(limiter.admit("10.0.0.1", now));
        assert!(!limiter.admit("10.0.0.1", now));
        assert!(limiter.admit("10.0.0.2", now));
    }

    #[test]
    fn bypassed_limiter_admits_everything() {
        let limiter = RateLimiter::bypassed(1, WINDOW);
        let now = Instant::now();

        for _ in 0..100 {
            assert!(limiter.admit("10.0.0.1", now));
        }
    }

    #[test]
    fn concurrent_admits_never_exceed_the_limit() {
        let limiter = Arc::new(RateLimiter::new(50, WINDOW));
        let now = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..10 {
                    if limiter.admit("10.0.0.1", now) {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50);
    }
}
