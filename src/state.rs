use crate::rate_limit::RateLimiter;
use crate::upstream::UpstreamClient;

// App's shared state
pub struct AppState {
    pub api_key: Option<String>,
    pub upstream: UpstreamClient,
    pub rate_limiter: RateLimiter,
    pub max_message_length: usize,
}
