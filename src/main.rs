use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use chat_relay::config::Args;
use chat_relay::rate_limit::RateLimiter;
use chat_relay::router;
use chat_relay::state::AppState;
use chat_relay::upstream::UpstreamClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let api_key = std::env::var("OPENROUTER_API_KEY")
        .ok()
        .filter(|key| !key.is_empty());
    if api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set, /chat will answer 401");
    }

    let window = Duration::from_secs(args.rate_window);
    let rate_limiter = if args.disable_rate_limit {
        tracing::warn!("rate limiting is disabled");
        RateLimiter::bypassed(args.rate_limit, window)
    } else {
        RateLimiter::new(args.rate_limit, window)
    };

    let state = Arc::new(AppState {
        api_key,
        upstream: UpstreamClient::new(
            args.upstream_url.clone(),
            args.model.clone(),
            args.max_tokens,
            args.temperature,
            Duration::from_secs(args.upstream_timeout),
        ),
        rate_limiter,
        max_message_length: args.max_message_length,
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("chat relay running on http://localhost:{}", args.port);
    tracing::info!("forwarding to {} (model {})", args.upstream_url, args.model);
    tracing::info!(
        "rate limit: {} requests per {} seconds",
        args.rate_limit,
        args.rate_window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
