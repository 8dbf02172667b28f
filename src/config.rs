use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "chat-relay")]
#[command(about = "Minimal chat backend relaying messages to OpenRouter")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 5001)]
    pub port: u16,

    // Chat-completion endpoint requests are forwarded to
    #[arg(long, default_value = "https://openrouter.ai/api/v1/chat/completions")]
    pub upstream_url: String,

    // Model identifier sent with every upstream request
    #[arg(long, default_value = "anthropic/claude-3.5-haiku-20241022:beta")]
    pub model: String,

    // Maximum user message length in characters
    #[arg(long, default_value_t = 2000)]
    pub max_message_length: usize,

    // Max tokens the upstream may generate
    #[arg(long, default_value_t = 1000)]
    pub max_tokens: u32,

    // Sampling temperature for the upstream request
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 50)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 3600)]
    pub rate_window: u64,

    // Admit every request without rate limiting (test/admin mode)
    #[arg(long, default_value_t = false)]
    pub disable_rate_limit: bool,
}
