mod chat;
mod health;
mod home;
mod metrics;

pub use chat::chat_handler;
pub use health::health_handler;
pub use home::home_handler;
pub use metrics::metrics_handler;
