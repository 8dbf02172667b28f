use serde_json::Value;
use std::time::Duration;

use crate::models::{Turn, UpstreamRequest};

// Outcome of one upstream call attempt. No retries at this layer.
#[derive(Debug)]
pub enum UpstreamResult {
    Success(String),
    Timeout,
    Transport(String),
    Unexpected,
}

pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(
        url: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            model,
            max_tokens,
            temperature,
            timeout,
        }
    }

    // Send the user's message as a single conversation turn and extract the
    // assistant's reply. Each call is single-shot with a hard timeout.
    pub async fn send(
        &self,
        api_key: &str,
        message: &str,
        host_url: &str,
        request_id: &str,
    ) -> UpstreamResult {
        let payload = UpstreamRequest {
            model: self.model.clone(),
            messages: vec![Turn {
                role: "user",
                content: message.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            route: "fallback",
        };

        let result = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", host_url)
            .header("OpenAI-Organization", host_url)
            .header("X-Request-ID", request_id)
            .header(reqwest::header::USER_AGENT, "chat-relay/1.0")
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await;

        let response = match result {
            Ok(res) => res,
            Err(e) if e.is_timeout() => return UpstreamResult::Timeout,
            Err(e) => return UpstreamResult::Transport(format!("Request failed: {e}")),
        };

        let response = match response.error_for_status() {
            Ok(res) => res,
            Err(e) => return UpstreamResult::Transport(format!("Request failed: {e}")),
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return UpstreamResult::Timeout,
            Err(e) => return UpstreamResult::Transport(format!("Parse error: {e}")),
        };

        match body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
        {
            Some(text) => UpstreamResult::Success(text.to_string()),
            None => {
                // log the shape problem, return only a generic error upward
                tracing::error!("upstream response is missing the reply text: {body}");
                UpstreamResult::Unexpected
            }
        }
    }
}
