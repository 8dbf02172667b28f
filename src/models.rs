use serde::Serialize;

// Single conversation turn in the upstream payload
#[derive(Serialize)]
pub struct Turn {
    pub role: &'static str,
    pub content: String,
}

// OpenRouter chat-completion request, built fresh per call
#[derive(Serialize)]
pub struct UpstreamRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub route: &'static str,
}

// Body of a successful /chat response
#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: &'static str,
}

// Body of a failed /chat response. 4xx replies omit the status field,
// 5xx-class replies carry "error".
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
        }
    }

    pub fn with_status(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: Some("error"),
        }
    }
}
