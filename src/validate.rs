use serde_json::Value;

// Validate the "message" field of an incoming chat request. Checks run in
// order and the first failure wins. Length is counted in characters, not
// bytes. Returns the message text on success.
pub fn validate_message(message: &Value, max_len: usize) -> Result<&str, String> {
    match message {
        Value::Null => Err("Message cannot be empty".to_string()),
        Value::String(s) if s.is_empty() => Err("Message cannot be empty".to_string()),
        Value::String(s) if s.chars().count() > max_len => Err(format!(
            "Message exceeds maximum length of {max_len} characters"
        )),
        Value::String(s) => Ok(s),
        _ => Err("Message must be a string".to_string()),
    }
}
