use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] matron_core::CoreError),
}

impl ApiError {
    /// The text shown to a user in a notification: server-supplied message
    /// verbatim when present, a generic connection message for transport
    /// failures.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Transport(_) => "Unable to connect to the server".to_string(),
            ApiError::Decode(_) => "The server returned an unexpected response".to_string(),
            ApiError::Core(e) => e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Extract the user-facing message from an OpenMRS error body:
/// `{"error": {"message": "...", "translatedMessage": "..."}}`, preferring the
/// translated form.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("translatedMessage")
        .or_else(|| error.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}
