//! Maps transport faults to the fixed user-facing messages returned by tools.
//!
//! Every failure string starts with `Error:`; callers tell failures from
//! payloads by that prefix alone.

use crate::client::FetchError;

/// Environment variable names quoted in configuration-related messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCatalog {
    pub token_var: &'static str,
    pub base_url_var: &'static str,
}

impl ErrorCatalog {
    pub const CATALOG: ErrorCatalog = ErrorCatalog {
        token_var: "API_TOKEN",
        base_url_var: "API_BASE_URL",
    };

    pub const SOLAR: ErrorCatalog = ErrorCatalog {
        token_var: "SOLAR_API_TOKEN",
        base_url_var: "SOLAR_API_BASE_URL",
    };

    /// Turn any fault into exactly one message. The response body is ignored.
    pub fn message(&self, error: &FetchError) -> String {
        match error {
            FetchError::Status { status, .. } => self.status_message(*status),
            FetchError::Timeout => "Error: Request timed out. Please try again.".to_string(),
            FetchError::Connect(_) => format!(
                "Error: Could not connect to API. Check network and {}.",
                self.base_url_var
            ),
            FetchError::Decode(msg) | FetchError::Request(msg) => {
                format!("Error: {}: {}", error.kind(), msg)
            }
        }
    }

    fn status_message(&self, status: u16) -> String {
        match status {
            401 => format!(
                "Error: Authentication failed. Check {} configuration.",
                self.token_var
            ),
            403 => "Error: Permission denied. Insufficient access rights.".to_string(),
            404 => "Error: Resource not found. Verify the ID is correct.".to_string(),
            429 => "Error: Rate limit exceeded. Please wait before retrying.".to_string(),
            s if s >= 500 => format!("Error: Server error ({}). Try again later.", s),
            s => format!("Error: API request failed with status {}", s),
        }
    }

    /// Log the fault and return its message.
    pub fn report(&self, tool: &str, error: &FetchError) -> String {
        tracing::warn!(tool, error = %error, "tool call failed");
        self.message(error)
    }
}
