use crate::graph::auth::REQUIRED_SCOPES;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Graph API error: {0}")]
    GraphApiError(String),

    #[error("Could not determine the signed-in user: {0}")]
    MissingIdentity(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ReadinessError>;

/// Parse Graph API error response and provide helpful context
pub fn enhance_graph_error(error_response: &str) -> String {
    if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(error_response) {
        if let Some(error_obj) = error_json.get("error") {
            let code = error_obj
                .get("code")
                .and_then(|c| c.as_str())
                .unwrap_or("Unknown");
            let message = error_obj
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("No message");

            let hint = match code {
                "Unauthorized" | "InvalidAuthenticationToken" => {
                    " (hint: the access token is missing or expired)".to_string()
                }
                "Forbidden" | "Authorization_RequestDenied" | "InsufficientPrivileges" => format!(
                    " (hint: grant the app {} with admin consent)",
                    REQUIRED_SCOPES.join(" and ")
                ),
                "Request_ResourceNotFound" | "NotFound" => {
                    " (hint: check the user object ID)".to_string()
                }
                _ => String::new(),
            };

            return format!("{}: {}{}", code, message, hint);
        }
    }

    error_response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_graph_error_extracts_code_and_message() {
        let body = r#"{"error":{"code":"Request_ResourceNotFound","message":"Resource 'x' does not exist."}}"#;
        let enhanced = enhance_graph_error(body);
        assert!(enhanced.starts_with("Request_ResourceNotFound: Resource 'x' does not exist."));
        assert!(enhanced.contains("user object ID"));
    }

    #[test]
    fn test_forbidden_hint_names_required_permissions() {
        let body = r#"{"error":{"code":"Authorization_RequestDenied","message":"Insufficient privileges to complete the operation."}}"#;
        let enhanced = enhance_graph_error(body);
        for scope in REQUIRED_SCOPES {
            assert!(enhanced.contains(scope), "{} missing from {}", scope, enhanced);
        }
    }

    #[test]
    fn test_enhance_graph_error_passes_through_non_json() {
        assert_eq!(enhance_graph_error("Bad Gateway"), "Bad Gateway");
    }
}
