//! Error types for the Wialon integration layer

use thiserror::Error;
use crate::wialon::WialonUser;

/// Main error type for integration operations
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// Caller passed an argument the operation cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Wialon answered with an error code
    #[error("Wialon error {code}: {message}")]
    Wialon {
        code: i64,
        message: String,
    },

    /// Wialon answered, but not in the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Remote search returned nothing
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// User was created in Wialon, but its settings and password could not
    /// be locked. `user` holds the new id and the generated password.
    #[error("User {} was created but not restricted: {source}", .user.id())]
    UserRestrictionsPending {
        user: Box<WialonUser>,
        #[source]
        source: Box<IntegrationError>,
    },

    /// Call attempted on a session that was already logged out
    #[error("Wialon session is closed")]
    SessionClosed,

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntegrationError {
    /// Build a `Wialon` error from a remote error code
    pub fn from_wialon_code(code: i64) -> Self {
        IntegrationError::Wialon {
            code,
            message: wialon_error_text(code).to_string(),
        }
    }
}

/// Text for the error codes documented by the Wialon remote API
pub fn wialon_error_text(code: i64) -> &'static str {
    match code {
        1 => "Invalid session",
        2 => "Invalid service name",
        3 => "Invalid result",
        4 => "Invalid input",
        5 => "Error performing request",
        6 => "Unknown error",
        7 => "Access denied",
        8 => "Invalid user name or password",
        9 => "Authorization server is unavailable",
        10 => "Reached limit of concurrent requests",
        1001 => "No messages for selected interval",
        1002 => "Item with such unique property already exists",
        1003 => "Only one request is allowed at the moment",
        2014 => "Selected user is a creator for some system objects",
        _ => "Unrecognized error code",
    }
}

impl From<rusqlite::Error> for IntegrationError {
    fn from(err: rusqlite::Error) -> Self {
        IntegrationError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for IntegrationError {
    fn from(err: serde_json::Error) -> Self {
        IntegrationError::ConfigError(err.to_string())
    }
}

/// Result type alias for integration operations
pub type Result<T> = std::result::Result<T, IntegrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IntegrationError::InvalidArgument("length must be at least 4".to_string());
        assert!(err.to_string().contains("length must be at least 4"));

        let err = IntegrationError::SessionClosed;
        assert_eq!(err.to_string(), "Wialon session is closed");

        let err = IntegrationError::ItemNotFound("unit 123".to_string());
        assert!(err.to_string().contains("unit 123"));
    }

    #[test]
    fn test_from_wialon_code() {
        let err = IntegrationError::from_wialon_code(7);
        assert_eq!(err.to_string(), "Wialon error 7: Access denied");

        match IntegrationError::from_wialon_code(424242) {
            IntegrationError::Wialon { code, message } => {
                assert_eq!(code, 424242);
                assert_eq!(message, "Unrecognized error code");
            }
            _ => panic!("Expected Wialon error"),
        }
    }

    #[test]
    fn test_restrictions_pending_display() {
        let err = IntegrationError::UserRestrictionsPending {
            user: Box::new(WialonUser::from_parts(31, "a@b.c", None)),
            source: Box::new(IntegrationError::from_wialon_code(7)),
        };
        let text = err.to_string();
        assert!(text.contains("User 31"));
        assert!(text.contains("Access denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_from_rusqlite() {
        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        let err: IntegrationError = sqlite_err.into();
        match err {
            IntegrationError::DatabaseError(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected DatabaseError"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: IntegrationError = json_err.into();
        assert!(matches!(err, IntegrationError::ConfigError(_)));
    }
}
