use thiserror::Error;

/// The main error type for PVE import operations.
///
/// Every boundary of the crate (login, raw requests, the listings and the
/// import source) reports through this type, so callers can tell an
/// unauthenticated client apart from a transport failure or a legitimately
/// empty result.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// Represents errors that occur while talking to the server
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the request
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents authentication failures (rejected credentials, unusable ticket)
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// An authenticated call was attempted without a valid session.
    /// No request was sent.
    #[error("Not authenticated: login first or the session has expired")]
    NotAuthenticated,

    /// The API answered with a non-success status code
    ///
    /// # Fields
    /// * `status` - HTTP status code
    /// * `message` - Response body or reason phrase
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Represents validation failures of configuration values
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Two records of one import share the same key column value
    #[error("Duplicate key '{value}' in column '{column}'")]
    DuplicateKey { column: String, value: String },
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ProxmoxError {
    fn from(error: serde_json::Error) -> Self {
        ProxmoxError::Parse(error.to_string())
    }
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
