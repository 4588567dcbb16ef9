use thiserror::Error;

/// The main error type for Crafty Controller monitoring.
///
/// Only [`CraftyError::Config`] is fatal. Every other variant is scoped to a
/// single server (or a single field of it) and is turned into a fallback
/// metric value by the caller.
#[derive(Error, Debug)]
pub enum CraftyError {
    /// Required configuration is missing or unusable
    ///
    /// # Fields
    /// * `0` - What is missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server list could not be retrieved
    ///
    /// # Fields
    /// * `0` - The underlying API failure, rendered
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Transport or decode failure on any API call
    ///
    /// # Fields
    /// * `0` - A description of the underlying cause
    #[error("API error: {0}")]
    Api(String),

    /// The envelope decoded fine but its `status` was not `"ok"`
    ///
    /// # Fields
    /// * `status` - The status the upstream reported, if any
    /// * `envelope` - The whole decoded envelope, kept for logging
    #[error("Application status error ({status}): {envelope}")]
    ApplicationStatus {
        status: String,
        envelope: serde_json::Value,
    },

    /// A field was present but had an unexpected shape
    ///
    /// # Fields
    /// * `field` - Name of the offending field
    /// * `message` - What was wrong with it
    #[error("Malformed field '{field}': {message}")]
    MalformedField { field: String, message: String },

    /// Represents validation failures of configuration values
    #[error("Validation error: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },
}

/// Specialized error type for validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),
}

/// Type alias for Results that may fail with a CraftyError
pub type CraftyResult<T> = Result<T, CraftyError>;
