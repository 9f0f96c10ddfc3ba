use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// The value that was rejected
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}
