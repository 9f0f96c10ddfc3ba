use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A Discord snowflake of zero was encountered where a real id is required.
    #[error("Discord ID must be non-zero")]
    ZeroId,
}
