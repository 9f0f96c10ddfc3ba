use thiserror::Error;

/// Failures of the persisted state backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The remote document API answered with a non-success status.
    #[error("Remote document request to {url} failed with status {status}")]
    UnexpectedStatus {
        /// Request URL
        url: String,
        /// HTTP status returned by the API
        status: u16,
    },

    /// The stored document exists but is not a JSON object.
    #[error("Stored document is not a JSON object")]
    NotAnObject,

    /// A save reported failure; the cause has already been logged by the backend.
    #[error("Failed to write the persisted state")]
    WriteFailed,
}
