use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Filesystem operation on the temporary data directory failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
