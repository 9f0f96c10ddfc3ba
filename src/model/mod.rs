//! Domain models and parameter types.
//!
//! This module contains the models used throughout the service layer. Persisted models
//! are converted at the storage boundary, feed models at the poller boundary, and both
//! are rendered into Discord builders only at the edge where messages are sent.

pub mod feed;
pub mod invite;
pub mod monitor;
pub mod notification;
