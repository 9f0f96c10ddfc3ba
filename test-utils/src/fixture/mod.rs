//! Test fixtures providing reusable test data without any I/O.
//!
//! Fixtures build in-memory documents and values for unit tests. Unlike the
//! `TestContext`, nothing here touches the filesystem or the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture::feed::FeedBuilder;
//!
//! let xml = FeedBuilder::new()
//!     .entry("v2", "Second upload")
//!     .entry("v1", "First upload")
//!     .build();
//! ```

pub mod feed;
