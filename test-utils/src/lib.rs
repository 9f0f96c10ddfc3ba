//! Community Bot Test Utils
//!
//! Provides shared testing utilities for the community bot. The bot keeps its durable
//! state in flat files or a remote JSON document and reads an external Atom feed, so
//! the helpers here focus on isolated data directories and canned feed documents rather
//! than live services.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestContext**: Temporary data directory that is removed when the context drops
//! - **Fixtures**: In-memory test data such as YouTube Atom feed documents
//! - **Serenity factories**: Mock Serenity structs created by deserializing JSON
//! - **HTTP endpoints**: Local closed, silent or fixed-response servers for real clients
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{context::TestContext, fixture::feed::FeedBuilder};
//!
//! #[tokio::test]
//! async fn test_file_store() -> Result<(), TestError> {
//!     let test = TestContext::new()?;
//!     test.write("last_video_id.txt", "abc123")?;
//!
//!     let feed = FeedBuilder::new().entry("v2", "New upload").build();
//!     // Exercise the code under test...
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod error;
pub mod fixture;
pub mod http;
pub mod serenity;
