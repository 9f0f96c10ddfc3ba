//! Background jobs.
//!
//! - `youtube_monitor` - Fixed-interval polling of the YouTube upload feed

pub mod youtube_monitor;

pub use youtube_monitor::MonitorScheduler;
