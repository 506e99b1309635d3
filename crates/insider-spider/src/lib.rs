pub mod error;
pub mod fs;
pub mod http;
pub mod report;
pub mod stock;
pub(crate) mod tui;

pub use error::{Error, Result};
pub use http::{Config, Spider};

/// Human-readable elapsed time since `time`, for log lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
