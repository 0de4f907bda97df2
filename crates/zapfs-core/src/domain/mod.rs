pub mod config;
pub mod pattern;
pub mod units;

pub use config::ScrubConfig;
pub use pattern::{Pattern, fill_pattern};
