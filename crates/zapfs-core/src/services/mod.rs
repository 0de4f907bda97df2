mod scrub_service;

pub use scrub_service::{RunSummary, ScrubService};
