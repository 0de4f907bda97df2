pub mod config;
pub mod free_space;
pub mod scrub;

pub use config::ScrubSettings;
pub use free_space::{OsFreeSpace, available_bytes};
pub use scrub::{DUMMY_FILE_NAME, FsScrubTarget, TEMP_PREFIX, TEMP_SUFFIX, scrub_once};
