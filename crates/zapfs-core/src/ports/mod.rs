pub mod free_space;
pub mod progress;
pub mod target;

pub use free_space::FreeSpaceProbe;
pub use progress::ProgressReporter;
pub use target::ScrubTarget;
