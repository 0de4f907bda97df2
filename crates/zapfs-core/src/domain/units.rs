use crate::errors::CoreError;

/// Un megabyte (MiB).
pub const MB: u64 = 1024 * 1024;
/// Un gigabyte (GiB).
pub const GB: u64 = 1024 * MB;

pub fn bytes_to_gb(bytes: u64) -> f64 {
  bytes as f64 / GB as f64
}

pub fn mb_to_bytes(mb: u64) -> Result<u64, CoreError> {
  mb.checked_mul(MB).ok_or_else(|| CoreError::Config(format!("buffer size of {mb} MB overflows")))
}
