use std::path::{Path, PathBuf};

use crate::domain::pattern::Pattern;
use crate::domain::units::{MB, mb_to_bytes};
use crate::errors::CoreError;

/// Parámetros inmutables de una ejecución.
///
/// Solo se construye validado: tamaño de buffer, cantidad de buffers y
/// pasadas son todos `>= 1`, y el total por pasada cabe en un `u64`. Un valor
/// inválido se rechaza antes de cualquier E/S.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubConfig {
  target_dir: PathBuf,
  buffer_size: usize,
  buffer_count: u64,
  passes: u64,
  pattern: Pattern,
  test_run: bool,
  pass_bytes: u64,
}

impl ScrubConfig {
  /// Construye la configuración desde los valores de la línea de comandos
  /// (tamaño de buffer en megabytes).
  pub fn new(
    target_dir: impl Into<PathBuf>,
    buffer_size_mb: u64,
    buffer_count: u64,
    passes: u64,
    pattern: Pattern,
    test_run: bool,
  ) -> Result<Self, CoreError> {
    if buffer_size_mb < 1 || buffer_count < 1 || passes < 1 {
      return Err(CoreError::Config(
        "buffer_size, buffer_count, and npasses must all be positive integers".into(),
      ));
    }
    Self::with_buffer_bytes(target_dir, mb_to_bytes(buffer_size_mb)?, buffer_count, passes, pattern, test_run)
  }

  /// Igual que [`ScrubConfig::new`] pero con el tamaño de buffer en bytes.
  pub fn with_buffer_bytes(
    target_dir: impl Into<PathBuf>,
    buffer_size: u64,
    buffer_count: u64,
    passes: u64,
    pattern: Pattern,
    test_run: bool,
  ) -> Result<Self, CoreError> {
    let target_dir = target_dir.into();

    if target_dir.as_os_str().is_empty() {
      return Err(CoreError::Config("TEMPDIR is required".into()));
    }
    if buffer_size < 1 || buffer_count < 1 || passes < 1 {
      return Err(CoreError::Config(
        "buffer_size, buffer_count, and npasses must all be positive integers".into(),
      ));
    }

    let pass_bytes = buffer_count
      .checked_mul(buffer_size)
      .ok_or_else(|| CoreError::Config("buffer_count x buffer_size overflows".into()))?;
    let buffer_size = usize::try_from(buffer_size)
      .map_err(|_| CoreError::Config(format!("buffer size of {buffer_size} bytes is not addressable")))?;

    Ok(Self { target_dir, buffer_size, buffer_count, passes, pattern, test_run, pass_bytes })
  }

  pub fn target_dir(&self) -> &Path {
    &self.target_dir
  }

  pub fn buffer_size(&self) -> usize {
    self.buffer_size
  }

  pub fn buffer_size_mb(&self) -> u64 {
    self.buffer_size as u64 / MB
  }

  pub fn buffer_count(&self) -> u64 {
    self.buffer_count
  }

  pub fn passes(&self) -> u64 {
    self.passes
  }

  pub fn pattern(&self) -> &Pattern {
    &self.pattern
  }

  pub fn is_test_run(&self) -> bool {
    self.test_run
  }

  /// Bytes escritos por pasada: `buffer_count × buffer_size`.
  pub fn pass_bytes(&self) -> u64 {
    self.pass_bytes
  }
}
