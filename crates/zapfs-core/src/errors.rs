// crates/zapfs-core/src/errors.rs
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fase de una pasada en la que ocurrió un error de E/S.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Create,
  Write,
  Sync,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Create => write!(f, "create temp file"),
      Stage::Write => write!(f, "write"),
      Stage::Sync => write!(f, "sync"),
    }
  }
}

/// Error del núcleo de zapfs.
///
/// Ningún error se reintenta: cada variante aborta la operación en curso y
/// sube hasta el binario, que la imprime en stderr y sale con código 1.
#[derive(Debug, Error)]
pub enum CoreError {
  /// Flags inválidos, patrón vacío, tamaños que desbordan.
  #[error("configuration error: {0}")]
  Config(String),

  #[error("free space query failed for {}: {source}", path.display())]
  Probe { path: PathBuf, source: std::io::Error },

  #[error("'{}' must be an existing directory that is writable: {reason}", path.display())]
  Directory { path: PathBuf, reason: String },

  #[error("{stage} failed: {source}")]
  Io { stage: Stage, source: std::io::Error },

  #[error("not enough free space: {available} bytes available, {required} bytes required per pass")]
  InsufficientSpace { available: u64, required: u64 },

  #[error("pass {pass} of {total}: {source}")]
  Pass { pass: u64, total: u64, source: Box<CoreError> },
}

impl CoreError {
  pub fn io(stage: Stage, source: std::io::Error) -> Self {
    CoreError::Io { stage, source }
  }

  /// Fase de E/S que falló, atravesando el envoltorio de `Pass`.
  pub fn stage(&self) -> Option<Stage> {
    match self {
      CoreError::Io { stage, .. } => Some(*stage),
      CoreError::Pass { source, .. } => source.stage(),
      _ => None,
    }
  }
}
