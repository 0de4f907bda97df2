use serde::{Deserialize, Serialize};
use zapfs_config::{ConfigBackend, ConfigError};
use zapfs_core::domain::Pattern;

/// Sección `[scrub]` de zapfs.toml. Los flags de la línea de comandos tienen
/// prioridad sobre estos valores.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrubSettings {
  /// Tamaño de cada buffer en MB.
  #[serde(default = "default_buffer_size_mb")]
  pub buffer_size_mb: u64,

  /// Buffers escritos por pasada.
  #[serde(default = "default_buffer_count")]
  pub buffer_count: u64,

  #[serde(default = "default_passes")]
  pub passes: u64,

  /// Patrón en hex, p. ej. `"aa55"`.
  #[serde(default)]
  pub pattern: Pattern,
}

fn default_buffer_size_mb() -> u64 {
  10
}

fn default_buffer_count() -> u64 {
  1000
}

fn default_passes() -> u64 {
  5
}

impl Default for ScrubSettings {
  fn default() -> Self {
    ScrubSettings {
      buffer_size_mb: default_buffer_size_mb(),
      buffer_count: default_buffer_count(),
      passes: default_passes(),
      pattern: Pattern::default(),
    }
  }
}

impl ScrubSettings {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("scrub")
  }
}
