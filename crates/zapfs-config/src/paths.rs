use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Variable de entorno que reemplaza el directorio base (modo portable / tests).
pub const BASE_DIR_ENV: &str = "ZAPFS_BASE_DIR";

const CONFIG_FILE_NAME: &str = "zapfs.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error in {}: {source}", path.display())]
  Toml { path: PathBuf, source: toml::de::Error },
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

/// Ubicación del archivo de configuración.
///
/// A diferencia de un directorio de datos, aquí nunca se crea nada: la
/// herramienta no escribe fuera del directorio que se va a limpiar.
#[derive(Debug, Clone)]
pub struct ZapfsPaths {
  pub config_file: PathBuf,
}

impl ZapfsPaths {
  /// Resuelve la ruta por defecto: `$ZAPFS_BASE_DIR/config/zapfs.toml` o el
  /// directorio de configuración de la plataforma.
  pub fn detect() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      let base = PathBuf::from(env_base);
      return Ok(Self { config_file: base.join("config").join(CONFIG_FILE_NAME) });
    }

    let proj_dirs = ProjectDirs::from("com", "zapfs", "zapfs").ok_or(ConfigError::Directories)?;
    Ok(Self { config_file: proj_dirs.config_dir().join(CONFIG_FILE_NAME) })
  }

  /// Archivo explícito (flag `--config`).
  pub fn from_file(path: impl Into<PathBuf>) -> Self {
    Self { config_file: path.into() }
  }

  pub fn config_file(&self) -> &Path {
    &self.config_file
  }
}
