use crate::paths::{ConfigError, ZapfsPaths};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use tracing::debug;

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;

  /// Como `load_section`, pero un archivo o sección ausente da `T::default()`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;
}

/// Backend de solo lectura sobre `zapfs.toml`.
pub struct TomlConfigBackend {
  paths: ZapfsPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: ZapfsPaths) -> Self {
    Self { paths }
  }

  /// `Ok(None)` si el archivo no existe.
  fn read_document(&self) -> Result<Option<toml::Table>, ConfigError> {
    let path = self.paths.config_file();
    let content = match std::fs::read_to_string(path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(None);
      }
      Err(e) => return Err(e.into()),
    };

    let table = toml::from_str::<toml::Table>(&content)
      .map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })?;
    Ok(Some(table))
  }

  fn decode<T: DeserializeOwned>(section: &str, value: toml::Value) -> Result<T, ConfigError> {
    value.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let mut doc = self
      .read_document()?
      .ok_or_else(|| ConfigError::Other(format!("config file {} not found", path.display())))?;

    let value = doc
      .remove(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {}", path.display())))?;

    Self::decode(section, value)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(mut doc) = self.read_document()? else {
      return Ok(T::default());
    };

    let Some(value) = doc.remove(section) else {
      return Ok(T::default());
    };

    Self::decode(section, value)
  }
}
