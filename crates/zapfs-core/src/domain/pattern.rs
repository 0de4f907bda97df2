use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Secuencia de bytes que se repite para llenar los buffers de escritura.
///
/// Invariante: nunca está vacía. No es aleatoriedad criptográfica, solo una
/// marca determinista que sobrescribe el espacio libre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Vec<u8>);

impl Pattern {
  pub const DEFAULT: [u8; 2] = [0xAA, 0x55];

  pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CoreError> {
    let bytes = bytes.into();
    if bytes.is_empty() {
      return Err(CoreError::Config("empty fill pattern".into()));
    }
    Ok(Self(bytes))
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

}

impl Default for Pattern {
  fn default() -> Self {
    Self(Self::DEFAULT.to_vec())
  }
}

impl fmt::Display for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in &self.0 {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

/// Acepta `aa55`, `0xAA,0x55` o `AA 55`.
impl FromStr for Pattern {
  type Err = CoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = Vec::new();

    for token in s.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
      let digits = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")).unwrap_or(token);

      if digits.is_empty() || digits.len() % 2 != 0 || !digits.is_ascii() {
        return Err(CoreError::Config(format!("invalid hex byte sequence '{token}' in pattern")));
      }

      for pair in digits.as_bytes().chunks(2) {
        // `pair` es ASCII, así que from_utf8 no falla.
        let pair = std::str::from_utf8(pair).unwrap_or_default();
        let byte = u8::from_str_radix(pair, 16)
          .map_err(|_| CoreError::Config(format!("invalid hex byte sequence '{token}' in pattern")))?;
        bytes.push(byte);
      }
    }

    Self::new(bytes)
  }
}

impl TryFrom<String> for Pattern {
  type Error = CoreError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Pattern> for String {
  fn from(p: Pattern) -> Self {
    p.to_string()
  }
}

/// Llena `buffer` in situ repitiendo `pattern` desde el offset 0.
///
/// Si la longitud del patrón no divide a la del buffer, la última copia se
/// trunca en el borde. Con un patrón vacío devuelve `CoreError::Config` sin
/// tocar el buffer.
pub fn fill_pattern(buffer: &mut [u8], pattern: &[u8]) -> Result<(), CoreError> {
  if pattern.is_empty() {
    return Err(CoreError::Config("empty fill pattern".into()));
  }
  for chunk in buffer.chunks_mut(pattern.len()) {
    chunk.copy_from_slice(&pattern[..chunk.len()]);
  }
  Ok(())
}
