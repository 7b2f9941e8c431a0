use thiserror::Error;

/// Everything that can go wrong while rotating or decrypting text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CipherError {
  #[error("Character '{character}' is not part of the {language} alphabet")]
  CharacterNotInAlphabet { character: char, language: String },

  #[error("The {language} alphabet is empty")]
  EmptyAlphabet { language: String },

  #[error("Invalid input: {0}")]
  InvalidInput(String),

  #[error("Unsupported language code '{0}'")]
  UnsupportedLanguage(String),

  #[error("Best match scored {percentage:.2}%, below the requested threshold of {threshold}%")]
  InsufficientConfidence { threshold: f64, percentage: f64 },

  #[error("Dictionary for '{code}' is unavailable: {reason}")]
  DictionaryUnavailable { code: String, reason: String },

  #[error("No language could be scored for this text")]
  NoCandidates,
}

pub type Result<T> = std::result::Result<T, CipherError>;
