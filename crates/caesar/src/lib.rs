//! Caesar - multi-alphabet rotation and language-guessing decryption
//!
//! Text is rotated within one language's alphabet (`rotation`). Decryption
//! tries every offset of every registered alphabet and keeps the candidate
//! whose words a dictionary recognises best (`decrypt`).

pub mod alphabet;
pub mod decrypt;
pub mod dictionary;
pub mod error;
pub mod rotation;

pub use alphabet::{find, registry, Alphabet};
pub use decrypt::{decrypt, search, BestMatch, DecryptionCandidate, SearchReport, SkippedLanguage};
pub use dictionary::{Dictionaries, Dictionary, DictionarySettings, WordList};
pub use error::{CipherError, Result};
pub use rotation::{encrypt, rotate};
