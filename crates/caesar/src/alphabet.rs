//! Alphabet registry
//!
//! Every supported language is one row of a flat table. The registry is built
//! once, in table order, and never mutated afterwards; that order decides which
//! candidate wins a tie during decryption.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::error::{CipherError, Result};

/// (language name, language code, ordered characters)
const ALPHABET_TABLE: &[(&str, &str, &str)] = &[
  ("English", "en", "abcdefghijklmnopqrstuvwxyz"),
  ("Spanish", "es", "aábcdeéfghiíjklmnñoópqrstuúüvwxyz"),
  ("French", "fr", "aàâæbcçdeéèêëfghiîïjklmnoôœpqrstuùûüvwxyÿz"),
  ("Portuguese", "pt", "aáâãàbcçdeéêfghiíjklmnoóôõpqrstuúvwxyz"),
  ("German", "de", "aäbcdefghijklmnoöpqrsßtuüvwxyz"),
  ("Italian", "it", "aàbcdeèéfghiìíîjklmnoòópqrstuùúvwxyz"),
  ("Russian", "ru", "абвгдеёжзийклмнопрстуфхцчшщъыьэюя"),
  ("Arabic", "ar", "ابتثجحخدذرزسشصضطظعغفقكلمنهوي"),
  ("Basque", "eu", "abcdefghijklmnñopqrstuvwxyz"),
  ("Latvian", "lv", "aābcčdeēfgģhiījkķlļmnņoprsštuūvzž"),
  ("Dutch", "nl", "abcdefghijklmnopqrstuvwxyz"),
];

static REGISTRY: Lazy<Vec<Alphabet>> = Lazy::new(|| {
  ALPHABET_TABLE.iter().map(|(name, code, characters)| Alphabet::new(name, code, characters)).collect()
});

/// Every character of every registered alphabet
static LETTERS: Lazy<HashSet<char>> =
  Lazy::new(|| REGISTRY.iter().flat_map(|alphabet| alphabet.characters.iter().copied()).collect());

/// One language's ordered substitution space
#[derive(Debug, Clone, Serialize)]
pub struct Alphabet {
  name: String,
  code: String,
  characters: Vec<char>,
  #[serde(skip)]
  positions: HashMap<char, usize>,
}

impl Alphabet {
  /// Build an alphabet from `characters`, lowercased and deduplicated (first occurrence wins)
  pub fn new(name: &str, code: &str, characters: &str) -> Self {
    let mut ordered = Vec::new();
    let mut positions = HashMap::new();

    for c in characters.chars().filter_map(single_lowercase) {
      if let std::collections::hash_map::Entry::Vacant(slot) = positions.entry(c) {
        slot.insert(ordered.len());
        ordered.push(c);
      }
    }

    Self { name: name.to_string(), code: code.to_string(), characters: ordered, positions }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn characters(&self) -> &[char] {
    &self.characters
  }

  /// Number of letters, the rotation modulus
  pub fn len(&self) -> usize {
    self.characters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.characters.is_empty()
  }

  /// Zero-based position of a letter, ignoring case
  pub fn position(&self, c: char) -> Option<usize> {
    single_lowercase(c).and_then(|lower| self.positions.get(&lower).copied())
  }

  pub fn char_at(&self, index: usize) -> Option<char> {
    self.characters.get(index).copied()
  }
}

/// Lowercase form of `c` when it maps to exactly one character
pub(crate) fn single_lowercase(c: char) -> Option<char> {
  let mut lower = c.to_lowercase();
  match (lower.next(), lower.next()) {
    (Some(l), None) => Some(l),
    _ => None,
  }
}

/// Whether `c` is a letter of some registered alphabet, in either case.
///
/// Only these characters are rotated; everything else (digits, punctuation,
/// and letters no alphabet knows, such as Arabic ة or CJK) passes through.
pub fn is_letter(c: char) -> bool {
  single_lowercase(c).is_some_and(|lower| LETTERS.contains(&lower))
}

/// All supported alphabets, in registry order
pub fn registry() -> &'static [Alphabet] {
  &REGISTRY
}

/// Look up an alphabet by language code, ignoring case
pub fn find(code: &str) -> Result<&'static Alphabet> {
  registry()
    .iter()
    .find(|alphabet| alphabet.code.eq_ignore_ascii_case(code.trim()))
    .ok_or_else(|| CipherError::UnsupportedLanguage(code.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_registry_order_and_codes() {
    let codes: Vec<&str> = registry().iter().map(Alphabet::code).collect();
    assert_eq!(codes, vec!["en", "es", "fr", "pt", "de", "it", "ru", "ar", "eu", "lv", "nl"]);
  }

  #[test]
  fn test_alphabet_sizes() {
    let sizes: Vec<(&str, usize)> = registry().iter().map(|a| (a.code(), a.len())).collect();
    assert_eq!(
      sizes,
      vec![
        ("en", 26),
        ("es", 33),
        ("fr", 42),
        ("pt", 38),
        ("de", 30),
        ("it", 36),
        ("ru", 33),
        ("ar", 28),
        ("eu", 27),
        ("lv", 33),
        ("nl", 26),
      ]
    );
  }

  #[test]
  fn test_registry_entries_are_lowercase_and_unique() {
    for alphabet in registry() {
      let unique: std::collections::HashSet<_> = alphabet.characters().iter().collect();
      assert_eq!(unique.len(), alphabet.len(), "duplicates in {}", alphabet.name());
      for &c in alphabet.characters() {
        assert_eq!(single_lowercase(c), Some(c), "{c} in {} is not lowercase", alphabet.name());
      }
    }
  }

  #[test]
  fn test_new_dedups_and_lowercases() {
    let alphabet = Alphabet::new("Test", "xx", "AbBaC");
    assert_eq!(alphabet.characters(), &['a', 'b', 'c']);
    assert_eq!(alphabet.position('B'), Some(1));
    assert_eq!(alphabet.position('z'), None);
  }

  #[test]
  fn test_position_is_case_insensitive() {
    let russian = find("ru").unwrap();
    assert_eq!(russian.position('Я'), Some(32));
    assert_eq!(russian.position('ё'), Some(6));

    let spanish = find("es").unwrap();
    assert_eq!(spanish.position('Ñ'), Some(17));
    assert_eq!(spanish.position('É'), Some(6));
  }

  #[test]
  fn test_find_unknown_code() {
    assert_eq!(find("EN").unwrap().name(), "English");
    assert_eq!(find("xx").unwrap_err(), CipherError::UnsupportedLanguage("xx".to_string()));
  }

  #[test]
  fn test_is_letter_covers_registered_alphabets_only() {
    assert!(is_letter('a'));
    assert!(is_letter('Ü'));
    assert!(is_letter('ẞ'));
    assert!(is_letter('Ж'));
    assert!(is_letter('ب'));

    assert!(!is_letter('ة'));
    assert!(!is_letter('أ'));
    assert!(!is_letter('ء'));
    assert!(!is_letter('漢'));
    assert!(!is_letter('7'));
    assert!(!is_letter(' '));
  }

  #[test]
  fn test_empty_alphabet() {
    let empty = Alphabet::new("Nothing", "none", "");
    assert!(empty.is_empty());
    assert_eq!(empty.char_at(0), None);
  }
}
