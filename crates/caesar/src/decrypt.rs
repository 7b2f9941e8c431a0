//! Brute-force decryption search
//!
//! Every offset of every alphabet is tried in registry order. Each trial is
//! scored by how many of its words the dictionary recognises, and only a
//! strictly better score replaces the running best, so ties go to whichever
//! language and offset came first.

use serde::Serialize;

use crate::alphabet::Alphabet;
use crate::dictionary::Dictionary;
use crate::error::{CipherError, Result};
use crate::rotation::rotate;

/// One scored trial of the search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecryptionCandidate {
  /// Rotation that turns `result` back into the ciphertext
  pub rot: usize,
  /// Candidate plaintext
  pub result: String,
  /// Recognised words
  pub matches: usize,
  /// Recognised words as a share of all words, 0-100
  pub percentage: f64,
  pub language: String,
  pub language_code: String,
}

/// The winning candidate of a search
pub type BestMatch = DecryptionCandidate;

/// A language left out of the search and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLanguage {
  pub language: String,
  pub language_code: String,
  pub reason: CipherError,
}

/// Everything a search produced
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
  pub best: Option<DecryptionCandidate>,
  pub skipped: Vec<SkippedLanguage>,
  /// Trials that were scored and considered
  pub trials: usize,
}

impl SearchReport {
  fn consider(&mut self, candidate: DecryptionCandidate) {
    self.trials += 1;
    match &self.best {
      Some(best) if candidate.matches <= best.matches => {}
      _ => self.best = Some(candidate),
    }
  }

  /// Final answer of the search, enforcing an optional minimum match percentage
  pub fn into_best_match(self, threshold: Option<f64>) -> Result<BestMatch> {
    let best = self.best.ok_or(CipherError::NoCandidates)?;

    if let Some(threshold) = threshold {
      if best.percentage < threshold {
        return Err(CipherError::InsufficientConfidence { threshold, percentage: best.percentage });
      }
    }

    Ok(best)
  }
}

/// Whitespace-separated tokens that contain a letter, trimmed of surrounding
/// punctuation and lowercased for dictionary lookup
pub fn words(text: &str) -> Vec<String> {
  text
    .split_whitespace()
    .map(|token| token.trim_matches(|c: char| !c.is_alphabetic()))
    .filter(|token| !token.is_empty())
    .map(str::to_lowercase)
    .collect()
}

/// Score every offset of one alphabet; any failure disqualifies the whole language
fn score_language(text: &str, alphabet: &Alphabet, dictionary: &dyn Dictionary) -> Result<Vec<DecryptionCandidate>> {
  if alphabet.is_empty() {
    return Err(CipherError::EmptyAlphabet { language: alphabet.name().to_string() });
  }

  let size = alphabet.len();
  let mut trials = Vec::with_capacity(size);

  for offset in 0..size {
    let rotated = rotate(text, offset as i64, alphabet)?;
    let words = words(&rotated);
    let known = dictionary.known(alphabet.code(), &words)?;

    let matches = words.iter().filter(|word| known.contains(*word)).count();
    let percentage = if words.is_empty() { 0.0 } else { matches as f64 / words.len() as f64 * 100.0 };

    trials.push(DecryptionCandidate {
      rot: (size - offset) % size,
      result: rotated,
      matches,
      percentage,
      language: alphabet.name().to_string(),
      language_code: alphabet.code().to_string(),
    });
  }

  Ok(trials)
}

/// Try every offset of every alphabet and keep the best-scoring trial
pub fn search(text: &str, registry: &[Alphabet], dictionary: &dyn Dictionary) -> SearchReport {
  let mut report = SearchReport::default();

  for alphabet in registry {
    match score_language(text, alphabet, dictionary) {
      Ok(trials) => trials.into_iter().for_each(|candidate| report.consider(candidate)),
      Err(reason) => {
        match &reason {
          CipherError::DictionaryUnavailable { .. } => {
            tracing::warn!(language = alphabet.code(), %reason, "Skipping language during decryption")
          }
          _ => tracing::debug!(language = alphabet.code(), %reason, "Skipping language during decryption"),
        }
        report.skipped.push(SkippedLanguage {
          language: alphabet.name().to_string(),
          language_code: alphabet.code().to_string(),
          reason,
        });
      }
    }
  }

  report
}

/// Recover the most probable plaintext, rotation and language of `text`
pub fn decrypt(
  text: &str,
  threshold: Option<f64>,
  registry: &[Alphabet],
  dictionary: &dyn Dictionary,
) -> Result<BestMatch> {
  if text.is_empty() {
    return Err(CipherError::InvalidInput("text must be a non-empty string".to_string()));
  }

  search(text, registry, dictionary).into_best_match(threshold)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::alphabet::{find, registry};
  use crate::dictionary::{Dictionaries, DictionarySettings, MockDictionary};
  use crate::rotation::rotate;

  fn dictionaries() -> Dictionaries {
    Dictionaries::embedded(DictionarySettings::default())
  }

  fn toy_registry() -> Vec<Alphabet> {
    vec![Alphabet::new("Alpha", "aa", "abc"), Alphabet::new("Beta", "bb", "abcd")]
  }

  #[test]
  fn test_words_trims_punctuation_and_drops_non_words() {
    assert_eq!(words("Hello, World! 42 -- l'été"), vec!["hello", "world", "l'été"]);
    assert!(words("   ").is_empty());
  }

  #[test]
  fn test_decrypt_hello_world() {
    let best = decrypt("Khoor, Zruog!", None, registry(), &dictionaries()).unwrap();

    assert_eq!(best.rot, 3);
    assert_eq!(best.result, "Hello, World!");
    assert_eq!(best.language, "English");
    assert_eq!(best.language_code, "en");
    assert_eq!(best.matches, 2);
    assert_eq!(best.percentage, 100.0);
  }

  #[test]
  fn test_decrypt_recovers_language_and_rotation() {
    let cases = [
      ("es", "Spanish", "el perro y el gato en la casa", 5),
      ("es", "Spanish", "¿Qué día es hoy? Él también está aquí", 8),
      ("ru", "Russian", "привет мир это мой дом", 7),
      ("de", "German", "der hund und die katze im haus", 4),
      ("fr", "French", "le chat et le chien dans la maison", 9),
      ("en", "English", "the quick brown fox jumps over the lazy dog", 13),
      ("nl", "Dutch", "de hond en de kat in het huis", 3),
      ("it", "Italian", "il cane e il gatto nella casa", 6),
      ("lv", "Latvian", "suns un kaķis ir mājā", 2),
      ("pt", "Portuguese", "o cachorro e o gato na casa", 11),
      ("ar", "Arabic", "أنا في مدينة كبيرة على البحر", 5),
      ("eu", "Basque", "nire aita eta ama hemen bizi dira", 10),
    ];
    let dictionaries = dictionaries();

    for (code, language, plaintext, rot) in cases {
      let ciphertext = rotate(plaintext, rot, find(code).unwrap()).unwrap();
      let best = decrypt(&ciphertext, None, registry(), &dictionaries).unwrap();

      assert_eq!(best.language, language, "wrong language for {ciphertext}");
      assert_eq!(best.rot, rot as usize, "wrong rotation for {ciphertext}");
      assert_eq!(best.result, plaintext);
      assert_eq!(best.percentage, 100.0);
    }
  }

  #[test]
  fn test_arabic_plaintext_with_unlisted_letters() {
    let best = decrypt("هذه مدينة كبيرة", None, registry(), &dictionaries()).unwrap();
    assert_eq!(best.language_code, "ar");
    assert_eq!(best.rot, 0);
    assert_eq!(best.percentage, 100.0);
  }

  #[test]
  fn test_decrypt_is_deterministic() {
    let dictionaries = dictionaries();
    let first = decrypt("Gur dhvpx oebja sbk", None, registry(), &dictionaries).unwrap();
    let second = decrypt("Gur dhvpx oebja sbk", None, registry(), &dictionaries).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn test_threshold_above_one_hundred_always_fails() {
    let err = decrypt("Khoor, Zruog!", Some(101.0), registry(), &dictionaries()).unwrap_err();
    assert_eq!(err, CipherError::InsufficientConfidence { threshold: 101.0, percentage: 100.0 });
  }

  #[test]
  fn test_threshold_met() {
    let best = decrypt("Khoor, Zruog!", Some(100.0), registry(), &dictionaries()).unwrap();
    assert_eq!(best.rot, 3);
  }

  #[test]
  fn test_text_without_words_falls_back_to_first_trial() {
    let best = decrypt("12345 !!!", None, registry(), &dictionaries()).unwrap();
    assert_eq!(best.rot, 0);
    assert_eq!(best.language, "English");
    assert_eq!(best.result, "12345 !!!");
    assert_eq!(best.matches, 0);
    assert_eq!(best.percentage, 0.0);
  }

  #[test]
  fn test_empty_text_is_invalid() {
    assert!(matches!(decrypt("", None, registry(), &dictionaries()), Err(CipherError::InvalidInput(_))));
  }

  #[test]
  fn test_search_skips_languages_missing_letters() {
    let report = search("Привет", registry(), &dictionaries());

    let skipped: Vec<&str> = report.skipped.iter().map(|s| s.language_code.as_str()).collect();
    assert_eq!(skipped, vec!["en", "es", "fr", "pt", "de", "it", "ar", "eu", "lv", "nl"]);
    assert_eq!(report.trials, 33);
    assert_eq!(report.best.unwrap().language_code, "ru");
  }

  #[test]
  fn test_failing_dictionary_skips_whole_language() {
    let mut dictionary = MockDictionary::new();
    let mut calls = 0;
    dictionary.expect_known().withf(|code, _| code == "aa").returning(move |code, words| {
      calls += 1;
      if calls == 1 {
        Ok(words.iter().cloned().collect())
      } else {
        Err(CipherError::DictionaryUnavailable { code: code.to_string(), reason: "offline".to_string() })
      }
    });
    dictionary
      .expect_known()
      .withf(|code, _| code == "bb")
      .returning(|_, words| Ok(words.iter().filter(|w| w.as_str() == "cd").cloned().collect()));

    let report = search("ab", &toy_registry(), &dictionary);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].language_code, "aa");
    assert_eq!(report.trials, 4);

    let best = report.into_best_match(None).unwrap();
    assert_eq!(best.language_code, "bb");
    assert_eq!(best.result, "cd");
    assert_eq!(best.rot, 2);
  }

  #[test]
  fn test_ties_keep_the_earliest_candidate() {
    let mut dictionary = MockDictionary::new();
    dictionary.expect_known().returning(|_, words| Ok(words.iter().cloned().collect()));

    let best = decrypt("ab", None, &toy_registry(), &dictionary).unwrap();
    assert_eq!(best.language_code, "aa");
    assert_eq!(best.rot, 0);
    assert_eq!(best.result, "ab");
  }

  #[test]
  fn test_all_languages_skipped() {
    let mut dictionary = MockDictionary::new();
    dictionary.expect_known().returning(|code, _| {
      Err(CipherError::DictionaryUnavailable { code: code.to_string(), reason: "missing".to_string() })
    });

    let err = decrypt("ab", None, &toy_registry(), &dictionary).unwrap_err();
    assert_eq!(err, CipherError::NoCandidates);
  }

  #[test]
  fn test_empty_alphabet_is_skipped() {
    let registry = vec![Alphabet::new("Nothing", "none", ""), Alphabet::new("Beta", "bb", "abcd")];
    let mut dictionary = MockDictionary::new();
    dictionary.expect_known().returning(|_, _| Ok(Default::default()));

    let report = search("ab", &registry, &dictionary);
    assert_eq!(report.skipped[0].reason, CipherError::EmptyAlphabet { language: "Nothing".to_string() });
    assert_eq!(report.best.unwrap().language_code, "bb");
  }
}
