//! Rotation engine

use crate::alphabet::{is_letter, single_lowercase, Alphabet};
use crate::error::{CipherError, Result};

/// Shift every letter of `text` by `offset` positions within `alphabet`.
///
/// Letters keep their case. Characters that belong to no registered alphabet
/// (digits, punctuation, whitespace, unlisted letters) pass through
/// untouched. A letter of another registered alphabet that is missing from
/// `alphabet` fails the whole rotation.
pub fn rotate(text: &str, offset: i64, alphabet: &Alphabet) -> Result<String> {
  if alphabet.is_empty() {
    return Err(CipherError::EmptyAlphabet { language: alphabet.name().to_string() });
  }

  let modulus = alphabet.len() as i64;
  let shift = offset.rem_euclid(modulus);

  text
    .chars()
    .map(|c| {
      if !is_letter(c) {
        return Ok(c);
      }

      let position = alphabet.position(c).ok_or_else(|| CipherError::CharacterNotInAlphabet {
        character: c,
        language: alphabet.name().to_string(),
      })?;
      let rotated_index = (position as i64 + shift).rem_euclid(modulus) as usize;
      let rotated = alphabet.characters()[rotated_index];

      Ok(if single_lowercase(c) != Some(c) { restore_uppercase(rotated) } else { rotated })
    })
    .collect()
}

/// Request-level rotation: refuses empty text instead of returning an empty result
pub fn encrypt(text: &str, offset: i64, alphabet: &Alphabet) -> Result<String> {
  if text.is_empty() {
    return Err(CipherError::InvalidInput("text must be a non-empty string".to_string()));
  }

  rotate(text, offset, alphabet)
}

// 'ß' uppercases to "SS"; the capital sharp s keeps it a single letter
fn restore_uppercase(c: char) -> char {
  if c == 'ß' {
    return 'ẞ';
  }

  let mut upper = c.to_uppercase();
  match (upper.next(), upper.next()) {
    (Some(u), None) => u,
    _ => c,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::alphabet::{find, registry};

  fn english() -> &'static Alphabet {
    find("en").unwrap()
  }

  #[test]
  fn test_rotate_hello_world() {
    assert_eq!(rotate("Hello, World!", 3, english()).unwrap(), "Khoor, Zruog!");
    assert_eq!(rotate("Khoor, Zruog!", 23, english()).unwrap(), "Hello, World!");
  }

  #[test]
  fn test_negative_and_large_offsets() {
    assert_eq!(rotate("Khoor", -3, english()).unwrap(), "Hello");
    assert_eq!(rotate("Hello", 3 + 26 * 4, english()).unwrap(), "Khoor");
    assert_eq!(rotate("abc", i64::MIN, english()).unwrap(), rotate("abc", i64::MIN.rem_euclid(26), english()).unwrap());
  }

  #[test]
  fn test_identity_offset() {
    for alphabet in registry() {
      let text: String = alphabet.characters().iter().collect();
      assert_eq!(rotate(&text, 0, alphabet).unwrap(), text);
    }
  }

  #[test]
  fn test_round_trip_every_alphabet() {
    for alphabet in registry() {
      let text: String = alphabet.characters().iter().collect();
      let n = alphabet.len() as i64;
      for r in [1, 5, n - 1, n + 2] {
        let there = rotate(&text, r, alphabet).unwrap();
        let back = rotate(&there, n - r, alphabet).unwrap();
        assert_eq!(back, text, "round trip failed for {} at {r}", alphabet.name());
      }
    }
  }

  #[test]
  fn test_case_and_non_letters_preserved() {
    let rotated = rotate("AbC 123 - ok?", 1, english()).unwrap();
    assert_eq!(rotated, "BcD 123 - pl?");
  }

  #[test]
  fn test_wraps_around_end_of_alphabet() {
    assert_eq!(rotate("xyz XYZ", 3, english()).unwrap(), "abc ABC");

    let spanish = find("es").unwrap();
    assert_eq!(rotate("n", 1, spanish).unwrap(), "ñ");
    assert_eq!(rotate("N", 1, spanish).unwrap(), "Ñ");
  }

  #[test]
  fn test_cyrillic_rotation_keeps_case() {
    let russian = find("ru").unwrap();
    assert_eq!(rotate("Привет", 1, russian).unwrap(), "Рсйгёу");
  }

  #[test]
  fn test_uppercase_lands_on_capital_sharp_s() {
    let german = find("de").unwrap();
    // 's' sits right before 'ß'
    assert_eq!(rotate("S", 1, german).unwrap(), "ẞ");
    assert_eq!(rotate("s", 1, german).unwrap(), "ß");
    assert_eq!(rotate("ẞ", 1, german).unwrap(), "T");

    let rotated = rotate("STRASSE", 1, german).unwrap();
    assert_eq!(rotated, "ẞUSÄẞẞF");
    assert_eq!(rotate(&rotated, 29, german).unwrap(), "STRASSE");
  }

  #[test]
  fn test_round_trip_keeps_case_in_every_alphabet() {
    for alphabet in registry() {
      let upper: String = alphabet.characters().iter().map(|&c| restore_uppercase(c)).collect();
      let mixed: String = alphabet
        .characters()
        .iter()
        .enumerate()
        .map(|(i, &c)| if i % 2 == 0 { restore_uppercase(c) } else { c })
        .collect();
      let n = alphabet.len() as i64;

      for text in [&upper, &mixed] {
        for r in [1, 7, n - 1] {
          let there = rotate(text, r, alphabet).unwrap();
          let back = rotate(&there, n - r, alphabet).unwrap();
          assert_eq!(&back, text, "case lost for {} at {r}", alphabet.name());
        }
      }
    }
  }

  #[test]
  fn test_unregistered_letters_pass_through() {
    let arabic = find("ar").unwrap();
    let rotated = rotate("في المدينة", 3, arabic).unwrap();
    assert!(rotated.ends_with('ة'));
    assert_eq!(rotate(&rotated, 25, arabic).unwrap(), "في المدينة");

    let rotated = rotate("أنا", 3, arabic).unwrap();
    assert!(rotated.starts_with('أ'));
    assert_eq!(rotate(&rotated, 25, arabic).unwrap(), "أنا");

    assert_eq!(rotate("abc 漢字", 1, english()).unwrap(), "bcd 漢字");
  }

  #[test]
  fn test_spanish_accents_rotate_within_spanish() {
    let spanish = find("es").unwrap();
    let rotated = rotate("¿Qué día es hoy?", 3, spanish).unwrap();
    assert_eq!(rotate(&rotated, -3, spanish).unwrap(), "¿Qué día es hoy?");
    // 'u' is followed by 'ú', 'ü', 'v'
    assert_eq!(rotate("u", 3, spanish).unwrap(), "v");
  }

  #[test]
  fn test_letter_outside_alphabet_fails() {
    let err = rotate("Привет", 1, english()).unwrap_err();
    assert_eq!(
      err,
      CipherError::CharacterNotInAlphabet { character: 'П', language: "English".to_string() }
    );
  }

  #[test]
  fn test_empty_alphabet_is_an_error() {
    let empty = Alphabet::new("Nothing", "none", "");
    assert_eq!(rotate("abc", 1, &empty).unwrap_err(), CipherError::EmptyAlphabet { language: "Nothing".to_string() });
  }

  #[test]
  fn test_encrypt_rejects_empty_text() {
    assert!(matches!(encrypt("", 3, english()), Err(CipherError::InvalidInput(_))));
    assert_eq!(encrypt("abc", 1, english()).unwrap(), "bcd");
  }
}
