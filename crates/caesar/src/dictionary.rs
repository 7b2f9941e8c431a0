//! Word recognition for candidate decryptions
//!
//! Each language owns a [`WordList`]: the words themselves plus a symmetric
//! delete index, so a lookup tolerates small typos without scanning the whole
//! list. Candidates coming out of the index are confirmed with an optimal
//! string alignment distance before being accepted.
//!
//! The embedded lists hold a few hundred everyday words per language, enough
//! to tell languages and rotations apart. Long or specialised texts score
//! lower against them; deployments that rely on `threshold` should point the
//! server at fuller frequency lists (`--dictionaries <dir>`, one `<code>.txt`
//! per language).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{CipherError, Result};

/// Answers "which of these words are real words in this language?"
#[cfg_attr(test, mockall::automock)]
pub trait Dictionary: Send + Sync {
  /// Subset of `words` recognised for the language `code`
  fn known(&self, code: &str, words: &[String]) -> Result<HashSet<String>>;
}

/// Fuzzy matching knobs shared by every word list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionarySettings {
  /// Maximum edit distance a word may be from a dictionary entry
  pub max_edit_distance: usize,
  /// Words shorter than this only match exactly
  pub fuzzy_min_length: usize,
}

impl Default for DictionarySettings {
  fn default() -> Self {
    Self { max_edit_distance: 1, fuzzy_min_length: 4 }
  }
}

/// Word lists compiled into the binary, keyed by language code
const EMBEDDED_WORD_LISTS: &[(&str, &str)] = &[
  ("en", include_str!("../dictionaries/en.txt")),
  ("es", include_str!("../dictionaries/es.txt")),
  ("fr", include_str!("../dictionaries/fr.txt")),
  ("pt", include_str!("../dictionaries/pt.txt")),
  ("de", include_str!("../dictionaries/de.txt")),
  ("it", include_str!("../dictionaries/it.txt")),
  ("ru", include_str!("../dictionaries/ru.txt")),
  ("ar", include_str!("../dictionaries/ar.txt")),
  ("eu", include_str!("../dictionaries/eu.txt")),
  ("lv", include_str!("../dictionaries/lv.txt")),
  ("nl", include_str!("../dictionaries/nl.txt")),
];

// Word Lists
// ==========

/// One language's vocabulary with a typo-tolerant lookup
#[derive(Debug, Clone)]
pub struct WordList {
  words: Vec<String>,
  exact: HashSet<String>,
  /// Delete variant -> indices into `words`
  deletes: HashMap<String, Vec<usize>>,
  settings: DictionarySettings,
}

impl WordList {
  pub fn new<I, S>(words: I, settings: DictionarySettings) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut list = Self { words: Vec::new(), exact: HashSet::new(), deletes: HashMap::new(), settings };

    for word in words {
      let word = word.as_ref().trim().to_lowercase();
      if word.is_empty() || !list.exact.insert(word.clone()) {
        continue;
      }

      let id = list.words.len();
      if word.chars().count() + settings.max_edit_distance >= settings.fuzzy_min_length {
        for variant in delete_variants(&word, settings.max_edit_distance) {
          list.deletes.entry(variant).or_default().push(id);
        }
      }
      list.words.push(word);
    }

    list
  }

  /// Parse a word list file: one word per line, `#` starts a comment line
  pub fn parse(source: &str, settings: DictionarySettings) -> Self {
    Self::new(
      source.lines().map(str::trim).filter(|line| !line.is_empty() && !line.starts_with('#')),
      settings,
    )
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// Whether `word` (already lowercased) is a member or close enough to one
  pub fn contains(&self, word: &str) -> bool {
    if self.exact.contains(word) {
      return true;
    }

    let max = self.settings.max_edit_distance;
    if max == 0 || word.chars().count() < self.settings.fuzzy_min_length {
      return false;
    }

    delete_variants(word, max).iter().any(|variant| {
      self.deletes.get(variant).is_some_and(|ids| {
        ids.iter().any(|&id| osa_distance(word, &self.words[id]) <= max)
      })
    })
  }
}

/// All strings reachable from `word` by deleting up to `max_distance` characters, `word` included
fn delete_variants(word: &str, max_distance: usize) -> HashSet<String> {
  let mut variants = HashSet::new();
  variants.insert(word.to_string());

  let mut frontier = vec![word.to_string()];
  for _ in 0..max_distance {
    let mut next = Vec::new();
    for current in &frontier {
      let chars: Vec<char> = current.chars().collect();
      for skip in 0..chars.len() {
        let variant: String =
          chars.iter().enumerate().filter(|(i, _)| *i != skip).map(|(_, c)| *c).collect();
        if variants.insert(variant.clone()) {
          next.push(variant);
        }
      }
    }
    frontier = next;
  }

  variants
}

/// Optimal string alignment distance (Levenshtein plus adjacent transpositions)
fn osa_distance(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  let (n, m) = (a.len(), b.len());

  let mut d = vec![vec![0usize; m + 1]; n + 1];
  for (i, row) in d.iter_mut().enumerate() {
    row[0] = i;
  }
  for j in 0..=m {
    d[0][j] = j;
  }

  for i in 1..=n {
    for j in 1..=m {
      let cost = usize::from(a[i - 1] != b[j - 1]);
      let mut best = (d[i - 1][j] + 1).min(d[i][j - 1] + 1).min(d[i - 1][j - 1] + cost);
      if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
        best = best.min(d[i - 2][j - 2] + 1);
      }
      d[i][j] = best;
    }
  }

  d[n][m]
}

// Dictionaries
// ============

/// Every loaded word list, keyed by language code
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
  lists: HashMap<String, WordList>,
}

impl Dictionaries {
  /// Word lists compiled into the crate
  pub fn embedded(settings: DictionarySettings) -> Self {
    let lists = EMBEDDED_WORD_LISTS
      .iter()
      .map(|(code, source)| (code.to_string(), WordList::parse(source, settings)))
      .collect();
    Self { lists }
  }

  /// Embedded lists, with `<dir>/<code>.txt` files replacing them where present.
  ///
  /// An override that exists but cannot be read leaves that language without a
  /// dictionary; the failure is reported back so the caller can log it.
  pub fn load(dir: Option<&Path>, settings: DictionarySettings) -> (Self, Vec<CipherError>) {
    let mut dictionaries = Self::embedded(settings);
    let mut failures = Vec::new();

    let Some(dir) = dir else {
      return (dictionaries, failures);
    };

    for (code, _) in EMBEDDED_WORD_LISTS {
      let path = dir.join(format!("{code}.txt"));
      if !path.exists() {
        continue;
      }

      match std::fs::read_to_string(&path) {
        Ok(source) => {
          tracing::debug!(code, path = %path.display(), "Loaded dictionary override");
          dictionaries.insert(code, WordList::parse(&source, settings));
        }
        Err(e) => {
          dictionaries.lists.remove(*code);
          failures.push(CipherError::DictionaryUnavailable {
            code: code.to_string(),
            reason: format!("{}: {e}", path.display()),
          });
        }
      }
    }

    (dictionaries, failures)
  }

  pub fn insert(&mut self, code: &str, list: WordList) {
    self.lists.insert(code.to_string(), list);
  }

  pub fn get(&self, code: &str) -> Option<&WordList> {
    self.lists.get(code)
  }

  /// Language codes with a loaded word list, sorted
  pub fn codes(&self) -> Vec<String> {
    let mut codes: Vec<String> = self.lists.keys().cloned().collect();
    codes.sort();
    codes
  }
}

impl Dictionary for Dictionaries {
  fn known(&self, code: &str, words: &[String]) -> Result<HashSet<String>> {
    let list = self.lists.get(code).ok_or_else(|| CipherError::DictionaryUnavailable {
      code: code.to_string(),
      reason: "no word list loaded".to_string(),
    })?;

    Ok(words.iter().filter(|word| list.contains(word)).cloned().collect())
  }
}
