//! Dictionary oracle
//!
//! The engine only needs word membership. [`Dictionary`] is that seam; the
//! shipped [`WordList`] is a lowercase hash set loaded from a word-per-line
//! file or any iterator of words. An empty dictionary is valid and simply
//! never matches.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Word membership oracle.
///
/// Lookups are case-insensitive: implementations must accept any casing.
pub trait Dictionary: fmt::Debug + Send + Sync {
    fn contains(&self, word: &str) -> bool;

    /// Number of known words, if the oracle can tell
    fn word_count(&self) -> Option<usize> {
        None
    }

    /// Known to hold no words, so board scans can be skipped
    fn is_empty(&self) -> bool {
        self.word_count() == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to open word list {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read word list: {0}")]
    Read(#[from] io::Error),
}

/// Hash-set backed dictionary with lowercase keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// A dictionary that knows no words
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any iterator of words. Entries are trimmed and lowercased;
    /// blank entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();
        Self { words }
    }

    /// Read one word per line. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DictionaryError> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if let Some(word) = normalize(line) {
                words.insert(word);
            }
        }
        Ok(Self { words })
    }

    /// Load a word-per-line file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DictionaryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_reader(BufReader::new(file))?;
        log::info!("loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn insert(&mut self, word: &str) -> bool {
        match normalize(word) {
            Some(word) => self.words.insert(word),
            None => false,
        }
    }
}

fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    fn word_count(&self) -> Option<usize> {
        Some(self.words.len())
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_words(iter)
    }
}
