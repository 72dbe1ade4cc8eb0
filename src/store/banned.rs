// SPDX-License-Identifier: MPL-2.0

use crate::config::BANNED_WORDS_KEY;
use crate::store::{BoardDb, ChangeEvent, StoreError};

/// Admin-managed substring blocklist for post text
pub struct BannedWords<'a> {
    db: &'a BoardDb,
}

impl<'a> BannedWords<'a> {
    pub fn new(db: &'a BoardDb) -> Self {
        Self { db }
    }

    /// Registered words in insertion order
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        self.db.load_list(BANNED_WORDS_KEY)
    }

    /// Register a word. Input is trimmed and lowercased before storing.
    pub fn add(&self, word: &str) -> Result<String, StoreError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(StoreError::EmptyBannedWord);
        }

        let mut words = self.list()?;
        if words.contains(&word) {
            return Err(StoreError::DuplicateBannedWord(word));
        }

        words.push(word.clone());
        self.db
            .save(BANNED_WORDS_KEY, &words, ChangeEvent::BannedWords)?;
        tracing::info!(word = %word, "banned word added");
        Ok(word)
    }

    /// Remove an exact entry. Returns false when it was not registered.
    pub fn remove(&self, word: &str) -> Result<bool, StoreError> {
        let mut words = self.list()?;
        let before = words.len();
        words.retain(|w| w != word);
        if words.len() == before {
            return Ok(false);
        }

        self.db
            .save(BANNED_WORDS_KEY, &words, ChangeEvent::BannedWords)?;
        tracing::info!(word = %word, "banned word removed");
        Ok(true)
    }

    /// First registered word (list order) occurring anywhere in `text`, ignoring case
    pub fn find_in(&self, text: &str) -> Result<Option<String>, StoreError> {
        let words = self.list()?;
        Ok(first_match(&words, text).map(str::to_string))
    }
}

pub(crate) fn first_match<'w>(words: &'w [String], text: &str) -> Option<&'w str> {
    let haystack = text.to_lowercase();
    words
        .iter()
        .map(String::as_str)
        .find(|word| haystack.contains(word))
}
