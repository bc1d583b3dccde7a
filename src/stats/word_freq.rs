//! Word Frequency Counter
//! Counts tokens while remembering first-seen order for stable tie-breaking.

use std::collections::HashMap;

/// One entry of the top-N word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Token counter whose ranking breaks ties by first occurrence.
#[derive(Debug, Default)]
pub struct WordCounter {
    index: HashMap<String, usize>,
    entries: Vec<WordCount>,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push(WordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn extend<I, T>(&mut self, words: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for word in words {
            self.add(word.as_ref());
        }
    }

    /// Number of distinct tokens seen.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// The `n` most frequent words, descending by count, ties by first occurrence.
    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        // stable sort keeps insertion order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}
