use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

pub mod catalog;
pub mod mapper;
pub mod partition;
pub mod phase;
pub mod pipeline;
pub mod queue;
pub mod reducer;
pub mod tokenizer;
pub mod writer;

pub use pipeline::{run, PipelineConfig, RunSummary};

/// 1-based position of a file in the manifest.
pub type FileId = u32;

/// Word -> ids of the files it occurs in. Ids iterate in ascending order.
pub type WordIndex = HashMap<String, BTreeSet<FileId>>;

/// Private map built by one mapper, published once at the end of the map phase.
pub type PartialIndex = WordIndex;

/// Merged map owned by one reducer, limited to its letter range.
pub type ResultIndex = WordIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub id: FileId,
    pub path: PathBuf,
    pub size: u64,
}

/// Contiguous slice of `a..=z`. May be empty when there are more reducers than letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterRange {
    first: u8,
    len: u8,
}

impl LetterRange {
    pub const EMPTY: LetterRange = LetterRange { first: b'z' + 1, len: 0 };

    /// Range of `len` letters starting at offset `first` from `a`. Clamped to `z`.
    pub fn new(first: u8, len: u8) -> Self {
        if len == 0 || first >= 26 {
            return Self::EMPTY;
        }
        let len = len.min(26 - first);
        Self { first: b'a' + first, len }
    }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn len(&self) -> usize { self.len as usize }

    pub fn start(&self) -> Option<char> {
        (!self.is_empty()).then(|| self.first as char)
    }

    pub fn end(&self) -> Option<char> {
        (!self.is_empty()).then(|| (self.first + self.len - 1) as char)
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && (self.first..self.first + self.len).contains(&(c as u8))
    }

    /// True when the word's first character lies in this range.
    pub fn covers(&self, word: &str) -> bool {
        word.chars().next().map_or(false, |c| self.contains(c))
    }

    pub fn letters(&self) -> impl Iterator<Item = char> {
        (self.first..self.first + self.len).map(char::from)
    }
}

impl std::fmt::Display for LetterRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start(), self.end()) {
            (Some(s), Some(e)) => write!(f, "{s}-{e}"),
            _ => f.write_str("empty"),
        }
    }
}
