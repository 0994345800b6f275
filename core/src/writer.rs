use crate::{FileId, LetterRange, ResultIndex};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct OutputPaths {
    pub root: PathBuf,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn letter(&self, letter: char) -> PathBuf { self.root.join(format!("{letter}.txt")) }
}

/// One letter's words, most files first, then alphabetical.
pub type LetterEntries<'a> = Vec<(&'a str, &'a BTreeSet<FileId>)>;

/// Bucket `index` by first letter in one pass, keeping only letters in `range`, and sort each bucket.
pub fn group_by_letter(index: &ResultIndex, range: LetterRange) -> BTreeMap<char, LetterEntries<'_>> {
    let mut groups: BTreeMap<char, LetterEntries<'_>> = BTreeMap::new();
    for (word, ids) in index {
        match word.chars().next() {
            Some(c) if range.contains(c) => groups.entry(c).or_default().push((word.as_str(), ids)),
            _ => {}
        }
    }
    for entries in groups.values_mut() {
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
    }
    groups
}

/// Lines of one letter's artifact: `word: [1 2 3]\n` each.
pub fn render_letter(entries: &[(&str, &BTreeSet<FileId>)]) -> String {
    let mut out = String::new();
    for (word, ids) in entries {
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        out.push_str(word);
        out.push_str(": [");
        out.push_str(&ids.join(" "));
        out.push_str("]\n");
    }
    out
}

/// Create or overwrite one artifact per letter in `range`, including letters with no words.
/// Returns the number of artifacts written.
pub fn write_letters(paths: &OutputPaths, index: &ResultIndex, range: LetterRange) -> Result<usize> {
    if range.is_empty() {
        return Ok(0);
    }
    create_dir_all(&paths.root)
        .with_context(|| format!("creating output directory {}", paths.root.display()))?;
    let groups = group_by_letter(index, range);
    let mut written = 0;
    for letter in range.letters() {
        let path = paths.letter(letter);
        let body = groups.get(&letter).map(|e| render_letter(e)).unwrap_or_default();
        let f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut w = BufWriter::new(f);
        w.write_all(body.as_bytes())
            .and_then(|_| w.flush())
            .with_context(|| format!("writing {}", path.display()))?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn index(entries: &[(&str, &[u32])]) -> ResultIndex {
        entries
            .iter()
            .map(|(w, ids)| (w.to_string(), ids.iter().copied().collect()))
            .collect()
    }

    #[test]
    fn orders_by_file_count_then_word() {
        let idx = index(&[("bee", &[3]), ("bat", &[2, 1]), ("ant", &[1]), ("bear", &[4, 1, 2]), ("bag", &[5])]);
        let groups = group_by_letter(&idx, LetterRange::new(0, 26));
        assert_eq!(groups.keys().collect::<String>(), "ab");
        assert_eq!(render_letter(&groups[&'b']), "bear: [1 2 4]\nbat: [1 2]\nbag: [5]\nbee: [3]\n");
        assert_eq!(render_letter(&groups[&'a']), "ant: [1]\n");
        assert_eq!(render_letter(&[]), "");
    }

    #[test]
    fn grouping_drops_letters_outside_the_range() {
        let idx = index(&[("apple", &[1]), ("cat", &[2]), ("dog", &[1, 2]), ("zoo", &[3])]);
        let groups = group_by_letter(&idx, LetterRange::new(1, 3));
        assert_eq!(groups.keys().collect::<String>(), "cd");
        assert_eq!(groups[&'d'], vec![("dog", &BTreeSet::from([1, 2]))]);
    }

    #[test]
    fn writes_every_letter_in_range_even_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path());
        fs::write(paths.letter('d'), "stale contents\n").unwrap();
        let idx = index(&[("cat", &[1]), ("dog", &[2, 1])]);

        let n = write_letters(&paths, &idx, LetterRange::new(2, 3)).unwrap();
        assert_eq!(n, 3);
        assert_eq!(fs::read_to_string(paths.letter('c')).unwrap(), "cat: [1]\n");
        assert_eq!(fs::read_to_string(paths.letter('d')).unwrap(), "dog: [1 2]\n");
        assert_eq!(fs::read_to_string(paths.letter('e')).unwrap(), "");
        assert!(!paths.letter('b').exists());
        assert!(!paths.letter('f').exists());
    }

    #[test]
    fn empty_range_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path().join("out"));
        assert_eq!(write_letters(&paths, &ResultIndex::new(), LetterRange::EMPTY).unwrap(), 0);
        assert!(!paths.root.exists());
    }
}
