use crate::phase::{PhaseBarrier, PublishSlots, Role};
use crate::queue::WorkQueue;
use crate::tokenizer::tokenize;
use crate::{FileRecord, PartialIndex};
use std::fs;

/// Drain mapper `id`'s partition, publish the private index, then wait at the barrier.
pub fn run_mapper(id: usize, queue: &WorkQueue, slots: &PublishSlots, barrier: &PhaseBarrier) {
    let mut partial = PartialIndex::new();
    let mut files = 0usize;
    while let Some(file) = queue.pop(id) {
        map_file(&file, &mut partial);
        files += 1;
    }
    tracing::debug!(mapper = id, files, words = partial.len(), "mapper drained partition");

    if slots.publish(id, partial).is_err() {
        tracing::warn!(mapper = id, "publication slot already filled, dropping duplicate");
    }
    barrier.wait(Role::Mapper, id);
}

/// Add every word of `file` to `partial`. An unreadable file contributes nothing.
pub fn map_file(file: &FileRecord, partial: &mut PartialIndex) {
    let bytes = match fs::read(&file.path) {
        Ok(b) => b,
        Err(err) => {
            tracing::debug!(id = file.id, path = %file.path.display(), %err, "skipping unreadable file");
            return;
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    for word in tokenize(&text) {
        partial.entry(word).or_default().insert(file.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    #[test]
    fn repeated_words_collapse_to_one_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc1.txt");
        fs::write(&path, "Cat dog CAT").unwrap();

        let mut partial = PartialIndex::new();
        map_file(&FileRecord { id: 1, path, size: 11 }, &mut partial);
        assert_eq!(partial.len(), 2);
        assert_eq!(partial["cat"], BTreeSet::from([1]));
        assert_eq!(partial["dog"], BTreeSet::from([1]));
    }

    #[test]
    fn missing_file_yields_no_words() {
        let mut partial = PartialIndex::new();
        map_file(&FileRecord { id: 3, path: PathBuf::from("/definitely/not/here.txt"), size: 0 }, &mut partial);
        assert!(partial.is_empty());
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        fs::write(&path, b"caf\xE9 ok").unwrap();

        let mut partial = PartialIndex::new();
        map_file(&FileRecord { id: 2, path, size: 7 }, &mut partial);
        let mut words: Vec<&str> = partial.keys().map(String::as_str).collect();
        words.sort();
        assert_eq!(words, vec!["caf", "ok"]);
    }

    #[test]
    fn mapper_publishes_its_whole_partition() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "apple pie").unwrap();
        fs::write(&b, "apple tart").unwrap();
        let queue = WorkQueue::new(vec![vec![
            FileRecord { id: 1, path: a, size: 9 },
            FileRecord { id: 2, path: b, size: 10 },
        ]]);
        let slots = PublishSlots::new(1);
        let barrier = PhaseBarrier::new(1, 0);

        run_mapper(0, &queue, &slots, &barrier);

        let published: Vec<&PartialIndex> = slots.published().collect();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0]["apple"], BTreeSet::from([1, 2]));
        assert_eq!(published[0]["tart"], BTreeSet::from([2]));
        assert_eq!(queue.pending(0), 0);
    }
}
