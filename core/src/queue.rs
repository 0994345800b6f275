use crate::FileRecord;
use parking_lot::Mutex;

/// Pending per-mapper file assignments behind one lock.
///
/// A mapper only pops from its own partition; there is no stealing.
pub struct WorkQueue {
    partitions: Mutex<Vec<Vec<FileRecord>>>,
}

impl WorkQueue {
    pub fn new(partitions: Vec<Vec<FileRecord>>) -> Self {
        Self { partitions: Mutex::new(partitions) }
    }

    /// Take the last pending file for `mapper`, or `None` once its partition is drained.
    pub fn pop(&self, mapper: usize) -> Option<FileRecord> {
        let mut guard = self.partitions.lock();
        guard.get_mut(mapper)?.pop()
    }

    pub fn pending(&self, mapper: usize) -> usize {
        self.partitions.lock().get(mapper).map_or(0, Vec::len)
    }

    pub fn mappers(&self) -> usize {
        self.partitions.lock().len()
    }
}
