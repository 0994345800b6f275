use crate::{FileRecord, LetterRange};

const ALPHABET_LEN: usize = 26;

/// Static work split decided before any worker starts.
#[derive(Debug, Clone)]
pub struct Plan {
    /// `mapper_files[i]` is mapper `i`'s partition.
    pub mapper_files: Vec<Vec<FileRecord>>,
    /// `letter_ranges[j]` belongs to reducer `j`, in creation order.
    pub letter_ranges: Vec<LetterRange>,
}

pub fn plan(files: &[FileRecord], mappers: usize, reducers: usize) -> Plan {
    Plan {
        mapper_files: partition_files(files, mappers),
        letter_ranges: partition_letters(reducers),
    }
}

/// Sort by ascending size, then deal files out by `rank % mappers`, largest first.
///
/// Interleaving big and small files spreads the load without trying to be optimal.
/// Equal sizes keep manifest order.
pub fn partition_files(files: &[FileRecord], mappers: usize) -> Vec<Vec<FileRecord>> {
    let mappers = mappers.max(1);
    let mut sorted = files.to_vec();
    sorted.sort_by_key(|f| f.size);

    let mut out = vec![Vec::new(); mappers];
    for (rank, file) in sorted.into_iter().enumerate().rev() {
        out[rank % mappers].push(file);
    }
    out
}

/// Give each reducer `26 / R` contiguous letters; the first `26 % R` reducers get one more.
/// Reducers past the 26th get an empty range.
pub fn partition_letters(reducers: usize) -> Vec<LetterRange> {
    let reducers = reducers.max(1);
    let interval = ALPHABET_LEN / reducers;
    let remainder = ALPHABET_LEN % reducers;

    let mut next = 0usize;
    (0..reducers)
        .map(|i| {
            let len = interval + usize::from(i < remainder);
            if next >= ALPHABET_LEN || len == 0 {
                return LetterRange::EMPTY;
            }
            let range = LetterRange::new(next as u8, len as u8);
            next += len;
            range
        })
        .collect()
}
