use crate::phase::{PhaseBarrier, PublishSlots, Role};
use crate::writer::{write_letters, OutputPaths};
use crate::{LetterRange, PartialIndex, ResultIndex};
use anyhow::Result;

/// Wait for the map phase, merge the reducer's letter range and write its artifacts.
/// Returns the number of distinct words and artifacts written.
pub fn run_reducer(
    id: usize,
    range: LetterRange,
    slots: &PublishSlots,
    barrier: &PhaseBarrier,
    out: &OutputPaths,
) -> Result<(usize, usize)> {
    barrier.wait(Role::Reducer, id);

    let merged = merge(slots.published(), range);
    let words = merged.len();
    tracing::debug!(reducer = id, %range, words, "reducer merged partial indexes");

    let artifacts = write_letters(out, &merged, range)?;
    Ok((words, artifacts))
}

/// Union the file-id sets of every entry whose first letter falls in `range`.
pub fn merge<'a, I>(partials: I, range: LetterRange) -> ResultIndex
where
    I: IntoIterator<Item = &'a PartialIndex>,
{
    let mut result = ResultIndex::new();
    if range.is_empty() {
        return result;
    }
    for partial in partials {
        for (word, ids) in partial {
            if !range.covers(word) {
                continue;
            }
            result.entry(word.clone()).or_default().extend(ids.iter().copied());
        }
    }
    result
}
