use crate::{FileId, FileRecord};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a manifest from disk and stat every listed file.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<FileRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let paths = parse_manifest(&text)?;
    let files: Vec<FileRecord> = paths
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let size = file_size(&p);
            FileRecord { id: (i + 1) as FileId, path: p, size }
        })
        .collect();
    tracing::info!(manifest = %path.display(), files = files.len(), "loaded manifest");
    Ok(files)
}

/// Parse `N path1 path2 ...` into the first `N` paths, in listed order.
///
/// A listing shorter than `N` is padded with empty paths, which stat as size 0 and read
/// as no words, so ids stay `1..=N`.
pub fn parse_manifest(text: &str) -> Result<Vec<PathBuf>> {
    let mut tokens = text.split_whitespace();
    let count_tok = tokens.next().ok_or_else(|| anyhow!("manifest is empty"))?;
    let count: usize = count_tok
        .parse()
        .with_context(|| format!("manifest file count {count_tok:?} is not a number"))?;

    let mut paths: Vec<PathBuf> = tokens.by_ref().take(count).map(PathBuf::from).collect();
    if paths.len() < count {
        tracing::warn!(declared = count, listed = paths.len(), "manifest is short, treating missing entries as absent files");
        paths.resize(count, PathBuf::new());
    }
    let extra = tokens.count();
    if extra > 0 {
        tracing::warn!(extra, "ignoring paths listed past the declared count");
    }
    Ok(paths)
}

/// Size in bytes, or 0 when the file cannot be stat-ed.
pub fn file_size(path: &Path) -> u64 {
    match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "stat failed, treating size as 0");
            0
        }
    }
}
