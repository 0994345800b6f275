use crate::catalog::load_manifest;
use crate::mapper::run_mapper;
use crate::partition::plan;
use crate::phase::{PhaseBarrier, PublishSlots, StartGate};
use crate::queue::WorkQueue;
use crate::reducer::run_reducer;
use crate::writer::OutputPaths;
use anyhow::{anyhow, Context, Result};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

pub const OUTPUT_DIR_ENV: &str = "LETTERINDEX_OUTPUT_DIR";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub mappers: NonZeroUsize,
    pub reducers: NonZeroUsize,
    pub manifest: PathBuf,
    /// Where `<letter>.txt` artifacts go.
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Output goes to `$LETTERINDEX_OUTPUT_DIR` if set, else the working directory.
    pub fn new(mappers: NonZeroUsize, reducers: NonZeroUsize, manifest: PathBuf) -> Self {
        let output_dir = std::env::var(OUTPUT_DIR_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { mappers, reducers, manifest, output_dir }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub words: usize,
    pub artifacts: usize,
}

/// Load the manifest, run `M` mappers and `R` reducers to completion and write the artifacts.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let files = load_manifest(&config.manifest)?;
    let mappers = config.mappers.get();
    let reducers = config.reducers.get();

    let plan = plan(&files, mappers, reducers);
    let queue = WorkQueue::new(plan.mapper_files);
    let slots = PublishSlots::new(mappers);
    let barrier = PhaseBarrier::new(mappers, reducers);
    let out = OutputPaths::new(&config.output_dir);
    tracing::info!(files = files.len(), mappers, reducers, output = %config.output_dir.display(), "starting index run");

    let gate = StartGate::new();
    let (queue, slots, barrier, out, gate) = (&queue, &slots, &barrier, &out, &gate);
    let per_reducer: Vec<(usize, usize)> = thread::scope(|s| -> Result<Vec<(usize, usize)>> {
        let spawned = (|| -> Result<(Vec<_>, Vec<_>)> {
            let mut map_handles = Vec::with_capacity(mappers);
            for id in 0..mappers {
                let handle = thread::Builder::new()
                    .name(format!("mapper-{id}"))
                    .spawn_scoped(s, move || {
                        if gate.wait() {
                            run_mapper(id, queue, slots, barrier);
                        }
                    })
                    .context("spawning mapper thread")?;
                map_handles.push(handle);
            }

            let mut reduce_handles = Vec::with_capacity(reducers);
            for (id, range) in plan.letter_ranges.iter().copied().enumerate() {
                let handle = thread::Builder::new()
                    .name(format!("reducer-{id}"))
                    .spawn_scoped(s, move || {
                        if gate.wait() {
                            run_reducer(id, range, slots, barrier, out)
                        } else {
                            Ok((0, 0))
                        }
                    })
                    .context("spawning reducer thread")?;
                reduce_handles.push(handle);
            }
            Ok((map_handles, reduce_handles))
        })();
        // Workers already started must not reach a barrier the full pool will never fill.
        gate.release(spawned.is_ok());
        let (map_handles, reduce_handles) = spawned?;

        for (id, h) in map_handles.into_iter().enumerate() {
            h.join().map_err(|_| anyhow!("mapper {id} panicked"))?;
        }
        let mut results = Vec::with_capacity(reducers);
        for (id, h) in reduce_handles.into_iter().enumerate() {
            let r = h.join().map_err(|_| anyhow!("reducer {id} panicked"))?;
            results.push(r.with_context(|| format!("reducer {id} failed"))?);
        }
        Ok(results)
    })?;

    let summary = RunSummary {
        files: files.len(),
        words: per_reducer.iter().map(|(w, _)| w).sum(),
        artifacts: per_reducer.iter().map(|(_, a)| a).sum(),
    };
    tracing::info!(
        files = summary.files,
        words = summary.words,
        artifacts = summary.artifacts,
        took_s = start.elapsed().as_secs_f64(),
        "index run complete"
    );
    Ok(summary)
}
