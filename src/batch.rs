//! Running the extractor over many files
//!
//! Each file gets its own extraction with no shared state, so a failure in
//! one file never affects another. With more than one job the files are
//! processed on a rayon pool; results always come back in argument order.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::input::extract_file;
use crate::models::Summary;

/// Outcome of extracting one file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Summary>,
}

fn process_one(path: &Path) -> FileOutcome {
    log::debug!("Extracting {}", path.display());
    let result = extract_file(path);
    if let Err(e) = &result {
        log::debug!("Extraction failed for {}: {:#}", path.display(), e);
    }
    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}

/// Extract every file, using up to `jobs` worker threads
///
/// The returned error covers only thread pool setup; per-file failures are
/// carried in each [`FileOutcome`].
pub fn process_files(paths: &[PathBuf], jobs: usize) -> Result<Vec<FileOutcome>> {
    let jobs = jobs.max(1).min(paths.len().max(1));

    if jobs == 1 {
        return Ok(paths.iter().map(|path| process_one(path)).collect());
    }

    log::info!("Processing {} files on {} threads", paths.len(), jobs);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to create thread pool")?;

    // par_iter().map().collect() preserves input order
    Ok(pool.install(|| paths.par_iter().map(|path| process_one(path)).collect()))
}
