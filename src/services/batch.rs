//! Batch conversion of a directory of images.
//!
//! Each file is an independent unit of work: a failure is logged and
//! recorded, and the remaining files are still processed.

use std::fs;
use std::path::{Path, PathBuf};

use palettone_core::{Pipeline, ProcessedImage, Progress};
use rayon::prelude::*;

use super::image_io::{self, DebugStage};
use crate::error::AppError;

/// Regular, non-hidden files in `input_dir`, sorted by name.
pub fn list_images(input_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths of successfully converted images
    pub processed: Vec<PathBuf>,
    /// Input paths that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs one [`Pipeline`] over many files
pub struct BatchRunner {
    pipeline: Pipeline,
    output_dir: PathBuf,
    jobs: Option<usize>,
}

impl BatchRunner {
    pub fn new(pipeline: Pipeline, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            output_dir: output_dir.into(),
            jobs: None,
        }
    }

    /// Limit the number of worker threads (None = one per core)
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Convert every file in `files`, in parallel.
    ///
    /// Only setup failures (output directory, thread pool) are returned as
    /// errors; per-image failures end up in the report.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport, AppError> {
        fs::create_dir_all(&self.output_dir)?;

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = self.jobs {
            builder = builder.num_threads(jobs);
        }
        let pool = builder.build()?;

        let results: Vec<(PathBuf, Result<PathBuf, AppError>)> = pool.install(|| {
            files
                .par_iter()
                .map(|file| (file.clone(), self.process_file(file)))
                .collect()
        });

        let mut report = BatchReport::default();
        for (file, result) in results {
            match result {
                Ok(output) => report.processed.push(output),
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "Image processing failed");
                    report.failed.push((file, e.to_string()));
                }
            }
        }

        tracing::info!(
            processed = report.processed.len(),
            failed = report.failed.len(),
            "Batch complete"
        );
        Ok(report)
    }

    /// Convert a single file and write its result (and debug stages).
    pub fn process_file(&self, input: &Path) -> Result<PathBuf, AppError> {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = image_io::load_image(input)?;
        tracing::debug!(
            file = %name,
            width = source.width(),
            height = source.height(),
            "Decoded image"
        );

        let result = self
            .pipeline
            .process_with_progress(&source, &mut |p: Progress| {
                tracing::info!(file = %name, stage = %p.stage, percent = p.percent, "Progress");
            })?;

        let output = image_io::output_path(&self.output_dir, input);
        image_io::save_image(&output, &result.image)?;
        self.save_stages(input, &result)?;

        tracing::info!(file = %name, output = %output.display(), "Processing complete");
        Ok(output)
    }

    fn save_stages(&self, input: &Path, result: &ProcessedImage) -> Result<(), AppError> {
        let Some(ref stages) = result.stages else {
            return Ok(());
        };

        image_io::save_image(
            &image_io::stage_path(&self.output_dir, input, DebugStage::Quantized),
            &stages.quantized,
        )?;
        if let Some(ref mask) = stages.mask {
            image_io::save_mask(
                &image_io::stage_path(&self.output_dir, input, DebugStage::Mask),
                mask,
            )?;
        }
        if let Some(ref blurred) = stages.blurred {
            image_io::save_image(
                &image_io::stage_path(&self.output_dir, input, DebugStage::Blurred),
                blurred,
            )?;
        }
        Ok(())
    }
}
