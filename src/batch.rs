//! Walks an icon directory and writes a badged copy of every PNG into a
//! flat output directory.
//!
//! A file that cannot be read, rendered or written is skipped; nothing a
//! single icon does stops the run.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::badge::{render_badge, BadgeParams};
use crate::effect::EffectError;
use crate::geometry::Scale;
use crate::icon;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(transparent)]
    InvalidEffectInput(#[from] EffectError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug, Clone)]
pub struct BatchJob {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub params: BadgeParams,
    pub scale: Scale,
}

#[derive(Debug)]
pub enum TaskOutcome {
    Written { source: PathBuf, destination: PathBuf },
    Skipped { source: PathBuf, error: TaskError },
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Paths under `source_dir` whose relative path contains ".png", in walk
/// order (sorted by name within each directory). Directories match too;
/// they fail to decode later and are skipped.
pub fn find_icons(source_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(source_dir)
                .is_ok_and(|relative| relative.to_string_lossy().contains(".png"))
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Destination for `source`: its file name directly under `output_dir`.
/// Icons with the same name in different subdirectories collide and the
/// last one processed wins.
pub fn output_path(output_dir: &Path, source: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(source),
    }
}

pub fn process_icon(
    source: &Path,
    destination: &Path,
    params: &BadgeParams,
    scale: Scale,
) -> Result<(), TaskError> {
    let image = icon::load_icon(source).map_err(|e| TaskError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;
    let badged = render_badge(&image, params, scale)?;
    icon::save_png(&badged, destination).map_err(|e| TaskError::Write {
        path: destination.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Processes every icon in turn, reporting each outcome as it happens.
/// `job.output_dir` must already exist; otherwise every icon is skipped
/// with a write error.
pub fn run(job: &BatchJob, mut on_outcome: impl FnMut(&TaskOutcome)) -> BatchReport {
    let mut report = BatchReport::default();

    for source in find_icons(&job.source_dir) {
        let destination = output_path(&job.output_dir, &source);
        let outcome = match process_icon(&source, &destination, &job.params, job.scale) {
            Ok(()) => TaskOutcome::Written {
                source,
                destination,
            },
            Err(error) => TaskOutcome::Skipped { source, error },
        };
        on_outcome(&outcome);
        match outcome {
            TaskOutcome::Written { destination, .. } => report.written.push(destination),
            TaskOutcome::Skipped { source, .. } => report.skipped.push(source),
        }
    }

    report
}
