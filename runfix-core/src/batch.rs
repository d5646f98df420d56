use crate::backup_path;
use crate::diff::unified_diff;
use crate::error::RunfixError;
use crate::output::BatchReport;
use crate::pipeline::rewrite;
use crate::targets::Targets;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a rewrite batch
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute rewrites without touching the filesystem
    pub dry_run: bool,
    /// Stop at the first read/write failure instead of moving on
    pub fail_fast: bool,
    /// Attach a unified diff to every changed file
    pub with_diff: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    NotFound,
    Unchanged,
    Fixed,
    WouldFix,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file: String,
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    pub leftover_blocks: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileOutcome {
    fn new(file: &str, path: PathBuf, status: FileStatus) -> Self {
        Self {
            file: file.to_string(),
            path,
            status,
            rules: Vec::new(),
            leftover_blocks: 0,
            backup: None,
            error: None,
            diff: None,
        }
    }
}

/// Rewrite every target under `directory`, one file at a time.
///
/// Missing files are reported and skipped. Read and write failures are
/// recorded as [`FileStatus::Failed`] and the batch moves on, unless
/// `options.fail_fast` is set. Then the batch stops after the first failure
/// and [`BatchReport::aborted`] says where; outcomes gathered before it are kept.
pub fn run(directory: &Path, targets: &Targets, options: &RunOptions) -> BatchReport {
    tracing::info!(
        directory = %directory.display(),
        files = targets.files.len(),
        excluded = targets.excluded.len(),
        dry_run = options.dry_run,
        "starting rewrite batch"
    );

    let mut report = BatchReport {
        directory: directory.to_path_buf(),
        candidates: targets.files.len(),
        excluded: targets.excluded.clone(),
        dry_run: options.dry_run,
        outcomes: Vec::with_capacity(targets.files.len()),
        aborted: None,
    };

    for file in &targets.files {
        let path = directory.join(file);
        if !path.exists() {
            tracing::warn!(file = %file, "file not found");
            report
                .outcomes
                .push(FileOutcome::new(file, path, FileStatus::NotFound));
            continue;
        }

        tracing::debug!(file = %file, "processing");
        match process_file(file, &path, options) {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(err) => {
                tracing::error!(file = %file, error = %err, "rewrite failed");
                let mut outcome = FileOutcome::new(file, path, FileStatus::Failed);
                outcome.error = Some(err.to_string());
                report.outcomes.push(outcome);

                if options.fail_fast {
                    report.aborted = Some(format!("Batch aborted at {}: {}", file, err));
                    break;
                }
            },
        }
    }

    report
}

fn process_file(file: &str, path: &Path, options: &RunOptions) -> Result<FileOutcome, RunfixError> {
    let original =
        fs::read_to_string(path).map_err(|source| RunfixError::read(path.to_path_buf(), source))?;

    let result = rewrite(&original);
    let mut outcome = FileOutcome::new(file, path.to_path_buf(), FileStatus::Unchanged);
    outcome.leftover_blocks = result.leftover_blocks;
    if result.leftover_blocks > 0 {
        tracing::warn!(
            file = %file,
            blocks = result.leftover_blocks,
            "inline runScript blocks left unconverted"
        );
    }

    if !result.changed(&original) {
        tracing::info!(file = %file, "no changes needed");
        return Ok(outcome);
    }

    outcome.rules = result.fired.iter().map(ToString::to_string).collect();
    if options.with_diff || options.dry_run {
        outcome.diff = Some(unified_diff(file, &original, &result.content));
    }

    if options.dry_run {
        outcome.status = FileStatus::WouldFix;
        tracing::info!(file = %file, rules = ?result.fired, "would fix");
        return Ok(outcome);
    }

    let backup = backup_path(path);
    fs::write(&backup, &original).map_err(|source| RunfixError::Backup {
        path: backup.clone(),
        source,
    })?;
    outcome.backup = Some(backup);

    fs::write(path, &result.content).map_err(|source| RunfixError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    outcome.status = FileStatus::Fixed;
    tracing::info!(file = %file, rules = ?result.fired, "fixed");
    Ok(outcome)
}
