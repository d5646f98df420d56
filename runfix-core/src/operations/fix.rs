use crate::batch::{run, RunOptions};
use crate::config::Config;
use crate::output::BatchReport;
use crate::targets::{resolve_targets, TargetSet};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Per-invocation overrides for `runfix fix`
#[derive(Debug, Clone, Default)]
pub struct FixRequest {
    /// Overrides `config.directory`
    pub directory: Option<PathBuf>,
    /// Explicit files; replaces the configured list when non-empty
    pub files: Vec<String>,
    /// Added to the configured exclusion set
    pub skip: Vec<String>,
    /// Scan the directory instead of using a file list
    pub scan: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub dry_run: bool,
    pub fail_fast: bool,
    pub with_diff: bool,
}

/// High-level fix operation - equivalent to `runfix fix`
///
/// A missing directory is only an error in scan mode. With a file list every
/// candidate is reported as not found instead.
pub fn fix_operation(config: &Config, request: &FixRequest) -> Result<BatchReport> {
    let directory = request
        .directory
        .clone()
        .unwrap_or_else(|| config.directory.clone());

    let mut set = if request.scan && request.files.is_empty() {
        let mut config = config.clone();
        config.scan.enabled = true;
        config.target_set()
    } else if request.files.is_empty() {
        config.target_set()
    } else {
        TargetSet::List {
            files: request.files.clone(),
            exclude: config.already_fixed.clone(),
        }
    };

    match &mut set {
        TargetSet::List { exclude, .. } => exclude.extend(request.skip.iter().cloned()),
        TargetSet::Scan { include, exclude } => {
            if !request.include.is_empty() {
                include.clone_from(&request.include);
            }
            exclude.extend(request.exclude.iter().cloned());
            exclude.extend(request.skip.iter().cloned());
        },
    }

    ensure_scannable(&directory, &set)?;
    let targets = resolve_targets(&directory, &set)?;

    let options = RunOptions {
        dry_run: request.dry_run,
        fail_fast: request.fail_fast,
        with_diff: request.with_diff,
    };

    Ok(run(&directory, &targets, &options))
}

/// Scan mode walks the directory, so it has to exist.
pub(crate) fn ensure_scannable(directory: &Path, set: &TargetSet) -> Result<()> {
    if matches!(set, TargetSet::Scan { .. }) && !directory.is_dir() {
        return Err(anyhow!("Directory not found: {}", directory.display()));
    }
    Ok(())
}
