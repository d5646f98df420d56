use super::fix::ensure_scannable;
use crate::config::Config;
use crate::output::RestoreReport;
use crate::restore::restore;
use crate::targets::resolve_targets;
use anyhow::Result;
use std::path::PathBuf;

/// Per-invocation overrides for `runfix restore`
#[derive(Debug, Clone, Default)]
pub struct RestoreRequest {
    pub directory: Option<PathBuf>,
    /// Explicit files; the configured candidates are used when empty
    pub files: Vec<String>,
    pub dry_run: bool,
}

/// High-level restore operation - equivalent to `runfix restore`
pub fn restore_operation(config: &Config, request: &RestoreRequest) -> Result<RestoreReport> {
    let directory = request
        .directory
        .clone()
        .unwrap_or_else(|| config.directory.clone());

    let files = if request.files.is_empty() {
        let set = config.target_set();
        ensure_scannable(&directory, &set)?;
        resolve_targets(&directory, &set)?.files
    } else {
        request.files.clone()
    };

    Ok(restore(&directory, &files, request.dry_run))
}
