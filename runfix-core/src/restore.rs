use crate::backup_path;
use crate::error::RunfixError;
use crate::output::RestoreReport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStatus {
    Restored,
    WouldRestore,
    NoBackup,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreOutcome {
    pub file: String,
    pub path: PathBuf,
    pub status: RestoreStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Put each file's `.backup` content back and remove the backup.
///
/// Files without a backup are reported and left alone.
pub fn restore(directory: &Path, files: &[String], dry_run: bool) -> RestoreReport {
    let mut outcomes = Vec::with_capacity(files.len());

    for file in files {
        let path = directory.join(file);
        let backup = backup_path(&path);

        let (status, error) = if !backup.is_file() {
            (RestoreStatus::NoBackup, None)
        } else if dry_run {
            (RestoreStatus::WouldRestore, None)
        } else {
            match restore_file(&path, &backup) {
                Ok(()) => {
                    tracing::info!(file = %file, "restored from backup");
                    (RestoreStatus::Restored, None)
                },
                Err(err) => {
                    tracing::error!(file = %file, error = %err, "restore failed");
                    (RestoreStatus::Failed, Some(err.to_string()))
                },
            }
        };

        outcomes.push(RestoreOutcome {
            file: file.clone(),
            path,
            status,
            error,
        });
    }

    RestoreReport {
        directory: directory.to_path_buf(),
        dry_run,
        outcomes,
    }
}

fn restore_file(path: &Path, backup: &Path) -> Result<(), RunfixError> {
    fs::copy(backup, path).map_err(|source| RunfixError::Restore {
        path: path.to_path_buf(),
        source,
    })?;
    fs::remove_file(backup).map_err(|source| RunfixError::Restore {
        path: backup.to_path_buf(),
        source,
    })
}
