use crate::BACKUP_SUFFIX;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// How the candidate files of a batch are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSet {
    /// Ordered filenames minus an exclusion set.
    List {
        files: Vec<String>,
        exclude: Vec<String>,
    },
    /// Files directly inside the directory matching `include` and not `exclude`.
    Scan {
        include: Vec<String>,
        exclude: Vec<String>,
    },
}

/// Resolved candidates, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub files: Vec<String>,
    /// Candidates dropped by the exclusion set or exclude globs.
    pub excluded: Vec<String>,
}

pub fn resolve_targets(directory: &Path, set: &TargetSet) -> Result<Targets> {
    match set {
        TargetSet::List { files, exclude } => Ok(resolve_list(files, exclude)),
        TargetSet::Scan { include, exclude } => scan_directory(directory, include, exclude),
    }
}

fn resolve_list(files: &[String], exclude: &[String]) -> Targets {
    let skip: HashSet<&str> = exclude.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut targets = Targets::default();

    for file in files {
        if !seen.insert(file.as_str()) {
            continue;
        }
        if skip.contains(file.as_str()) {
            targets.excluded.push(file.clone());
        } else {
            targets.files.push(file.clone());
        }
    }

    targets
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build glob set")
}

fn scan_directory(directory: &Path, include: &[String], exclude: &[String]) -> Result<Targets> {
    let include_set = build_globset(include)?;
    let exclude_set = build_globset(exclude)?;
    let mut targets = Targets::default();

    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to scan directory {}", directory.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if name.ends_with(BACKUP_SUFFIX) {
            continue;
        }
        if !include.is_empty() && !include_set.is_match(name) {
            continue;
        }
        if exclude_set.is_match(name) {
            targets.excluded.push(name.to_string());
        } else {
            targets.files.push(name.to_string());
        }
    }

    Ok(targets)
}
