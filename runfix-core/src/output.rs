use crate::batch::{FileOutcome, FileStatus};
use crate::diff::colorize_diff;
use crate::restore::{RestoreOutcome, RestoreStatus};
use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a rewrite batch
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub candidates: usize,
    pub excluded: Vec<String>,
    pub dry_run: bool,
    pub outcomes: Vec<FileOutcome>,
    /// Set when a fail-fast batch stopped before its last candidate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl BatchReport {
    pub fn count(&self, status: FileStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.aborted.is_some() || self.count(FileStatus::Failed) > 0
    }

    /// Diffs of every changed file, in processing order
    pub fn render_diffs(&self, use_color: bool) -> String {
        let mut output = String::new();
        for diff in self.outcomes.iter().filter_map(|o| o.diff.as_deref()) {
            if use_color {
                output.push_str(&colorize_diff(diff));
            } else {
                output.push_str(diff);
            }
        }
        output
    }
}

/// Result of restoring files from their backups
#[derive(Debug, Serialize, Deserialize)]
pub struct RestoreReport {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub outcomes: Vec<RestoreOutcome>,
}

impl RestoreReport {
    pub fn count(&self, status: RestoreStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(RestoreStatus::Failed) > 0
    }
}

/// The rule table, for `runfix rules`
#[derive(Debug)]
pub struct RulesReport {
    pub rules: &'static [Rule],
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for BatchReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.has_failures(),
            "operation": "fix",
            "directory": self.directory,
            "dry_run": self.dry_run,
            "aborted": self.aborted,
            "summary": {
                "candidates": self.candidates,
                "excluded": self.excluded.len(),
                "fixed": self.count(FileStatus::Fixed),
                "would_fix": self.count(FileStatus::WouldFix),
                "unchanged": self.count(FileStatus::Unchanged),
                "not_found": self.count(FileStatus::NotFound),
                "failed": self.count(FileStatus::Failed),
            },
            "files": self.outcomes,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Processing {} files with runScript issues...",
            self.candidates
        )
        .unwrap();

        for outcome in &self.outcomes {
            match outcome.status {
                FileStatus::NotFound => {
                    writeln!(output, "❌ File not found: {}", outcome.file).unwrap();
                    continue;
                },
                _ => writeln!(output, "📝 Processing {}...", outcome.file).unwrap(),
            }

            match outcome.status {
                FileStatus::Fixed => writeln!(output, "✅ Fixed {}", outcome.file).unwrap(),
                FileStatus::WouldFix => writeln!(
                    output,
                    "🔍 Would fix {} ({})",
                    outcome.file,
                    outcome.rules.join(", ")
                )
                .unwrap(),
                FileStatus::Unchanged => {
                    writeln!(output, "ℹ️ No changes needed for {}", outcome.file).unwrap();
                },
                FileStatus::Failed => writeln!(
                    output,
                    "⚠️ Failed {}: {}",
                    outcome.file,
                    outcome.error.as_deref().unwrap_or("unknown error")
                )
                .unwrap(),
                FileStatus::NotFound => {},
            }

            if outcome.leftover_blocks > 0 {
                writeln!(
                    output,
                    "   {} inline runScript block(s) left unconverted",
                    outcome.leftover_blocks
                )
                .unwrap();
            }
        }

        if let Some(reason) = &self.aborted {
            writeln!(output, "⛔ {}", reason).unwrap();
        }

        let changed = if self.dry_run {
            format!("{} would be fixed", self.count(FileStatus::WouldFix))
        } else {
            format!("{} fixed", self.count(FileStatus::Fixed))
        };
        writeln!(
            output,
            "\n{}, {} unchanged, {} not found, {} failed",
            changed,
            self.count(FileStatus::Unchanged),
            self.count(FileStatus::NotFound),
            self.count(FileStatus::Failed)
        )
        .unwrap();

        output
    }
}

impl OutputFormatter for RestoreReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.has_failures(),
            "operation": "restore",
            "directory": self.directory,
            "dry_run": self.dry_run,
            "summary": {
                "restored": self.count(RestoreStatus::Restored),
                "would_restore": self.count(RestoreStatus::WouldRestore),
                "no_backup": self.count(RestoreStatus::NoBackup),
                "failed": self.count(RestoreStatus::Failed),
            },
            "files": self.outcomes,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        for outcome in &self.outcomes {
            match outcome.status {
                RestoreStatus::Restored => {
                    writeln!(output, "✅ Restored {}", outcome.file).unwrap();
                },
                RestoreStatus::WouldRestore => {
                    writeln!(output, "🔍 Would restore {}", outcome.file).unwrap();
                },
                RestoreStatus::NoBackup => {
                    writeln!(output, "ℹ️ No backup for {}", outcome.file).unwrap();
                },
                RestoreStatus::Failed => writeln!(
                    output,
                    "⚠️ Failed {}: {}",
                    outcome.file,
                    outcome.error.as_deref().unwrap_or("unknown error")
                )
                .unwrap(),
            }
        }

        let restored = if self.dry_run {
            format!("{} would be restored", self.count(RestoreStatus::WouldRestore))
        } else {
            format!("{} restored", self.count(RestoreStatus::Restored))
        };
        writeln!(
            output,
            "{}, {} without backup, {} failed",
            restored,
            self.count(RestoreStatus::NoBackup),
            self.count(RestoreStatus::Failed)
        )
        .unwrap();

        output
    }
}

impl OutputFormatter for RulesReport {
    fn format_json(&self) -> String {
        let rules: Vec<_> = self
            .rules
            .iter()
            .map(|rule| {
                json!({
                    "name": rule.name,
                    "description": rule.description,
                    "gated": rule.is_gated(),
                    "first_match_only": rule.scope() == crate::rules::RuleScope::First,
                    "replacement": rule.replacement_text(),
                })
            })
            .collect();
        serde_json::to_string(&json!({ "rules": rules })).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for (index, rule) in self.rules.iter().enumerate() {
            writeln!(output, "{}. {} - {}", index + 1, rule.name, rule.description).unwrap();
            for line in rule.replacement_text().lines() {
                writeln!(output, "     {}", line).unwrap();
            }
        }
        output
    }
}
