#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod batch;
pub mod config;
pub mod diff;
pub mod error;
pub mod operations;
pub mod output;
pub mod pipeline;
pub mod restore;
pub mod rules;
pub mod targets;

pub use batch::{run, FileOutcome, FileStatus, RunOptions};
pub use config::Config;
pub use error::RunfixError;
pub use operations::{fix_operation, restore_operation, FixRequest, RestoreRequest};
pub use output::{BatchReport, OutputFormat, OutputFormatter, RestoreReport, RulesReport};
pub use pipeline::{count_inline_blocks, fix_individual_file, rewrite, Rewrite};
pub use restore::{restore, RestoreOutcome, RestoreStatus};
pub use rules::{inject_login, rule_table, Rule, RuleKind, RuleScope, LOGIN_FLOW_LINE};
pub use targets::{resolve_targets, Targets, TargetSet};

/// Suffix appended to a file's path to form its backup sibling.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Path of the backup sibling for `path` (`<path>.backup`).
pub fn backup_path(path: &std::path::Path) -> std::path::PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(BACKUP_SUFFIX);
    std::path::PathBuf::from(os)
}
