use anyhow::Result;
use runfix_core::{restore_operation, Config, RestoreReport, RestoreRequest};

use crate::cli::{print_report, OutputArgs};

pub fn handle_restore(
    config: &Config,
    request: &RestoreRequest,
    output: &OutputArgs,
) -> Result<RestoreReport> {
    let report = restore_operation(config, request)?;
    print_report(&report, output);
    Ok(report)
}
