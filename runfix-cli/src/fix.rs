use anyhow::Result;
use runfix_core::{fix_operation, BatchReport, Config, FixRequest};

use crate::cli::{print_report, OutputArgs, OutputFormat};

pub fn handle_fix(
    config: &Config,
    request: &FixRequest,
    output: &OutputArgs,
    use_color: bool,
) -> Result<BatchReport> {
    let report = fix_operation(config, request)?;

    let show_diffs = request.dry_run || request.with_diff;
    if output.output == OutputFormat::Summary && !output.quiet && show_diffs {
        print!("{}", report.render_diffs(use_color));
    }
    print_report(&report, output);

    if let Some(reason) = &report.aborted {
        eprintln!("Error: {reason}");
    }

    Ok(report)
}
