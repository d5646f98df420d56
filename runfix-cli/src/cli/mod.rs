pub mod args;
pub mod types;

use runfix_core::OutputFormatter;

pub use args::{Cli, Commands, OutputArgs};
pub use types::OutputFormat;

/// Print a report in the requested format. `--quiet` only silences summaries.
pub fn print_report(report: &impl OutputFormatter, output: &OutputArgs) {
    match output.output {
        OutputFormat::Json => println!("{}", report.format(output.output.into())),
        OutputFormat::Summary if output.quiet => {},
        OutputFormat::Summary => print!("{}", report.format(output.output.into())),
    }
}
