use anyhow::Result;
use runfix_core::{rule_table, RulesReport};

use crate::cli::{print_report, OutputArgs};

pub fn handle_rules(output: &OutputArgs) -> Result<()> {
    let report = RulesReport {
        rules: rule_table(),
    };
    print_report(&report, output);
    Ok(())
}
