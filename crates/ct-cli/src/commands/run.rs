//! Lint and/or install the selected charts

use console::style;
use ct_core::Configuration;
use ct_testing::{Mode, Testing};

use crate::display;
use crate::error::Result;

pub fn run(config: Configuration, mode: Mode) -> Result<()> {
    let action = match mode {
        Mode::Lint => "Linting",
        Mode::Install => "Installing",
        Mode::LintAndInstall => "Linting and installing",
    };
    println!(
        "{} {} charts (target: {})",
        style("→").blue(),
        action,
        config.target_ref()
    );

    let testing = Testing::builder(config).build();
    let report = testing.run(mode)?;

    if report.results.is_empty() {
        println!("{} No chart changes detected.", style("✓").green());
        return Ok(());
    }

    println!();
    display::print_summary(&report)?;

    report.ensure_passed()?;
    Ok(())
}
