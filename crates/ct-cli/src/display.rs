//! Display formatting for CLI output

use console::style;
use ct_testing::{TestReport, TestResult};
use std::io::{self, Write};

/// Print the end-of-run summary to stdout
pub fn print_summary(report: &TestReport) -> io::Result<()> {
    let stdout = io::stdout();
    write_summary(&mut stdout.lock(), report)
}

/// Write the end-of-run summary: one line per chart, then every failed
/// step of failing charts, then a totals line
pub fn write_summary<W: Write>(out: &mut W, report: &TestReport) -> io::Result<()> {
    writeln!(out, "{}", style("Summary").bold())?;

    for result in &report.results {
        write_result(out, result)?;
    }

    let total = report.results.len();
    let failed = report.failed().count();
    writeln!(out)?;
    if failed == 0 {
        writeln!(
            out,
            "{} All {} chart(s) passed",
            style("✓").green().bold(),
            total
        )
    } else {
        writeln!(
            out,
            "{} {} of {} chart(s) failed",
            style("✗").red().bold(),
            failed,
            total
        )
    }
}

fn write_result<W: Write>(out: &mut W, result: &TestResult) -> io::Result<()> {
    if result.passed() {
        return writeln!(out, "  {} {}", style("✓").green(), result.chart);
    }

    writeln!(out, "  {} {}", style("✗").red(), style(&result.chart).bold())?;
    for failure in &result.failures {
        let message = failure.to_string();
        let mut lines = message.lines();
        let first = lines.next().unwrap_or_default();
        writeln!(out, "      {} {}", style("-").dim(), first)?;
        for line in lines {
            writeln!(out, "        {}", line)?;
        }
    }
    Ok(())
}
