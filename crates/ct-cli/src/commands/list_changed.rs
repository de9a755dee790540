//! List changed charts

use ct_core::Configuration;
use ct_testing::Testing;

use crate::error::Result;

pub fn run(config: Configuration) -> Result<()> {
    let testing = Testing::builder(config).build();
    for chart in testing.compute_changed_chart_directories()? {
        println!("{}", chart);
    }
    Ok(())
}
