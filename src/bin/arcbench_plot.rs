use arcbench::arcbench_plot::parse_cli;
use arcbench::error::ArcbenchError;
use arcbench::logging::{default_filter, get_subscriber, init_subscriber};
use arcbench::BenchRecords;
use std::io;
use tracing::info;

fn main() -> Result<(), ArcbenchError> {
    let (settings, verbose) = parse_cli();
    init_subscriber(get_subscriber(default_filter(verbose)))?;
    info!(
        "read results from stdin and plot to {}",
        settings.output_dir.display()
    );
    let br = BenchRecords::from_reader(io::stdin().lock())?;
    let written = br.plot(&settings)?;
    info!("wrote {} charts", written.len());
    Ok(())
}
