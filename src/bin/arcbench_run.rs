use arcbench::arcbench_run::parse_cli;
use arcbench::bench::run_matrix;
use arcbench::error::ArcbenchError;
use arcbench::logging::{default_filter, get_subscriber, init_subscriber};
use std::io;
use tracing::info;

fn main() -> Result<(), ArcbenchError> {
    let (config, verbose) = parse_cli();
    init_subscriber(get_subscriber(default_filter(verbose)))?;
    info!(
        "{} threads, {} iterations per thread, set sizes {:?}, string lengths {:?}",
        config.threads, config.iterations, config.set_sizes, config.string_lengths
    );
    let mut out = io::stdout().lock();
    let records = run_matrix(&config, &mut out)?;
    info!("measured {} results", records.len());
    Ok(())
}
