use super::VERSION;
use crate::bench::{hw_threads, BenchConfig};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::num::NonZeroUsize;

fn command() -> Command {
    let arg_set_sizes = Arg::new("set_sizes")
        .help("number of strings in the pool, one run per value")
        .short('s')
        .long("set_sizes")
        .num_args(1..)
        .value_parser(value_parser!(NonZeroUsize))
        .default_values(["1", "8", "128"]);
    let arg_string_lengths = Arg::new("string_lengths")
        .help("length of the strings, one run per value")
        .short('l')
        .long("string_lengths")
        .num_args(1..)
        .value_parser(value_parser!(usize))
        .default_values(["16", "32", "64", "512", "1024"]);
    let arg_iterations = Arg::new("iterations")
        .help("strings picked by each thread")
        .short('i')
        .long("iterations")
        .num_args(1)
        .value_parser(value_parser!(u64).range(1..))
        .default_value("1048576");
    let arg_threads = Arg::new("threads")
        .help("worker threads, defaults to the available parallelism")
        .short('t')
        .long("threads")
        .num_args(1)
        .value_parser(value_parser!(NonZeroUsize));
    let arg_verbose = Arg::new("verbose")
        .help("print verbose information")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue);
    Command::new("arcbench_run")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to benchmark sharing Arc<String> against cloning String, results go to stdout")
        .arg(arg_set_sizes)
        .arg(arg_string_lengths)
        .arg(arg_iterations)
        .arg(arg_threads)
        .arg(arg_verbose)
}

fn config_from(cli_args: &ArgMatches) -> (BenchConfig, bool) {
    let defaults = BenchConfig::default();
    let config = BenchConfig {
        set_sizes: cli_args
            .get_many::<NonZeroUsize>("set_sizes")
            .map(|v| v.map(|n| n.get()).collect())
            .unwrap_or(defaults.set_sizes),
        string_lengths: cli_args
            .get_many::<usize>("string_lengths")
            .map(|v| v.copied().collect())
            .unwrap_or(defaults.string_lengths),
        iterations: cli_args
            .get_one::<u64>("iterations")
            .copied()
            .unwrap_or(defaults.iterations),
        threads: cli_args
            .get_one::<NonZeroUsize>("threads")
            .copied()
            .unwrap_or_else(hw_threads),
        scratch_slots: defaults.scratch_slots,
    };
    (config, cli_args.get_flag("verbose"))
}

/// Takes the CLI arguments that set the benchmark matrix.
pub fn parse_cli() -> (BenchConfig, bool) {
    config_from(&command().get_matches())
}
