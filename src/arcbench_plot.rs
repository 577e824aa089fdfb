use super::VERSION;
use crate::chart::PlotSettings;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

fn command() -> Command {
    let arg_outdir = Arg::new("outdir")
        .help("directory for the png files")
        .short('o')
        .long("outdir")
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .default_value(".");
    let arg_prefix = Arg::new("prefix")
        .help("file name prefix, charts are saved as <prefix>-<num_strings>.png")
        .short('p')
        .long("prefix")
        .num_args(1)
        .default_value("arcbench");
    let arg_width = Arg::new("width")
        .help("width of the charts in pixels")
        .long("width")
        .num_args(1)
        .value_parser(value_parser!(u32).range(100..))
        .default_value("1024");
    let arg_height = Arg::new("height")
        .help("height of the charts in pixels")
        .long("height")
        .num_args(1)
        .value_parser(value_parser!(u32).range(100..))
        .default_value("768");
    let arg_sort = Arg::new("sort")
        .help("sort the points of each line by string length")
        .long("sort")
        .action(ArgAction::SetTrue);
    let arg_verbose = Arg::new("verbose")
        .help("print verbose information")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue);
    Command::new("arcbench_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the arc or clone benchmark results read from stdin")
        .arg(arg_outdir)
        .arg(arg_prefix)
        .arg(arg_width)
        .arg(arg_height)
        .arg(arg_sort)
        .arg(arg_verbose)
}

/// All the arguments have defaults, so get_one always returns Some.
fn settings_from(cli_args: &ArgMatches) -> (PlotSettings, bool) {
    let settings = PlotSettings {
        output_dir: cli_args
            .get_one::<PathBuf>("outdir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        prefix: cli_args
            .get_one::<String>("prefix")
            .cloned()
            .unwrap_or_else(|| String::from("arcbench")),
        width: cli_args.get_one::<u32>("width").copied().unwrap_or(1024),
        height: cli_args.get_one::<u32>("height").copied().unwrap_or(768),
        sort_by_length: cli_args.get_flag("sort"),
    };
    (settings, cli_args.get_flag("verbose"))
}

/// Takes the CLI arguments that control the plotting of the benchmark results.
pub fn parse_cli() -> (PlotSettings, bool) {
    settings_from(&command().get_matches())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_arguments_gives_defaults() {
        let m = command().try_get_matches_from(["arcbench_plot"]).unwrap();
        let (settings, verbose) = settings_from(&m);
        assert_eq!(settings, PlotSettings::default());
        assert!(!verbose);
    }

    #[test]
    fn all_arguments() {
        let m = command()
            .try_get_matches_from([
                "arcbench_plot", "-o", "charts", "-p", "run", "--width", "800", "--height",
                "600", "--sort", "-v",
            ])
            .unwrap();
        let (settings, verbose) = settings_from(&m);
        assert_eq!(settings.output_dir, PathBuf::from("charts"));
        assert_eq!(settings.prefix, "run");
        assert_eq!((settings.width, settings.height), (800, 600));
        assert!(settings.sort_by_length);
        assert!(verbose);
    }

    #[test]
    fn tiny_charts_are_rejected() {
        assert!(command()
            .try_get_matches_from(["arcbench_plot", "--width", "10"])
            .is_err());
    }
}
