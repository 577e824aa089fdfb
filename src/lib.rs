use crate::chart::{ChartSpec, PlotSettings, SeriesSpec};
use crate::error::ArcbenchError;
use crate::record::{parse_record, Record, Variant};
use std::collections::BTreeSet;
use std::io::{BufRead, ErrorKind};
use std::path::PathBuf;
use tracing::{debug, info, warn};
pub mod arcbench_plot;
pub mod arcbench_run;
pub mod bench;
pub mod chart;
pub mod error;
pub mod logging;
pub mod record;
pub mod utils;

// constants
pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
pub const HEADER_SENTINEL: &str = "arc_or_clone";
pub const HEADER: &str =
    "arc_or_clone num_strings string_len threads operations seconds ops_per_sec";
pub const X_TICKS: [i64; 5] = [1, 16, 64, 512, 1024];
pub const X_DESC: &str = "String length";
pub const Y_DESC: &str = "Ops per second";

/// The parsed benchmark results, in input order.
#[derive(Debug, Clone, Default)]
pub struct BenchRecords {
    pub records: Vec<Record>,
    /// Lines dropped because they could not be parsed.
    pub skipped: usize,
}

impl BenchRecords {
    pub fn new(capacity: usize) -> BenchRecords {
        BenchRecords {
            records: Vec::with_capacity(capacity),
            skipped: 0,
        }
    }

    /// Read the results line by line until the end of the stream.
    /// Malformed lines, including invalid utf-8, are logged and skipped;
    /// any other read error is returned.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<BenchRecords, ArcbenchError> {
        let mut bench_records = BenchRecords::new(64);
        for (i, l) in reader.lines().enumerate() {
            match l {
                Ok(line) => bench_records.push_line(i + 1, &line),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!("skipping line {}: {}", i + 1, e);
                    bench_records.skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
        bench_records.log_summary();
        Ok(bench_records)
    }

    /// Same as `from_reader`, for lines already in memory.
    pub fn from_lines<'a, I>(lines: I) -> BenchRecords
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut bench_records = BenchRecords::new(64);
        for (i, line) in lines.into_iter().enumerate() {
            bench_records.push_line(i + 1, line);
        }
        bench_records.log_summary();
        bench_records
    }

    fn push_line(&mut self, line_number: usize, line: &str) {
        match parse_record(line) {
            Ok(Some(record)) => self.records.push(record),
            Ok(None) => debug!("line {} is the header", line_number),
            Err(e) => {
                warn!("skipping line {}: {}", line_number, e);
                self.skipped += 1;
            }
        }
    }

    fn log_summary(&self) {
        info!(
            "parsed {} records, skipped {} lines",
            self.records.len(),
            self.skipped
        );
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct set sizes, ascending.
    pub fn set_sizes(&self) -> BTreeSet<usize> {
        self.records.iter().map(|r| r.set_size).collect()
    }

    /// (string length, ops per second) of one set size and variant, in input order.
    pub fn series(&self, set_size: usize, variant: Variant) -> Vec<(i64, f64)> {
        self.records
            .iter()
            .filter(|r| r.set_size == set_size && r.variant == variant)
            .map(|r| (r.item_length as i64, r.throughput))
            .collect()
    }

    /// One chart per distinct set size, each with one series per variant.
    /// A variant missing from a set size gives an empty series.
    pub fn chart_specs(&self, settings: &PlotSettings) -> Vec<ChartSpec> {
        self.set_sizes()
            .into_iter()
            .map(|n| {
                let series = Variant::ALL
                    .iter()
                    .map(|&variant| {
                        let mut points = self.series(n, variant);
                        if settings.sort_by_length {
                            points.sort_by_key(|p| p.0);
                        }
                        SeriesSpec {
                            variant,
                            label: format!("{} {} strings", variant.label(), n),
                            points,
                        }
                    })
                    .collect();
                ChartSpec {
                    set_size: n,
                    path: settings.chart_path(n),
                    title: format!("Performance with set of {} strings", n),
                    x_desc: X_DESC,
                    y_desc: Y_DESC,
                    x_ticks: X_TICKS.to_vec(),
                    series,
                }
            })
            .collect()
    }

    /// Draw all the charts, one after the other, and return the written files.
    /// Nothing is written when there are no records.
    pub fn plot(&self, settings: &PlotSettings) -> Result<Vec<PathBuf>, ArcbenchError> {
        if self.is_empty() {
            info!("no records, nothing to plot");
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(&settings.output_dir)?;
        let mut written = Vec::new();
        for spec in self.chart_specs(settings) {
            let counts: Vec<usize> = spec.series.iter().map(|s| s.points.len()).collect();
            debug!("drawing set size {} with {:?} points", spec.set_size, counts);
            spec.draw(settings.width, settings.height)?;
            info!("saved {}", spec.path.display());
            written.push(spec.path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_VARIANTS: [&str; 2] = ["A 10 16 4 1000 0.5 2000.0", "C 10 16 4 1000 0.25 4000.0"];

    #[test]
    fn two_variants_one_chart() {
        let br = BenchRecords::from_lines(TWO_VARIANTS);
        assert_eq!(br.records.len(), 2);
        assert!(br.records.iter().all(|r| r.set_size == 10));
        let specs = br.chart_specs(&PlotSettings::default());
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert!(spec.path.to_str().unwrap().contains("-10"));
        assert_eq!(spec.title, "Performance with set of 10 strings");
        assert_eq!(
            spec.series,
            vec![
                SeriesSpec {
                    variant: Variant::Arc,
                    label: String::from("Arc 10 strings"),
                    points: vec![(16, 2000.)],
                },
                SeriesSpec {
                    variant: Variant::Clone,
                    label: String::from("Clone 10 strings"),
                    points: vec![(16, 4000.)],
                },
            ]
        );
        assert_eq!(spec.x_ticks, vec![1, 16, 64, 512, 1024]);
        assert_eq!(spec.x_desc, "String length");
        assert_eq!(spec.y_desc, "Ops per second");
    }

    #[test]
    fn header_only_gives_nothing() {
        let br = BenchRecords::from_lines([HEADER]);
        assert!(br.is_empty());
        assert_eq!(br.skipped, 0);
        assert!(br.chart_specs(&PlotSettings::default()).is_empty());
    }

    #[test]
    fn malformed_line_does_not_stop_parsing() {
        let input = "A abc 16 4 1000 0.5 2000.0\nA 1 64 4 1000 0.5 2000.0\n";
        let br = BenchRecords::from_reader(input.as_bytes()).unwrap();
        assert_eq!(br.skipped, 1);
        assert_eq!(br.records.len(), 1);
        assert_eq!(br.records[0].item_length, 64);
    }

    #[test]
    fn invalid_utf8_is_skipped() {
        let mut input: Vec<u8> = b"A 1 16 4 1000 0.5 2000.0\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"C 1 16 4 1000 0.5 1000.0\n");
        let br = BenchRecords::from_reader(&input[..]).unwrap();
        assert_eq!(br.records.len(), 2);
        assert_eq!(br.skipped, 1);
    }

    #[test]
    fn one_chart_per_distinct_set_size() {
        let input = format!(
            "{}\nA 128 16 4 1 1.0 10.0\nA 1 16 4 1 1.0 10.0\nC 8 16 4 1 1.0 10.0\n\
             A 1 32 4 1 1.0 10.0\nC 128 32 4 1 1.0 10.0\n",
            HEADER
        );
        let br = BenchRecords::from_reader(input.as_bytes()).unwrap();
        assert_eq!(br.records.len(), 5);
        assert_eq!(br.set_sizes().into_iter().collect::<Vec<_>>(), vec![1, 8, 128]);
        let specs = br.chart_specs(&PlotSettings::default());
        assert_eq!(specs.len(), 3);
        let paths: BTreeSet<PathBuf> = specs.iter().map(|s| s.path.clone()).collect();
        assert_eq!(paths.len(), 3);
        for spec in specs.iter() {
            assert_eq!(spec.series.len(), 2);
            assert_eq!(spec.series[0].variant, Variant::Arc);
            assert_eq!(spec.series[1].variant, Variant::Clone);
        }
        // set size 8 has no Arc records
        assert!(specs[1].series[0].points.is_empty());
        assert_eq!(specs[1].series[1].points, vec![(16, 10.)]);
    }

    #[test]
    fn series_keep_input_order_unless_sorted() {
        let br = BenchRecords::from_lines([
            "A 1 512 4 1 1.0 3.0",
            "A 1 16 4 1 1.0 1.0",
            "A 1 64 4 1 1.0 2.0",
        ]);
        assert_eq!(
            br.series(1, Variant::Arc),
            vec![(512, 3.), (16, 1.), (64, 2.)]
        );
        let settings = PlotSettings {
            sort_by_length: true,
            ..PlotSettings::default()
        };
        let specs = br.chart_specs(&settings);
        assert_eq!(specs[0].series[0].points, vec![(16, 1.), (64, 2.), (512, 3.)]);
    }

    #[test]
    fn empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PlotSettings {
            output_dir: dir.path().join("charts"),
            ..PlotSettings::default()
        };
        let br = BenchRecords::from_reader("".as_bytes()).unwrap();
        let written = br.plot(&settings).unwrap();
        assert!(written.is_empty());
        assert!(!settings.output_dir.exists());
    }

    #[test]
    fn plot_writes_one_png_per_set_size() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PlotSettings {
            output_dir: dir.path().to_path_buf(),
            width: 480,
            height: 360,
            ..PlotSettings::default()
        };
        let mut lines = TWO_VARIANTS.to_vec();
        // set size 8 has no Arc line, its Arc series is empty
        lines.push("C 8 64 4 1000 0.5 2000.0");
        lines.push("C 8 16 4 1000 0.5 3000.0");
        let br = BenchRecords::from_lines(lines);

        let written = br.plot(&settings).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("arcbench-8.png"),
                dir.path().join("arcbench-10.png"),
            ]
        );
        for path in written.iter() {
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }

        // a second run overwrites the same files
        let rewritten = br.plot(&settings).unwrap();
        assert_eq!(rewritten, written);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("file");
        std::fs::write(&not_a_dir, "").unwrap();
        let settings = PlotSettings {
            output_dir: not_a_dir,
            ..PlotSettings::default()
        };
        let br = BenchRecords::from_lines(TWO_VARIANTS);
        assert!(br.plot(&settings).is_err());
    }
}
