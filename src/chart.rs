use crate::error::ArcbenchError;
use crate::record::Variant;
use crate::utils::{format_ops, x_range, y_range};
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::path::PathBuf;

/// DejaVu Sans, see assets/DejaVuSans-LICENSE.
const CHART_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static FONT_REGISTERED: OnceCell<bool> = OnceCell::new();

/// matplotlib's first two default colors, one per variant.
const SERIES_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

/// Options shared by all the charts of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub width: u32,
    pub height: u32,
    /// Sort every series by string length before drawing.
    pub sort_by_length: bool,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            output_dir: PathBuf::from("."),
            prefix: String::from("arcbench"),
            width: 1024,
            height: 768,
            sort_by_length: false,
        }
    }
}

impl PlotSettings {
    /// One file per set size, `<prefix>-<set_size>.png`.
    pub fn chart_path(&self, set_size: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.png", self.prefix, set_size))
    }
}

/// One line of a chart: string length against ops per second.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub variant: Variant,
    pub label: String,
    /// (string length, ops per second)
    pub points: Vec<(i64, f64)>,
}

/// Everything needed to draw the chart of one set size.
/// Each chart owns its drawing area, nothing is shared between charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub set_size: usize,
    pub path: PathBuf,
    pub title: String,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub x_ticks: Vec<i64>,
    pub series: Vec<SeriesSpec>,
}

/// Register the bundled font as "sans-serif", once per process.
pub fn register_chart_font() -> Result<(), ArcbenchError> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, CHART_FONT).is_ok());
    if registered {
        Ok(())
    } else {
        Err(ArcbenchError::Font)
    }
}

impl ChartSpec {
    /// Draw the chart to its png file, overwriting it if present.
    pub fn draw(&self, width: u32, height: u32) -> Result<(), ArcbenchError> {
        register_chart_font()?;
        self.draw_bitmap(width, height)
            .map_err(|e| ArcbenchError::Plot {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    fn draw_bitmap(&self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        let xs: Vec<i64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .collect();
        let ys: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .collect();
        let xr = x_range(&self.x_ticks, &xs);
        let yr = y_range(&ys);

        let root = BitMapBackend::new(&self.path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 30))
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(xr.with_key_points(self.x_ticks.clone()), yr)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(100, 100, 100).mix(0.3).stroke_width(1))
            .label_style(("sans-serif", 18))
            .x_desc(self.x_desc)
            .y_desc(self.y_desc)
            .x_label_formatter(&|x: &i64| x.to_string())
            .y_label_formatter(&|y: &f64| format_ops(*y))
            .draw()?;

        for (series, color) in self.series.iter().zip(SERIES_COLORS.iter().cycle()) {
            let color = *color;
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                series
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, 3, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 18))
            .draw()?;
        root.present()?;
        Ok(())
    }
}
