//! Chart descriptions and the plotters drawing code shared by all renderers.

use bikedash_common::{format_date, format_hour, DashError, Result};
use bikedash_config::{ChartsConfig, ImageFormat};
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};

const CAPTION_FONT_SIZE: u32 = 28;
const LABEL_FONT_SIZE: u32 = 16;
const BAR_HALF_WIDTH: f64 = 0.35;
const MARKER_RADIUS: u32 = 4;

/// Data of one chart, independent of the drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Caption drawn above the plot.
    pub title: String,
    /// X axis description.
    pub x_desc: String,
    /// Y axis description.
    pub y_desc: String,
    /// Plotted values.
    pub series: ChartSeries,
}

/// Plotted values of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSeries {
    /// One labelled bar per category, in display order.
    Bars(Vec<(String, u64)>),
    /// A line over the hours of the day with a marker per point.
    Hours(Vec<(u8, u64)>),
    /// A line over calendar dates.
    Dates(Vec<(NaiveDate, u64)>),
}

impl ChartSeries {
    /// Number of plotted points or bars.
    pub fn len(&self) -> usize {
        match self {
            Self::Bars(bars) => bars.len(),
            Self::Hours(points) => points.len(),
            Self::Dates(points) => points.len(),
        }
    }

    /// Whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest plotted value, 0 when empty.
    pub fn max_value(&self) -> u64 {
        let values: Box<dyn Iterator<Item = u64> + '_> = match self {
            Self::Bars(bars) => Box::new(bars.iter().map(|(_, v)| *v)),
            Self::Hours(points) => Box::new(points.iter().map(|(_, v)| *v)),
            Self::Dates(points) => Box::new(points.iter().map(|(_, v)| *v)),
        };
        values.max().unwrap_or(0)
    }
}

/// Resolved drawing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Draw grid lines.
    pub enable_grid: bool,
    /// Background fill.
    pub background: RGBColor,
    /// Caption and label color.
    pub text: RGBColor,
    /// Line chart color.
    pub line: RGBColor,
    /// Bar colors, cycled.
    pub palette: Vec<RGBColor>,
    /// Output image format.
    pub format: ImageFormat,
}

impl ChartStyle {
    /// Builds the style from the chart configuration.
    pub fn from_config(charts: &ChartsConfig, format: ImageFormat) -> Self {
        let styling = &charts.styling;
        let mut palette: Vec<RGBColor> = styling.colors.palette.iter().map(|c| parse_color(c)).collect();
        if palette.is_empty() {
            palette.push(parse_color(&styling.colors.line));
        }

        Self {
            width: styling.width,
            height: styling.height,
            enable_grid: styling.enable_grid,
            background: parse_color(&styling.colors.background),
            text: parse_color(&styling.colors.text),
            line: parse_color(&styling.colors.line),
            palette,
            format,
        }
    }

    /// Palette entry for the bar at `index`.
    pub fn bar_color(&self, index: usize) -> RGBColor {
        self.palette
            .get(index % self.palette.len().max(1))
            .copied()
            .unwrap_or(self.line)
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&ChartsConfig::default(), ImageFormat::default())
    }
}

/// Parses a `#RRGGBB` string; anything else becomes black.
pub fn parse_color(color_str: &str) -> RGBColor {
    color_str
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.is_ascii())
        .and_then(|hex| {
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
            Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
        })
        .unwrap_or(BLACK)
}

/// Paints `spec` into an image file at `path` using the format in `style`.
///
/// # Errors
///
/// Returns `DashError::Graph` when the backend fails and `DashError::Io`
/// when the parent directory cannot be created.
pub fn draw_chart(spec: &ChartSpec, style: &ChartStyle, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let size = (style.width, style.height);
    match style.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_on(&root, spec, style)?;
            root.present()?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_on(&root, spec, style)?;
            root.present()?;
        }
    }

    info!(title = %spec.title, path = %path.display(), "Rendered chart");
    Ok(())
}

/// Paints `spec` onto any plotters drawing area.
///
/// # Errors
///
/// Returns `DashError::Graph` when the backend fails.
pub fn draw_on<DB>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec, style: &ChartStyle) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&style.background)?;
    debug!(title = %spec.title, points = spec.series.len(), "Drawing chart");

    match &spec.series {
        ChartSeries::Bars(bars) => draw_bars(root, spec, style, bars),
        ChartSeries::Hours(points) => {
            let points: Vec<(f64, u64)> = points.iter().map(|&(h, v)| (f64::from(h), v)).collect();
            draw_line(root, spec, style, &points, (0.0, 23.0), true, &hour_tick)
        }
        ChartSeries::Dates(points) => {
            let Some(origin) = points.iter().map(|(d, _)| *d).min() else {
                return draw_line(root, spec, style, &[], (-0.5, 0.5), false, &|_| String::new());
            };
            let offsets: Vec<(f64, u64)> = points
                .iter()
                .map(|&(d, v)| ((d - origin).num_days() as f64, v))
                .collect();
            let last = offsets.iter().map(|(x, _)| *x).fold(0.0, f64::max);
            let range = if last > 0.0 { (0.0, last) } else { (-0.5, 0.5) };
            draw_line(root, spec, style, &offsets, range, points.len() < 60, &|x| {
                date_tick(origin, x)
            })
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hour_tick(x: &f64) -> String {
    format_hour(x.round().clamp(0.0, 23.0) as u8)
}

#[allow(clippy::cast_possible_truncation)]
fn date_tick(origin: NaiveDate, x: &f64) -> String {
    format_date(origin + Duration::days(x.round() as i64))
}

fn y_upper_bound(max: u64) -> f64 {
    if max == 0 {
        1.0
    } else {
        max as f64 * 1.1
    }
}

fn draw_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    style: &ChartStyle,
    bars: &[(String, u64)],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let slots = bars.len().max(1) as f64;
    let y_max = y_upper_bound(spec.series.max_value());

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", CAPTION_FONT_SIZE).into_font().color(&style.text))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..slots - 0.5, 0f64..y_max)?;

    let label_for = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > f64::EPSILON || idx < 0.0 {
            return String::new();
        }
        bars.get(idx as usize).map(|(label, _)| label.clone()).unwrap_or_default()
    };

    let y_label = |y: &f64| format!("{y:.0}");

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .x_labels(bars.len().max(1))
        .x_label_formatter(&label_for)
        .y_label_formatter(&y_label)
        .label_style(("sans-serif", LABEL_FONT_SIZE).into_font().color(&style.text))
        .disable_x_mesh();
    if !style.enable_grid {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *value as f64)],
            style.bar_color(i).filled(),
        )
    }))?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_line<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    style: &ChartStyle,
    points: &[(f64, u64)],
    x_range: (f64, f64),
    markers: bool,
    x_label: &dyn Fn(&f64) -> String,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_max = y_upper_bound(spec.series.max_value());

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", CAPTION_FONT_SIZE).into_font().color(&style.text))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.0..x_range.1, 0f64..y_max)?;

    let y_label = |y: &f64| format!("{y:.0}");

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .x_labels(12)
        .x_label_formatter(x_label)
        .y_label_formatter(&y_label)
        .label_style(("sans-serif", LABEL_FONT_SIZE).into_font().color(&style.text));
    if !style.enable_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let line_style = style.line.stroke_width(2);
    chart.draw_series(LineSeries::new(
        points.iter().map(|&(x, v)| (x, v as f64)),
        line_style,
    ))?;

    if markers {
        chart.draw_series(
            points
                .iter()
                .map(|&(x, v)| Circle::new((x, v as f64), MARKER_RADIUS, style.line.filled())),
        )?;
    }

    Ok(())
}

/// Wraps a renderer failure with the chart name.
pub fn chart_error(name: &str, err: DashError) -> DashError {
    DashError::graph_with_source(format!("failed to render chart '{name}'"), err)
}
