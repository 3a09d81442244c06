// SVG rendering of a chart spec
use crate::domain::chart::{ChartSpec, Series};
use crate::domain::metrics::MetricId;
use chrono::{DateTime, NaiveDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 480;
const FONT: &str = "sans-serif";
const X_LABELS: usize = 6;
const Y_LABELS: usize = 5;
const MINUTE_MS: i64 = 60_000;

fn color(metric: MetricId) -> RGBColor {
    match metric {
        MetricId::PageLoadTime => RGBColor(99, 110, 250),
        MetricId::RequestsPerSecond => RGBColor(239, 85, 59),
        MetricId::ServerResponseTime => RGBColor(0, 204, 150),
        MetricId::ActiveUsers => RGBColor(171, 99, 250),
        MetricId::ErrorRate => RGBColor(255, 161, 90),
    }
}

fn millis(t: NaiveDateTime) -> i64 {
    t.and_utc().timestamp_millis()
}

fn format_tick(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// X range in epoch milliseconds; a single instant is padded by a minute each side
fn time_range(series: &[Series]) -> Range<i64> {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| millis(p.x)))
        .fold((i64::MAX, i64::MIN), |(lo, hi), t| (lo.min(t), hi.max(t)));

    if lo > hi {
        0..1
    } else if lo == hi {
        lo - MINUTE_MS..hi + MINUTE_MS
    } else {
        lo..hi
    }
}

type Root<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn draw_chart(root: &Root<'_>, spec: &ChartSpec) -> anyhow::Result<()> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, (FONT, 22))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(time_range(&spec.series), 0.0..1.0)?;

    let x_labels = if spec.series.is_empty() { 0 } else { X_LABELS };
    chart
        .configure_mesh()
        .x_desc(spec.x_axis_label)
        .y_desc(spec.y_axis_label)
        .x_labels(x_labels)
        .y_labels(Y_LABELS)
        .x_label_formatter(&|ms: &i64| format_tick(*ms))
        .y_label_formatter(&|y: &f64| format!("{:.2}", y))
        .draw()?;

    for series in &spec.series {
        let line_color = color(series.metric);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().map(|p| (millis(p.x), p.y)),
                line_color.stroke_width(2),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(3))
            });
    }

    if spec.show_legend && !spec.series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

/// Render a chart spec as a standalone SVG document
pub fn render_chart(spec: &ChartSpec) -> anyhow::Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw_chart(&root, spec)?;
        root.present()?;
    }
    Ok(svg)
}

/// Render a placeholder chart carrying a message instead of data
pub fn render_message(heading: &str, message: &str) -> anyhow::Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(heading, (FONT, 22))?;
        let (width, height) = body.dim_in_pixel();
        let style = (FONT, 16)
            .into_font()
            .color(&RED)
            .pos(Pos::new(HPos::Center, VPos::Center));
        body.draw(&Text::new(
            message.to_string(),
            ((width / 2) as i32, (height / 2) as i32),
            style,
        ))?;
        root.present()?;
    }
    Ok(svg)
}
