//! Chart Plotter Module
//! Draws single chart panels (bars, histograms, boxes, lines, scatter,
//! heatmap) onto plotters drawing areas.
//!
//! Categorical axes use f64 coordinates with one unit per category; tick
//! labels are mapped back to category names by the label formatters.

use crate::charts::palette::{luminance, Colormap, MISSING};
use crate::charts::RenderError;
use crate::stats::{BoxSummary, CorrelationMatrix, Histogram};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

/// One quadrant of a grid image.
pub type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";
const BAR_WIDTH: f64 = 0.8;
const BOX_HALF_WIDTH: f64 = 0.3;
const EDGE: RGBColor = RGBColor(60, 60, 60);

/// One line of a line chart.
#[derive(Debug, Clone)]
pub struct LineData {
    pub name: String,
    pub values: Vec<f64>,
    pub color: RGBColor,
}

/// Rows of grouped bars: one group per entry of `groups`, one bar per series.
#[derive(Debug, Clone)]
pub struct GroupedBars<'a> {
    pub groups: &'a [String],
    pub series: &'a [String],
    /// `counts[group][series]`
    pub counts: &'a [Vec<usize>],
    pub colors: &'a [RGBColor],
}

/// Draws individual chart panels.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Vertical bars, one per category.
    pub fn draw_bar_chart(
        area: &Panel,
        title: &str,
        labels: &[String],
        values: &[f64],
        colors: &[RGBColor],
        axis_desc: (&str, &str),
    ) -> Result<(), RenderError> {
        let y_max = upper_bound(values.iter().copied().fold(0.0, f64::max));

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(category_range(labels.len()), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| category_label(labels, *x))
            .x_desc(axis_desc.0)
            .y_desc(axis_desc.1)
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, v)],
                colors[i % colors.len()].filled(),
            )
        }))?;

        Ok(())
    }

    /// Horizontal bars listed top to bottom in the given order.
    pub fn draw_horizontal_bar_chart(
        area: &Panel,
        title: &str,
        labels: &[String],
        values: &[f64],
        colors: &[RGBColor],
        x_desc: &str,
    ) -> Result<(), RenderError> {
        let n = labels.len();
        let x_max = upper_bound(values.iter().copied().fold(0.0, f64::max));
        let row_y = |i: usize| (n - 1 - i) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..x_max, category_range(n))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|y| reversed_category_label(labels, *y))
            .x_desc(x_desc)
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
            let y = row_y(i);
            Rectangle::new(
                [(0.0, y - BAR_WIDTH / 2.0), (v, y + BAR_WIDTH / 2.0)],
                colors[i % colors.len()].filled(),
            )
        }))?;

        Ok(())
    }

    /// Histogram bars with an optional density curve on the same count scale.
    pub fn draw_histogram(
        area: &Panel,
        title: &str,
        hist: &Histogram,
        curve: &[(f64, f64)],
        color: RGBColor,
        x_desc: &str,
    ) -> Result<(), RenderError> {
        let (Some(&lo), Some(&hi)) = (hist.edges.first(), hist.edges.last()) else {
            return Self::draw_empty_panel(area, title, "No data");
        };
        let curve_max = curve.iter().map(|(_, y)| *y).fold(0.0, f64::max);
        let y_max = upper_bound((hist.max_count() as f64).max(curve_max));

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(lo..hi, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc("Count")
            .draw()?;

        let bars = || {
            hist.counts
                .iter()
                .zip(hist.edges.windows(2))
                .map(|(&count, edge)| [(edge[0], 0.0), (edge[1], count as f64)])
        };
        chart.draw_series(bars().map(|corners| Rectangle::new(corners, color.mix(0.5).filled())))?;
        chart.draw_series(bars().map(|corners| Rectangle::new(corners, EDGE.stroke_width(1))))?;

        if !curve.is_empty() {
            chart.draw_series(LineSeries::new(curve.iter().copied(), color.stroke_width(2)))?;
        }

        Ok(())
    }

    /// Box-and-whisker plots, one per category, with outliers as rings.
    pub fn draw_box_chart(
        area: &Panel,
        title: &str,
        labels: &[String],
        boxes: &[BoxSummary],
        colors: &[RGBColor],
        axis_desc: (&str, &str),
    ) -> Result<(), RenderError> {
        let lows = boxes
            .iter()
            .flat_map(|b| std::iter::once(b.whisker_low).chain(b.outliers.iter().copied()));
        let highs = boxes
            .iter()
            .flat_map(|b| std::iter::once(b.whisker_high).chain(b.outliers.iter().copied()));
        let y_range = padded_range(
            lows.fold(f64::INFINITY, f64::min),
            highs.fold(f64::NEG_INFINITY, f64::max),
        );

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(category_range(labels.len()), y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| category_label(labels, *x))
            .x_desc(axis_desc.0)
            .y_desc(axis_desc.1)
            .draw()?;

        for (i, b) in boxes.iter().enumerate() {
            let x = i as f64;
            let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
            let cap = BOX_HALF_WIDTH / 2.0;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(left, b.q1), (right, b.q3)],
                colors[i % colors.len()].filled(),
            )))?;

            let strokes = vec![
                vec![(left, b.q1), (right, b.q1), (right, b.q3), (left, b.q3), (left, b.q1)],
                vec![(x, b.q1), (x, b.whisker_low)],
                vec![(x, b.q3), (x, b.whisker_high)],
                vec![(x - cap, b.whisker_low), (x + cap, b.whisker_low)],
                vec![(x - cap, b.whisker_high), (x + cap, b.whisker_high)],
            ];
            chart.draw_series(
                strokes
                    .into_iter()
                    .map(|points| PathElement::new(points, EDGE.stroke_width(1))),
            )?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(left, b.median), (right, b.median)],
                EDGE.stroke_width(2),
            )))?;
            chart.draw_series(
                b.outliers
                    .iter()
                    .map(|&v| Circle::new((x, v), 3, EDGE.stroke_width(1))),
            )?;
        }

        Ok(())
    }

    /// Lines with point markers over categorical x positions.
    pub fn draw_line_chart(
        area: &Panel,
        title: &str,
        x_labels: &[String],
        lines: &[LineData],
        y_desc: &str,
        show_legend: bool,
    ) -> Result<(), RenderError> {
        let values = lines.iter().flat_map(|l| l.values.iter().copied());
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(category_range(x_labels.len()), padded_range(lo, hi))?;

        chart
            .configure_mesh()
            .x_labels(x_labels.len())
            .x_label_formatter(&|x| category_label(x_labels, *x))
            .y_desc(y_desc)
            .draw()?;

        for line in lines {
            let color = line.color;
            let points: Vec<(f64, f64)> = line
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(line.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            chart.draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))?;
        }

        if show_legend {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }

    /// Scatter of colored points with one legend entry per color group.
    pub fn draw_scatter(
        area: &Panel,
        title: &str,
        points: &[(f64, f64, RGBColor)],
        legend: &[(String, RGBColor)],
        axis_desc: (&str, &str),
    ) -> Result<(), RenderError> {
        let x_max = upper_bound(points.iter().map(|p| p.0).fold(0.0, f64::max));
        let y_max = upper_bound(points.iter().map(|p| p.1).fold(0.0, f64::max));

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(axis_desc.0)
            .y_desc(axis_desc.1)
            .draw()?;

        chart.draw_series(
            points
                .iter()
                .map(|&(x, y, color)| Circle::new((x, y), 3, color.mix(0.8).filled())),
        )?;

        for (label, color) in legend {
            let color = *color;
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                .label(label.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }
        if !legend.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }

    /// Side-by-side bars per group, one color per series.
    pub fn draw_grouped_bar_chart(
        area: &Panel,
        title: &str,
        bars: &GroupedBars,
        axis_desc: (&str, &str),
    ) -> Result<(), RenderError> {
        let max = bars.counts.iter().flatten().copied().max().unwrap_or(0);

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(category_range(bars.groups.len()), 0f64..upper_bound(max as f64))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.groups.len())
            .x_label_formatter(&|x| category_label(bars.groups, *x))
            .x_desc(axis_desc.0)
            .y_desc(axis_desc.1)
            .draw()?;

        if bars.series.is_empty() {
            return Ok(());
        }
        let width = BAR_WIDTH / bars.series.len() as f64;

        for (j, name) in bars.series.iter().enumerate() {
            let color = bars.colors[j % bars.colors.len()];
            chart
                .draw_series(bars.counts.iter().enumerate().map(|(i, row)| {
                    let x0 = i as f64 - BAR_WIDTH / 2.0 + j as f64 * width;
                    Rectangle::new([(x0, 0.0), (x0 + width, row[j] as f64)], color.filled())
                }))?
                .label(name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    /// Annotated heatmap of a correlation matrix on a [-1, 1] color scale.
    pub fn draw_heatmap(
        area: &Panel,
        title: &str,
        matrix: &CorrelationMatrix,
        cmap: Colormap,
    ) -> Result<(), RenderError> {
        let labels: Vec<String> = matrix.labels.iter().map(|s| s.to_string()).collect();
        let n = labels.len();

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(100)
            .build_cartesian_2d(category_range(n), category_range(n))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|x| category_label(&labels, *x))
            .y_label_formatter(&|y| reversed_category_label(&labels, *y))
            .draw()?;

        for row in 0..n {
            for col in 0..n {
                let value = matrix.get(row, col);
                let (x, y) = (col as f64, (n - 1 - row) as f64);
                let fill = if value.is_nan() {
                    MISSING
                } else {
                    cmap.sample((value + 1.0) / 2.0)
                };
                let ink = if luminance(fill) < 0.5 { WHITE } else { BLACK };
                let text = if value.is_nan() {
                    "nan".to_string()
                } else {
                    format!("{:.2}", value)
                };

                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    fill.filled(),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    text,
                    (x, y),
                    (FONT, 16)
                        .into_font()
                        .color(&ink)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                )))?;
            }
        }

        Ok(())
    }

    /// Panel frame with a centered note, for views without data.
    pub fn draw_empty_panel(area: &Panel, title: &str, note: &str) -> Result<(), RenderError> {
        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(10)
            .build_cartesian_2d(0f64..1f64, 0f64..1f64)?;

        chart.configure_mesh().disable_mesh().draw()?;
        chart.draw_series(std::iter::once(Text::new(
            note.to_string(),
            (0.5, 0.5),
            (FONT, 16)
                .into_font()
                .color(&EDGE)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;

        Ok(())
    }
}

/// Axis range with one unit per category, categories centered on integers.
fn category_range(n: usize) -> Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

/// Category name for an integer tick, empty between categories.
fn category_label(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

/// Like `category_label` for axes listing the first category at the top.
fn reversed_category_label(labels: &[String], y: f64) -> String {
    let i = y.round();
    if (y - i).abs() > 1e-6 || i < 0.0 || i as usize >= labels.len() {
        return String::new();
    }
    labels[labels.len() - 1 - i as usize].clone()
}

/// Upper axis bound leaving headroom above the tallest value.
fn upper_bound(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Value range with a margin; degenerate or empty ranges are widened.
fn padded_range(lo: f64, hi: f64) -> Range<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.08 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = names(&["Books", "Toys"]);
        assert_eq!(category_label(&labels, 0.0), "Books");
        assert_eq!(category_label(&labels, 1.0), "Toys");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn reversed_labels_put_first_on_top() {
        let labels = names(&["good", "bad", "ugly"]);
        assert_eq!(reversed_category_label(&labels, 2.0), "good");
        assert_eq!(reversed_category_label(&labels, 0.0), "ugly");
        assert_eq!(reversed_category_label(&labels, 3.0), "");
    }

    #[test]
    fn ranges_never_collapse() {
        assert_eq!(padded_range(2.0, 2.0), 1.5..2.5);
        assert_eq!(padded_range(f64::INFINITY, f64::NEG_INFINITY), 0.0..1.0);
        assert_eq!(upper_bound(0.0), 1.0);
        assert_eq!(category_range(0), -0.5..0.5);
    }
}
