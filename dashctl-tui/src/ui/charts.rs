//! Chart rendering: a pure function of `(kind, content)` to ratatui
//! widgets, stateless between frames. Donut slices are angle fractions
//! of the total, bar groups share one max-value scale, line charts span
//! the min/max of all series, progress segments are fractions of the
//! summed values.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph, Wrap,
    },
    Frame,
};

use dashctl_core::{
    BarContent, LineContent, LineSeries, SeriesContent, SliceDatum, Widget, WidgetContent,
};

/// Resolve a content color string to a terminal color.
///
/// Accepts the named terminal palette (case-insensitive) and `#rrggbb`
/// hex; anything unrecognized degrades to gray.
pub fn resolve_color(name: &str) -> Color {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        return Color::Gray;
    }

    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => Color::Gray,
    }
}

/// Start/end angles (radians) for each slice. The denominator is the
/// explicit total when present, else the sum of values; an explicit
/// total larger than the sum leaves a gap in the ring.
pub fn slice_angles(data: &[SliceDatum], total: Option<f64>) -> Vec<(f64, f64)> {
    let sum: f64 = data.iter().map(|d| d.value).sum();
    let denominator = total.filter(|t| *t > 0.0).unwrap_or(sum);
    if denominator <= 0.0 {
        return Vec::new();
    }

    let mut angles = Vec::with_capacity(data.len());
    let mut start = 0.0;
    for datum in data {
        let span = std::f64::consts::TAU * datum.value / denominator;
        angles.push((start, start + span));
        start += span;
    }
    angles
}

/// Cell widths for the segments of a progress bar, proportional to each
/// value's share of the sum. Widths always add up to `width` (unless the
/// sum is zero).
pub fn segment_widths(data: &[SliceDatum], width: u16) -> Vec<u16> {
    let sum: f64 = data.iter().map(|d| d.value.max(0.0)).sum();
    if sum <= 0.0 || width == 0 {
        return vec![0; data.len()];
    }

    let mut widths = vec![0u16; data.len()];
    let mut used = 0u16;
    for (i, datum) in data.iter().enumerate() {
        let cells = if i + 1 == data.len() {
            width - used
        } else {
            ((datum.value.max(0.0) / sum) * f64::from(width)).round() as u16
        };
        let cells = cells.min(width - used);
        widths[i] = cells;
        used += cells;
    }
    widths
}

/// Min/max across every series value, padded so a flat series still has
/// a visible band
pub fn value_bounds(datasets: &[LineSeries]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in datasets {
        for &value in &series.data {
            min = min.min(value);
            max = max.max(value);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    (min, max)
}

/// Render a widget's content into the given area
pub fn render_content(f: &mut Frame, area: Rect, widget: &Widget) {
    match &widget.content {
        WidgetContent::Text(text) => render_text(f, area, text),
        WidgetContent::Donut(series) => render_donut(f, area, series),
        WidgetContent::Bar(bar) => render_bar(f, area, bar),
        WidgetContent::Line(line) => render_line(f, area, line),
        WidgetContent::Progress(series) => render_progress(f, area, series),
    }
}

fn render_text(f: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_string()).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_donut(f: &mut Frame, area: Rect, series: &SeriesContent) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let angles = slice_angles(&series.data, series.total);
    let total = series
        .total
        .unwrap_or_else(|| series.data.iter().map(|d| d.value).sum());
    let total_label = format_value(total);

    let slices: Vec<(f64, f64, Color)> = series
        .data
        .iter()
        .zip(&angles)
        .map(|(datum, &(start, end))| (start, end, resolve_color(&datum.color)))
        .collect();

    let canvas = Canvas::default()
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.4, 1.4])
        .marker(symbols::Marker::Braille)
        .paint(move |ctx| {
            for &(start, end, color) in &slices {
                // Fill each slice with short radial strokes along its arc
                let steps = (((end - start) * 48.0).ceil() as usize).max(2);
                for step in 0..=steps {
                    let angle = start + (end - start) * (step as f64 / steps as f64);
                    let (sin, cos) = angle.sin_cos();
                    ctx.draw(&CanvasLine {
                        x1: 0.62 * cos,
                        y1: 0.62 * sin,
                        x2: cos,
                        y2: sin,
                        color,
                    });
                }
            }
            ctx.print(
                0.0,
                0.0,
                Line::from(Span::styled(
                    total_label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            );
        });
    f.render_widget(canvas, chunks[0]);

    let legend: Vec<Span> = series
        .data
        .iter()
        .flat_map(|datum| {
            vec![
                Span::styled("■ ", Style::default().fg(resolve_color(&datum.color))),
                Span::raw(format!("{} ({}) ", datum.label, format_value(datum.value))),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(legend)), chunks[1]);
}

fn render_bar(f: &mut Frame, area: Rect, content: &BarContent) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let legend: Vec<Span> = content
        .legend
        .iter()
        .flat_map(|entry| {
            vec![
                Span::styled("■ ", Style::default().fg(resolve_color(&entry.color))),
                Span::raw(format!("{} ", entry.label)),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(legend)), chunks[0]);

    let mut chart = BarChart::default()
        .bar_width(4)
        .bar_gap(1)
        .group_gap(3);

    for datum in &content.data {
        let group = BarGroup::default()
            .label(Line::from(datum.label.clone()))
            .bars(&[
                Bar::default()
                    .value(datum.value1.max(0.0).round() as u64)
                    .style(Style::default().fg(resolve_color(&datum.color1))),
                Bar::default()
                    .value(datum.value2.max(0.0).round() as u64)
                    .style(Style::default().fg(resolve_color(&datum.color2))),
            ]);
        chart = chart.data(group);
    }

    f.render_widget(chart, chunks[1]);
}

fn render_line(f: &mut Frame, area: Rect, content: &LineContent) {
    let (min, max) = value_bounds(&content.datasets);
    let x_max = content.labels.len().saturating_sub(1).max(1) as f64;

    let points: Vec<Vec<(f64, f64)>> = content
        .datasets
        .iter()
        .map(|series| {
            series
                .data
                .iter()
                .enumerate()
                .map(|(i, &value)| (i as f64, value))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = content
        .datasets
        .iter()
        .zip(&points)
        .map(|(series, data)| {
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(resolve_color(&series.color)))
                .data(data)
        })
        .collect();

    let x_labels: Vec<Span> = content
        .labels
        .iter()
        .map(|label| Span::raw(label.clone()))
        .collect();

    // Five gridline labels from min to max
    let y_labels: Vec<Span> = (0..=4)
        .map(|i| {
            let value = min + (max - min) * (f64::from(i) / 4.0);
            Span::raw(format_value(value))
        })
        .collect();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([min, max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_progress(f: &mut Frame, area: Rect, series: &SeriesContent) {
    let sum: f64 = series.data.iter().map(|d| d.value).sum();
    let bar_width = area.width.saturating_sub(2);
    let widths = segment_widths(&series.data, bar_width);

    let mut lines = Vec::with_capacity(series.data.len() + 2);

    lines.push(Line::from(vec![
        Span::styled("Progress", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format_value(sum), Style::default().fg(Color::DarkGray)),
    ]));

    let mut bar = Vec::with_capacity(series.data.len());
    for (datum, &cells) in series.data.iter().zip(&widths) {
        bar.push(Span::styled(
            "█".repeat(cells as usize),
            Style::default().fg(resolve_color(&datum.color)),
        ));
    }
    lines.push(Line::from(bar));

    for datum in &series.data {
        let percent = if sum > 0.0 {
            (datum.value / sum * 100.0).round()
        } else {
            0.0
        };
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(resolve_color(&datum.color))),
            Span::raw(format!("{}: {}%", datum.label, percent)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Trim trailing `.0` off whole numbers for display
fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}
