//! Plotters-powered bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Stacked bars and the liquidity waterfall share this widget: both are lists
//! of floating `[from, to]` segments per bar.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{BarChart, SeriesKind};

/// Brand gold.
pub const GOLD: (u8, u8, u8) = (171, 137, 94);
/// Brand gray.
pub const GRAY: (u8, u8, u8) = (159, 159, 159);
/// Brand off-white.
pub const WHITE_ISH: (u8, u8, u8) = (241, 241, 241);

pub fn series_rgb(kind: SeriesKind) -> (u8, u8, u8) {
    match kind {
        SeriesKind::Lumber | SeriesKind::Margin | SeriesKind::Total => GOLD,
        SeriesKind::Other => GRAY,
        SeriesKind::Grant => WHITE_ISH,
    }
}

/// A render-only chart description. All data prep happens in `crate::plot`.
pub struct BarChartWidget<'a> {
    pub chart: &'a BarChart,
    /// Formatting of y tick labels.
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for BarChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [lo, hi] = self.chart.value_bounds();
        let pad = ((hi - lo).abs() * 0.05).max(1e-9);
        let (y0, y1) = (lo.min(0.0) - if lo < 0.0 { pad } else { 0.0 }, hi + pad);
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let bars = &self.chart.bars;
        let n = bars.len().max(1);
        let x0 = -0.5;
        let x1 = n as f64 - 0.5;
        let fmt_y = self.fmt_y;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n)
                .y_labels(5)
                .x_label_formatter(&|v| bar_label(bars.iter().map(|b| b.label), *v))
                .y_label_formatter(&|v| fmt_y(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (i, bar) in bars.iter().enumerate() {
                let xc = i as f64;
                chart.draw_series(bar.segments.iter().filter(|s| s.from != s.to).map(|s| {
                    let (r, g, b) = series_rgb(s.kind);
                    Rectangle::new([(xc - 0.3, s.from), (xc + 0.3, s.to)], RGBColor(r, g, b).filled())
                }))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Label for the tick at `v`, blank between bars.
fn bar_label<'a>(mut labels: impl Iterator<Item = &'a str>, v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.nth(idx as usize).unwrap_or("").to_string()
}
