//! ASCII bar charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each row covers an equal slice of the value range; a cell is filled when
//! the slice's midpoint falls inside a segment, so zero-height segments
//! (a year with no grant) draw nothing.

use crate::report::fmt_currency;

use super::{BarChart, SeriesKind};

fn glyph(kind: SeriesKind) -> char {
    match kind {
        SeriesKind::Lumber | SeriesKind::Margin => '#',
        SeriesKind::Other => '=',
        SeriesKind::Grant => '+',
        SeriesKind::Total => '@',
    }
}

/// Render `chart` as a `width` x `height` character grid plus header, axis and labels.
pub fn render_bar_chart(chart: &BarChart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(4);
    let [lo, hi] = chart.value_bounds();
    let step = (hi - lo) / height as f64;

    let n = chart.bars.len().max(1);
    let slot = width / n;
    let bar_w = (slot * 2 / 3).max(1);

    let mut grid = vec![vec![' '; width]; height];
    for (i, bar) in chart.bars.iter().enumerate() {
        let x0 = i * slot + (slot - bar_w) / 2;
        for seg in &bar.segments {
            let (s_lo, s_hi) = (seg.from.min(seg.to), seg.from.max(seg.to));
            let ch = glyph(seg.kind);
            for (r, row) in grid.iter_mut().enumerate() {
                let mid = hi - (r as f64 + 0.5) * step;
                if mid >= s_lo && mid < s_hi {
                    for cell in row.iter_mut().skip(x0).take(bar_w) {
                        *cell = ch;
                    }
                }
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{}  [{} .. {}]\n", chart.title, fmt_currency(lo), fmt_currency(hi)));

    let legend: Vec<String> = chart
        .legend()
        .into_iter()
        .map(|k| format!("{} {}", glyph(k), k.display_name()))
        .collect();
    out.push_str(&format!("  {}\n", legend.join("  ")));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out.push_str(&"-".repeat(width));
    out.push('\n');

    let mut labels = String::new();
    for bar in &chart.bars {
        labels.push_str(&center(bar.label, slot));
    }
    out.push_str(labels.trim_end());
    out.push('\n');

    out
}

fn center(s: &str, w: usize) -> String {
    let s: String = s.chars().take(w).collect();
    let len = s.chars().count();
    let left = (w - len) / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(w - len - left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{Bar, Segment};

    #[test]
    fn plot_golden_snapshot_small() {
        let chart = BarChart {
            title: "T",
            bars: vec![
                Bar {
                    label: "A",
                    segments: vec![
                        Segment { kind: SeriesKind::Lumber, from: 0.0, to: 3.0 },
                        Segment { kind: SeriesKind::Other, from: 3.0, to: 4.0 },
                    ],
                },
                Bar {
                    label: "B",
                    segments: vec![
                        Segment { kind: SeriesKind::Lumber, from: 0.0, to: 1.0 },
                        Segment { kind: SeriesKind::Other, from: 1.0, to: 2.0 },
                    ],
                },
            ],
        };

        let txt = render_bar_chart(&chart, 10, 4);
        let expected = concat!(
            "T  [$0 .. $4]\n",
            "  # Lumber Sales  = Tipping & Materials\n",
            " ===\n",
            " ###\n",
            " ###  ===\n",
            " ###  ###\n",
            "----------\n",
            "  A    B\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn zero_height_segment_draws_nothing() {
        let chart = BarChart {
            title: "T",
            bars: vec![Bar {
                label: "Y1",
                segments: vec![
                    Segment { kind: SeriesKind::Margin, from: 0.0, to: 2.0 },
                    Segment { kind: SeriesKind::Grant, from: 2.0, to: 2.0 },
                ],
            }],
        };
        let txt = render_bar_chart(&chart, 12, 4);
        assert!(!txt.lines().skip(2).any(|l| l.contains('+')));
    }
}
