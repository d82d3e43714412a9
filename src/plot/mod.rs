//! Chart series shared by the ASCII plot and the TUI.
//!
//! A chart is a list of bars; each bar is a list of floating segments
//! `[from, to]`. Stacked bars and the liquidity waterfall both reduce to this.

use crate::domain::{YEARS, YearResult};
use crate::report::LiquidityWalk;

pub mod ascii;

pub use ascii::*;

/// What a segment represents (drives colour / glyph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Lumber,
    Other,
    Margin,
    Grant,
    Total,
}

impl SeriesKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesKind::Lumber => "Lumber Sales",
            SeriesKind::Other => "Tipping & Materials",
            SeriesKind::Margin => "Operating Margin",
            SeriesKind::Grant => "ERA Grant Inflow",
            SeriesKind::Total => "Total Cash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SeriesKind,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Value range covered by all segments, always including zero.
    pub fn value_bounds(&self) -> [f64; 2] {
        let mut lo = 0.0_f64;
        let mut hi = 0.0_f64;
        for seg in self.bars.iter().flat_map(|b| b.segments.iter()) {
            lo = lo.min(seg.from.min(seg.to));
            hi = hi.max(seg.from.max(seg.to));
        }
        if !lo.is_finite() || !hi.is_finite() || hi <= lo {
            return [0.0, 1.0];
        }
        [lo, hi]
    }

    /// Series present in the chart, in first-seen order.
    pub fn legend(&self) -> Vec<SeriesKind> {
        let mut out: Vec<SeriesKind> = Vec::new();
        for seg in self.bars.iter().flat_map(|b| b.segments.iter()) {
            if !out.contains(&seg.kind) {
                out.push(seg.kind);
            }
        }
        out
    }
}

/// Stack values on top of each other; negative values grow downward from zero.
fn stack(label: &'static str, values: &[(SeriesKind, f64)]) -> Bar {
    let mut up = 0.0;
    let mut down = 0.0;
    let mut segments = Vec::with_capacity(values.len());
    for &(kind, v) in values {
        let cursor = if v >= 0.0 { &mut up } else { &mut down };
        let from = *cursor;
        *cursor += v;
        segments.push(Segment { kind, from, to: *cursor });
    }
    Bar { label, segments }
}

/// Revenue source breakdown: lumber vs tipping & materials.
pub fn revenue_chart(results: &[YearResult; YEARS]) -> BarChart {
    BarChart {
        title: "Revenue Source Breakdown",
        bars: results
            .iter()
            .map(|r| {
                stack(
                    r.label(),
                    &[(SeriesKind::Lumber, r.lumber_revenue), (SeriesKind::Other, r.other_revenue())],
                )
            })
            .collect(),
    }
}

/// Cash available for debt: operating margin plus grant inflow.
pub fn cash_chart(results: &[YearResult; YEARS]) -> BarChart {
    BarChart {
        title: "Total Cash Inflow (Available for Debt)",
        bars: results
            .iter()
            .map(|r| stack(r.label(), &[(SeriesKind::Margin, r.margin), (SeriesKind::Grant, r.era_grant)]))
            .collect(),
    }
}

/// Waterfall: margin, then the grant floating on top of it, then the total.
pub fn liquidity_walk_chart(walk: &LiquidityWalk) -> BarChart {
    BarChart {
        title: "Liquidity Walk",
        bars: vec![
            Bar {
                label: "Op Margin",
                segments: vec![Segment { kind: SeriesKind::Margin, from: 0.0, to: walk.margin }],
            },
            Bar {
                label: "ERA Grant",
                segments: vec![Segment {
                    kind: SeriesKind::Grant,
                    from: walk.margin,
                    to: walk.margin + walk.era_grant,
                }],
            },
            Bar {
                label: "Total Cash",
                segments: vec![Segment { kind: SeriesKind::Total, from: 0.0, to: walk.total_cash }],
            },
        ],
    }
}
