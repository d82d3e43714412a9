//! Formatted terminal output: data table, metric cards, scenario header.
//!
//! We keep formatting code in one place so the engine stays free of
//! presentation concerns and output changes are localized.

use chrono::Local;

use crate::domain::{DashboardView, Knob, ScenarioPlan, YEARS, YearResult};
use crate::engine::ClampEvent;
use crate::report::{LiquidityWalk, Summary};

/// `$1,234,567` (rounded to whole dollars; negatives as `-$1,234`).
pub fn fmt_currency(v: f64) -> String {
    let rounded = v.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// `$17.82M`
pub fn fmt_millions(v: f64, decimals: usize) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}${:.*}M", decimals, v.abs() / 1e6)
}

/// `$610K`
pub fn fmt_thousands(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}${:.0}K", v.abs() / 1e3)
}

/// Fraction to percent, e.g. `0.831` → `83.1%`.
pub fn fmt_percent(v: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, v * 100.0)
}

/// Signed percent for variances, e.g. `-0.1` → `-10%`.
pub fn fmt_variance(v: f64) -> String {
    let pct = v * 100.0;
    if pct.fract().abs() < 1e-9 {
        format!("{pct:+.0}%")
    } else {
        format!("{pct:+.1}%")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Header naming the active scenario.
pub fn format_scenario_header(plan: &ScenarioPlan, clamped: &[ClampEvent]) -> String {
    let mut out = String::new();
    out.push_str("=== Backroads Reclamation | Scenario Model ===\n");
    out.push_str(&format!("Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M")));

    if plan.global.is_zero() && !plan.has_overrides() {
        out.push_str("Scenario: Base Case\n");
    } else {
        let globals: Vec<String> = Knob::ALL
            .iter()
            .filter(|&&k| plan.global.get(k) != 0.0)
            .map(|&k| format!("{}={}", k.key(), fmt_variance(plan.global.get(k))))
            .collect();
        if globals.is_empty() {
            out.push_str("Global: base\n");
        } else {
            out.push_str(&format!("Global: {}\n", globals.join(" ")));
        }
        for year in 0..YEARS {
            let pinned: Vec<String> = Knob::ALL
                .iter()
                .filter_map(|&k| plan.overrides[year].get(k).map(|v| format!("{}={}", k.key(), fmt_variance(v))))
                .collect();
            if !pinned.is_empty() {
                out.push_str(&format!("Year {} override: {}\n", year + 1, pinned.join(" ")));
            }
        }
    }

    for e in clamped {
        let scope = e.year.map(|y| format!("Year {y}")).unwrap_or_else(|| "global".to_string());
        out.push_str(&format!(
            "  (clamped {} {}: {} -> {})\n",
            scope,
            e.knob.key(),
            fmt_variance(e.requested),
            fmt_variance(e.applied)
        ));
    }
    out.push('\n');
    out
}

/// The raw financial data table, one row per year.
pub fn format_results_table(results: &[YearResult; YEARS]) -> String {
    let columns = [
        "Lumber",
        "Other",
        "Total Revenue",
        "Cost",
        "Margin",
        "ERA",
        "Total Cash",
        "Base Case",
    ];

    let mut out = String::new();
    let mut header = format!("{:<8}", "Year");
    for c in columns {
        header.push_str(&format!(" {c:>14}"));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    let mut rule = format!("{:-<8}", "");
    for _ in columns {
        rule.push_str(&format!(" {:-<14}", ""));
    }
    out.push_str(&rule);
    out.push('\n');

    for r in results {
        let cells = [
            r.lumber_revenue,
            r.other_revenue(),
            r.total_revenue,
            r.actual_cost,
            r.margin,
            r.era_grant,
            r.cash_available,
            r.revenue_target,
        ];
        let mut row = format!("{:<8}", r.label());
        for v in cells {
            row.push_str(&format!(" {:>14}", fmt_currency(v)));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

/// Operational detail per year: homes, recovery, board-feet and grade mix.
pub fn format_operations_table(results: &[YearResult; YEARS]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>9} {:>9} {:>12} {:>8} {:>8} {:>8}\n",
        "Year", "Homes", "Recovery", "Board-Feet", "Premium", "Builder", "Indust."
    ));
    for r in results {
        out.push_str(&format!(
            "{:<8} {:>9.0} {:>9} {:>12.0} {:>8} {:>8} {:>8}\n",
            r.label(),
            r.homes_adjusted,
            fmt_percent(r.recovery_adjusted, 1),
            r.total_board_feet,
            fmt_percent(r.mix.premium, 1),
            fmt_percent(r.mix.builder, 1),
            fmt_percent(r.mix.industrial, 1),
        ));
    }
    out
}

/// `(label, value, optional note)` for each metric card in a view.
pub fn metric_cards(summary: &Summary, view: DashboardView) -> [(&'static str, String, Option<&'static str>); 4] {
    match view {
        DashboardView::Revenue => [
            ("Year 3 Revenue", fmt_millions(summary.year3_revenue, 2), None),
            ("Lumber % of Mix", fmt_percent(summary.lumber_share_of_revenue, 0), None),
            ("Rev per Home", fmt_currency(summary.revenue_per_home), None),
            ("3-Yr Cumulative", fmt_millions(summary.cumulative_revenue, 1), None),
        ],
        DashboardView::Cash => [
            ("3-Yr Total Cash Inflow", fmt_millions(summary.cumulative_cash, 2), None),
            ("Year 2 ERA Grant", fmt_thousands(summary.year2_era_grant), Some("Confirmed")),
            ("Year 3 Op Margin", fmt_millions(summary.year3_margin, 2), None),
            ("Efficiency (Margin %)", fmt_percent(summary.efficiency, 1), None),
        ],
    }
}

/// Metric cards for `view`, one per line.
pub fn format_metrics(summary: &Summary, view: DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Dashboard\n", view.display_name()));
    for (label, value, note) in metric_cards(summary, view) {
        match note {
            Some(note) => out.push_str(&format!("  {label:<24} {value:>12}  ({note})\n")),
            None => out.push_str(&format!("  {label:<24} {value:>12}\n")),
        }
    }

    out.push_str("\nVariance to base-case plan:\n");
    for (i, v) in summary.variance_to_plan.iter().enumerate() {
        let sign = if *v >= 0.0 { "+" } else { "" };
        out.push_str(&format!("  Year {}  {sign}{}\n", i + 1, fmt_currency(*v)));
    }
    out
}

pub fn format_liquidity_walk(walk: &LiquidityWalk) -> String {
    let mut out = String::new();
    out.push_str(&format!("Year {} Liquidity Walk:\n", walk.year));
    out.push_str(&format!("  {:<12} {:>14}\n", "Op Margin", fmt_currency(walk.margin)));
    out.push_str(&format!("  {:<12} {:>14}\n", "+ ERA Grant", fmt_currency(walk.era_grant)));
    out.push_str(&format!("  {:<12} {:>14}\n", "= Total Cash", fmt_currency(walk.total_cash)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScenarioInput, baseline};
    use crate::engine::project;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(fmt_currency(0.0), "$0");
        assert_eq!(fmt_currency(999.4), "$999");
        assert_eq!(fmt_currency(1_000.0), "$1,000");
        assert_eq!(fmt_currency(17_819_689.5), "$17,819,690");
        assert_eq!(fmt_currency(-1_234.0), "-$1,234");
    }

    #[test]
    fn compact_units() {
        assert_eq!(fmt_millions(17_819_689.5, 2), "$17.82M");
        assert_eq!(fmt_millions(-2_500_000.0, 1), "-$2.5M");
        assert_eq!(fmt_thousands(610_000.0), "$610K");
        assert_eq!(fmt_percent(0.8312, 1), "83.1%");
        assert_eq!(fmt_variance(-0.1), "-10%");
        assert_eq!(fmt_variance(0.125), "+12.5%");
    }

    #[test]
    fn table_has_one_row_per_year() {
        let results = project(&baseline::calibrated(), &ScenarioPlan::default());
        let table = format_results_table(&results);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 + YEARS);
        assert!(lines[0].starts_with("Year"));
        assert!(lines[4].starts_with("Year 3"));
        assert!(lines[4].contains("$17,820,600"));
    }

    #[test]
    fn header_lists_active_variances() {
        let mut plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::Volume, -0.1));
        plan.set_override(1, Knob::Price, 0.15);
        let header = format_scenario_header(&plan, &[]);
        assert!(header.contains("Global: volume=-10%"));
        assert!(header.contains("Year 2 override: price=+15%"));

        let base = format_scenario_header(&ScenarioPlan::default(), &[]);
        assert!(base.contains("Scenario: Base Case"));
    }
}
