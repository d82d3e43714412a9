//! Headline metrics derived from a projection.

use serde::Serialize;

use crate::domain::{YEARS, YearResult};
use crate::error::ScenarioError;

/// Metric cards shown on the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub year3_revenue: f64,
    pub year3_margin: f64,
    pub year2_era_grant: f64,
    /// Year-3 lumber revenue as a fraction of Year-3 total revenue.
    pub lumber_share_of_revenue: f64,
    /// Year-3 total revenue per adjusted home.
    pub revenue_per_home: f64,
    /// Year-3 margin over Year-3 revenue.
    pub efficiency: f64,
    pub cumulative_revenue: f64,
    pub cumulative_cash: f64,
    pub variance_to_plan: [f64; YEARS],
}

impl Summary {
    /// Compute the metrics.
    ///
    /// Ratios divide by Year-3 homes and revenue, so a projection where either
    /// reaches zero (volume at -100%) is reported as degenerate instead of
    /// producing NaN or infinity.
    pub fn from_results(results: &[YearResult; YEARS]) -> Result<Self, ScenarioError> {
        let y3 = &results[2];
        if y3.homes_adjusted <= 0.0 {
            return Err(ScenarioError::DegenerateProjection {
                year: y3.year,
                reason: "no homes processed",
            });
        }
        if y3.total_revenue == 0.0 {
            return Err(ScenarioError::DegenerateProjection {
                year: y3.year,
                reason: "zero total revenue",
            });
        }

        Ok(Self {
            year3_revenue: y3.total_revenue,
            year3_margin: y3.margin,
            year2_era_grant: results[1].era_grant,
            lumber_share_of_revenue: y3.lumber_revenue / y3.total_revenue,
            revenue_per_home: y3.total_revenue / y3.homes_adjusted,
            efficiency: y3.margin / y3.total_revenue,
            cumulative_revenue: results.iter().map(|r| r.total_revenue).sum(),
            cumulative_cash: results.iter().map(|r| r.cash_available).sum(),
            variance_to_plan: results.each_ref().map(YearResult::variance_to_plan),
        })
    }
}

/// Year-2 liquidity walk: operating margin, plus grant, to total cash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiquidityWalk {
    pub year: usize,
    pub margin: f64,
    pub era_grant: f64,
    pub total_cash: f64,
}

impl LiquidityWalk {
    pub fn for_year(result: &YearResult) -> Self {
        Self {
            year: result.year,
            margin: result.margin,
            era_grant: result.era_grant,
            total_cash: result.cash_available,
        }
    }
}
