// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Operating Cost Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Hourly OPEX and the profit metrics derived from engine revenue.
//!
//! The same [`total_opex`] feeds both the point estimate and every sweep
//! cell so the heatmap stays consistent with the headline KPIs.

use spiral_types::config::OpexParameters;
use spiral_types::state::{EconomicSummary, EngineResult, OpexBreakdown};

/// Total OPEX [$/h] at `feed_rate_tph`.
///
/// `labour + power_kw·power_rate + water + maintenance + feed·mining + lease_tax`.
/// Installed power is a fixed hourly charge.
pub fn total_opex(opex: &OpexParameters, feed_rate_tph: f64) -> f64 {
    opex.labour_per_hr
        + opex.power_kw * opex.power_rate_per_kwh
        + opex.water_per_hr
        + opex.maintenance_per_hr
        + feed_rate_tph * opex.mining_cost_per_ton
        + opex.lease_tax_per_hr
}

/// OPEX line items [$/h] at `feed_rate_tph`.
pub fn opex_breakdown(opex: &OpexParameters, feed_rate_tph: f64) -> OpexBreakdown {
    OpexBreakdown {
        labour: opex.labour_per_hr,
        power: opex.power_kw * opex.power_rate_per_kwh,
        water: opex.water_per_hr,
        maintenance: opex.maintenance_per_hr,
        mining: feed_rate_tph * opex.mining_cost_per_ton,
        lease_tax: opex.lease_tax_per_hr,
        total: total_opex(opex, feed_rate_tph),
    }
}

/// Profit margin [%]; 0 when revenue is not positive.
pub fn margin_pct(profit_per_hr: f64, revenue_per_hr: f64) -> f64 {
    if revenue_per_hr > 0.0 {
        profit_per_hr / revenue_per_hr * 100.0
    } else {
        0.0
    }
}

/// Hourly value spread over throughput [$/t]; 0 when feed rate is not positive.
pub fn per_ton(value_per_hr: f64, feed_rate_tph: f64) -> f64 {
    if feed_rate_tph > 0.0 {
        value_per_hr / feed_rate_tph
    } else {
        0.0
    }
}

/// Headline economics from revenue and OPEX at one feed rate.
pub fn summarize_revenue(
    revenue_per_hr: f64,
    opex: &OpexParameters,
    feed_rate_tph: f64,
) -> EconomicSummary {
    let opex_hr = total_opex(opex, feed_rate_tph);
    let profit = revenue_per_hr - opex_hr;
    EconomicSummary {
        total_revenue_per_hr: revenue_per_hr,
        total_opex_per_hr: opex_hr,
        profit_per_hr: profit,
        margin_pct: margin_pct(profit, revenue_per_hr),
        cost_per_ton: per_ton(opex_hr, feed_rate_tph),
        profit_per_ton: per_ton(profit, feed_rate_tph),
    }
}

/// Headline economics for an engine result evaluated at `feed_rate_tph`.
pub fn summarize(
    result: &EngineResult,
    opex: &OpexParameters,
    feed_rate_tph: f64,
) -> EconomicSummary {
    summarize_revenue(result.total_revenue_per_hr, opex, feed_rate_tph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_opex_defaults() {
        // 120 + 150×0.12 + 15 + 40 + 300×8 + 25 = 2618
        let opex = OpexParameters::default();
        assert!((total_opex(&opex, 300.0) - 2_618.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_mining_scales_with_feed() {
        let opex = OpexParameters::default();
        let delta = total_opex(&opex, 400.0) - total_opex(&opex, 100.0);
        assert!((delta - 300.0 * opex.mining_cost_per_ton).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let opex = OpexParameters::default();
        let b = opex_breakdown(&opex, 275.0);
        let sum = b.labour + b.power + b.water + b.maintenance + b.mining + b.lease_tax;
        assert!((sum - b.total).abs() < 1e-9);
        assert!((b.power - 18.0).abs() < 1e-9);
        assert!((b.mining - 2_200.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_reference_case() {
        let s = summarize_revenue(1_000.0, &zero_opex_with_fixed(750.0), 100.0);
        assert!((s.profit_per_hr - 250.0).abs() < 1e-9);
        assert!((s.margin_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_zero_revenue() {
        assert_eq!(margin_pct(-500.0, 0.0), 0.0);
        assert_eq!(margin_pct(-500.0, -10.0), 0.0);
    }

    #[test]
    fn test_per_ton_zero_feed() {
        let s = summarize_revenue(0.0, &OpexParameters::default(), 0.0);
        assert_eq!(s.cost_per_ton, 0.0);
        assert_eq!(s.profit_per_ton, 0.0);
        assert_eq!(s.margin_pct, 0.0);
        assert!(s.profit_per_hr < 0.0);
    }

    #[test]
    fn test_per_ton_values() {
        let opex = OpexParameters::default();
        let s = summarize_revenue(5_618.0, &opex, 300.0);
        assert!((s.profit_per_hr - 3_000.0).abs() < 1e-9);
        assert!((s.cost_per_ton - 2_618.0 / 300.0).abs() < 1e-12);
        assert!((s.profit_per_ton - 10.0).abs() < 1e-9);
    }

    fn zero_opex_with_fixed(labour: f64) -> OpexParameters {
        OpexParameters {
            labour_per_hr: labour,
            power_kw: 0.0,
            power_rate_per_kwh: 0.0,
            water_per_hr: 0.0,
            maintenance_per_hr: 0.0,
            mining_cost_per_ton: 0.0,
            lease_tax_per_hr: 0.0,
        }
    }
}
