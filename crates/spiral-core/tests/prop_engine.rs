// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Property-Based Tests (proptest) for spiral-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for spiral-core using proptest.
//!
//! Covers: size factor piecewise law, mass pull, revenue accounting,
//! zero-feed behaviour, idempotence, sweep grid round trip, margin guard.

use proptest::prelude::*;
use spiral_core::economics::{margin_pct, summarize_revenue, total_opex};
use spiral_core::engine::{concentrate_flow, size_factor, SpiralEngine};
use spiral_core::sweep::{sweep, sweep_parallel};
use spiral_types::config::{OpexParameters, RecoveryTargets, SweepConfig};
use spiral_types::mineral::MineralValues;

fn reference_inputs() -> (SpiralEngine, RecoveryTargets, MineralValues) {
    let engine = SpiralEngine::reference();
    let targets = RecoveryTargets::from_table(engine.table());
    let prices = engine.table().default_prices();
    (engine, targets, prices)
}

fn targets_from(recs: &[f64]) -> RecoveryTargets {
    let engine = SpiralEngine::reference();
    let mut targets = RecoveryTargets::from_table(engine.table());
    for (name, &rec) in engine.table().names().into_iter().zip(recs) {
        targets = targets.with(name, rec);
    }
    targets
}

// ── Size Factor ──────────────────────────────────────────────────────

proptest! {
    /// No penalty on [100, 400] µm.
    #[test]
    fn size_factor_plateau(d80 in 100.0f64..=400.0) {
        prop_assert_eq!(size_factor(d80), 1.0);
    }

    /// Fines scale linearly.
    #[test]
    fn size_factor_fines(d80 in 0.0f64..100.0) {
        prop_assert!((size_factor(d80) - d80 / 100.0).abs() < 1e-15);
    }

    /// Coarse penalty with the 0.4 floor.
    #[test]
    fn size_factor_coarse(d80 in 400.0001f64..5000.0) {
        let expected = (1.0 - (d80 - 400.0) / 800.0).max(0.4);
        let sf = size_factor(d80);
        prop_assert!((sf - expected).abs() < 1e-15);
        prop_assert!((0.4..=1.0).contains(&sf));
    }
}

// ── Engine ───────────────────────────────────────────────────────────

proptest! {
    /// Concentrate flow = feed × (0.10 + 0.10 × splitter).
    #[test]
    fn concentrate_flow_law(feed in 0.0f64..1000.0, split in 0.0f64..=2.0) {
        let (engine, targets, prices) = reference_inputs();
        let res = engine.evaluate(feed, &targets, &prices, split, 150.0).unwrap();
        let expected = feed * (0.10 + 0.10 * split);
        prop_assert!((res.concentrate_tph - expected).abs() < 1e-9);
        prop_assert_eq!(res.concentrate_tph, concentrate_flow(feed, split));
    }

    /// Rounded row revenues sum to the total within rounding tolerance.
    #[test]
    fn revenue_rows_sum_to_total(
        feed in 0.0f64..1000.0,
        split in -1.0f64..3.0,
        d80 in 20.0f64..1500.0,
        recs in proptest::collection::vec(0.0f64..=100.0, 5),
    ) {
        let (engine, _, prices) = reference_inputs();
        let targets = targets_from(&recs);
        let res = engine.evaluate(feed, &targets, &prices, split, d80).unwrap();
        let sum: f64 = res.rows.iter().map(|r| r.revenue_per_hr).sum();
        prop_assert!((sum - res.total_revenue_per_hr).abs() <= 0.005 * 5.0 + 1e-6,
            "sum={} total={}", sum, res.total_revenue_per_hr);
        for r in &res.rows {
            prop_assert!(r.concentrate_grade.is_finite());
        }
    }

    /// Zero feed gives zero flow and zero revenue for any setting.
    #[test]
    fn zero_feed_is_zero(split in -3.0f64..3.0, d80 in 1.0f64..2000.0) {
        let (engine, targets, prices) = reference_inputs();
        let res = engine.evaluate(0.0, &targets, &prices, split, d80).unwrap();
        prop_assert_eq!(res.concentrate_tph, 0.0);
        prop_assert_eq!(res.total_revenue_per_hr, 0.0);
        for r in &res.rows {
            prop_assert_eq!(r.revenue_per_hr, 0.0);
        }
    }

    /// Identical inputs give identical outputs.
    #[test]
    fn engine_idempotent(feed in 0.0f64..1000.0, split in 0.0f64..2.0, d80 in 20.0f64..1000.0) {
        let (engine, targets, prices) = reference_inputs();
        let a = engine.evaluate(feed, &targets, &prices, split, d80).unwrap();
        let b = engine.evaluate(feed, &targets, &prices, split, d80).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Negative feed rates are rejected before any computation.
    #[test]
    fn negative_feed_rejected(feed in -1000.0f64..-1e-6) {
        let (engine, targets, prices) = reference_inputs();
        prop_assert!(engine.evaluate(feed, &targets, &prices, 1.0, 150.0).is_err());
    }
}

// ── Sweep ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every cell equals an independent engine call minus OPEX.
    #[test]
    fn sweep_grid_roundtrip(nf in 1usize..8, ns in 1usize..8, d80 in 20.0f64..1200.0) {
        let (engine, targets, prices) = reference_inputs();
        let opex = OpexParameters::default();
        let cfg = SweepConfig::with_samples(nf, ns);
        let grid = sweep(&engine, &cfg, &targets, &prices, d80, &opex).unwrap();

        prop_assert_eq!(grid.shape(), (nf, ns));
        for i in 0..nf {
            for j in 0..ns {
                let feed = grid.feed_rate_axis[i];
                let split = grid.splitter_axis[j];
                let revenue = engine
                    .evaluate(feed, &targets, &prices, split, d80)
                    .unwrap()
                    .total_revenue_per_hr;
                prop_assert_eq!(grid.profit[[i, j]], revenue - total_opex(&opex, feed));
            }
        }
    }

    /// The parallel sweep reproduces the sequential grid exactly.
    #[test]
    fn sweep_parallel_equivalent(nf in 1usize..12, ns in 1usize..12) {
        let (engine, targets, prices) = reference_inputs();
        let opex = OpexParameters::default();
        let cfg = SweepConfig::with_samples(nf, ns);
        let seq = sweep(&engine, &cfg, &targets, &prices, 150.0, &opex).unwrap();
        let par = sweep_parallel(&engine, &cfg, &targets, &prices, 150.0, &opex).unwrap();
        prop_assert_eq!(seq, par);
    }
}

// ── Economics ────────────────────────────────────────────────────────

proptest! {
    /// Margin is defined (0) for non-positive revenue and bounded above by 100.
    #[test]
    fn margin_guard(revenue in -1e5f64..1e5, opex_hr in 0.0f64..1e5) {
        let m = margin_pct(revenue - opex_hr, revenue);
        prop_assert!(m.is_finite());
        if revenue <= 0.0 {
            prop_assert_eq!(m, 0.0);
        } else {
            prop_assert!(m <= 100.0 + 1e-9);
        }
    }

    /// Per-ton metrics are finite for any non-negative feed rate.
    #[test]
    fn per_ton_finite(revenue in 0.0f64..1e5, feed in 0.0f64..1000.0) {
        let s = summarize_revenue(revenue, &OpexParameters::default(), feed);
        prop_assert!(s.cost_per_ton.is_finite());
        prop_assert!(s.profit_per_ton.is_finite());
        prop_assert!((s.profit_per_hr - (revenue - s.total_opex_per_hr)).abs() < 1e-9);
    }
}
