// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Mass pull at splitter position 0 (fraction of feed reporting to concentrate).
pub const MASS_PULL_BASE: f64 = 0.10;

/// Additional mass pull per unit of splitter travel.
pub const MASS_PULL_PER_SPLITTER: f64 = 0.10;

/// Nominal splitter travel: 0 = tight, 2 = wide.
pub const SPLITTER_MIN: f64 = 0.0;
pub const SPLITTER_MAX: f64 = 2.0;

/// Below this d80 [µm] fines lose recovery linearly.
pub const D80_FINE_LIMIT_UM: f64 = 100.0;

/// Above this d80 [µm] coarse particles lose recovery linearly.
pub const D80_COARSE_LIMIT_UM: f64 = 400.0;

/// Slope denominator of the coarse-size penalty [µm].
pub const D80_COARSE_SPAN_UM: f64 = 800.0;

/// Hard floor on the coarse-size factor.
pub const SIZE_FACTOR_FLOOR: f64 = 0.4;

// Sweep axes (tph, splitter units)
pub const SWEEP_FEED_RATE_MIN: f64 = 100.0;
pub const SWEEP_FEED_RATE_MAX: f64 = 500.0;
pub const SWEEP_SPLITTER_MIN: f64 = SPLITTER_MIN;
pub const SWEEP_SPLITTER_MAX: f64 = SPLITTER_MAX;
pub const SWEEP_SAMPLES: usize = 10;

// Default process set-point
pub const DEFAULT_FEED_RATE_TPH: f64 = 300.0;
pub const DEFAULT_SOLIDS_PCT: f64 = 30.0;
pub const DEFAULT_FEED_D80_UM: f64 = 150.0;
pub const DEFAULT_SPLITTER_POSITION: f64 = 1.0;

// Default OPEX line items
pub const DEFAULT_LABOUR_PER_HR: f64 = 120.0;
pub const DEFAULT_POWER_KW: f64 = 150.0;
pub const DEFAULT_POWER_RATE_PER_KWH: f64 = 0.12;
pub const DEFAULT_WATER_PER_HR: f64 = 15.0;
pub const DEFAULT_MAINTENANCE_PER_HR: f64 = 40.0;
pub const DEFAULT_MINING_COST_PER_TON: f64 = 8.0;
pub const DEFAULT_LEASE_TAX_PER_HR: f64 = 25.0;

// Default KPI targets
pub const DEFAULT_TARGET_THROUGHPUT_TPH: f64 = 300.0;
pub const DEFAULT_TARGET_MARGIN_PCT: f64 = 25.0;
pub const DEFAULT_TARGET_PROFIT_PER_HR: f64 = 5000.0;
pub const DEFAULT_TARGET_GRADE: f64 = 5.0;
