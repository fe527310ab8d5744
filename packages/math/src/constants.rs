// Constants module
//
// Grouped by functionality; every ratio in the protocol is an integer
// numerator over one of these denominators.

// ============================================================
// FEE CONSTANTS
// ============================================================

/// Denominator of `fee_per_mille`
pub const PER_MILLE: u128 = 1000;

/// Fees must stay strictly below 100%
pub const MAX_FEE_PER_MILLE: u16 = 999;

// ============================================================
// SUPPLY SPLIT CONSTANTS
// ============================================================

/// Denominator of `deployer_supply_percent`
pub const PERCENT: u128 = 100;
