// Attached-value estimates
//
// Each estimate covers every compute and forward fee along the message chain
// a request starts, so a request carrying at least the estimate cannot stall
// halfway for lack of value.

use launchpad_jetton::mint_required_value;
use launchpad_ledger::FeeSchedule;

/// Value the deploy wrapper attaches
pub const ESTIMATED_DEPLOY_VALUE: u128 = 50_000_000;

/// Value one mint leg takes out of the factory's budget
pub fn mint_leg_value(fees: &FeeSchedule) -> u128 {
    mint_required_value(fees) + fees.forward_fee
}

/// Factory compute, the mint to the new minter and the minting itself
pub fn estimate_deploy_token_value(fees: &FeeSchedule) -> u128 {
    fees.compute_fee + mint_leg_value(fees)
}

/// Factory compute, the pool init hop, the pool's acknowledgement hop and
/// the factory's second compute, followed by both mints
pub fn estimate_initiate_new_value(fees: &FeeSchedule) -> u128 {
    3 * fees.compute_fee + 2 * fees.forward_fee + 2 * mint_leg_value(fees)
}

/// Budget the pool's acknowledgement must still carry when it returns
pub fn pool_initialized_required_value(fees: &FeeSchedule, mints: u128) -> u128 {
    mints * mint_leg_value(fees)
}

/// A code swap only runs the compute phase; replacing the pool template
/// as well costs one extra forward fee for the larger state
pub fn estimate_upgrade_value(fees: &FeeSchedule, with_pool_code: bool) -> u128 {
    if with_pool_code {
        fees.compute_fee + fees.forward_fee
    } else {
        fees.compute_fee
    }
}
