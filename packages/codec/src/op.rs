//! Op codes shared by every contract

// ============================================================
// POOL / FACTORY
// ============================================================

/// Plain value transfer or deploy message with an empty body
pub const TOP_UP: u32 = 0;

pub const INIT: u32 = 101;
pub const BUY_JETTON: u32 = 102;
pub const COLLECT_FUNDS: u32 = 103;
pub const UPGRADE: u32 = 104;
/// Pool -> Factory acknowledgement of `init`
pub const POOL_INITIALIZED: u32 = 105;

pub const DEPLOY_TOKEN: u32 = 201;
pub const INITIATE_NEW: u32 = 202;

// ============================================================
// JETTON STANDARD
// ============================================================

pub const JETTON_TRANSFER: u32 = 0x0f8a_7ea5;
pub const JETTON_TRANSFER_NOTIFICATION: u32 = 0x7362_d09c;
pub const JETTON_INTERNAL_TRANSFER: u32 = 0x178d_4519;
pub const JETTON_EXCESSES: u32 = 0xd532_76db;
pub const JETTON_MINT: u32 = 21;
pub const PROVIDE_WALLET_ADDRESS: u32 = 0x2c76_b973;
pub const TAKE_WALLET_ADDRESS: u32 = 0xd173_5400;
