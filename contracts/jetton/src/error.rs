// Jetton error codes, numbered like the reference jetton contracts

use launchpad_ledger::ExitCode;
use thiserror::Error;

#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum JettonError {
    // Minter (70-79)
    #[error("sender is not the minter admin")]
    NotAdmin = 73,

    // Wallet (700-709)
    #[error("transfer not sent by the wallet owner")]
    UnauthorizedTransfer = 705,
    #[error("not enough jettons")]
    NotEnoughJettons = 706,
    #[error("incoming transfer from an unknown wallet")]
    UnauthorizedIncomingTransfer = 707,
    #[error("attached value does not cover forwarding")]
    NotEnoughValue = 709,
}

impl From<JettonError> for ExitCode {
    fn from(err: JettonError) -> Self {
        ExitCode(err as u32)
    }
}
