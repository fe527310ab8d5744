// Launchpad Ledger Package
//
// In-process message-passing chain the launchpad contracts run on: accounts
// addressed by state-init hash, a FIFO message bus, flat fee metering,
// bounces and per-transaction rollback.

pub mod account;
pub mod code;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_code;
pub mod fault;
pub mod ledger;
pub mod message;
pub mod stack;
pub mod trace;

pub use account::{Account, AccountKind, AccountStatus};
pub use code::{code_cell, CodeRegistry, ContractCode};
pub use config::{FeeSchedule, LedgerConfig};
pub use context::{address_arg, cell_arg, int_arg, Event, ExecutionContext, GetterContext, StackValue};
pub use error::{LedgerError, LedgerResult};
pub use exit_code::ExitCode;
pub use fault::{FaultInjector, FaultRule, HoldRule};
pub use ledger::Ledger;
pub use message::{parse_bounced, InternalMessage, OutboundMessage, SendMode};
pub use stack::StackReader;
pub use trace::{SendResult, SentMessage, Transaction, TxFilter};
