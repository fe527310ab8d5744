// Launchpad Codec Package
//
// Fixed-layout binary messages exchanged between the Factory, Pools and
// jetton contracts, plus the cell/address primitives they are built from.

pub mod address;
pub mod cell;
pub mod envelope;
pub mod error;
pub mod jetton;
pub mod messages;
pub mod op;

pub use address::{Address, StateInit, BASECHAIN};
pub use cell::{Builder, Cell, Slice, MAX_BITS, MAX_COINS, MAX_REFS};
pub use envelope::{Envelope, Header, MessageBody};
pub use error::{CodecError, CodecResult};
