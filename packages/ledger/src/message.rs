//! Internal messages and send modes

use std::ops::BitOr;

use launchpad_codec::{Address, Builder, Cell, CodecResult, Header, Slice, StateInit};

/// Prefix of a bounced body, followed by the head of the original body
pub const BOUNCE_PREFIX: u32 = 0xffff_ffff;

/// Bits of the original body kept in a bounce
pub const BOUNCE_BODY_BITS: usize = 256;

// ============================================================
// SEND MODE
// ============================================================

/// Send mode flags of an outbound message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SendMode(u8);

impl SendMode {
    /// Value is taken as-is and the forward fee comes out of it
    pub const ORDINARY: SendMode = SendMode(0);
    /// Forward fee is paid from the balance on top of the value
    pub const PAY_FEES_SEPARATELY: SendMode = SendMode(1);
    /// A failing message is skipped instead of failing the action phase
    pub const IGNORE_ERRORS: SendMode = SendMode(2);
    /// Adds whatever is left of the inbound value after compute
    pub const CARRY_REMAINING_VALUE: SendMode = SendMode(64);
    /// Sends the whole remaining balance
    pub const CARRY_ALL_BALANCE: SendMode = SendMode(128);

    pub const fn from_bits(bits: u8) -> Self {
        SendMode(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, flag: SendMode) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for SendMode {
    type Output = SendMode;

    fn bitor(self, rhs: SendMode) -> SendMode {
        SendMode(self.0 | rhs.0)
    }
}

// ============================================================
// MESSAGES
// ============================================================

/// Message as delivered to a destination account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalMessage {
    pub src: Address,
    pub dest: Address,
    pub value: u128,
    pub bounce: bool,
    pub bounced: bool,
    pub body: Cell,
    pub state_init: Option<StateInit>,
}

impl InternalMessage {
    pub fn header(&self) -> Option<Header> {
        if self.bounced {
            return None;
        }
        Header::peek(&self.body)
    }

    pub fn op(&self) -> Option<u32> {
        self.header().map(|h| h.op)
    }
}

/// Message requested by a contract (or a treasury) before the ledger fills in the source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub dest: Address,
    pub value: u128,
    pub bounce: bool,
    pub body: Cell,
    pub state_init: Option<StateInit>,
}

impl OutboundMessage {
    /// Bounceable message without state init
    pub fn new(dest: Address, value: u128, body: Cell) -> Self {
        Self {
            dest,
            value,
            bounce: true,
            body,
            state_init: None,
        }
    }

    pub fn with_state_init(mut self, init: StateInit) -> Self {
        self.state_init = Some(init);
        self
    }

    pub fn non_bounceable(mut self) -> Self {
        self.bounce = false;
        self
    }
}

// ============================================================
// BOUNCES
// ============================================================

/// `0xffffffff` followed by the first 256 bits of `original`, references dropped
pub fn bounce_body(original: &Cell) -> CodecResult<Cell> {
    let mut b = Builder::new();
    b.store_uint(BOUNCE_PREFIX as u128, 32)?;
    let mut s = original.parse();
    let mut kept = s.bits_left().min(BOUNCE_BODY_BITS);
    while kept > 0 {
        let chunk = kept.min(64);
        b.store_uint(s.load_uint(chunk)?, chunk)?;
        kept -= chunk;
    }
    Ok(b.end_cell())
}

/// Slice positioned after the bounce prefix, at the head of the original body
pub fn parse_bounced(body: &Cell) -> CodecResult<Slice<'_>> {
    let mut s = body.parse();
    s.load_u32()?;
    Ok(s)
}
