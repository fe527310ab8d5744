//! Contract addresses and deployment state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::{Builder, Cell};
use crate::error::{CodecError, CodecResult};

/// Basechain
pub const BASECHAIN: i8 = 0;

// ============================================================
// ADDRESS
// ============================================================

/// Standard internal address: workchain plus 256-bit account id
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    workchain: i8,
    hash: [u8; 32],
}

impl Address {
    /// Serialized width of `addr_std` without anycast
    pub const BITS: usize = 2 + 1 + 8 + 256;

    pub const fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Address a contract gets when deployed with `init`
    pub fn from_state_init(workchain: i8, init: &StateInit) -> CodecResult<Self> {
        Ok(Self::new(workchain, init.to_cell()?.hash()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.workchain)?;
        for byte in &self.hash {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form keeps traces readable
        write!(f, "{}:", self.workchain)?;
        for byte in &self.hash[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")
    }
}

impl FromStr for Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodecError::InvalidAddressString(s.to_string());
        let (workchain, hex) = s.split_once(':').ok_or_else(invalid)?;
        let workchain: i8 = workchain.parse().map_err(|_| invalid())?;
        if hex.len() != 64 || !hex.is_ascii() {
            return Err(invalid());
        }
        let mut hash = [0u8; 32];
        for (i, byte) in hash.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self::new(workchain, hash))
    }
}

impl TryFrom<String> for Address {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

// ============================================================
// STATE INIT
// ============================================================

/// Code and initial data of a contract; their hash is the contract's address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateInit {
    pub code: Cell,
    pub data: Cell,
}

impl StateInit {
    pub fn new(code: Cell, data: Cell) -> Self {
        Self { code, data }
    }

    /// `split_depth:0 special:0 code:1 data:1 library:0`
    pub fn to_cell(&self) -> CodecResult<Cell> {
        let mut b = Builder::new();
        b.store_bit(false)?
            .store_bit(false)?
            .store_maybe_ref(Some(self.code.clone()))?
            .store_maybe_ref(Some(self.data.clone()))?
            .store_bit(false)?;
        Ok(b.end_cell())
    }

    pub fn address(&self, workchain: i8) -> CodecResult<Address> {
        Address::from_state_init(workchain, self)
    }
}
