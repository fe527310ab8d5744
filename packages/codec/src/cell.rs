//! Bit-level cells
//!
//! A cell holds up to 1023 data bits and up to 4 references to other cells.
//! Every message body, persisted record and code blob is a cell tree.

use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::address::Address;
use crate::error::{CodecError, CodecResult};

// ============================================================
// LIMITS
// ============================================================

/// Maximum data bits per cell
pub const MAX_BITS: usize = 1023;

/// Maximum references per cell
pub const MAX_REFS: usize = 4;

/// Length prefix width of a `coins` (VarUInteger 16) field
const COINS_LEN_BITS: usize = 4;

/// Largest value a `coins` field can carry (15 bytes)
pub const MAX_COINS: u128 = (1u128 << 120) - 1;

// ============================================================
// CELL
// ============================================================

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl Cell {
    /// Cell with no bits and no references
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn refs(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0 && self.refs.is_empty()
    }

    /// Start reading this cell from the first bit
    pub fn parse(&self) -> Slice<'_> {
        Slice {
            cell: self,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Representation hash: descriptor, padded data, then the hashes of all references
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update([self.refs.len() as u8]);
        hasher.update((self.bit_len as u16).to_be_bytes());
        hasher.update(&self.data);
        for child in &self.refs {
            hasher.update(child.hash());
        }
        hasher.finalize().into()
    }

    fn bit_at(&self, index: usize) -> bool {
        (self.data[index / 8] >> (7 - index % 8)) & 1 == 1
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell{{{}b:", self.bit_len)?;
        for byte in &self.data {
            write!(f, "{byte:02x}")?;
        }
        if !self.refs.is_empty() {
            write!(f, " refs:{:?}", self.refs)?;
        }
        write!(f, "}}")
    }
}

// ============================================================
// BUILDER
// ============================================================

#[derive(Clone, Debug, Default)]
pub struct Builder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits_left(&self) -> usize {
        MAX_BITS - self.bit_len
    }

    pub fn refs_left(&self) -> usize {
        MAX_REFS - self.refs.len()
    }

    fn ensure_bits(&self, requested: usize) -> CodecResult<()> {
        if requested > self.bits_left() {
            return Err(CodecError::BitOverflow {
                requested,
                available: self.bits_left(),
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    pub fn store_bit(&mut self, bit: bool) -> CodecResult<&mut Self> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Store `value` as a big-endian unsigned integer of exactly `bits` bits
    pub fn store_uint(&mut self, value: u128, bits: usize) -> CodecResult<&mut Self> {
        if bits > 128 || (bits < 128 && value >> bits != 0) {
            return Err(CodecError::ValueTooLarge { bits });
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// VarUInteger 16: 4-bit byte length followed by the value bytes
    pub fn store_coins(&mut self, value: u128) -> CodecResult<&mut Self> {
        if value > MAX_COINS {
            return Err(CodecError::ValueTooLarge { bits: 120 });
        }
        let byte_len = (128 - value.leading_zeros() as usize).div_ceil(8);
        self.ensure_bits(COINS_LEN_BITS + byte_len * 8)?;
        self.store_uint(byte_len as u128, COINS_LEN_BITS)?;
        self.store_uint(value, byte_len * 8)
    }

    pub fn store_bytes(&mut self, bytes: &[u8]) -> CodecResult<&mut Self> {
        self.ensure_bits(bytes.len() * 8)?;
        for byte in bytes {
            for i in (0..8).rev() {
                self.push_bit((byte >> i) & 1 == 1);
            }
        }
        Ok(self)
    }

    /// `addr_std$10 anycast:0 workchain:int8 hash:bits256`
    pub fn store_address(&mut self, address: &Address) -> CodecResult<&mut Self> {
        self.ensure_bits(Address::BITS)?;
        self.store_uint(0b10, 2)?;
        self.store_bit(false)?;
        self.store_uint(address.workchain() as u8 as u128, 8)?;
        self.store_bytes(address.hash())
    }

    /// `addr_none$00` when absent
    pub fn store_maybe_address(&mut self, address: Option<&Address>) -> CodecResult<&mut Self> {
        match address {
            Some(address) => self.store_address(address),
            None => self.store_uint(0, 2),
        }
    }

    pub fn store_ref(&mut self, cell: Cell) -> CodecResult<&mut Self> {
        if self.refs.len() >= MAX_REFS {
            return Err(CodecError::RefOverflow { max: MAX_REFS });
        }
        self.refs.push(Arc::new(cell));
        Ok(self)
    }

    pub fn store_maybe_ref(&mut self, cell: Option<Cell>) -> CodecResult<&mut Self> {
        match cell {
            Some(cell) => {
                if self.refs.len() >= MAX_REFS {
                    return Err(CodecError::RefOverflow { max: MAX_REFS });
                }
                self.store_bit(true)?;
                self.store_ref(cell)
            }
            None => self.store_bit(false),
        }
    }

    pub fn end_cell(self) -> Cell {
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            refs: self.refs,
        }
    }
}

// ============================================================
// SLICE
// ============================================================

/// Read cursor over a cell
#[derive(Clone, Debug)]
pub struct Slice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> Slice<'a> {
    pub fn bits_left(&self) -> usize {
        self.cell.bit_len - self.bit_pos
    }

    pub fn refs_left(&self) -> usize {
        self.cell.refs.len() - self.ref_pos
    }

    fn ensure_bits(&self, requested: usize) -> CodecResult<()> {
        if requested > self.bits_left() {
            return Err(CodecError::BitUnderflow {
                requested,
                available: self.bits_left(),
            });
        }
        Ok(())
    }

    pub fn load_bit(&mut self) -> CodecResult<bool> {
        self.ensure_bits(1)?;
        let bit = self.cell.bit_at(self.bit_pos);
        self.bit_pos += 1;
        Ok(bit)
    }

    pub fn load_uint(&mut self, bits: usize) -> CodecResult<u128> {
        if bits > 128 {
            return Err(CodecError::ValueTooLarge { bits });
        }
        self.ensure_bits(bits)?;
        let mut value = 0u128;
        for _ in 0..bits {
            value = (value << 1) | self.cell.bit_at(self.bit_pos) as u128;
            self.bit_pos += 1;
        }
        Ok(value)
    }

    pub fn load_u8(&mut self) -> CodecResult<u8> {
        Ok(self.load_uint(8)? as u8)
    }

    pub fn load_u16(&mut self) -> CodecResult<u16> {
        Ok(self.load_uint(16)? as u16)
    }

    pub fn load_u32(&mut self) -> CodecResult<u32> {
        Ok(self.load_uint(32)? as u32)
    }

    pub fn load_u64(&mut self) -> CodecResult<u64> {
        Ok(self.load_uint(64)? as u64)
    }

    pub fn load_coins(&mut self) -> CodecResult<u128> {
        let byte_len = self.load_uint(COINS_LEN_BITS)? as usize;
        self.load_uint(byte_len * 8)
    }

    pub fn load_bytes(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        self.ensure_bits(len * 8)?;
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(self.load_uint(8)? as u8);
        }
        Ok(bytes)
    }

    pub fn load_maybe_address(&mut self) -> CodecResult<Option<Address>> {
        let tag = self.load_uint(2)? as u8;
        match tag {
            0b00 => Ok(None),
            0b10 => {
                // anycast is never produced by this codec
                if self.load_bit()? {
                    return Err(CodecError::InvalidAddressTag(tag));
                }
                let workchain = self.load_u8()? as i8;
                let bytes = self.load_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Some(Address::new(workchain, hash)))
            }
            other => Err(CodecError::InvalidAddressTag(other)),
        }
    }

    pub fn load_address(&mut self) -> CodecResult<Address> {
        self.load_maybe_address()?.ok_or(CodecError::MissingAddress)
    }

    pub fn load_ref(&mut self) -> CodecResult<&'a Cell> {
        let cell: &'a Cell = self.cell;
        let child = cell.refs.get(self.ref_pos).ok_or(CodecError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(child.as_ref())
    }

    pub fn load_maybe_ref(&mut self) -> CodecResult<Option<&'a Cell>> {
        if self.load_bit()? {
            Ok(Some(self.load_ref()?))
        } else {
            Ok(None)
        }
    }

    /// Fails when anything is left unread
    pub fn end_parse(&self) -> CodecResult<()> {
        if self.bits_left() != 0 || self.refs_left() != 0 {
            return Err(CodecError::TrailingData {
                bits: self.bits_left(),
                refs: self.refs_left(),
            });
        }
        Ok(())
    }
}

// ============================================================
// SNAKE DATA
// ============================================================

/// Store bytes in snake format: fill the current cell, continue in a chained reference
pub fn store_snake_bytes(builder: &mut Builder, bytes: &[u8]) -> CodecResult<()> {
    let head = (builder.bits_left() / 8).min(bytes.len());
    builder.store_bytes(&bytes[..head])?;
    let rest = &bytes[head..];
    if !rest.is_empty() {
        let mut tail = Builder::new();
        store_snake_bytes(&mut tail, rest)?;
        builder.store_ref(tail.end_cell())?;
    }
    Ok(())
}

pub fn load_snake_bytes(slice: &mut Slice<'_>) -> CodecResult<Vec<u8>> {
    let mut bytes = slice.load_bytes(slice.bits_left() / 8)?;
    if slice.refs_left() > 0 {
        let tail = slice.load_ref()?;
        bytes.extend(load_snake_bytes(&mut tail.parse())?);
    }
    Ok(bytes)
}
