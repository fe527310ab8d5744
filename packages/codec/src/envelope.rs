//! Message envelope: `[op:32][query_id:64][payload]`

use crate::cell::{Builder, Cell, Slice};
use crate::error::{CodecError, CodecResult};
use crate::op;

/// Typed message payload with a fixed op code
pub trait MessageBody: Sized {
    const OP: u32;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()>;

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self>;

    /// Full body cell with the envelope header
    fn to_body(&self, query_id: u64) -> CodecResult<Cell> {
        let mut b = Builder::new();
        b.store_uint(Self::OP as u128, 32)?
            .store_uint(query_id as u128, 64)?;
        self.store_payload(&mut b)?;
        Ok(b.end_cell())
    }

    /// Parse a full body cell, checking the op code
    fn from_body(body: &Cell) -> CodecResult<Envelope<Self>> {
        let mut s = body.parse();
        let header = Header::load(&mut s)?.ok_or(CodecError::MissingOp)?;
        if header.op != Self::OP {
            return Err(CodecError::UnexpectedOp {
                expected: Self::OP,
                found: header.op,
            });
        }
        let payload = Self::load_payload(&mut s)?;
        Ok(Envelope {
            query_id: header.query_id,
            payload,
        })
    }
}

/// Decoded message with its query id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope<T> {
    pub query_id: u64,
    pub payload: T,
}

/// Op code and query id at the head of a body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub op: u32,
    pub query_id: u64,
}

impl Header {
    /// `None` for an empty body. A zero op carries no query id (text comment or top-up).
    pub fn load(s: &mut Slice<'_>) -> CodecResult<Option<Self>> {
        if s.bits_left() < 32 {
            return Ok(None);
        }
        let op = s.load_u32()?;
        if op == op::TOP_UP {
            return Ok(Some(Self { op, query_id: 0 }));
        }
        let query_id = s.load_u64()?;
        Ok(Some(Self { op, query_id }))
    }

    /// Peek the header of a body without consuming it
    pub fn peek(body: &Cell) -> Option<Self> {
        Self::load(&mut body.parse()).ok().flatten()
    }
}
