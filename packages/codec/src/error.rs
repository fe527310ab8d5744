//! Codec errors

use thiserror::Error;

/// Error raised while building or parsing a cell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("cell overflow: {requested} bits requested, {available} available")]
    BitOverflow { requested: usize, available: usize },

    #[error("cell overflow: more than {max} references")]
    RefOverflow { max: usize },

    #[error("cell underflow: {requested} bits requested, {available} left")]
    BitUnderflow { requested: usize, available: usize },

    #[error("cell underflow: no reference left")]
    RefUnderflow,

    #[error("value does not fit in {bits} bits")]
    ValueTooLarge { bits: usize },

    #[error("invalid address tag {0:#04b}")]
    InvalidAddressTag(u8),

    #[error("address expected, found addr_none")]
    MissingAddress,

    #[error("unexpected op code: expected {expected:#x}, found {found:#x}")]
    UnexpectedOp { expected: u32, found: u32 },

    #[error("message body has no op code")]
    MissingOp,

    #[error("unsupported content layout prefix {0:#04x}")]
    UnsupportedContent(u8),

    #[error("invalid address string: {0}")]
    InvalidAddressString(String),

    #[error("trailing data left after parsing: {bits} bits, {refs} refs")]
    TrailingData { bits: usize, refs: usize },
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
