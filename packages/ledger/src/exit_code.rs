//! Transaction exit codes

use std::fmt;

use launchpad_codec::CodecError;

/// Exit code of a transaction. Zero is success; contracts use their own codes above 0xff.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExitCode(pub u32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const STACK_UNDERFLOW: ExitCode = ExitCode(2);
    pub const INTEGER_OVERFLOW: ExitCode = ExitCode(4);
    /// Integer argument outside the expected range
    pub const RANGE_CHECK: ExitCode = ExitCode(5);
    pub const TYPE_CHECK: ExitCode = ExitCode(7);
    pub const CELL_OVERFLOW: ExitCode = ExitCode(8);
    pub const CELL_UNDERFLOW: ExitCode = ExitCode(9);
    pub const METHOD_NOT_FOUND: ExitCode = ExitCode(11);
    /// Attached value cannot pay for the compute phase
    pub const OUT_OF_GAS: ExitCode = ExitCode(13);
    /// Action phase could not pay for an outbound message
    pub const NOT_ENOUGH_BALANCE: ExitCode = ExitCode(37);
    /// Code cell has no registered implementation
    pub const INVALID_CODE: ExitCode = ExitCode(39);
    /// Destination has no state and the message carried no matching state init
    pub const NO_STATE: ExitCode = ExitCode(0xfffe);
    pub const UNKNOWN_OP: ExitCode = ExitCode(0xffff);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExitCode({} / {:#x})", self.0, self.0)
    }
}

impl From<CodecError> for ExitCode {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::BitOverflow { .. }
            | CodecError::RefOverflow { .. }
            | CodecError::ValueTooLarge { .. } => ExitCode::CELL_OVERFLOW,
            _ => ExitCode::CELL_UNDERFLOW,
        }
    }
}
