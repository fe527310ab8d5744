//! Contract code registry
//!
//! A code cell stands in for compiled bytecode; its hash selects the Rust
//! implementation that runs when a message reaches an account holding it.

use std::collections::HashMap;
use std::sync::Arc;

use launchpad_codec::{cell::store_snake_bytes, Builder, Cell, CodecResult};

use crate::context::{ExecutionContext, GetterContext, StackValue};
use crate::exit_code::ExitCode;
use crate::message::InternalMessage;

/// Behavior attached to a code cell
pub trait ContractCode: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Handle one inbound message. An error rolls back storage and queued actions.
    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode>;

    /// Read-only query against current storage
    fn get_method(
        &self,
        ctx: &GetterContext<'_>,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode>;
}

/// Deterministic code cell for a named, versioned implementation
pub fn code_cell(name: &str, version: u32) -> CodecResult<Cell> {
    let mut b = Builder::new();
    b.store_uint(version as u128, 32)?;
    store_snake_bytes(&mut b, name.as_bytes())?;
    Ok(b.end_cell())
}

#[derive(Default, Clone)]
pub struct CodeRegistry {
    codes: HashMap<[u8; 32], Arc<dyn ContractCode>>,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `code` to `implementation`, replacing any previous binding
    pub fn register(&mut self, code: &Cell, implementation: Arc<dyn ContractCode>) {
        tracing::debug!(name = implementation.name(), "registered contract code");
        self.codes.insert(code.hash(), implementation);
    }

    pub fn resolve(&self, code: &Cell) -> Option<Arc<dyn ContractCode>> {
        self.codes.get(&code.hash()).cloned()
    }

    pub fn contains(&self, code: &Cell) -> bool {
        self.codes.contains_key(&code.hash())
    }
}
