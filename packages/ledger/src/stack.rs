//! Decoding getter results on the caller side

use std::slice::Iter;

use launchpad_codec::{Address, Cell};

use crate::context::StackValue;
use crate::error::{LedgerError, LedgerResult};

/// Sequential reader over a get method's result stack
pub struct StackReader<'a> {
    method: &'a str,
    items: Iter<'a, StackValue>,
}

impl<'a> StackReader<'a> {
    pub fn new(method: &'a str, stack: &'a [StackValue]) -> Self {
        Self {
            method,
            items: stack.iter(),
        }
    }

    fn malformed(&self) -> LedgerError {
        LedgerError::MalformedStack(self.method.to_string())
    }

    fn next_value(&mut self) -> LedgerResult<&'a StackValue> {
        match self.items.next() {
            Some(value) => Ok(value),
            None => Err(self.malformed()),
        }
    }

    pub fn read_int(&mut self) -> LedgerResult<u128> {
        let value = self.next_value()?;
        value.as_int().ok_or_else(|| self.malformed())
    }

    /// `Null` reads as `None`
    pub fn read_maybe_int(&mut self) -> LedgerResult<Option<u128>> {
        match self.next_value()? {
            StackValue::Null => Ok(None),
            StackValue::Int(v) => Ok(Some(*v)),
            _ => Err(self.malformed()),
        }
    }

    pub fn read_cell(&mut self) -> LedgerResult<Cell> {
        let value = self.next_value()?;
        value.as_cell().cloned().ok_or_else(|| self.malformed())
    }

    pub fn read_address(&mut self) -> LedgerResult<Address> {
        let value = self.next_value()?;
        value.as_address().ok_or_else(|| self.malformed())
    }

    pub fn read_maybe_address(&mut self) -> LedgerResult<Option<Address>> {
        match self.next_value()? {
            StackValue::Null => Ok(None),
            StackValue::Address(a) => Ok(Some(*a)),
            _ => Err(self.malformed()),
        }
    }
}
