//! What a contract sees while it runs

use launchpad_codec::{Address, Cell, StateInit};

use crate::config::FeeSchedule;
use crate::exit_code::ExitCode;
use crate::message::{OutboundMessage, SendMode};

// ============================================================
// STACK VALUES
// ============================================================

/// Getter argument or result
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackValue {
    Int(u128),
    Cell(Cell),
    Address(Address),
    Null,
}

impl StackValue {
    pub fn as_int(&self) -> Option<u128> {
        match self {
            StackValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_cell(&self) -> Option<&Cell> {
        match self {
            StackValue::Cell(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            StackValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StackValue::Null)
    }
}

pub fn int_arg(args: &[StackValue], index: usize) -> Result<u128, ExitCode> {
    args.get(index)
        .ok_or(ExitCode::STACK_UNDERFLOW)?
        .as_int()
        .ok_or(ExitCode::TYPE_CHECK)
}

pub fn cell_arg(args: &[StackValue], index: usize) -> Result<&Cell, ExitCode> {
    args.get(index)
        .ok_or(ExitCode::STACK_UNDERFLOW)?
        .as_cell()
        .ok_or(ExitCode::TYPE_CHECK)
}

pub fn address_arg(args: &[StackValue], index: usize) -> Result<Address, ExitCode> {
    args.get(index)
        .ok_or(ExitCode::STACK_UNDERFLOW)?
        .as_address()
        .ok_or(ExitCode::TYPE_CHECK)
}

// ============================================================
// EVENTS
// ============================================================

/// Structured event emitted by a contract and kept in the transaction trace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub topic: &'static str,
    pub fields: Vec<(&'static str, StackValue)>,
}

impl Event {
    pub fn new(topic: &'static str) -> Self {
        Self {
            topic,
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: StackValue) -> Self {
        self.fields.push((key, value));
        self
    }

    pub fn field(&self, key: &str) -> Option<&StackValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

// ============================================================
// EXECUTION
// ============================================================

/// Action queued by a handler; applied only if the handler succeeds
#[derive(Clone, Debug)]
pub enum Action {
    Send(OutboundMessage, SendMode),
    SetCode(Cell),
}

/// Mutable view of one account during a transaction
pub struct ExecutionContext<'a> {
    address: Address,
    balance: u128,
    remaining_value: u128,
    data: Cell,
    fees: &'a FeeSchedule,
    workchain: i8,
    lt: u64,
    pub(crate) actions: Vec<Action>,
    pub(crate) events: Vec<Event>,
}

impl<'a> ExecutionContext<'a> {
    pub(crate) fn new(
        address: Address,
        balance: u128,
        remaining_value: u128,
        data: Cell,
        fees: &'a FeeSchedule,
        workchain: i8,
        lt: u64,
    ) -> Self {
        Self {
            address,
            balance,
            remaining_value,
            data,
            fees,
            workchain,
            lt,
            actions: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Balance after the inbound value was credited and compute was paid
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Inbound value left after compute; what `CARRY_REMAINING_VALUE` adds
    pub fn remaining_value(&self) -> u128 {
        self.remaining_value
    }

    pub fn fees(&self) -> &FeeSchedule {
        self.fees
    }

    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    /// Logical time of this transaction, usable as a query id
    pub fn lt(&self) -> u64 {
        self.lt
    }

    pub fn data(&self) -> &Cell {
        &self.data
    }

    pub fn set_data(&mut self, data: Cell) {
        self.data = data;
    }

    pub fn send(&mut self, msg: OutboundMessage, mode: SendMode) {
        self.actions.push(Action::Send(msg, mode));
    }

    /// Replace the account's code once this transaction commits
    pub fn set_code(&mut self, code: Cell) {
        self.actions.push(Action::SetCode(code));
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Address of a contract with the given code and data on this workchain
    pub fn address_of(&self, init: &StateInit) -> Result<Address, ExitCode> {
        Ok(init.address(self.workchain)?)
    }

    pub(crate) fn into_parts(self) -> (Cell, Vec<Action>, Vec<Event>) {
        (self.data, self.actions, self.events)
    }
}

/// Read-only view for get methods
pub struct GetterContext<'a> {
    pub address: Address,
    pub balance: u128,
    pub data: &'a Cell,
    pub fees: &'a FeeSchedule,
    pub workchain: i8,
}

impl GetterContext<'_> {
    pub fn address_of(&self, init: &StateInit) -> Result<Address, ExitCode> {
        Ok(init.address(self.workchain)?)
    }
}

// ============================================================
// SEND PLANNING
// ============================================================

/// Outbound message with the value it will actually deliver
#[derive(Clone, Debug)]
pub(crate) struct PlannedSend {
    pub msg: OutboundMessage,
    pub delivered: u128,
}

/// Apply send-mode rules to the queued sends in order.
///
/// Returns the balance left afterwards. `CARRY_REMAINING_VALUE` hands the
/// leftover inbound value to the first message that asks for it.
pub(crate) fn plan_sends(
    mut balance: u128,
    mut remaining_value: u128,
    fees: &FeeSchedule,
    actions: &[Action],
) -> Result<(u128, Vec<PlannedSend>), ExitCode> {
    let mut planned = Vec::new();
    for action in actions {
        let (msg, mode) = match action {
            Action::Send(msg, mode) => (msg, *mode),
            Action::SetCode(_) => continue,
        };

        let mut value = msg.value;
        let mut separately = mode.contains(SendMode::PAY_FEES_SEPARATELY);
        if mode.contains(SendMode::CARRY_ALL_BALANCE) {
            value = balance;
            separately = false;
        } else if mode.contains(SendMode::CARRY_REMAINING_VALUE) {
            value = value.saturating_add(remaining_value);
            remaining_value = 0;
        }

        let (debit, delivered) = if separately {
            (value.checked_add(fees.forward_fee), Some(value))
        } else {
            (Some(value), value.checked_sub(fees.forward_fee))
        };

        match (debit, delivered) {
            (Some(debit), Some(delivered)) if debit <= balance => {
                balance -= debit;
                planned.push(PlannedSend {
                    msg: msg.clone(),
                    delivered,
                });
            }
            _ if mode.contains(SendMode::IGNORE_ERRORS) => {
                tracing::debug!(dest = %msg.dest, value, "outbound message skipped");
            }
            _ => return Err(ExitCode::NOT_ENOUGH_BALANCE),
        }
    }
    Ok((balance, planned))
}

impl ExecutionContext<'_> {
    /// Balance left once the sends queued so far are paid for
    pub fn projected_balance(&self) -> Result<u128, ExitCode> {
        plan_sends(self.balance, self.remaining_value, self.fees, &self.actions).map(|(b, _)| b)
    }
}
