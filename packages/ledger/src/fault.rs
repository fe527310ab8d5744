//! Fault injection for partial-failure tests, and delayed delivery for
//! reordering across contract pairs

use std::collections::VecDeque;

use launchpad_codec::Address;

use crate::exit_code::ExitCode;
use crate::message::InternalMessage;

/// Forces the next matching delivery to fail in its compute phase
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultRule {
    pub to: Option<Address>,
    pub op: Option<u32>,
    pub exit_code: ExitCode,
}

impl FaultRule {
    pub fn new(exit_code: ExitCode) -> Self {
        Self {
            to: None,
            op: None,
            exit_code,
        }
    }

    pub fn to(mut self, address: Address) -> Self {
        self.to = Some(address);
        self
    }

    pub fn op(mut self, op: u32) -> Self {
        self.op = Some(op);
        self
    }

    fn matches(&self, msg: &InternalMessage) -> bool {
        delivery_matches(self.to, self.op, msg)
    }
}

/// Parks the next matching message until `Ledger::release_held`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoldRule {
    pub to: Option<Address>,
    pub op: Option<u32>,
}

impl HoldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(mut self, address: Address) -> Self {
        self.to = Some(address);
        self
    }

    pub fn op(mut self, op: u32) -> Self {
        self.op = Some(op);
        self
    }
}

fn delivery_matches(to: Option<Address>, op: Option<u32>, msg: &InternalMessage) -> bool {
    to.map_or(true, |a| a == msg.dest) && op.map_or(true, |op| Some(op) == msg.op())
}

/// One-shot rules, consumed in insertion order
#[derive(Clone, Debug, Default)]
pub struct FaultInjector {
    rules: Vec<FaultRule>,
    holds: Vec<HoldRule>,
    held: VecDeque<InternalMessage>,
}

impl FaultInjector {
    pub fn fail_next(&mut self, rule: FaultRule) {
        self.rules.push(rule);
    }

    pub fn hold_next(&mut self, rule: HoldRule) {
        self.holds.push(rule);
    }

    pub fn pending(&self) -> usize {
        self.rules.len()
    }

    /// Messages parked by a hold rule and not yet released
    pub fn held(&self) -> usize {
        self.held.len()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
        self.holds.clear();
    }

    pub(crate) fn take_match(&mut self, msg: &InternalMessage) -> Option<ExitCode> {
        let index = self.rules.iter().position(|r| r.matches(msg))?;
        Some(self.rules.remove(index).exit_code)
    }

    /// Parks `msg` if a hold rule matches, otherwise hands it back
    pub(crate) fn hold_or_pass(&mut self, msg: InternalMessage) -> Option<InternalMessage> {
        match self.holds.iter().position(|r| delivery_matches(r.to, r.op, &msg)) {
            Some(index) => {
                self.holds.remove(index);
                self.held.push_back(msg);
                None
            }
            None => Some(msg),
        }
    }

    pub(crate) fn take_held(&mut self) -> VecDeque<InternalMessage> {
        std::mem::take(&mut self.held)
    }
}
