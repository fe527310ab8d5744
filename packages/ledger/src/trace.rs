//! Transaction trace of one outside send

use launchpad_codec::Address;

use crate::context::Event;
use crate::exit_code::ExitCode;

/// Outbound message as recorded in the trace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMessage {
    pub dest: Address,
    pub value: u128,
    pub op: Option<u32>,
    pub bounced: bool,
}

/// One delivered message and what it did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub lt: u64,
    pub from: Address,
    pub to: Address,
    /// Op of the inbound body; `None` for empty bodies and bounces
    pub op: Option<u32>,
    pub value: u128,
    /// Inbound message was itself a bounce
    pub bounced: bool,
    /// State init was applied by this transaction
    pub deployed: bool,
    pub success: bool,
    pub exit_code: ExitCode,
    pub out_messages: Vec<SentMessage>,
    pub events: Vec<Event>,
}

impl Transaction {
    pub fn event(&self, topic: &str) -> Option<&crate::context::Event> {
        self.events.iter().find(|e| e.topic == topic)
    }
}

/// Criteria for locating a transaction; unset fields match anything
#[derive(Clone, Debug, Default)]
pub struct TxFilter {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub op: Option<u32>,
    pub success: Option<bool>,
    pub exit_code: Option<ExitCode>,
    pub deployed: Option<bool>,
    pub bounced: Option<bool>,
}

impl TxFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, address: Address) -> Self {
        self.from = Some(address);
        self
    }

    pub fn to(mut self, address: Address) -> Self {
        self.to = Some(address);
        self
    }

    pub fn op(mut self, op: u32) -> Self {
        self.op = Some(op);
        self
    }

    pub fn success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn exit_code(mut self, code: ExitCode) -> Self {
        self.exit_code = Some(code);
        self
    }

    pub fn deployed(mut self, deployed: bool) -> Self {
        self.deployed = Some(deployed);
        self
    }

    pub fn bounced(mut self, bounced: bool) -> Self {
        self.bounced = Some(bounced);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.from.map_or(true, |a| a == tx.from)
            && self.to.map_or(true, |a| a == tx.to)
            && self.op.map_or(true, |op| Some(op) == tx.op)
            && self.success.map_or(true, |s| s == tx.success)
            && self.exit_code.map_or(true, |c| c == tx.exit_code)
            && self.deployed.map_or(true, |d| d == tx.deployed)
            && self.bounced.map_or(true, |b| b == tx.bounced)
    }
}

/// Every transaction caused by one outside send, in processing order
#[derive(Clone, Debug, Default)]
pub struct SendResult {
    pub transactions: Vec<Transaction>,
}

impl SendResult {
    pub fn find(&self, filter: &TxFilter) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| filter.matches(tx))
    }

    pub fn has(&self, filter: &TxFilter) -> bool {
        self.find(filter).is_some()
    }

    pub fn count(&self, filter: &TxFilter) -> usize {
        self.transactions.iter().filter(|tx| filter.matches(tx)).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|tx| !tx.success)
    }

    pub fn all_succeeded(&self) -> bool {
        self.transactions.iter().all(|tx| tx.success)
    }

    /// All events of a topic across the cascade
    pub fn events<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.transactions
            .iter()
            .flat_map(|tx| tx.events.iter())
            .filter(move |e| e.topic == topic)
    }
}
