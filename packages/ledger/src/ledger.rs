//! Simulated ledger
//!
//! Accounts exchange messages through one FIFO queue. Every delivery is its
//! own transaction: a failing receiver rolls back only itself, and a
//! bounceable message then returns its leftover value to the sender.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use launchpad_codec::{cell::store_snake_bytes, Address, Builder, Cell, Header};
use tracing::{debug, info, warn};

use crate::account::{Account, AccountKind, AccountStatus};
use crate::code::{CodeRegistry, ContractCode};
use crate::config::{FeeSchedule, LedgerConfig};
use crate::context::{plan_sends, Action, ExecutionContext, GetterContext, StackValue};
use crate::error::{LedgerError, LedgerResult};
use crate::exit_code::ExitCode;
use crate::fault::FaultInjector;
use crate::message::{bounce_body, InternalMessage, OutboundMessage};
use crate::trace::{SendResult, SentMessage, Transaction};

pub struct Ledger {
    config: LedgerConfig,
    registry: CodeRegistry,
    accounts: HashMap<Address, Account>,
    queue: VecDeque<InternalMessage>,
    faults: FaultInjector,
    lt: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            registry: CodeRegistry::new(),
            accounts: HashMap::new(),
            queue: VecDeque::new(),
            faults: FaultInjector::default(),
            lt: 0,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.config.fees
    }

    pub fn workchain(&self) -> i8 {
        self.config.workchain
    }

    pub fn register_code(&mut self, code: &Cell, implementation: Arc<dyn ContractCode>) {
        self.registry.register(code, implementation);
    }

    pub fn registry(&self) -> &CodeRegistry {
        &self.registry
    }

    pub fn faults(&mut self) -> &mut FaultInjector {
        &mut self.faults
    }

    // ============================================================
    // ACCOUNTS
    // ============================================================

    /// Funded external wallet, created on first use
    pub fn treasury(&mut self, name: &str) -> LedgerResult<Address> {
        let mut b = Builder::new();
        b.store_uint(0x7472_6561, 32)?; // "trea"
        store_snake_bytes(&mut b, name.as_bytes())?;
        let address = Address::new(self.config.workchain, b.end_cell().hash());

        let balance = self.config.treasury_balance;
        self.accounts
            .entry(address)
            .or_insert_with(|| Account::treasury(address, balance));
        Ok(address)
    }

    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn balance(&self, address: &Address) -> u128 {
        self.accounts.get(address).map_or(0, |a| a.balance)
    }

    pub fn is_active(&self, address: &Address) -> bool {
        self.accounts.get(address).map_or(false, |a| a.is_active())
    }

    /// Current storage of a contract account
    pub fn data(&self, address: &Address) -> Option<&Cell> {
        self.accounts.get(address).and_then(|a| a.data.as_ref())
    }

    pub fn code(&self, address: &Address) -> Option<&Cell> {
        self.accounts.get(address).and_then(|a| a.code.as_ref())
    }

    // ============================================================
    // SENDING
    // ============================================================

    /// Send from a treasury and process the whole resulting cascade
    pub fn send(&mut self, from: Address, msg: OutboundMessage) -> LedgerResult<SendResult> {
        let forward_fee = self.config.fees.forward_fee;
        let account = self
            .accounts
            .get_mut(&from)
            .ok_or(LedgerError::UnknownAccount(from))?;
        if account.kind != AccountKind::Treasury {
            return Err(LedgerError::NotATreasury(from));
        }
        let need = msg.value.saturating_add(forward_fee);
        if account.balance < need {
            return Err(LedgerError::InsufficientBalance {
                address: from,
                have: account.balance,
                need,
            });
        }
        account.balance -= need;

        self.queue.push_back(InternalMessage {
            src: from,
            dest: msg.dest,
            value: msg.value,
            bounce: msg.bounce,
            bounced: false,
            body: msg.body,
            state_init: msg.state_init,
        });
        self.run_queue()
    }

    /// Deliver every message parked by a hold rule, in the order they were parked
    pub fn release_held(&mut self) -> LedgerResult<SendResult> {
        let held = self.faults.take_held();
        self.queue.extend(held);
        self.run_queue()
    }

    fn run_queue(&mut self) -> LedgerResult<SendResult> {
        let mut result = SendResult::default();
        while let Some(msg) = self.queue.pop_front() {
            if result.transactions.len() >= self.config.max_transactions {
                self.queue.clear();
                return Err(LedgerError::StepLimitExceeded(self.config.max_transactions));
            }
            let Some(msg) = self.faults.hold_or_pass(msg) else {
                continue;
            };
            let tx = self.process(msg)?;
            result.transactions.push(tx);
        }
        Ok(result)
    }

    fn process(&mut self, msg: InternalMessage) -> LedgerResult<Transaction> {
        self.lt += 1;
        let lt = self.lt;
        let fees = self.config.fees.clone();
        let workchain = self.config.workchain;
        let forced = self.faults.take_match(&msg);

        let mut tx = Transaction {
            lt,
            from: msg.src,
            to: msg.dest,
            op: msg.op(),
            value: msg.value,
            bounced: msg.bounced,
            deployed: false,
            success: false,
            exit_code: ExitCode::SUCCESS,
            out_messages: Vec::new(),
            events: Vec::new(),
        };
        debug!(lt, from = %msg.src, to = %msg.dest, op = ?tx.op, value = msg.value, bounced = msg.bounced, "delivering message");

        let account = self
            .accounts
            .entry(msg.dest)
            .or_insert_with(|| Account::uninit(msg.dest));
        account.balance = account.balance.saturating_add(msg.value);

        if account.kind == AccountKind::Treasury {
            tx.success = true;
            return Ok(tx);
        }

        let (code, data, deploying) = if account.is_active() {
            (account.code.clone(), account.data.clone(), false)
        } else {
            match &msg.state_init {
                Some(init) if init.address(workchain)? == msg.dest => {
                    (Some(init.code.clone()), Some(init.data.clone()), true)
                }
                _ => (None, None, false),
            }
        };

        let (Some(code), Some(data)) = (code, data) else {
            return self.abort(tx, &msg, ExitCode::NO_STATE, msg.value);
        };
        if msg.value < fees.compute_fee {
            return self.abort(tx, &msg, ExitCode::OUT_OF_GAS, msg.value);
        }
        let Some(implementation) = self.registry.resolve(&code) else {
            return self.abort(tx, &msg, ExitCode::INVALID_CODE, msg.value);
        };

        // ---- compute ----
        let balance = self.balance(&msg.dest) - fees.compute_fee;
        let remaining = msg.value - fees.compute_fee;
        self.set_balance(&msg.dest, balance);

        let mut ctx = ExecutionContext::new(msg.dest, balance, remaining, data, &fees, workchain, lt);
        let outcome = match forced {
            Some(code) => Err(code),
            None => implementation.receive(&mut ctx, &msg),
        };
        let (new_data, actions, events) = ctx.into_parts();
        if let Err(code) = outcome {
            return self.abort(tx, &msg, code, remaining);
        }

        // ---- action ----
        let (balance, planned) = match plan_sends(balance, remaining, &fees, &actions) {
            Ok(plan) => plan,
            Err(code) => return self.abort(tx, &msg, code, remaining),
        };
        let mut new_code = None;
        for action in &actions {
            if let Action::SetCode(next) = action {
                if !self.registry.contains(next) {
                    return self.abort(tx, &msg, ExitCode::INVALID_CODE, remaining);
                }
                new_code = Some(next.clone());
            }
        }

        // ---- commit ----
        if let Some(account) = self.accounts.get_mut(&msg.dest) {
            account.balance = balance;
            account.data = Some(new_data);
            account.code = Some(new_code.unwrap_or(code));
            if deploying {
                account.status = AccountStatus::Active;
                tx.deployed = true;
                info!(address = %msg.dest, contract = implementation.name(), "contract deployed");
            }
        }
        for send in planned {
            tx.out_messages.push(SentMessage {
                dest: send.msg.dest,
                value: send.delivered,
                op: Header::peek(&send.msg.body).map(|h| h.op),
                bounced: false,
            });
            self.queue.push_back(InternalMessage {
                src: msg.dest,
                dest: send.msg.dest,
                value: send.delivered,
                bounce: send.msg.bounce,
                bounced: false,
                body: send.msg.body,
                state_init: send.msg.state_init,
            });
        }
        for event in &events {
            debug!(address = %msg.dest, topic = event.topic, fields = ?event.fields, "event");
        }
        tx.events = events;
        tx.success = true;
        Ok(tx)
    }

    /// Fail the transaction and bounce `remaining` (less the forward fee) if the message allows it
    fn abort(
        &mut self,
        mut tx: Transaction,
        msg: &InternalMessage,
        exit_code: ExitCode,
        remaining: u128,
    ) -> LedgerResult<Transaction> {
        tx.success = false;
        tx.exit_code = exit_code;
        warn!(to = %msg.dest, from = %msg.src, op = ?tx.op, %exit_code, "transaction failed");

        let forward_fee = self.config.fees.forward_fee;
        if msg.bounce && !msg.bounced && remaining > forward_fee {
            let value = remaining - forward_fee;
            let balance = self.balance(&msg.dest).saturating_sub(remaining);
            self.set_balance(&msg.dest, balance);

            tx.out_messages.push(SentMessage {
                dest: msg.src,
                value,
                op: None,
                bounced: true,
            });
            self.queue.push_back(InternalMessage {
                src: msg.dest,
                dest: msg.src,
                value,
                bounce: false,
                bounced: true,
                body: bounce_body(&msg.body)?,
                state_init: None,
            });
        }
        Ok(tx)
    }

    fn set_balance(&mut self, address: &Address, balance: u128) {
        if let Some(account) = self.accounts.get_mut(address) {
            account.balance = balance;
        }
    }

    // ============================================================
    // GETTERS
    // ============================================================

    pub fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: &[StackValue],
    ) -> LedgerResult<Vec<StackValue>> {
        let account = self
            .accounts
            .get(address)
            .ok_or(LedgerError::UnknownAccount(*address))?;
        let (Some(code), Some(data)) = (account.code.as_ref(), account.data.as_ref()) else {
            return Err(LedgerError::AccountNotActive(*address));
        };
        if !account.is_active() {
            return Err(LedgerError::AccountNotActive(*address));
        }
        let implementation = self
            .registry
            .resolve(code)
            .ok_or(LedgerError::CodeNotRegistered(*address))?;

        let ctx = GetterContext {
            address: *address,
            balance: account.balance,
            data,
            fees: &self.config.fees,
            workchain: self.config.workchain,
        };
        implementation
            .get_method(&ctx, method, args)
            .map_err(|exit_code| LedgerError::GetMethodFailed {
                method: method.to_string(),
                exit_code,
            })
    }
}
