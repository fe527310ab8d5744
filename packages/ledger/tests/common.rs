#![allow(dead_code)]

use std::sync::Arc;

use launchpad_codec::{Address, Builder, Cell, Header, StateInit};
use launchpad_ledger::{
    code_cell, int_arg, parse_bounced, ContractCode, Event, ExecutionContext, ExitCode,
    GetterContext, InternalMessage, Ledger, LedgerConfig, OutboundMessage, SendMode, StackValue,
};

// Test constants
pub const OP_INCREMENT: u32 = 1;
pub const OP_FAIL: u32 = 2;
pub const OP_BATCH: u32 = 3;
pub const OP_SET_CODE: u32 = 4;
pub const OP_TAG: u32 = 5;
pub const OP_LOOP: u32 = 8;

pub const FAIL_CODE: ExitCode = ExitCode(0x100);
pub const ONE: u128 = 1_000_000_000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Minimal contract: a counter that can also relay messages
pub struct CounterCode {
    pub step: u64,
}

struct CounterState {
    id: u32,
    counter: u64,
    last_tag: u32,
}

impl CounterState {
    fn load(data: &Cell) -> Result<Self, ExitCode> {
        let mut s = data.parse();
        Ok(Self {
            id: s.load_u32()?,
            counter: s.load_u64()?,
            last_tag: s.load_u32()?,
        })
    }
}

pub fn counter_data(id: u32, counter: u64, last_tag: u32) -> Cell {
    let mut b = Builder::new();
    b.store_uint(id as u128, 32)
        .unwrap()
        .store_uint(counter as u128, 64)
        .unwrap()
        .store_uint(last_tag as u128, 32)
        .unwrap();
    b.end_cell()
}

impl ContractCode for CounterCode {
    fn name(&self) -> &str {
        "counter"
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        if msg.bounced {
            let mut s = parse_bounced(&msg.body)?;
            let op = Header::load(&mut s)?.map_or(0, |h| h.op);
            ctx.emit(Event::new("bounced").with("op", StackValue::Int(op as u128)));
            return Ok(());
        }

        let mut s = msg.body.parse();
        let Some(header) = Header::load(&mut s)? else {
            return Ok(());
        };
        let mut state = CounterState::load(ctx.data())?;

        match header.op {
            OP_INCREMENT => state.counter += self.step,
            OP_FAIL => return Err(FAIL_CODE),
            OP_BATCH => {
                state.counter += self.step;
                while s.refs_left() > 0 {
                    let mut spec = s.load_ref()?.parse();
                    let dest = spec.load_address()?;
                    let value = spec.load_coins()?;
                    let mode = SendMode::from_bits(spec.load_u8()?);
                    let bounce = spec.load_bit()?;
                    let body = spec.load_maybe_ref()?.cloned().unwrap_or_default();
                    let mut out = OutboundMessage::new(dest, value, body);
                    out.bounce = bounce;
                    ctx.send(out, mode);
                }
            }
            OP_SET_CODE => ctx.set_code(s.load_ref()?.clone()),
            OP_TAG => {
                let tag = s.load_u32()?;
                state.last_tag = tag;
                state.counter += self.step;
                ctx.emit(Event::new("tag").with("tag", StackValue::Int(tag as u128)));
            }
            OP_LOOP => {
                let me = ctx.address();
                ctx.send(
                    OutboundMessage::new(me, 0, msg.body.clone()),
                    SendMode::CARRY_REMAINING_VALUE,
                );
            }
            _ => return Err(ExitCode::UNKNOWN_OP),
        }

        ctx.set_data(counter_data(state.id, state.counter, state.last_tag));
        Ok(())
    }

    fn get_method(
        &self,
        ctx: &GetterContext<'_>,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        let state = CounterState::load(ctx.data)?;
        match method {
            "counter" => Ok(vec![StackValue::Int(state.counter as u128)]),
            "last_tag" => Ok(vec![StackValue::Int(state.last_tag as u128)]),
            "echo" => Ok(vec![StackValue::Int(int_arg(args, 0)?)]),
            _ => Err(ExitCode::METHOD_NOT_FOUND),
        }
    }
}

pub struct Setup {
    pub ledger: Ledger,
    pub user: Address,
    pub code_v1: Cell,
    pub code_v2: Cell,
}

/// Ledger with default fees and both counter versions registered
pub fn setup_ledger() -> Setup {
    setup_with_config(LedgerConfig::default())
}

pub fn setup_with_config(config: LedgerConfig) -> Setup {
    init_tracing();
    let mut ledger = Ledger::new(config);
    let code_v1 = code_cell("counter", 1).unwrap();
    let code_v2 = code_cell("counter", 2).unwrap();
    ledger.register_code(&code_v1, Arc::new(CounterCode { step: 1 }));
    ledger.register_code(&code_v2, Arc::new(CounterCode { step: 10 }));
    let user = ledger.treasury("user").unwrap();
    Setup {
        ledger,
        user,
        code_v1,
        code_v2,
    }
}

pub fn body(op: u32) -> Cell {
    let mut b = Builder::new();
    b.store_uint(op as u128, 32).unwrap().store_uint(0, 64).unwrap();
    b.end_cell()
}

pub fn tag_body(tag: u32) -> Cell {
    let mut b = Builder::new();
    b.store_uint(OP_TAG as u128, 32)
        .unwrap()
        .store_uint(0, 64)
        .unwrap()
        .store_uint(tag as u128, 32)
        .unwrap();
    b.end_cell()
}

pub fn set_code_body(code: &Cell) -> Cell {
    let mut b = Builder::new();
    b.store_uint(OP_SET_CODE as u128, 32)
        .unwrap()
        .store_uint(0, 64)
        .unwrap()
        .store_ref(code.clone())
        .unwrap();
    b.end_cell()
}

pub fn send_spec(dest: &Address, value: u128, mode: SendMode, bounce: bool, body: Option<Cell>) -> Cell {
    let mut b = Builder::new();
    b.store_address(dest)
        .unwrap()
        .store_coins(value)
        .unwrap()
        .store_uint(mode.bits() as u128, 8)
        .unwrap()
        .store_bit(bounce)
        .unwrap()
        .store_maybe_ref(body)
        .unwrap();
    b.end_cell()
}

pub fn batch_body(specs: Vec<Cell>) -> Cell {
    let mut b = Builder::new();
    b.store_uint(OP_BATCH as u128, 32).unwrap().store_uint(0, 64).unwrap();
    for spec in specs {
        b.store_ref(spec).unwrap();
    }
    b.end_cell()
}

pub fn counter_init(code: &Cell, id: u32) -> StateInit {
    StateInit::new(code.clone(), counter_data(id, 0, 0))
}

/// Deploy a counter funded with `value`; the deploy message increments it once
pub fn deploy_counter(setup: &mut Setup, id: u32, value: u128) -> Address {
    let init = counter_init(&setup.code_v1, id);
    let address = init.address(setup.ledger.workchain()).unwrap();
    let msg = OutboundMessage::new(address, value, body(OP_INCREMENT)).with_state_init(init);
    let result = setup.ledger.send(setup.user, msg).unwrap();
    assert!(result.all_succeeded());
    address
}

pub fn counter(ledger: &Ledger, address: &Address) -> u128 {
    ledger.run_get_method(address, "counter", &[]).unwrap()[0]
        .as_int()
        .unwrap()
}
