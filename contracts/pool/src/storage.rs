// Pool storage layout
//
// `J0 J Tv T0 : coins` `fee_per_mille : uint16` `jetton_wallet : Maybe addr`
// `^[factory minter admin:Maybe addr]` `is_inited : bit`
//
// Newer code versions may append fields; the loader stops after `is_inited`.

use launchpad_codec::{Builder, Cell, CodecResult};

use crate::types::PoolState;

pub fn load_pool_state(data: &Cell) -> CodecResult<PoolState> {
    let mut s = data.parse();
    let initial_jetton_balance = s.load_coins()?;
    let virtual_jetton_balance = s.load_coins()?;
    let virtual_ton_balance = s.load_coins()?;
    let base_ton_liquidity = s.load_coins()?;
    let fee_per_mille = s.load_u16()?;
    let jetton_wallet = s.load_maybe_address()?;
    let mut ids = s.load_ref()?.parse();
    let factory = ids.load_address()?;
    let minter = ids.load_address()?;
    let admin = ids.load_maybe_address()?;
    let is_inited = s.load_bit()?;

    Ok(PoolState {
        initial_jetton_balance,
        virtual_jetton_balance,
        virtual_ton_balance,
        base_ton_liquidity,
        fee_per_mille,
        jetton_wallet,
        factory,
        minter,
        admin,
        is_inited,
    })
}

pub fn store_pool_state(state: &PoolState) -> CodecResult<Cell> {
    let mut ids = Builder::new();
    ids.store_address(&state.factory)?
        .store_address(&state.minter)?
        .store_maybe_address(state.admin.as_ref())?;

    let mut b = Builder::new();
    b.store_coins(state.initial_jetton_balance)?
        .store_coins(state.virtual_jetton_balance)?
        .store_coins(state.virtual_ton_balance)?
        .store_coins(state.base_ton_liquidity)?
        .store_uint(state.fee_per_mille as u128, 16)?
        .store_maybe_address(state.jetton_wallet.as_ref())?
        .store_ref(ids.end_cell())?
        .store_bit(state.is_inited)?;
    Ok(b.end_cell())
}
