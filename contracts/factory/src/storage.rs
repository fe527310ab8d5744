// Factory storage layout
//
// `admin : addr` `fee_per_mille : uint16` `max_deployer_supply_percent : uint8`
// `^minter_code ^wallet_code ^pool_code` `next_deployment_id : uint64`
// `previous_pool_code : (Maybe ^Cell)` `is_inited : bit`

use launchpad_codec::{Builder, Cell, CodecResult};

use crate::types::{FactoryConfig, FactoryParams};

pub fn load_factory_config(data: &Cell) -> CodecResult<FactoryConfig> {
    let mut s = data.parse();
    let params = FactoryParams {
        admin: s.load_address()?,
        fee_per_mille: s.load_u16()?,
        max_deployer_supply_percent: s.load_u8()?,
    };
    Ok(FactoryConfig {
        params,
        minter_code: s.load_ref()?.clone(),
        wallet_code: s.load_ref()?.clone(),
        pool_code: s.load_ref()?.clone(),
        next_deployment_id: s.load_u64()?,
        previous_pool_code: s.load_maybe_ref()?.cloned(),
        is_inited: s.load_bit()?,
    })
}

pub fn store_factory_config(config: &FactoryConfig) -> CodecResult<Cell> {
    let mut b = Builder::new();
    b.store_address(&config.params.admin)?
        .store_uint(config.params.fee_per_mille as u128, 16)?
        .store_uint(config.params.max_deployer_supply_percent as u128, 8)?
        .store_ref(config.minter_code.clone())?
        .store_ref(config.wallet_code.clone())?
        .store_ref(config.pool_code.clone())?
        .store_uint(config.next_deployment_id as u128, 64)?
        .store_maybe_ref(config.previous_pool_code.clone())?
        .store_bit(config.is_inited)?;
    Ok(b.end_cell())
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_codec::Address;

    fn code(tag: u128) -> Cell {
        let mut b = Builder::new();
        b.store_uint(tag, 32).unwrap();
        b.end_cell()
    }

    #[test]
    fn test_loader_ignores_appended_fields() {
        let config = FactoryConfig {
            params: FactoryParams {
                admin: Address::new(0, [3; 32]),
                fee_per_mille: 10,
                max_deployer_supply_percent: 5,
            },
            minter_code: code(1),
            wallet_code: code(2),
            pool_code: code(3),
            previous_pool_code: Some(code(4)),
            next_deployment_id: 7,
            is_inited: true,
        };
        let data = store_factory_config(&config).unwrap();

        // a later version appending a counter after the known fields
        let mut b = Builder::new();
        b.store_address(&config.params.admin)
            .unwrap()
            .store_uint(10, 16)
            .unwrap()
            .store_uint(5, 8)
            .unwrap()
            .store_ref(code(1))
            .unwrap()
            .store_ref(code(2))
            .unwrap()
            .store_ref(code(3))
            .unwrap()
            .store_uint(7, 64)
            .unwrap()
            .store_maybe_ref(Some(code(4)))
            .unwrap()
            .store_bit(true)
            .unwrap()
            .store_uint(42, 64)
            .unwrap();
        let extended = b.end_cell();

        assert_eq!(load_factory_config(&data).unwrap(), config);
        assert_eq!(load_factory_config(&extended).unwrap(), config);
    }

    #[test]
    fn test_initialized_flag_is_last_bit() {
        let mut config = FactoryConfig::new(
            FactoryParams {
                admin: Address::new(0, [3; 32]),
                fee_per_mille: 10,
                max_deployer_supply_percent: 5,
            },
            code(1),
            code(2),
            code(3),
        )
        .unwrap();
        let data = store_factory_config(&config).unwrap();
        let mut s = data.parse();
        s.load_address().unwrap();
        s.load_u16().unwrap();
        s.load_u8().unwrap();
        assert_eq!(s.load_u64().unwrap(), 0);
        assert!(s.load_maybe_ref().unwrap().is_none());
        assert!(s.load_bit().unwrap());
        assert_eq!(s.bits_left(), 0);

        config.is_inited = false;
        let data = store_factory_config(&config).unwrap();
        assert!(!load_factory_config(&data).unwrap().is_inited);
    }
}
