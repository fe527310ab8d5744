use launchpad_codec::{Address, Builder, Cell, CodecError, StateInit, MAX_BITS, MAX_COINS};

fn address(byte: u8) -> Address {
    Address::new(0, [byte; 32])
}

#[test]
fn test_uint_roundtrip_keeps_bit_width() {
    let mut b = Builder::new();
    b.store_uint(5, 3).unwrap().store_uint(0xabcd, 16).unwrap();
    let cell = b.end_cell();
    assert_eq!(cell.bit_len(), 19);

    let mut s = cell.parse();
    assert_eq!(s.load_uint(3).unwrap(), 5);
    assert_eq!(s.load_uint(16).unwrap(), 0xabcd);
    s.end_parse().unwrap();
}

#[test]
fn test_uint_rejects_value_wider_than_field() {
    let mut b = Builder::new();
    assert_eq!(
        b.store_uint(8, 3).unwrap_err(),
        CodecError::ValueTooLarge { bits: 3 }
    );
}

#[test]
fn test_cell_overflow_at_1023_bits() {
    let mut b = Builder::new();
    b.store_uint(0, 120).unwrap();
    for _ in 0..7 {
        b.store_uint(0, 128).unwrap();
    }
    assert_eq!(b.bits_left(), MAX_BITS - 1016);
    let err = b.store_uint(0, 8).unwrap_err();
    assert!(matches!(err, CodecError::BitOverflow { requested: 8, .. }));
}

#[test]
fn test_ref_overflow() {
    let mut b = Builder::new();
    for _ in 0..4 {
        b.store_ref(Cell::empty()).unwrap();
    }
    assert_eq!(b.store_ref(Cell::empty()).unwrap_err(), CodecError::RefOverflow { max: 4 });
}

#[test]
fn test_coins_width_tracks_value() {
    let mut b = Builder::new();
    b.store_coins(0).unwrap();
    assert_eq!(b.clone().end_cell().bit_len(), 4);

    let mut b = Builder::new();
    b.store_coins(1_000_000_000).unwrap(); // 4 bytes
    assert_eq!(b.end_cell().bit_len(), 4 + 32);

    let mut b = Builder::new();
    b.store_coins(MAX_COINS).unwrap();
    let cell = b.end_cell();
    assert_eq!(cell.parse().load_coins().unwrap(), MAX_COINS);
}

#[test]
fn test_coins_above_120_bits_rejected() {
    let mut b = Builder::new();
    assert!(b.store_coins(MAX_COINS + 1).is_err());
}

#[test]
fn test_underflow_reports_available_bits() {
    let mut b = Builder::new();
    b.store_uint(1, 4).unwrap();
    let cell = b.end_cell();
    let mut s = cell.parse();
    assert_eq!(
        s.load_uint(8).unwrap_err(),
        CodecError::BitUnderflow { requested: 8, available: 4 }
    );
}

#[test]
fn test_address_and_addr_none() {
    let mut b = Builder::new();
    b.store_address(&address(7)).unwrap();
    b.store_maybe_address(None).unwrap();
    let cell = b.end_cell();
    assert_eq!(cell.bit_len(), Address::BITS + 2);

    let mut s = cell.parse();
    assert_eq!(s.load_address().unwrap(), address(7));
    assert_eq!(s.load_address().unwrap_err(), CodecError::MissingAddress);
}

#[test]
fn test_negative_workchain_survives_encoding() {
    let master = Address::new(-1, [3u8; 32]);
    let mut b = Builder::new();
    b.store_address(&master).unwrap();
    assert_eq!(b.end_cell().parse().load_address().unwrap(), master);
}

#[test]
fn test_address_string_form() {
    let addr = address(0xab);
    let text = addr.to_string();
    assert!(text.starts_with("0:abab"));
    assert_eq!(text.parse::<Address>().unwrap(), addr);
    assert!("0:zz".parse::<Address>().is_err());
    assert!("nocolon".parse::<Address>().is_err());
}

#[test]
fn test_address_serde_as_string() {
    let addr = address(1);
    let json = serde_json::to_string(&addr).unwrap();
    assert_eq!(json, format!("\"{addr}\""));
    let back: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(back, addr);
}

#[test]
fn test_hash_depends_on_refs() {
    let mut a = Builder::new();
    a.store_uint(1, 8).unwrap();
    let mut b = Builder::new();
    b.store_uint(1, 8).unwrap().store_ref(Cell::empty()).unwrap();
    assert_ne!(a.end_cell().hash(), b.end_cell().hash());
}

#[test]
fn test_state_init_address_is_deterministic() {
    let mut code = Builder::new();
    code.store_bytes(b"pool").unwrap();
    let mut data = Builder::new();
    data.store_coins(1_000_000).unwrap();
    let init = StateInit::new(code.end_cell(), data.end_cell());

    let first = init.address(0).unwrap();
    let second = init.clone().address(0).unwrap();
    assert_eq!(first, second);

    let mut other_data = Builder::new();
    other_data.store_coins(1_000_001).unwrap();
    let other = StateInit::new(init.code.clone(), other_data.end_cell());
    assert_ne!(first, other.address(0).unwrap());
}

mod snake {
    use launchpad_codec::jetton::{offchain_content, parse_offchain_content};
    use launchpad_codec::Cell;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fuzz_long_uri_spans_chained_cells(uri in "[ -~]{0,600}") {
            let content = offchain_content(&uri).unwrap();
            // 126 bytes fit next to the prefix byte, 127 in every chained cell
            let expected = 1 + (uri.len().saturating_sub(126) + 126) / 127;
            let mut depth = 1;
            let mut cell = content.clone();
            while let Some(next) = cell.refs().first().map(|c| Cell::clone(c)) {
                depth += 1;
                cell = next;
            }
            prop_assert_eq!(depth, expected);
            prop_assert_eq!(parse_offchain_content(&content).unwrap(), uri);
        }
    }
}
