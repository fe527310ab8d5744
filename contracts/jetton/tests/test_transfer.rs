mod common;

use common::*;
use launchpad_codec::op;
use launchpad_jetton::{transfer_required_value, JettonError, JettonWalletContract};
use launchpad_ledger::{ExitCode, FaultRule, TxFilter};

#[test]
fn test_transfer_between_owners() {
    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let t = transfer(400_000, setup.bob, setup.alice, 0);

    let result = alice_wallet
        .send_transfer(&mut setup.ledger, setup.alice, SEND_VALUE, &t)
        .unwrap();
    assert!(result.all_succeeded());

    let bob_wallet = setup.minter.wallet_of(&setup.ledger, setup.bob).unwrap();
    assert!(result.has(&TxFilter::new().from(alice_wallet.address).to(bob_wallet.address).deployed(true)));
    assert!(result.has(&TxFilter::new().from(bob_wallet.address).to(setup.alice).op(op::JETTON_EXCESSES)));
    assert!(!result.has(&TxFilter::new().op(op::JETTON_TRANSFER_NOTIFICATION)));
    assert_eq!(alice_wallet.get_balance(&setup.ledger).unwrap(), MINT_AMOUNT - 400_000);
    assert_eq!(bob_wallet.get_balance(&setup.ledger).unwrap(), 400_000);
}

#[test]
fn test_transfer_notifies_receiver() {
    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let t = transfer(1_000, setup.bob, setup.alice, 5_000_000);

    let result = alice_wallet
        .send_transfer(&mut setup.ledger, setup.alice, SEND_VALUE, &t)
        .unwrap();

    let bob_wallet = setup.minter.wallet_of(&setup.ledger, setup.bob).unwrap();
    let notification = result
        .find(&TxFilter::new().from(bob_wallet.address).to(setup.bob).op(op::JETTON_TRANSFER_NOTIFICATION))
        .unwrap();
    assert_eq!(notification.value, 5_000_000);
}

#[test]
fn test_transfer_by_stranger_fails() {
    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let t = transfer(1_000, setup.bob, setup.bob, 0);

    let result = alice_wallet
        .send_transfer(&mut setup.ledger, setup.bob, SEND_VALUE, &t)
        .unwrap();

    assert!(result.has(
        &TxFilter::new()
            .to(alice_wallet.address)
            .exit_code(ExitCode::from(JettonError::UnauthorizedTransfer))
    ));
    assert_eq!(alice_wallet.get_balance(&setup.ledger).unwrap(), MINT_AMOUNT);
}

#[test]
fn test_transfer_more_than_balance_fails() {
    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let t = transfer(MINT_AMOUNT + 1, setup.bob, setup.alice, 0);

    let result = alice_wallet
        .send_transfer(&mut setup.ledger, setup.alice, SEND_VALUE, &t)
        .unwrap();

    assert!(result.has(
        &TxFilter::new()
            .to(alice_wallet.address)
            .exit_code(ExitCode::from(JettonError::NotEnoughJettons))
    ));
    assert_eq!(alice_wallet.get_balance(&setup.ledger).unwrap(), MINT_AMOUNT);
}

#[test]
fn test_transfer_without_enough_value_fails() {
    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let forward = 10_000_000;
    let t = transfer(1_000, setup.bob, setup.alice, forward);
    let fees = setup.ledger.fees().clone();
    // enough to run the sender, one unit short of the full route
    let value = fees.compute_fee + transfer_required_value(&fees, forward) - 1;

    let result = alice_wallet
        .send_transfer(&mut setup.ledger, setup.alice, value, &t)
        .unwrap();

    assert!(result.has(
        &TxFilter::new()
            .to(alice_wallet.address)
            .exit_code(ExitCode::from(JettonError::NotEnoughValue))
    ));
}

#[test]
fn test_bounced_internal_transfer_restores_balance() {
    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let bob_wallet: JettonWalletContract = setup.minter.wallet_of(&setup.ledger, setup.bob).unwrap();
    setup
        .ledger
        .faults()
        .fail_next(FaultRule::new(ExitCode(999)).to(bob_wallet.address));

    let t = transfer(250_000, setup.bob, setup.alice, 0);
    let result = alice_wallet
        .send_transfer(&mut setup.ledger, setup.alice, SEND_VALUE, &t)
        .unwrap();

    assert!(result.has(&TxFilter::new().to(bob_wallet.address).exit_code(ExitCode(999))));
    assert!(result.has(&TxFilter::new().from(bob_wallet.address).to(alice_wallet.address).bounced(true)));
    assert_eq!(alice_wallet.get_balance(&setup.ledger).unwrap(), MINT_AMOUNT);
    assert_eq!(bob_wallet.get_balance(&setup.ledger).unwrap(), 0);
}

#[test]
fn test_internal_transfer_from_unknown_wallet_fails() {
    use launchpad_codec::{jetton::InternalTransfer, MessageBody};
    use launchpad_ledger::OutboundMessage;

    let (mut setup, alice_wallet) = setup_with_alice_balance();
    let body = InternalTransfer {
        amount: 1_000_000_000,
        from: Some(setup.bob),
        response_address: None,
        forward_ton_amount: 0,
        forward_payload: None,
    }
    .to_body(0)
    .unwrap();

    let result = setup
        .ledger
        .send(setup.bob, OutboundMessage::new(alice_wallet.address, SEND_VALUE, body))
        .unwrap();

    assert!(result.has(
        &TxFilter::new()
            .to(alice_wallet.address)
            .exit_code(ExitCode::from(JettonError::UnauthorizedIncomingTransfer))
    ));
    assert_eq!(alice_wallet.get_balance(&setup.ledger).unwrap(), MINT_AMOUNT);
}
