//! Ledger tests: atomic balance adjustment and the non-negative floor.

mod common;

use barnyard::BarnError;
use std::sync::Arc;
use uuid::Uuid;

use common::{harness, STARTING_BALANCE};

#[tokio::test]
async fn credit_and_debit_move_balance() {
    let h = harness();
    let (owner, _farm) = h.owner_with_farm("alice").await;

    let after_credit = h.ledger.adjust_balance(owner.id, 2_50).await.unwrap();
    assert_eq!(after_credit.balance, STARTING_BALANCE + 2_50);

    let after_debit = h.ledger.adjust_balance(owner.id, -3_00).await.unwrap();
    assert_eq!(after_debit.balance, STARTING_BALANCE - 50);
}

#[tokio::test]
async fn debit_below_zero_is_rejected_and_leaves_balance_unchanged() {
    let h = harness();
    let (owner, _farm) = h.owner_with_farm("alice").await;

    let err = h
        .ledger
        .adjust_balance(owner.id, -(STARTING_BALANCE + 1))
        .await
        .unwrap_err();
    match err {
        BarnError::InsufficientFunds { balance, amount } => {
            assert_eq!(balance, STARTING_BALANCE);
            assert_eq!(amount, STARTING_BALANCE + 1);
        }
        other => panic!("expected InsufficientFunds, got {other}"),
    }
    assert_eq!(h.balance(owner.id).await, STARTING_BALANCE);
}

#[tokio::test]
async fn debit_to_exactly_zero_passes() {
    let h = harness();
    let (owner, _farm) = h.owner_with_farm("alice").await;

    let after = h
        .ledger
        .adjust_balance(owner.id, -STARTING_BALANCE)
        .await
        .unwrap();
    assert_eq!(after.balance, 0);
}

#[tokio::test]
async fn adjusting_unknown_owner_is_not_found() {
    let h = harness();
    let err = h.ledger.adjust_balance(Uuid::new_v4(), 1_00).await.unwrap_err();
    assert!(matches!(err, BarnError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_debits_never_overdraw() {
    let h = harness();
    let (owner, _farm) = h.owner_with_farm("alice").await;
    // Balance covers exactly 4 of the 10 attempted debits.
    let debit = STARTING_BALANCE / 4;

    let ledger = Arc::new(h.ledger.clone());
    let mut handles = vec![];
    for _ in 0..10 {
        let ledger = Arc::clone(&ledger);
        handles.push(tokio::spawn(async move {
            ledger.adjust_balance(owner.id, -debit).await.is_ok()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    assert_eq!(successes, 4);
    assert_eq!(h.balance(owner.id).await, 0);
}

#[tokio::test]
async fn set_balance_is_admin_override_with_floor() {
    let h = harness();
    let (owner, _farm) = h.owner_with_farm("alice").await;

    let updated = h.accounts.set_balance(owner.id, 42_00).await.unwrap();
    assert_eq!(updated.balance, 42_00);

    let err = h.accounts.set_balance(owner.id, -1).await.unwrap_err();
    assert!(matches!(err, BarnError::Validation(_)));
    assert_eq!(h.balance(owner.id).await, 42_00);
}
