//! Purchase and sale tests, including the reference Chicken scenario and
//! the double-sale guards.

mod common;

use barnyard::BarnError;
use chrono::Duration;
use uuid::Uuid;

use common::{harness, STARTING_BALANCE};

#[tokio::test]
async fn buying_a_chicken_debits_owner_and_creates_active_animal() {
    let h = harness();
    let (owner, farm) = h.owner_with_farm("alice").await;

    let chicken = h.trade.buy_animal("Chicken", farm.id).await.unwrap();

    assert_eq!(h.balance(owner.id).await, STARTING_BALANCE - 10_00);
    assert!(chicken.is_active);
    assert_eq!(chicken.farm_id, farm.id);
    assert_eq!(chicken.purchase_price, 10_00);
    assert_eq!(chicken.sell_price, 8_00);
    assert_eq!(chicken.last_production_time, None);
    assert_eq!(chicken.sold_at, None);
    assert_eq!(
        chicken.death_time,
        chicken.created_at + Duration::minutes(2880)
    );

    let stored = h.store.animals.get(chicken.id).await.unwrap();
    assert_eq!(stored, chicken);
}

#[tokio::test]
async fn purchase_with_insufficient_balance_creates_nothing() {
    let h = harness();
    let (owner, farm) = h.owner_with_farm("alice").await;
    h.accounts.set_balance(owner.id, 5_00).await.unwrap();

    let err = h.trade.buy_animal("Chicken", farm.id).await.unwrap_err();

    assert!(matches!(err, BarnError::InsufficientFunds { .. }));
    assert_eq!(h.balance(owner.id).await, 5_00);
    assert_eq!(h.store.animals.len().await, 0);
}

#[tokio::test]
async fn purchase_rejects_unknown_template_and_farm() {
    let h = harness();
    let (_owner, farm) = h.owner_with_farm("alice").await;

    let err = h.trade.buy_animal("Dragon", farm.id).await.unwrap_err();
    assert!(matches!(err, BarnError::NotFound(_)));

    let err = h.trade.buy_animal("Chicken", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, BarnError::NotFound(_)));

    let err = h.trade.buy_animal("  ", farm.id).await.unwrap_err();
    assert!(matches!(err, BarnError::Validation(_)));

    assert_eq!(h.store.animals.len().await, 0);
}

#[tokio::test]
async fn selling_an_animal_credits_exactly_once() {
    let h = harness();
    let (owner, farm) = h.owner_with_farm("alice").await;
    let chicken = h.trade.buy_animal("Chicken", farm.id).await.unwrap();
    let after_purchase = h.balance(owner.id).await;

    let sold = h.trade.sell_animal(chicken.id).await.unwrap();
    assert!(!sold.is_active);
    assert!(sold.sold_at.is_some());
    assert_eq!(h.balance(owner.id).await, after_purchase + 8_00);

    // Second attempt: the animal is no longer active, so the guard refuses
    // and the balance stays put.
    let err = h.trade.sell_animal(chicken.id).await.unwrap_err();
    assert!(matches!(err, BarnError::Conflict(_)));
    assert_eq!(h.balance(owner.id).await, after_purchase + 8_00);
}

#[tokio::test]
async fn selling_an_expired_animal_is_a_conflict() {
    let h = harness();
    let (owner, farm) = h.owner_with_farm("alice").await;
    let chicken = h.trade.buy_animal("Chicken", farm.id).await.unwrap();
    let after_purchase = h.balance(owner.id).await;

    h.clock.advance(Duration::minutes(2881));
    h.lifecycle.tick().await.unwrap();

    let err = h.trade.sell_animal(chicken.id).await.unwrap_err();
    assert!(matches!(err, BarnError::Conflict(_)));
    assert_eq!(h.balance(owner.id).await, after_purchase);

    let stored = h.store.animals.get(chicken.id).await.unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.sold_at, None);
}

#[tokio::test]
async fn selling_a_missing_animal_is_not_found() {
    let h = harness();
    let err = h.trade.sell_animal(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, BarnError::NotFound(_)));
}

#[tokio::test]
async fn selling_a_product_credits_its_price_once() {
    let h = harness();
    let (owner, farm) = h.owner_with_farm("alice").await;
    h.trade.buy_animal("Chicken", farm.id).await.unwrap();

    // Let the chicken lay one egg.
    h.clock.advance(Duration::minutes(360));
    let produced = h.production.tick().await.unwrap();
    assert_eq!(produced.produced, 1);

    let egg = h
        .store
        .products
        .scan(|_| true)
        .await
        .pop()
        .expect("one egg produced");
    assert_eq!(egg.name, "Egg");
    assert_eq!(egg.price, 1_00);

    let before = h.balance(owner.id).await;
    let sold = h.trade.sell_product(egg.id).await.unwrap();
    assert!(sold.is_sold());
    assert_eq!(h.balance(owner.id).await, before + 1_00);

    let err = h.trade.sell_product(egg.id).await.unwrap_err();
    assert!(matches!(err, BarnError::Conflict(_)));
    assert_eq!(h.balance(owner.id).await, before + 1_00);
}

#[tokio::test]
async fn renaming_an_animal_keeps_everything_else() {
    let h = harness();
    let (_owner, farm) = h.owner_with_farm("alice").await;
    let chicken = h.trade.buy_animal("Chicken", farm.id).await.unwrap();

    let renamed = h.accounts.rename_animal(chicken.id, "Henrietta").await.unwrap();
    assert_eq!(renamed.name, "Henrietta");
    assert_eq!(renamed.death_time, chicken.death_time);
    assert_eq!(renamed.sell_price, chicken.sell_price);

    let err = h.accounts.rename_animal(chicken.id, "  ").await.unwrap_err();
    assert!(matches!(err, BarnError::Validation(_)));
}
