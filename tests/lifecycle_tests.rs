//! Lifecycle sweep tests: bulk expiry, idempotence, and the zero-lifetime
//! edge case.

mod common;

use barnyard::Clock;
use barnyard::catalog::AnimalTemplate;
use barnyard::domain::Animal;
use chrono::Duration;

use common::{harness, STARTING_BALANCE};

#[tokio::test]
async fn sweep_expires_only_animals_past_death_time() {
    let h = harness();
    let (_owner, farm) = h.owner_with_farm("alice").await;
    let chicken = h.trade.buy_animal("Chicken", farm.id).await.unwrap(); // 2880 min
    let cow = h.trade.buy_animal("Cow", farm.id).await.unwrap(); // 14400 min

    h.clock.advance(Duration::minutes(3000));
    let swept = h.lifecycle.tick().await.unwrap();

    assert_eq!(swept.expired, 1);
    assert!(!h.store.animals.get(chicken.id).await.unwrap().is_active);
    assert!(h.store.animals.get(cow.id).await.unwrap().is_active);
}

#[tokio::test]
async fn sweep_is_idempotent_without_time_change() {
    let h = harness();
    let (_owner, farm) = h.owner_with_farm("alice").await;
    h.trade.buy_animal("Chicken", farm.id).await.unwrap();
    h.trade.buy_animal("Duck", farm.id).await.unwrap();

    h.clock.advance(Duration::minutes(10_000));
    let first = h.lifecycle.tick().await.unwrap();
    let second = h.lifecycle.tick().await.unwrap();

    assert_eq!(first.expired, 2);
    assert_eq!(second.expired, 0);
}

#[tokio::test]
async fn zero_lifetime_animal_expires_on_first_sweep() {
    let h = harness();
    let (_owner, farm) = h.owner_with_farm("alice").await;

    let mayfly = AnimalTemplate {
        name: "Mayfly".to_string(),
        lifetime_minutes: 0,
        production_interval_minutes: 60,
        purchase_price: 0,
        sell_price: 0,
        product: "Egg".to_string(),
    };
    let animal = Animal::from_template(&mayfly, farm.id, h.clock.now());
    assert_eq!(animal.death_time, animal.created_at);
    h.store.animals.insert(animal.id, animal.clone()).await;

    // Never sold, yet the very next sweep retires it.
    let swept = h.lifecycle.tick().await.unwrap();
    assert_eq!(swept.expired, 1);
    assert!(!h.store.animals.get(animal.id).await.unwrap().is_active);
}

#[tokio::test]
async fn sweep_never_touches_balances() {
    let h = harness();
    let (owner, farm) = h.owner_with_farm("alice").await;
    h.trade.buy_animal("Chicken", farm.id).await.unwrap();
    let before = h.balance(owner.id).await;
    assert_eq!(before, STARTING_BALANCE - 10_00);

    h.clock.advance(Duration::minutes(10_000));
    h.lifecycle.tick().await.unwrap();

    assert_eq!(h.balance(owner.id).await, before);
}

#[tokio::test]
async fn death_time_follows_lifetime_updates() {
    let h = harness();
    let (_owner, farm) = h.owner_with_farm("alice").await;
    let chicken = h.trade.buy_animal("Chicken", farm.id).await.unwrap();

    let updated = h
        .store
        .animals
        .update(chicken.id, |a| a.set_lifetime_minutes(10))
        .await
        .unwrap();
    assert_eq!(
        updated.death_time,
        updated.created_at + Duration::minutes(10)
    );

    // The shortened lifetime is already past; the sweep picks it up.
    h.clock.advance(Duration::minutes(11));
    let swept = h.lifecycle.tick().await.unwrap();
    assert_eq!(swept.expired, 1);
}
