//! Property checks against the public API
//!
//! Seeded random transfer mixes, so every run is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

use transfer_coordinator::{
    Account, AccountStore, InMemoryAccountStore, RecordingNotifier, TransferCoordinator,
    TransferError,
};

fn setup(
    accounts: &[(&str, Decimal)],
) -> (
    TransferCoordinator,
    Arc<InMemoryAccountStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(InMemoryAccountStore::new());
    for (id, balance) in accounts {
        store
            .create_account(Account::new(*id, *balance).unwrap())
            .unwrap();
    }
    let notifier = Arc::new(RecordingNotifier::new());
    let coordinator = TransferCoordinator::new(store.clone(), notifier.clone());
    (coordinator, store, notifier)
}

fn balance(store: &InMemoryAccountStore, id: &str) -> Decimal {
    store.get_account(id).unwrap().balance()
}

/// Random amount in cents, sometimes zero or negative
fn random_amount(rng: &mut StdRng) -> Decimal {
    Decimal::new(rng.gen_range(-500..20_000), 2)
}

#[test]
fn qa_example_transfer() {
    let (coordinator, store, notifier) = setup(&[("A", dec!(100)), ("B", dec!(50))]);

    coordinator.transfer_money("A", "B", dec!(30)).unwrap();

    assert_eq!(balance(&store, "A"), dec!(70));
    assert_eq!(balance(&store, "B"), dec!(80));
    assert_eq!(
        notifier.sent(),
        vec![
            ("A".to_string(), "Transferred 30 to account B".to_string()),
            ("B".to_string(), "Received 30 from account A".to_string()),
        ]
    );
}

/// Every outcome either moves exactly `amount` or leaves both balances alone
#[test]
fn qa_random_sequence_pairwise_conservation() {
    let ids = ["acc-1", "acc-2", "acc-3", "acc-4"];
    let (coordinator, store, _) = setup(&[
        ("acc-1", dec!(500)),
        ("acc-2", dec!(500)),
        ("acc-3", dec!(0)),
        ("acc-4", dec!(75.25)),
    ]);
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..2_000 {
        let from = ids[rng.gen_range(0..ids.len())];
        let to = ids[rng.gen_range(0..ids.len())];
        let amount = random_amount(&mut rng);

        let from_before = balance(&store, from);
        let to_before = balance(&store, to);

        match coordinator.transfer_money(from, to, amount) {
            Ok(receipt) => {
                assert!(amount > Decimal::ZERO);
                assert_eq!(balance(&store, from), from_before - amount);
                assert_eq!(balance(&store, to), to_before + amount);
                assert_eq!(receipt.from_balance + receipt.to_balance, from_before + to_before);
            }
            Err(TransferError::InvalidAmount) => {
                assert!(amount <= Decimal::ZERO);
                assert_eq!(balance(&store, from), from_before);
                assert_eq!(balance(&store, to), to_before);
            }
            Err(TransferError::SameAccount) => assert_eq!(from, to),
            Err(TransferError::InsufficientFunds(id)) => {
                assert_eq!(id, from);
                assert!(from_before < amount);
                assert_eq!(balance(&store, from), from_before);
                assert_eq!(balance(&store, to), to_before);
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert!(balance(&store, from) >= Decimal::ZERO);
    }

    let total: Decimal = store.snapshot().iter().map(|s| s.balance).sum();
    assert_eq!(total, dec!(1075.25));
}

#[test]
fn qa_missing_account_leaves_everything_unchanged() {
    let (coordinator, store, notifier) = setup(&[("A", dec!(10)), ("B", dec!(10))]);
    let before = store.snapshot();

    assert_eq!(
        coordinator.transfer_money("A", "nobody", dec!(1)),
        Err(TransferError::AccountNotFound("nobody".into()))
    );
    assert_eq!(
        coordinator.transfer_money("nobody", "B", dec!(1)),
        Err(TransferError::AccountNotFound("nobody".into()))
    );

    assert_eq!(store.snapshot(), before);
    assert_eq!(notifier.count(), 0);
}

/// Random concurrent traffic over a small account set conserves the total
#[test]
fn qa_concurrent_random_traffic_conserves_total() {
    const THREADS: u64 = 8;
    const PER_THREAD: usize = 1_000;
    let ids = ["p", "q", "r", "s", "t"];
    let (coordinator, store, _) = setup(&[
        ("p", dec!(1000)),
        ("q", dec!(1000)),
        ("r", dec!(1000)),
        ("s", dec!(1000)),
        ("t", dec!(1000)),
    ]);

    thread::scope(|s| {
        for seed in 0..THREADS {
            let coordinator = &coordinator;
            s.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..PER_THREAD {
                    let from = ids[rng.gen_range(0..ids.len())];
                    let to = ids[rng.gen_range(0..ids.len())];
                    let amount = random_amount(&mut rng);
                    match coordinator.transfer_money(from, to, amount) {
                        Ok(_)
                        | Err(TransferError::InvalidAmount)
                        | Err(TransferError::SameAccount)
                        | Err(TransferError::InsufficientFunds(_)) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            });
        }
    });

    let snapshot = store.snapshot();
    let total: Decimal = snapshot.iter().map(|s| s.balance).sum();
    assert_eq!(total, dec!(5000));
    assert!(snapshot.iter().all(|s| s.balance >= Decimal::ZERO));
}
