//! Transfer Coordinator - demo runner
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────┐    ┌──────────┐
//! │  Config  │───▶│  Store   │───▶│ Coordinator │───▶│  Output  │
//! │  (YAML)  │    │ (seeded) │    │ (1 thread / │    │  (JSON)  │
//! └──────────┘    └──────────┘    │  transfer)  │    └──────────┘
//!                                 └─────────────┘
//! ```
//!
//! Seeds the accounts listed in `config/<env>.yaml`, submits every configured
//! transfer on its own thread at once, logs each outcome and prints the
//! final balances as JSON.

use anyhow::Context;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

use transfer_coordinator::account::{Account, AccountStore, InMemoryAccountStore};
use transfer_coordinator::config::AppConfig;
use transfer_coordinator::logging::init_logging;
use transfer_coordinator::notification::LoggingNotifier;
use transfer_coordinator::transfer::TransferCoordinator;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = init_logging(&app_config);

    info!("Starting transfer coordinator in {} mode", env);

    let store = Arc::new(InMemoryAccountStore::new());
    for seed in &app_config.accounts {
        let account = Account::new(seed.id.clone(), seed.balance)
            .with_context(|| format!("Invalid account seed {}", seed.id))?;
        store
            .create_account(account)
            .with_context(|| format!("Failed to seed account {}", seed.id))?;
    }
    let total_before: Decimal = store.snapshot().iter().map(|s| s.balance).sum();
    info!(
        accounts = store.len(),
        total = %total_before,
        "Accounts seeded"
    );

    let coordinator = TransferCoordinator::from_config(
        store.clone(),
        Arc::new(LoggingNotifier),
        &app_config.coordinator,
    );

    let (mut committed, mut rejected) = (0usize, 0usize);
    thread::scope(|s| {
        let handles: Vec<_> = app_config
            .transfers
            .iter()
            .enumerate()
            .map(|(i, req)| {
                let coordinator = &coordinator;
                thread::Builder::new()
                    .name(format!("transfer-{}", i))
                    .spawn_scoped(s, move || (req, coordinator.transfer(req)))
            })
            .collect();

        for handle in handles {
            let joined = handle
                .context("Failed to spawn transfer thread")
                .and_then(|h| {
                    h.join()
                        .map_err(|_| anyhow::anyhow!("Transfer thread panicked"))
                });
            match joined {
                Ok((_, Ok(receipt))) => {
                    committed += 1;
                    info!(
                        transfer_id = %receipt.transfer_id,
                        from = %receipt.account_from_id,
                        to = %receipt.account_to_id,
                        amount = %receipt.amount,
                        "Transfer completed"
                    );
                }
                Ok((req, Err(e))) => {
                    rejected += 1;
                    warn!(
                        from = %req.account_from_id,
                        to = %req.account_to_id,
                        amount = %req.amount,
                        code = e.code(),
                        "Transfer rejected: {}", e
                    );
                }
                Err(e) => {
                    rejected += 1;
                    warn!("{:#}", e);
                }
            }
        }
    });

    let snapshot = store.snapshot();
    let total_after: Decimal = snapshot.iter().map(|s| s.balance).sum();
    info!(
        committed,
        rejected,
        total = %total_after,
        "All transfers processed"
    );
    if total_after != total_before {
        anyhow::bail!(
            "Balance total changed: {} before, {} after",
            total_before,
            total_after
        );
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
