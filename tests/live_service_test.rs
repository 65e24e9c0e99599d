//! Tests against the real AWS services
//!
//! These need credentials with Managed Blockchain access and cost nothing
//! beyond read calls. To run:
//!
//! ```bash
//! AMB_TESTS_ENABLED=1 cargo test --test live_service_test -- --ignored
//! ```

use ambkit::blockchain::ManagedBlockchain;
use ambkit::config::AmbConfig;
use ambkit::pagination::PaginationConfig;

fn enabled() -> bool {
    std::env::var("AMB_TESTS_ENABLED").map(|v| v == "1").unwrap_or(false)
}

#[tokio::test]
#[ignore] // Requires AWS credentials
async fn test_live_list_networks() {
    if !enabled() {
        return;
    }

    let amb = ManagedBlockchain::from_config(&AmbConfig::from_env()).await;
    let page = amb.list_networks().await.unwrap();
    for network in &page.items {
        assert!(network.id.is_some());
    }
}

#[tokio::test]
#[ignore] // Requires AWS credentials
async fn test_live_token_balances() {
    if !enabled() {
        return;
    }

    let amb = ManagedBlockchain::from_config(&AmbConfig::from_env()).await;
    // Ethereum Foundation donation address
    let result = amb
        .query_paginator()
        .paginate_list_token_balances(
            Some("ETHEREUM_MAINNET"),
            "0xde0B295669a9FD93d5F28D9Ec85E40f4cb697BAe",
            &PaginationConfig::new(5, 5),
        )
        .await;
    assert!(result.map(|b| b.len() <= 5).unwrap_or(true));
}
