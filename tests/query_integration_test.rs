/*!
 * Integration tests for the query facades and the query paginator
 */

use ambkit::mock::MockBlockchain;
use ambkit::model::*;
use ambkit::pagination::{Page, PaginationConfig};
use ambkit::query::{BlockchainQuery, ContractsApi, QueryPaginator, TokenBalancesApi};
use ambkit::service::ServiceError;
use serde_json::json;

fn balance(address: &str, amount: &str) -> TokenBalance {
    TokenBalance {
        owner_identifier: Some(OwnerIdentifier {
            address: address.to_string(),
        }),
        balance: amount.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_paginate_transactions_across_pages() {
    let mock = MockBlockchain::new();
    mock.respond(
        "ListTransactions",
        Page::new(
            vec![TransactionOutputItem {
                transaction_hash: "0xabc".to_string(),
                ..Default::default()
            }],
            Some("token1".to_string()),
        ),
    );
    mock.respond(
        "ListTransactions",
        Page::last(vec![TransactionOutputItem {
            transaction_hash: "0xdef".to_string(),
            ..Default::default()
        }]),
    );

    let paginator = QueryPaginator::new(mock.clone());
    let config = PaginationConfig {
        max_items: Some(10),
        page_size: Some(5),
        starting_token: None,
    };
    let items = paginator
        .paginate_list_transactions("0xowner", Some("ETHEREUM_MAINNET"), &config)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].transaction_hash, "0xabc");
    assert_eq!(items[1].transaction_hash, "0xdef");

    let calls = mock.calls_to("ListTransactions");
    assert_eq!(calls[0]["maxResults"], 5);
    assert_eq!(calls[1]["nextToken"], "token1");
}

#[tokio::test]
async fn test_paginate_starts_from_token() {
    let mock = MockBlockchain::new();
    let paginator = QueryPaginator::new(mock.clone());

    let config = PaginationConfig::default().with_starting_token("resume-here");
    let events = paginator
        .paginate_list_transaction_events(None, "0xhash", &config)
        .await
        .unwrap();

    assert!(events.is_empty());
    let params = mock.last_call("ListTransactionEvents").unwrap();
    assert_eq!(params["nextToken"], "resume-here");
    assert_eq!(params["network"], "ETHEREUM_MAINNET");
}

#[tokio::test]
async fn test_paginate_contracts_filter_and_error_body() {
    let mock = MockBlockchain::new();
    mock.fail(
        "ListAssetContracts",
        ServiceError::from_code("ValidationException", "Invalid token standard"),
    );

    let paginator = QueryPaginator::new(mock.clone());
    let body = paginator
        .paginate_list_asset_contracts(
            Some("ETHEREUM_MAINNET"),
            "chaincode",
            "0xdeployer",
            &PaginationConfig::default(),
        )
        .await
        .unwrap_err();

    assert!(body.error.contains("ValidationException"));
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({ "error": body.error })
    );
    assert_eq!(
        mock.last_call("ListAssetContracts").unwrap()["contractFilter"],
        json!({
            "network": "ETHEREUM_MAINNET",
            "tokenStandard": "chaincode",
            "deployerAddress": "0xdeployer"
        })
    );
}

#[tokio::test]
async fn test_paginate_filtered_events_and_balances() {
    let mock = MockBlockchain::new();
    mock.respond(
        "ListTokenBalances",
        Page::new(vec![balance("0xa", "100")], Some("token1".to_string())),
    );
    mock.respond("ListTokenBalances", Page::last(vec![balance("0xb", "250")]));

    let paginator = QueryPaginator::new(mock.clone()).with_default_network("BITCOIN_MAINNET");

    let balances = paginator
        .paginate_list_token_balances(None, "0xa", &PaginationConfig::default())
        .await
        .unwrap();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[1].balance, "250");
    assert_eq!(
        mock.calls_to("ListTokenBalances")[0]["tokenFilter"]["network"],
        "BITCOIN_MAINNET"
    );

    mock.fail(
        "ListFilteredTransactionEvents",
        ServiceError::Throttling("Rate exceeded".to_string()),
    );
    let body = paginator
        .paginate_list_filtered_transaction_events(
            None,
            vec!["bc1qaddr".to_string()],
            &PaginationConfig::default(),
        )
        .await
        .unwrap_err();
    assert!(body.error.contains("ThrottlingException"));
}

#[tokio::test]
async fn test_blockchain_query_collects_contracts() {
    let mock = MockBlockchain::new();
    mock.respond(
        "ListAssetContracts",
        Page::new(
            vec![AssetContract {
                token_standard: "ERC721".to_string(),
                deployer_address: "0xdeployer".to_string(),
                contract_identifier: Some(ContractIdentifier {
                    network: "ETHEREUM_MAINNET".to_string(),
                    contract_address: "0xc1".to_string(),
                }),
            }],
            Some("t".to_string()),
        ),
    );
    mock.respond("ListAssetContracts", Page::<AssetContract>::default());

    let contracts = BlockchainQuery::new(mock.clone())
        .list_asset_contracts("0xdeployer", None, Some("ERC721"))
        .await
        .unwrap();

    assert_eq!(contracts.len(), 1);
    assert_eq!(
        contracts[0].contract_identifier.as_ref().unwrap().contract_address,
        "0xc1"
    );
    assert_eq!(mock.call_count("ListAssetContracts"), 2);
}

#[tokio::test]
async fn test_blockchain_query_error_propagates() {
    let mock = MockBlockchain::new();
    mock.fail(
        "ListTokenBalances",
        ServiceError::AccessDenied("no billing token".to_string()),
    );

    let err = BlockchainQuery::new(mock.clone())
        .list_token_balances("0xowner", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
}

#[tokio::test]
async fn test_single_page_facades() {
    let mock = MockBlockchain::new();

    ContractsApi::new(mock.clone())
        .list_contracts("0xd", "ETHEREUM_MAINNET", "ERC1155")
        .await
        .unwrap();
    assert_eq!(
        mock.last_call("ListAssetContracts").unwrap()["contractFilter"]["tokenStandard"],
        "ERC1155"
    );

    mock.respond("ListTokenBalances", Page::last(vec![balance("0xo", "7")]));
    let page = TokenBalancesApi::new(mock.clone())
        .list_token_balances("0xo", Some("ETHEREUM_MAINNET"))
        .await
        .unwrap();
    assert_eq!(page.items[0].balance, "7");
    assert_eq!(
        mock.last_call("ListTokenBalances").unwrap()["ownerFilter"],
        json!({ "address": "0xo" })
    );
}
