//! Transaction lookups

use tracing::debug;

use crate::model::{Transaction, TransactionOutputItem, DEFAULT_QUERY_NETWORK};
use crate::pagination::{Page, PageRequest};
use crate::service::{QueryApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct TransactionsApi<Q> {
    api: Q,
    default_network: String,
}

impl<Q: QueryApi> TransactionsApi<Q> {
    pub fn new(api: Q) -> Self {
        Self {
            api,
            default_network: DEFAULT_QUERY_NETWORK.to_string(),
        }
    }

    /// Network used when a call passes `None`
    pub fn with_default_network(mut self, network: impl Into<String>) -> Self {
        self.default_network = network.into();
        self
    }

    pub async fn get_transaction(
        &self,
        transaction_hash: &str,
        network: Option<&str>,
    ) -> ServiceResult<Transaction> {
        let network = network.unwrap_or(&self.default_network);
        debug!(transaction_hash, network, "Fetching transaction");
        self.api.get_transaction(transaction_hash, network).await
    }

    /// First page of transactions touching `address`
    pub async fn list_transactions(
        &self,
        address: &str,
        network: Option<&str>,
    ) -> ServiceResult<Page<TransactionOutputItem>> {
        let network = network.unwrap_or(&self.default_network);
        self.api
            .list_transactions(address, network, PageRequest::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBlockchain;

    #[tokio::test]
    async fn test_network_defaults() {
        let mock = MockBlockchain::new();
        let transactions = TransactionsApi::new(mock.clone());

        transactions.get_transaction("0xabc", None).await.unwrap();
        assert_eq!(
            mock.last_call("GetTransaction").unwrap(),
            serde_json::json!({ "transactionHash": "0xabc", "network": "ETHEREUM_MAINNET" })
        );

        let transactions = transactions.with_default_network("BITCOIN_MAINNET");
        transactions.list_transactions("bc1q", None).await.unwrap();
        assert_eq!(mock.last_call("ListTransactions").unwrap()["network"], "BITCOIN_MAINNET");

        transactions
            .list_transactions("0xdef", Some("ETHEREUM_SEPOLIA_TESTNET"))
            .await
            .unwrap();
        assert_eq!(
            mock.last_call("ListTransactions").unwrap()["network"],
            "ETHEREUM_SEPOLIA_TESTNET"
        );
    }
}
