//! Events emitted by transactions

use crate::model::{FilteredEventsRequest, TransactionEvent, DEFAULT_QUERY_NETWORK};
use crate::pagination::{Page, PageRequest};
use crate::service::{QueryApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct TransactionEventsApi<Q> {
    api: Q,
    default_network: String,
}

impl<Q: QueryApi> TransactionEventsApi<Q> {
    pub fn new(api: Q) -> Self {
        Self {
            api,
            default_network: DEFAULT_QUERY_NETWORK.to_string(),
        }
    }

    pub fn with_default_network(mut self, network: impl Into<String>) -> Self {
        self.default_network = network.into();
        self
    }

    pub async fn list_transaction_events(
        &self,
        transaction_hash: &str,
        network: Option<&str>,
    ) -> ServiceResult<Page<TransactionEvent>> {
        let network = network.unwrap_or(&self.default_network);
        self.api
            .list_transaction_events(transaction_hash, network, PageRequest::default())
            .await
    }

    /// First page of events sent to any of `to_addresses`
    pub async fn list_filtered_transaction_events(
        &self,
        to_addresses: Vec<String>,
        network: Option<&str>,
    ) -> ServiceResult<Page<TransactionEvent>> {
        let network = network.unwrap_or(&self.default_network);
        let request = FilteredEventsRequest::to_addresses(network, to_addresses);
        self.api
            .list_filtered_transaction_events(&request, PageRequest::default())
            .await
    }
}
