//! Full-listing helpers for the query API
//!
//! Each method walks every page within a [`PaginationConfig`] and answers
//! with either the items or an [`ErrorBody`] describing the failure.

use crate::model::*;
use crate::pagination::{collect_pages, PaginationConfig};
use crate::service::error::{handle_errors, ErrorBody};
use crate::service::{QueryApi, ServiceResult};

use super::contracts::contract_filter;
use super::token_balances::owner_balances;

#[derive(Debug, Clone)]
pub struct QueryPaginator<Q> {
    api: Q,
    default_network: String,
}

impl<Q: QueryApi> QueryPaginator<Q> {
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

    fn network<'a>(&'a self, network: Option<&'a str>) -> &'a str {
        network.unwrap_or(&self.default_network)
    }

    pub async fn paginate_list_transactions(
        &self,
        address: &str,
        network: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Vec<TransactionOutputItem>, ErrorBody> {
        let network = self.network(network);
        finish(
            collect_pages(config, |page| {
                self.api.list_transactions(address, network, page)
            })
            .await,
        )
    }

    pub async fn paginate_list_asset_contracts(
        &self,
        network: Option<&str>,
        token_standard: &str,
        deployer_address: &str,
        config: &PaginationConfig,
    ) -> Result<Vec<AssetContract>, ErrorBody> {
        let filter = contract_filter(deployer_address, self.network(network), token_standard);
        finish(
            collect_pages(config, |page| self.api.list_asset_contracts(&filter, page)).await,
        )
    }

    pub async fn paginate_list_transaction_events(
        &self,
        network: Option<&str>,
        transaction_hash: &str,
        config: &PaginationConfig,
    ) -> Result<Vec<TransactionEvent>, ErrorBody> {
        let network = self.network(network);
        finish(
            collect_pages(config, |page| {
                self.api
                    .list_transaction_events(transaction_hash, network, page)
            })
            .await,
        )
    }

    /// Events sent to any of `to_addresses`
    pub async fn paginate_list_filtered_transaction_events(
        &self,
        network: Option<&str>,
        to_addresses: Vec<String>,
        config: &PaginationConfig,
    ) -> Result<Vec<TransactionEvent>, ErrorBody> {
        let request = FilteredEventsRequest::to_addresses(self.network(network), to_addresses);
        finish(
            collect_pages(config, |page| {
                self.api.list_filtered_transaction_events(&request, page)
            })
            .await,
        )
    }

    pub async fn paginate_list_token_balances(
        &self,
        network: Option<&str>,
        owner_address: &str,
        config: &PaginationConfig,
    ) -> Result<Vec<TokenBalance>, ErrorBody> {
        let request = owner_balances(owner_address, self.network(network));
        finish(
            collect_pages(config, |page| self.api.list_token_balances(&request, page)).await,
        )
    }
}

fn finish<T>(result: ServiceResult<Vec<T>>) -> Result<Vec<T>, ErrorBody> {
    result.map_err(|e| handle_errors(&e))
}
