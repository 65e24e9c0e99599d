/*!
 * Amazon Managed Blockchain Query facades
 *
 * Read-only access to public chain data: transactions, their events, token
 * balances and deployed asset contracts. Every call that takes an
 * `Option<&str>` network falls back to the facade's default network,
 * `ETHEREUM_MAINNET` unless configured otherwise.
 */

pub mod contracts;
pub mod paginator;
pub mod token_balances;
pub mod transaction_events;
pub mod transactions;

pub use contracts::ContractsApi;
pub use paginator::QueryPaginator;
pub use token_balances::TokenBalancesApi;
pub use transaction_events::TransactionEventsApi;
pub use transactions::TransactionsApi;

use crate::model::*;
use crate::pagination::{collect_pages, PaginationConfig};
use crate::service::{QueryApi, ServiceResult};

use contracts::contract_filter;
use token_balances::owner_balances;

/// Complete listings of balances and contracts
#[derive(Debug, Clone)]
pub struct BlockchainQuery<Q> {
    api: Q,
    default_network: String,
}

impl<Q: QueryApi> BlockchainQuery<Q> {
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

    /// Every token balance owned by `owner_address`
    pub async fn list_token_balances(
        &self,
        owner_address: &str,
        network: Option<&str>,
    ) -> ServiceResult<Vec<TokenBalance>> {
        let request = owner_balances(owner_address, network.unwrap_or(&self.default_network));
        collect_pages(&PaginationConfig::default(), |page| {
            self.api.list_token_balances(&request, page)
        })
        .await
    }

    /// Every contract deployed by `deployer_address`
    ///
    /// The service requires a token standard; `ERC20` is used when none is
    /// given.
    pub async fn list_asset_contracts(
        &self,
        deployer_address: &str,
        network: Option<&str>,
        token_standard: Option<&str>,
    ) -> ServiceResult<Vec<AssetContract>> {
        let filter = contract_filter(
            deployer_address,
            network.unwrap_or(&self.default_network),
            token_standard.unwrap_or(DEFAULT_TOKEN_STANDARD),
        );
        collect_pages(&PaginationConfig::default(), |page| {
            self.api.list_asset_contracts(&filter, page)
        })
        .await
    }
}
