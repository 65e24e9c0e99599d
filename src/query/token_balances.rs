//! Token balances held by an address

use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::{QueryApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct TokenBalancesApi<Q> {
    api: Q,
    default_network: String,
}

impl<Q: QueryApi> TokenBalancesApi<Q> {
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

    /// First page of balances owned by `address`
    pub async fn list_token_balances(
        &self,
        address: &str,
        network: Option<&str>,
    ) -> ServiceResult<Page<TokenBalance>> {
        let request = owner_balances(address, network.unwrap_or(&self.default_network));
        self.api
            .list_token_balances(&request, PageRequest::default())
            .await
    }

    /// Balance of one token for `owner`
    ///
    /// Native coins have neither a contract address nor a token id.
    pub async fn get_token_balance(
        &self,
        owner: &str,
        network: Option<&str>,
        contract_address: Option<&str>,
        token_id: Option<&str>,
    ) -> ServiceResult<TokenBalance> {
        let request = TokenBalanceRequest {
            owner_identifier: OwnerIdentifier {
                address: owner.to_string(),
            },
            token_identifier: TokenIdentifier {
                network: network.unwrap_or(&self.default_network).to_string(),
                contract_address: contract_address.map(str::to_string),
                token_id: token_id.map(str::to_string),
            },
        };
        self.api.get_token_balance(&request).await
    }
}

/// `ownerFilter={address}` plus `tokenFilter={network}`
pub(crate) fn owner_balances(address: &str, network: &str) -> TokenBalancesRequest {
    TokenBalancesRequest {
        owner_filter: Some(OwnerFilter {
            address: address.to_string(),
        }),
        token_filter: TokenFilter::network(network),
    }
}
