//! Asset contracts deployed by an address

use crate::model::{AssetContract, ContractFilter};
use crate::pagination::{Page, PageRequest};
use crate::service::{QueryApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct ContractsApi<Q> {
    api: Q,
}

impl<Q: QueryApi> ContractsApi<Q> {
    pub fn new(api: Q) -> Self {
        Self { api }
    }

    /// First page of `token_standard` contracts deployed by `deployer_address`
    pub async fn list_contracts(
        &self,
        deployer_address: &str,
        network: &str,
        token_standard: &str,
    ) -> ServiceResult<Page<AssetContract>> {
        let filter = contract_filter(deployer_address, network, token_standard);
        self.api
            .list_asset_contracts(&filter, PageRequest::default())
            .await
    }
}

pub(crate) fn contract_filter(
    deployer_address: &str,
    network: &str,
    token_standard: &str,
) -> ContractFilter {
    ContractFilter {
        network: network.to_string(),
        token_standard: token_standard.to_string(),
        deployer_address: deployer_address.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBlockchain;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_contracts_filter() {
        let mock = MockBlockchain::new();
        ContractsApi::new(mock.clone())
            .list_contracts("0xdeployer", "ETHEREUM_MAINNET", "ERC721")
            .await
            .unwrap();

        assert_eq!(
            mock.last_call("ListAssetContracts").unwrap(),
            json!({
                "contractFilter": {
                    "network": "ETHEREUM_MAINNET",
                    "tokenStandard": "ERC721",
                    "deployerAddress": "0xdeployer"
                }
            })
        );
    }
}
