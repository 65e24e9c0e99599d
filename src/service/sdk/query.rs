//! Managed Blockchain Query API over `aws-sdk-managedblockchainquery`

use async_trait::async_trait;
use aws_sdk_managedblockchainquery::types as sdk;
use aws_sdk_managedblockchainquery::Client;
use tracing::debug;

use super::{owned, to_utc};
use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::api::QueryApi;
use crate::service::error::{ServiceError, ServiceResult};

/// [`QueryApi`] backed by the AWS SDK
#[derive(Clone, Debug)]
pub struct SdkQuery {
    client: Client,
}

impl SdkQuery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying AWS client
    pub fn aws_client(&self) -> &Client {
        &self.client
    }
}

fn query_network(network: &str) -> sdk::QueryNetwork {
    sdk::QueryNetwork::from(network)
}

fn transaction(tx: &sdk::Transaction) -> Transaction {
    Transaction {
        network: tx.network().as_str().to_string(),
        block_hash: owned(tx.block_hash()),
        transaction_hash: tx.transaction_hash().to_string(),
        block_number: owned(tx.block_number()),
        transaction_timestamp: to_utc(tx.transaction_timestamp()),
        transaction_index: tx.transaction_index(),
        number_of_transactions: tx.number_of_transactions(),
        to: tx.to().to_string(),
        from: owned(tx.from()),
        contract_address: owned(tx.contract_address()),
        gas_used: owned(tx.gas_used()),
        cumulative_gas_used: owned(tx.cumulative_gas_used()),
        effective_gas_price: owned(tx.effective_gas_price()),
        signature_v: tx.signature_v(),
        signature_r: owned(tx.signature_r()),
        signature_s: owned(tx.signature_s()),
        transaction_fee: owned(tx.transaction_fee()),
        transaction_id: owned(tx.transaction_id()),
        confirmation_status: tx.confirmation_status().map(|s| s.as_str().to_string()),
        execution_status: tx.execution_status().map(|s| s.as_str().to_string()),
    }
}

fn transaction_item(item: &sdk::TransactionOutputItem) -> TransactionOutputItem {
    TransactionOutputItem {
        transaction_hash: item.transaction_hash().to_string(),
        transaction_id: owned(item.transaction_id()),
        network: item.network().as_str().to_string(),
        transaction_timestamp: to_utc(item.transaction_timestamp()),
        confirmation_status: item.confirmation_status().map(|s| s.as_str().to_string()),
    }
}

fn transaction_event(event: &sdk::TransactionEvent) -> TransactionEvent {
    TransactionEvent {
        network: event.network().as_str().to_string(),
        transaction_hash: event.transaction_hash().to_string(),
        event_type: event.event_type().as_str().to_string(),
        from: owned(event.from()),
        to: owned(event.to()),
        value: owned(event.value()),
        contract_address: owned(event.contract_address()),
        token_id: owned(event.token_id()),
        transaction_id: owned(event.transaction_id()),
        vout_index: event.vout_index(),
        block_timestamp: event.blockchain_instant().and_then(|i| i.time()).and_then(to_utc),
        confirmation_status: event.confirmation_status().map(|s| s.as_str().to_string()),
    }
}

fn owner_identifier(owner: &sdk::OwnerIdentifier) -> OwnerIdentifier {
    OwnerIdentifier {
        address: owner.address().to_string(),
    }
}

fn token_identifier(token: &sdk::TokenIdentifier) -> TokenIdentifier {
    TokenIdentifier {
        network: token.network().as_str().to_string(),
        contract_address: owned(token.contract_address()),
        token_id: owned(token.token_id()),
    }
}

fn blockchain_instant(instant: &sdk::BlockchainInstant) -> BlockchainInstant {
    BlockchainInstant {
        time: instant.time().and_then(to_utc),
    }
}

fn token_balance(balance: &sdk::TokenBalance) -> TokenBalance {
    TokenBalance {
        owner_identifier: balance.owner_identifier().map(owner_identifier),
        token_identifier: balance.token_identifier().map(token_identifier),
        balance: balance.balance().to_string(),
        at_blockchain_instant: balance.at_blockchain_instant().map(blockchain_instant),
        last_updated_time: balance.last_updated_time().map(blockchain_instant),
    }
}

fn asset_contract(contract: &sdk::AssetContract) -> AssetContract {
    AssetContract {
        contract_identifier: contract.contract_identifier().map(|c| ContractIdentifier {
            network: c.network().as_str().to_string(),
            contract_address: c.contract_address().to_string(),
        }),
        token_standard: contract.token_standard().as_str().to_string(),
        deployer_address: contract.deployer_address().to_string(),
    }
}

fn token_identifier_input(token: &TokenIdentifier) -> ServiceResult<sdk::TokenIdentifier> {
    Ok(sdk::TokenIdentifier::builder()
        .network(query_network(&token.network))
        .set_contract_address(token.contract_address.clone())
        .set_token_id(token.token_id.clone())
        .build()?)
}

#[async_trait]
impl QueryApi for SdkQuery {
    async fn get_transaction(
        &self,
        transaction_hash: &str,
        network: &str,
    ) -> ServiceResult<Transaction> {
        debug!(transaction_hash, network, "GetTransaction");
        let output = self
            .client
            .get_transaction()
            .transaction_hash(transaction_hash)
            .network(query_network(network))
            .send()
            .await?;

        output.transaction().map(transaction).ok_or_else(|| {
            ServiceError::NotFound(format!("No transaction body for {}", transaction_hash))
        })
    }

    async fn list_transactions(
        &self,
        address: &str,
        network: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionOutputItem>> {
        debug!(address, network, ?page, "ListTransactions");
        let output = self
            .client
            .list_transactions()
            .address(address)
            .network(query_network(network))
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.transactions().iter().map(transaction_item).collect(),
            owned(output.next_token()),
        ))
    }

    async fn list_transaction_events(
        &self,
        transaction_hash: &str,
        network: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionEvent>> {
        debug!(transaction_hash, network, ?page, "ListTransactionEvents");
        let output = self
            .client
            .list_transaction_events()
            .transaction_hash(transaction_hash)
            .network(query_network(network))
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.events().iter().map(transaction_event).collect(),
            owned(output.next_token()),
        ))
    }

    async fn list_filtered_transaction_events(
        &self,
        request: &FilteredEventsRequest,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionEvent>> {
        debug!(network = %request.network, ?page, "ListFilteredTransactionEvents");
        let address_filter = sdk::AddressIdentifierFilter::builder()
            .set_transaction_event_to_address(Some(
                request
                    .address_identifier_filter
                    .transaction_event_to_address
                    .clone(),
            ))
            .build()?;

        let output = self
            .client
            .list_filtered_transaction_events()
            .network(&request.network)
            .address_identifier_filter(address_filter)
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.events().iter().map(transaction_event).collect(),
            owned(output.next_token()),
        ))
    }

    async fn list_token_balances(
        &self,
        request: &TokenBalancesRequest,
        page: PageRequest,
    ) -> ServiceResult<Page<TokenBalance>> {
        debug!(?request, ?page, "ListTokenBalances");
        let owner_filter = match &request.owner_filter {
            Some(owner) => Some(sdk::OwnerFilter::builder().address(&owner.address).build()?),
            None => None,
        };
        let token_filter = sdk::TokenFilter::builder()
            .network(query_network(&request.token_filter.network))
            .set_contract_address(request.token_filter.contract_address.clone())
            .set_token_id(request.token_filter.token_id.clone())
            .build()?;

        let output = self
            .client
            .list_token_balances()
            .set_owner_filter(owner_filter)
            .token_filter(token_filter)
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.token_balances().iter().map(token_balance).collect(),
            owned(output.next_token()),
        ))
    }

    async fn get_token_balance(&self, request: &TokenBalanceRequest) -> ServiceResult<TokenBalance> {
        debug!(?request, "GetTokenBalance");
        let owner = sdk::OwnerIdentifier::builder()
            .address(&request.owner_identifier.address)
            .build()?;
        let token = token_identifier_input(&request.token_identifier)?;

        let output = self
            .client
            .get_token_balance()
            .owner_identifier(owner)
            .token_identifier(token)
            .send()
            .await?;

        Ok(TokenBalance {
            owner_identifier: output.owner_identifier().map(owner_identifier),
            token_identifier: output.token_identifier().map(token_identifier),
            balance: output.balance().to_string(),
            at_blockchain_instant: output.at_blockchain_instant().map(blockchain_instant),
            last_updated_time: output.last_updated_time().map(blockchain_instant),
        })
    }

    async fn list_asset_contracts(
        &self,
        filter: &ContractFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<AssetContract>> {
        debug!(?filter, ?page, "ListAssetContracts");
        let contract_filter = sdk::ContractFilter::builder()
            .network(query_network(&filter.network))
            .token_standard(sdk::QueryTokenStandard::from(filter.token_standard.as_str()))
            .deployer_address(&filter.deployer_address)
            .build()?;

        let output = self
            .client
            .list_asset_contracts()
            .contract_filter(contract_filter)
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.contracts().iter().map(asset_contract).collect(),
            owned(output.next_token()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_identifier_input() {
        let token = TokenIdentifier {
            network: "ETHEREUM_MAINNET".to_string(),
            contract_address: Some("0xcontract".to_string()),
            token_id: None,
        };
        let built = token_identifier_input(&token).unwrap();
        assert_eq!(built.network().as_str(), "ETHEREUM_MAINNET");
        assert_eq!(built.contract_address(), Some("0xcontract"));
        assert_eq!(token_identifier(&built), token);
    }

    #[test]
    fn test_unknown_network_passes_through() {
        assert_eq!(query_network("SOME_FUTURE_NET").as_str(), "SOME_FUTURE_NET");
    }
}
