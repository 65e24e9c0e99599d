/*!
 * Amazon Managed Blockchain administration facades
 *
 * Each facade wraps one resource family and is generic over the
 * [`BlockchainApi`] it talks to, so the same code runs against the AWS SDK
 * or against [`MockBlockchain`](crate::mock::MockBlockchain).
 *
 * Some operations catch remote errors, log them and return a sentinel
 * (`None`, `false` or an empty list); the rest hand back a
 * [`ServiceResult`]. Each method's documentation says which.
 *
 * # Example
 *
 * ```no_run
 * use ambkit::blockchain::ManagedBlockchain;
 * use ambkit::config::AmbConfig;
 *
 * #[tokio::main]
 * async fn main() {
 *     let amb = ManagedBlockchain::from_config(&AmbConfig::from_env()).await;
 *     for network in amb.networks().list_all_networks(&Default::default()).await {
 *         println!("{:?} {:?}", network.id, network.status);
 *     }
 * }
 * ```
 */

pub mod accessors;
pub mod invitations;
pub mod members;
pub mod network;
pub mod nodes;
pub mod paginator;
pub mod proposals;
pub mod tags;
pub mod utils;
pub mod waiter;

pub use accessors::AccessorApi;
pub use invitations::InvitationApi;
pub use members::{MemberApi, MemberSpec};
pub use network::{NetworkApi, NetworkSpec};
pub use nodes::{NodeApi, NodeSpec};
pub use paginator::{BlockchainPaginator, ListRequest, PageableOperation};
pub use proposals::{ProposalApi, VOTE_NO, VOTE_YES};
pub use tags::TagApi;
pub use utils::{can_paginate, format_timestamp, handle_errors};
pub use waiter::{BlockchainWaiter, WaiterConfig};

use crate::config::AmbConfig;
use crate::model::{NetworkFilter, NetworkSummary, Transaction, DEFAULT_QUERY_NETWORK};
use crate::pagination::Page;
use crate::query::{
    BlockchainQuery, ContractsApi, QueryPaginator, TokenBalancesApi, TransactionEventsApi,
    TransactionsApi,
};
use crate::service::{AwsClients, BlockchainApi, QueryApi, SdkBlockchain, SdkQuery, ServiceResult};

/// Both APIs behind one handle
///
/// Facades are created on demand and share the underlying clients.
#[derive(Debug, Clone)]
pub struct ManagedBlockchain<B = SdkBlockchain, Q = SdkQuery> {
    admin: B,
    query: Q,
    default_network: String,
}

impl ManagedBlockchain {
    /// Build SDK clients from `config`
    pub async fn from_config(config: &AmbConfig) -> Self {
        let clients = AwsClients::new(config).await;
        Self::new(
            SdkBlockchain::new(clients.blockchain),
            SdkQuery::new(clients.query),
        )
        .with_default_network(config.default_network.clone())
    }
}

impl<B, Q> ManagedBlockchain<B, Q>
where
    B: BlockchainApi + Clone,
    Q: QueryApi + Clone,
{
    pub fn new(admin: B, query: Q) -> Self {
        Self {
            admin,
            query,
            default_network: DEFAULT_QUERY_NETWORK.to_string(),
        }
    }

    /// Query network used when a call passes `None`
    pub fn with_default_network(mut self, network: impl Into<String>) -> Self {
        self.default_network = network.into();
        self
    }

    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    pub fn admin_api(&self) -> &B {
        &self.admin
    }

    pub fn query_api(&self) -> &Q {
        &self.query
    }

    pub fn networks(&self) -> NetworkApi<B> {
        NetworkApi::new(self.admin.clone())
    }

    pub fn members(&self) -> MemberApi<B> {
        MemberApi::new(self.admin.clone())
    }

    pub fn nodes(&self) -> NodeApi<B> {
        NodeApi::new(self.admin.clone())
    }

    pub fn proposals(&self) -> ProposalApi<B> {
        ProposalApi::new(self.admin.clone())
    }

    pub fn invitations(&self) -> InvitationApi<B> {
        InvitationApi::new(self.admin.clone())
    }

    pub fn accessors(&self) -> AccessorApi<B> {
        AccessorApi::new(self.admin.clone())
    }

    pub fn tags(&self) -> TagApi<B> {
        TagApi::new(self.admin.clone())
    }

    pub fn paginator(&self) -> BlockchainPaginator<B> {
        BlockchainPaginator::new(self.admin.clone())
    }

    pub fn waiter(&self) -> BlockchainWaiter<B> {
        BlockchainWaiter::new(self.admin.clone())
    }

    pub fn transactions(&self) -> TransactionsApi<Q> {
        TransactionsApi::new(self.query.clone()).with_default_network(self.default_network.clone())
    }

    pub fn transaction_events(&self) -> TransactionEventsApi<Q> {
        TransactionEventsApi::new(self.query.clone())
            .with_default_network(self.default_network.clone())
    }

    pub fn token_balances(&self) -> TokenBalancesApi<Q> {
        TokenBalancesApi::new(self.query.clone()).with_default_network(self.default_network.clone())
    }

    pub fn contracts(&self) -> ContractsApi<Q> {
        ContractsApi::new(self.query.clone())
    }

    pub fn query(&self) -> BlockchainQuery<Q> {
        BlockchainQuery::new(self.query.clone()).with_default_network(self.default_network.clone())
    }

    pub fn query_paginator(&self) -> QueryPaginator<Q> {
        QueryPaginator::new(self.query.clone()).with_default_network(self.default_network.clone())
    }

    /// First page of networks visible to the account
    pub async fn list_networks(&self) -> ServiceResult<Page<NetworkSummary>> {
        self.networks().list_networks(&NetworkFilter::default()).await
    }

    /// Transaction details, on the default network unless one is given
    pub async fn get_transaction(
        &self,
        transaction_hash: &str,
        network: Option<&str>,
    ) -> ServiceResult<Transaction> {
        self.transactions()
            .get_transaction(transaction_hash, network)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBlockchain;

    fn amb(mock: &MockBlockchain) -> ManagedBlockchain<MockBlockchain, MockBlockchain> {
        ManagedBlockchain::new(mock.clone(), mock.clone())
    }

    #[tokio::test]
    async fn test_list_networks_unfiltered() {
        let mock = MockBlockchain::new();
        let page = amb(&mock).list_networks().await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(mock.last_call("ListNetworks").unwrap(), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_get_transaction_uses_default_network() {
        let mock = MockBlockchain::new();
        mock.respond(
            "GetTransaction",
            Transaction {
                transaction_hash: "0xabc".to_string(),
                ..Default::default()
            },
        );

        let amb = amb(&mock).with_default_network("POLYGON_MAINNET");
        let tx = amb.get_transaction("0xabc", None).await.unwrap();
        assert_eq!(tx.transaction_hash, "0xabc");
        assert_eq!(mock.last_call("GetTransaction").unwrap()["network"], "POLYGON_MAINNET");

        amb.get_transaction("0xabc", Some("ETHEREUM_MAINNET")).await.unwrap();
        assert_eq!(mock.last_call("GetTransaction").unwrap()["network"], "ETHEREUM_MAINNET");
    }

    #[tokio::test]
    async fn test_facades_share_the_api() {
        let mock = MockBlockchain::new();
        let amb = amb(&mock);
        amb.members().get_member("n-1", "m-1").await;
        amb.nodes().get_node("n-1", "nd-1", None).await;
        assert_eq!(mock.calls().len(), 2);
    }
}
