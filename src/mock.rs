//! In-memory Managed Blockchain implementation for testing
//!
//! [`MockBlockchain`] implements both [`BlockchainApi`] and [`QueryApi`]. It
//! records every request in the service's wire shape and answers from
//! scripted responses, so facades can be exercised without AWS.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::{BlockchainApi, QueryApi, ServiceError, ServiceResult};

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Remote operation name, e.g. `CreateNetwork`
    pub operation: String,
    /// Request parameters as the service would receive them
    pub params: Value,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    replies: HashMap<String, VecDeque<ServiceResult<Value>>>,
}

/// Scripted in-memory service
///
/// Replies queued for an operation are consumed in order; the last one is
/// repeated once the queue is down to it. An operation with nothing queued
/// answers with the default value of its result type (empty page, `None`,
/// empty string).
///
/// # Example
///
/// ```rust
/// use ambkit::mock::MockBlockchain;
/// use ambkit::blockchain::NetworkApi;
/// use ambkit::model::Network;
///
/// #[tokio::main]
/// async fn main() {
///     let mock = MockBlockchain::new();
///     mock.respond("GetNetwork", Some(Network { id: Some("n-1".into()), ..Default::default() }));
///
///     let networks = NetworkApi::new(mock.clone());
///     let network = networks.get_network("n-1").await.unwrap();
///     assert_eq!(network.id.as_deref(), Some("n-1"));
///     assert_eq!(mock.last_call("GetNetwork").unwrap()["NetworkId"], "n-1");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBlockchain {
    state: Arc<Mutex<MockState>>,
}

impl MockBlockchain {
    /// Create a mock with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a successful reply for `operation`
    pub fn respond(&self, operation: &str, value: impl Serialize) {
        let reply = serde_json::to_value(value)
            .map_err(|e| ServiceError::Sdk(format!("unserializable mock reply: {}", e)));
        self.push(operation, reply);
    }

    /// Queue a failure for `operation`
    pub fn fail(&self, operation: &str, error: ServiceError) {
        self.push(operation, Err(error));
    }

    fn push(&self, operation: &str, reply: ServiceResult<Value>) {
        self.state()
            .replies
            .entry(operation.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Every recorded request, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Parameters of each request made to `operation`
    pub fn calls_to(&self, operation: &str) -> Vec<Value> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.params.clone())
            .collect()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls_to(operation).len()
    }

    /// Parameters of the most recent request to `operation`
    pub fn last_call(&self, operation: &str) -> Option<Value> {
        self.calls_to(operation).pop()
    }

    /// Forget recorded calls and scripted replies
    pub fn clear(&self) {
        let mut state = self.state();
        state.calls.clear();
        state.replies.clear();
    }

    fn reply<T>(&self, operation: &str, params: Value) -> ServiceResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let mut state = self.state();
        state.calls.push(RecordedCall {
            operation: operation.to_string(),
            params,
        });

        let reply = match state.replies.get_mut(operation) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            None => Ok(T::default()),
            Some(Err(e)) => Err(e),
            Some(Ok(value)) => serde_json::from_value(value).map_err(|e| {
                ServiceError::Sdk(format!("mock reply for {} has the wrong shape: {}", operation, e))
            }),
        }
    }
}

fn paged(mut params: Value, page: &PageRequest) -> Value {
    if let Some(map) = params.as_object_mut() {
        if let Some(max) = page.max_results {
            map.insert("MaxResults".to_string(), json!(max));
        }
        if let Some(token) = &page.next_token {
            map.insert("NextToken".to_string(), json!(token));
        }
    }
    params
}

fn paged_camel(mut params: Value, page: &PageRequest) -> Value {
    if let Some(map) = params.as_object_mut() {
        if let Some(max) = page.max_results {
            map.insert("maxResults".to_string(), json!(max));
        }
        if let Some(token) = &page.next_token {
            map.insert("nextToken".to_string(), json!(token));
        }
    }
    params
}

/// Serialize and drop null fields at every depth
fn shape(value: impl Serialize) -> Value {
    let mut value = serde_json::to_value(value).unwrap_or(Value::Null);
    strip_nulls(&mut value);
    value
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base_map), Value::Object(extra_map)) = (base.as_object_mut(), extra) {
        base_map.extend(extra_map);
    }
    base
}

#[async_trait]
impl BlockchainApi for MockBlockchain {
    async fn create_network(
        &self,
        request: CreateNetworkRequest,
    ) -> ServiceResult<CreateNetworkOutput> {
        self.reply("CreateNetwork", shape(&request))
    }

    async fn get_network(&self, network_id: &str) -> ServiceResult<Option<Network>> {
        self.reply("GetNetwork", json!({ "NetworkId": network_id }))
    }

    async fn list_networks(
        &self,
        filter: &NetworkFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NetworkSummary>> {
        self.reply("ListNetworks", paged(shape(filter), &page))
    }

    async fn create_member(&self, request: CreateMemberRequest) -> ServiceResult<String> {
        self.reply("CreateMember", shape(&request))
    }

    async fn get_member(&self, network_id: &str, member_id: &str) -> ServiceResult<Option<Member>> {
        self.reply(
            "GetMember",
            json!({ "NetworkId": network_id, "MemberId": member_id }),
        )
    }

    async fn list_members(
        &self,
        network_id: &str,
        filter: &MemberFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<MemberSummary>> {
        let params = merge(json!({ "NetworkId": network_id }), shape(filter));
        self.reply("ListMembers", paged(params, &page))
    }

    async fn update_member(
        &self,
        network_id: &str,
        member_id: &str,
        log_publishing: Option<MemberLogPublishingConfiguration>,
    ) -> ServiceResult<()> {
        let mut params = json!({ "NetworkId": network_id, "MemberId": member_id });
        if let Some(config) = log_publishing {
            params["LogPublishingConfiguration"] = shape(config);
        }
        self.reply("UpdateMember", params)
    }

    async fn delete_member(&self, network_id: &str, member_id: &str) -> ServiceResult<()> {
        self.reply(
            "DeleteMember",
            json!({ "NetworkId": network_id, "MemberId": member_id }),
        )
    }

    async fn create_node(&self, request: CreateNodeRequest) -> ServiceResult<String> {
        self.reply("CreateNode", shape(&request))
    }

    async fn get_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<Option<Node>> {
        let mut params = json!({ "NetworkId": network_id, "NodeId": node_id });
        if let Some(member_id) = member_id {
            params["MemberId"] = json!(member_id);
        }
        self.reply("GetNode", params)
    }

    async fn list_nodes(
        &self,
        network_id: &str,
        filter: &NodeFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NodeSummary>> {
        let params = merge(json!({ "NetworkId": network_id }), shape(filter));
        self.reply("ListNodes", paged(params, &page))
    }

    async fn update_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
        log_publishing: Option<NodeLogPublishingConfiguration>,
    ) -> ServiceResult<()> {
        let mut params = json!({ "NetworkId": network_id, "NodeId": node_id });
        if let Some(member_id) = member_id {
            params["MemberId"] = json!(member_id);
        }
        if let Some(config) = log_publishing {
            params["LogPublishingConfiguration"] = shape(config);
        }
        self.reply("UpdateNode", params)
    }

    async fn delete_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<()> {
        let mut params = json!({ "NetworkId": network_id, "NodeId": node_id });
        if let Some(member_id) = member_id {
            params["MemberId"] = json!(member_id);
        }
        self.reply("DeleteNode", params)
    }

    async fn create_proposal(&self, request: CreateProposalRequest) -> ServiceResult<String> {
        self.reply("CreateProposal", shape(&request))
    }

    async fn get_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
    ) -> ServiceResult<Option<Proposal>> {
        self.reply(
            "GetProposal",
            json!({ "NetworkId": network_id, "ProposalId": proposal_id }),
        )
    }

    async fn list_proposals(
        &self,
        network_id: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<ProposalSummary>> {
        self.reply("ListProposals", paged(json!({ "NetworkId": network_id }), &page))
    }

    async fn vote_on_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
        voter_member_id: &str,
        vote: &str,
    ) -> ServiceResult<()> {
        self.reply(
            "VoteOnProposal",
            json!({
                "NetworkId": network_id,
                "ProposalId": proposal_id,
                "VoterMemberId": voter_member_id,
                "Vote": vote,
            }),
        )
    }

    async fn list_proposal_votes(
        &self,
        network_id: &str,
        proposal_id: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<VoteSummary>> {
        self.reply(
            "ListProposalVotes",
            paged(
                json!({ "NetworkId": network_id, "ProposalId": proposal_id }),
                &page,
            ),
        )
    }

    async fn list_invitations(&self, page: PageRequest) -> ServiceResult<Page<Invitation>> {
        self.reply("ListInvitations", paged(json!({}), &page))
    }

    async fn reject_invitation(&self, invitation_id: &str) -> ServiceResult<()> {
        self.reply(
            "RejectInvitation",
            json!({ "InvitationId": invitation_id }),
        )
    }

    async fn create_accessor(
        &self,
        request: CreateAccessorRequest,
    ) -> ServiceResult<CreateAccessorOutput> {
        self.reply("CreateAccessor", shape(&request))
    }

    async fn get_accessor(&self, accessor_id: &str) -> ServiceResult<Option<Accessor>> {
        self.reply("GetAccessor", json!({ "AccessorId": accessor_id }))
    }

    async fn list_accessors(
        &self,
        network_type: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<AccessorSummary>> {
        let mut params = json!({});
        if let Some(network_type) = network_type {
            params["NetworkType"] = json!(network_type);
        }
        self.reply("ListAccessors", paged(params, &page))
    }

    async fn delete_accessor(&self, accessor_id: &str) -> ServiceResult<()> {
        self.reply("DeleteAccessor", json!({ "AccessorId": accessor_id }))
    }

    async fn list_tags_for_resource(&self, resource_arn: &str) -> ServiceResult<Tags> {
        self.reply(
            "ListTagsForResource",
            json!({ "ResourceArn": resource_arn }),
        )
    }

    async fn tag_resource(&self, resource_arn: &str, tags: Tags) -> ServiceResult<()> {
        self.reply(
            "TagResource",
            json!({ "ResourceArn": resource_arn, "Tags": tags }),
        )
    }

    async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<String>) -> ServiceResult<()> {
        self.reply(
            "UntagResource",
            json!({ "ResourceArn": resource_arn, "TagKeys": tag_keys }),
        )
    }
}

#[async_trait]
impl QueryApi for MockBlockchain {
    async fn get_transaction(
        &self,
        transaction_hash: &str,
        network: &str,
    ) -> ServiceResult<Transaction> {
        self.reply(
            "GetTransaction",
            json!({ "transactionHash": transaction_hash, "network": network }),
        )
    }

    async fn list_transactions(
        &self,
        address: &str,
        network: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionOutputItem>> {
        self.reply(
            "ListTransactions",
            paged_camel(json!({ "address": address, "network": network }), &page),
        )
    }

    async fn list_transaction_events(
        &self,
        transaction_hash: &str,
        network: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionEvent>> {
        self.reply(
            "ListTransactionEvents",
            paged_camel(
                json!({ "transactionHash": transaction_hash, "network": network }),
                &page,
            ),
        )
    }

    async fn list_filtered_transaction_events(
        &self,
        request: &FilteredEventsRequest,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionEvent>> {
        self.reply(
            "ListFilteredTransactionEvents",
            paged_camel(shape(request), &page),
        )
    }

    async fn list_token_balances(
        &self,
        request: &TokenBalancesRequest,
        page: PageRequest,
    ) -> ServiceResult<Page<TokenBalance>> {
        self.reply("ListTokenBalances", paged_camel(shape(request), &page))
    }

    async fn get_token_balance(&self, request: &TokenBalanceRequest) -> ServiceResult<TokenBalance> {
        self.reply("GetTokenBalance", shape(request))
    }

    async fn list_asset_contracts(
        &self,
        filter: &ContractFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<AssetContract>> {
        self.reply(
            "ListAssetContracts",
            paged_camel(json!({ "contractFilter": filter }), &page),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_operation_returns_default() {
        let mock = MockBlockchain::new();
        let network = mock.get_network("n-1").await.unwrap();
        assert!(network.is_none());

        let page = mock
            .list_networks(&NetworkFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(mock.call_count("GetNetwork"), 1);
    }

    #[tokio::test]
    async fn test_replies_are_consumed_then_last_repeats() {
        let mock = MockBlockchain::new();
        mock.fail("GetMember", ServiceError::NotFound("m-1".to_string()));
        mock.respond(
            "GetMember",
            Some(Member {
                id: Some("m-1".to_string()),
                ..Default::default()
            }),
        );

        assert!(mock.get_member("n-1", "m-1").await.unwrap_err().is_not_found());
        assert!(mock.get_member("n-1", "m-1").await.unwrap().is_some());
        assert!(mock.get_member("n-1", "m-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_records_wire_shape() {
        let mock = MockBlockchain::new();
        mock.get_node("n-1", "nd-1", None).await.unwrap();
        mock.get_node("n-1", "nd-2", Some("m-1")).await.unwrap();

        let calls = mock.calls_to("GetNode");
        assert!(calls[0].get("MemberId").is_none());
        assert_eq!(calls[1]["MemberId"], "m-1");

        mock.list_proposals(
            "n-1",
            PageRequest {
                next_token: Some("tok".to_string()),
                max_results: Some(10),
            },
        )
        .await
        .unwrap();
        let params = mock.last_call("ListProposals").unwrap();
        assert_eq!(params["NextToken"], "tok");
        assert_eq!(params["MaxResults"], 10);
    }

    #[tokio::test]
    async fn test_wrong_reply_shape_is_an_error() {
        let mock = MockBlockchain::new();
        mock.respond("GetTransaction", "not a transaction");
        let err = mock
            .get_transaction("0x1", "ETHEREUM_MAINNET")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Sdk(_)));
    }

    #[test]
    fn test_shape_drops_nested_nulls() {
        let value = shape(json!({
            "tokenFilter": { "network": "ETHEREUM_MAINNET", "tokenId": null },
            "addresses": [{ "address": "0xa", "tag": null }],
            "nextToken": null
        }));
        assert_eq!(
            value,
            json!({
                "tokenFilter": { "network": "ETHEREUM_MAINNET" },
                "addresses": [{ "address": "0xa" }]
            })
        );
    }

    #[test]
    fn test_clear() {
        let mock = MockBlockchain::new();
        mock.respond("GetNetwork", Option::<Network>::None);
        mock.clear();
        assert!(mock.calls().is_empty());
    }
}
