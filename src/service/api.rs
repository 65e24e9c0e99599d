//! Remote operation traits
//!
//! One method per remote operation. The SDK-backed clients and the in-memory
//! mock both implement these, and every facade is written against them.

use async_trait::async_trait;

use super::error::ServiceResult;
use crate::model::*;
use crate::pagination::{Page, PageRequest};

/// Amazon Managed Blockchain administration operations
#[async_trait]
pub trait BlockchainApi: Send + Sync {
    // Networks

    async fn create_network(&self, request: CreateNetworkRequest)
        -> ServiceResult<CreateNetworkOutput>;

    /// `Ok(None)` when the service answered without a network body
    async fn get_network(&self, network_id: &str) -> ServiceResult<Option<Network>>;

    async fn list_networks(
        &self,
        filter: &NetworkFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NetworkSummary>>;

    // Members

    /// Returns the new member id
    async fn create_member(&self, request: CreateMemberRequest) -> ServiceResult<String>;

    async fn get_member(&self, network_id: &str, member_id: &str)
        -> ServiceResult<Option<Member>>;

    async fn list_members(
        &self,
        network_id: &str,
        filter: &MemberFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<MemberSummary>>;

    async fn update_member(
        &self,
        network_id: &str,
        member_id: &str,
        log_publishing: Option<MemberLogPublishingConfiguration>,
    ) -> ServiceResult<()>;

    async fn delete_member(&self, network_id: &str, member_id: &str) -> ServiceResult<()>;

    // Nodes

    /// Returns the new node id
    async fn create_node(&self, request: CreateNodeRequest) -> ServiceResult<String>;

    async fn get_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<Option<Node>>;

    async fn list_nodes(
        &self,
        network_id: &str,
        filter: &NodeFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NodeSummary>>;

    async fn update_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
        log_publishing: Option<NodeLogPublishingConfiguration>,
    ) -> ServiceResult<()>;

    async fn delete_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<()>;

    // Proposals

    /// Returns the new proposal id
    async fn create_proposal(&self, request: CreateProposalRequest) -> ServiceResult<String>;

    async fn get_proposal(&self, network_id: &str, proposal_id: &str)
        -> ServiceResult<Option<Proposal>>;

    async fn list_proposals(
        &self,
        network_id: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<ProposalSummary>>;

    async fn vote_on_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
        voter_member_id: &str,
        vote: &str,
    ) -> ServiceResult<()>;

    async fn list_proposal_votes(
        &self,
        network_id: &str,
        proposal_id: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<VoteSummary>>;

    // Invitations

    async fn list_invitations(&self, page: PageRequest) -> ServiceResult<Page<Invitation>>;

    async fn reject_invitation(&self, invitation_id: &str) -> ServiceResult<()>;

    // Accessors

    async fn create_accessor(&self, request: CreateAccessorRequest)
        -> ServiceResult<CreateAccessorOutput>;

    async fn get_accessor(&self, accessor_id: &str) -> ServiceResult<Option<Accessor>>;

    async fn list_accessors(
        &self,
        network_type: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<AccessorSummary>>;

    async fn delete_accessor(&self, accessor_id: &str) -> ServiceResult<()>;

    // Tags

    async fn list_tags_for_resource(&self, resource_arn: &str) -> ServiceResult<Tags>;

    async fn tag_resource(&self, resource_arn: &str, tags: Tags) -> ServiceResult<()>;

    async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<String>)
        -> ServiceResult<()>;
}

/// Amazon Managed Blockchain Query operations
#[async_trait]
pub trait QueryApi: Send + Sync {
    async fn get_transaction(
        &self,
        transaction_hash: &str,
        network: &str,
    ) -> ServiceResult<Transaction>;

    async fn list_transactions(
        &self,
        address: &str,
        network: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionOutputItem>>;

    async fn list_transaction_events(
        &self,
        transaction_hash: &str,
        network: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionEvent>>;

    async fn list_filtered_transaction_events(
        &self,
        request: &FilteredEventsRequest,
        page: PageRequest,
    ) -> ServiceResult<Page<TransactionEvent>>;

    async fn list_token_balances(
        &self,
        request: &TokenBalancesRequest,
        page: PageRequest,
    ) -> ServiceResult<Page<TokenBalance>>;

    async fn get_token_balance(&self, request: &TokenBalanceRequest) -> ServiceResult<TokenBalance>;

    async fn list_asset_contracts(
        &self,
        filter: &ContractFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<AssetContract>>;
}
