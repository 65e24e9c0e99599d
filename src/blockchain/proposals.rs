//! Governance proposals for Hyperledger Fabric networks

use tracing::info;
use uuid::Uuid;

use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceError, ServiceResult};

/// Vote values accepted by `VoteOnProposal`
pub const VOTE_YES: &str = "YES";
pub const VOTE_NO: &str = "NO";

#[derive(Debug, Clone)]
pub struct ProposalApi<A> {
    api: A,
}

impl<A: BlockchainApi> ProposalApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Propose membership changes, returning the proposal id or `None` on error
    ///
    /// An empty set of actions is refused without calling the service.
    pub async fn create_proposal(
        &self,
        network_id: &str,
        member_id: &str,
        actions: ProposalActions,
        description: Option<&str>,
        tags: Tags,
    ) -> Option<String> {
        if actions.is_empty() {
            let e = ServiceError::InvalidInput(
                "At least one action (invitations or removals) must be specified".to_string(),
            );
            report("CreateProposal", &e);
            return None;
        }

        let request = CreateProposalRequest {
            client_request_token: Uuid::new_v4().to_string(),
            network_id: network_id.to_string(),
            member_id: member_id.to_string(),
            actions,
            description: Some(description.unwrap_or_default().to_string()),
            tags,
        };

        match self.api.create_proposal(request).await {
            Ok(proposal_id) => {
                info!(network_id, proposal_id = %proposal_id, "Proposal created");
                Some(proposal_id)
            }
            Err(e) => {
                report("CreateProposal", &e);
                None
            }
        }
    }

    pub async fn get_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
    ) -> ServiceResult<Option<Proposal>> {
        self.api.get_proposal(network_id, proposal_id).await
    }

    pub async fn list_proposals(&self, network_id: &str) -> ServiceResult<Page<ProposalSummary>> {
        self.api
            .list_proposals(network_id, PageRequest::default())
            .await
    }

    /// Cast `vote` (`YES` or `NO`) as `voter_member_id`
    pub async fn vote_on_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
        voter_member_id: &str,
        vote: &str,
    ) -> ServiceResult<()> {
        self.api
            .vote_on_proposal(network_id, proposal_id, voter_member_id, vote)
            .await
    }

    pub async fn list_proposal_votes(
        &self,
        network_id: &str,
        proposal_id: &str,
    ) -> ServiceResult<Page<VoteSummary>> {
        self.api
            .list_proposal_votes(network_id, proposal_id, PageRequest::default())
            .await
    }
}
