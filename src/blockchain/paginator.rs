//! Name-driven pagination over the admin list operations

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::*;
use crate::pagination::{collect_pages_partial, Page, PageRequest, PaginationConfig};
use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceError, ServiceResult};

/// Admin operations that hand back a continuation token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageableOperation {
    ListNetworks,
    ListMembers,
    ListNodes,
    ListProposals,
    ListProposalVotes,
    ListInvitations,
    ListAccessors,
}

impl PageableOperation {
    pub const ALL: [PageableOperation; 7] = [
        PageableOperation::ListNetworks,
        PageableOperation::ListMembers,
        PageableOperation::ListNodes,
        PageableOperation::ListProposals,
        PageableOperation::ListProposalVotes,
        PageableOperation::ListInvitations,
        PageableOperation::ListAccessors,
    ];

    /// snake_case name, e.g. `list_networks`
    pub fn name(&self) -> &'static str {
        match self {
            PageableOperation::ListNetworks => "list_networks",
            PageableOperation::ListMembers => "list_members",
            PageableOperation::ListNodes => "list_nodes",
            PageableOperation::ListProposals => "list_proposals",
            PageableOperation::ListProposalVotes => "list_proposal_votes",
            PageableOperation::ListInvitations => "list_invitations",
            PageableOperation::ListAccessors => "list_accessors",
        }
    }

    /// Remote operation name, e.g. `ListNetworks`
    pub fn operation_name(&self) -> &'static str {
        match self {
            PageableOperation::ListNetworks => "ListNetworks",
            PageableOperation::ListMembers => "ListMembers",
            PageableOperation::ListNodes => "ListNodes",
            PageableOperation::ListProposals => "ListProposals",
            PageableOperation::ListProposalVotes => "ListProposalVotes",
            PageableOperation::ListInvitations => "ListInvitations",
            PageableOperation::ListAccessors => "ListAccessors",
        }
    }
}

impl fmt::Display for PageableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageableOperation {
    type Err = ServiceError;

    /// Accepts both `list_networks` and `ListNetworks`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageableOperation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s || op.operation_name() == s)
            .ok_or_else(|| ServiceError::NotPageable(s.to_string()))
    }
}

/// A list operation together with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ListRequest {
    Networks(NetworkFilter),
    Members {
        network_id: String,
        filter: MemberFilter,
    },
    Nodes {
        network_id: String,
        filter: NodeFilter,
    },
    Proposals {
        network_id: String,
    },
    ProposalVotes {
        network_id: String,
        proposal_id: String,
    },
    Invitations,
    Accessors {
        network_type: Option<String>,
    },
}

impl ListRequest {
    pub fn operation(&self) -> PageableOperation {
        match self {
            ListRequest::Networks(_) => PageableOperation::ListNetworks,
            ListRequest::Members { .. } => PageableOperation::ListMembers,
            ListRequest::Nodes { .. } => PageableOperation::ListNodes,
            ListRequest::Proposals { .. } => PageableOperation::ListProposals,
            ListRequest::ProposalVotes { .. } => PageableOperation::ListProposalVotes,
            ListRequest::Invitations => PageableOperation::ListInvitations,
            ListRequest::Accessors { .. } => PageableOperation::ListAccessors,
        }
    }
}

/// Generic pagination over any admin list operation
///
/// Items come back as JSON values in the service's PascalCase shape.
#[derive(Debug, Clone)]
pub struct BlockchainPaginator<A> {
    api: A,
}

impl<A: BlockchainApi> BlockchainPaginator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Resolve `operation_name`, or `None` when it cannot be paginated
    pub fn get_paginator(&self, operation_name: &str) -> Option<PageableOperation> {
        match operation_name.parse() {
            Ok(op) => Some(op),
            Err(_) => {
                warn!("Operation '{}' is not pageable.", operation_name);
                None
            }
        }
    }

    /// Walk every page of `request`
    ///
    /// On error the failure is logged and the items gathered so far are
    /// returned.
    pub async fn paginate_operation(
        &self,
        request: &ListRequest,
        config: &PaginationConfig,
    ) -> Vec<Value> {
        let operation = request.operation();
        let (items, error) =
            collect_pages_partial(config, |page| self.fetch(request, page)).await;
        if let Some(e) = error {
            report(operation.operation_name(), &e);
        }

        debug!(operation = %operation, items = items.len(), "Pagination finished");
        items
    }

    async fn fetch(&self, request: &ListRequest, page: PageRequest) -> ServiceResult<Page<Value>> {
        match request {
            ListRequest::Networks(filter) => to_values(self.api.list_networks(filter, page).await?),
            ListRequest::Members { network_id, filter } => {
                to_values(self.api.list_members(network_id, filter, page).await?)
            }
            ListRequest::Nodes { network_id, filter } => {
                to_values(self.api.list_nodes(network_id, filter, page).await?)
            }
            ListRequest::Proposals { network_id } => {
                to_values(self.api.list_proposals(network_id, page).await?)
            }
            ListRequest::ProposalVotes {
                network_id,
                proposal_id,
            } => to_values(
                self.api
                    .list_proposal_votes(network_id, proposal_id, page)
                    .await?,
            ),
            ListRequest::Invitations => to_values(self.api.list_invitations(page).await?),
            ListRequest::Accessors { network_type } => to_values(
                self.api
                    .list_accessors(network_type.as_deref(), page)
                    .await?,
            ),
        }
    }
}

fn to_values<T: Serialize>(page: Page<T>) -> ServiceResult<Page<Value>> {
    let items = page
        .items
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServiceError::Sdk(format!("unserializable list item: {}", e)))?;
    Ok(Page::new(items, page.next_token))
}
