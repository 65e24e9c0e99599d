//! Request and response shapes for the Managed Blockchain administration API
//!
//! Field names serialize in the service's own PascalCase so JSON output lines
//! up with the API reference. Enum-valued fields (framework, status, edition,
//! ...) stay as the service's wire strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::service::{ServiceError, ServiceResult};

/// Resource tags
pub type Tags = HashMap<String, String>;

/// Accessor type issued by `CreateAccessor`
pub const ACCESSOR_TYPE_BILLING_TOKEN: &str = "BILLING_TOKEN";

/// Default state database for Fabric peer nodes
pub const DEFAULT_STATE_DB: &str = "CouchDB";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApprovalThresholdPolicy {
    pub threshold_percentage: Option<i32>,
    pub proposal_duration_in_hours: Option<i32>,
    /// `GREATER_THAN` or `GREATER_THAN_OR_EQUAL_TO`
    pub threshold_comparator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VotingPolicy {
    pub approval_threshold_policy: Option<ApprovalThresholdPolicy>,
}

impl VotingPolicy {
    pub fn approval_threshold(policy: ApprovalThresholdPolicy) -> Self {
        Self {
            approval_threshold_policy: Some(policy),
        }
    }
}

// ---------------------------------------------------------------------------
// Log publishing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogConfiguration {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogConfigurations {
    pub cloudwatch: Option<LogConfiguration>,
}

impl LogConfigurations {
    /// CloudWatch publishing switched on or off
    pub fn cloudwatch(enabled: bool) -> Self {
        Self {
            cloudwatch: Some(LogConfiguration {
                enabled: Some(enabled),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberFabricLogPublishingConfiguration {
    pub ca_logs: Option<LogConfigurations>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberLogPublishingConfiguration {
    pub fabric: Option<MemberFabricLogPublishingConfiguration>,
}

impl MemberLogPublishingConfiguration {
    pub fn ca_logs(enabled: bool) -> Self {
        Self {
            fabric: Some(MemberFabricLogPublishingConfiguration {
                ca_logs: Some(LogConfigurations::cloudwatch(enabled)),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeFabricLogPublishingConfiguration {
    pub chaincode_logs: Option<LogConfigurations>,
    pub peer_logs: Option<LogConfigurations>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeLogPublishingConfiguration {
    pub fabric: Option<NodeFabricLogPublishingConfiguration>,
}

impl NodeLogPublishingConfiguration {
    pub fn fabric(chaincode_logs: bool, peer_logs: bool) -> Self {
        Self {
            fabric: Some(NodeFabricLogPublishingConfiguration {
                chaincode_logs: Some(LogConfigurations::cloudwatch(chaincode_logs)),
                peer_logs: Some(LogConfigurations::cloudwatch(peer_logs)),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub framework: Option<String>,
    pub framework_version: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkFabricAttributes {
    pub ordering_service_endpoint: Option<String>,
    pub edition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkEthereumAttributes {
    pub chain_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkFrameworkAttributes {
    pub fabric: Option<NetworkFabricAttributes>,
    pub ethereum: Option<NetworkEthereumAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Network {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub framework: Option<String>,
    pub framework_version: Option<String>,
    pub framework_attributes: Option<NetworkFrameworkAttributes>,
    pub vpc_endpoint_service_name: Option<String>,
    pub voting_policy: Option<VotingPolicy>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub tags: Tags,
    pub arn: Option<String>,
}

/// Filters accepted by `ListNetworks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkFilter {
    pub name: Option<String>,
    pub framework: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkFabricConfiguration {
    /// `STARTER` or `STANDARD`
    pub edition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkFrameworkConfiguration {
    pub fabric: Option<NetworkFabricConfiguration>,
}

impl NetworkFrameworkConfiguration {
    pub fn fabric_edition(edition: impl Into<String>) -> Self {
        Self {
            fabric: Some(NetworkFabricConfiguration {
                edition: edition.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateNetworkRequest {
    pub client_request_token: String,
    pub name: String,
    pub description: Option<String>,
    pub framework: String,
    pub framework_version: String,
    pub framework_configuration: Option<NetworkFrameworkConfiguration>,
    pub voting_policy: VotingPolicy,
    pub member_configuration: MemberConfiguration,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateNetworkOutput {
    pub network_id: Option<String>,
    pub member_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberFabricConfiguration {
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberFrameworkConfiguration {
    pub fabric: Option<MemberFabricConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberConfiguration {
    pub name: String,
    pub description: Option<String>,
    pub framework_configuration: MemberFrameworkConfiguration,
    pub log_publishing_configuration: Option<MemberLogPublishingConfiguration>,
    pub tags: Tags,
    pub kms_key_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMemberRequest {
    pub client_request_token: String,
    pub invitation_id: String,
    pub network_id: String,
    pub member_configuration: MemberConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberFabricAttributes {
    pub admin_username: Option<String>,
    pub ca_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberFrameworkAttributes {
    pub fabric: Option<MemberFabricAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Member {
    pub network_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub framework_attributes: Option<MemberFrameworkAttributes>,
    pub log_publishing_configuration: Option<MemberLogPublishingConfiguration>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub tags: Tags,
    pub arn: Option<String>,
    pub kms_key_arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub is_owned: Option<bool>,
    pub arn: Option<String>,
}

/// Filters accepted by `ListMembers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MemberFilter {
    pub name: Option<String>,
    pub status: Option<String>,
    pub is_owned: Option<bool>,
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeConfiguration {
    pub instance_type: String,
    pub availability_zone: Option<String>,
    pub log_publishing_configuration: Option<NodeLogPublishingConfiguration>,
    #[serde(rename = "StateDB")]
    pub state_db: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateNodeRequest {
    pub client_request_token: String,
    pub network_id: String,
    pub member_id: Option<String>,
    pub node_configuration: NodeConfiguration,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeFabricAttributes {
    pub peer_endpoint: Option<String>,
    pub peer_event_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeEthereumAttributes {
    pub http_endpoint: Option<String>,
    pub web_socket_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeFrameworkAttributes {
    pub fabric: Option<NodeFabricAttributes>,
    pub ethereum: Option<NodeEthereumAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Node {
    pub network_id: Option<String>,
    pub member_id: Option<String>,
    pub id: Option<String>,
    pub instance_type: Option<String>,
    pub availability_zone: Option<String>,
    pub framework_attributes: Option<NodeFrameworkAttributes>,
    pub log_publishing_configuration: Option<NodeLogPublishingConfiguration>,
    #[serde(rename = "StateDB")]
    pub state_db: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub tags: Tags,
    pub arn: Option<String>,
    pub kms_key_arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeSummary {
    pub id: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub availability_zone: Option<String>,
    pub instance_type: Option<String>,
    pub arn: Option<String>,
}

/// Filters accepted by `ListNodes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeFilter {
    pub member_id: Option<String>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InviteAction {
    /// AWS account id to invite
    pub principal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RemoveAction {
    pub member_id: String,
}

/// Membership changes carried by a proposal
///
/// Always holds at least one invitation or removal when built through
/// [`ProposalActions::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProposalActions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invitations: Vec<InviteAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removals: Vec<RemoveAction>,
}

impl ProposalActions {
    /// Build actions from AWS account ids to invite and member ids to remove
    pub fn new<I, R>(invitations: I, removals: R) -> ServiceResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let actions = Self {
            invitations: invitations
                .into_iter()
                .map(|principal| InviteAction {
                    principal: principal.into(),
                })
                .collect(),
            removals: removals
                .into_iter()
                .map(|member_id| RemoveAction {
                    member_id: member_id.into(),
                })
                .collect(),
        };

        if actions.is_empty() {
            return Err(ServiceError::InvalidInput(
                "At least one action (invitations or removals) must be specified".to_string(),
            ));
        }
        Ok(actions)
    }

    pub fn is_empty(&self) -> bool {
        self.invitations.is_empty() && self.removals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateProposalRequest {
    pub client_request_token: String,
    pub network_id: String,
    pub member_id: String,
    pub actions: ProposalActions,
    pub description: Option<String>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Proposal {
    pub proposal_id: Option<String>,
    pub network_id: Option<String>,
    pub description: Option<String>,
    pub actions: Option<ProposalActions>,
    pub proposed_by_member_id: Option<String>,
    pub proposed_by_member_name: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub yes_vote_count: Option<i32>,
    pub no_vote_count: Option<i32>,
    pub outstanding_vote_count: Option<i32>,
    pub tags: Tags,
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProposalSummary {
    pub proposal_id: Option<String>,
    pub description: Option<String>,
    pub proposed_by_member_id: Option<String>,
    pub proposed_by_member_name: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VoteSummary {
    /// `YES` or `NO`
    pub vote: Option<String>,
    pub member_name: Option<String>,
    pub member_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Invitations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Invitation {
    pub invitation_id: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub network_summary: Option<NetworkSummary>,
    pub arn: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAccessorRequest {
    pub client_request_token: String,
    pub accessor_type: String,
    pub network_type: Option<String>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateAccessorOutput {
    pub accessor_id: Option<String>,
    pub billing_token: Option<String>,
    pub network_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Accessor {
    pub id: Option<String>,
    #[serde(rename = "Type")]
    pub accessor_type: Option<String>,
    pub billing_token: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub arn: Option<String>,
    pub tags: Tags,
    pub network_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccessorSummary {
    pub id: Option<String>,
    #[serde(rename = "Type")]
    pub accessor_type: Option<String>,
    pub status: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub arn: Option<String>,
    pub network_type: Option<String>,
}

/// Flattened accessor listing entry with a printable creation date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessorRecord {
    pub id: String,
    #[serde(rename = "Type")]
    pub accessor_type: String,
    pub status: String,
    pub creation_date: String,
    pub arn: String,
    pub network_type: String,
}
