//! Managed Blockchain administration API over `aws-sdk-managedblockchain`

use async_trait::async_trait;
use aws_sdk_managedblockchain::error::BuildError;
use aws_sdk_managedblockchain::types as sdk;
use aws_sdk_managedblockchain::Client;
use tracing::debug;

use super::{owned, tags, to_utc};
use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::api::BlockchainApi;
use crate::service::error::ServiceResult;

/// [`BlockchainApi`] backed by the AWS SDK
#[derive(Clone, Debug)]
pub struct SdkBlockchain {
    client: Client,
}

impl SdkBlockchain {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying AWS client
    pub fn aws_client(&self) -> &Client {
        &self.client
    }
}

// ---------------------------------------------------------------------------
// Model -> SDK
// ---------------------------------------------------------------------------

fn log_configurations_input(config: &LogConfigurations) -> sdk::LogConfigurations {
    sdk::LogConfigurations::builder()
        .set_cloudwatch(config.cloudwatch.as_ref().map(|c| {
            sdk::LogConfiguration::builder()
                .set_enabled(c.enabled)
                .build()
        }))
        .build()
}

fn member_log_input(config: &MemberLogPublishingConfiguration) -> sdk::MemberLogPublishingConfiguration {
    sdk::MemberLogPublishingConfiguration::builder()
        .set_fabric(config.fabric.as_ref().map(|f| {
            sdk::MemberFabricLogPublishingConfiguration::builder()
                .set_ca_logs(f.ca_logs.as_ref().map(log_configurations_input))
                .build()
        }))
        .build()
}

fn node_log_input(config: &NodeLogPublishingConfiguration) -> sdk::NodeLogPublishingConfiguration {
    sdk::NodeLogPublishingConfiguration::builder()
        .set_fabric(config.fabric.as_ref().map(|f| {
            sdk::NodeFabricLogPublishingConfiguration::builder()
                .set_chaincode_logs(f.chaincode_logs.as_ref().map(log_configurations_input))
                .set_peer_logs(f.peer_logs.as_ref().map(log_configurations_input))
                .build()
        }))
        .build()
}

fn voting_policy_input(policy: &VotingPolicy) -> sdk::VotingPolicy {
    sdk::VotingPolicy::builder()
        .set_approval_threshold_policy(policy.approval_threshold_policy.as_ref().map(|p| {
            sdk::ApprovalThresholdPolicy::builder()
                .set_threshold_percentage(p.threshold_percentage)
                .set_proposal_duration_in_hours(p.proposal_duration_in_hours)
                .set_threshold_comparator(
                    p.threshold_comparator
                        .as_deref()
                        .map(sdk::ThresholdComparator::from),
                )
                .build()
        }))
        .build()
}

fn network_framework_input(
    config: &NetworkFrameworkConfiguration,
) -> Result<sdk::NetworkFrameworkConfiguration, BuildError> {
    let fabric = match &config.fabric {
        Some(f) => Some(
            sdk::NetworkFabricConfiguration::builder()
                .edition(sdk::Edition::from(f.edition.as_str()))
                .build()?,
        ),
        None => None,
    };
    Ok(sdk::NetworkFrameworkConfiguration::builder()
        .set_fabric(fabric)
        .build())
}

fn member_configuration_input(
    config: &MemberConfiguration,
) -> Result<sdk::MemberConfiguration, BuildError> {
    let fabric = match &config.framework_configuration.fabric {
        Some(f) => Some(
            sdk::MemberFabricConfiguration::builder()
                .admin_username(&f.admin_username)
                .admin_password(&f.admin_password)
                .build()?,
        ),
        None => None,
    };

    sdk::MemberConfiguration::builder()
        .name(&config.name)
        .set_description(config.description.clone())
        .framework_configuration(
            sdk::MemberFrameworkConfiguration::builder()
                .set_fabric(fabric)
                .build(),
        )
        .set_log_publishing_configuration(
            config
                .log_publishing_configuration
                .as_ref()
                .map(member_log_input),
        )
        .set_tags(Some(config.tags.clone()))
        .set_kms_key_arn(config.kms_key_arn.clone())
        .build()
}

fn node_configuration_input(config: &NodeConfiguration) -> Result<sdk::NodeConfiguration, BuildError> {
    sdk::NodeConfiguration::builder()
        .instance_type(&config.instance_type)
        .set_availability_zone(config.availability_zone.clone())
        .set_log_publishing_configuration(
            config
                .log_publishing_configuration
                .as_ref()
                .map(node_log_input),
        )
        .set_state_db(config.state_db.as_deref().map(sdk::StateDbType::from))
        .build()
}

fn proposal_actions_input(actions: &ProposalActions) -> Result<sdk::ProposalActions, BuildError> {
    let invitations = actions
        .invitations
        .iter()
        .map(|i| sdk::InviteAction::builder().principal(&i.principal).build())
        .collect::<Result<Vec<_>, _>>()?;
    let removals = actions
        .removals
        .iter()
        .map(|r| sdk::RemoveAction::builder().member_id(&r.member_id).build())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sdk::ProposalActions::builder()
        .set_invitations((!invitations.is_empty()).then_some(invitations))
        .set_removals((!removals.is_empty()).then_some(removals))
        .build())
}

// ---------------------------------------------------------------------------
// SDK -> Model
// ---------------------------------------------------------------------------

fn log_configurations(config: &sdk::LogConfigurations) -> LogConfigurations {
    LogConfigurations {
        cloudwatch: config.cloudwatch().map(|c| LogConfiguration {
            enabled: c.enabled(),
        }),
    }
}

fn member_log(config: &sdk::MemberLogPublishingConfiguration) -> MemberLogPublishingConfiguration {
    MemberLogPublishingConfiguration {
        fabric: config
            .fabric()
            .map(|f| MemberFabricLogPublishingConfiguration {
                ca_logs: f.ca_logs().map(log_configurations),
            }),
    }
}

fn node_log(config: &sdk::NodeLogPublishingConfiguration) -> NodeLogPublishingConfiguration {
    NodeLogPublishingConfiguration {
        fabric: config.fabric().map(|f| NodeFabricLogPublishingConfiguration {
            chaincode_logs: f.chaincode_logs().map(log_configurations),
            peer_logs: f.peer_logs().map(log_configurations),
        }),
    }
}

fn voting_policy(policy: &sdk::VotingPolicy) -> VotingPolicy {
    VotingPolicy {
        approval_threshold_policy: policy.approval_threshold_policy().map(|p| {
            ApprovalThresholdPolicy {
                threshold_percentage: p.threshold_percentage(),
                proposal_duration_in_hours: p.proposal_duration_in_hours(),
                threshold_comparator: p.threshold_comparator().map(|c| c.as_str().to_string()),
            }
        }),
    }
}

fn network_summary(summary: &sdk::NetworkSummary) -> NetworkSummary {
    NetworkSummary {
        id: owned(summary.id()),
        name: owned(summary.name()),
        description: owned(summary.description()),
        framework: summary.framework().map(|f| f.as_str().to_string()),
        framework_version: owned(summary.framework_version()),
        status: summary.status().map(|s| s.as_str().to_string()),
        creation_date: summary.creation_date().and_then(to_utc),
        arn: owned(summary.arn()),
    }
}

fn network(network: &sdk::Network) -> Network {
    Network {
        id: owned(network.id()),
        name: owned(network.name()),
        description: owned(network.description()),
        framework: network.framework().map(|f| f.as_str().to_string()),
        framework_version: owned(network.framework_version()),
        framework_attributes: network.framework_attributes().map(|a| NetworkFrameworkAttributes {
            fabric: a.fabric().map(|f| NetworkFabricAttributes {
                ordering_service_endpoint: owned(f.ordering_service_endpoint()),
                edition: f.edition().map(|e| e.as_str().to_string()),
            }),
            ethereum: a.ethereum().map(|e| NetworkEthereumAttributes {
                chain_id: owned(e.chain_id()),
            }),
        }),
        vpc_endpoint_service_name: owned(network.vpc_endpoint_service_name()),
        voting_policy: network.voting_policy().map(voting_policy),
        status: network.status().map(|s| s.as_str().to_string()),
        creation_date: network.creation_date().and_then(to_utc),
        tags: tags(network.tags()),
        arn: owned(network.arn()),
    }
}

fn member(member: &sdk::Member) -> Member {
    Member {
        network_id: owned(member.network_id()),
        id: owned(member.id()),
        name: owned(member.name()),
        description: owned(member.description()),
        framework_attributes: member.framework_attributes().map(|a| MemberFrameworkAttributes {
            fabric: a.fabric().map(|f| MemberFabricAttributes {
                admin_username: owned(f.admin_username()),
                ca_endpoint: owned(f.ca_endpoint()),
            }),
        }),
        log_publishing_configuration: member.log_publishing_configuration().map(member_log),
        status: member.status().map(|s| s.as_str().to_string()),
        creation_date: member.creation_date().and_then(to_utc),
        tags: tags(member.tags()),
        arn: owned(member.arn()),
        kms_key_arn: owned(member.kms_key_arn()),
    }
}

fn member_summary(summary: &sdk::MemberSummary) -> MemberSummary {
    MemberSummary {
        id: owned(summary.id()),
        name: owned(summary.name()),
        description: owned(summary.description()),
        status: summary.status().map(|s| s.as_str().to_string()),
        creation_date: summary.creation_date().and_then(to_utc),
        is_owned: summary.is_owned(),
        arn: owned(summary.arn()),
    }
}

fn node(node: &sdk::Node) -> Node {
    Node {
        network_id: owned(node.network_id()),
        member_id: owned(node.member_id()),
        id: owned(node.id()),
        instance_type: owned(node.instance_type()),
        availability_zone: owned(node.availability_zone()),
        framework_attributes: node.framework_attributes().map(|a| NodeFrameworkAttributes {
            fabric: a.fabric().map(|f| NodeFabricAttributes {
                peer_endpoint: owned(f.peer_endpoint()),
                peer_event_endpoint: owned(f.peer_event_endpoint()),
            }),
            ethereum: a.ethereum().map(|e| NodeEthereumAttributes {
                http_endpoint: owned(e.http_endpoint()),
                web_socket_endpoint: owned(e.web_socket_endpoint()),
            }),
        }),
        log_publishing_configuration: node.log_publishing_configuration().map(node_log),
        state_db: node.state_db().map(|s| s.as_str().to_string()),
        status: node.status().map(|s| s.as_str().to_string()),
        creation_date: node.creation_date().and_then(to_utc),
        tags: tags(node.tags()),
        arn: owned(node.arn()),
        kms_key_arn: owned(node.kms_key_arn()),
    }
}

fn node_summary(summary: &sdk::NodeSummary) -> NodeSummary {
    NodeSummary {
        id: owned(summary.id()),
        status: summary.status().map(|s| s.as_str().to_string()),
        creation_date: summary.creation_date().and_then(to_utc),
        availability_zone: owned(summary.availability_zone()),
        instance_type: owned(summary.instance_type()),
        arn: owned(summary.arn()),
    }
}

fn proposal_actions(actions: &sdk::ProposalActions) -> ProposalActions {
    ProposalActions {
        invitations: actions
            .invitations()
            .iter()
            .map(|i| InviteAction {
                principal: i.principal().to_string(),
            })
            .collect(),
        removals: actions
            .removals()
            .iter()
            .map(|r| RemoveAction {
                member_id: r.member_id().to_string(),
            })
            .collect(),
    }
}

fn proposal(proposal: &sdk::Proposal) -> Proposal {
    Proposal {
        proposal_id: owned(proposal.proposal_id()),
        network_id: owned(proposal.network_id()),
        description: owned(proposal.description()),
        actions: proposal.actions().map(proposal_actions),
        proposed_by_member_id: owned(proposal.proposed_by_member_id()),
        proposed_by_member_name: owned(proposal.proposed_by_member_name()),
        status: proposal.status().map(|s| s.as_str().to_string()),
        creation_date: proposal.creation_date().and_then(to_utc),
        expiration_date: proposal.expiration_date().and_then(to_utc),
        yes_vote_count: proposal.yes_vote_count(),
        no_vote_count: proposal.no_vote_count(),
        outstanding_vote_count: proposal.outstanding_vote_count(),
        tags: tags(proposal.tags()),
        arn: owned(proposal.arn()),
    }
}

fn proposal_summary(summary: &sdk::ProposalSummary) -> ProposalSummary {
    ProposalSummary {
        proposal_id: owned(summary.proposal_id()),
        description: owned(summary.description()),
        proposed_by_member_id: owned(summary.proposed_by_member_id()),
        proposed_by_member_name: owned(summary.proposed_by_member_name()),
        status: summary.status().map(|s| s.as_str().to_string()),
        creation_date: summary.creation_date().and_then(to_utc),
        expiration_date: summary.expiration_date().and_then(to_utc),
        arn: owned(summary.arn()),
    }
}

fn vote_summary(vote: &sdk::VoteSummary) -> VoteSummary {
    VoteSummary {
        vote: vote.vote().map(|v| v.as_str().to_string()),
        member_name: owned(vote.member_name()),
        member_id: owned(vote.member_id()),
    }
}

fn invitation(invitation: &sdk::Invitation) -> Invitation {
    Invitation {
        invitation_id: owned(invitation.invitation_id()),
        creation_date: invitation.creation_date().and_then(to_utc),
        expiration_date: invitation.expiration_date().and_then(to_utc),
        status: invitation.status().map(|s| s.as_str().to_string()),
        network_summary: invitation.network_summary().map(network_summary),
        arn: owned(invitation.arn()),
    }
}

fn accessor(accessor: &sdk::Accessor) -> Accessor {
    Accessor {
        id: owned(accessor.id()),
        accessor_type: accessor.r#type().map(|t| t.as_str().to_string()),
        billing_token: owned(accessor.billing_token()),
        status: accessor.status().map(|s| s.as_str().to_string()),
        creation_date: accessor.creation_date().and_then(to_utc),
        arn: owned(accessor.arn()),
        tags: tags(accessor.tags()),
        network_type: accessor.network_type().map(|n| n.as_str().to_string()),
    }
}

fn accessor_summary(summary: &sdk::AccessorSummary) -> AccessorSummary {
    AccessorSummary {
        id: owned(summary.id()),
        accessor_type: summary.r#type().map(|t| t.as_str().to_string()),
        status: summary.status().map(|s| s.as_str().to_string()),
        creation_date: summary.creation_date().and_then(to_utc),
        arn: owned(summary.arn()),
        network_type: summary.network_type().map(|n| n.as_str().to_string()),
    }
}

#[async_trait]
impl BlockchainApi for SdkBlockchain {
    async fn create_network(
        &self,
        request: CreateNetworkRequest,
    ) -> ServiceResult<CreateNetworkOutput> {
        debug!(name = %request.name, framework = %request.framework, "CreateNetwork");
        let member_configuration = member_configuration_input(&request.member_configuration)?;
        let framework_configuration = request
            .framework_configuration
            .as_ref()
            .map(network_framework_input)
            .transpose()?;

        let output = self
            .client
            .create_network()
            .client_request_token(request.client_request_token)
            .name(request.name)
            .set_description(request.description)
            .framework(sdk::Framework::from(request.framework.as_str()))
            .framework_version(request.framework_version)
            .set_framework_configuration(framework_configuration)
            .voting_policy(voting_policy_input(&request.voting_policy))
            .member_configuration(member_configuration)
            .set_tags(Some(request.tags))
            .send()
            .await?;

        Ok(CreateNetworkOutput {
            network_id: owned(output.network_id()),
            member_id: owned(output.member_id()),
        })
    }

    async fn get_network(&self, network_id: &str) -> ServiceResult<Option<Network>> {
        debug!(network_id, "GetNetwork");
        let output = self
            .client
            .get_network()
            .network_id(network_id)
            .send()
            .await?;
        Ok(output.network().map(network))
    }

    async fn list_networks(
        &self,
        filter: &NetworkFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NetworkSummary>> {
        debug!(?filter, ?page, "ListNetworks");
        let output = self
            .client
            .list_networks()
            .set_name(filter.name.clone())
            .set_framework(filter.framework.as_deref().map(sdk::Framework::from))
            .set_status(filter.status.as_deref().map(sdk::NetworkStatus::from))
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.networks().iter().map(network_summary).collect(),
            owned(output.next_token()),
        ))
    }

    async fn create_member(&self, request: CreateMemberRequest) -> ServiceResult<String> {
        debug!(network_id = %request.network_id, invitation_id = %request.invitation_id, "CreateMember");
        let member_configuration = member_configuration_input(&request.member_configuration)?;
        let output = self
            .client
            .create_member()
            .client_request_token(request.client_request_token)
            .invitation_id(request.invitation_id)
            .network_id(request.network_id)
            .member_configuration(member_configuration)
            .send()
            .await?;
        Ok(output.member_id().unwrap_or_default().to_string())
    }

    async fn get_member(&self, network_id: &str, member_id: &str) -> ServiceResult<Option<Member>> {
        debug!(network_id, member_id, "GetMember");
        let output = self
            .client
            .get_member()
            .network_id(network_id)
            .member_id(member_id)
            .send()
            .await?;
        Ok(output.member().map(member))
    }

    async fn list_members(
        &self,
        network_id: &str,
        filter: &MemberFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<MemberSummary>> {
        debug!(network_id, ?filter, ?page, "ListMembers");
        let output = self
            .client
            .list_members()
            .network_id(network_id)
            .set_name(filter.name.clone())
            .set_status(filter.status.as_deref().map(sdk::MemberStatus::from))
            .set_is_owned(filter.is_owned)
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.members().iter().map(member_summary).collect(),
            owned(output.next_token()),
        ))
    }

    async fn update_member(
        &self,
        network_id: &str,
        member_id: &str,
        log_publishing: Option<MemberLogPublishingConfiguration>,
    ) -> ServiceResult<()> {
        debug!(network_id, member_id, "UpdateMember");
        self.client
            .update_member()
            .network_id(network_id)
            .member_id(member_id)
            .set_log_publishing_configuration(log_publishing.as_ref().map(member_log_input))
            .send()
            .await?;
        Ok(())
    }

    async fn delete_member(&self, network_id: &str, member_id: &str) -> ServiceResult<()> {
        debug!(network_id, member_id, "DeleteMember");
        self.client
            .delete_member()
            .network_id(network_id)
            .member_id(member_id)
            .send()
            .await?;
        Ok(())
    }

    async fn create_node(&self, request: CreateNodeRequest) -> ServiceResult<String> {
        debug!(network_id = %request.network_id, member_id = ?request.member_id, "CreateNode");
        let node_configuration = node_configuration_input(&request.node_configuration)?;
        let output = self
            .client
            .create_node()
            .client_request_token(request.client_request_token)
            .network_id(request.network_id)
            .set_member_id(request.member_id)
            .node_configuration(node_configuration)
            .set_tags(Some(request.tags))
            .send()
            .await?;
        Ok(output.node_id().unwrap_or_default().to_string())
    }

    async fn get_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<Option<Node>> {
        debug!(network_id, node_id, member_id, "GetNode");
        let output = self
            .client
            .get_node()
            .network_id(network_id)
            .node_id(node_id)
            .set_member_id(owned(member_id))
            .send()
            .await?;
        Ok(output.node().map(node))
    }

    async fn list_nodes(
        &self,
        network_id: &str,
        filter: &NodeFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NodeSummary>> {
        debug!(network_id, ?filter, ?page, "ListNodes");
        let output = self
            .client
            .list_nodes()
            .network_id(network_id)
            .set_member_id(filter.member_id.clone())
            .set_status(filter.status.as_deref().map(sdk::NodeStatus::from))
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.nodes().iter().map(node_summary).collect(),
            owned(output.next_token()),
        ))
    }

    async fn update_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
        log_publishing: Option<NodeLogPublishingConfiguration>,
    ) -> ServiceResult<()> {
        debug!(network_id, node_id, member_id, "UpdateNode");
        self.client
            .update_node()
            .network_id(network_id)
            .node_id(node_id)
            .set_member_id(owned(member_id))
            .set_log_publishing_configuration(log_publishing.as_ref().map(node_log_input))
            .send()
            .await?;
        Ok(())
    }

    async fn delete_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<()> {
        debug!(network_id, node_id, member_id, "DeleteNode");
        self.client
            .delete_node()
            .network_id(network_id)
            .node_id(node_id)
            .set_member_id(owned(member_id))
            .send()
            .await?;
        Ok(())
    }

    async fn create_proposal(&self, request: CreateProposalRequest) -> ServiceResult<String> {
        debug!(network_id = %request.network_id, member_id = %request.member_id, "CreateProposal");
        let actions = proposal_actions_input(&request.actions)?;
        let output = self
            .client
            .create_proposal()
            .client_request_token(request.client_request_token)
            .network_id(request.network_id)
            .member_id(request.member_id)
            .actions(actions)
            .set_description(request.description)
            .set_tags(Some(request.tags))
            .send()
            .await?;
        Ok(output.proposal_id().unwrap_or_default().to_string())
    }

    async fn get_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
    ) -> ServiceResult<Option<Proposal>> {
        debug!(network_id, proposal_id, "GetProposal");
        let output = self
            .client
            .get_proposal()
            .network_id(network_id)
            .proposal_id(proposal_id)
            .send()
            .await?;
        Ok(output.proposal().map(proposal))
    }

    async fn list_proposals(
        &self,
        network_id: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<ProposalSummary>> {
        debug!(network_id, ?page, "ListProposals");
        let output = self
            .client
            .list_proposals()
            .network_id(network_id)
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.proposals().iter().map(proposal_summary).collect(),
            owned(output.next_token()),
        ))
    }

    async fn vote_on_proposal(
        &self,
        network_id: &str,
        proposal_id: &str,
        voter_member_id: &str,
        vote: &str,
    ) -> ServiceResult<()> {
        debug!(network_id, proposal_id, voter_member_id, vote, "VoteOnProposal");
        self.client
            .vote_on_proposal()
            .network_id(network_id)
            .proposal_id(proposal_id)
            .voter_member_id(voter_member_id)
            .vote(sdk::VoteValue::from(vote))
            .send()
            .await?;
        Ok(())
    }

    async fn list_proposal_votes(
        &self,
        network_id: &str,
        proposal_id: &str,
        page: PageRequest,
    ) -> ServiceResult<Page<VoteSummary>> {
        debug!(network_id, proposal_id, ?page, "ListProposalVotes");
        let output = self
            .client
            .list_proposal_votes()
            .network_id(network_id)
            .proposal_id(proposal_id)
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.proposal_votes().iter().map(vote_summary).collect(),
            owned(output.next_token()),
        ))
    }

    async fn list_invitations(&self, page: PageRequest) -> ServiceResult<Page<Invitation>> {
        debug!(?page, "ListInvitations");
        let output = self
            .client
            .list_invitations()
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.invitations().iter().map(invitation).collect(),
            owned(output.next_token()),
        ))
    }

    async fn reject_invitation(&self, invitation_id: &str) -> ServiceResult<()> {
        debug!(invitation_id, "RejectInvitation");
        self.client
            .reject_invitation()
            .invitation_id(invitation_id)
            .send()
            .await?;
        Ok(())
    }

    async fn create_accessor(
        &self,
        request: CreateAccessorRequest,
    ) -> ServiceResult<CreateAccessorOutput> {
        debug!(accessor_type = %request.accessor_type, network_type = ?request.network_type, "CreateAccessor");
        let output = self
            .client
            .create_accessor()
            .client_request_token(request.client_request_token)
            .accessor_type(sdk::AccessorType::from(request.accessor_type.as_str()))
            .set_network_type(
                request
                    .network_type
                    .as_deref()
                    .map(sdk::AccessorNetworkType::from),
            )
            .set_tags(Some(request.tags))
            .send()
            .await?;

        Ok(CreateAccessorOutput {
            accessor_id: owned(output.accessor_id()),
            billing_token: owned(output.billing_token()),
            network_type: output.network_type().map(|n| n.as_str().to_string()),
        })
    }

    async fn get_accessor(&self, accessor_id: &str) -> ServiceResult<Option<Accessor>> {
        debug!(accessor_id, "GetAccessor");
        let output = self
            .client
            .get_accessor()
            .accessor_id(accessor_id)
            .send()
            .await?;
        Ok(output.accessor().map(accessor))
    }

    async fn list_accessors(
        &self,
        network_type: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<AccessorSummary>> {
        debug!(network_type, ?page, "ListAccessors");
        let output = self
            .client
            .list_accessors()
            .set_network_type(network_type.map(sdk::AccessorNetworkType::from))
            .set_max_results(page.max_results)
            .set_next_token(page.next_token)
            .send()
            .await?;

        Ok(Page::new(
            output.accessors().iter().map(accessor_summary).collect(),
            owned(output.next_token()),
        ))
    }

    async fn delete_accessor(&self, accessor_id: &str) -> ServiceResult<()> {
        debug!(accessor_id, "DeleteAccessor");
        self.client
            .delete_accessor()
            .accessor_id(accessor_id)
            .send()
            .await?;
        Ok(())
    }

    async fn list_tags_for_resource(&self, resource_arn: &str) -> ServiceResult<Tags> {
        debug!(resource_arn, "ListTagsForResource");
        let output = self
            .client
            .list_tags_for_resource()
            .resource_arn(resource_arn)
            .send()
            .await?;
        Ok(tags(output.tags()))
    }

    async fn tag_resource(&self, resource_arn: &str, tags: Tags) -> ServiceResult<()> {
        debug!(resource_arn, count = tags.len(), "TagResource");
        self.client
            .tag_resource()
            .resource_arn(resource_arn)
            .set_tags(Some(tags))
            .send()
            .await?;
        Ok(())
    }

    async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<String>) -> ServiceResult<()> {
        debug!(resource_arn, ?tag_keys, "UntagResource");
        self.client
            .untag_resource()
            .resource_arn(resource_arn)
            .set_tag_keys(Some(tag_keys))
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_configuration_input_carries_credentials() {
        let config = MemberConfiguration {
            name: "org1".to_string(),
            framework_configuration: MemberFrameworkConfiguration {
                fabric: Some(MemberFabricConfiguration {
                    admin_username: "admin".to_string(),
                    admin_password: "Password123".to_string(),
                }),
            },
            log_publishing_configuration: Some(MemberLogPublishingConfiguration::ca_logs(true)),
            ..Default::default()
        };

        let built = member_configuration_input(&config).unwrap();
        assert_eq!(built.name(), "org1");
        let fabric = built
            .framework_configuration()
            .and_then(|f| f.fabric())
            .unwrap();
        assert_eq!(fabric.admin_username(), "admin");
        let enabled = built
            .log_publishing_configuration()
            .and_then(|l| l.fabric())
            .and_then(|f| f.ca_logs())
            .and_then(|c| c.cloudwatch())
            .and_then(|c| c.enabled());
        assert_eq!(enabled, Some(true));
    }

    #[test]
    fn test_node_configuration_state_db() {
        let config = NodeConfiguration {
            instance_type: "bc.t3.small".to_string(),
            state_db: Some("CouchDB".to_string()),
            ..Default::default()
        };
        let built = node_configuration_input(&config).unwrap();
        assert_eq!(built.state_db().map(|s| s.as_str()), Some("CouchDB"));
        assert!(built.availability_zone().is_none());
    }

    #[test]
    fn test_proposal_actions_input_omits_empty_lists() {
        let actions = ProposalActions::new(["111122223333"], Vec::<String>::new()).unwrap();
        let built = proposal_actions_input(&actions).unwrap();
        assert_eq!(built.invitations().len(), 1);
        assert_eq!(built.invitations()[0].principal(), "111122223333");
        assert!(built.removals().is_empty());
    }

    #[test]
    fn test_voting_policy_roundtrip() {
        let policy = VotingPolicy::approval_threshold(ApprovalThresholdPolicy {
            threshold_percentage: Some(50),
            proposal_duration_in_hours: Some(24),
            threshold_comparator: Some("GREATER_THAN".to_string()),
        });
        assert_eq!(voting_policy(&voting_policy_input(&policy)), policy);
    }
}
