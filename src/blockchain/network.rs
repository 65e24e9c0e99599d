//! Network administration

use tracing::info;
use uuid::Uuid;

use super::members::MemberSpec;
use crate::model::*;
use crate::pagination::{collect_pages, Page, PageRequest, PaginationConfig};
use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceError, ServiceResult};

/// Framework used by [`NetworkApi::quick_create_network`] when none is given
pub const DEFAULT_FRAMEWORK: &str = "HYPERLEDGER_FABRIC";

/// Framework version used by [`NetworkApi::quick_create_network`]
pub const QUICK_FRAMEWORK_VERSION: &str = "1.2";

/// Approval threshold used by [`NetworkApi::quick_create_network`]
pub const QUICK_THRESHOLD_PERCENTAGE: i32 = 50;

/// Arguments for [`NetworkApi::create_network`]
#[derive(Debug, Clone)]
pub struct NetworkSpec {
    pub name: String,
    /// `HYPERLEDGER_FABRIC` or `ETHEREUM`
    pub framework: String,
    pub framework_version: String,
    /// Fabric edition: `STARTER` or `STANDARD`
    pub edition: String,
    pub voting_policy: ApprovalThresholdPolicy,
    /// First member of the network
    pub member: MemberSpec,
    pub description: String,
    pub tags: Tags,
}

impl NetworkSpec {
    pub fn new(
        name: impl Into<String>,
        framework: impl Into<String>,
        framework_version: impl Into<String>,
        edition: impl Into<String>,
        voting_policy: ApprovalThresholdPolicy,
        member: MemberSpec,
    ) -> Self {
        Self {
            name: name.into(),
            framework: framework.into(),
            framework_version: framework_version.into(),
            edition: edition.into(),
            voting_policy,
            member,
            description: String::new(),
            tags: Tags::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// The `CreateNetwork` request, with a fresh idempotency token
    pub fn into_request(self) -> CreateNetworkRequest {
        CreateNetworkRequest {
            client_request_token: Uuid::new_v4().to_string(),
            name: self.name,
            description: Some(self.description),
            framework: self.framework,
            framework_version: self.framework_version,
            framework_configuration: Some(NetworkFrameworkConfiguration::fabric_edition(
                self.edition,
            )),
            voting_policy: VotingPolicy::approval_threshold(self.voting_policy),
            member_configuration: self.member.into_configuration(),
            tags: self.tags,
        }
    }
}

/// Networks: create, describe, list
#[derive(Debug, Clone)]
pub struct NetworkApi<A> {
    api: A,
}

impl<A: BlockchainApi> NetworkApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// First page of networks matching `filter`
    pub async fn list_networks(&self, filter: &NetworkFilter) -> ServiceResult<Page<NetworkSummary>> {
        self.api.list_networks(filter, PageRequest::default()).await
    }

    /// Every network matching `filter`, or an empty list on error
    pub async fn list_all_networks(&self, filter: &NetworkFilter) -> Vec<NetworkSummary> {
        let result = collect_pages(&PaginationConfig::default(), |page| {
            self.api.list_networks(filter, page)
        })
        .await;

        match result {
            Ok(networks) => networks,
            Err(e) => {
                report("ListNetworks", &e);
                Vec::new()
            }
        }
    }

    /// Network details, or `None` on error
    ///
    /// A response without a network body yields an empty [`Network`].
    pub async fn get_network(&self, network_id: &str) -> Option<Network> {
        match self.api.get_network(network_id).await {
            Ok(network) => Some(network.unwrap_or_default()),
            Err(e) => {
                report("GetNetwork", &e);
                None
            }
        }
    }

    /// Create a network and its first member, or `None` on error
    pub async fn create_network(&self, spec: NetworkSpec) -> Option<CreateNetworkOutput> {
        let name = spec.name.clone();
        match self.api.create_network(spec.into_request()).await {
            Ok(output) => {
                info!(
                    network = %name,
                    network_id = output.network_id.as_deref().unwrap_or("-"),
                    member_id = output.member_id.as_deref().unwrap_or("-"),
                    "Network creation started"
                );
                Some(output)
            }
            Err(e) => {
                report("CreateNetwork", &e);
                None
            }
        }
    }

    /// Create a network with stock settings and return its id
    ///
    /// Uses framework version 1.2 and a 50% approval threshold. Errors are
    /// returned rather than swallowed.
    pub async fn quick_create_network(
        &self,
        name: &str,
        framework: Option<&str>,
        member: MemberSpec,
    ) -> ServiceResult<String> {
        let request = CreateNetworkRequest {
            client_request_token: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            framework: framework.unwrap_or(DEFAULT_FRAMEWORK).to_string(),
            framework_version: QUICK_FRAMEWORK_VERSION.to_string(),
            framework_configuration: None,
            voting_policy: VotingPolicy::approval_threshold(ApprovalThresholdPolicy {
                threshold_percentage: Some(QUICK_THRESHOLD_PERCENTAGE),
                ..Default::default()
            }),
            member_configuration: member.into_configuration(),
            tags: Tags::new(),
        };

        let output = self.api.create_network(request).await?;
        output
            .network_id
            .ok_or_else(|| ServiceError::Sdk("CreateNetwork returned no NetworkId".to_string()))
    }
}
