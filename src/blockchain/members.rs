//! Member administration

use tracing::info;
use uuid::Uuid;

use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceResult};

/// Flat arguments for a member configuration
#[derive(Debug, Clone, Default)]
pub struct MemberSpec {
    pub name: String,
    pub admin_username: String,
    pub admin_password: String,
    pub description: Option<String>,
    pub tags: Tags,
    pub kms_key_arn: Option<String>,
}

impl MemberSpec {
    pub fn new(
        name: impl Into<String>,
        admin_username: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            admin_username: admin_username.into(),
            admin_password: admin_password.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_kms_key_arn(mut self, arn: impl Into<String>) -> Self {
        self.kms_key_arn = Some(arn.into());
        self
    }

    /// Nested `MemberConfiguration` with CA logs published to CloudWatch
    pub fn into_configuration(self) -> MemberConfiguration {
        MemberConfiguration {
            name: self.name,
            description: Some(self.description.unwrap_or_default()),
            framework_configuration: MemberFrameworkConfiguration {
                fabric: Some(MemberFabricConfiguration {
                    admin_username: self.admin_username,
                    admin_password: self.admin_password,
                }),
            },
            log_publishing_configuration: Some(MemberLogPublishingConfiguration::ca_logs(true)),
            tags: self.tags,
            kms_key_arn: self.kms_key_arn,
        }
    }
}

/// Members of a network
#[derive(Debug, Clone)]
pub struct MemberApi<A> {
    api: A,
}

impl<A: BlockchainApi> MemberApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Accept `invitation_id` by creating a member, returning its id or `None` on error
    pub async fn create_member(
        &self,
        invitation_id: &str,
        network_id: &str,
        spec: MemberSpec,
    ) -> Option<String> {
        let request = CreateMemberRequest {
            client_request_token: Uuid::new_v4().to_string(),
            invitation_id: invitation_id.to_string(),
            network_id: network_id.to_string(),
            member_configuration: spec.into_configuration(),
        };

        match self.api.create_member(request).await {
            Ok(member_id) => {
                info!(network_id, member_id = %member_id, "Member creation started");
                Some(member_id)
            }
            Err(e) => {
                report("CreateMember", &e);
                None
            }
        }
    }

    /// Member details, or `None` on error
    pub async fn get_member(&self, network_id: &str, member_id: &str) -> Option<Member> {
        match self.api.get_member(network_id, member_id).await {
            Ok(member) => Some(member.unwrap_or_default()),
            Err(e) => {
                report("GetMember", &e);
                None
            }
        }
    }

    pub async fn list_members(
        &self,
        network_id: &str,
        filter: &MemberFilter,
    ) -> ServiceResult<Page<MemberSummary>> {
        self.api
            .list_members(network_id, filter, PageRequest::default())
            .await
    }

    /// Remove a member; `false` on error
    pub async fn delete_member(&self, network_id: &str, member_id: &str) -> bool {
        match self.api.delete_member(network_id, member_id).await {
            Ok(()) => {
                info!(
                    "Member {} has been removed from network {}.",
                    member_id, network_id
                );
                true
            }
            Err(e) => {
                report("DeleteMember", &e);
                false
            }
        }
    }

    pub async fn update_member(
        &self,
        network_id: &str,
        member_id: &str,
        log_publishing: MemberLogPublishingConfiguration,
    ) -> ServiceResult<()> {
        self.api
            .update_member(network_id, member_id, Some(log_publishing))
            .await
    }
}
