//! Resource tagging

use crate::model::Tags;
use crate::service::{BlockchainApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct TagApi<A> {
    api: A,
}

impl<A: BlockchainApi> TagApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn list_tags_for_resource(&self, resource_arn: &str) -> ServiceResult<Tags> {
        self.api.list_tags_for_resource(resource_arn).await
    }

    pub async fn tag_resource(&self, resource_arn: &str, tags: Tags) -> ServiceResult<()> {
        self.api.tag_resource(resource_arn, tags).await
    }

    pub async fn untag_resource(&self, resource_arn: &str, tag_keys: Vec<String>) -> ServiceResult<()> {
        self.api.untag_resource(resource_arn, tag_keys).await
    }
}
