//! Peer node administration

use tracing::info;
use uuid::Uuid;

use crate::model::*;
use crate::pagination::{Page, PageRequest};
use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceResult};

/// Arguments for [`NodeApi::create_node`]
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub network_id: String,
    pub instance_type: String,
    /// Required for Ethereum networks
    pub availability_zone: Option<String>,
    /// Required for Hyperledger Fabric networks
    pub member_id: Option<String>,
    pub enable_chaincode_logs: bool,
    pub enable_peer_logs: bool,
    /// `LevelDB` or `CouchDB`
    pub state_db: String,
    pub tags: Tags,
}

impl NodeSpec {
    pub fn new(network_id: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            instance_type: instance_type.into(),
            availability_zone: None,
            member_id: None,
            enable_chaincode_logs: false,
            enable_peer_logs: false,
            state_db: DEFAULT_STATE_DB.to_string(),
            tags: Tags::new(),
        }
    }

    pub fn member(mut self, member_id: impl Into<String>) -> Self {
        self.member_id = Some(member_id.into());
        self
    }

    pub fn availability_zone(mut self, zone: impl Into<String>) -> Self {
        self.availability_zone = Some(zone.into());
        self
    }

    pub fn logs(mut self, chaincode: bool, peer: bool) -> Self {
        self.enable_chaincode_logs = chaincode;
        self.enable_peer_logs = peer;
        self
    }

    pub fn state_db(mut self, state_db: impl Into<String>) -> Self {
        self.state_db = state_db.into();
        self
    }

    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn into_request(self) -> CreateNodeRequest {
        CreateNodeRequest {
            client_request_token: Uuid::new_v4().to_string(),
            network_id: self.network_id,
            member_id: self.member_id.filter(|m| !m.is_empty()),
            node_configuration: NodeConfiguration {
                instance_type: self.instance_type,
                availability_zone: self.availability_zone.filter(|z| !z.is_empty()),
                log_publishing_configuration: Some(NodeLogPublishingConfiguration::fabric(
                    self.enable_chaincode_logs,
                    self.enable_peer_logs,
                )),
                state_db: Some(self.state_db),
            },
            tags: self.tags,
        }
    }
}

/// Peer nodes of a network
#[derive(Debug, Clone)]
pub struct NodeApi<A> {
    api: A,
}

impl<A: BlockchainApi> NodeApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Create a node, returning its id or `None` on error
    pub async fn create_node(&self, spec: NodeSpec) -> Option<String> {
        let request = spec.into_request();
        let network_id = request.network_id.clone();

        match self.api.create_node(request).await {
            Ok(node_id) => {
                info!(network_id = %network_id, node_id = %node_id, "Node creation started");
                Some(node_id)
            }
            Err(e) => {
                report("CreateNode", &e);
                None
            }
        }
    }

    /// Node details, or `None` on error
    pub async fn get_node(
        &self,
        network_id: &str,
        node_id: &str,
        member_id: Option<&str>,
    ) -> Option<Node> {
        match self.api.get_node(network_id, node_id, member_id).await {
            Ok(node) => Some(node.unwrap_or_default()),
            Err(e) => {
                report("GetNode", &e);
                None
            }
        }
    }

    pub async fn list_nodes(
        &self,
        network_id: &str,
        member_id: Option<&str>,
    ) -> ServiceResult<Page<NodeSummary>> {
        let filter = NodeFilter {
            member_id: member_id.map(str::to_string),
            status: None,
        };
        self.api
            .list_nodes(network_id, &filter, PageRequest::default())
            .await
    }

    /// Remove a node; `false` on error
    pub async fn delete_node(&self, network_id: &str, node_id: &str, member_id: Option<&str>) -> bool {
        match self.api.delete_node(network_id, node_id, member_id).await {
            Ok(()) => {
                info!(
                    "Node {} has been removed from network {}.",
                    node_id, network_id
                );
                true
            }
            Err(e) => {
                report("DeleteNode", &e);
                false
            }
        }
    }

    pub async fn update_node(
        &self,
        network_id: &str,
        member_id: Option<&str>,
        node_id: &str,
        log_publishing: NodeLogPublishingConfiguration,
    ) -> ServiceResult<()> {
        self.api
            .update_node(network_id, node_id, member_id, Some(log_publishing))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_request_defaults() {
        let request = NodeSpec::new("n-1", "bc.t3.small").into_request();
        let json = serde_json::to_value(&request).unwrap();
        let config = &json["NodeConfiguration"];

        assert_eq!(config["StateDB"], "CouchDB");
        assert!(config["AvailabilityZone"].is_null());
        assert_eq!(
            config["LogPublishingConfiguration"]["Fabric"]["ChaincodeLogs"]["Cloudwatch"]["Enabled"],
            false
        );
        assert!(json["MemberId"].is_null());
    }

    #[test]
    fn test_node_request_options() {
        let request = NodeSpec::new("n-1", "bc.t3.small")
            .member("m-1")
            .availability_zone("us-east-1a")
            .logs(true, true)
            .state_db("LevelDB")
            .into_request();

        assert_eq!(request.member_id.as_deref(), Some("m-1"));
        let config = request.node_configuration;
        assert_eq!(config.availability_zone.as_deref(), Some("us-east-1a"));
        assert_eq!(config.state_db.as_deref(), Some("LevelDB"));
    }
}
