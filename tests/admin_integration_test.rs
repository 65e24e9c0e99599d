/*!
 * Integration tests for the administration facades
 *
 * These drive every facade through MockBlockchain and verify:
 * - Request shapes sent to each remote operation
 * - Mocked responses surfacing unchanged
 * - Sentinel values when the service fails
 */

use ambkit::blockchain::{
    ListRequest, ManagedBlockchain, MemberSpec, NetworkSpec, NodeSpec, WaiterConfig, VOTE_YES,
};
use ambkit::mock::MockBlockchain;
use ambkit::model::*;
use ambkit::pagination::{Page, PaginationConfig};
use ambkit::service::ServiceError;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::time::Duration;

fn setup() -> (MockBlockchain, ManagedBlockchain<MockBlockchain, MockBlockchain>) {
    ambkit::logging::init_test_logging();
    let mock = MockBlockchain::new();
    let amb = ManagedBlockchain::new(mock.clone(), mock.clone());
    (mock, amb)
}

fn fabric_network() -> NetworkSpec {
    NetworkSpec::new(
        "supply-chain",
        "HYPERLEDGER_FABRIC",
        "2.2",
        "STANDARD",
        ApprovalThresholdPolicy {
            threshold_percentage: Some(60),
            proposal_duration_in_hours: Some(48),
            threshold_comparator: Some("GREATER_THAN_OR_EQUAL_TO".to_string()),
        },
        MemberSpec::new("org1", "admin", "Password123!"),
    )
}

#[tokio::test]
async fn test_create_network_request_shape() {
    let (mock, amb) = setup();
    mock.respond(
        "CreateNetwork",
        CreateNetworkOutput {
            network_id: Some("n-NEW".to_string()),
            member_id: Some("m-FIRST".to_string()),
        },
    );

    let output = amb.networks().create_network(fabric_network()).await.unwrap();
    assert_eq!(output.network_id.as_deref(), Some("n-NEW"));
    assert_eq!(output.member_id.as_deref(), Some("m-FIRST"));

    let params = mock.last_call("CreateNetwork").unwrap();
    assert_eq!(params["Name"], "supply-chain");
    assert_eq!(params["Framework"], "HYPERLEDGER_FABRIC");
    assert_eq!(params["FrameworkVersion"], "2.2");
    assert_eq!(params["FrameworkConfiguration"]["Fabric"]["Edition"], "STANDARD");
    assert_eq!(
        params["VotingPolicy"]["ApprovalThresholdPolicy"]["ThresholdPercentage"],
        60
    );
    assert_eq!(
        params["MemberConfiguration"]["FrameworkConfiguration"]["Fabric"]["AdminUsername"],
        "admin"
    );
    assert_eq!(
        params["MemberConfiguration"]["LogPublishingConfiguration"]["Fabric"]["CaLogs"]
            ["Cloudwatch"]["Enabled"],
        true
    );
    assert_eq!(params["Tags"], json!({}));
    assert_eq!(
        params["ClientRequestToken"].as_str().unwrap().len(),
        36,
        "token should be a UUID"
    );
}

#[tokio::test]
async fn test_create_network_failure_returns_none() {
    let (mock, amb) = setup();
    mock.fail(
        "CreateNetwork",
        ServiceError::from_code("ResourceLimitExceededException", "too many networks"),
    );

    assert!(amb.networks().create_network(fabric_network()).await.is_none());
}

#[tokio::test]
async fn test_quick_create_network_defaults() {
    let (mock, amb) = setup();
    mock.respond(
        "CreateNetwork",
        CreateNetworkOutput {
            network_id: Some("n-QUICK".to_string()),
            member_id: None,
        },
    );

    let network_id = amb
        .networks()
        .quick_create_network("quick", None, MemberSpec::new("org1", "admin", "pw"))
        .await
        .unwrap();
    assert_eq!(network_id, "n-QUICK");

    let params = mock.last_call("CreateNetwork").unwrap();
    assert_eq!(params["Framework"], "HYPERLEDGER_FABRIC");
    assert_eq!(params["FrameworkVersion"], "1.2");
    assert_eq!(
        params["VotingPolicy"]["ApprovalThresholdPolicy"],
        json!({ "ThresholdPercentage": 50 })
    );
}

#[tokio::test]
async fn test_quick_create_network_propagates_errors() {
    let (mock, amb) = setup();
    mock.fail(
        "CreateNetwork",
        ServiceError::AccessDenied("not allowed".to_string()),
    );

    let err = amb
        .networks()
        .quick_create_network("quick", Some("ETHEREUM"), MemberSpec::new("o", "a", "p"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
}

#[tokio::test]
async fn test_list_all_networks_follows_tokens() {
    let (mock, amb) = setup();
    let summary = |id: &str| NetworkSummary {
        id: Some(id.to_string()),
        status: Some("AVAILABLE".to_string()),
        ..Default::default()
    };
    mock.respond(
        "ListNetworks",
        Page::new(vec![summary("n-1"), summary("n-2")], Some("t1".to_string())),
    );
    mock.respond("ListNetworks", Page::last(vec![summary("n-3")]));

    let filter = NetworkFilter {
        framework: Some("HYPERLEDGER_FABRIC".to_string()),
        ..Default::default()
    };
    let networks = amb.networks().list_all_networks(&filter).await;
    let ids: Vec<_> = networks.iter().filter_map(|n| n.id.as_deref()).collect();
    assert_eq!(ids, vec!["n-1", "n-2", "n-3"]);

    let calls = mock.calls_to("ListNetworks");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["Framework"], "HYPERLEDGER_FABRIC");
    assert!(calls[0].get("NextToken").is_none());
    assert_eq!(calls[1]["NextToken"], "t1");
}

#[tokio::test]
async fn test_get_network_sentinels() {
    let (mock, amb) = setup();

    // No body at all still yields a value
    let empty = amb.networks().get_network("n-1").await.unwrap();
    assert_eq!(empty, Network::default());

    mock.fail("GetNetwork", ServiceError::NotFound("n-404".to_string()));
    assert!(amb.networks().get_network("n-404").await.is_none());
}

#[tokio::test]
async fn test_create_member_shape_and_kms() {
    let (mock, amb) = setup();
    mock.respond("CreateMember", "m-NEW");

    let spec = MemberSpec::new("org2", "admin2", "Secret!1").with_description("second org");
    let member_id = amb
        .members()
        .create_member("in-1", "n-1", spec)
        .await
        .unwrap();
    assert_eq!(member_id, "m-NEW");

    let params = mock.last_call("CreateMember").unwrap();
    assert_eq!(params["InvitationId"], "in-1");
    assert_eq!(params["NetworkId"], "n-1");
    assert_eq!(params["MemberConfiguration"]["Name"], "org2");
    assert_eq!(params["MemberConfiguration"]["Description"], "second org");
    assert!(params["MemberConfiguration"]["KmsKeyArn"].is_null());

    let spec = MemberSpec::new("org3", "admin3", "Secret!1")
        .with_kms_key_arn("arn:aws:kms:us-east-1:111122223333:key/abc");
    amb.members().create_member("in-2", "n-1", spec).await.unwrap();
    let params = mock.last_call("CreateMember").unwrap();
    assert_eq!(
        params["MemberConfiguration"]["KmsKeyArn"],
        "arn:aws:kms:us-east-1:111122223333:key/abc"
    );
    assert_eq!(params["MemberConfiguration"]["Description"], "");
}

#[tokio::test]
async fn test_delete_member_returns_bool() {
    let (mock, amb) = setup();
    assert!(amb.members().delete_member("n-1", "m-1").await);
    assert_eq!(
        mock.last_call("DeleteMember").unwrap(),
        json!({ "NetworkId": "n-1", "MemberId": "m-1" })
    );

    mock.fail("DeleteMember", ServiceError::NotReady("busy".to_string()));
    assert!(!amb.members().delete_member("n-1", "m-1").await);
}

#[tokio::test]
async fn test_list_members_filter() {
    let (mock, amb) = setup();
    let filter = MemberFilter {
        status: Some("AVAILABLE".to_string()),
        is_owned: Some(true),
        ..Default::default()
    };
    amb.members().list_members("n-1", &filter).await.unwrap();

    assert_eq!(
        mock.last_call("ListMembers").unwrap(),
        json!({ "NetworkId": "n-1", "Status": "AVAILABLE", "IsOwned": true })
    );
}

#[tokio::test]
async fn test_update_member_sends_log_config() {
    let (mock, amb) = setup();
    amb.members()
        .update_member("n-1", "m-1", MemberLogPublishingConfiguration::ca_logs(false))
        .await
        .unwrap();

    let params = mock.last_call("UpdateMember").unwrap();
    assert_eq!(
        params["LogPublishingConfiguration"]["Fabric"]["CaLogs"]["Cloudwatch"]["Enabled"],
        false
    );
}

#[tokio::test]
async fn test_create_node_optional_fields() {
    let (mock, amb) = setup();
    mock.respond("CreateNode", "nd-1");

    let node_id = amb
        .nodes()
        .create_node(NodeSpec::new("n-1", "bc.t3.small"))
        .await
        .unwrap();
    assert_eq!(node_id, "nd-1");

    let params = mock.last_call("CreateNode").unwrap();
    assert!(params.get("MemberId").is_none());
    let config = &params["NodeConfiguration"];
    assert_eq!(config["InstanceType"], "bc.t3.small");
    assert!(config["AvailabilityZone"].is_null());
    assert_eq!(config["StateDB"], "CouchDB");

    let spec = NodeSpec::new("n-1", "bc.m5.large")
        .member("m-1")
        .availability_zone("us-east-1a")
        .logs(true, false)
        .state_db("LevelDB");
    amb.nodes().create_node(spec).await.unwrap();

    let params = mock.last_call("CreateNode").unwrap();
    assert_eq!(params["MemberId"], "m-1");
    let config = &params["NodeConfiguration"];
    assert_eq!(config["AvailabilityZone"], "us-east-1a");
    assert_eq!(config["StateDB"], "LevelDB");
    let fabric = &config["LogPublishingConfiguration"]["Fabric"];
    assert_eq!(fabric["ChaincodeLogs"]["Cloudwatch"]["Enabled"], true);
    assert_eq!(fabric["PeerLogs"]["Cloudwatch"]["Enabled"], false);
}

#[tokio::test]
async fn test_node_get_and_delete() {
    let (mock, amb) = setup();
    mock.respond(
        "GetNode",
        Some(Node {
            id: Some("nd-1".to_string()),
            status: Some("AVAILABLE".to_string()),
            ..Default::default()
        }),
    );

    let node = amb.nodes().get_node("n-1", "nd-1", Some("m-1")).await.unwrap();
    assert_eq!(node.status.as_deref(), Some("AVAILABLE"));
    assert_eq!(mock.last_call("GetNode").unwrap()["MemberId"], "m-1");

    assert!(amb.nodes().delete_node("n-1", "nd-1", None).await);
    assert!(mock.last_call("DeleteNode").unwrap().get("MemberId").is_none());

    mock.fail("DeleteNode", ServiceError::NotFound("nd-1".to_string()));
    assert!(!amb.nodes().delete_node("n-1", "nd-1", None).await);
}

#[tokio::test]
async fn test_proposal_lifecycle() {
    let (mock, amb) = setup();
    mock.respond("CreateProposal", "p-1");

    let actions = ProposalActions::new(vec!["111122223333"], Vec::<String>::new()).unwrap();
    let proposal_id = amb
        .proposals()
        .create_proposal("n-1", "m-1", actions, Some("invite partner"), Tags::new())
        .await
        .unwrap();
    assert_eq!(proposal_id, "p-1");

    let params = mock.last_call("CreateProposal").unwrap();
    assert_eq!(params["Actions"]["Invitations"][0]["Principal"], "111122223333");
    assert!(params["Actions"].get("Removals").is_none());
    assert_eq!(params["Description"], "invite partner");

    amb.proposals()
        .vote_on_proposal("n-1", "p-1", "m-2", VOTE_YES)
        .await
        .unwrap();
    assert_eq!(
        mock.last_call("VoteOnProposal").unwrap(),
        json!({ "NetworkId": "n-1", "ProposalId": "p-1", "VoterMemberId": "m-2", "Vote": "YES" })
    );

    mock.fail("CreateProposal", ServiceError::IllegalAction("closed".to_string()));
    let actions = ProposalActions::new(Vec::<String>::new(), vec!["m-9"]).unwrap();
    assert!(amb
        .proposals()
        .create_proposal("n-1", "m-1", actions, None, Tags::new())
        .await
        .is_none());
}

#[test]
fn test_proposal_actions_require_a_change() {
    let err = ProposalActions::new(Vec::<String>::new(), Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn test_empty_proposal_never_reaches_service() {
    let (mock, amb) = setup();
    mock.respond("CreateProposal", "p-empty");

    let proposal_id = amb
        .proposals()
        .create_proposal("n-1", "m-1", ProposalActions::default(), None, Tags::new())
        .await;

    assert!(proposal_id.is_none());
    assert_eq!(mock.call_count("CreateProposal"), 0);
}

#[tokio::test]
async fn test_invitations_and_tags_forward() {
    let (mock, amb) = setup();
    amb.invitations().reject_invitation("in-1").await.unwrap();
    assert_eq!(
        mock.last_call("RejectInvitation").unwrap(),
        json!({ "InvitationId": "in-1" })
    );

    let arn = "arn:aws:managedblockchain:us-east-1:111122223333:networks/n-1";
    let tags: Tags = [("team".to_string(), "ledger".to_string())].into_iter().collect();
    amb.tags().tag_resource(arn, tags).await.unwrap();
    assert_eq!(
        mock.last_call("TagResource").unwrap(),
        json!({ "ResourceArn": arn, "Tags": { "team": "ledger" } })
    );

    amb.tags()
        .untag_resource(arn, vec!["team".to_string()])
        .await
        .unwrap();
    assert_eq!(mock.last_call("UntagResource").unwrap()["TagKeys"], json!(["team"]));

    mock.fail(
        "ListTagsForResource",
        ServiceError::from_code("ResourceNotFoundException", "gone"),
    );
    assert!(amb.tags().list_tags_for_resource(arn).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_accessor_create_and_delete() {
    let (mock, amb) = setup();
    mock.respond(
        "CreateAccessor",
        CreateAccessorOutput {
            accessor_id: Some("ac-1".to_string()),
            billing_token: Some("tok".to_string()),
            network_type: Some("ETHEREUM_MAINNET".to_string()),
        },
    );

    let output = amb
        .accessors()
        .create_accessor("ETHEREUM_MAINNET", Tags::new())
        .await
        .unwrap();
    assert_eq!(output.billing_token.as_deref(), Some("tok"));

    let params = mock.last_call("CreateAccessor").unwrap();
    assert_eq!(params["AccessorType"], "BILLING_TOKEN");
    assert_eq!(params["NetworkType"], "ETHEREUM_MAINNET");

    assert!(amb.accessors().delete_accessor("ac-1").await);
    mock.fail("DeleteAccessor", ServiceError::NotFound("ac-1".to_string()));
    assert!(!amb.accessors().delete_accessor("ac-1").await);
}

#[tokio::test]
async fn test_list_all_accessors_flattens_records() {
    let (mock, amb) = setup();
    let summary = |id: &str| AccessorSummary {
        id: Some(id.to_string()),
        accessor_type: Some("BILLING_TOKEN".to_string()),
        status: Some("AVAILABLE".to_string()),
        creation_date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single(),
        arn: None,
        network_type: Some("ETHEREUM_MAINNET".to_string()),
    };
    mock.respond(
        "ListAccessors",
        Page::new(vec![summary("ac-1"), summary("ac-2")], Some("t1".to_string())),
    );
    mock.respond("ListAccessors", Page::last(vec![summary("ac-3")]));

    let records = amb
        .accessors()
        .list_all_accessors("ETHEREUM_MAINNET", 100, 2)
        .await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].creation_date, "2024-01-02 03:04:05");
    assert_eq!(records[0].arn, "");

    let calls = mock.calls_to("ListAccessors");
    assert_eq!(calls[0]["MaxResults"], 2);
    assert_eq!(calls[0]["NetworkType"], "ETHEREUM_MAINNET");
    assert_eq!(calls[1]["NextToken"], "t1");
}

#[tokio::test]
async fn test_list_all_accessors_error_is_empty() {
    let (mock, amb) = setup();
    mock.fail("ListAccessors", ServiceError::Throttling("slow".to_string()));

    let records = amb
        .accessors()
        .list_all_accessors("ETHEREUM_MAINNET", 100, 50)
        .await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_accessors_honours_max_items() {
    let (mock, amb) = setup();
    let page: Vec<AccessorSummary> = (0..5)
        .map(|i| AccessorSummary {
            id: Some(format!("ac-{}", i)),
            ..Default::default()
        })
        .collect();
    mock.respond("ListAccessors", Page::new(page, Some("more".to_string())));

    let accessors = amb
        .accessors()
        .list_accessors("ETHEREUM_MAINNET", &PaginationConfig::new(3, 5))
        .await
        .unwrap();
    assert_eq!(accessors.len(), 3);
    assert_eq!(mock.call_count("ListAccessors"), 1);
}

#[tokio::test]
async fn test_paginator_by_name() {
    let (mock, amb) = setup();
    let paginator = amb.paginator();
    assert!(paginator.get_paginator("list_proposals").is_some());
    assert!(paginator.get_paginator("vote_on_proposal").is_none());

    mock.respond(
        "ListNodes",
        Page::new(
            vec![NodeSummary {
                id: Some("nd-1".to_string()),
                ..Default::default()
            }],
            Some("t1".to_string()),
        ),
    );
    mock.respond(
        "ListNodes",
        Page::last(vec![NodeSummary {
            id: Some("nd-2".to_string()),
            ..Default::default()
        }]),
    );

    let request = ListRequest::Nodes {
        network_id: "n-1".to_string(),
        filter: NodeFilter {
            member_id: Some("m-1".to_string()),
            ..Default::default()
        },
    };
    let items = paginator
        .paginate_operation(&request, &PaginationConfig::default())
        .await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["Id"], "nd-2");
    assert_eq!(mock.calls_to("ListNodes")[0]["MemberId"], "m-1");
}

#[tokio::test]
async fn test_waiter_through_aggregate() {
    let (mock, amb) = setup();
    mock.respond(
        "GetNetwork",
        Some(Network {
            status: Some("CREATING".to_string()),
            ..Default::default()
        }),
    );
    mock.respond(
        "GetNetwork",
        Some(Network {
            status: Some("AVAILABLE".to_string()),
            ..Default::default()
        }),
    );

    let config = WaiterConfig {
        delay: Duration::from_millis(1),
        max_attempts: 4,
    };
    assert!(amb.waiter().wait_for_network_available("n-1", &config).await);
    assert_eq!(mock.call_count("GetNetwork"), 2);
}
