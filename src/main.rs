/*!
 * ambkit CLI - Command Line Interface
 *
 * Version: 0.2.0
 *
 * Every subcommand prints its result as pretty JSON on stdout. Logs go to
 * stderr, or to `--log-file` as JSON lines.
 */

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use ambkit::{
    blockchain::{
        ListRequest, ManagedBlockchain, MemberSpec, NetworkSpec, WaiterConfig, VOTE_NO, VOTE_YES,
    },
    commands::init::{run_init, InitOptions},
    config::{AmbConfig, LogLevel},
    error::{AmbError, Result, EXIT_SUCCESS},
    logging,
    model::{ApprovalThresholdPolicy, MemberFilter, NetworkFilter, ProposalActions, Tags},
    pagination::{PaginationConfig, DEFAULT_MAX_ITEMS, DEFAULT_PAGE_SIZE},
};

#[derive(Parser)]
#[command(name = "ambkit")]
#[command(version, about = "Administer Amazon Managed Blockchain networks and query public chains", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// AWS region
    #[arg(long, global = true)]
    region: Option<String>,

    /// Named AWS profile
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Endpoint override for the Managed Blockchain API
    #[arg(long, value_name = "URL", global = true)]
    endpoint: Option<String>,

    /// Endpoint override for the Managed Blockchain Query API
    #[arg(long, value_name = "URL", global = true)]
    query_endpoint: Option<String>,

    /// Query network used when a command does not name one
    #[arg(long, value_name = "NETWORK", global = true)]
    network: Option<String>,

    /// Log level
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevelArg>,

    /// Write JSON logs to this file
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration file
    Init {
        /// Target file (default: platform config directory)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Blockchain networks
    #[command(subcommand)]
    Networks(NetworkCommands),

    /// Network members
    #[command(subcommand)]
    Members(MemberCommands),

    /// Peer nodes
    #[command(subcommand)]
    Nodes(NodeCommands),

    /// Governance proposals
    #[command(subcommand)]
    Proposals(ProposalCommands),

    /// Invitations to join networks
    #[command(subcommand)]
    Invitations(InvitationCommands),

    /// Billing-token accessors
    #[command(subcommand)]
    Accessors(AccessorCommands),

    /// Resource tags
    #[command(subcommand)]
    Tags(TagCommands),

    /// Public chain data (Managed Blockchain Query)
    #[command(subcommand)]
    Query(QueryCommands),

    /// Block until a resource is AVAILABLE
    #[command(subcommand)]
    Wait(WaitCommands),
}

#[derive(Subcommand)]
enum NetworkCommands {
    /// List networks
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        framework: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one network
    Get { network_id: String },

    /// Create a Hyperledger Fabric network with its first member
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "HYPERLEDGER_FABRIC")]
        framework: String,
        #[arg(long, default_value = "2.2")]
        framework_version: String,
        /// STARTER or STANDARD
        #[arg(long, default_value = "STARTER")]
        edition: String,
        /// Approval threshold percentage
        #[arg(long, default_value_t = 50)]
        threshold: i32,
        #[arg(long, default_value_t = 24)]
        proposal_hours: i32,
        #[arg(long, default_value = "GREATER_THAN")]
        comparator: String,
        #[arg(long)]
        member_name: String,
        #[arg(long)]
        admin_username: String,
        #[arg(long)]
        admin_password: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
        tags: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// List members of a network
    List {
        network_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Only members owned (true) or not owned (false) by this account
        #[arg(long)]
        owned: Option<bool>,
    },

    /// Show one member
    Get { network_id: String, member_id: String },

    /// Remove a member from a network
    Delete { network_id: String, member_id: String },
}

#[derive(Subcommand)]
enum NodeCommands {
    /// List nodes of a network
    List {
        network_id: String,
        #[arg(long)]
        member: Option<String>,
    },

    /// Show one node
    Get {
        network_id: String,
        node_id: String,
        #[arg(long)]
        member: Option<String>,
    },

    /// Delete a node
    Delete {
        network_id: String,
        node_id: String,
        #[arg(long)]
        member: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProposalCommands {
    /// List proposals of a network
    List { network_id: String },

    /// Show one proposal
    Get { network_id: String, proposal_id: String },

    /// Vote on a proposal
    Vote {
        network_id: String,
        proposal_id: String,
        /// Voting member id
        #[arg(long)]
        member: String,
        #[arg(value_enum)]
        vote: VoteArg,
    },

    /// Propose inviting accounts or removing members
    Create {
        network_id: String,
        /// Proposing member id
        #[arg(long)]
        member: String,
        /// AWS account id to invite (repeatable)
        #[arg(long = "invite", value_name = "ACCOUNT")]
        invitations: Vec<String>,
        /// Member id to remove (repeatable)
        #[arg(long = "remove", value_name = "MEMBER_ID")]
        removals: Vec<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
enum InvitationCommands {
    /// List invitations for this account
    List,

    /// Reject an invitation
    Reject { invitation_id: String },
}

#[derive(Subcommand)]
enum AccessorCommands {
    /// List accessors
    List {
        #[arg(long, default_value = "ETHEREUM_MAINNET")]
        network_type: String,
        #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
        max_items: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: i32,
    },

    /// Show one accessor, including its billing token
    Get { accessor_id: String },

    /// Create a billing-token accessor
    Create {
        #[arg(long, default_value = "ETHEREUM_MAINNET")]
        network_type: String,
        #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
        tags: Vec<(String, String)>,
    },

    /// Mark an accessor for deletion
    Delete { accessor_id: String },
}

#[derive(Subcommand)]
enum TagCommands {
    /// Show the tags of a resource
    List { resource_arn: String },

    /// Add or replace tags
    Add {
        resource_arn: String,
        #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag, required = true)]
        tags: Vec<(String, String)>,
    },

    /// Remove tags by key
    Remove {
        resource_arn: String,
        #[arg(long = "key", value_name = "KEY", required = true)]
        keys: Vec<String>,
    },
}

#[derive(Subcommand)]
enum QueryCommands {
    /// Show one transaction
    Tx { transaction_hash: String },

    /// List transactions touching an address
    Txs {
        address: String,
        #[command(flatten)]
        pages: PageArgs,
    },

    /// List events of a transaction, or events sent to addresses
    Events {
        /// Transaction hash
        #[arg(required_unless_present = "to_addresses")]
        transaction_hash: Option<String>,
        /// Recipient address (repeatable); lists filtered events instead
        #[arg(long = "to-address", value_name = "ADDRESS", conflicts_with = "transaction_hash")]
        to_addresses: Vec<String>,
        #[command(flatten)]
        pages: PageArgs,
    },

    /// List token balances owned by an address
    Balances {
        address: String,
        #[command(flatten)]
        pages: PageArgs,
    },

    /// List contracts deployed by an address
    Contracts {
        deployer_address: String,
        #[arg(long, default_value = "ERC20")]
        token_standard: String,
        #[command(flatten)]
        pages: PageArgs,
    },
}

#[derive(Subcommand)]
enum WaitCommands {
    Network {
        network_id: String,
        #[command(flatten)]
        schedule: WaitArgs,
    },
    Member {
        network_id: String,
        member_id: String,
        #[command(flatten)]
        schedule: WaitArgs,
    },
    Node {
        network_id: String,
        node_id: String,
        #[arg(long)]
        member: Option<String>,
        #[command(flatten)]
        schedule: WaitArgs,
    },
}

#[derive(Args, Clone)]
struct PageArgs {
    /// Stop after this many items
    #[arg(long)]
    max_items: Option<usize>,

    /// Items per request
    #[arg(long)]
    page_size: Option<i32>,

    /// Resume from a continuation token
    #[arg(long)]
    starting_token: Option<String>,
}

impl From<PageArgs> for PaginationConfig {
    fn from(args: PageArgs) -> Self {
        PaginationConfig {
            max_items: args.max_items,
            page_size: args.page_size,
            starting_token: args.starting_token,
        }
    }
}

#[derive(Args, Clone, Copy)]
struct WaitArgs {
    /// Seconds between polls
    #[arg(long, default_value_t = 30)]
    delay: u64,

    /// Polls before giving up
    #[arg(long, default_value_t = 20)]
    max_attempts: u32,
}

impl From<WaitArgs> for WaiterConfig {
    fn from(args: WaitArgs) -> Self {
        WaiterConfig {
            delay: Duration::from_secs(args.delay),
            max_attempts: args.max_attempts,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum VoteArg {
    Yes,
    No,
}

impl VoteArg {
    fn as_str(self) -> &'static str {
        match self {
            VoteArg::Yes => VOTE_YES,
            VoteArg::No => VOTE_NO,
        }
    }
}

fn parse_tag(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { path, force } = &cli.command {
        let options = InitOptions {
            path: path.clone(),
            force: *force,
            region: cli.region.clone(),
            default_network: cli.network.clone(),
            aws_profile: cli.profile.clone(),
        };
        return run_init(&options)
            .map(|_| ())
            .map_err(|e| AmbError::Config(format!("{:#}", e)));
    }

    let config = resolve_config(&cli)?;
    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AmbError::Other(format!("Failed to start async runtime: {}", e)))?;

    runtime.block_on(async {
        let amb = ManagedBlockchain::from_config(&config).await;
        dispatch(&amb, cli.command).await
    })
}

/// File and environment first, then command-line flags
fn resolve_config(cli: &Cli) -> Result<AmbConfig> {
    let mut config = AmbConfig::load(cli.config.as_deref())?;

    if let Some(region) = &cli.region {
        config.region = region.clone();
    }
    if let Some(profile) = &cli.profile {
        config.aws_profile = Some(profile.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(endpoint) = &cli.query_endpoint {
        config.query_endpoint = Some(endpoint.clone());
    }
    if let Some(network) = &cli.network {
        config.default_network = network.clone();
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    config.verbose |= cli.verbose;

    config.validate()?;
    Ok(config)
}

async fn dispatch(amb: &ManagedBlockchain, command: Commands) -> Result<()> {
    match command {
        Commands::Init { .. } => Ok(()),
        Commands::Networks(cmd) => handle_networks(amb, cmd).await,
        Commands::Members(cmd) => handle_members(amb, cmd).await,
        Commands::Nodes(cmd) => handle_nodes(amb, cmd).await,
        Commands::Proposals(cmd) => handle_proposals(amb, cmd).await,
        Commands::Invitations(cmd) => handle_invitations(amb, cmd).await,
        Commands::Accessors(cmd) => handle_accessors(amb, cmd).await,
        Commands::Tags(cmd) => handle_tags(amb, cmd).await,
        Commands::Query(cmd) => handle_query(amb, cmd).await,
        Commands::Wait(cmd) => handle_wait(amb, cmd).await,
    }
}

async fn handle_networks(amb: &ManagedBlockchain, cmd: NetworkCommands) -> Result<()> {
    let networks = amb.networks();
    match cmd {
        NetworkCommands::List {
            name,
            framework,
            status,
        } => {
            let filter = NetworkFilter {
                name,
                framework,
                status,
            };
            print_json(&networks.list_all_networks(&filter).await)
        }
        NetworkCommands::Get { network_id } => {
            let network = networks
                .get_network(&network_id)
                .await
                .ok_or_else(|| failed("get network", &network_id))?;
            print_json(&network)
        }
        NetworkCommands::Create {
            name,
            framework,
            framework_version,
            edition,
            threshold,
            proposal_hours,
            comparator,
            member_name,
            admin_username,
            admin_password,
            description,
            tags,
        } => {
            let policy = ApprovalThresholdPolicy {
                threshold_percentage: Some(threshold),
                proposal_duration_in_hours: Some(proposal_hours),
                threshold_comparator: Some(comparator),
            };
            let member = MemberSpec::new(member_name, admin_username, admin_password);
            let mut spec = NetworkSpec::new(
                name.clone(),
                framework,
                framework_version,
                edition,
                policy,
                member,
            )
            .with_tags(to_tags(tags));
            if let Some(description) = description {
                spec = spec.with_description(description);
            }

            let output = networks
                .create_network(spec)
                .await
                .ok_or_else(|| failed("create network", &name))?;
            print_json(&output)
        }
    }
}

async fn handle_members(amb: &ManagedBlockchain, cmd: MemberCommands) -> Result<()> {
    let members = amb.members();
    match cmd {
        MemberCommands::List {
            network_id,
            name,
            status,
            owned,
        } => {
            let filter = MemberFilter {
                name,
                status,
                is_owned: owned,
            };
            print_json(&members.list_members(&network_id, &filter).await?)
        }
        MemberCommands::Get {
            network_id,
            member_id,
        } => {
            let member = members
                .get_member(&network_id, &member_id)
                .await
                .ok_or_else(|| failed("get member", &member_id))?;
            print_json(&member)
        }
        MemberCommands::Delete {
            network_id,
            member_id,
        } => {
            if !members.delete_member(&network_id, &member_id).await {
                return Err(failed("delete member", &member_id));
            }
            print_json(&serde_json::json!({ "MemberId": member_id, "Deleted": true }))
        }
    }
}

async fn handle_nodes(amb: &ManagedBlockchain, cmd: NodeCommands) -> Result<()> {
    let nodes = amb.nodes();
    match cmd {
        NodeCommands::List { network_id, member } => {
            print_json(&nodes.list_nodes(&network_id, member.as_deref()).await?)
        }
        NodeCommands::Get {
            network_id,
            node_id,
            member,
        } => {
            let node = nodes
                .get_node(&network_id, &node_id, member.as_deref())
                .await
                .ok_or_else(|| failed("get node", &node_id))?;
            print_json(&node)
        }
        NodeCommands::Delete {
            network_id,
            node_id,
            member,
        } => {
            if !nodes
                .delete_node(&network_id, &node_id, member.as_deref())
                .await
            {
                return Err(failed("delete node", &node_id));
            }
            print_json(&serde_json::json!({ "NodeId": node_id, "Deleted": true }))
        }
    }
}

async fn handle_proposals(amb: &ManagedBlockchain, cmd: ProposalCommands) -> Result<()> {
    let proposals = amb.proposals();
    match cmd {
        ProposalCommands::List { network_id } => {
            print_json(&proposals.list_proposals(&network_id).await?)
        }
        ProposalCommands::Get {
            network_id,
            proposal_id,
        } => {
            let proposal = proposals
                .get_proposal(&network_id, &proposal_id)
                .await?
                .unwrap_or_default();
            print_json(&proposal)
        }
        ProposalCommands::Vote {
            network_id,
            proposal_id,
            member,
            vote,
        } => {
            proposals
                .vote_on_proposal(&network_id, &proposal_id, &member, vote.as_str())
                .await?;
            print_json(&serde_json::json!({
                "ProposalId": proposal_id,
                "VoterMemberId": member,
                "Vote": vote.as_str(),
            }))
        }
        ProposalCommands::Create {
            network_id,
            member,
            invitations,
            removals,
            description,
        } => {
            let actions = ProposalActions::new(invitations, removals)
                .map_err(|e| AmbError::InvalidArgument(e.to_string()))?;
            let proposal_id = proposals
                .create_proposal(
                    &network_id,
                    &member,
                    actions,
                    description.as_deref(),
                    Tags::new(),
                )
                .await
                .ok_or_else(|| failed("create proposal in", &network_id))?;
            print_json(&serde_json::json!({ "ProposalId": proposal_id }))
        }
    }
}

async fn handle_invitations(amb: &ManagedBlockchain, cmd: InvitationCommands) -> Result<()> {
    match cmd {
        InvitationCommands::List => {
            let config = PaginationConfig::default();
            print_json(
                &amb.paginator()
                    .paginate_operation(&ListRequest::Invitations, &config)
                    .await,
            )
        }
        InvitationCommands::Reject { invitation_id } => {
            amb.invitations().reject_invitation(&invitation_id).await?;
            print_json(&serde_json::json!({ "InvitationId": invitation_id, "Rejected": true }))
        }
    }
}

async fn handle_accessors(amb: &ManagedBlockchain, cmd: AccessorCommands) -> Result<()> {
    let accessors = amb.accessors();
    match cmd {
        AccessorCommands::List {
            network_type,
            max_items,
            page_size,
        } => print_json(
            &accessors
                .list_all_accessors(&network_type, max_items, page_size)
                .await,
        ),
        AccessorCommands::Get { accessor_id } => {
            let accessor = accessors
                .get_accessor(&accessor_id)
                .await
                .ok_or_else(|| failed("get accessor", &accessor_id))?;
            print_json(&accessor)
        }
        AccessorCommands::Create { network_type, tags } => {
            let output = accessors
                .create_accessor(&network_type, to_tags(tags))
                .await
                .ok_or_else(|| failed("create accessor for", &network_type))?;
            print_json(&output)
        }
        AccessorCommands::Delete { accessor_id } => {
            if !accessors.delete_accessor(&accessor_id).await {
                return Err(failed("delete accessor", &accessor_id));
            }
            print_json(&serde_json::json!({ "AccessorId": accessor_id, "Deleted": true }))
        }
    }
}

async fn handle_tags(amb: &ManagedBlockchain, cmd: TagCommands) -> Result<()> {
    let tags = amb.tags();
    match cmd {
        TagCommands::List { resource_arn } => {
            print_json(&tags.list_tags_for_resource(&resource_arn).await?)
        }
        TagCommands::Add {
            resource_arn,
            tags: new_tags,
        } => {
            tags.tag_resource(&resource_arn, to_tags(new_tags)).await?;
            print_json(&tags.list_tags_for_resource(&resource_arn).await?)
        }
        TagCommands::Remove { resource_arn, keys } => {
            tags.untag_resource(&resource_arn, keys).await?;
            print_json(&tags.list_tags_for_resource(&resource_arn).await?)
        }
    }
}

async fn handle_query(amb: &ManagedBlockchain, cmd: QueryCommands) -> Result<()> {
    let paginator = amb.query_paginator();
    match cmd {
        QueryCommands::Tx { transaction_hash } => {
            print_json(&amb.get_transaction(&transaction_hash, None).await?)
        }
        QueryCommands::Txs { address, pages } => {
            let items = paginator
                .paginate_list_transactions(&address, None, &pages.into())
                .await
                .map_err(|body| AmbError::Other(body.error))?;
            print_json(&items)
        }
        QueryCommands::Events {
            transaction_hash,
            to_addresses,
            pages,
        } => {
            let config = pages.into();
            let events = match transaction_hash {
                Some(hash) => {
                    paginator
                        .paginate_list_transaction_events(None, &hash, &config)
                        .await
                }
                None => {
                    paginator
                        .paginate_list_filtered_transaction_events(None, to_addresses, &config)
                        .await
                }
            }
            .map_err(|body| AmbError::Other(body.error))?;
            print_json(&events)
        }
        QueryCommands::Balances { address, pages } => {
            let balances = paginator
                .paginate_list_token_balances(None, &address, &pages.into())
                .await
                .map_err(|body| AmbError::Other(body.error))?;
            print_json(&balances)
        }
        QueryCommands::Contracts {
            deployer_address,
            token_standard,
            pages,
        } => {
            let contracts = paginator
                .paginate_list_asset_contracts(
                    None,
                    &token_standard,
                    &deployer_address,
                    &pages.into(),
                )
                .await
                .map_err(|body| AmbError::Other(body.error))?;
            print_json(&contracts)
        }
    }
}

async fn handle_wait(amb: &ManagedBlockchain, cmd: WaitCommands) -> Result<()> {
    let waiter = amb.waiter();
    let (resource, available) = match cmd {
        WaitCommands::Network {
            network_id,
            schedule,
        } => {
            let ok = waiter
                .wait_for_network_available(&network_id, &schedule.into())
                .await;
            (network_id, ok)
        }
        WaitCommands::Member {
            network_id,
            member_id,
            schedule,
        } => {
            let ok = waiter
                .wait_for_member_available(&network_id, &member_id, &schedule.into())
                .await;
            (member_id, ok)
        }
        WaitCommands::Node {
            network_id,
            node_id,
            member,
            schedule,
        } => {
            let ok = waiter
                .wait_for_node_available(&network_id, member.as_deref(), &node_id, &schedule.into())
                .await;
            (node_id, ok)
        }
    };

    if !available {
        return Err(AmbError::WaitFailed { resource });
    }
    print_json(&serde_json::json!({ "Id": resource, "Status": "AVAILABLE" }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

fn to_tags(pairs: Vec<(String, String)>) -> Tags {
    pairs.into_iter().collect()
}

/// Error for a caught operation; the cause is already in the log
fn failed(action: &str, id: &str) -> AmbError {
    AmbError::Other(format!("Failed to {} {} (see log for details)", action, id))
}
