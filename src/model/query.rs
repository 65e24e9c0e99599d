//! Request and response shapes for the Managed Blockchain Query API
//!
//! The query service speaks camelCase JSON, so these types do too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Network used when none is given
pub const DEFAULT_QUERY_NETWORK: &str = "ETHEREUM_MAINNET";

/// Token standard used by contract listings when none is given
pub const DEFAULT_TOKEN_STANDARD: &str = "ERC20";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub network: String,
    pub block_hash: Option<String>,
    pub transaction_hash: String,
    pub block_number: Option<String>,
    pub transaction_timestamp: Option<DateTime<Utc>>,
    pub transaction_index: i64,
    pub number_of_transactions: i64,
    pub to: String,
    pub from: Option<String>,
    pub contract_address: Option<String>,
    pub gas_used: Option<String>,
    pub cumulative_gas_used: Option<String>,
    pub effective_gas_price: Option<String>,
    pub signature_v: Option<i32>,
    pub signature_r: Option<String>,
    pub signature_s: Option<String>,
    pub transaction_fee: Option<String>,
    pub transaction_id: Option<String>,
    pub confirmation_status: Option<String>,
    pub execution_status: Option<String>,
}

/// Entry of `ListTransactions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionOutputItem {
    pub transaction_hash: String,
    pub transaction_id: Option<String>,
    pub network: String,
    pub transaction_timestamp: Option<DateTime<Utc>>,
    pub confirmation_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionEvent {
    pub network: String,
    pub transaction_hash: String,
    pub event_type: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,
    pub contract_address: Option<String>,
    pub token_id: Option<String>,
    pub transaction_id: Option<String>,
    pub vout_index: Option<i32>,
    pub block_timestamp: Option<DateTime<Utc>>,
    pub confirmation_status: Option<String>,
}

/// Address filter for `ListFilteredTransactionEvents`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressIdentifierFilter {
    pub transaction_event_to_address: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilteredEventsRequest {
    /// Network name as the service spells it (`BITCOIN_MAINNET`, ...)
    pub network: String,
    pub address_identifier_filter: AddressIdentifierFilter,
}

impl FilteredEventsRequest {
    /// Events sent to any of `addresses` on `network`
    pub fn to_addresses(network: impl Into<String>, addresses: Vec<String>) -> Self {
        Self {
            network: network.into(),
            address_identifier_filter: AddressIdentifierFilter {
                transaction_event_to_address: addresses,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerIdentifier {
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenIdentifier {
    pub network: String,
    pub contract_address: Option<String>,
    pub token_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockchainInstant {
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBalance {
    pub owner_identifier: Option<OwnerIdentifier>,
    pub token_identifier: Option<TokenIdentifier>,
    pub balance: String,
    pub at_blockchain_instant: Option<BlockchainInstant>,
    pub last_updated_time: Option<BlockchainInstant>,
}

/// `ownerFilter` of `ListTokenBalances`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerFilter {
    pub address: String,
}

/// `tokenFilter` of `ListTokenBalances`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenFilter {
    pub network: String,
    pub contract_address: Option<String>,
    pub token_id: Option<String>,
}

impl TokenFilter {
    pub fn network(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBalancesRequest {
    pub owner_filter: Option<OwnerFilter>,
    pub token_filter: TokenFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBalanceRequest {
    pub owner_identifier: OwnerIdentifier,
    pub token_identifier: TokenIdentifier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractIdentifier {
    pub network: String,
    pub contract_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetContract {
    pub contract_identifier: Option<ContractIdentifier>,
    pub token_standard: String,
    pub deployer_address: String,
}

/// `contractFilter` of `ListAssetContracts`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractFilter {
    pub network: String,
    pub token_standard: String,
    pub deployer_address: String,
}
