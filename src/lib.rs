/*!
 * ambkit - Amazon Managed Blockchain toolkit
 *
 * Thin, typed wrappers over two AWS services:
 * - Managed Blockchain administration: networks, members, nodes,
 *   proposals, invitations, accessors and tags
 * - Managed Blockchain Query: transactions, transaction events, token
 *   balances and asset contracts
 * - Pagination loops and availability waiters on top of both
 * - An in-memory mock of the service for tests
 *
 * Version: 0.2.0
 */

pub mod blockchain;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mock;
pub mod model;
pub mod pagination;
pub mod query;
pub mod service;

// Re-export commonly used types
pub use blockchain::ManagedBlockchain;
pub use config::{AmbConfig, AmbConfigBuilder, LogLevel};
pub use error::{AmbError, Result};
pub use pagination::{Page, PageRequest, PaginationConfig};
pub use query::BlockchainQuery;
pub use service::{BlockchainApi, ErrorBody, QueryApi, ServiceError, ServiceResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
