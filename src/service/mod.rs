//! Remote service layer
//!
//! [`BlockchainApi`] and [`QueryApi`] expose one method per remote operation.
//! [`SdkBlockchain`] and [`SdkQuery`] implement them with the official AWS SDK
//! for Rust; [`AwsClients`] builds the underlying clients from an
//! [`AmbConfig`](crate::config::AmbConfig).
//!
//! # Example
//!
//! ```no_run
//! use ambkit::config::AmbConfig;
//! use ambkit::pagination::PageRequest;
//! use ambkit::model::NetworkFilter;
//! use ambkit::service::{AwsClients, BlockchainApi, SdkBlockchain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clients = AwsClients::new(&AmbConfig::from_env()).await;
//!     let api = SdkBlockchain::new(clients.blockchain);
//!     let page = api
//!         .list_networks(&NetworkFilter::default(), PageRequest::default())
//!         .await?;
//!     println!("{} networks", page.items.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod sdk;

pub use api::{BlockchainApi, QueryApi};
pub use client::AwsClients;
pub use error::{handle_errors, ErrorBody, ServiceError, ServiceResult};
pub use sdk::{SdkBlockchain, SdkQuery};
