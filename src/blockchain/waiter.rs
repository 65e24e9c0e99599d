//! Polling until a network, member or node becomes available
//!
//! The admin SDK ships no waiters, so these poll the matching `Get*`
//! operation on a fixed delay.
//!
//! # Example
//!
//! ```rust,no_run
//! use ambkit::blockchain::{BlockchainWaiter, WaiterConfig};
//! use std::time::Duration;
//!
//! # async fn example(api: ambkit::service::SdkBlockchain) {
//! let waiter = BlockchainWaiter::new(api);
//! let config = WaiterConfig {
//!     delay: Duration::from_secs(10),
//!     max_attempts: 60,
//! };
//! if waiter.wait_for_network_available("n-ABC123", &config).await {
//!     println!("ready");
//! }
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceResult};

/// Status reported once a resource is usable
pub const STATUS_AVAILABLE: &str = "AVAILABLE";

/// Statuses a resource never leaves for `AVAILABLE`
pub const FAILURE_STATUSES: &[&str] = &[
    "CREATE_FAILED",
    "DELETED",
    "DELETING",
    "FAILED",
    "INACCESSIBLE_ENCRYPTION_KEY",
];

/// Default delay between polls
pub const DEFAULT_WAITER_DELAY: Duration = Duration::from_secs(30);

/// Default number of polls
pub const DEFAULT_WAITER_MAX_ATTEMPTS: u32 = 20;

/// Poll schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaiterConfig {
    /// Delay between polls
    pub delay: Duration,

    /// Polls before giving up
    pub max_attempts: u32,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_WAITER_DELAY,
            max_attempts: DEFAULT_WAITER_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockchainWaiter<A> {
    api: A,
}

impl<A: BlockchainApi> BlockchainWaiter<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn wait_for_network_available(&self, network_id: &str, config: &WaiterConfig) -> bool {
        self.wait_until_available("GetNetwork", network_id, config, || async move {
            Ok(self
                .api
                .get_network(network_id)
                .await?
                .and_then(|network| network.status))
        })
        .await
    }

    pub async fn wait_for_member_available(
        &self,
        network_id: &str,
        member_id: &str,
        config: &WaiterConfig,
    ) -> bool {
        self.wait_until_available("GetMember", member_id, config, || async move {
            Ok(self
                .api
                .get_member(network_id, member_id)
                .await?
                .and_then(|member| member.status))
        })
        .await
    }

    pub async fn wait_for_node_available(
        &self,
        network_id: &str,
        member_id: Option<&str>,
        node_id: &str,
        config: &WaiterConfig,
    ) -> bool {
        self.wait_until_available("GetNode", node_id, config, || async move {
            Ok(self
                .api
                .get_node(network_id, node_id, member_id)
                .await?
                .and_then(|node| node.status))
        })
        .await
    }

    async fn wait_until_available<F, Fut>(
        &self,
        operation: &str,
        resource: &str,
        config: &WaiterConfig,
        mut poll: F,
    ) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ServiceResult<Option<String>>>,
    {
        for attempt in 1..=config.max_attempts {
            match poll().await {
                Ok(Some(status)) if status == STATUS_AVAILABLE => {
                    info!(resource, attempt, "{} is available", resource);
                    return true;
                }
                Ok(Some(status)) if FAILURE_STATUSES.contains(&status.as_str()) => {
                    warn!(resource, status = %status, "{} will not become available", resource);
                    return false;
                }
                Ok(status) => {
                    debug!(resource, attempt, status = status.as_deref().unwrap_or("-"), "Waiting");
                }
                // Creation can race the first describe
                Err(e) if e.is_not_found() => {
                    debug!(resource, attempt, "Not visible yet");
                }
                Err(e) if e.is_transient() => {
                    warn!(resource, attempt, error = %e, "Transient error, retrying");
                }
                Err(e) => {
                    report(operation, &e);
                    return false;
                }
            }

            if attempt < config.max_attempts {
                sleep(config.delay).await;
            }
        }

        warn!(
            resource,
            attempts = config.max_attempts,
            "Gave up waiting for {}",
            resource
        );
        false
    }
}
