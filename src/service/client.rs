//! AWS SDK client construction

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_managedblockchain::config::{Credentials, Region};
use std::time::Duration;
use tracing::debug;

use crate::config::AmbConfig;

/// The two SDK clients, built from one shared AWS configuration
#[derive(Clone, Debug)]
pub struct AwsClients {
    pub blockchain: aws_sdk_managedblockchain::Client,
    pub query: aws_sdk_managedblockchainquery::Client,
}

impl AwsClients {
    /// Create both clients from an [`AmbConfig`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ambkit::config::AmbConfig;
    /// use ambkit::service::AwsClients;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let clients = AwsClients::new(&AmbConfig::from_env()).await;
    ///     let _networks = clients.blockchain.list_networks().send().await;
    /// }
    /// ```
    pub async fn new(config: &AmbConfig) -> Self {
        let shared = Self::load_sdk_config(config).await;

        let mut blockchain = aws_sdk_managedblockchain::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            blockchain = blockchain.endpoint_url(endpoint);
        }

        let mut query = aws_sdk_managedblockchainquery::config::Builder::from(&shared);
        if let Some(endpoint) = &config.query_endpoint {
            query = query.endpoint_url(endpoint);
        }

        debug!(
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("<default>"),
            query_endpoint = config.query_endpoint.as_deref().unwrap_or("<default>"),
            "Built Managed Blockchain clients"
        );

        Self {
            blockchain: aws_sdk_managedblockchain::Client::from_conf(blockchain.build()),
            query: aws_sdk_managedblockchainquery::Client::from_conf(query.build()),
        }
    }

    async fn load_sdk_config(config: &AmbConfig) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        loader = loader.region(Region::new(config.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            let credentials = Credentials::new(
                access_key,
                secret_key,
                config.session_token.clone(),
                None,
                "ambkit-explicit",
            );
            loader = loader.credentials_provider(credentials);
        } else if let Some(profile) = &config.aws_profile {
            loader = loader.profile_name(profile);
        }

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(config.timeout_seconds))
            .build();
        let retry_config =
            RetryConfig::standard().with_max_attempts(config.max_retries.saturating_add(1));
        loader = loader
            .timeout_config(timeout_config)
            .retry_config(retry_config);

        loader.load().await
    }
}
