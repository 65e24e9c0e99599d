//! Billing-token accessors

use tracing::info;
use uuid::Uuid;

use super::utils::format_datetime;
use crate::model::*;
use crate::pagination::{collect_pages, PaginationConfig};
use crate::service::error::report;
use crate::service::{BlockchainApi, ServiceResult};

#[derive(Debug, Clone)]
pub struct AccessorApi<A> {
    api: A,
}

impl<A: BlockchainApi> AccessorApi<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Issue a `BILLING_TOKEN` accessor for `network_type`, or `None` on error
    pub async fn create_accessor(
        &self,
        network_type: &str,
        tags: Tags,
    ) -> Option<CreateAccessorOutput> {
        let request = CreateAccessorRequest {
            client_request_token: Uuid::new_v4().to_string(),
            accessor_type: ACCESSOR_TYPE_BILLING_TOKEN.to_string(),
            network_type: Some(network_type.to_string()),
            tags,
        };

        match self.api.create_accessor(request).await {
            Ok(output) => {
                info!(
                    accessor_id = output.accessor_id.as_deref().unwrap_or("-"),
                    network_type, "Accessor created"
                );
                Some(output)
            }
            Err(e) => {
                report("CreateAccessor", &e);
                None
            }
        }
    }

    /// Mark an accessor for deletion; `false` on error
    pub async fn delete_accessor(&self, accessor_id: &str) -> bool {
        match self.api.delete_accessor(accessor_id).await {
            Ok(()) => {
                info!("Accessor {} has been marked for deletion.", accessor_id);
                true
            }
            Err(e) => {
                report("DeleteAccessor", &e);
                false
            }
        }
    }

    /// Accessor details, or `None` on error
    pub async fn get_accessor(&self, accessor_id: &str) -> Option<Accessor> {
        match self.api.get_accessor(accessor_id).await {
            Ok(accessor) => Some(accessor.unwrap_or_default()),
            Err(e) => {
                report("GetAccessor", &e);
                None
            }
        }
    }

    /// Accessors for `network_type`, following continuation tokens within `pagination`
    pub async fn list_accessors(
        &self,
        network_type: &str,
        pagination: &PaginationConfig,
    ) -> ServiceResult<Vec<AccessorSummary>> {
        collect_pages(pagination, |page| {
            self.api.list_accessors(Some(network_type), page)
        })
        .await
    }

    /// Flattened accessor records, or an empty list on error
    pub async fn list_all_accessors(
        &self,
        network_type: &str,
        max_items: usize,
        page_size: i32,
    ) -> Vec<AccessorRecord> {
        let pagination = PaginationConfig::new(max_items, page_size);
        match self.list_accessors(network_type, &pagination).await {
            Ok(accessors) => {
                let records: Vec<AccessorRecord> = accessors.iter().map(accessor_record).collect();
                info!(
                    "Retrieved {} accessors for network {}.",
                    records.len(),
                    network_type
                );
                records
            }
            Err(e) => {
                report("ListAccessors", &e);
                Vec::new()
            }
        }
    }
}

fn accessor_record(summary: &AccessorSummary) -> AccessorRecord {
    AccessorRecord {
        id: summary.id.clone().unwrap_or_default(),
        accessor_type: summary.accessor_type.clone().unwrap_or_default(),
        status: summary.status.clone().unwrap_or_default(),
        creation_date: summary
            .creation_date
            .as_ref()
            .map(format_datetime)
            .unwrap_or_default(),
        arn: summary.arn.clone().unwrap_or_default(),
        network_type: summary.network_type.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_accessor_record_formats_date() {
        let summary = AccessorSummary {
            id: Some("ac-1".to_string()),
            accessor_type: Some("BILLING_TOKEN".to_string()),
            status: Some("AVAILABLE".to_string()),
            creation_date: Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).single(),
            arn: Some("arn:aws:managedblockchain:us-east-1:111122223333:accessors/ac-1".to_string()),
            network_type: Some("ETHEREUM_MAINNET".to_string()),
        };

        let record = accessor_record(&summary);
        assert_eq!(record.creation_date, "2024-03-05 07:08:09");
        assert_eq!(record.accessor_type, "BILLING_TOKEN");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["CreationDate"], "2024-03-05 07:08:09");
        assert_eq!(json["Type"], "BILLING_TOKEN");
    }
}
