use atl_client::{OffsetLimitPage, PageIdiom, Requirements};
use tracing::instrument;

use super::{segment, Listing};
use crate::jira::Issue;
use crate::service_desk::{CustomerRequest, Queue, RequestComment, ServiceDesk};
use crate::Result;

impl super::AtlassianRestClient {
    /// Service desks visible to the caller.
    #[instrument(skip(self))]
    pub fn service_desks(&self) -> Listing<ServiceDesk> {
        self.client.paginate::<_, OffsetLimitPage<_>>(
            self.client.service_desk_url("servicedesk"),
            vec![],
            PageIdiom::OffsetLimit,
        )
    }

    /// Queues of a service desk, with issue counts.
    #[instrument(skip(self))]
    pub fn queues(&self, service_desk_id: &str) -> Result<Listing<Queue>> {
        Requirements::new()
            .field("serviceDeskId", service_desk_id)
            .check()?;
        let url = self
            .client
            .service_desk_url(&format!("servicedesk/{}/queue", segment(service_desk_id)));
        Ok(self.client.paginate::<_, OffsetLimitPage<_>>(
            url,
            vec![("includeCount".into(), "true".into())],
            PageIdiom::OffsetLimit,
        ))
    }

    /// Issues currently in a queue.
    #[instrument(skip(self))]
    pub fn queue_issues(&self, service_desk_id: &str, queue_id: &str) -> Result<Listing<Issue>> {
        Requirements::new()
            .field("serviceDeskId", service_desk_id)
            .field("queueId", queue_id)
            .check()?;
        let url = self.client.service_desk_url(&format!(
            "servicedesk/{}/queue/{}/issue",
            segment(service_desk_id),
            segment(queue_id)
        ));
        Ok(self
            .client
            .paginate::<_, OffsetLimitPage<_>>(url, vec![], PageIdiom::OffsetLimit))
    }

    /// Get a customer request by issue ID or key.
    #[instrument(skip(self))]
    pub async fn get_customer_request(&self, issue_id_or_key: &str) -> Result<CustomerRequest> {
        Requirements::new()
            .field("issueIdOrKey", issue_id_or_key)
            .check()?;
        let url = self
            .client
            .service_desk_url(&format!("request/{}", segment(issue_id_or_key)));
        self.client.get_json(&url).await
    }

    /// Public and internal comments on a customer request.
    #[instrument(skip(self))]
    pub fn request_comments(&self, issue_id_or_key: &str) -> Result<Listing<RequestComment>> {
        Requirements::new()
            .field("issueIdOrKey", issue_id_or_key)
            .check()?;
        let url = self
            .client
            .service_desk_url(&format!("request/{}/comment", segment(issue_id_or_key)));
        Ok(self
            .client
            .paginate::<_, OffsetLimitPage<_>>(url, vec![], PageIdiom::OffsetLimit))
    }
}
