use atl_client::{OffsetLimitPage, PageIdiom, Requirements};
use tracing::instrument;

use super::{segment, Listing};
use crate::confluence::{ChildType, Content, Label, Space};
use crate::Result;

impl super::AtlassianRestClient {
    /// Get a page, blog post or other content by ID.
    #[instrument(skip(self))]
    pub async fn get_content(&self, content_id: &str) -> Result<Content> {
        Requirements::new().field("contentId", content_id).check()?;
        let url = self
            .client
            .confluence_url(&format!("content/{}", segment(content_id)));
        self.client.get_json(&url).await
    }

    /// Get a space by key.
    #[instrument(skip(self))]
    pub async fn get_space(&self, space_key: &str) -> Result<Space> {
        Requirements::new().field("spaceKey", space_key).check()?;
        let url = self
            .client
            .confluence_url(&format!("space/{}", segment(space_key)));
        self.client.get_json(&url).await
    }

    /// All content in a space.
    #[instrument(skip(self))]
    pub fn space_content(&self, space_key: &str) -> Result<Listing<Content>> {
        Requirements::new().field("spaceKey", space_key).check()?;
        Ok(self.client.paginate::<_, OffsetLimitPage<_>>(
            self.client.confluence_url("content"),
            vec![("spaceKey".into(), space_key.trim().to_string())],
            PageIdiom::OffsetLimit,
        ))
    }

    /// Labels on a piece of content.
    #[instrument(skip(self))]
    pub fn content_labels(&self, content_id: &str) -> Result<Listing<Label>> {
        Requirements::new().field("contentId", content_id).check()?;
        let url = self
            .client
            .confluence_url(&format!("content/{}/label", segment(content_id)));
        Ok(self
            .client
            .paginate::<_, OffsetLimitPage<_>>(url, vec![], PageIdiom::OffsetLimit))
    }

    /// Direct children of one type under a piece of content.
    #[instrument(skip(self))]
    pub fn content_children(
        &self,
        content_id: &str,
        child_type: ChildType,
    ) -> Result<Listing<Content>> {
        Requirements::new().field("contentId", content_id).check()?;
        let url = self.client.confluence_url(&format!(
            "content/{}/child/{}",
            segment(content_id),
            child_type
        ));
        Ok(self
            .client
            .paginate::<_, OffsetLimitPage<_>>(url, vec![], PageIdiom::OffsetLimit))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::client;
    use crate::confluence::ChildType;
    use futures::TryStreamExt;
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_missing_fields_send_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;
        let client = client(&mock_server.uri());

        let err = client.get_content("").await.unwrap_err();
        assert_eq!(err.validation_field(), Some("contentId"));

        let err = client.get_space("\t").await.unwrap_err();
        assert_eq!(err.validation_field(), Some("spaceKey"));

        assert_eq!(
            client.space_content("").unwrap_err().validation_field(),
            Some("spaceKey")
        );
        assert!(client.content_labels("").unwrap_err().is_validation());
        assert!(client
            .content_children("", ChildType::Page)
            .unwrap_err()
            .is_validation());
    }

    #[tokio::test]
    async fn test_get_space() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/space/ENG"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 98306,
                "key": "ENG",
                "name": "Engineering",
                "type": "global",
                "_links": {"webui": "/spaces/ENG"}
            })))
            .mount(&mock_server)
            .await;

        let space = client(&mock_server.uri()).get_space("ENG").await.unwrap();
        assert_eq!(space.name.as_deref(), Some("Engineering"));
        assert_eq!(space.space_type.as_deref(), Some("global"));
        assert!(space.extra.contains_key("_links"));
    }

    #[tokio::test]
    async fn test_get_content_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content/123"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "statusCode": 404,
                "message": "No content found with id: ContentId{id=123}"
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .get_content("123")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("No content found"));
    }

    #[tokio::test]
    async fn test_space_content_follows_links() {
        let mock_server = MockServer::start().await;
        let base = format!("{}/wiki", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content"))
            .and(query_param("spaceKey", "ENG"))
            .and(query_param("start", "0"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"id": "1", "type": "page", "title": "Home"},
                    {"id": "2", "type": "page", "title": "Runbooks"}
                ],
                "start": 0,
                "limit": 2,
                "size": 2,
                "_links": {
                    "base": base,
                    "context": "/wiki",
                    "next": "/rest/api/content?spaceKey=ENG&limit=2&start=2"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content"))
            .and(query_param("start", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "3", "type": "page", "title": "On-call"}],
                "start": 2,
                "limit": 2,
                "size": 1,
                "_links": {"base": base, "context": "/wiki"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let pages = client(&mock_server.uri())
            .space_content("ENG")
            .unwrap()
            .collect_all()
            .await
            .unwrap();

        let titles: Vec<_> = pages.iter().filter_map(|c| c.title.as_deref()).collect();
        assert_eq!(titles, vec!["Home", "Runbooks", "On-call"]);
    }

    #[tokio::test]
    async fn test_content_labels_without_links() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content/42/label"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"prefix": "global", "name": "runbook", "id": "7"}],
                "start": 0,
                "limit": 2,
                "size": 1
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let labels: Vec<_> = client(&mock_server.uri())
            .content_labels("42")
            .unwrap()
            .items()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "runbook");
    }

    #[tokio::test]
    async fn test_content_children() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content/42/child/attachment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "att1", "type": "attachment", "title": "diagram.png"}],
                "start": 0,
                "limit": 2,
                "size": 1,
                "_links": {"base": "https://ignored.example"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let children = client(&mock_server.uri())
            .content_children("42", ChildType::Attachment)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(children[0].content_type.as_deref(), Some("attachment"));
    }
}
