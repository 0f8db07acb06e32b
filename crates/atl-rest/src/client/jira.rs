use atl_client::{PageIdiom, Requirements, StartAtPage};
use tracing::instrument;

use super::{segment, Listing};
use crate::jira::{Comment, Issue, NewComment, Version, Worklog};
use crate::Result;

impl super::AtlassianRestClient {
    /// Get an issue by key or ID.
    #[instrument(skip(self))]
    pub async fn get_issue(&self, issue_key_or_id: &str) -> Result<Issue> {
        Requirements::new()
            .field("issueKeyOrId", issue_key_or_id)
            .check()?;
        let url = self
            .client
            .jira_url(&format!("issue/{}", segment(issue_key_or_id)));
        self.client.get_json(&url).await
    }

    /// All comments on an issue, oldest first.
    #[instrument(skip(self))]
    pub fn issue_comments(&self, issue_key_or_id: &str) -> Result<Listing<Comment>> {
        Requirements::new()
            .field("issueKeyOrId", issue_key_or_id)
            .check()?;
        let url = self
            .client
            .jira_url(&format!("issue/{}/comment", segment(issue_key_or_id)));
        Ok(self.client.paginate::<_, StartAtPage<_>>(
            url,
            vec![("orderBy".into(), "created".into())],
            PageIdiom::StartAtTotal,
        ))
    }

    /// Get one comment.
    #[instrument(skip(self))]
    pub async fn get_comment(&self, issue_key_or_id: &str, comment_id: &str) -> Result<Comment> {
        Requirements::new()
            .field("issueKeyOrId", issue_key_or_id)
            .field("commentId", comment_id)
            .check()?;
        let url = self.client.jira_url(&format!(
            "issue/{}/comment/{}",
            segment(issue_key_or_id),
            segment(comment_id)
        ));
        self.client.get_json(&url).await
    }

    /// Add a comment to an issue.
    #[instrument(skip(self, comment))]
    pub async fn add_comment(&self, issue_key_or_id: &str, comment: &NewComment) -> Result<Comment> {
        Requirements::new()
            .field("issueKeyOrId", issue_key_or_id)
            .custom("body", !comment.is_empty())
            .check()?;
        let url = self
            .client
            .jira_url(&format!("issue/{}/comment", segment(issue_key_or_id)));
        self.client.post_json(&url, comment).await
    }

    /// Delete a comment.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, issue_key_or_id: &str, comment_id: &str) -> Result<()> {
        Requirements::new()
            .field("issueKeyOrId", issue_key_or_id)
            .field("commentId", comment_id)
            .check()?;
        let url = self.client.jira_url(&format!(
            "issue/{}/comment/{}",
            segment(issue_key_or_id),
            segment(comment_id)
        ));
        self.client.delete_request(&url).await
    }

    /// Issues matching a JQL query.
    #[instrument(skip(self))]
    pub fn search_issues(&self, jql: &str) -> Result<Listing<Issue>> {
        Requirements::new().field("jql", jql).check()?;
        Ok(self.client.paginate::<_, StartAtPage<_>>(
            self.client.jira_url("search"),
            vec![("jql".into(), jql.to_string())],
            PageIdiom::StartAtTotal,
        ))
    }

    /// Versions of a project.
    #[instrument(skip(self))]
    pub fn project_versions(&self, project_key_or_id: &str) -> Result<Listing<Version>> {
        Requirements::new()
            .field("projectKeyOrId", project_key_or_id)
            .check()?;
        let url = self
            .client
            .jira_url(&format!("project/{}/version", segment(project_key_or_id)));
        Ok(self
            .client
            .paginate::<_, StartAtPage<_>>(url, vec![], PageIdiom::StartAtTotal))
    }

    /// Worklogs of an issue.
    #[instrument(skip(self))]
    pub fn issue_worklogs(&self, issue_key_or_id: &str) -> Result<Listing<Worklog>> {
        Requirements::new()
            .field("issueKeyOrId", issue_key_or_id)
            .check()?;
        let url = self
            .client
            .jira_url(&format!("issue/{}/worklog", segment(issue_key_or_id)));
        Ok(self
            .client
            .paginate::<_, StartAtPage<_>>(url, vec![], PageIdiom::StartAtTotal))
    }
}
