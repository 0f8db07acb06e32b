use std::collections::HashSet;
use std::time::Duration;

use atl_api::client::{ClientConfig, Cursor, Credential, ErrorKind};
use atl_api::rest::AtlassianRestClient;
use futures::{StreamExt, TryStreamExt};
use rand::Rng;
use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

use crate::common;

fn query_u64(request: &Request, name: &str) -> Option<u64> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.parse().ok())
}

/// Responds like Jira's search endpoint over `total` numbered issues.
fn jira_search(total: u64) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |request: &Request| {
        let start_at = query_u64(request, "startAt").unwrap_or(0);
        let max_results = query_u64(request, "maxResults").unwrap_or(50);
        let end = (start_at + max_results).min(total);
        let issues: Vec<_> = (start_at..end)
            .map(|n| serde_json::json!({"id": (10000 + n).to_string(), "key": format!("ABC-{}", n + 1)}))
            .collect();
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "startAt": start_at,
            "maxResults": max_results,
            "total": total,
            "issues": issues
        }))
    }
}

#[tokio::test]
async fn jira_search_terminates_after_expected_pages() {
    let (server, client) = common::site(10).await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .respond_with(jira_search(25))
        .expect(3)
        .mount(&server)
        .await;

    let pages: Vec<_> = client
        .search_issues("project = ABC")
        .unwrap()
        .pages()
        .try_collect()
        .await
        .unwrap();

    let sizes: Vec<_> = pages.iter().map(|p| p.items.len()).collect();
    assert_eq!(sizes, vec![10, 10, 5]);

    let keys: HashSet<_> = pages
        .iter()
        .flat_map(|p| p.items.iter().map(|issue| issue.key.clone()))
        .collect();
    assert_eq!(keys.len(), 25);
}

#[tokio::test]
async fn failure_on_third_page_keeps_earlier_items() {
    common::init_tracing();
    let server = wiremock::MockServer::start().await;
    let client = AtlassianRestClient::with_config(
        server.uri(),
        Credential::bearer("token"),
        ClientConfig::builder()
            .with_page_size(10)
            .with_timeout(Duration::from_millis(200))
            .build(),
    )
    .unwrap();

    let search = jira_search(50);
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .respond_with(move |request: &Request| {
            let response = search(request);
            if query_u64(request, "startAt") == Some(20) {
                response.set_delay(Duration::from_secs(2))
            } else {
                response
            }
        })
        .mount(&server)
        .await;

    let results: Vec<_> = client
        .search_issues("project = ABC")
        .unwrap()
        .items()
        .collect()
        .await;

    assert_eq!(results.len(), 21);
    assert!(results[..20].iter().all(Result::is_ok));
    let err = results[20].as_ref().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Network(_)), "{err:?}");
}

#[tokio::test]
async fn scim_bulk_emits_pages_in_order() {
    let (server, client) = common::site(3).await;

    Mock::given(method("GET"))
        .and(path("/scim/directory/dir-1/Users"))
        .respond_with(|request: &Request| {
            let start_index = query_u64(request, "startIndex").unwrap_or(1);
            let count = query_u64(request, "count").unwrap_or(3);
            let total = 30;
            let last = (start_index + count - 1).min(total);
            let users: Vec<_> = (start_index..=last)
                .map(|n| serde_json::json!({"id": format!("u{n:02}"), "userName": format!("user{n}@example.com")}))
                .collect();
            let delay = rand::rng().random_range(5..60);
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(delay))
                .set_body_json(serde_json::json!({
                    "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
                    "totalResults": total,
                    "startIndex": start_index,
                    "itemsPerPage": users.len(),
                    "Resources": users
                }))
        })
        .expect(10)
        .mount(&server)
        .await;

    let users: Vec<_> = client
        .scim_users_bulk("dir-1", 4)
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<_> = users.iter().map(|u| u.id.clone()).collect();
    let expected: Vec<_> = (1..=30).map(|n| format!("u{n:02}")).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn confluence_traversal_resumes_from_persisted_cursor() {
    let (server, client) = common::site(2).await;
    let base = format!("{}/wiki", server.uri());

    Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content"))
        .respond_with(move |request: &Request| {
            let start = query_u64(request, "start").unwrap_or(0);
            let titles = ["Home", "Runbooks", "On-call", "Postmortems", "Roadmap"];
            let results: Vec<_> = titles
                .iter()
                .enumerate()
                .skip(start as usize)
                .take(2)
                .map(|(i, title)| serde_json::json!({"id": i.to_string(), "type": "page", "title": title}))
                .collect();
            let mut links = serde_json::json!({"base": base, "context": "/wiki"});
            if start + 2 < titles.len() as u64 {
                links["next"] = format!("/rest/api/content?spaceKey=ENG&limit=2&start={}", start + 2).into();
            }
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": results,
                "start": start,
                "limit": 2,
                "size": results.len(),
                "_links": links
            }))
        })
        .mount(&server)
        .await;

    // Read the first page only and keep its continuation.
    let mut pages: Vec<_> = client
        .space_content("ENG")
        .unwrap()
        .pages()
        .take(1)
        .try_collect()
        .await
        .unwrap();
    let first = pages.remove(0);
    let resume = first.next.clone().expect("more pages");
    assert!(matches!(resume, Cursor::Link(_)));

    let rest = client
        .space_content("ENG")
        .unwrap()
        .starting_at(resume)
        .collect_all()
        .await
        .unwrap();

    let titles: Vec<_> = first
        .items
        .iter()
        .chain(rest.iter())
        .filter_map(|c| c.title.as_deref())
        .collect();
    assert_eq!(
        titles,
        vec!["Home", "Runbooks", "On-call", "Postmortems", "Roadmap"]
    );
}

#[tokio::test]
async fn service_desk_queues_stop_at_last_page() {
    let (server, client) = common::site(2).await;

    Mock::given(method("GET"))
        .and(path("/rest/servicedeskapi/servicedesk/1/queue"))
        .respond_with(|request: &Request| {
            let start = query_u64(request, "start").unwrap_or(0);
            let is_last = start >= 2;
            let values: Vec<_> = (start..start + if is_last { 1 } else { 2 })
                .map(|n| serde_json::json!({"id": n.to_string(), "name": format!("Queue {n}")}))
                .collect();
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "start": start,
                "limit": 2,
                "size": values.len(),
                "isLastPage": is_last,
                "values": values
            }))
        })
        .expect(2)
        .mount(&server)
        .await;

    let queues = client.queues("1").unwrap().collect_all().await.unwrap();
    assert_eq!(queues.len(), 3);
}
