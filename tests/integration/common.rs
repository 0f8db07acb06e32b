use atl_api::client::{ClientConfig, Credential};
use atl_api::rest::AtlassianRestClient;
use wiremock::MockServer;

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A mock site plus a REST client pointed at it for both the site and the
/// Admin API.
pub async fn site(page_size: u32) -> (MockServer, AtlassianRestClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = AtlassianRestClient::with_config(
        server.uri(),
        Credential::basic("qa@example.com", "test-api-token"),
        ClientConfig::builder().with_page_size(page_size).build(),
    )
    .expect("client should build")
    .with_admin_url(server.uri())
    .expect("admin url should parse");
    (server, client)
}
