use aviator_pay::application::lifecycle::OrderLifecycleManager;
use aviator_pay::config::{Credentials, GatewayConfig};
use aviator_pay::infrastructure::pesapal::{PesapalGateway, TOKEN_PATH};
use httpmock::prelude::*;
use serde_json::json;

pub const CONSUMER_KEY: &str = "test-key";
pub const CONSUMER_SECRET: &str = "test-secret";

pub fn lifecycle_for(server: &MockServer) -> OrderLifecycleManager {
    let config = GatewayConfig::default().with_base_url(server.base_url());
    let urls = config.order_urls();
    let gateway = PesapalGateway::new(config).expect("Failed to build gateway");
    OrderLifecycleManager::new(
        Credentials::new(CONSUMER_KEY, CONSUMER_SECRET),
        urls,
        Box::new(gateway),
    )
}

pub async fn mock_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
    let body = json!({ "token": token, "expiryDate": "2026-12-31T23:59:59Z" });
    server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200).json_body(body);
        })
        .await
}
