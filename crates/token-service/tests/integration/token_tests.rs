//! End-to-end tests for the token issuance contract.
//!
//! Each test spawns the real router on a loopback port and drives it with
//! reqwest, asserting on the exact wire contract a client sees.

use reqwest::StatusCode;
use token_test_utils::{
    TestTokenServer, TokenAssertions, TEST_ACCOUNT_SID, TEST_API_KEY_SID,
    TEST_TOKEN_TTL_SECONDS,
};

fn issued_token(body: &serde_json::Value) -> String {
    body["token"]
        .as_str()
        .expect("response should carry a token string")
        .to_string()
}

/// Scenario from the service contract: a valid GET request yields 200 with
/// the token and an echo of both request fields.
#[tokio::test]
async fn test_get_issues_token_for_valid_request() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(format!(
            "{}/token?identity=alice&roomName=room42",
            server.url()
        ))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["identity"].as_str(), Some("alice"));
    assert_eq!(body["roomName"].as_str(), Some("room42"));

    let token = issued_token(&body);
    assert!(!token.is_empty());
    token
        .assert_valid_access_token()
        .assert_identity("alice")
        .assert_room("room42")
        .assert_ttl(TEST_TOKEN_TTL_SECONDS);

    Ok(())
}

#[tokio::test]
async fn test_post_issues_token_from_json_body() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .post(format!("{}/token", server.url()))
        .json(&serde_json::json!({"identity": "bob", "roomName": "standup"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    issued_token(&body)
        .assert_valid_access_token()
        .assert_identity("bob")
        .assert_room("standup");

    Ok(())
}

#[tokio::test]
async fn test_issued_claims_carry_configured_issuer_and_account() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let body: serde_json::Value = reqwest::Client::new()
        .get(format!(
            "{}/token?identity=carol&roomName=retro",
            server.url()
        ))
        .send()
        .await?
        .json()
        .await?;

    let decoded = issued_token(&body).decode_access_token();
    assert_eq!(decoded.iss, TEST_API_KEY_SID);
    assert_eq!(decoded.sub, TEST_ACCOUNT_SID);
    assert_eq!(decoded.exp, decoded.iat + TEST_TOKEN_TTL_SECONDS);
    assert_eq!(decoded.jti, format!("{}-{}", TEST_API_KEY_SID, decoded.iat));

    Ok(())
}

/// Scenario from the service contract: omitting identity is a 400 with a
/// non-empty error body.
#[tokio::test]
async fn test_missing_identity_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(format!("{}/token?roomName=room42", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    let error = body["error"].as_str().expect("error field should be set");
    assert!(!error.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_missing_room_name_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(format!("{}/token?identity=alice", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_missing_both_fields_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(format!("{}/token", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_empty_identity_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(format!("{}/token?identity=&roomName=room42", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_missing_identity_in_post_body_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .post(format!("{}/token", server.url()))
        .json(&serde_json::json!({"roomName": "room42"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert!(body["error"].is_string());

    Ok(())
}

/// Concurrent requests for different rooms must never cross-contaminate:
/// every response's token is scoped to exactly the room that request named.
#[tokio::test]
async fn test_concurrent_requests_do_not_leak_across_rooms() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;
    let client = reqwest::Client::new();

    let requests = (0..8).map(|i| {
        let client = client.clone();
        let url = format!(
            "{}/token?identity=user-{i}&roomName=room-{i}",
            server.url()
        );
        async move { (i, fetch_json(&client, url).await) }
    });

    let results = futures::future::join_all(requests).await;

    for (i, body) in results {
        assert_eq!(body["identity"].as_str(), Some(format!("user-{i}").as_str()));
        issued_token(&body)
            .assert_identity(&format!("user-{i}"))
            .assert_room(&format!("room-{i}"));
    }

    Ok(())
}

#[tokio::test]
async fn test_configured_ttl_drives_token_expiry() -> Result<(), anyhow::Error> {
    let config = token_test_utils::test_config_with_ttl(120);
    let server = TestTokenServer::spawn_with_config(config).await?;

    let body: serde_json::Value = reqwest::Client::new()
        .get(format!(
            "{}/token?identity=dave&roomName=planning",
            server.url()
        ))
        .send()
        .await?
        .json()
        .await?;

    issued_token(&body).assert_ttl(120);

    Ok(())
}

#[tokio::test]
async fn test_unknown_route_returns_404() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(format!("{}/no-such-route", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_unsupported_method_returns_405() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = reqwest::Client::new()
        .delete(format!("{}/token", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}

async fn fetch_json(client: &reqwest::Client, url: String) -> serde_json::Value {
    client
        .get(url)
        .send()
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("response should be JSON")
}
