#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use expense_admin_client::{
	_preludet::*,
	client::RequestDescriptor,
	session::{SessionKey, SessionObserver, SessionStore},
};

#[derive(Default)]
struct RecordingObserver {
	redirects: Mutex<Vec<String>>,
}
impl RecordingObserver {
	fn redirects(&self) -> Vec<String> {
		self.redirects.lock().clone()
	}
}
impl SessionObserver for RecordingObserver {
	fn session_expired(&self, login_path: &str) {
		self.redirects.lock().push(login_path.to_owned());
	}
}

async fn seed(client: &ReqwestTestClient, access: &str, refresh: &str) {
	client
		.session
		.store_credentials(&credential_pair(access, Some(refresh)))
		.await
		.expect("Seeding credentials should succeed.");
}

#[tokio::test]
async fn rejected_token_is_refreshed_and_request_replayed_once() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	seed(&client, "access-stale", "refresh-1").await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/expenses").header("authorization", "Bearer access-stale");
			then.status(401).body("{\"message\":\"Token expired\"}");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh").body("{\"refreshToken\":\"refresh-1\"}");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"access-fresh\",\"refreshToken\":\"refresh-2\"}");
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/expenses").header("authorization", "Bearer access-fresh");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let value = client
		.request(RequestDescriptor::get("/api/expenses"))
		.await
		.expect("Replayed request should succeed.");

	stale.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	fresh.assert_calls_async(1).await;

	assert_eq!(value, json!([]));

	let pair = client
		.session
		.credentials()
		.await
		.expect("Credentials should load.")
		.expect("Rotated credentials should be stored.");

	assert_eq!(pair.access_token.expose(), "access-fresh");
	assert_eq!(pair.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-2"));
	assert_eq!(client.refresh_metrics.attempts(), 1);
	assert_eq!(client.refresh_metrics.successes(), 1);
}

#[tokio::test]
async fn refresh_without_rotation_keeps_refresh_token() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	seed(&client, "access-stale", "refresh-kept").await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"access-fresh\"}");
		})
		.await;

	let pair = client.refresh_session().await.expect("Forced refresh should succeed.");

	assert_eq!(pair.access_token.expose(), "access-fresh");
	assert_eq!(pair.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-kept"));
	assert_eq!(
		client
			.session
			.refresh_token()
			.await
			.expect("Refresh token should load.")
			.as_ref()
			.map(|secret| secret.expose().to_owned()),
		Some("refresh-kept".to_owned()),
	);
}

#[tokio::test]
async fn failed_refresh_clears_session_and_notifies_observer() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.base_url());
	let observer = Arc::new(RecordingObserver::default());
	let client = client.with_observer(observer.clone());

	seed(&client, "access-stale", "refresh-revoked").await;
	client
		.session
		.store_user(&admin_user("u-1"))
		.await
		.expect("Seeding the profile should succeed.");
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(401);
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).body("{\"message\":\"Refresh token revoked\"}");
		})
		.await;
	let err = client
		.request(RequestDescriptor::get("/api/categories"))
		.await
		.expect_err("Failed refresh should expire the session.");

	refresh.assert_calls_async(1).await;

	assert!(err.is_session_expired());
	assert!(store.is_empty(), "Every session key should be cleared.");
	assert_eq!(observer.redirects(), ["/login"]);
	assert_eq!(client.refresh_metrics.failures(), 1);
}

#[tokio::test]
async fn second_rejection_after_refresh_expires_without_another_refresh() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.base_url());

	seed(&client, "access-stale", "refresh-1").await;

	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/users");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"access-fresh\",\"refreshToken\":\"refresh-2\"}");
		})
		.await;
	let err = client
		.request(RequestDescriptor::get("/api/admin/users"))
		.await
		.expect_err("A second 401 should expire the session.");

	rejected.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;

	assert!(err.is_session_expired());
	assert!(
		store
			.load(SessionKey::AccessToken)
			.await
			.expect("Store load should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn concurrent_rejections_share_one_refresh() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	seed(&client, "access-stale", "refresh-1").await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/expenses").header("authorization", "Bearer access-stale");
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/expenses").header("authorization", "Bearer access-fresh");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.delay(std::time::Duration::from_millis(50))
				.body("{\"accessToken\":\"access-fresh\",\"refreshToken\":\"refresh-2\"}");
		})
		.await;
	let (first, second) = tokio::join!(
		client.request(RequestDescriptor::get("/api/expenses")),
		client.request(RequestDescriptor::get("/api/expenses")),
	);

	first.expect("First request should succeed after the shared refresh.");
	second.expect("Second request should succeed after the shared refresh.");
	refresh.assert_calls_async(1).await;

	assert_eq!(client.refresh_metrics.attempts(), 1);
	assert_eq!(client.refresh_metrics.coalesced(), 1);
}

#[tokio::test]
async fn anonymous_calls_never_refresh() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	seed(&client, "access-stale", "refresh-1").await;

	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(401).body("{\"error\":\"Invalid credentials\"}");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).body("{\"accessToken\":\"unused\"}");
		})
		.await;
	let err = client
		.login("ada@example.com", "wrong")
		.await
		.expect_err("Rejected login should be an ordinary API error.");

	login.assert_async().await;
	refresh.assert_calls_async(0).await;

	assert!(!err.is_session_expired());
	assert_eq!(err.status(), Some(401));
	assert_eq!(err.to_string(), "Request failed with status 401: Invalid credentials.");
	assert_eq!(err.user_message(), "Invalid email or password.");
	assert!(client.session.is_authenticated().await.expect("Lookup should succeed."));
}
