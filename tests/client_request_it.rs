#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use expense_admin_client::{
	_preludet::*,
	client::RequestDescriptor,
	error::{ApiError, ErrorClass},
};

#[tokio::test]
async fn authenticated_request_attaches_bearer_and_passes_body_through() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	client
		.session
		.store_credentials(&credential_pair("access-1", Some("refresh-1")))
		.await
		.expect("Seeding credentials should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/admin/dashboard")
				.header("authorization", "Bearer access-1")
				.header("content-type", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"totalUsers\":3,\"nested\":{\"ok\":true}}");
		})
		.await;
	let value = client
		.request(RequestDescriptor::get("/api/admin/dashboard"))
		.await
		.expect("Authorized request should succeed.");

	mock.assert_async().await;

	assert_eq!(value, json!({ "totalUsers": 3, "nested": { "ok": true } }));
}

#[tokio::test]
async fn caller_headers_override_defaults() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	client
		.session
		.store_credentials(&credential_pair("access-1", None))
		.await
		.expect("Seeding credentials should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/expenses")
				.header("authorization", "Bearer override")
				.header("content-type", "application/merge+json");
			then.status(201).header("content-type", "application/json").body("{\"id\":\"e-1\"}");
		})
		.await;
	let value = client
		.request(
			RequestDescriptor::post("/api/expenses")
				.header("Authorization", "Bearer override")
				.header("Content-Type", "application/merge+json")
				.json(&json!({ "amount": 12.5 }))
				.expect("Body should serialize."),
		)
		.await
		.expect("Request with overridden headers should succeed.");

	mock.assert_async().await;

	assert_eq!(value["id"], "e-1");
}

#[tokio::test]
async fn no_content_and_blank_bodies_yield_empty_objects() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());
	let deleted = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/categories/c-1");
			then.status(204);
		})
		.await;
	let blank = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/reports");
			then.status(200).body("   ");
		})
		.await;
	let first = client
		.request(RequestDescriptor::delete("/api/categories/c-1"))
		.await
		.expect("No-content response should succeed.");
	let second = client
		.request(RequestDescriptor::get("/api/reports"))
		.await
		.expect("Blank response should succeed.");

	deleted.assert_async().await;
	blank.assert_async().await;

	assert_eq!(first, json!({}));
	assert_eq!(second, json!({}));
}

#[tokio::test]
async fn error_payload_message_and_status_propagate() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/categories");
			then.status(422)
				.header("content-type", "application/json")
				.header("retry-after", "7")
				.body("{\"message\":\"Name already exists\",\"field\":\"name\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(502).body("<html>gateway</html>");
		})
		.await;

	let err = client
		.request(
			RequestDescriptor::post("/api/categories")
				.json(&json!({ "name": "Food" }))
				.expect("Body should serialize."),
		)
		.await
		.expect_err("Validation failure should surface as an error.");

	assert_eq!(err.status(), Some(422));
	assert_eq!(err.class(), ErrorClass::Validation);

	match err {
		Error::Api(ApiError { message, payload, retry_after, .. }) => {
			assert_eq!(message, "Name already exists");
			assert_eq!(payload.as_ref().and_then(|p| p.get("field")), Some(&json!("name")));
			assert_eq!(retry_after, Some(Duration::seconds(7)));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let err = client
		.request(RequestDescriptor::get("/api/categories").fallback_message("Loading failed"))
		.await
		.expect_err("Gateway failure should surface as an error.");

	assert_eq!(err.class(), ErrorClass::Server);

	match err {
		Error::Api(api) => {
			assert_eq!(api.status, 502);
			assert_eq!(api.message, "Loading failed");
			assert!(api.payload.is_none());
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/expenses");
			then.status(200).header("content-type", "application/json").body("{\"broken\":");
		})
		.await;

	let err = client
		.request(RequestDescriptor::get("/api/expenses"))
		.await
		.expect_err("Truncated JSON should fail to decode.");

	assert!(matches!(err, Error::Decode { status: Some(200), .. }));
	assert_eq!(err.status(), Some(200));
	assert_eq!(err.class(), ErrorClass::Local);
}

#[tokio::test]
async fn base_url_prefix_and_query_are_preserved() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.url("/backend"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/backend/api/reports").query_param("period", "year");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;

	client
		.request(RequestDescriptor::get("/api/reports").query("period", "year"))
		.await
		.expect("Prefixed request should succeed.");

	mock.assert_async().await;
}
