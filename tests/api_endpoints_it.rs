#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use expense_admin_client::{
	_preludet::*,
	auth::{CategoryId, UserId},
	listing::Listing,
	model::{NewCategory, ReportPeriod, Role},
};

#[tokio::test]
async fn login_persists_credentials_and_profile() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/login")
				.body("{\"email\":\"ada@example.com\",\"password\":\"correct horse\"}");
			then.status(200).header("content-type", "application/json").body(
				"{\"accessToken\":\"access-1\",\"refreshToken\":\"refresh-1\",\"user\":{\"id\":\"u-1\",\"email\":\"ada@example.com\",\"name\":\"Ada\",\"role\":\"admin\"}}",
			);
		})
		.await;
	let response =
		client.login("ada@example.com", "correct horse").await.expect("Login should succeed.");

	mock.assert_async().await;

	assert_eq!(response.access_token.expose(), "access-1");
	assert_eq!(response.user.as_ref().map(|user| user.role), Some(Role::Admin));

	let pair = client
		.session
		.credentials()
		.await
		.expect("Credentials should load.")
		.expect("Login should store credentials.");
	let user = client
		.session
		.user()
		.await
		.expect("Profile should load.")
		.expect("Login should store the profile.");

	assert_eq!(pair.access_token.expose(), "access-1");
	assert_eq!(pair.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-1"));
	assert_eq!(user.name, "Ada");

	client.logout().await.expect("Logout should succeed.");

	assert!(!client.session.is_authenticated().await.expect("Lookup should succeed."));
}

#[tokio::test]
async fn registration_without_refresh_token_uses_fallback_message_on_failure() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/register");
			then.status(400).body("not json");
		})
		.await;

	let err = client
		.register("bob@example.com", "pw", "Bob")
		.await
		.expect_err("Rejected registration should fail.");

	assert_eq!(err.to_string(), "Request failed with status 400: Registration failed.");
}

#[tokio::test]
async fn category_delete_updates_listing_without_refetch() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	client
		.session
		.store_credentials(&credential_pair("access-1", Some("refresh-1")))
		.await
		.expect("Seeding credentials should succeed.");

	let list = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(200).header("content-type", "application/json").body(
				"{\"categories\":[{\"id\":\"c-1\",\"name\":\"Food\"},{\"id\":\"c-2\",\"name\":\"Rent\"},{\"id\":\"c-3\",\"name\":\"Travel\"}]}",
			);
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/categories/c-2");
			then.status(204);
		})
		.await;
	let mut listing = Listing::new();

	listing.replace_all(client.list_categories().await.expect("Listing should load."));

	let id = CategoryId::new("c-2").expect("Category identifier fixture should be valid.");

	client.delete_category(&id).await.expect("Delete should succeed.");
	listing.remove(&id);

	delete.assert_async().await;
	list.assert_calls_async(1).await;

	let remaining: Vec<&str> = listing.iter().map(|category| &*category.id).collect();

	assert_eq!(remaining, ["c-1", "c-3"]);
}

#[tokio::test]
async fn create_appends_and_role_toggle_merges_locally() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/categories")
				.body("{\"description\":\"Pharmacy\",\"name\":\"Health\"}");
			then.status(201).header("content-type", "application/json").body(
				"{\"category\":{\"id\":\"c-9\",\"name\":\"Health\",\"description\":\"Pharmacy\"}}",
			);
		})
		.await;
	let toggle = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/admin/users/u-1").body("{\"role\":\"user\"}");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let mut categories = Listing::new();

	categories.push(
		client
			.create_category(&NewCategory::named("Health").with_description("Pharmacy"))
			.await
			.expect("Create should succeed."),
	);

	let admin = admin_user("u-1");
	let mut users = Listing::from(vec![admin.clone()]);
	let role = client.toggle_user_role(&admin).await.expect("Role toggle should succeed.");

	users.update_with(&admin.id, |user| user.role = role);

	create.assert_async().await;
	toggle.assert_async().await;

	assert_eq!(categories.len(), 1);
	assert_eq!(
		users
			.get(&UserId::new("u-1").expect("User identifier fixture should be valid."))
			.map(|user| user.role),
		Some(Role::User),
	);
}

#[tokio::test]
async fn list_endpoints_accept_every_envelope() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/users");
			then.status(200).header("content-type", "application/json").body(
				"[{\"id\":\"u-1\",\"email\":\"a@example.com\",\"role\":\"user\",\"createdAt\":\"2024-05-01T10:00:00Z\"}]",
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/expenses");
			then.status(200).header("content-type", "application/json").body(
				"{\"data\":[{\"id\":\"e-1\",\"amount\":10.5,\"description\":\"Lunch\",\"date\":\"2024-05-02\",\"userId\":\"u-1\",\"categoryId\":\"c-1\"}]}",
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(200).header("content-type", "application/json").body("{\"total\":0}");
		})
		.await;

	assert_eq!(client.list_users().await.expect("Users should load.").len(), 1);
	assert_eq!(client.list_expenses().await.expect("Expenses should load.")[0].amount, 10.5);
	assert!(client.list_categories().await.expect("Categories should load.").is_empty());
}

#[tokio::test]
async fn report_and_dashboard_decode_typed_payloads() {
	let server = MockServer::start_async().await;
	let (client, _store) = build_reqwest_test_client(&server.base_url());
	let report = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/reports").query_param("period", "week");
			then.status(200).header("content-type", "application/json").body(
				"{\"totalExpenses\":120.0,\"averagePerUser\":60.0,\"byCategory\":[{\"name\":\"Food\",\"total\":120.0,\"count\":3}]}",
			);
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/dashboard");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"totalUsers\":4,\"avgReceiptChange\":\"+4%\"}");
		})
		.await;

	let weekly = client.report(Some(ReportPeriod::Week)).await.expect("Report should load.");
	let stats = client.dashboard_stats().await.expect("Dashboard should load.");

	report.assert_async().await;

	assert_eq!(weekly.by_category[0].count, 3);
	assert_eq!(weekly.average_per_user, 60.0);
	assert_eq!(stats.total_users, 4);
	assert_eq!(stats.avg_receipt_change, "+4%");
}
