//! Signs in against a mock backend, persists the session to disk, and shows the client
//! recovering from an expired access token with a single refresh.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use expense_admin_client::{
	client::ReqwestApiClient,
	config::ClientConfig,
	session::{FileStore, Session, SessionObserver},
};

struct PrintRedirect;
impl SessionObserver for PrintRedirect {
	fn session_expired(&self, login_path: &str) {
		println!("Session expired; the console would now open {login_path}.");
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).header("content-type", "application/json").body(
				"{\"accessToken\":\"demo-stale\",\"refreshToken\":\"demo-refresh\",\"user\":{\"id\":\"u-1\",\"email\":\"admin@example.com\",\"name\":\"Admin\",\"role\":\"admin\"}}",
			);
		})
		.await;
	let stale_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/admin/dashboard")
				.header("authorization", "Bearer demo-stale");
			then.status(401).body("{\"message\":\"Token expired\"}");
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"demo-fresh\",\"refreshToken\":\"demo-refresh-2\"}");
		})
		.await;
	let fresh_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/admin/dashboard")
				.header("authorization", "Bearer demo-fresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"totalUsers\":12,\"totalExpenses\":87,\"totalAmount\":4521.3}");
		})
		.await;
	let snapshot = env::temp_dir().join("expense-admin-demo-session.json");
	let session = Session::new(Arc::new(FileStore::open(&snapshot)?));
	let client = ReqwestApiClient::new(ClientConfig::new(server.base_url())?, session)?
		.with_observer(Arc::new(PrintRedirect));
	let auth = client.login("admin@example.com", "correct horse").await?;

	println!(
		"Signed in as {}; session persisted to {}.",
		auth.user.as_ref().map(|user| user.email.as_str()).unwrap_or("<unknown>"),
		snapshot.display()
	);

	let stats = client.dashboard_stats().await?;

	println!(
		"Dashboard: {} users, {} expenses, {:.2} total.",
		stats.total_users, stats.total_expenses, stats.total_amount
	);
	println!(
		"Refresh exchanges: {} attempted, {} succeeded.",
		client.refresh_metrics.attempts(),
		client.refresh_metrics.successes()
	);

	login_mock.assert_async().await;
	stale_mock.assert_async().await;
	refresh_mock.assert_async().await;
	fresh_mock.assert_async().await;
	client.logout().await?;

	Ok(())
}
