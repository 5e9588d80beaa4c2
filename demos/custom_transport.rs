//! Plugs a non-reqwest transport into the client.
//!
//! 1. Implement [`ApiHttpClient`] for the transport, returning every HTTP response as `Ok`.
//! 2. Pick a transport error type; the client wraps it as a network error.
//! 3. Pass the transport (owned or already in an `Arc`) to [`ApiClient::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use expense_admin_client::{
	client::{ApiClient, RequestDescriptor},
	config::ClientConfig,
	http::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse, Method},
	model::ReportPeriod,
	session::Session,
};

#[derive(Debug)]
enum OfflineError {
	Unreachable { host: String },
}
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable { host } => write!(f, "Host {host} is unreachable."),
		}
	}
}
impl StdError for OfflineError {}

/// Answers report requests from canned data and fails everything else.
struct CannedTransport;
impl ApiHttpClient for CannedTransport {
	type TransportError = OfflineError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse, Self::TransportError> {
		Box::pin(async move {
			match (request.method, request.url.path()) {
				(Method::Get, "/api/reports") => Ok(HttpResponse::new(
					200,
					r#"{"totalExpenses":320.5,"averagePerUser":160.25,"byCategory":[{"name":"Food","total":320.5,"count":4}]}"#,
				)),
				_ => Err(OfflineError::Unreachable {
					host: request.url.host_str().unwrap_or_default().to_owned(),
				}),
			}
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = ApiClient::<CannedTransport>::with_http_client(
		ClientConfig::new("https://admin.example.com")?,
		Session::in_memory(),
		CannedTransport,
	);
	let report = client.report(Some(ReportPeriod::Month)).await?;

	println!(
		"Monthly report: {:.2} total, {:.2} per user, {} categories.",
		report.total_expenses,
		report.average_per_user,
		report.by_category.len()
	);

	if let Err(e) = client.request(RequestDescriptor::get("/api/expenses")).await {
		println!("Expenses unavailable ({:?}): {}", e.class(), e.user_message());
	}

	Ok(())
}
