//! Client configuration and environment loading.

// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "EXPENSE_ADMIN_API_URL";
/// Base URL used when [`BASE_URL_ENV`] is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Login entry point reported to [`SessionObserver`](crate::session::SessionObserver)s.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Settings shared by every call an [`ApiClient`](crate::client::ApiClient) makes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Backend base URL; always ends with `/` so relative paths keep any prefix.
	pub base_url: Url,
	/// Where the embedding UI sends users once their session expires.
	pub login_path: String,
	/// Optional user agent applied when the client builds its own transport.
	pub user_agent: Option<String>,
}
impl ClientConfig {
	/// Creates a configuration for the provided base URL.
	pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: normalize_base_url(base_url.as_ref())?,
			login_path: DEFAULT_LOGIN_PATH.into(),
			user_agent: None,
		})
	}

	/// Reads [`BASE_URL_ENV`] from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Resolves the configuration through `lookup`, falling back to [`DEFAULT_BASE_URL`].
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let base_url = lookup(BASE_URL_ENV)
			.map(|value| value.trim().to_owned())
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| DEFAULT_BASE_URL.into());

		Self::new(base_url)
	}

	/// Overrides the login entry point.
	pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
		self.login_path = login_path.into();

		self
	}

	/// Sets the user agent.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Resolves `path` (leading `/` optional) and `query` against the base URL.
	pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, ConfigError> {
		let mut url = self.base_url.join(path.trim_start_matches('/')).map_err(|source| {
			ConfigError::InvalidPath { path: path.to_owned(), source }
		})?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw)
		.map_err(|source| ConfigError::InvalidBaseUrl { value: raw.to_owned(), source })?;

	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedBaseUrl { value: raw.to_owned() });
	}

	url.set_query(None);
	url.set_fragment(None);

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}
