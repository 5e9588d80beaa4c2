//! Authenticated request client and the operations built on it.

pub mod auth;
pub mod refresh;
pub mod request;

pub use refresh::*;
pub use request::*;

// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	http::ApiHttpClient,
	session::{Session, SessionObserver},
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Issues backend calls on behalf of one session.
///
/// The client owns the transport, the configuration, and the [`Session`] so every call reads
/// the current access token right before it is sent. A 401 on an authenticated call triggers
/// at most one refresh (shared across concurrent callers through a single in-flight guard)
/// and one replay of the rejected request.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound call.
	pub http_client: Arc<C>,
	/// Base URL and login entry point.
	pub config: ClientConfig,
	/// Session context owning the stored credentials.
	pub session: Session,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	observer: Option<Arc<dyn SessionObserver>>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		session: Session,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			session,
			refresh_metrics: Default::default(),
			observer: None,
			refresh_guard: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Registers the hook notified when the session expires.
	pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
		self.observer = Some(observer);

		self
	}

	/// Clears stored credentials and notifies the observer.
	///
	/// Clearing failures are logged rather than returned; the caller is already on its way to
	/// a [`Error::SessionExpired`].
	pub(crate) async fn expire_session(&self, reason: &'static str) {
		crate::obs::record_session_expired(&reason);

		if let Err(e) = self.session.clear().await {
			crate::obs::record_session_expired(&format_args!("clearing credentials failed: {e}"));
		}
		if let Some(observer) = &self.observer {
			observer.session_expired(&self.config.login_path);
		}
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a new client for the provided configuration and session.
	///
	/// The client provisions its own reqwest transport, applying the configured user agent.
	pub fn new(config: ClientConfig, session: Session) -> Result<Self, ConfigError> {
		let http_client = match &config.user_agent {
			Some(user_agent) => ReqwestHttpClient::with_user_agent(user_agent)?,
			None => ReqwestHttpClient::default(),
		};

		Ok(Self::with_http_client(config, session, http_client))
	}

	/// Creates a client from the environment with an in-memory session.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::new(ClientConfig::from_env()?, Session::in_memory())
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			session: self.session.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			observer: self.observer.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("observer_set", &self.observer.is_some())
			.finish()
	}
}
