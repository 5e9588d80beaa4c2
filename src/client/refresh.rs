//! Refresh-token exchange behind a single in-flight guard.
//!
//! Every 401 on an authenticated call funnels into [`ApiClient::refresh_after_rejection`].
//! The caller waits on the client-wide guard, then compares the stored access token with
//! the one the backend rejected: a different stored token means a concurrent request already
//! rotated the pair, so it is reused without another exchange. Only a caller that still sees
//! its own rejected token talks to `POST /api/auth/refresh`. Any exchange failure clears the
//! session and surfaces [`Error::SessionExpired`].

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	api,
	auth::{CredentialPair, TokenSecret},
	client::{ApiClient, RequestDescriptor, request},
	error::ConfigError,
	http::ApiHttpClient,
	model::{RefreshRequest, RefreshResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Forces a refresh-token exchange through the single in-flight guard.
	///
	/// On failure the session is cleared, the observer is notified, and
	/// [`Error::SessionExpired`] is returned.
	pub async fn refresh_session(&self) -> Result<CredentialPair> {
		let _singleflight = self.refresh_guard.lock().await;

		self.rotate_or_expire().await
	}

	/// Returns a usable access token after `rejected` drew a 401.
	pub(crate) async fn refresh_after_rejection(
		&self,
		rejected: Option<&TokenSecret>,
	) -> Result<TokenSecret> {
		let _singleflight = self.refresh_guard.lock().await;
		let current = self.session.access_token().await?;

		match (rejected, current) {
			(Some(sent), Some(current)) if sent != &current => {
				self.refresh_metrics.record_coalesced();

				Ok(current)
			},
			(None, Some(current)) => {
				self.refresh_metrics.record_coalesced();

				Ok(current)
			},
			// A concurrent refresh already failed and cleared the session.
			(Some(_), None) => Err(Error::SessionExpired),
			_ => Ok(self.rotate_or_expire().await?.access_token),
		}
	}

	async fn rotate_or_expire(&self) -> Result<CredentialPair> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_session");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.refresh_metrics.record_attempt();

		let result = span.instrument(self.exchange_refresh_token()).await;

		match result {
			Ok(pair) => {
				self.refresh_metrics.record_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);

				Ok(pair)
			},
			Err(e) => {
				self.refresh_metrics.record_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				obs::record_refresh_failure(&e);
				self.expire_session("refresh token exchange failed").await;

				Err(Error::SessionExpired)
			},
		}
	}

	async fn exchange_refresh_token(&self) -> Result<CredentialPair> {
		let current =
			self.session.refresh_token().await?.ok_or(ConfigError::MissingRefreshToken)?;
		let descriptor = RequestDescriptor::post(api::AUTH_REFRESH)
			.anonymous()
			.fallback_message("Token refresh failed")
			.json(&RefreshRequest { refresh_token: current.expose() })?;
		let response: RefreshResponse = request::decode(self.send(&descriptor, None).await?)?;
		let previous = CredentialPair {
			access_token: response.access_token.clone(),
			refresh_token: Some(current),
		};
		let pair = previous.rotate(response.into());

		self.session.store_credentials(&pair).await?;

		Ok(pair)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn metrics_start_at_zero_and_count_independently() {
		let metrics = RefreshMetrics::default();

		metrics.record_attempt();
		metrics.record_attempt();
		metrics.record_success();
		metrics.record_coalesced();

		assert_eq!(metrics.attempts(), 2);
		assert_eq!(metrics.successes(), 1);
		assert_eq!(metrics.failures(), 0);
		assert_eq!(metrics.coalesced(), 1);
	}
}
