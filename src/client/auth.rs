//! Login, registration, and logout.

// self
use crate::{
	_prelude::*,
	api,
	client::{ApiClient, RequestDescriptor, request},
	http::ApiHttpClient,
	model::{AuthResponse, LoginRequest, RegisterRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Signs in and persists the issued credentials and profile.
	pub async fn login(
		&self,
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Result<AuthResponse> {
		let body = LoginRequest { email: email.into(), password: password.into() };
		let descriptor = RequestDescriptor::post(api::AUTH_LOGIN)
			.anonymous()
			.fallback_message("Login failed")
			.json(&body)?;

		self.authenticate(CallKind::Login, "login", descriptor).await
	}

	/// Creates an account and persists the issued credentials and profile.
	pub async fn register(
		&self,
		email: impl Into<String>,
		password: impl Into<String>,
		name: impl Into<String>,
	) -> Result<AuthResponse> {
		let body =
			RegisterRequest { email: email.into(), password: password.into(), name: name.into() };
		let descriptor = RequestDescriptor::post(api::AUTH_REGISTER)
			.anonymous()
			.fallback_message("Registration failed")
			.json(&body)?;

		self.authenticate(CallKind::Register, "register", descriptor).await
	}

	/// Clears every stored credential and the cached profile.
	pub async fn logout(&self) -> Result<()> {
		self.session.clear().await
	}

	async fn authenticate(
		&self,
		kind: CallKind,
		stage: &'static str,
		descriptor: RequestDescriptor,
	) -> Result<AuthResponse> {
		let span = CallSpan::new(kind, stage);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response: AuthResponse =
					request::decode(self.send(&descriptor, None).await?)?;

				self.session.store_auth_response(&response).await?;

				Ok(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}
}
