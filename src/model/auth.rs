//! Payloads of the authentication endpoints.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	model::User,
};

/// Body of `POST /api/auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
	/// Login email.
	pub email: String,
	/// Plain-text password.
	pub password: String,
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
	/// Login email.
	pub email: String,
	/// Plain-text password.
	pub password: String,
	/// Display name.
	pub name: String,
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("name", &self.name)
			.finish()
	}
}

/// Body of `POST /api/auth/refresh`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
	pub(crate) refresh_token: &'a str,
}

/// Response of the login and registration endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
	/// Newly issued access token.
	pub access_token: TokenSecret,
	/// Newly issued refresh token; registration may omit it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Profile of the signed-in user.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
}
impl AuthResponse {
	/// Extracts the credential pair.
	pub fn credentials(&self) -> CredentialPair {
		CredentialPair {
			access_token: self.access_token.clone(),
			refresh_token: self.refresh_token.clone(),
		}
	}
}

/// Response of `POST /api/auth/refresh`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
	/// Rotated access token.
	pub access_token: TokenSecret,
	/// Rotated refresh token, when the backend rotates it.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
}
impl From<RefreshResponse> for CredentialPair {
	fn from(value: RefreshResponse) -> Self {
		Self { access_token: value.access_token, refresh_token: value.refresh_token }
	}
}
