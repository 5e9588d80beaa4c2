//! Access/refresh credential pairs held by a session.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token plus the refresh token used to rotate it.
///
/// The refresh token is optional because registration responses and some refresh responses
/// omit it; callers merge with [`CredentialPair::rotate`] so an omitted value keeps the
/// previously stored one.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
	/// Short-lived bearer credential.
	pub access_token: TokenSecret,
	/// Longer-lived credential exchanged for a new pair.
	pub refresh_token: Option<TokenSecret>,
}
impl CredentialPair {
	/// Creates a pair from raw token strings.
	pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: refresh_token.map(TokenSecret::new),
		}
	}

	/// Returns the pair that should replace `self` after a rotation, keeping the current
	/// refresh token when the rotation did not issue a new one.
	pub fn rotate(&self, next: Self) -> Self {
		Self {
			access_token: next.access_token,
			refresh_token: next.refresh_token.or_else(|| self.refresh_token.clone()),
		}
	}
}
impl Debug for CredentialPair {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialPair")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}
