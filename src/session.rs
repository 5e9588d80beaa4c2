//! Session context and the storage contract behind it.
//!
//! [`Session`] is the only component that reads, writes, or clears stored credentials. It
//! keeps the access token, refresh token, and cached user profile under the fixed keys listed
//! in [`SessionKey`] and commits related writes as one batch so a rotated pair is never
//! half-written.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	model::{AuthResponse, User},
};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by session stores.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Reads the value stored under `key`, if present.
	fn load(&self, key: SessionKey) -> StoreFuture<'_, Option<String>>;

	/// Applies every write atomically with respect to other store operations.
	fn commit(&self, writes: Vec<SessionWrite>) -> StoreFuture<'_, ()>;
}

/// Fixed storage keys used by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionKey {
	/// Access token (`token`).
	#[serde(rename = "token")]
	AccessToken,
	/// Refresh token (`refreshToken`).
	#[serde(rename = "refreshToken")]
	RefreshToken,
	/// Serialized user profile (`user`).
	#[serde(rename = "user")]
	User,
}
impl SessionKey {
	/// Every key owned by a session, in clearing order.
	pub const ALL: [Self; 3] = [Self::AccessToken, Self::RefreshToken, Self::User];

	/// Returns the stable storage name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AccessToken => "token",
			Self::RefreshToken => "refreshToken",
			Self::User => "user",
		}
	}
}
impl Display for SessionKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Single mutation inside a [`SessionStore::commit`] batch.
#[derive(Clone, PartialEq, Eq)]
pub enum SessionWrite {
	/// Stores `value` under the key.
	Put(SessionKey, String),
	/// Removes the key.
	Delete(SessionKey),
}
impl SessionWrite {
	/// Applies the write to an in-memory map.
	pub fn apply(self, map: &mut BTreeMap<SessionKey, String>) {
		match self {
			Self::Put(key, value) => {
				map.insert(key, value);
			},
			Self::Delete(key) => {
				map.remove(&key);
			},
		}
	}
}
impl Debug for SessionWrite {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Put(key, _) => f.debug_tuple("Put").field(key).field(&"<redacted>").finish(),
			Self::Delete(key) => f.debug_tuple("Delete").field(key).finish(),
		}
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend or the session.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Hook notified when the session reaches its terminal expired state.
///
/// Embedding UIs use it to send the user to the login entry point.
pub trait SessionObserver
where
	Self: Send + Sync,
{
	/// Called once per expiry with the configured login path.
	fn session_expired(&self, login_path: &str);
}

/// Explicit session context handed to the client.
#[derive(Clone)]
pub struct Session {
	store: Arc<dyn SessionStore>,
}
impl Session {
	/// Wraps a store backend.
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self { store }
	}

	/// Creates a session backed by a fresh [`MemoryStore`].
	pub fn in_memory() -> Self {
		Self::new(Arc::new(MemoryStore::default()))
	}

	/// Returns the stored access token.
	pub async fn access_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.store.load(SessionKey::AccessToken).await?.map(TokenSecret::new))
	}

	/// Returns the stored refresh token.
	pub async fn refresh_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.store.load(SessionKey::RefreshToken).await?.map(TokenSecret::new))
	}

	/// Returns the stored credential pair, if an access token is present.
	pub async fn credentials(&self) -> Result<Option<CredentialPair>> {
		let Some(access_token) = self.access_token().await? else {
			return Ok(None);
		};
		let refresh_token = self.refresh_token().await?;

		Ok(Some(CredentialPair { access_token, refresh_token }))
	}

	/// Returns the cached user profile.
	pub async fn user(&self) -> Result<Option<User>> {
		let Some(raw) = self.store.load(SessionKey::User).await? else {
			return Ok(None);
		};
		let user = serde_json::from_str(&raw).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse cached user profile: {e}"),
		})?;

		Ok(Some(user))
	}

	/// Returns `true` when an access token is stored.
	pub async fn is_authenticated(&self) -> Result<bool> {
		Ok(self.access_token().await?.is_some())
	}

	/// Persists a credential pair. A pair without a refresh token removes the stored one.
	pub async fn store_credentials(&self, pair: &CredentialPair) -> Result<()> {
		self.store.commit(Self::credential_writes(pair)).await?;

		Ok(())
	}

	/// Persists the cached user profile.
	pub async fn store_user(&self, user: &User) -> Result<()> {
		self.store.commit(vec![Self::user_write(user)?]).await?;

		Ok(())
	}

	/// Persists everything a login or registration response carries in one batch.
	pub async fn store_auth_response(&self, response: &AuthResponse) -> Result<()> {
		let mut writes = Self::credential_writes(&response.credentials());

		if let Some(user) = &response.user {
			writes.push(Self::user_write(user)?);
		}

		self.store.commit(writes).await?;

		Ok(())
	}

	/// Removes every stored credential and the cached profile.
	pub async fn clear(&self) -> Result<()> {
		self.store.commit(SessionKey::ALL.into_iter().map(SessionWrite::Delete).collect()).await?;

		Ok(())
	}

	fn credential_writes(pair: &CredentialPair) -> Vec<SessionWrite> {
		let refresh = match &pair.refresh_token {
			Some(secret) => SessionWrite::Put(SessionKey::RefreshToken, secret.expose().to_owned()),
			None => SessionWrite::Delete(SessionKey::RefreshToken),
		};

		vec![SessionWrite::Put(SessionKey::AccessToken, pair.access_token.expose().to_owned()), refresh]
	}

	fn user_write(user: &User) -> Result<SessionWrite, StoreError> {
		let raw = serde_json::to_string(user).map_err(|e| StoreError::Serialization {
			message: format!("Failed to serialize user profile: {e}"),
		})?;

		Ok(SessionWrite::Put(SessionKey::User, raw))
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Session(..)")
	}
}
