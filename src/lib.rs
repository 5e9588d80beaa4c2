//! Typed admin client for the expense-tracking backend.
//!
//! Requests run against an explicit [`session::Session`] and recover from an expired access
//! token with one shared refresh before replaying the call.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod model;
pub mod obs;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{CredentialPair, TokenSecret, UserId},
		client::ApiClient,
		config::ClientConfig,
		http::ReqwestHttpClient,
		model::{Role, User},
		session::{MemoryStore, Session, SessionStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ApiClient<ReqwestHttpClient>;

	/// Builds a reqwest-backed [`ApiClient`] pointed at `base_url` with an empty in-memory
	/// session.
	pub fn build_reqwest_test_client(base_url: &str) -> (ReqwestTestClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn SessionStore> = store_backend.clone();
		let config =
			ClientConfig::new(base_url).expect("Test base URL should be accepted by the config.");
		let client = ApiClient::with_http_client(
			config,
			Session::new(store),
			ReqwestHttpClient::with_client(ReqwestClient::new()),
		);

		(client, store_backend)
	}

	/// Builds a credential pair fixture from raw token strings.
	pub fn credential_pair(access: &str, refresh: Option<&str>) -> CredentialPair {
		CredentialPair {
			access_token: TokenSecret::new(access),
			refresh_token: refresh.map(TokenSecret::new),
		}
	}

	/// Builds an admin user fixture.
	pub fn admin_user(id: &str) -> User {
		User {
			id: UserId::new(id).expect("User identifier fixture should be valid."),
			email: format!("{id}@example.com"),
			name: format!("Admin {id}"),
			role: Role::Admin,
			created_at: None,
			updated_at: None,
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
