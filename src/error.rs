//! Client-level error types shared across requests, sessions, and transports.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Backend answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Session store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::session::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Stored credentials were rejected and could not be refreshed; sign in again.
	#[error("Session expired.")]
	SessionExpired,
	/// Backend returned a 2xx body that is not valid JSON for the expected type.
	#[error("Response body could not be decoded at `{path}`.", path = .source.path())]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response, when the body came straight off the wire.
		status: Option<u16>,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be encoded.")]
	Encode(#[source] serde_json::Error),
}
impl Error {
	/// Classifies the error into the console's handling buckets.
	pub fn class(&self) -> ErrorClass {
		match self {
			Self::SessionExpired => ErrorClass::Authorization,
			Self::Api(api) => api.class(),
			Self::Transport(_) => ErrorClass::Network,
			Self::Storage(_) | Self::Config(_) | Self::Decode { .. } | Self::Encode(_) =>
				ErrorClass::Local,
		}
	}

	/// HTTP status attached to the failure, if the backend produced one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(api) => Some(api.status),
			Self::Decode { status, .. } => *status,
			_ => None,
		}
	}

	/// Returns `true` when the caller must send the user back to the login entry point.
	pub fn is_session_expired(&self) -> bool {
		matches!(self, Self::SessionExpired)
	}

	/// Message suitable for a blocking dialog or an inline notice.
	pub fn user_message(&self) -> String {
		match self {
			Self::SessionExpired => SESSION_EXPIRED_MESSAGE.into(),
			Self::Transport(_) =>
				"Unable to reach the server. Check your network connection and try again.".into(),
			Self::Api(api) => api.user_message(),
			other => other.to_string(),
		}
	}
}

const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Handling bucket for an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
	/// Credentials are stale or missing (401, session expiry).
	Authorization,
	/// Client-side request problem reported by the backend (4xx other than 401).
	Validation,
	/// Backend failure (5xx).
	Server,
	/// Connectivity failure before any response arrived.
	Network,
	/// Local misconfiguration, storage, or (de)serialization failure.
	Local,
}

/// Error record built from a non-2xx backend response.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("Request failed with status {status}: {message}.")]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Human-readable message taken from the payload or a per-call fallback.
	pub message: String,
	/// Parsed JSON payload, when the body contained valid JSON.
	pub payload: Option<JsonValue>,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl ApiError {
	/// Builds an error record from a status code and raw response body.
	///
	/// Non-JSON and empty bodies are tolerated; the message falls back to `fallback` when the
	/// payload carries neither `message` nor `error`.
	pub fn from_body(status: u16, body: &[u8], fallback: &str) -> Self {
		let payload = serde_json::from_slice::<JsonValue>(body).ok();
		let message = payload
			.as_ref()
			.and_then(|value| {
				["message", "error"]
					.iter()
					.find_map(|field| value.get(field).and_then(JsonValue::as_str))
			})
			.filter(|message| !message.trim().is_empty())
			.unwrap_or(fallback)
			.to_owned();

		Self { status, message, payload, retry_after: None }
	}

	/// Attaches a Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
		self.retry_after = retry_after;

		self
	}

	/// Classifies the status code.
	pub fn class(&self) -> ErrorClass {
		match self.status {
			401 => ErrorClass::Authorization,
			500..=599 => ErrorClass::Server,
			_ => ErrorClass::Validation,
		}
	}

	/// Message suitable for display, keyed by status.
	///
	/// Authenticated 401s never reach the caller as an [`ApiError`]; they either refresh or
	/// become [`Error::SessionExpired`]. A 401 here comes from login or registration.
	pub fn user_message(&self) -> String {
		match self.status {
			401 => "Invalid email or password.".into(),
			403 => "You do not have access to this page.".into(),
			404 => "The requested resource was not found.".into(),
			422 => "The submitted data is invalid. Please check the entered information.".into(),
			500 => "Internal server error. Please try again later.".into(),
			_ => self.message.clone(),
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value supplied by the caller or environment.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than http(s) or cannot carry paths.
	#[error("Base URL `{value}` must be an absolute http(s) URL.")]
	UnsupportedBaseUrl {
		/// Rejected URL.
		value: String,
	},
	/// Request path cannot be resolved against the base URL.
	#[error("Request path `{path}` cannot be resolved against the base URL.")]
	InvalidPath {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Session holds no refresh token to exchange.
	#[error("Session is missing a refresh token.")]
	MissingRefreshToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
