//! Request descriptors and the authenticated dispatch loop.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::ApiClient,
	error::{ApiError, TransportError},
	http::{ApiHttpClient, Headers, HttpRequest, HttpResponse, Method},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const DEFAULT_FALLBACK_MESSAGE: &str = "Request failed";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Everything needed to issue (and replay) one backend call.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the configured base URL.
	pub path: String,
	/// Query pairs appended to the URL.
	pub query: Vec<(String, String)>,
	/// Caller headers; they override the defaults.
	pub headers: Headers,
	/// JSON body.
	pub body: Option<JsonValue>,
	/// Whether the stored access token is attached and a 401 triggers a refresh.
	pub authenticated: bool,
	/// Message used when an error body carries neither `message` nor `error`.
	pub fallback_message: String,
}
impl RequestDescriptor {
	/// Creates an authenticated descriptor for `method` and `path`.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			headers: Headers::new(),
			body: None,
			authenticated: true,
			fallback_message: DEFAULT_FALLBACK_MESSAGE.into(),
		}
	}

	/// `GET path`.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// `POST path`.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// `PUT path`.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// `PATCH path`.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// `DELETE path`.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_value(body).map_err(Error::Encode)?);

		Ok(self)
	}

	/// Adds or overrides a header.
	pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Appends a query pair.
	pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((name.into(), value.into()));

		self
	}

	/// Marks the call as unauthenticated: no bearer token and no refresh on 401.
	pub fn anonymous(mut self) -> Self {
		self.authenticated = false;

		self
	}

	/// Overrides the fallback error message.
	pub fn fallback_message(mut self, message: impl Into<String>) -> Self {
		self.fallback_message = message.into();

		self
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Issues `descriptor` and returns the JSON body, or an empty object for 204 and blank
	/// bodies.
	///
	/// Authenticated calls that receive a 401 refresh the session once and replay the request
	/// with the new token. A second 401 expires the session.
	pub async fn request(&self, descriptor: RequestDescriptor) -> Result<JsonValue> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				if !descriptor.authenticated {
					return self.send(&descriptor, None).await;
				}

				let sent = self.session.access_token().await?;
				let response = self.dispatch(&descriptor, sent.as_ref()).await?;

				if response.status != 401 {
					return self.read_response(&descriptor, response);
				}

				let fresh = self.refresh_after_rejection(sent.as_ref()).await?;
				let replayed = self.dispatch(&descriptor, Some(&fresh)).await?;

				if replayed.status == 401 {
					self.expire_session("refreshed access token was rejected").await;

					return Err(Error::SessionExpired);
				}

				self.read_response(&descriptor, replayed)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Issues `descriptor` and decodes the body into `T`.
	pub async fn request_as<T>(&self, descriptor: RequestDescriptor) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode(self.request(descriptor).await?)
	}

	/// Sends once and reads the response, without any refresh handling.
	pub(crate) async fn send(
		&self,
		descriptor: &RequestDescriptor,
		token: Option<&TokenSecret>,
	) -> Result<JsonValue> {
		let response = self.dispatch(descriptor, token).await?;

		self.read_response(descriptor, response)
	}

	async fn dispatch(
		&self,
		descriptor: &RequestDescriptor,
		token: Option<&TokenSecret>,
	) -> Result<HttpResponse> {
		let url = self.config.endpoint(&descriptor.path, &descriptor.query)?;
		let mut headers = Headers::new().with("content-type", JSON_CONTENT_TYPE);

		if let Some(token) = token {
			headers.insert("authorization", token.bearer());
		}

		headers.merge(&descriptor.headers);

		let body = descriptor
			.body
			.as_ref()
			.map(|body| serde_json::to_vec(body).map_err(Error::Encode))
			.transpose()?;
		let request = HttpRequest { method: descriptor.method, url, headers, body };
		let response =
			self.http_client.execute(request).await.map_err(TransportError::network)?;

		obs::record_response(descriptor.method.as_str(), &descriptor.path, response.status);

		Ok(response)
	}

	fn read_response(
		&self,
		descriptor: &RequestDescriptor,
		response: HttpResponse,
	) -> Result<JsonValue> {
		if !response.is_success() {
			return Err(ApiError::from_body(
				response.status,
				&response.body,
				&descriptor.fallback_message,
			)
			.with_retry_after(response.retry_after)
			.into());
		}
		if response.status == 204 || response.is_body_empty() {
			return Ok(JsonValue::Object(JsonMap::new()));
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source, status: Some(response.status) })
	}
}

/// Decodes a JSON value into `T`, keeping the path of the first mismatch.
///
/// The value has already left the response, so the failure carries no status.
pub(crate) fn decode<T>(value: JsonValue) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value)
		.map_err(|source| Error::Decode { source, status: None })
}

/// Extracts a list from the shapes list endpoints use: a bare array, an array under `key`,
/// or an array under `data`. Anything else is an empty list.
pub(crate) fn decode_list<T>(value: JsonValue, key: &str) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	let items = match value {
		JsonValue::Array(_) => value,
		JsonValue::Object(mut map) => {
			let envelope = [key, "data"]
				.into_iter()
				.find(|field| map.get(*field).is_some_and(JsonValue::is_array));

			match envelope.and_then(|field| map.remove(field)) {
				Some(items) => items,
				None => return Ok(Vec::new()),
			}
		},
		_ => return Ok(Vec::new()),
	};

	decode(items)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::Category;

	#[test]
	fn descriptor_builders_compose() {
		let descriptor = RequestDescriptor::get("/api/reports")
			.query("period", "week")
			.header("X-Trace", "abc")
			.anonymous()
			.fallback_message("Report failed");

		assert_eq!(descriptor.method, Method::Get);
		assert_eq!(descriptor.query, vec![("period".to_owned(), "week".to_owned())]);
		assert_eq!(descriptor.headers.get("x-trace"), Some("abc"));
		assert!(!descriptor.authenticated);
		assert_eq!(descriptor.fallback_message, "Report failed");
	}

	#[test]
	fn list_envelopes_decode_in_every_shape() {
		let bare = serde_json::json!([{ "id": "c-1", "name": "Food" }]);
		let named = serde_json::json!({ "categories": [{ "id": "c-1", "name": "Food" }] });
		let data = serde_json::json!({ "data": [{ "id": "c-1", "name": "Food" }] });
		let null_key =
			serde_json::json!({ "categories": null, "data": [{ "id": "c-1", "name": "Food" }] });
		let object_key = serde_json::json!({
			"categories": { "total": 1 },
			"data": [{ "id": "c-1", "name": "Food" }]
		});

		for value in [bare, named, data, null_key, object_key] {
			let categories: Vec<Category> =
				decode_list(value, "categories").expect("List envelope should decode.");

			assert_eq!(categories.len(), 1);
			assert_eq!(&*categories[0].id, "c-1");
		}

		let unknown: Vec<Category> = decode_list(serde_json::json!({ "total": 3 }), "categories")
			.expect("Unknown envelopes should decode as empty.");

		assert!(unknown.is_empty());
	}

	#[test]
	fn decode_reports_the_failing_path() {
		let err = decode::<Vec<Category>>(serde_json::json!([{ "id": "c-1", "name": 7 }]))
			.expect_err("Mistyped payload should fail to decode.");

		assert_eq!(err.status(), None);

		match err {
			Error::Decode { source, .. } => assert_eq!(source.path().to_string(), "[0].name"),
			other => panic!("Unexpected error: {other:?}"),
		}
	}
}
