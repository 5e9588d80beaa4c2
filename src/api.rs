//! Canonical routing table and typed endpoint helpers.
//!
//! Every console screen talks to the backend through the helpers in the submodules, which
//! are thin `impl` blocks on [`ApiClient`](crate::client::ApiClient). Paths are relative to
//! the configured base URL; single-resource routes come from the identifier types'
//! `resource_path`.

pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod reports;
pub mod users;

// self
use crate::{_prelude::*, client::request};

/// `POST`: exchange email + password for a credential pair.
pub const AUTH_LOGIN: &str = "/api/auth/login";
/// `POST`: create an account and sign in.
pub const AUTH_REGISTER: &str = "/api/auth/register";
/// `POST`: exchange a refresh token for a rotated pair.
pub const AUTH_REFRESH: &str = "/api/auth/refresh";
/// Admin user collection.
pub const ADMIN_USERS: &str = "/api/admin/users";
/// Admin dashboard statistics.
pub const ADMIN_DASHBOARD: &str = "/api/admin/dashboard";
/// Category collection.
pub const CATEGORIES: &str = "/api/categories";
/// Expense collection.
pub const EXPENSES: &str = "/api/expenses";
/// Period reports.
pub const REPORTS: &str = "/api/reports";

/// Decodes a single resource, unwrapping `{ "<key>": … }` or `{ "data": … }` envelopes.
pub(crate) fn decode_item<T>(mut value: JsonValue, key: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	let envelope =
		[key, "data"].into_iter().find(|field| value.get(field).is_some_and(JsonValue::is_object));

	if let Some(field) = envelope {
		value = value.get_mut(field).map(JsonValue::take).unwrap_or_default();
	}

	request::decode(value)
}
