//! Console users and their roles.

// self
use crate::{_prelude::*, auth::UserId};

/// Access level of a console user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Regular account limited to its own expenses.
	User,
	/// Administrator with access to the console.
	Admin,
}
impl Role {
	/// Returns the role the admin toggle switches to.
	pub const fn toggled(self) -> Self {
		match self {
			Self::User => Self::Admin,
			Self::Admin => Self::User,
		}
	}

	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::Admin => "admin",
		}
	}
}
impl Display for Role {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// User profile as returned by the backend and cached by the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Backend identifier.
	pub id: UserId,
	/// Login email.
	pub email: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Access level.
	pub role: Role,
	/// Creation instant.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update instant.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}

/// Body of `POST /api/admin/users`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	/// Login email.
	pub email: String,
	/// Initial password.
	pub password: String,
	/// Display name.
	pub name: String,
	/// Access level; the backend default applies when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<Role>,
}

/// Body of `PUT /api/admin/users/:id`; absent fields stay unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
	/// New display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New access level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<Role>,
}
impl UserPatch {
	/// Patch that only changes the role.
	pub fn role(role: Role) -> Self {
		Self { role: Some(role), ..Default::default() }
	}
}
