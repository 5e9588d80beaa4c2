//! Strongly typed resource identifiers used in request paths and payloads.
//!
//! Each identifier knows the collection it lives under, so endpoint helpers never splice raw
//! strings into a URL. Values that would be collapsed by URL normalization (`.` and `..`) are
//! refused up front; percent-encoding cannot save them because `%2e` is a dot segment too.

// std
use std::ops::Deref;
// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, api};

/// Longest identifier, in bytes, the console will put on the wire.
pub const IDENTIFIER_MAX_LEN: usize = 128;

macro_rules! resource_id {
	($(#[$meta:meta])* $name:ident($kind:literal) in $collection:path;) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Collection route this identifier addresses.
			pub const COLLECTION: &'static str = $collection;

			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				check_identifier($kind, &value)?;

				Ok(Self(value))
			}

			/// Percent-encodes the identifier as one path segment.
			pub fn path_segment(&self) -> String {
				form_urlencoded::byte_serialize(self.0.as_bytes()).collect()
			}

			/// Route of the single resource, e.g. `<collection>/<segment>`.
			pub fn resource_path(&self) -> String {
				format!("{}/{}", Self::COLLECTION, self.path_segment())
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, IdentifierError> {
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, IdentifierError> {
				Self::new(s)
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
	};
}

resource_id! {
	/// Backend identifier of a console user.
	UserId("User") in api::ADMIN_USERS;
}
resource_id! {
	/// Backend identifier of an expense category.
	CategoryId("Category") in api::CATEGORIES;
}
resource_id! {
	/// Backend identifier of a recorded expense.
	ExpenseId("Expense") in api::EXPENSES;
}

/// Reason an identifier was refused.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Nothing to address.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Resource kind (`User`, `Category`, `Expense`).
		kind: &'static str,
	},
	/// `.` or `..`, which URL normalization would resolve away from the resource.
	#[error("{kind} identifier cannot be a dot segment.")]
	DotSegment {
		/// Resource kind (`User`, `Category`, `Expense`).
		kind: &'static str,
	},
	/// Whitespace or a control character.
	#[error("{kind} identifier contains the invalid character {found:?}.")]
	InvalidCharacter {
		/// Resource kind (`User`, `Category`, `Expense`).
		kind: &'static str,
		/// First offending character.
		found: char,
	},
	/// Longer than [`IDENTIFIER_MAX_LEN`] bytes.
	#[error("{kind} identifier exceeds {max} bytes.", max = IDENTIFIER_MAX_LEN)]
	TooLong {
		/// Resource kind (`User`, `Category`, `Expense`).
		kind: &'static str,
	},
}

fn check_identifier(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if let Some(found) = value.chars().find(|c| c.is_whitespace() || c.is_control()) {
		return Err(IdentifierError::InvalidCharacter { kind, found });
	}

	match value {
		"" => Err(IdentifierError::Empty { kind }),
		"." | ".." => Err(IdentifierError::DotSegment { kind }),
		_ if value.len() > IDENTIFIER_MAX_LEN => Err(IdentifierError::TooLong { kind }),
		_ => Ok(()),
	}
}
