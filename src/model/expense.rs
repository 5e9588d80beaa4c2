//! Recorded expenses.

// self
use crate::{
	_prelude::*,
	auth::{CategoryId, ExpenseId, UserId},
	model::{Category, User},
};

/// Expense as returned by `/api/expenses`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
	/// Backend identifier.
	pub id: ExpenseId,
	/// Amount in the account currency.
	pub amount: f64,
	/// Short description.
	pub description: String,
	/// Optional longer note.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// Expense date as sent by the backend (date or date-time).
	pub date: String,
	/// Creation instant.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Owner.
	pub user_id: UserId,
	/// Category.
	pub category_id: CategoryId,
	/// Embedded owner, when the backend joins it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
	/// Embedded category, when the backend joins it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<Category>,
}

/// Body of `POST /api/expenses`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
	/// Amount in the account currency.
	pub amount: f64,
	/// Short description.
	pub description: String,
	/// Optional longer note.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// Expense date (`YYYY-MM-DD` or RFC 3339).
	pub date: String,
	/// Category the expense belongs to.
	pub category_id: CategoryId,
}

/// Body of `PUT /api/expenses/:id`; absent fields stay unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
	/// New amount.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount: Option<f64>,
	/// New description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// New note.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// New date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub date: Option<String>,
	/// New category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category_id: Option<CategoryId>,
}
