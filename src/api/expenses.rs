//! `/api/expenses` helpers.

// self
use crate::{
	_prelude::*,
	api::{self, EXPENSES},
	auth::ExpenseId,
	client::{ApiClient, RequestDescriptor, request},
	http::ApiHttpClient,
	model::{Expense, ExpensePatch, NewExpense},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists every expense visible to the signed-in account.
	pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
		let value = self.request(RequestDescriptor::get(EXPENSES)).await?;

		request::decode_list(value, "expenses")
	}

	/// Fetches one expense.
	pub async fn get_expense(&self, id: &ExpenseId) -> Result<Expense> {
		let value = self.request(RequestDescriptor::get(id.resource_path())).await?;

		api::decode_item(value, "expense")
	}

	/// Records an expense.
	pub async fn create_expense(&self, expense: &NewExpense) -> Result<Expense> {
		let value = self.request(RequestDescriptor::post(EXPENSES).json(expense)?).await?;

		api::decode_item(value, "expense")
	}

	/// Applies `patch` and returns the updated expense.
	pub async fn update_expense(&self, id: &ExpenseId, patch: &ExpensePatch) -> Result<Expense> {
		let value = self.request(RequestDescriptor::put(id.resource_path()).json(patch)?).await?;

		api::decode_item(value, "expense")
	}

	/// Deletes an expense.
	pub async fn delete_expense(&self, id: &ExpenseId) -> Result<()> {
		self.request(RequestDescriptor::delete(id.resource_path())).await?;

		Ok(())
	}
}
