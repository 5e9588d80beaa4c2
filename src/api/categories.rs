//! `/api/categories` helpers.

// self
use crate::{
	_prelude::*,
	api::{self, CATEGORIES},
	auth::CategoryId,
	client::{ApiClient, RequestDescriptor, request},
	http::ApiHttpClient,
	model::{Category, CategoryPatch, NewCategory},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists every category.
	pub async fn list_categories(&self) -> Result<Vec<Category>> {
		let value = self.request(RequestDescriptor::get(CATEGORIES)).await?;

		request::decode_list(value, "categories")
	}

	/// Fetches one category.
	pub async fn get_category(&self, id: &CategoryId) -> Result<Category> {
		let value = self.request(RequestDescriptor::get(id.resource_path())).await?;

		api::decode_item(value, "category")
	}

	/// Creates a category.
	pub async fn create_category(&self, category: &NewCategory) -> Result<Category> {
		let value = self.request(RequestDescriptor::post(CATEGORIES).json(category)?).await?;

		api::decode_item(value, "category")
	}

	/// Applies `patch` and returns the updated category.
	pub async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> Result<Category> {
		let value = self.request(RequestDescriptor::put(id.resource_path()).json(patch)?).await?;

		api::decode_item(value, "category")
	}

	/// Deletes a category.
	pub async fn delete_category(&self, id: &CategoryId) -> Result<()> {
		self.request(RequestDescriptor::delete(id.resource_path())).await?;

		Ok(())
	}
}
