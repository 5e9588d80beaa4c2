//! `/api/admin/users` helpers.

// self
use crate::{
	_prelude::*,
	api::{self, ADMIN_USERS},
	auth::UserId,
	client::{ApiClient, RequestDescriptor, request},
	http::ApiHttpClient,
	model::{NewUser, Role, User, UserPatch},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists every user.
	pub async fn list_users(&self) -> Result<Vec<User>> {
		let value = self.request(RequestDescriptor::get(ADMIN_USERS)).await?;

		request::decode_list(value, "users")
	}

	/// Fetches one user.
	pub async fn get_user(&self, id: &UserId) -> Result<User> {
		let value = self.request(RequestDescriptor::get(id.resource_path())).await?;

		api::decode_item(value, "user")
	}

	/// Creates a user.
	pub async fn create_user(&self, user: &NewUser) -> Result<User> {
		let value = self.request(RequestDescriptor::post(ADMIN_USERS).json(user)?).await?;

		api::decode_item(value, "user")
	}

	/// Applies `patch` and returns the updated user.
	pub async fn update_user(&self, id: &UserId, patch: &UserPatch) -> Result<User> {
		let value = self.request(RequestDescriptor::put(id.resource_path()).json(patch)?).await?;

		api::decode_item(value, "user")
	}

	/// Deletes a user.
	pub async fn delete_user(&self, id: &UserId) -> Result<()> {
		self.request(RequestDescriptor::delete(id.resource_path())).await?;

		Ok(())
	}

	/// Switches `user` between `user` and `admin` and returns the role now in effect.
	///
	/// The response body is not trusted for the new role; list screens merge it locally.
	pub async fn toggle_user_role(&self, user: &User) -> Result<Role> {
		let role = user.role.toggled();

		self.request(RequestDescriptor::put(user.id.resource_path()).json(&UserPatch::role(role))?)
			.await?;

		Ok(role)
	}
}
