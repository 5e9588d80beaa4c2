//! In-memory list state for the console's list screens.
//!
//! Screens never refetch after a mutation. They apply the backend's answer locally: a
//! create appends, an update replaces by identifier, a delete filters by identifier. The
//! last response applied wins.

// std
use std::slice::Iter;
// self
use crate::{
	auth::{CategoryId, ExpenseId, UserId},
	model::{Category, Expense, User},
};

/// Resource that carries a backend identifier.
pub trait Identified {
	/// Identifier type.
	type Id: PartialEq;

	/// Returns the identifier.
	fn id(&self) -> &Self::Id;
}
impl Identified for User {
	type Id = UserId;

	fn id(&self) -> &Self::Id {
		&self.id
	}
}
impl Identified for Category {
	type Id = CategoryId;

	fn id(&self) -> &Self::Id {
		&self.id
	}
}
impl Identified for Expense {
	type Id = ExpenseId;

	fn id(&self) -> &Self::Id {
		&self.id
	}
}

/// Ordered list of resources as shown by a screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
	items: Vec<T>,
}
impl<T> Listing<T>
where
	T: Identified,
{
	/// Creates an empty listing.
	pub fn new() -> Self {
		Self { items: Vec::new() }
	}

	/// Replaces the contents with a fresh fetch.
	pub fn replace_all(&mut self, items: Vec<T>) {
		self.items = items;
	}

	/// Appends a newly created item.
	pub fn push(&mut self, item: T) {
		self.items.push(item);
	}

	/// Replaces the item sharing `item`'s identifier. Returns `false` when none matched.
	pub fn replace(&mut self, item: T) -> bool {
		match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
			Some(slot) => {
				*slot = item;

				true
			},
			None => false,
		}
	}

	/// Mutates the item with `id` in place. Returns `false` when none matched.
	pub fn update_with<F>(&mut self, id: &T::Id, update: F) -> bool
	where
		F: FnOnce(&mut T),
	{
		self.items.iter_mut().find(|item| item.id() == id).map(update).is_some()
	}

	/// Removes the item with `id`, returning it.
	pub fn remove(&mut self, id: &T::Id) -> Option<T> {
		let index = self.items.iter().position(|item| item.id() == id)?;

		Some(self.items.remove(index))
	}

	/// Looks an item up by identifier.
	pub fn get(&self, id: &T::Id) -> Option<&T> {
		self.items.iter().find(|item| item.id() == id)
	}

	/// Iterates in display order.
	pub fn iter(&self) -> Iter<'_, T> {
		self.items.iter()
	}

	/// Returns the number of items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns `true` when the listing is empty.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}
impl<T> Default for Listing<T>
where
	T: Identified,
{
	fn default() -> Self {
		Self::new()
	}
}
impl<T> From<Vec<T>> for Listing<T>
where
	T: Identified,
{
	fn from(items: Vec<T>) -> Self {
		Self { items }
	}
}
impl<'a, T> IntoIterator for &'a Listing<T>
where
	T: Identified,
{
	type IntoIter = Iter<'a, T>;
	type Item = &'a T;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
