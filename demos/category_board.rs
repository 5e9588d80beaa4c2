//! Drives the category screen against a mock backend: load the list once, then apply
//! create, rename, and delete results locally without refetching.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use expense_admin_client::{
	auth::CategoryId,
	client::ReqwestApiClient,
	config::ClientConfig,
	listing::Listing,
	model::{CategoryPatch, NewCategory},
	session::Session,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(200).header("content-type", "application/json").body(
				"{\"categories\":[{\"id\":\"c-1\",\"name\":\"Food\"},{\"id\":\"c-2\",\"name\":\"Rent\"}]}",
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/categories");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"id\":\"c-3\",\"name\":\"Travel\",\"description\":\"Trains and hotels\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/categories/c-2");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"c-2\",\"name\":\"Housing\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/categories/c-1");
			then.status(204);
		})
		.await;

	let client = ReqwestApiClient::new(ClientConfig::new(server.base_url())?, Session::in_memory())?;
	let mut board = Listing::new();

	board.replace_all(client.list_categories().await?);
	board.push(
		client
			.create_category(&NewCategory::named("Travel").with_description("Trains and hotels"))
			.await?,
	);

	let rent = CategoryId::new("c-2")?;
	let renamed = client
		.update_category(&rent, &CategoryPatch { name: Some("Housing".into()), description: None })
		.await?;

	board.replace(renamed);

	let food = CategoryId::new("c-1")?;

	client.delete_category(&food).await?;
	board.remove(&food);

	for category in &board {
		println!(
			"{:>4}  {:<10} {}",
			category.id,
			category.name,
			category.description.as_deref().unwrap_or("")
		);
	}

	Ok(())
}
