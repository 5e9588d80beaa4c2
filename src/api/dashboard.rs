//! `/api/admin/dashboard` helper.

// self
use crate::{
	_prelude::*,
	api::ADMIN_DASHBOARD,
	client::{ApiClient, RequestDescriptor},
	http::ApiHttpClient,
	model::DashboardStats,
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Fetches the dashboard counters, totals, and latest expenses.
	pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
		self.request_as(RequestDescriptor::get(ADMIN_DASHBOARD)).await
	}
}
