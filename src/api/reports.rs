//! `/api/reports` helper.

// self
use crate::{
	_prelude::*,
	api::REPORTS,
	client::{ApiClient, RequestDescriptor},
	http::ApiHttpClient,
	model::{Report, ReportPeriod},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Fetches the report for `period`; `None` lets the backend pick its default window.
	pub async fn report(&self, period: Option<ReportPeriod>) -> Result<Report> {
		let mut descriptor = RequestDescriptor::get(REPORTS);

		if let Some(period) = period {
			descriptor = descriptor.query("period", period.as_str());
		}

		self.request_as(descriptor).await
	}
}
