//! Dashboard statistics and period reports.

// self
use crate::{_prelude::*, model::Expense};

/// Spending aggregated per category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
	/// Category name.
	pub name: String,
	/// Summed amount.
	pub total: f64,
	/// Number of expenses.
	pub count: u64,
}

/// Spending aggregated per user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTotal {
	/// User email.
	pub email: String,
	/// Summed amount.
	pub total: f64,
	/// Number of expenses.
	pub count: u64,
}

/// Payload of `GET /api/admin/dashboard`.
///
/// Every field defaults so partially populated dashboards still decode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
	/// Registered users.
	pub total_users: u64,
	/// Recorded expenses.
	pub total_expenses: u64,
	/// Defined categories.
	pub total_categories: u64,
	/// Sum of all expense amounts.
	pub total_amount: f64,
	/// Categories created this month.
	pub new_categories: u64,
	/// Users registered this month.
	pub new_users: u64,
	/// Expenses recorded this month.
	pub new_expenses: u64,
	/// Month-over-month change of the average receipt, preformatted (e.g. `+4%`).
	pub avg_receipt_change: String,
	/// Average receipt amount.
	pub real_avg_receipt: f64,
	/// Latest expenses.
	pub recent_expenses: Vec<Expense>,
	/// Totals per category.
	pub by_category: Vec<CategoryTotal>,
	/// Totals per user.
	pub by_user: Vec<UserTotal>,
}

/// Reporting window accepted by `GET /api/reports`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
	/// Last seven days.
	Week,
	/// Current month.
	#[default]
	Month,
	/// Current year.
	Year,
	/// Entire history.
	All,
}
impl ReportPeriod {
	/// Returns the query value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Week => "week",
			Self::Month => "month",
			Self::Year => "year",
			Self::All => "all",
		}
	}
}
impl Display for ReportPeriod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ReportPeriod {
	type Err = UnknownPeriod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"week" => Ok(Self::Week),
			"month" => Ok(Self::Month),
			"year" => Ok(Self::Year),
			"all" => Ok(Self::All),
			other => Err(UnknownPeriod(other.to_owned())),
		}
	}
}

/// Error returned when parsing an unknown [`ReportPeriod`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown report period `{0}`.")]
pub struct UnknownPeriod(pub String);

/// Payload of `GET /api/reports`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
	/// Sum of expense amounts in the window.
	pub total_expenses: f64,
	/// Average spend per user in the window.
	pub average_per_user: f64,
	/// Totals per category.
	pub by_category: Vec<CategoryTotal>,
	/// Totals per user.
	pub by_user: Vec<UserTotal>,
	/// Latest expenses in the window.
	pub recent_expenses: Vec<Expense>,
}
