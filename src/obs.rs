//! Optional observability helpers for rating lookups.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `jpad_client.check` with the `stage` (call
//!   site) and `hostname` fields.
//! - Enable `metrics` to increment the `jpad_client_check_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckOutcome {
	/// Entry to [`JpadClient::check_url`](crate::client::JpadClient::check_url).
	Attempt,
	/// A normalized rating was returned.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CheckOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CheckOutcome::Attempt => "attempt",
			CheckOutcome::Success => "success",
			CheckOutcome::Failure => "failure",
		}
	}
}
impl Display for CheckOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
