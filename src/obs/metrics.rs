// self
use crate::obs::CheckOutcome;

/// Records a lookup outcome via the global metrics recorder (when enabled).
pub fn record_check_outcome(outcome: CheckOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("jpad_client_check_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_check_outcome_noop_without_metrics() {
		record_check_outcome(CheckOutcome::Failure);
	}
}
