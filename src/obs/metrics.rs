// self
use crate::obs::{CallKind, CallOutcome, FailureReason};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kbase_auth_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts a failed call under its [`FailureReason`].
pub fn record_call_failure(kind: CallKind, reason: FailureReason) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kbase_auth_call_failure_total",
			"call" => kind.as_str(),
			"reason" => reason.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, reason);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_call_outcome_noop_without_metrics() {
		record_call_outcome(CallKind::ValidateToken, CallOutcome::Failure);
		record_call_failure(CallKind::UserRoles, FailureReason::InvalidToken);
	}
}
