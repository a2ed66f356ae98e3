// self
use crate::obs::{ApplyOutcome, SchemeKind};

/// Records an `apply` outcome via the global metrics recorder (when enabled).
pub fn record_apply_outcome(kind: SchemeKind, outcome: ApplyOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"gaas_auth_apply_total",
			"scheme" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the outcome of one identity-endpoint mint call (when enabled).
pub fn record_token_mint(outcome: ApplyOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("gaas_auth_token_mint_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
