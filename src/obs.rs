//! Optional observability helpers for the authentication interceptors.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit a span named `gaas_auth.apply` around every `apply` call, with
//!   `scheme` and `stage` fields. Verbose strategies also emit redacted debug events.
//! - Enable `metrics` to increment `gaas_auth_apply_total` (labeled by `scheme` + `outcome`)
//!   and `gaas_auth_token_mint_total` (labeled by `outcome`).

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Authentication scheme observed by an interceptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeKind {
	/// HMAC request signing.
	Hmac,
	/// Identity-endpoint bearer tokens.
	Token,
}
impl SchemeKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SchemeKind::Hmac => "hmac",
			SchemeKind::Token => "token",
		}
	}
}
impl Display for SchemeKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each `apply` call or token mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApplyOutcome {
	/// Entry to an interceptor.
	Attempt,
	/// The request was decorated.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Schema URL passed through without an `Authorization` header.
	Skipped,
}
impl ApplyOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApplyOutcome::Attempt => "attempt",
			ApplyOutcome::Success => "success",
			ApplyOutcome::Failure => "failure",
			ApplyOutcome::Skipped => "skipped",
		}
	}
}
impl Display for ApplyOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
