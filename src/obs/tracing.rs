// self
use crate::{_prelude::*, obs::SchemeKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedApply<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedApply<F> = F;

/// Span wrapped around one interceptor `apply` call.
#[derive(Clone, Debug)]
pub struct AuthSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AuthSpan {
	/// Creates a new span tagged with the provided scheme + stage.
	pub fn new(kind: SchemeKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("gaas_auth.apply", scheme = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> AuthSpanGuard {
		#[cfg(feature = "tracing")]
		{
			AuthSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			AuthSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedApply<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`AuthSpan::entered`].
pub struct AuthSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for AuthSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("AuthSpanGuard(..)")
	}
}

/// Emits a debug event for verbose interceptors.
///
/// Callers pass only redacted values: fingerprints, header schemes, and timestamps.
pub fn verbose_event(kind: SchemeKind, message: &str, detail: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(scheme = kind.as_str(), detail = %detail, "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, message, detail);
	}
}
