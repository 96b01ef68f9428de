// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCheck<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCheck<F> = F;

/// A span builder used by rating lookups.
#[derive(Clone, Debug)]
pub struct CheckSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CheckSpan {
	/// Creates a new span tagged with the call-site stage and the queried hostname.
	pub fn new(stage: &'static str, hostname: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("jpad_client.check", stage, hostname);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, hostname);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCheck<Fut>
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

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CheckSpan::new("instrument_wraps_future", "bild.de");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
