// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("expense_admin.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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

/// Emits a `warn` event when the session reaches its terminal state.
pub fn record_session_expired(reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%reason, "session expired; stored credentials cleared");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = reason;
	}
}

/// Emits a `warn` event when a refresh-token exchange fails.
pub fn record_refresh_failure(error: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%error, "refresh token exchange failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

/// Emits a `debug` event describing a backend response.
pub fn record_response(method: &str, path: &str, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(method, path, status, "backend responded");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, path, status);
	}
}
