// self
use crate::{_prelude::*, auth::TokenKind, http::Method, obs::CallKind, store::StoreError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by pipeline calls.
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
			let span = tracing::info_span!("midnight_booker.call", call = kind.as_str(), stage);

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

pub(crate) fn store_degraded(operation: &'static str, kind: TokenKind, error: &StoreError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(operation, token = kind.as_str(), %error, "token store degraded");
	#[cfg(not(feature = "tracing"))]
	let _ = (operation, kind, error);
}

pub(crate) fn retrying_after_refresh(method: Method, path: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(method = method.as_str(), path, "retrying request with renewed access token");
	#[cfg(not(feature = "tracing"))]
	let _ = (method, path);
}

pub(crate) fn session_expired(error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%error, "token refresh failed; session cleared");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}
