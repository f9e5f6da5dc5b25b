// self
use crate::{
	auth::SessionEvent,
	obs::{CallKind, CallOutcome},
};

/// Counter incremented once per pipeline call stage, labeled by `call` and `outcome`.
pub const CALL_COUNTER: &str = "midnight_booker_call_total";
/// Counter incremented for every session lifecycle change, labeled by `event`.
pub const SESSION_COUNTER: &str = "midnight_booker_session_event_total";

/// Counts a request or refresh reaching `outcome`.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(CALL_COUNTER, "call" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Counts a session lifecycle change; an `expired` spike means refresh tokens are being
/// rejected.
pub fn record_session_event(event: &SessionEvent) {
	#[cfg(feature = "metrics")]
	metrics::counter!(SESSION_COUNTER, "event" => session_label(event)).increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = session_label(event);
}

fn session_label(event: &SessionEvent) -> &'static str {
	match event {
		SessionEvent::Established => "established",
		SessionEvent::Renewed => "renewed",
		SessionEvent::Expired { .. } => "expired",
		SessionEvent::LoggedOut => "logged_out",
	}
}
