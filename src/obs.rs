//! Optional observability helpers for token operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_token_handler.operation` with the
//!   `operation`, `stage` and `outcome` fields, plus `debug` events from the request builder.
//! - Enable `metrics` to increment the `oauth2_token_handler_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.
//!
//! [`OperationCounters`] keeps the same tallies in-process regardless of features.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Token operations observed by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Initial grant exchange against the token endpoint.
	Exchange,
	/// Refresh token grant.
	Refresh,
	/// Revocation request.
	Revoke,
}
impl OperationKind {
	pub(crate) const COUNT: usize = 3;

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Exchange => "exchange",
			OperationKind::Refresh => "refresh",
			OperationKind::Revoke => "revoke",
		}
	}

	pub(crate) const fn index(self) -> usize {
		self as usize
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a manager operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	pub(crate) const COUNT: usize = 3;

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}

	pub(crate) const fn index(self) -> usize {
		self as usize
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the attempt, runs `fut` inside an [`OperationSpan`], and records the outcome.
pub(crate) async fn observe<T, Fut>(
	counters: &OperationCounters,
	kind: OperationKind,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(kind, stage);

	counters.record(kind, OperationOutcome::Attempt);

	let result = span.run(fut).await;
	let outcome = match &result {
		Ok(_) => OperationOutcome::Success,
		Err(_e) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(operation = kind.as_str(), stage, error = %_e, "Operation failed.");

			OperationOutcome::Failure
		},
	};

	span.record_outcome(outcome);
	counters.record(kind, outcome);

	result
}
