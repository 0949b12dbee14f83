// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::{OperationKind, OperationOutcome};

/// Attempt/success/failure totals for one [`OperationKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperationTally {
	/// Calls that entered the operation.
	pub attempts: u64,
	/// Calls that resolved with `Ok`.
	pub successes: u64,
	/// Calls that resolved with `Err`, including rejected parameters.
	pub failures: u64,
}

/// In-process outcome table shared by clones of a manager.
///
/// Every recorded outcome is also forwarded to the global `metrics` recorder as
/// `oauth2_token_handler_operation_total` when the feature is enabled.
#[derive(Debug, Default)]
pub struct OperationCounters {
	cells: [[AtomicU64; OperationOutcome::COUNT]; OperationKind::COUNT],
}
impl OperationCounters {
	/// Bumps the cell for `kind` + `outcome`.
	pub fn record(&self, kind: OperationKind, outcome: OperationOutcome) {
		self.cells[kind.index()][outcome.index()].fetch_add(1, Ordering::Relaxed);

		#[cfg(feature = "metrics")]
		metrics::counter!(
			"oauth2_token_handler_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	/// Current count for `kind` + `outcome`.
	pub fn get(&self, kind: OperationKind, outcome: OperationOutcome) -> u64 {
		self.cells[kind.index()][outcome.index()].load(Ordering::Relaxed)
	}

	/// Snapshot of every outcome recorded for `kind`.
	pub fn tally(&self, kind: OperationKind) -> OperationTally {
		OperationTally {
			attempts: self.get(kind, OperationOutcome::Attempt),
			successes: self.get(kind, OperationOutcome::Success),
			failures: self.get(kind, OperationOutcome::Failure),
		}
	}
}
