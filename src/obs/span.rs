// self
use crate::{
	_prelude::*,
	obs::{OperationKind, OperationOutcome},
};

/// Span covering one manager operation.
///
/// With the `tracing` feature the span is `oauth2_token_handler.operation` with `operation`,
/// `stage` and a late-bound `outcome` field; without it every method is a no-op.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	kind: OperationKind,
	stage: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `kind` at the call site named by `stage`.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		Self {
			kind,
			stage,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"oauth2_token_handler.operation",
				operation = kind.as_str(),
				stage,
				outcome = tracing::field::Empty,
			),
		}
	}

	/// Operation the span belongs to.
	pub fn kind(&self) -> OperationKind {
		self.kind
	}

	/// Call site label.
	pub fn stage(&self) -> &'static str {
		self.stage
	}

	/// Drives `fut` inside the span.
	pub async fn run<Fut>(&self, fut: Fut) -> Fut::Output
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone()).await
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut.await
		}
	}

	/// Fills the `outcome` field once the operation resolved.
	pub fn record_outcome(&self, outcome: OperationOutcome) {
		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());
		#[cfg(not(feature = "tracing"))]
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn run_yields_the_inner_output() {
		let span = OperationSpan::new(OperationKind::Exchange, "client_credentials");
		let value = span.run(async { 42 }).await;

		span.record_outcome(OperationOutcome::Success);

		assert_eq!(value, 42);
		assert_eq!(span.kind(), OperationKind::Exchange);
		assert_eq!(span.stage(), "client_credentials");
	}
}
