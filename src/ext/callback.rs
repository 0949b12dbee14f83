//! Callback adapter for callers that prefer completion handlers over `.await`.
//!
//! Every manager operation is a single future; [`CallbackExt::notify`] drives it and hands the
//! outcome to a closure. The closure observes exactly the value the awaited future would have
//! produced.

// self
use crate::_prelude::*;

/// Boxed future returned by [`CallbackExt::notify`].
pub type CallbackFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Completion-handler surface for any fallible future.
pub trait CallbackExt<T, E>
where
	Self: Future<Output = Result<T, E>> + Send + Sized,
{
	/// Resolves `self` and passes the result to `callback`.
	///
	/// The returned future must still be polled (awaited or spawned on a runtime).
	fn notify<'a, F>(self, callback: F) -> CallbackFuture<'a>
	where
		Self: 'a,
		T: 'a,
		E: 'a,
		F: 'a + Send + FnOnce(Result<T, E>),
	{
		Box::pin(async move { callback(self.await) })
	}
}
impl<Fut, T, E> CallbackExt<T, E> for Fut where Fut: Future<Output = Result<T, E>> + Send {}
