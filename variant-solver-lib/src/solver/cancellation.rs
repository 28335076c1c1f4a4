//! Cancelling long-running solver operations requires a [`Cancellation`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cooperative cancellation token.
///
/// The solver polls [`Cancellation::check`] at its suspension points, which
/// are spaced so that cancellation takes effect within roughly 100
/// milliseconds of work. A token combines a flag flipped by
/// [`Cancellation::cancel`] with an optional caller-supplied predicate, so a
/// host can cancel explicitly, by deadline, or both.
///
/// ```
/// # use variant_solver_lib::solver::cancellation::Cancellation;
/// let cancellation = Cancellation::new();
/// assert!(!cancellation.check());
/// cancellation.cancel();
/// assert!(cancellation.check());
/// ```
#[derive(Clone)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    func: Option<Arc<dyn Fn() -> bool>>,
}

impl Cancellation {
    /// Creates a token that cancels only via [`Cancellation::cancel`].
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            func: None,
        }
    }

    /// Creates a token that additionally cancels when the predicate returns
    /// true.
    pub fn from_fn<F>(func: F) -> Self
    where
        F: (Fn() -> bool) + 'static,
    {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            func: Some(Arc::new(func)),
        }
    }

    /// Creates a token that cancels once the given duration has elapsed.
    pub fn with_deadline(timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self::from_fn(move || Instant::now() >= deadline)
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Polls whether cancellation has been requested.
    pub fn check(&self) -> bool {
        self.flag.load(Ordering::SeqCst) || self.func.as_ref().is_some_and(|func| func())
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> From<F> for Cancellation
where
    F: (Fn() -> bool) + 'static,
{
    fn from(func: F) -> Self {
        Self::from_fn(func)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_predicate() {
        let cancellation = Cancellation::from_fn(|| true);
        assert!(cancellation.check());

        let cancellation = Cancellation::from_fn(|| false);
        assert!(!cancellation.check());
        cancellation.cancel();
        assert!(cancellation.check());
    }

    #[test]
    fn test_clone_shares_flag() {
        let cancellation = Cancellation::new();
        let clone = cancellation.clone();
        cancellation.cancel();
        assert!(clone.check());
    }
}
