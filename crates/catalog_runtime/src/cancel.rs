//! Component-lifetime cancellation for in-flight async work.

use std::{cell::RefCell, collections::BTreeMap, future::Future, rc::Rc};

use futures::future::{AbortHandle, Abortable};
use thiserror::Error;

/// Work was abandoned because its scope was cancelled.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("request cancelled")]
pub struct Cancelled;

#[derive(Debug, Default)]
struct ScopeState {
    cancelled: bool,
    next_id: u64,
    in_flight: BTreeMap<u64, AbortHandle>,
}

/// Cancellation scope tied to a view's lifetime.
///
/// Futures started through [`CancelScope::run`] resolve to `Err(Cancelled)` as soon as
/// [`CancelScope::cancel`] is called, and the wrapped future is dropped without being polled
/// again. Once cancelled, a scope stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelScope {
    state: Rc<RefCell<ScopeState>>,
}

impl CancelScope {
    /// Creates a live scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives `future` unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.state.borrow_mut();
            if state.cancelled {
                return Err(Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.in_flight.insert(id, handle);
            id
        };

        let result = Abortable::new(future, registration).await;
        self.state.borrow_mut().in_flight.remove(&id);
        result.map_err(|_| Cancelled)
    }

    /// Aborts every in-flight future and rejects future `run` calls.
    pub fn cancel(&self) {
        let handles: Vec<AbortHandle> = {
            let mut state = self.state.borrow_mut();
            state.cancelled = true;
            std::mem::take(&mut state.in_flight).into_values().collect()
        };
        for handle in handles {
            handle.abort();
        }
    }

    /// Returns whether [`CancelScope::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    /// Number of futures currently running through this scope.
    pub fn in_flight(&self) -> usize {
        self.state.borrow().in_flight.len()
    }
}
