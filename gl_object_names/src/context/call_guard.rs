/// Anti-reentrancy guard for inbound calls.
///
/// The driver is invoked while the layer holds table and driver locks. A
/// driver that called back into the interception layer on the same thread
/// would translate the call a second time and deadlock on those locks, so an
/// inbound call entered while another is in flight on this thread is
/// rejected with `Error::Reentrant` before any lock is taken.

use std::cell::Cell;
use std::marker::PhantomData;
use crate::error::{Error, Result};
use crate::glvirt_bail;

thread_local! {
    /// Operation currently in flight on this thread
    static IN_FLIGHT: Cell<Option<&'static str>> = const { Cell::new(None) };
}

pub(crate) struct CallGuard {
    // Must be dropped on the thread that entered
    _not_send: PhantomData<*const ()>,
}

impl CallGuard {
    pub(crate) fn enter(operation: &'static str) -> Result<Self> {
        IN_FLIGHT.with(|in_flight| {
            if let Some(active) = in_flight.get() {
                glvirt_bail!("glvirt::Context", Error::Reentrant(format!(
                    "{} entered while {} is in flight", operation, active
                )));
            }
            in_flight.set(Some(operation));
            Ok(CallGuard { _not_send: PhantomData })
        })
    }

    #[cfg(test)]
    pub(crate) fn in_flight() -> Option<&'static str> {
        IN_FLIGHT.with(|in_flight| in_flight.get())
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        IN_FLIGHT.with(|in_flight| in_flight.set(None));
    }
}

#[cfg(test)]
#[path = "call_guard_tests.rs"]
mod tests;
