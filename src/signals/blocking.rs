/*!
 * Blocking Interrupt Wait
 *
 * Synchronous counterpart of the async waiter. SIGINT is blocked in the
 * calling thread's mask and collected with sigwait(2); a signal sent at any
 * point after registration stays pending until the wait consumes it.
 */

use super::types::{Interrupt, SignalError, SignalResult};
use crate::core::config::WaitBackend;
use nix::errno::Errno;
use nix::sys::signal::{SigSet, Signal};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Waits for SIGINT by parking the calling thread in sigwait(2)
///
/// Only the registering thread has SIGINT blocked. Register before spawning
/// any other thread, otherwise a process-directed SIGINT may be delivered to
/// a thread where the default disposition still terminates the process.
pub struct BlockingInterruptWaiter {
    mask: SigSet,
    registered_at: Instant,
}

impl BlockingInterruptWaiter {
    /// Block SIGINT in the current thread so it stays pending until collected
    pub fn register() -> SignalResult<Self> {
        let mut mask = SigSet::empty();
        mask.add(Signal::SIGINT);
        mask.thread_block().map_err(|e| SignalError::Registration {
            signal: Signal::SIGINT,
            reason: e.desc().to_string(),
        })?;
        debug!("SIGINT blocked in thread mask (sigwait)");
        Ok(Self {
            mask,
            registered_at: Instant::now(),
        })
    }

    /// Park the calling thread until SIGINT is pending, then consume it
    pub fn wait(&self) -> SignalResult<Interrupt> {
        loop {
            match self.mask.wait() {
                Ok(Signal::SIGINT) => {
                    let interrupt = Interrupt::new(
                        Signal::SIGINT,
                        WaitBackend::Sigwait,
                        self.registered_at.elapsed(),
                    );
                    info!(
                        signal = %interrupt.signal,
                        waited_ms = interrupt.waited.as_millis() as u64,
                        "Interrupt received"
                    );
                    return Ok(interrupt);
                }
                Ok(other) => {
                    warn!(signal = %other, "Ignoring unexpected signal");
                }
                Err(Errno::EINTR) => {
                    debug!("sigwait interrupted, retrying");
                }
                Err(e) => {
                    return Err(SignalError::Wait {
                        signal: Signal::SIGINT,
                        reason: e.desc().to_string(),
                    })
                }
            }
        }
    }
}

impl Drop for BlockingInterruptWaiter {
    fn drop(&mut self) {
        if let Err(e) = self.mask.thread_unblock() {
            warn!(error = %e, "Failed to restore signal mask");
        }
    }
}
