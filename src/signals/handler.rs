/*!
 * Interrupt Handler
 * Async SIGINT registration and wait on top of tokio's signal driver
 */

use super::types::{Interrupt, SignalError, SignalResult};
use crate::core::config::WaitBackend;
use nix::sys::signal::Signal;
use std::time::Instant;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, info};

/// Waits for SIGINT without blocking the runtime
///
/// The handler is installed by [`InterruptWaiter::register`]; any SIGINT
/// delivered after that call is observed by [`InterruptWaiter::wait`], even
/// if it arrives before `wait` is polled.
pub struct InterruptWaiter {
    stream: tokio::signal::unix::Signal,
    registered_at: Instant,
}

impl InterruptWaiter {
    /// Install the SIGINT handler
    ///
    /// Must be called from within a tokio runtime.
    pub fn register() -> SignalResult<Self> {
        let stream = signal(SignalKind::interrupt()).map_err(|e| SignalError::Registration {
            signal: Signal::SIGINT,
            reason: e.to_string(),
        })?;
        debug!("SIGINT handler registered (async)");
        Ok(Self {
            stream,
            registered_at: Instant::now(),
        })
    }

    /// Block the calling task until SIGINT arrives
    pub async fn wait(mut self) -> SignalResult<Interrupt> {
        match self.stream.recv().await {
            Some(()) => {
                let interrupt = Interrupt::new(
                    Signal::SIGINT,
                    WaitBackend::Async,
                    self.registered_at.elapsed(),
                );
                info!(
                    signal = %interrupt.signal,
                    waited_ms = interrupt.waited.as_millis() as u64,
                    "Interrupt received"
                );
                Ok(interrupt)
            }
            None => Err(SignalError::StreamClosed(Signal::SIGINT)),
        }
    }
}
