/*!
 * Signal Types
 * Interrupt results and errors
 */

use crate::core::config::WaitBackend;
use miette::Diagnostic;
use nix::sys::signal::Signal;
use std::time::Duration;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Line printed once the handler is in place
pub const WAITING_NOTICE: &str = "waiting...";

/// Line printed when the interrupt is observed
pub const INTERRUPT_NOTICE: &str = " received an interrupt.";

/// Line printed right before exit
pub const EXIT_NOTICE: &str = "time to exit";

/// Signal errors
#[derive(Error, Debug, Diagnostic)]
pub enum SignalError {
    #[error("Failed to register handler for {signal}: {reason}")]
    #[diagnostic(
        code(signals::registration_failed),
        help("The signal may be reserved, or no runtime is available to install the handler.")
    )]
    Registration { signal: Signal, reason: String },

    #[error("Signal stream for {0} closed before an interrupt arrived")]
    #[diagnostic(code(signals::stream_closed))]
    StreamClosed(Signal),

    #[error("Waiting for {signal} failed: {reason}")]
    #[diagnostic(code(signals::wait_failed))]
    Wait { signal: Signal, reason: String },

    #[error("Shutdown hook {name} failed: {reason}")]
    #[diagnostic(code(signals::hook_failed))]
    Hook { name: String, reason: String },

    #[error("Failed to write shutdown output")]
    #[diagnostic(
        code(signals::output_failed),
        help("stdout may have been closed by the parent process.")
    )]
    Output(#[source] std::io::Error),
}

/// An interrupt that ended a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupt {
    pub signal: Signal,
    pub backend: WaitBackend,
    /// Time between registration and delivery
    pub waited: Duration,
}

impl Interrupt {
    pub fn new(signal: Signal, backend: WaitBackend, waited: Duration) -> Self {
        Self {
            signal,
            backend,
            waited,
        }
    }

    /// Signal number as the kernel reports it
    pub fn number(&self) -> i32 {
        self.signal as i32
    }
}

/// What the shutdown sequence did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    pub hooks_run: usize,
    pub hooks_failed: usize,
    pub grace: Duration,
}
