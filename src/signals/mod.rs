/*!
 * Signals Module
 * SIGINT-driven shutdown for the interrupt waiter
 */

mod blocking;
mod handler;
mod shutdown;
pub mod traits;
pub mod types;

// Re-export public API
pub use blocking::BlockingInterruptWaiter;
pub use handler::InterruptWaiter;
pub use shutdown::ShutdownSequence;
pub use traits::ShutdownHook;
pub use types::{
    Interrupt, ShutdownReport, SignalError, SignalResult, EXIT_NOTICE, INTERRUPT_NOTICE,
    WAITING_NOTICE,
};
