/*!
 * POSIX Demos Library
 * Signal-driven shutdown and pipe relay functionality shared by the binaries
 */

pub mod core;
pub mod ipc;
pub mod monitoring;
pub mod signals;

// Re-exports
pub use crate::core::{ConfigError, DemoConfig, DemoError, DemoResult, WaitBackend};
pub use ipc::{Payload, PipeChannel, PipeError, PipeRelay, RelayReport};
pub use monitoring::{init_tracing, RunSpan};
pub use signals::{
    BlockingInterruptWaiter, Interrupt, InterruptWaiter, ShutdownHook, ShutdownSequence,
    SignalError,
};
