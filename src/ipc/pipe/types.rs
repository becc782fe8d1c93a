/*!
 * Pipe Types
 * Errors and reports for the pipe relay
 */

use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipe operation result
pub type PipeResult<T> = Result<T, PipeError>;

/// Pipe error types
#[derive(Debug, Error, Diagnostic)]
pub enum PipeError {
    #[error("Failed pipe creation: {0}")]
    #[diagnostic(
        code(pipe::creation_failed),
        help("The process or system may be out of file descriptors.")
    )]
    Creation(#[source] Errno),

    #[error("Fork failed: {0}")]
    #[diagnostic(
        code(pipe::fork_failed),
        help("The process limit may be reached or memory is exhausted.")
    )]
    Fork(#[source] Errno),

    #[error("Failed to write payload to pipe")]
    #[diagnostic(code(pipe::write_failed))]
    Write(#[source] std::io::Error),

    #[error("Failed to read payload from pipe")]
    #[diagnostic(code(pipe::read_failed))]
    Read(#[source] std::io::Error),

    #[error("Short read: expected {expected} bytes, received {received}")]
    #[diagnostic(
        code(pipe::short_read),
        help("The writer closed its end before sending a full payload.")
    )]
    ShortRead { expected: usize, received: usize },

    #[error("Child process {pid} did not exit cleanly: {status}")]
    #[diagnostic(code(pipe::child_failed))]
    ChildFailed { pid: i32, status: String },

    #[error("Failed to reap child process: {0}")]
    #[diagnostic(code(pipe::wait_failed))]
    Wait(#[source] Errno),

    #[error("Failed to write relay output")]
    #[diagnostic(code(pipe::output_failed))]
    Output(#[source] std::io::Error),
}

/// Outcome of one relay run, as seen by the parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RelayReport {
    pub child_pid: i32,
    pub sent: i32,
    pub received: i32,
    pub child_status: i32,
}

impl RelayReport {
    /// Whether the value survived the trip unchanged
    pub fn is_faithful(&self) -> bool {
        self.sent == self.received
    }
}
