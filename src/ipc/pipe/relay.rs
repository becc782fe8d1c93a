/*!
 * Pipe Relay
 *
 * Creates a pipe, forks once, and moves one payload from child to parent.
 * Each process closes the end it does not use, and the parent always reaps
 * the child before returning.
 */

use super::super::payload::Payload;
use super::channel::{PipeChannel, PipeReader, PipeWriter};
use super::types::{PipeError, PipeResult, RelayReport};
use crate::core::limits::{CHILD_FAILURE_STATUS, EXIT_SUCCESS};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};
use std::io::Write;
use tracing::{debug, info};

/// One-shot child-to-parent transfer over an anonymous pipe
#[derive(Debug, Clone, Copy)]
pub struct PipeRelay {
    payload: Payload,
}

impl PipeRelay {
    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }

    /// Run the relay, writing each process's diagnostic line to `out`
    ///
    /// Only the parent returns. The child writes its line, flushes `out` and
    /// terminates with `_exit`, so it never unwinds into the caller's code.
    pub fn run<W: Write>(&self, out: &mut W) -> PipeResult<RelayReport> {
        let (reader, writer) = PipeChannel::open()?;

        // SAFETY: the child only writes to the pipe and `out`, then calls
        // `_exit` without returning to the caller. It does not log; failures
        // reach the parent through the exit status.
        match unsafe { fork() }.map_err(PipeError::Fork)? {
            ForkResult::Child => {
                drop(reader);
                let status = match run_child(writer, self.payload, out) {
                    Ok(()) => EXIT_SUCCESS,
                    Err(_) => CHILD_FAILURE_STATUS,
                };
                // SAFETY: `_exit` is async-signal-safe and never returns.
                unsafe { nix::libc::_exit(status) }
            }
            ForkResult::Parent { child } => {
                drop(writer);
                debug!(child = child.as_raw(), "Forked relay child");
                run_parent(reader, child, self.payload, out)
            }
        }
    }
}

impl Default for PipeRelay {
    fn default() -> Self {
        Self::new(Payload::default())
    }
}

fn run_child<W: Write>(mut writer: PipeWriter, payload: Payload, out: &mut W) -> PipeResult<()> {
    writer.send(payload)?;
    drop(writer);
    writeln!(out, "Child wrote [{}]", payload).map_err(PipeError::Output)?;
    out.flush().map_err(PipeError::Output)
}

fn run_parent<W: Write>(
    mut reader: PipeReader,
    child: Pid,
    sent: Payload,
    out: &mut W,
) -> PipeResult<RelayReport> {
    let received = reader.receive();
    drop(reader);

    let output = match &received {
        Ok(payload) => writeln!(out, "Parent received [{}] from child process", payload)
            .and_then(|()| out.flush())
            .map_err(PipeError::Output),
        Err(_) => Ok(()),
    };

    // Reap before surfacing any error so the child never lingers as a zombie
    let status = reap(child);
    let received = received?;
    output?;
    let status = status?;

    let report = RelayReport {
        child_pid: child.as_raw(),
        sent: sent.value(),
        received: received.value(),
        child_status: status,
    };
    info!(
        child_pid = report.child_pid,
        sent = report.sent,
        received = report.received,
        "Relay complete"
    );
    Ok(report)
}

fn reap(child: Pid) -> PipeResult<i32> {
    loop {
        match waitpid(child, None) {
            Ok(WaitStatus::Exited(_, code)) if code == EXIT_SUCCESS => return Ok(code),
            Ok(WaitStatus::Exited(pid, code)) => {
                return Err(PipeError::ChildFailed {
                    pid: pid.as_raw(),
                    status: format!("exited with status {}", code),
                })
            }
            Ok(WaitStatus::Signaled(pid, signal, _)) => {
                return Err(PipeError::ChildFailed {
                    pid: pid.as_raw(),
                    status: format!("killed by {}", signal),
                })
            }
            Ok(other) => debug!(status = ?other, "Child state changed, still waiting"),
            Err(nix::errno::Errno::EINTR) => continue,
            Err(e) => return Err(PipeError::Wait(e)),
        }
    }
}
