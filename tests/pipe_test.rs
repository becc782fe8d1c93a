/*!
 * Pipe Tests
 * Tests for anonymous pipes and the fork-based relay
 */

use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::Pid;
use posix_demos::ipc::{Payload, PipeChannel, PipeError, PipeRelay};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serial_test::serial;
use std::io::{self, Write};

/// Output sink that rejects every write
struct ClosedOutput;

impl Write for ClosedOutput {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

/// Output sink that accepts writes only in the process that created it
struct ParentOnlyOutput {
    owner: u32,
    buf: Vec<u8>,
}

impl ParentOnlyOutput {
    fn new() -> Self {
        Self {
            owner: std::process::id(),
            buf: Vec::new(),
        }
    }

    fn check_owner(&self) -> io::Result<()> {
        if std::process::id() == self.owner {
            Ok(())
        } else {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }
}

impl Write for ParentOnlyOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_owner()?;
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check_owner()
    }
}

fn assert_no_children_left() {
    assert_eq!(waitpid(Pid::from_raw(-1), None), Err(Errno::ECHILD));
}

#[test]
fn test_pipe_carries_default_payload() {
    let (mut reader, mut writer) = PipeChannel::open().unwrap();

    writer.send(Payload::default()).unwrap();
    let received = reader.receive().unwrap();

    assert_eq!(received.value(), 3);
}

#[test]
fn test_pipe_preserves_payload_order() {
    let (mut reader, mut writer) = PipeChannel::open().unwrap();

    writer.send(Payload::new(1)).unwrap();
    writer.send(Payload::new(2)).unwrap();
    writer.send(Payload::new(3)).unwrap();

    assert_eq!(reader.receive().unwrap().value(), 1);
    assert_eq!(reader.receive().unwrap().value(), 2);
    assert_eq!(reader.receive().unwrap().value(), 3);
}

// Serialized with the relay tests: a concurrently forked child would inherit
// this pipe and hold the write end open.
#[test]
#[serial]
fn test_reader_sees_eof_once_writer_dropped() {
    let (mut reader, mut writer) = PipeChannel::open().unwrap();
    writer.send(Payload::new(9)).unwrap();
    drop(writer);

    assert_eq!(reader.receive().unwrap().value(), 9);
    assert!(matches!(
        reader.receive(),
        Err(PipeError::ShortRead { received: 0, .. })
    ));
}

#[test]
#[serial]
fn test_write_after_reader_dropped_fails() {
    let (reader, mut writer) = PipeChannel::open().unwrap();
    drop(reader);

    // Rust ignores SIGPIPE, so the write surfaces EPIPE instead of killing us
    match writer.send(Payload::new(3)) {
        Err(PipeError::Write(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("expected broken pipe, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_relay_parent_receives_child_value() {
    let mut out = Vec::new();
    let report = PipeRelay::default().run(&mut out).unwrap();

    assert_eq!(report.sent, 3);
    assert_eq!(report.received, 3);
    assert_eq!(report.child_status, 0);
    assert!(report.is_faithful());
    assert!(report.child_pid > 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Parent received [3] from child process\n"
    );
}

#[test]
#[serial]
fn test_relay_is_faithful_across_runs() {
    for value in [i32::MIN, -1, 0, 3, i32::MAX] {
        let mut out = Vec::new();
        let report = PipeRelay::new(Payload::new(value)).run(&mut out).unwrap();
        assert_eq!(report.received, value);
    }
}

#[test]
#[serial]
fn test_relay_reaps_child_when_parent_output_fails() {
    let result = PipeRelay::new(Payload::new(3)).run(&mut ClosedOutput);

    assert!(matches!(result, Err(PipeError::Output(_))));
    assert_no_children_left();
}

#[test]
#[serial]
fn test_relay_reports_child_failure() {
    let mut out = ParentOnlyOutput::new();
    let result = PipeRelay::new(Payload::new(3)).run(&mut out);

    match result {
        Err(PipeError::ChildFailed { pid, status }) => {
            assert!(pid > 0);
            assert_eq!(status, "exited with status 1");
        }
        other => panic!("expected ChildFailed, got {:?}", other),
    }
    // The parent still read the value and printed its line
    assert_eq!(
        String::from_utf8(out.buf).unwrap(),
        "Parent received [3] from child process\n"
    );
    assert_no_children_left();
}

#[test]
#[serial]
fn test_successful_relay_leaves_no_children() {
    PipeRelay::default().run(&mut Vec::new()).unwrap();
    assert_no_children_left();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pipe_round_trip_is_lossless(value in any::<i32>()) {
        let (mut reader, mut writer) = PipeChannel::open().unwrap();
        writer.send(Payload::new(value)).unwrap();
        prop_assert_eq!(reader.receive().unwrap().value(), value);
    }
}
