/*!
 * Pipe Channel
 * Owned read and write ends of an anonymous OS pipe
 */

use super::super::payload::Payload;
use super::types::{PipeError, PipeResult};
use crate::core::limits::PAYLOAD_SIZE;
use nix::unistd::pipe;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use tracing::{debug, trace};

/// Factory for anonymous pipes
pub struct PipeChannel;

impl PipeChannel {
    /// Create a pipe and return its (read, write) ends
    ///
    /// Each end closes its descriptor when dropped.
    pub fn open() -> PipeResult<(PipeReader, PipeWriter)> {
        let (read_fd, write_fd) = pipe().map_err(PipeError::Creation)?;
        debug!(
            read_fd = read_fd.as_raw_fd(),
            write_fd = write_fd.as_raw_fd(),
            "Pipe created"
        );
        Ok((PipeReader::from(read_fd), PipeWriter::from(write_fd)))
    }
}

/// Read end of a pipe
#[derive(Debug)]
pub struct PipeReader {
    file: File,
}

impl PipeReader {
    /// Block until a full payload is read
    ///
    /// Returns `ShortRead` if the write end is closed first.
    pub fn receive(&mut self) -> PipeResult<Payload> {
        let mut buf = [0u8; PAYLOAD_SIZE];
        let mut filled = 0;

        while filled < PAYLOAD_SIZE {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PipeError::Read(e)),
            }
        }

        trace!(fd = self.raw_fd(), bytes = filled, "Pipe read");
        Payload::decode(&buf[..filled])
    }

    pub fn raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl From<OwnedFd> for PipeReader {
    fn from(fd: OwnedFd) -> Self {
        Self {
            file: File::from(fd),
        }
    }
}

/// Write end of a pipe
#[derive(Debug)]
pub struct PipeWriter {
    file: File,
}

impl PipeWriter {
    /// Write one full payload
    pub fn send(&mut self, payload: Payload) -> PipeResult<()> {
        self.file
            .write_all(&payload.encode())
            .map_err(PipeError::Write)?;
        trace!(fd = self.raw_fd(), value = payload.value(), "Pipe write");
        Ok(())
    }

    pub fn raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl From<OwnedFd> for PipeWriter {
    fn from(fd: OwnedFd) -> Self {
        Self {
            file: File::from(fd),
        }
    }
}
