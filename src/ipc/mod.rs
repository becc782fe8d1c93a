/*!
 * IPC Module
 * Inter-process communication over anonymous pipes
 */

pub mod payload;
pub mod pipe;

// Re-export for convenience
pub use payload::Payload;
pub use pipe::{PipeChannel, PipeError, PipeReader, PipeRelay, PipeResult, PipeWriter, RelayReport};
