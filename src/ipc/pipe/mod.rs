/*!
 * Pipe Module
 * Anonymous OS pipes and the fork-based relay built on them
 */

mod channel;
mod relay;
pub mod types;

pub use channel::{PipeChannel, PipeReader, PipeWriter};
pub use relay::PipeRelay;
pub use types::{PipeError, PipeResult, RelayReport};
