/*!
 * Signal Traits
 * Extension points for the shutdown path
 */

use super::types::{Interrupt, SignalResult};

/// Work to perform between the interrupt and process exit
pub trait ShutdownHook: Send {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run the hook; failures are logged and do not stop later hooks
    fn on_shutdown(&mut self, interrupt: &Interrupt) -> SignalResult<()>;
}

impl<F> ShutdownHook for (&'static str, F)
where
    F: FnMut(&Interrupt) -> SignalResult<()> + Send,
{
    fn name(&self) -> &str {
        self.0
    }

    fn on_shutdown(&mut self, interrupt: &Interrupt) -> SignalResult<()> {
        (self.1)(interrupt)
    }
}
