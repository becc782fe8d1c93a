/*!
 * Shutdown Sequence
 * Runs after the interrupt: notice, hooks, grace period, exit notice
 */

use super::traits::ShutdownHook;
use super::types::{
    Interrupt, ShutdownReport, SignalError, SignalResult, EXIT_NOTICE, INTERRUPT_NOTICE,
};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, warn};

/// Ordered shutdown work for the interrupt waiter
pub struct ShutdownSequence {
    grace: Duration,
    hooks: Vec<Box<dyn ShutdownHook>>,
}

impl ShutdownSequence {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            hooks: Vec::new(),
        }
    }

    /// Append a hook; hooks run in insertion order
    pub fn with_hook(mut self, hook: impl ShutdownHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Run the sequence, sleeping the grace period on the tokio timer
    pub async fn run<W: Write>(
        self,
        interrupt: &Interrupt,
        out: &mut W,
    ) -> SignalResult<ShutdownReport> {
        let grace = self.grace;
        let (hooks_run, hooks_failed) = self.begin(interrupt, out)?;
        tokio::time::sleep(grace).await;
        Self::finish(out)?;
        Ok(ShutdownReport {
            hooks_run,
            hooks_failed,
            grace,
        })
    }

    /// Run the sequence, sleeping the grace period on the calling thread
    pub fn run_blocking<W: Write>(
        self,
        interrupt: &Interrupt,
        out: &mut W,
    ) -> SignalResult<ShutdownReport> {
        let grace = self.grace;
        let (hooks_run, hooks_failed) = self.begin(interrupt, out)?;
        std::thread::sleep(grace);
        Self::finish(out)?;
        Ok(ShutdownReport {
            hooks_run,
            hooks_failed,
            grace,
        })
    }

    fn begin<W: Write>(self, interrupt: &Interrupt, out: &mut W) -> SignalResult<(usize, usize)> {
        writeln!(out, "{}", INTERRUPT_NOTICE).map_err(SignalError::Output)?;
        out.flush().map_err(SignalError::Output)?;

        let mut failed = 0;
        let total = self.hooks.len();
        for mut hook in self.hooks {
            match hook.on_shutdown(interrupt) {
                Ok(()) => debug!(hook = hook.name(), "Shutdown hook completed"),
                Err(e) => {
                    failed += 1;
                    warn!(hook = hook.name(), error = %e, "Shutdown hook failed");
                }
            }
        }

        debug!(grace_ms = self.grace.as_millis() as u64, "Entering shutdown grace period");
        Ok((total, failed))
    }

    fn finish<W: Write>(out: &mut W) -> SignalResult<()> {
        writeln!(out, "{}", EXIT_NOTICE).map_err(SignalError::Output)?;
        out.flush().map_err(SignalError::Output)
    }
}
