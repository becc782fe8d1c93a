/*!
 * Interrupt Waiter - Entry Point
 *
 * Installs a SIGINT handler, blocks until the interrupt arrives, then runs
 * the shutdown sequence and exits 0.
 */

use posix_demos::signals::WAITING_NOTICE;
use posix_demos::{
    init_tracing, BlockingInterruptWaiter, DemoConfig, DemoError, Interrupt, InterruptWaiter,
    RunSpan, ShutdownSequence, SignalError, WaitBackend,
};
use std::io::Write;
use tracing::info;

fn main() -> miette::Result<()> {
    let config = DemoConfig::from_env().map_err(DemoError::from)?;
    init_tracing(config.trace_json);

    let run = RunSpan::new("sigwait");
    let result = {
        let _entered = run.enter();
        info!(backend = %config.wait_backend, "Interrupt waiter starting");
        match config.wait_backend {
            WaitBackend::Async => run_async(&config),
            WaitBackend::Sigwait => run_sigwait(&config),
        }
    };

    match &result {
        Ok(()) => run.record_success(),
        Err(e) => run.record_error(e),
    }
    drop(run);
    result.map_err(Into::into)
}

fn run_async(config: &DemoConfig) -> Result<(), DemoError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SignalError::Registration {
            signal: nix::sys::signal::Signal::SIGINT,
            reason: format!("failed to start runtime: {}", e),
        })?;

    runtime.block_on(async {
        let waiter = InterruptWaiter::register()?;
        announce_waiting()?;
        let interrupt = waiter.wait().await?;
        shutdown(config)
            .run(&interrupt, &mut std::io::stdout())
            .await?;
        Ok::<(), DemoError>(())
    })
}

fn run_sigwait(config: &DemoConfig) -> Result<(), DemoError> {
    let waiter = BlockingInterruptWaiter::register()?;
    announce_waiting()?;
    let interrupt = waiter.wait()?;
    shutdown(config).run_blocking(&interrupt, &mut std::io::stdout())?;
    Ok(())
}

fn announce_waiting() -> Result<(), SignalError> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", WAITING_NOTICE).map_err(SignalError::Output)?;
    stdout.flush().map_err(SignalError::Output)
}

fn shutdown(config: &DemoConfig) -> ShutdownSequence {
    ShutdownSequence::new(config.shutdown_grace).with_hook((
        "log-interrupt",
        |interrupt: &Interrupt| -> Result<(), SignalError> {
            info!(
                signal = %interrupt.signal,
                number = interrupt.number(),
                backend = %interrupt.backend,
                "Shutting down after interrupt"
            );
            Ok(())
        },
    ))
}
