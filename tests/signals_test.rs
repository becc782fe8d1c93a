/*!
 * Signal Tests
 * In-process tests for SIGINT registration and waiting
 */

use nix::sys::pthread::{pthread_kill, pthread_self};
use nix::sys::signal::{kill, Signal};
use nix::unistd::getpid;
use posix_demos::signals::{
    BlockingInterruptWaiter, InterruptWaiter, ShutdownSequence, EXIT_NOTICE, INTERRUPT_NOTICE,
};
use posix_demos::WaitBackend;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn test_blocking_waiter_collects_pending_sigint() {
    let waiter = BlockingInterruptWaiter::register().unwrap();

    // SIGINT is blocked in this thread, so it stays pending until sigwait
    pthread_kill(pthread_self(), Signal::SIGINT).unwrap();

    let interrupt = waiter.wait().unwrap();
    assert_eq!(interrupt.signal, Signal::SIGINT);
    assert_eq!(interrupt.backend, WaitBackend::Sigwait);
}

#[tokio::test]
#[serial]
async fn test_async_waiter_observes_sigint_sent_before_wait() {
    let waiter = InterruptWaiter::register().unwrap();

    kill(getpid(), Signal::SIGINT).unwrap();

    let interrupt = tokio::time::timeout(Duration::from_secs(5), waiter.wait())
        .await
        .expect("interrupt not observed")
        .unwrap();
    assert_eq!(interrupt.signal, Signal::SIGINT);
    assert_eq!(interrupt.backend, WaitBackend::Async);
    assert_eq!(interrupt.number(), 2);
}

#[tokio::test]
#[serial]
async fn test_async_waiter_blocks_without_signal() {
    let waiter = InterruptWaiter::register().unwrap();

    let result = tokio::time::timeout(Duration::from_millis(100), waiter.wait()).await;
    assert!(result.is_err(), "wait returned without an interrupt");
}

#[tokio::test]
#[serial]
async fn test_interrupt_then_shutdown_sequence() {
    let waiter = InterruptWaiter::register().unwrap();
    kill(getpid(), Signal::SIGINT).unwrap();
    let interrupt = waiter.wait().await.unwrap();

    let mut out = Vec::new();
    let report = ShutdownSequence::new(Duration::from_millis(10))
        .run(&interrupt, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![INTERRUPT_NOTICE, EXIT_NOTICE]);
    assert_eq!(report.grace, Duration::from_millis(10));
}
