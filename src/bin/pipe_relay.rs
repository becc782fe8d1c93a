/*!
 * Pipe Relay - Entry Point
 *
 * Forks once and relays a single integer from the child to the parent over
 * an anonymous pipe. Exits 1 if the pipe or the fork cannot be created.
 */

use posix_demos::{init_tracing, DemoConfig, DemoError, Payload, PipeRelay, RunSpan};
use tracing::info;

fn main() -> miette::Result<()> {
    let config = DemoConfig::from_env().map_err(DemoError::from)?;
    init_tracing(config.trace_json);

    let run = RunSpan::new("pipe-relay");
    let result = {
        let _entered = run.enter();
        let relay = PipeRelay::new(Payload::new(config.payload));
        relay.run(&mut std::io::stdout()).map(|report| {
            match serde_json::to_string(&report) {
                Ok(json) => info!(report = %json, "Relay report"),
                Err(e) => info!(error = %e, "Relay report could not be serialized"),
            }
        })
    };

    match &result {
        Ok(()) => run.record_success(),
        Err(e) => run.record_error(e),
    }
    drop(run);
    result.map_err(|e| DemoError::from(e).into())
}
