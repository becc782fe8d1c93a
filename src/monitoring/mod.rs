/*!
 * Monitoring Module
 * Tracing setup shared by the demo binaries
 */

pub mod tracer;

pub use tracer::{generate_trace_id, init_tracing, RunSpan};
