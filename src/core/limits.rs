/*!
 * Limits and Constants
 *
 * Centralized location for the fixed values both demos rely on.
 * Organized by domain so defaults are discoverable in one place.
 */

use std::time::Duration;

// =============================================================================
// PIPE RELAY
// =============================================================================

/// Size of one relayed payload on the wire (one `i32`)
pub const PAYLOAD_SIZE: usize = std::mem::size_of::<i32>();

/// Value the child writes when no override is configured
pub const DEFAULT_PAYLOAD: i32 = 3;

/// Exit status the child uses when its write fails
pub const CHILD_FAILURE_STATUS: i32 = 1;

// =============================================================================
// INTERRUPT WAITER
// =============================================================================

/// Pause between observing the interrupt and exiting (1s)
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_millis(1000);

/// Upper bound on the configurable grace period (30s)
/// Larger values are rejected when configuration is loaded
pub const MAX_SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

// =============================================================================
// PROCESS EXIT
// =============================================================================

/// Normal completion; fatal errors exit 1 through the miette report handler
pub const EXIT_SUCCESS: i32 = 0;
