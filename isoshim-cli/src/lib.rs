//! Library entry for isoshim-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

/// Exit code for invocations the dispatcher rejects before any handler runs:
/// an unknown handler name or a malformed argument list. Chosen to be
/// distinguishable from the common codes 0-2.
pub const DISPATCH_FAILURE_CODE: u8 = 250;

/// Exit code for failures raised inside a handler.
pub const HANDLER_FAILURE_CODE: u8 = 1;
