//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 1    | General error (unspecified)                  |
//! | 2    | CLI usage error (bad args, bad file format)  |
//! | 3    | Unmatched products found (`run --strict`)    |
//! | 4    | Invalid or unreadable config                 |
//! | 5    | Source file read/parse failure               |
//! | 6    | Output write failure                         |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unsupported file format.
pub const EXIT_USAGE: u8 = 2;

/// `run --strict` found catalog rows with no reference entry.
/// Without --strict, unmatched rows are reported but exit 0.
pub const EXIT_UNMATCHED: u8 = 3;

/// Config failed to read, parse, or validate.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// A tabular source could not be opened or parsed.
pub const EXIT_SOURCE: u8 = 5;

/// The merged output (or JSON result file) could not be written.
pub const EXIT_SINK: u8 = 6;
