//! Caller identity for hosts that name loggers after their call site.

use std::panic::Location;

/// `"file:line"` of the code that called this function.
///
/// Propagates through other `#[track_caller]` functions, so a host helper
/// marked `#[track_caller]` reports its own caller instead.
#[track_caller]
pub fn caller_location() -> String {
    let location = Location::caller();
    format!("{}:{}", location.file(), location.line())
}
