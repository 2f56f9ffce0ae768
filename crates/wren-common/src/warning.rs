//! Deduplicated warnings for unsupported or malformed input.
//!
//! The document engine never fails on bad input, but it is still useful to
//! know when something was ignored. Each distinct message is logged once per
//! page load at `warn` level.

use std::collections::BTreeSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Warn about unsupported or malformed input (logs once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("CSS", "unknown color 'rebeccapurple'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    // A poisoned lock only means another thread panicked mid-insert; the
    // set is still usable.
    let should_log = match WARNED.lock() {
        Ok(mut guard) => guard.insert(key),
        Err(poisoned) => poisoned.into_inner().insert(key),
    };

    if should_log {
        log::warn!(target: "wren", "[{component}] {message}");
    }
}

/// Clear all recorded warnings (call when loading a new page)
pub fn clear_warnings() {
    match WARNED.lock() {
        Ok(mut guard) => guard.clear(),
        Err(poisoned) => poisoned.into_inner().clear(),
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    match WARNED.lock() {
        Ok(guard) => guard.len(),
        Err(poisoned) => poisoned.into_inner().len(),
    }
}
