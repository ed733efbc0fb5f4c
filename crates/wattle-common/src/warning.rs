//! Deduplicated diagnostics for the CSS pipeline.
//!
//! A malformed declaration is dropped silently as far as the caller is
//! concerned, but while debugging a stylesheet it helps to know *why*. Each
//! distinct `(component, message)` pair is printed to stderr once.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Messages already printed, keyed by `"[component] message"`.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock leaves the set intact; keep using it.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Print a warning once per unique `(component, message)` pair.
///
/// Returns `true` if this call printed the message.
///
/// # Example
/// ```
/// use wattle_common::warning::warn_once;
///
/// let _ = warn_once("CSS", "dropped declaration 'colr: red'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first_time = warned().get_or_insert_with(HashSet::new).insert(key);

    if first_time {
        eprintln!("{}", format!("[wattle {component}] warning: {message}").yellow());
    }
    first_time
}

/// Forget every recorded warning so they can be printed again.
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    warned().as_ref().map_or(0, HashSet::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_print_once() {
        let message = "duplicate_messages_print_once probe";
        assert!(warn_once("test", message));
        assert!(!warn_once("test", message));
        assert!(warn_once("other", message));
    }
}
