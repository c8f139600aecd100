//! Runtime values, as seen fae this crate.
//!
//! The host owns its ain value representation - we only need tae tell
//! numbers an strings apart, build fresh ones, an borrow the host's
//! human-friendly rendering fer everything else.

use std::fmt;

/// The view o' a host runtime value the extra operators care aboot.
pub trait HostValue: Clone + fmt::Debug {
    /// Wrap a fresh number value.
    fn number(n: f64) -> Self;

    /// Wrap a fresh string value.
    fn string(s: String) -> Self;

    /// The numeric value, gin this is a number.
    fn as_number(&self) -> Option<f64>;

    /// The text, gin this is a string.
    fn as_string(&self) -> Option<&str>;

    /// Short name o' the value's type, fer error messages.
    fn type_name(&self) -> &str;

    /// The host's ain human-friendly rendering o' the value.
    fn nice_string(&self) -> String;
}
