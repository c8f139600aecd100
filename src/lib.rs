//! steek - format strings an extra unary operators fer scripting hosts
//!
//! "Steek" is Scots fer stitch, an stitching is whit this crate does: it
//! bolts three extra unary operators ontae an embeddable tree-walking
//! interpreter -
//!
//! - `~` takes the bitwise complement o' a whole number,
//! - `f` stitches a format string, evaluating every `{expr}` placeholder
//!   through the host's ain pipeline an splicing the results back in,
//! - `r` is the raw-string operator, which isnae implemented yet an says
//!   so loudly.
//!
//! The host interpreter - tokenizer, parser, executor, value types - is
//! no' part o' this crate. It comes in through the [`Host`] trait, so the
//! same core runs inside a real interpreter or against a wee fake one in
//! tests. Evaluation is cooperative: work comes back as an [`Execution`]
//! that the host's scheduler drives ae [`Step`] at a time, wi' each
//! `Step::Tick` standing fer one unit o' interpreted work.
//!
//! A typical host wires it up like this: when its unary evaluator lands
//! on an operator it doesnae recognize, it tries
//! [`ExtendedOp::from_symbol`]; gin that matches, it hands the evaluated
//! operand tae [`dispatch`] (or the one-shot [`apply`]) an forwards the
//! ticks tae its scheduler.

pub mod error;
pub mod escape;
pub mod eval;
pub mod host;
pub mod interpolate;
pub mod logging;
pub mod scanner;
pub mod unary;
pub mod value;

// Re-export commonly used types
pub use error::{ScanError, SteekError, SteekResult};
pub use host::{drain, Execution, Host, Span, Step, TokenStream};
pub use interpolate::Interpolation;
pub use scanner::{scan, ScanOutput, ScanWarning, Segment};
pub use unary::{dispatch, ExtendedOp, UnaryExecution, INTEGRAL_TOLERANCE};
pub use value::HostValue;

/// Apply an extended unary operator an drive it tae completion.
///
/// Gies back the final value thegither wi' every cost tick in the order
/// it wis produced - the embedded expressions' ticks first, then the
/// operation's ain final tick.
pub fn apply<H: Host>(
    host: &H,
    op: ExtendedOp,
    operand: H::Value,
    at: Span,
    depth: usize,
) -> SteekResult<(H::Value, Vec<f64>), H::Error> {
    let execution = unary::dispatch(host, op, operand, at, depth)?;
    host::drain(execution)
}

/// Stitch a format string in one go.
///
/// Convenience fer hosts that dinnae need tae step the work themselves.
/// The ticks only cover the embedded expressions; the unary operation's
/// ain tick belangs tae [`apply`].
pub fn interpolate<H: Host>(
    host: &H,
    literal: &str,
    at: Span,
    depth: usize,
) -> SteekResult<(H::Value, Vec<f64>), H::Error> {
    let execution = Interpolation::new(host, literal, at, depth)?;
    host::drain(execution)
}
