//! Dispatch fer the three extra unary operators.

use std::fmt;

use crate::error::SteekError;
use crate::host::{Execution, Host, Span, Step};
use crate::interpolate::Interpolation;
use crate::value::HostValue;

/// Hoo close tae a whole number a float has tae be afore `~` will take
/// it. Anything further aff than this is rejected rather than rounded.
pub const INTEGRAL_TOLERANCE: f64 = f64::EPSILON;

/// The three operators this crate bolts ontae the host's unary
/// expressions. Onie other operator is the host's ain business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedOp {
    /// `~x` - bitwise complement o' an integral number.
    BitwiseNot,
    /// `f"..."` - format-string interpolation.
    Format,
    /// `r"..."` - raw strings. No' implemented yet.
    Raw,
}

impl ExtendedOp {
    /// Match an operator symbol. `None` means the host keeps its ain
    /// result an cost ticks unchanged.
    pub fn from_symbol(op: &str) -> Option<Self> {
        match op {
            "~" => Some(ExtendedOp::BitwiseNot),
            "f" => Some(ExtendedOp::Format),
            "r" => Some(ExtendedOp::Raw),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ExtendedOp::BitwiseNot => "~",
            ExtendedOp::Format => "f",
            ExtendedOp::Raw => "r",
        }
    }
}

impl fmt::Display for ExtendedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

enum State<'h, H: Host> {
    /// Stitching an f-string.
    Format(Interpolation<'h, H>),
    /// Work's done - the operation's ain tick is still owed.
    Charge(Option<H::Value>),
    /// Final value ready tae hand back.
    Deliver(Option<H::Value>),
    Finished,
}

/// Execution o' one extended unary operator: whatever ticks the work
/// produces, then a final tick fer the operation itself, then the value.
pub struct UnaryExecution<'h, H: Host> {
    state: State<'h, H>,
}

impl<'h, H: Host> fmt::Debug for UnaryExecution<'h, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryExecution").finish_non_exhaustive()
    }
}

/// Dispatch an extended unary operator on an already-evaluated operand.
///
/// The host has already run the operand an emitted its ticks; this picks
/// up fae there. `depth` is the unary node's ain recursion depth -
/// embedded expressions run one deeper.
pub fn dispatch<'h, H: Host>(
    host: &'h H,
    op: ExtendedOp,
    operand: H::Value,
    at: Span,
    depth: usize,
) -> Result<UnaryExecution<'h, H>, SteekError<H::Error>> {
    let state = match op {
        ExtendedOp::BitwiseNot => State::Charge(Some(bitwise_not(&operand, at)?)),
        ExtendedOp::Format => match operand.as_string() {
            Some(literal) => State::Format(Interpolation::new(host, literal, at, depth)?),
            None => return Err(bad_operand(op, &operand, at)),
        },
        ExtendedOp::Raw => {
            return Err(SteekError::Unimplemented {
                feature: "Raw strings".to_string(),
            });
        }
    };
    Ok(UnaryExecution { state })
}

fn bitwise_not<V: HostValue, E>(operand: &V, at: Span) -> Result<V, SteekError<E>> {
    let n = match operand.as_number() {
        Some(n) => n,
        None => return Err(bad_operand(ExtendedOp::BitwiseNot, operand, at)),
    };
    // Only whole numbers hae a complement. NaN an the infinities sneak
    // past a bare modulo check, so rule them oot first.
    if !n.is_finite() || (n % 1.0).abs() >= INTEGRAL_TOLERANCE {
        return Err(bad_operand(ExtendedOp::BitwiseNot, operand, at));
    }
    Ok(V::number(!(n as i64) as f64))
}

fn bad_operand<V: HostValue, E>(op: ExtendedOp, operand: &V, at: Span) -> SteekError<E> {
    SteekError::BadUnaryOperator {
        op: op.symbol().to_string(),
        operand: operand.nice_string(),
        line: at.line,
    }
}

impl<'h, H: Host> Execution for UnaryExecution<'h, H> {
    type Value = H::Value;
    type Error = SteekError<H::Error>;

    fn step(&mut self) -> Result<Step<H::Value>, SteekError<H::Error>> {
        match &mut self.state {
            State::Format(inner) => match inner.step()? {
                Step::Tick(cost) => Ok(Step::Tick(cost)),
                Step::Done(value) => {
                    self.state = State::Deliver(Some(value));
                    Ok(Step::Tick(1.0))
                }
            },
            State::Charge(value) => {
                let value = value.take();
                self.state = State::Deliver(value);
                Ok(Step::Tick(1.0))
            }
            State::Deliver(value) => match value.take() {
                Some(value) => {
                    self.state = State::Finished;
                    Ok(Step::Done(value))
                }
                None => Err(SteekError::Internal(
                    "unary execution lost its value".to_string(),
                )),
            },
            State::Finished => Err(SteekError::Internal(
                "unary execution stepped after completion".to_string(),
            )),
        }
    }
}
