//! The host interpreter's pipeline, as a set o' injected capabilities.
//!
//! The operators in this crate never run a language themselves: they hand
//! embedded expressions back tae whatever interpreter is hosting them.
//! That pipeline - tokenizer, parser, executor - comes in through the
//! [`Host`] trait, so the core can be driven by a real interpreter or by
//! a wee fake one in tests.
//!
//! Evaluation is cooperative. Naething here blocks or spawns threads:
//! executing a node gies back an [`Execution`] the scheduler polls, an
//! each [`Step::Tick`] is one unit o' interpreted work. Ticks fae nested
//! evaluations are passed on as they happen, never batched, so the
//! scheduler can interleave mony scripts aff the back o' them.

use crate::logging;
use crate::value::HostValue;

/// Whaur a piece o' source sits, fer error reporting an parse context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Span { line, column }
    }
}

/// One step o' a cooperative evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<V> {
    /// One unit o' interpreted work has elapsed.
    Tick(f64),
    /// Evaluation is finished wi' this value.
    Done(V),
}

/// A resumable evaluation the scheduler drives ae step at a time.
///
/// After `step` has returned [`Step::Done`] the execution is spent;
/// stepping it again is a caller bug an reports an internal error.
pub trait Execution {
    type Value;
    type Error;

    /// Advance by one unit o' work.
    fn step(&mut self) -> Result<Step<Self::Value>, Self::Error>;
}

/// A token stream fae the host's tokenizer.
pub trait TokenStream {
    /// Drop the spurious line-terminator token the host tokenizer tacks
    /// ontae the front o' every stream, gin there is one.
    fn discard_line_terminator(&mut self);
}

/// Everything the extra operators need fae the hosting interpreter.
pub trait Host {
    type Error: std::error::Error;
    type Value: HostValue;
    type Tokens: TokenStream;
    type Node;
    type Execution: Execution<Value = Self::Value, Error = Self::Error>;

    /// Tokenize a snippet o' source text.
    fn tokenize(&self, source: &str) -> Result<Self::Tokens, Self::Error>;

    /// Parse a single parenthesized expression oot the token stream.
    /// `at` is whaur the enclosing literal sits, so errors point hame.
    fn parse_grouping(&self, tokens: Self::Tokens, at: Span) -> Result<Self::Node, Self::Error>;

    /// Begin executing a parsed node at the gien recursion depth.
    fn execute(&self, node: Self::Node, depth: usize) -> Result<Self::Execution, Self::Error>;

    /// Report a non-fatal diagnostic. Fire-an-forget - nae effect on
    /// control flow. The default hands it tae this crate's logger.
    fn warn(&self, message: &str) {
        logging::holler(message);
    }
}

/// Drive an execution tae completion, collecting every cost tick in the
/// order it wis produced.
pub fn drain<X: Execution>(mut execution: X) -> Result<(X::Value, Vec<f64>), X::Error> {
    let mut ticks = Vec::new();
    loop {
        match execution.step()? {
            Step::Tick(cost) => ticks.push(cost),
            Step::Done(value) => return Ok((value, ticks)),
        }
    }
}
