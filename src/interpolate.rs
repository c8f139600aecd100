//! Stitches a format string thegither, ae step at a time.

use std::mem;

use crate::error::SteekError;
use crate::eval;
use crate::host::{Execution, Host, Span, Step};
use crate::logging;
use crate::scanner::{self, Segment};
use crate::value::HostValue;

/// A format string bein' spliced: literal segments go straight intae the
/// output, expression segments go back through the host pipeline, an
/// every cost tick they produce is passed on in the order it wis made.
///
/// On onie error the hale thing aborts - nae partial string is ever
/// handed tae the host.
pub struct Interpolation<'h, H: Host> {
    host: &'h H,
    at: Span,
    depth: usize,
    segments: std::vec::IntoIter<Segment>,
    inner: Option<H::Execution>,
    out: String,
    finished: bool,
}

impl<'h, H: Host> Interpolation<'h, H> {
    /// Scan the literal an set up the splice.
    ///
    /// Scan warnings go tae the host's diagnostics sink; scan errors
    /// abort the compile. When the literal has nae expressions at aw the
    /// splice is finished on the spot - the decoded text is the answer,
    /// an nae expression ever runs.
    pub fn new(
        host: &'h H,
        literal: &str,
        at: Span,
        depth: usize,
    ) -> Result<Self, SteekError<H::Error>> {
        let scanned = scanner::scan(literal, at.line)?;
        for warning in &scanned.warnings {
            host.warn(&warning.to_string());
        }
        logging::mutter(&format!(
            "format string at line {} split intae {} segments",
            at.line,
            scanned.segments.len()
        ));

        if !scanned.has_expressions() {
            let mut out = String::new();
            for segment in scanned.segments {
                if let Segment::Text(text) = segment {
                    out.push_str(&text);
                }
            }
            return Ok(Interpolation {
                host,
                at,
                depth,
                segments: Vec::new().into_iter(),
                inner: None,
                out,
                finished: false,
            });
        }

        Ok(Interpolation {
            host,
            at,
            depth,
            segments: scanned.segments.into_iter(),
            inner: None,
            out: String::new(),
            finished: false,
        })
    }
}

impl<'h, H: Host> Execution for Interpolation<'h, H> {
    type Value = H::Value;
    type Error = SteekError<H::Error>;

    fn step(&mut self) -> Result<Step<H::Value>, SteekError<H::Error>> {
        if self.finished {
            return Err(SteekError::Internal(
                "format string stepped after completion".to_string(),
            ));
        }
        loop {
            // An embedded expression on the go - pass its ticks straight
            // through, then splice in its result.
            if let Some(inner) = self.inner.as_mut() {
                match inner.step().map_err(SteekError::Host)? {
                    Step::Tick(cost) => return Ok(Step::Tick(cost)),
                    Step::Done(value) => {
                        self.out.push_str(&eval::stringify(&value));
                        self.inner = None;
                    }
                }
            }
            match self.segments.next() {
                Some(Segment::Text(text)) => self.out.push_str(&text),
                Some(Segment::Expr(source)) => {
                    self.inner = Some(eval::begin(self.host, &source, self.at, self.depth)?);
                }
                None => {
                    self.finished = true;
                    return Ok(Step::Done(H::Value::string(mem::take(&mut self.out))));
                }
            }
        }
    }
}
