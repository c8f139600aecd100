//! Splits a format-string literal intae literal text an embedded
//! expressions, one character at a time.
//!
//! The scanner kens naething aboot evaluation - it just hands back an
//! ordered list o' segments plus onie warnings it picked up on the way.

use std::fmt;

use crate::error::ScanError;
use crate::escape;

/// One maximal run o' either literal text or a single embedded expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text wi' its escapes already decoded.
    Text(String),
    /// The raw source o' an expression that sat inside `{...}`.
    Expr(String),
}

impl Segment {
    pub fn is_expression(&self) -> bool {
        matches!(self, Segment::Expr(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Segment::Text(s) | Segment::Expr(s) => s,
        }
    }
}

/// A non-fatal diagnostic picked up while scanning. The offending text
/// stays in the output verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// A backslash followed by a character that isnae an escape we ken.
    InvalidEscape { escape: char, line: usize },
    /// A lone backslash richt at the end o' the literal.
    TrailingBackslash { line: usize },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::InvalidEscape { escape, line } => {
                write!(f, "invalid escape sequence '\\{}' at line {}", escape, line)
            }
            ScanWarning::TrailingBackslash { line } => {
                write!(f, "lone backslash at the end o' the string at line {}", line)
            }
        }
    }
}

/// Whit a scan produced: the ordered segments plus onie warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    pub segments: Vec<Segment>,
    pub warnings: Vec<ScanWarning>,
}

impl ScanOutput {
    pub fn has_expressions(&self) -> bool {
        self.segments.iter().any(Segment::is_expression)
    }
}

/// Which side o' the braces we're on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Outside,
    /// `depth` counts unmatched `{` since we came inside.
    Inside { depth: u32 },
}

/// A decision deferred fae the previous character. At maist one o' these
/// can be pending at a time, an it's consumed by the very next character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    Escape,
    OpenBrace,
    CloseBrace,
}

struct Scanner {
    mode: Mode,
    pending: Pending,
    buf: String,
    segments: Vec<Segment>,
    warnings: Vec<ScanWarning>,
    line: usize,
}

impl Scanner {
    fn new(line: usize) -> Self {
        Scanner {
            mode: Mode::Outside,
            pending: Pending::None,
            buf: String::new(),
            segments: Vec::new(),
            warnings: Vec::new(),
            line,
        }
    }

    fn step(&mut self, c: char) -> Result<(), ScanError> {
        if c == '\n' {
            self.line += 1;
        }
        match self.mode {
            Mode::Outside => self.step_outside(c),
            Mode::Inside { .. } => self.step_inside(c),
        }
    }

    fn step_outside(&mut self, c: char) -> Result<(), ScanError> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Escape => {
                match escape::decode(c) {
                    Some(decoded) => self.buf.push(decoded),
                    None => {
                        // No' an escape we ken - keep it as written.
                        self.buf.push('\\');
                        self.buf.push(c);
                        self.warnings.push(ScanWarning::InvalidEscape {
                            escape: c,
                            line: self.line,
                        });
                    }
                }
                Ok(())
            }
            Pending::OpenBrace => {
                if c == '{' {
                    // {{ collapses tae a single literal brace.
                    self.buf.push('{');
                    Ok(())
                } else {
                    self.flush_text();
                    self.mode = Mode::Inside { depth: 1 };
                    // This character is the first o' the expression - run
                    // it richt through the inside handling.
                    self.step_inside(c)
                }
            }
            Pending::CloseBrace => {
                if c == '}' {
                    self.buf.push('}');
                    Ok(())
                } else {
                    Err(ScanError::SingleCloseBrace { line: self.line })
                }
            }
            Pending::None => {
                match c {
                    '\\' => self.pending = Pending::Escape,
                    '{' => self.pending = Pending::OpenBrace,
                    '}' => self.pending = Pending::CloseBrace,
                    _ => self.buf.push(c),
                }
                Ok(())
            }
        }
    }

    fn step_inside(&mut self, c: char) -> Result<(), ScanError> {
        let depth = match self.mode {
            Mode::Inside { depth } => depth,
            Mode::Outside => unreachable!("step_inside wants brace mode"),
        };
        match c {
            '\\' => Err(ScanError::BackslashInExpression { line: self.line }),
            '{' => {
                self.mode = Mode::Inside { depth: depth + 1 };
                self.buf.push(c);
                Ok(())
            }
            '}' => {
                if depth > 1 {
                    // A nested close - still part o' the expression.
                    self.mode = Mode::Inside { depth: depth - 1 };
                    self.buf.push(c);
                    Ok(())
                } else if self.buf.is_empty() {
                    Err(ScanError::EmptyExpression { line: self.line })
                } else {
                    let expr = std::mem::take(&mut self.buf);
                    self.segments.push(Segment::Expr(expr));
                    self.mode = Mode::Outside;
                    Ok(())
                }
            }
            _ => {
                self.buf.push(c);
                Ok(())
            }
        }
    }

    fn finish(mut self) -> Result<ScanOutput, ScanError> {
        if let Mode::Inside { .. } = self.mode {
            return Err(ScanError::ExpectingCloseBrace { line: self.line });
        }
        match self.pending {
            Pending::Escape => {
                self.buf.push('\\');
                self.warnings
                    .push(ScanWarning::TrailingBackslash { line: self.line });
            }
            Pending::OpenBrace => {
                return Err(ScanError::ExpectingCloseBrace { line: self.line });
            }
            Pending::CloseBrace => {
                return Err(ScanError::SingleCloseBrace { line: self.line });
            }
            Pending::None => {}
        }
        self.flush_text();
        Ok(ScanOutput {
            segments: self.segments,
            warnings: self.warnings,
        })
    }

    fn flush_text(&mut self) {
        if !self.buf.is_empty() {
            self.segments.push(Segment::Text(std::mem::take(&mut self.buf)));
        }
    }
}

/// Split a format-string literal intae literal an expression segments.
///
/// `line` is whaur the literal sits in the enclosing source, fer error
/// an warning positions; it advances across raw newlines in the literal.
pub fn scan(raw: &str, line: usize) -> Result<ScanOutput, ScanError> {
    let mut scanner = Scanner::new(line);
    for c in raw.chars() {
        scanner.step(c)?;
    }
    scanner.finish()
}
