use thiserror::Error;

/// Errors fae scanning a format string intae segments.
///
/// Every one o' these is fatal tae the scan - nae partial segment list
/// ever comes back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("There's naething inside yer braces at line {line} - {{}} needs an expression in it")]
    EmptyExpression { line: usize },

    #[error("Yer format string isnae finished at line {line} - expectin' a closing '}}'")]
    ExpectingCloseBrace { line: usize },

    #[error("Yon '}}' at line {line} has nae matching '{{' - write '}}}}' if ye want a literal brace")]
    SingleCloseBrace { line: usize },

    #[error("Haud on! Backslashes arenae allowed inside {{...}} at line {line}")]
    BackslashInExpression { line: usize },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::EmptyExpression { line }
            | ScanError::ExpectingCloseBrace { line }
            | ScanError::SingleCloseBrace { line }
            | ScanError::BackslashInExpression { line } => *line,
        }
    }
}

/// Errors fae the extra unary operators.
///
/// Anything the host's ain tokenizer, parser or executor raises while an
/// embedded expression is running passes through the `Host` variant
/// untouched - same message, same source, nae re-wrapping.
#[derive(Error, Debug)]
pub enum SteekError<E> {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Ye cannae use unary '{op}' on {operand} at line {line} - that's no' gonnae work")]
    BadUnaryOperator {
        op: String,
        operand: String,
        line: usize,
    },

    #[error("{feature} arenae implemented yet")]
    Unimplemented { feature: String },

    #[error("Jings! Something went awfy wrang: {0}")]
    Internal(String),

    #[error(transparent)]
    Host(E),
}

impl<E> SteekError<E> {
    /// The source line the error points at, gin it kens one.
    pub fn line(&self) -> Option<usize> {
        match self {
            SteekError::Scan(scan) => Some(scan.line()),
            SteekError::BadUnaryOperator { line, .. } => Some(*line),
            SteekError::Unimplemented { .. } | SteekError::Internal(_) | SteekError::Host(_) => {
                None
            }
        }
    }
}

pub type SteekResult<T, E> = Result<T, SteekError<E>>;
