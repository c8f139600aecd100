//! A wee host interpreter fer exercising the operators end tae end.
//!
//! Numbers, strings, sets an the usual sums - just enough language tae
//! stand in fer a real host. It keeps the hoose tokenizer quirk o' a
//! spurious line terminator on the front o' every token stream, counts
//! one cost tick per evaluated node, an records the diagnostics an
//! recursion depths it's handed so tests can check them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use logos::Logos;
use steek::{Execution, Host, HostValue, Span, Step, TokenStream};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeeError {
    #[error("dinnae ken whit '{0}' is")]
    UnkentToken(String),

    #[error("wisnae expectin' {0}")]
    UnexpectedToken(String),

    #[error("ran oot o' tokens early")]
    UnexpectedEnd,

    #[error("cannae divide by zero")]
    DivisionByZero,

    #[error("cannae dae '{op}' on a {left} an a {right}")]
    TypeMismatch {
        op: char,
        left: String,
        right: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeeValue {
    Number(f64),
    Str(String),
    Set(Vec<WeeValue>),
}

impl HostValue for WeeValue {
    fn number(n: f64) -> Self {
        WeeValue::Number(n)
    }

    fn string(s: String) -> Self {
        WeeValue::Str(s)
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            WeeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn as_string(&self) -> Option<&str> {
        match self {
            WeeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn type_name(&self) -> &str {
        match self {
            WeeValue::Number(_) => "number",
            WeeValue::Str(_) => "string",
            WeeValue::Set(_) => "set",
        }
    }

    fn nice_string(&self) -> String {
        match self {
            WeeValue::Number(n) => n.to_string(),
            WeeValue::Str(s) => s.clone(),
            WeeValue::Set(items) => {
                let rendered: Vec<String> = items.iter().map(WeeValue::nice_string).collect();
                format!("{{{}}}", rendered.join(", "))
            }
        }
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
pub enum WeeToken {
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Single quotes, so string literals fit inside f-string expressions.
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        Some(s[1..s.len() - 1].to_string())
    })]
    Str(String),

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token(",")]
    Comma,

    #[token("\n")]
    Newline,
}

pub struct WeeTokens(VecDeque<WeeToken>);

impl TokenStream for WeeTokens {
    fn discard_line_terminator(&mut self) {
        if self.0.front() == Some(&WeeToken::Newline) {
            self.0.pop_front();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeeExpr {
    Number(f64),
    Str(String),
    Negate(Box<WeeExpr>),
    Binary {
        op: char,
        left: Box<WeeExpr>,
        right: Box<WeeExpr>,
    },
    Grouping(Box<WeeExpr>),
    Set(Vec<WeeExpr>),
}

struct WeeParser {
    tokens: VecDeque<WeeToken>,
}

impl WeeParser {
    fn expression(&mut self) -> Result<WeeExpr, WeeError> {
        let mut expr = self.term()?;
        loop {
            let op = match self.tokens.front() {
                Some(WeeToken::Plus) => '+',
                Some(WeeToken::Minus) => '-',
                _ => break,
            };
            self.tokens.pop_front();
            let right = self.term()?;
            expr = WeeExpr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<WeeExpr, WeeError> {
        let mut expr = self.factor()?;
        loop {
            let op = match self.tokens.front() {
                Some(WeeToken::Star) => '*',
                Some(WeeToken::Slash) => '/',
                _ => break,
            };
            self.tokens.pop_front();
            let right = self.factor()?;
            expr = WeeExpr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<WeeExpr, WeeError> {
        match self.tokens.pop_front() {
            Some(WeeToken::Number(n)) => Ok(WeeExpr::Number(n)),
            Some(WeeToken::Str(s)) => Ok(WeeExpr::Str(s)),
            Some(WeeToken::Minus) => Ok(WeeExpr::Negate(Box::new(self.factor()?))),
            Some(WeeToken::LeftParen) => {
                let inner = self.expression()?;
                self.expect(WeeToken::RightParen)?;
                Ok(WeeExpr::Grouping(Box::new(inner)))
            }
            Some(WeeToken::LeftBrace) => {
                let mut items = vec![self.expression()?];
                while self.tokens.front() == Some(&WeeToken::Comma) {
                    self.tokens.pop_front();
                    items.push(self.expression()?);
                }
                self.expect(WeeToken::RightBrace)?;
                Ok(WeeExpr::Set(items))
            }
            Some(other) => Err(WeeError::UnexpectedToken(format!("{:?}", other))),
            None => Err(WeeError::UnexpectedEnd),
        }
    }

    fn expect(&mut self, wanted: WeeToken) -> Result<(), WeeError> {
        match self.tokens.pop_front() {
            Some(token) if token == wanted => Ok(()),
            Some(other) => Err(WeeError::UnexpectedToken(format!("{:?}", other))),
            None => Err(WeeError::UnexpectedEnd),
        }
    }
}

/// Evaluate a node tree, counting one unit o' work per node.
fn eval(expr: &WeeExpr) -> Result<(WeeValue, usize), WeeError> {
    match expr {
        WeeExpr::Number(n) => Ok((WeeValue::Number(*n), 1)),
        WeeExpr::Str(s) => Ok((WeeValue::Str(s.clone()), 1)),
        WeeExpr::Negate(inner) => {
            let (value, ops) = eval(inner)?;
            match value.as_number() {
                Some(n) => Ok((WeeValue::Number(-n), ops + 1)),
                None => Err(WeeError::TypeMismatch {
                    op: '-',
                    left: value.type_name().to_string(),
                    right: "naething".to_string(),
                }),
            }
        }
        WeeExpr::Binary { op, left, right } => {
            let (left, left_ops) = eval(left)?;
            let (right, right_ops) = eval(right)?;
            let value = apply_binary(*op, &left, &right)?;
            Ok((value, left_ops + right_ops + 1))
        }
        WeeExpr::Grouping(inner) => {
            let (value, ops) = eval(inner)?;
            Ok((value, ops + 1))
        }
        WeeExpr::Set(items) => {
            let mut values = Vec::new();
            let mut total = 1;
            for item in items {
                let (value, ops) = eval(item)?;
                values.push(value);
                total += ops;
            }
            Ok((WeeValue::Set(values), total))
        }
    }
}

fn apply_binary(op: char, left: &WeeValue, right: &WeeValue) -> Result<WeeValue, WeeError> {
    match (left, right) {
        (WeeValue::Number(a), WeeValue::Number(b)) => match op {
            '+' => Ok(WeeValue::Number(a + b)),
            '-' => Ok(WeeValue::Number(a - b)),
            '*' => Ok(WeeValue::Number(a * b)),
            '/' => {
                if *b == 0.0 {
                    Err(WeeError::DivisionByZero)
                } else {
                    Ok(WeeValue::Number(a / b))
                }
            }
            _ => unreachable!("parser only builds + - * /"),
        },
        (WeeValue::Str(a), WeeValue::Str(b)) if op == '+' => {
            Ok(WeeValue::Str(format!("{}{}", a, b)))
        }
        _ => Err(WeeError::TypeMismatch {
            op,
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

/// An evaluation that doles its work oot ae tick at a time.
pub struct WeeExecution {
    ticks_left: usize,
    outcome: Option<Result<WeeValue, WeeError>>,
}

impl Execution for WeeExecution {
    type Value = WeeValue;
    type Error = WeeError;

    fn step(&mut self) -> Result<Step<WeeValue>, WeeError> {
        if self.ticks_left > 0 {
            self.ticks_left -= 1;
            return Ok(Step::Tick(1.0));
        }
        match self.outcome.take() {
            Some(Ok(value)) => Ok(Step::Done(value)),
            Some(Err(err)) => Err(err),
            None => panic!("wee execution stepped after completion"),
        }
    }
}

#[derive(Default)]
pub struct WeeHost {
    /// Diagnostics handed tae the warn sink, in order.
    pub warnings: RefCell<Vec<String>>,
    /// Recursion depths passed tae execute, in order.
    pub depths: RefCell<Vec<usize>>,
}

impl WeeHost {
    pub fn new() -> Self {
        WeeHost::default()
    }
}

impl Host for WeeHost {
    type Error = WeeError;
    type Value = WeeValue;
    type Tokens = WeeTokens;
    type Node = WeeExpr;
    type Execution = WeeExecution;

    fn tokenize(&self, source: &str) -> Result<WeeTokens, WeeError> {
        let mut tokens = VecDeque::new();
        // The hoose quirk: every stream starts wi' a line terminator.
        tokens.push_back(WeeToken::Newline);
        let mut lexer = WeeToken::lexer(source);
        while let Some(result) = lexer.next() {
            match result {
                Ok(token) => tokens.push_back(token),
                Err(_) => return Err(WeeError::UnkentToken(lexer.slice().to_string())),
            }
        }
        Ok(WeeTokens(tokens))
    }

    fn parse_grouping(&self, tokens: WeeTokens, _at: Span) -> Result<WeeExpr, WeeError> {
        let mut parser = WeeParser { tokens: tokens.0 };
        let expr = parser.expression()?;
        match parser.tokens.pop_front() {
            None => Ok(expr),
            Some(extra) => Err(WeeError::UnexpectedToken(format!("{:?}", extra))),
        }
    }

    fn execute(&self, node: WeeExpr, depth: usize) -> Result<WeeExecution, WeeError> {
        self.depths.borrow_mut().push(depth);
        Ok(match eval(&node) {
            Ok((value, ops)) => WeeExecution {
                ticks_left: ops,
                outcome: Some(Ok(value)),
            },
            Err(err) => WeeExecution {
                ticks_left: 0,
                outcome: Some(Err(err)),
            },
        })
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
