use log::trace;

use crate::errors::*;
use crate::func::{Action, CalcErrorResult, CalcResult, Func};
use crate::parse::Token;

/// Results closer to zero than this are replaced with exact zero
pub const ZERO_EPSILON: f64 = 1e-13;

#[derive(Clone, Copy, Debug)]
enum Entry {
    OpenB,
    Op(Token, u8),
}

/// Shunting-yard: reorders infix tokens into postfix order
pub(crate) struct Converter {
    queue: Vec<Entry>,
    output: Vec<Token>,
}

impl Converter {
    pub(crate) fn new() -> Self {
        Converter {
            queue: Vec::new(),
            output: Vec::new(),
        }
    }

    // move operators from the queue to output while the top operator in the
    // queue has equal or greater priority
    fn pop_while_priority(&mut self, priority: u8) {
        while let Some(Entry::Op(token, pri)) = self.queue.last().copied() {
            if pri < priority {
                return;
            }
            self.output.push(token);
            self.queue.pop();
        }
    }

    // move operators from the queue to output until the first bracket.
    // The bracket is dropped
    fn pop_until_bracket(&mut self) -> CalcErrorResult {
        loop {
            match self.queue.pop() {
                None => return Err(CalcError::UnmatchedBracket),
                Some(Entry::OpenB) => return Ok(()),
                Some(Entry::Op(token, _)) => self.output.push(token),
            }
        }
    }

    // move all operators from queue to output.
    // Must be called only after the expression ends
    fn pop_all(&mut self) -> CalcErrorResult {
        while let Some(e) = self.queue.pop() {
            match e {
                Entry::OpenB => return Err(CalcError::UnmatchedBracket),
                Entry::Op(token, _) => self.output.push(token),
            }
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, token: Token) -> CalcErrorResult {
        match token {
            Token::Number(..) | Token::Constant(..) => self.output.push(token),
            Token::OpenB => self.queue.push(Entry::OpenB),
            Token::CloseB => self.pop_until_bracket()?,
            Token::Operator(f) | Token::Function(f) => {
                self.pop_while_priority(f.priority);
                self.queue.push(Entry::Op(token, f.priority));
            }
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<Vec<Token>, CalcError> {
        self.pop_all()?;
        Ok(self.output)
    }
}

/// Converts a token sequence into postfix order. Operators of equal priority
/// are left-associative: `2^3^2` is `(2^3)^2`
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, CalcError> {
    let mut conv = Converter::new();
    for token in tokens {
        conv.push(*token)?;
    }
    conv.finish()
}

fn normalize(v: f64) -> f64 {
    if v.abs() < ZERO_EPSILON {
        0.0
    } else {
        v
    }
}

/// Calculates a postfix sequence
pub(crate) struct Evaluator {
    values: Vec<f64>,
}

impl Evaluator {
    pub(crate) fn new() -> Self {
        Evaluator { values: Vec::new() }
    }

    fn unary(&mut self, f: &Func, op: fn(f64) -> CalcResult) -> CalcErrorResult {
        let v = match self.values.pop() {
            Some(v) => v,
            None => return Err(CalcError::ExcessOperator(f.name.to_string())),
        };
        let res = normalize(op(v)?);
        trace!("{}({}) = {}", f.name, v, res);
        self.values.push(res);
        Ok(())
    }

    fn binary(&mut self, f: &Func, op: fn(f64, f64) -> CalcResult) -> CalcErrorResult {
        let v2 = match self.values.pop() {
            Some(v) => v,
            None => return Err(CalcError::ExcessOperator(f.name.to_string())),
        };
        let v1 = match self.values.pop() {
            Some(v) => v,
            None => return Err(CalcError::MissingSecondArgument(f.name.to_string())),
        };
        let res = normalize(op(v1, v2)?);
        trace!("{} {} {} = {}", v1, f.name, v2, res);
        self.values.push(res);
        Ok(())
    }

    pub(crate) fn push(&mut self, token: Token) -> CalcErrorResult {
        match token {
            Token::Number(v) => self.values.push(v),
            Token::Operator(f) | Token::Function(f) | Token::Constant(f) => match f.action {
                Action::Const(v) => self.values.push(v),
                Action::Unary(op) => self.unary(f, op)?,
                Action::Binary(op) => self.binary(f, op)?,
            },
            Token::OpenB | Token::CloseB => return Err(CalcError::UnmatchedBracket),
        }
        Ok(())
    }

    pub(crate) fn result(mut self) -> CalcResult {
        if self.values.len() > 1 {
            return Err(CalcError::TooManyValues(self.values.len()));
        }
        match self.values.pop() {
            Some(v) => Ok(normalize(v)),
            None => Err(CalcError::NoValue),
        }
    }
}

/// Calculates a postfix sequence produced by `to_postfix`
pub fn evaluate(postfix: &[Token]) -> CalcResult {
    let mut ev = Evaluator::new();
    for token in postfix {
        ev.push(*token)?;
    }
    ev.result()
}
