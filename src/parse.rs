use std::fmt;

use crate::errors::*;
use crate::func::{lookup, Func, Kind, FACTORIAL, NEGATE, SUBTRACT};
use crate::func::{ADD, DIVIDE, MODULO, MULTIPLY, POWER};

/// Lexical token of an infix expression
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    /// single character operators and unary minus
    Operator(&'static Func),
    /// named functions, including `log_`
    Function(&'static Func),
    Constant(&'static Func),
    OpenB,
    CloseB,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Operator(func) | Token::Function(func) | Token::Constant(func) => write!(f, "{}", func),
            Token::OpenB => write!(f, "("),
            Token::CloseB => write!(f, ")"),
        }
    }
}

/// Joins tokens with spaces, e.g. `2 3 4 * +`
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect::<Vec<String>>().join(" ")
}

fn is_digit_at(chars: &[char], pos: usize) -> bool {
    pos < chars.len() && chars[pos].is_ascii_digit()
}

fn skip_digits(chars: &[char], mut pos: usize) -> usize {
    while is_digit_at(chars, pos) {
        pos += 1;
    }
    pos
}

// Scans a number starting at `start` and returns the index right after it.
// Accepted forms: `12`, `.5`, `1.25`, `1e3`, `2.5e-3`
fn lex_number(chars: &[char], start: usize) -> Result<usize, CalcError> {
    let mut pos = skip_digits(chars, start);

    if pos < chars.len() && chars[pos] == '.' {
        pos += 1;
        if !is_digit_at(chars, pos) {
            return Err(CalcError::InvalidNumber(start, "floating point without following digits"));
        }
        pos = skip_digits(chars, pos);
        if pos < chars.len() && chars[pos] == '.' {
            return Err(CalcError::InvalidNumber(start, "extra floating point"));
        }
    }

    if pos < chars.len() && chars[pos] == 'e' {
        pos += 1;
        if pos < chars.len() && (chars[pos] == '+' || chars[pos] == '-') {
            pos += 1;
            if !is_digit_at(chars, pos) {
                return Err(CalcError::InvalidNumber(start, "exponent sign without following digits"));
            }
        } else if !is_digit_at(chars, pos) {
            return Err(CalcError::InvalidNumber(start, "exponent without following digits"));
        }
        pos = skip_digits(chars, pos);
    }

    Ok(pos)
}

fn parse_number(chars: &[char], start: usize, end: usize) -> Result<f64, CalcError> {
    let s: String = chars[start..end].iter().collect();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(..) => Err(CalcError::NumberOutOfRange(s)),
        Err(..) => Err(CalcError::InvalidNumber(start, "not a number")),
    }
}

// Scans a lowercase name and returns it with the index right after it.
// `log_` and `log2` are the only names that contain a non-letter
fn lex_name(chars: &[char], start: usize) -> (String, usize) {
    let mut pos = start;
    while pos < chars.len() && chars[pos].is_ascii_lowercase() {
        pos += 1;
    }
    let mut name: String = chars[start..pos].iter().collect();
    if name == "log" && pos < chars.len() && (chars[pos] == '_' || chars[pos] == '2') {
        name.push(chars[pos]);
        pos += 1;
    }
    (name, pos)
}

/// Splits an expression into tokens.
///
/// A `-` is a unary minus at the beginning of the expression, after an
/// operator (`!` included), after an opening bracket, or after a function
/// name. Otherwise it is a subtraction.
///
/// After the scan the number of opening and closing brackets must be equal.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut negative_sign = true;
    let mut open_cnt = 0usize;
    let mut close_cnt = 0usize;

    let mut idx = 0;
    while idx < chars.len() {
        let c = chars[idx];
        match c {
            _ if c.is_whitespace() => {
                idx += 1;
            }
            '-' => {
                if negative_sign {
                    tokens.push(Token::Operator(&NEGATE));
                } else {
                    tokens.push(Token::Operator(&SUBTRACT));
                }
                negative_sign = true;
                idx += 1;
            }
            '0'..='9' | '.' => {
                let end = lex_number(&chars, idx)?;
                tokens.push(Token::Number(parse_number(&chars, idx, end)?));
                negative_sign = false;
                idx = end;
            }
            'a'..='z' => {
                let (name, end) = lex_name(&chars, idx);
                let func = match lookup(&name) {
                    Some(f) => f,
                    None => return Err(CalcError::UnrecognizedToken(name, idx)),
                };
                match func.kind {
                    Kind::Constant => {
                        tokens.push(Token::Constant(func));
                        negative_sign = false;
                    }
                    Kind::Prefix if func.arity() == 2 => {
                        // log_: its first argument follows the name
                        tokens.push(Token::Function(func));
                        negative_sign = true;
                    }
                    _ => {
                        let mut next = end;
                        while next < chars.len() && chars[next].is_whitespace() {
                            next += 1;
                        }
                        if next >= chars.len() || chars[next] != '(' {
                            return Err(CalcError::FunctionNoBracket(name, next));
                        }
                        tokens.push(Token::Function(func));
                        negative_sign = true;
                    }
                }
                idx = end;
            }
            '+' | '*' | '/' | '%' | '^' | '!' => {
                let func = match c {
                    '+' => &ADD,
                    '*' => &MULTIPLY,
                    '/' => &DIVIDE,
                    '%' => &MODULO,
                    '!' => &FACTORIAL,
                    _ => &POWER,
                };
                tokens.push(Token::Operator(func));
                negative_sign = true;
                idx += 1;
            }
            '(' => {
                tokens.push(Token::OpenB);
                open_cnt += 1;
                negative_sign = true;
                idx += 1;
            }
            ')' => {
                tokens.push(Token::CloseB);
                close_cnt += 1;
                negative_sign = false;
                idx += 1;
            }
            _ => return Err(CalcError::UnrecognizedChar(c, idx)),
        }
    }

    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    if open_cnt > close_cnt {
        return Err(CalcError::OpenBracketMismatch(open_cnt - close_cnt));
    }
    if close_cnt > open_cnt {
        return Err(CalcError::ClosingBracketMismatch(close_cnt - open_cnt));
    }

    Ok(tokens)
}
