use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::fmt;

use lazy_static::lazy_static;
use num_traits::ToPrimitive;

use crate::errors::*;

/// Expression calculation result: either value or error
pub type CalcResult = Result<f64, CalcError>;
pub(crate) type CalcErrorResult = Result<(), CalcError>;

// pub const PHI: f64 = 1.61803398874989484820458683436563811772030917980576286213544862;
pub const PHI: f64 = 1.618_033_988_749_895;

pub const PRI_ADD: u8 = 0;
pub const PRI_MUL: u8 = 1;
pub const PRI_FUNC: u8 = 2;
pub const PRI_UNARY: u8 = 3;

/// Where a descriptor stands relative to its operands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// `e`, `pi`, `phi` - no operands
    Constant,
    /// named functions, `log_`, and unary minus
    Prefix,
    /// `+`, `-`, `*`, `/`, `%`, `^`
    Infix,
    /// factorial
    Postfix,
}

#[derive(Clone, Copy)]
pub enum Action {
    Const(f64),
    Unary(fn(f64) -> CalcResult),
    Binary(fn(f64, f64) -> CalcResult),
}

/// Operator or function descriptor. All descriptors are static and shared by reference
pub struct Func {
    pub name: &'static str,
    pub kind: Kind,
    pub priority: u8,
    pub action: Action,
}

impl Func {
    pub fn arity(&self) -> usize {
        match self.action {
            Action::Const(..) => 0,
            Action::Unary(..) => 1,
            Action::Binary(..) => 2,
        }
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Func) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Func({}/{})", self.name, self.arity())
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Formats a float number for output: the shortest representation that
/// parses back to the same value
pub fn format_f64(g: f64) -> String {
    let mut buf = dtoa::Buffer::new();
    buf.format(g).to_string()
}

// ------------ arithmetic -----------------

pub fn add(a: f64, b: f64) -> CalcResult {
    Ok(a + b)
}

pub fn subtract(a: f64, b: f64) -> CalcResult {
    Ok(a - b)
}

pub fn multiply(a: f64, b: f64) -> CalcResult {
    Ok(a * b)
}

pub fn divide(a: f64, b: f64) -> CalcResult {
    if b == 0.0 {
        return Err(CalcError::DividedByZero("/".to_owned(), a));
    }
    Ok(a / b)
}

/// Floating point remainder, the sign follows the dividend: `-7 % 3 = -1`
pub fn modulo(a: f64, b: f64) -> CalcResult {
    if b == 0.0 {
        return Err(CalcError::DividedByZero("%".to_owned(), a));
    }
    Ok(a % b)
}

pub fn power(base: f64, exp: f64) -> CalcResult {
    if exp == 0.0 || base == 1.0 {
        return Ok(1.0);
    }
    if base < 0.0 && exp.fract() != 0.0 {
        return Err(CalcError::InvalidPower(base, exp));
    }
    Ok(base.powf(exp))
}

pub fn negate(a: f64) -> CalcResult {
    Ok(-a)
}

/// Factorial of a non-negative integer. The product is accumulated in f64,
/// so the first overflowing argument is 171
pub fn factorial(a: f64) -> CalcResult {
    if a < 0.0 {
        return Err(CalcError::NotForNegative("!".to_owned(), a));
    }
    if a.fract() != 0.0 {
        return Err(CalcError::OnlyInt("!".to_owned(), a));
    }
    let mut n = match a.to_u64() {
        Some(n) => n,
        None => return Err(CalcError::Overflow("!".to_owned(), a)),
    };

    let mut res = 1.0f64;
    while n > 1 {
        res *= n as f64;
        if res == f64::INFINITY {
            return Err(CalcError::Overflow("!".to_owned(), a));
        }
        n -= 1;
    }
    Ok(res)
}

// ------------ functions with domain checks -----------------

pub fn tan(a: f64) -> CalcResult {
    if a.cos() == 0.0 {
        return Err(CalcError::ArgumentOutOfRange("tan".to_owned(), a, "cos(x) != 0"));
    }
    Ok(a.tan())
}

pub fn sec(a: f64) -> CalcResult {
    let c = a.cos();
    if c == 0.0 {
        return Err(CalcError::ArgumentOutOfRange("sec".to_owned(), a, "cos(x) != 0"));
    }
    Ok(1.0 / c)
}

pub fn csc(a: f64) -> CalcResult {
    let s = a.sin();
    if s == 0.0 {
        return Err(CalcError::ArgumentOutOfRange("csc".to_owned(), a, "sin(x) != 0"));
    }
    Ok(1.0 / s)
}

pub fn cot(a: f64) -> CalcResult {
    let s = a.sin();
    if s == 0.0 {
        return Err(CalcError::ArgumentOutOfRange("cot".to_owned(), a, "sin(x) != 0"));
    }
    Ok(a.cos() / s)
}

pub fn asin(a: f64) -> CalcResult {
    if !(-1.0..=1.0).contains(&a) {
        return Err(CalcError::ArgumentOutOfRange("asin".to_owned(), a, "-1 <= x <= 1"));
    }
    Ok(a.asin())
}

pub fn acos(a: f64) -> CalcResult {
    if !(-1.0..=1.0).contains(&a) {
        return Err(CalcError::ArgumentOutOfRange("acos".to_owned(), a, "-1 <= x <= 1"));
    }
    Ok(a.acos())
}

pub fn acosh(a: f64) -> CalcResult {
    if a < 1.0 {
        return Err(CalcError::ArgumentOutOfRange("acosh".to_owned(), a, "x >= 1"));
    }
    Ok(a.acosh())
}

pub fn atanh(a: f64) -> CalcResult {
    if a <= -1.0 || a >= 1.0 {
        return Err(CalcError::ArgumentOutOfRange("atanh".to_owned(), a, "-1 < x < 1"));
    }
    Ok(a.atanh())
}

pub fn ln(a: f64) -> CalcResult {
    if a <= 0.0 {
        return Err(CalcError::ArgumentOutOfRange("ln".to_owned(), a, "x > 0"));
    }
    Ok(a.ln())
}

pub fn log2(a: f64) -> CalcResult {
    if a <= 0.0 {
        return Err(CalcError::ArgumentOutOfRange("log2".to_owned(), a, "x > 0"));
    }
    Ok(a.log2())
}

pub fn log10(a: f64) -> CalcResult {
    if a <= 0.0 {
        return Err(CalcError::ArgumentOutOfRange("log".to_owned(), a, "x > 0"));
    }
    Ok(a.log10())
}

/// Zero is rejected as well as negative numbers
pub fn sqrt(a: f64) -> CalcResult {
    if a <= 0.0 {
        return Err(CalcError::ArgumentOutOfRange("sqrt".to_owned(), a, "x > 0"));
    }
    Ok(a.sqrt())
}

/// `log_base(value)`
pub fn logarithm(base: f64, value: f64) -> CalcResult {
    if value <= 0.0 || base <= 0.0 || base == 1.0 {
        return Err(CalcError::InvalidLogarithm(base, value));
    }
    Ok(value.log2() / base.log2())
}

macro_rules! plain_func {
    ($id:ident) => {
        fn $id(a: f64) -> CalcResult {
            Ok(a.$id())
        }
    };
}

plain_func!(sin);
plain_func!(cos);
plain_func!(atan);
plain_func!(sinh);
plain_func!(cosh);
plain_func!(tanh);
plain_func!(asinh);
plain_func!(exp);
plain_func!(cbrt);
plain_func!(abs);
plain_func!(ceil);
plain_func!(floor);
plain_func!(round);

// ------------ registry -----------------

macro_rules! func {
    ($name:expr, $kind:ident, $pri:expr, $action:expr) => {
        Func {
            name: $name,
            kind: Kind::$kind,
            priority: $pri,
            action: $action,
        }
    };
}

macro_rules! prefix {
    ($name:expr, $id:ident) => {
        func!($name, Prefix, PRI_FUNC, Action::Unary($id))
    };
}

pub static ADD: Func = func!("+", Infix, PRI_ADD, Action::Binary(add));
pub static SUBTRACT: Func = func!("-", Infix, PRI_ADD, Action::Binary(subtract));
pub static MULTIPLY: Func = func!("*", Infix, PRI_MUL, Action::Binary(multiply));
pub static DIVIDE: Func = func!("/", Infix, PRI_MUL, Action::Binary(divide));
pub static MODULO: Func = func!("%", Infix, PRI_MUL, Action::Binary(modulo));
pub static POWER: Func = func!("^", Infix, PRI_FUNC, Action::Binary(power));
pub static FACTORIAL: Func = func!("!", Postfix, PRI_UNARY, Action::Unary(factorial));
pub static NEGATE: Func = func!("neg", Prefix, PRI_UNARY, Action::Unary(negate));

static OPERATORS: [&Func; 8] = [&ADD, &SUBTRACT, &MULTIPLY, &DIVIDE, &MODULO, &POWER, &FACTORIAL, &NEGATE];

static FUNCTIONS: [Func; 27] = [
    prefix!("sin", sin),
    prefix!("cos", cos),
    prefix!("tan", tan),
    prefix!("sec", sec),
    prefix!("csc", csc),
    prefix!("cosec", csc),
    prefix!("cot", cot),
    prefix!("asin", asin),
    prefix!("acos", acos),
    prefix!("atan", atan),
    prefix!("sinh", sinh),
    prefix!("cosh", cosh),
    prefix!("tanh", tanh),
    prefix!("asinh", asinh),
    prefix!("acosh", acosh),
    prefix!("atanh", atanh),
    prefix!("sqrt", sqrt),
    prefix!("cbrt", cbrt),
    prefix!("exp", exp),
    prefix!("ln", ln),
    prefix!("log2", log2),
    prefix!("log", log10),
    prefix!("abs", abs),
    prefix!("ceil", ceil),
    prefix!("floor", floor),
    prefix!("round", round),
    // log_B(X): the base is the first operand and follows the name immediately
    func!("log_", Prefix, PRI_FUNC, Action::Binary(logarithm)),
];

static CONSTANTS: [Func; 3] = [
    func!("e", Constant, PRI_UNARY, Action::Const(E)),
    func!("pi", Constant, PRI_UNARY, Action::Const(PI)),
    func!("phi", Constant, PRI_UNARY, Action::Const(PHI)),
];

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, &'static Func> = {
        let mut m = HashMap::new();
        for f in OPERATORS.iter().copied().chain(FUNCTIONS.iter()).chain(CONSTANTS.iter()) {
            m.insert(f.name, f);
        }
        m
    };
}

/// Returns a descriptor of an operator, function, or constant by its name
pub fn lookup(name: &str) -> Option<&'static Func> {
    REGISTRY.get(name).copied()
}

/// Names of all functions that can be written in an expression
pub fn function_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|f| f.name)
}
