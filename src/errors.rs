use std::fmt;

/// Error category. Lets a caller tell user input mistakes apart from
/// a failure to record the result (`Allocation`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Domain,
    Overflow,
    Eval,
    Allocation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "LexError"),
            ErrorKind::Parse => write!(f, "ParseError"),
            ErrorKind::Domain => write!(f, "DomainError"),
            ErrorKind::Overflow => write!(f, "OverflowError"),
            ErrorKind::Eval => write!(f, "EvalError"),
            ErrorKind::Allocation => write!(f, "AllocationError"),
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum CalcError {
    UnrecognizedChar(char, usize),
    UnrecognizedToken(String, usize),
    FunctionNoBracket(String, usize),
    InvalidNumber(usize, &'static str),
    NumberOutOfRange(String),
    OpenBracketMismatch(usize),
    ClosingBracketMismatch(usize),

    EmptyExpression,
    UnmatchedBracket,

    DividedByZero(String, f64),
    ArgumentOutOfRange(String, f64, &'static str),
    InvalidPower(f64, f64),
    InvalidLogarithm(f64, f64),
    NotForNegative(String, f64),
    OnlyInt(String, f64),

    Overflow(String, f64),

    ExcessOperator(String),
    MissingSecondArgument(String),
    NoValue,
    TooManyValues(usize),

    HistoryFull(usize),
    AllocFailed,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::UnrecognizedChar(..)
            | CalcError::UnrecognizedToken(..)
            | CalcError::FunctionNoBracket(..)
            | CalcError::InvalidNumber(..)
            | CalcError::NumberOutOfRange(..)
            | CalcError::OpenBracketMismatch(..)
            | CalcError::ClosingBracketMismatch(..) => ErrorKind::Lex,

            CalcError::EmptyExpression | CalcError::UnmatchedBracket => ErrorKind::Parse,

            CalcError::DividedByZero(..)
            | CalcError::ArgumentOutOfRange(..)
            | CalcError::InvalidPower(..)
            | CalcError::InvalidLogarithm(..)
            | CalcError::NotForNegative(..)
            | CalcError::OnlyInt(..) => ErrorKind::Domain,

            CalcError::Overflow(..) => ErrorKind::Overflow,

            CalcError::ExcessOperator(..)
            | CalcError::MissingSecondArgument(..)
            | CalcError::NoValue
            | CalcError::TooManyValues(..) => ErrorKind::Eval,

            CalcError::HistoryFull(..) | CalcError::AllocFailed => ErrorKind::Allocation,
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::UnrecognizedChar(c, i) => write!(f, "Unrecognized character '{}' at index {}", c, i),
            CalcError::UnrecognizedToken(s, i) => write!(f, "Unrecognized token '{}' at index {}", s, i),
            CalcError::FunctionNoBracket(s, i) => {
                write!(f, "Missing parenthesis after '{}' at index {}", s, i)
            }
            CalcError::InvalidNumber(i, why) => write!(f, "Failed to parse number at index {} ({})", i, why),
            CalcError::NumberOutOfRange(s) => write!(f, "Number '{}' is out of range", s),
            CalcError::OpenBracketMismatch(n) => write!(f, "Found {} unmatched left bracket(s)", n),
            CalcError::ClosingBracketMismatch(n) => write!(f, "Found {} unmatched right bracket(s)", n),

            CalcError::EmptyExpression => write!(f, "Found 0 tokens to parse"),
            CalcError::UnmatchedBracket => write!(f, "Failed to find parenthesis pair"),

            CalcError::DividedByZero(op, v) => write!(f, "'{}' divided by zero (found '{}')", v, op),
            CalcError::ArgumentOutOfRange(func, v, range) => {
                write!(f, "Argument {} of {} out of range ({})", v, func, range)
            }
            CalcError::InvalidPower(b, e) => {
                write!(f, "Negative base {} with non-integer exponent {}", b, e)
            }
            CalcError::InvalidLogarithm(b, v) => {
                write!(f, "log_{}({}) is not defined (base > 0, base != 1, value > 0)", b, v)
            }
            CalcError::NotForNegative(func, v) => write!(f, "Function '{}' is not defined for negative {}", func, v),
            CalcError::OnlyInt(func, v) => write!(f, "Function '{}' supports only integers (found {})", func, v),

            CalcError::Overflow(func, v) => write!(f, "Result of '{}' for {} overflowed", func, v),

            CalcError::ExcessOperator(op) => write!(f, "Found excess operator '{}'", op),
            CalcError::MissingSecondArgument(op) => write!(f, "Failed to find second argument for '{}'", op),
            CalcError::NoValue => write!(f, "Nothing to calculate"),
            CalcError::TooManyValues(n) => write!(f, "Too many numbers ({} values left without operator)", n),

            CalcError::HistoryFull(n) => write!(f, "Failed to record the result: history is full ({} entries)", n),
            CalcError::AllocFailed => write!(f, "Failed to record the result: out of memory"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self)
    }
}

impl std::error::Error for CalcError {}
