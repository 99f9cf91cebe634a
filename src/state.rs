use log::debug;

use crate::config::CalcConfig;
use crate::func::CalcResult;
use crate::history::History;
use crate::parse::{tokenize, tokens_to_string};
use crate::stack::{evaluate, to_postfix};

/// holds the current state of the engine: the log of all successful calculations
#[derive(Clone, Debug, Default)]
pub struct CalcState {
    history: History,
}

impl CalcState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: &CalcConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        CalcState { history }
    }

    /// Returns the result of the last successful evaluation that has not been undone
    pub fn result(&self) -> Option<f64> {
        self.history.last().map(|e| e.result)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Forgets the last calculation. Returns `false` if there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.remove_last() {
            Some(e) => {
                debug!("undo: {}", e);
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// evaluates a given expression without recording it
pub fn calculate(expr: &str) -> CalcResult {
    let tokens = tokenize(expr)?;
    debug!("tokens: {}", tokens_to_string(&tokens));
    let postfix = to_postfix(&tokens)?;
    debug!("postfix: {}", tokens_to_string(&postfix));
    evaluate(&postfix)
}

/// evaluates a given expression and returns either result or error.
/// A successful result is appended to the state history
pub fn eval(expr: &str, state: &mut CalcState) -> CalcResult {
    let v = calculate(expr)?;
    state.history.append(expr, v)?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::*;
    use crate::func::{format_f64, PHI};
    use std::f64::consts::{E, PI};

    fn kind_of(expr: &str) -> Option<ErrorKind> {
        calculate(expr).err().map(|e| e.kind())
    }

    #[test]
    fn test_expr() {
        assert_eq!(calculate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(calculate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(calculate("sqrt(16)"), Ok(4.0));
        assert_eq!(calculate("-5 + 3"), Ok(-2.0));
        assert_eq!(calculate("5 - -3"), Ok(8.0));
        assert_eq!(calculate("5!"), Ok(120.0));
        assert_eq!(calculate("log_2(8)"), Ok(3.0));
        assert_eq!(calculate("2^3^2"), Ok(64.0));
        assert_eq!(calculate("7 % 3"), Ok(1.0));
        assert_eq!(calculate("7.5 % 2"), Ok(1.5));
        assert_eq!(calculate("-2^2"), Ok(4.0));
        assert_eq!(calculate("2^-1"), Ok(0.5));
        assert_eq!(calculate("-(-3)"), Ok(3.0));
        assert_eq!(calculate("(5!)-3"), Ok(117.0));
        assert_eq!(calculate("3!!"), Ok(720.0));
        assert_eq!(calculate("2^(sqrt(4))"), Ok(4.0));
        assert_eq!(calculate("2*3^sin(0)"), Ok(0.0));
        assert_eq!(calculate("10 / 4 * 2"), Ok(5.0));
        assert_eq!(calculate("10 - 4 - 3"), Ok(3.0));
        assert_eq!(calculate("1e3 + .5"), Ok(1000.5));
        assert_eq!(calculate("e"), Ok(E));
        assert_eq!(calculate("pi"), Ok(PI));
        assert_eq!(calculate("phi"), Ok(PHI));
        assert_eq!(calculate("2*pi"), Ok(2.0 * PI));
        assert_eq!(calculate("ln(1)"), Ok(0.0));
        assert_eq!(calculate("abs(-3) + floor(2.7) + ceil(2.2) + round(2.5)"), Ok(11.0));
        assert_eq!(calculate("log(1000) + log2(8)"), Ok(6.0));
        assert!((calculate("cbrt(27)").unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_corner_cases() {
        let exprs: [&'static str; 12] = [
            // trig noise is cut to zero
            "sin(pi)",
            "cos(pi/2)",
            "tan(pi)",
            // the same result with or without spaces
            "sin ( cos ( 0 ) )",
            "sin(cos(0))",
            // a function as the base
            "log_2(8) ^ 2",
            "exp(0) + cosh(0) + sinh(0)",
            "atan(1) * 4",
            "acos(-1)",
            "asin(1)*2",
            "-(2+3)*2",
            "10!/9!",
        ];
        let ress: [&'static str; 12] = [
            "0.0",
            "0.0",
            "0.0",
            "0.8414709848078965",
            "0.8414709848078965",
            "9.0",
            "2.0",
            "3.141592653589793",
            "3.141592653589793",
            "3.141592653589793",
            "-10.0",
            "10.0",
        ];

        for (i, expr) in exprs.iter().enumerate() {
            let res = calculate(expr);
            let res_str = match res {
                Ok(v) => format_f64(v),
                Err(e) => format!("{:?}", e),
            };
            assert_eq!(res_str, ress[i].to_string(), "expression: {}", expr);
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(calculate("1/0"), Err(CalcError::DividedByZero("/".to_string(), 1.0)));
        assert_eq!(kind_of("1 % 0"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("sqrt(-1)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("sqrt(0)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("ln(0)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("log_1(5)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("asin(2)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("atanh(1)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("acosh(0.5)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("cot(0)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("(-8)^(1/3)"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("(-3)!"), Some(ErrorKind::Domain));
        assert_eq!(kind_of("2.5!"), Some(ErrorKind::Domain));
        assert_eq!(calculate("171!"), Err(CalcError::Overflow("!".to_string(), 171.0)));
        assert_eq!(kind_of("200!"), Some(ErrorKind::Overflow));

        assert_eq!(calculate("(2+3"), Err(CalcError::OpenBracketMismatch(1)));
        assert_eq!(calculate("2+3)"), Err(CalcError::ClosingBracketMismatch(1)));
        assert_eq!(calculate(")2+3("), Err(CalcError::UnmatchedBracket));
        assert_eq!(calculate(""), Err(CalcError::EmptyExpression));
        assert_eq!(kind_of("2 $ 3"), Some(ErrorKind::Lex));
        assert_eq!(kind_of("foo(1)"), Some(ErrorKind::Lex));

        assert_eq!(calculate("2 +"), Err(CalcError::MissingSecondArgument("+".to_string())));
        assert_eq!(calculate("*"), Err(CalcError::ExcessOperator("*".to_string())));
        assert_eq!(calculate("()"), Err(CalcError::NoValue));

        // a unary operator or function pops the operators of the same or
        // higher priority before it gets its operand
        assert_eq!(calculate("--3"), Err(CalcError::ExcessOperator("neg".to_string())));
        assert_eq!(calculate("2^sqrt(4)"), Err(CalcError::MissingSecondArgument("^".to_string())));
        assert_eq!(kind_of("2^log_2(8)"), Some(ErrorKind::Eval));
        // `-` after `!` is a unary minus
        assert_eq!(calculate("5!-3"), Err(CalcError::TooManyValues(2)));
        assert_eq!(calculate("2 (3)"), Err(CalcError::TooManyValues(2)));
    }

    #[test]
    fn test_history() {
        let mut state = CalcState::new();
        assert_eq!(state.result(), None);
        assert!(!state.undo());
        assert_eq!(state.history().len(), 0);

        assert_eq!(eval("2+3", &mut state), Ok(5.0));
        assert_eq!(state.result(), Some(5.0));
        assert_eq!(state.history().len(), 1);

        // errors leave the history untouched
        assert!(eval("1/0", &mut state).is_err());
        assert!(eval("(1", &mut state).is_err());
        assert_eq!(state.history().len(), 1);

        assert_eq!(eval("5!", &mut state), Ok(120.0));
        assert_eq!(state.result(), Some(120.0));
        assert!(state.undo());
        assert_eq!(state.result(), Some(5.0));
        assert!(state.undo());
        assert_eq!(state.result(), None);
        assert_eq!(state.history().len(), 0);
        assert!(!state.undo());
        assert_eq!(state.history().len(), 0);

        assert_eq!(eval("1", &mut state), Ok(1.0));
        assert_eq!(eval("2", &mut state), Ok(2.0));
        state.clear_history();
        assert_eq!(state.result(), None);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_history_full() {
        let cfg = CalcConfig::new().with_history_limit(2);
        let mut state = CalcState::with_config(&cfg);
        assert_eq!(eval("1+1", &mut state), Ok(2.0));
        assert_eq!(eval("2+2", &mut state), Ok(4.0));
        let res = eval("3+3", &mut state);
        assert_eq!(res, Err(CalcError::HistoryFull(2)));
        assert_eq!(res.map_err(|e| e.kind()), Err(ErrorKind::Allocation));
        assert_eq!(state.result(), Some(4.0));

        state.clear_history();
        assert_eq!(eval("3+3", &mut state), Ok(6.0));
        let items: Vec<String> = state.history().iter().map(|e| e.to_string()).collect();
        assert_eq!(items, vec!["Equation: 3+3, Result: 6.0".to_string()]);
    }
}
