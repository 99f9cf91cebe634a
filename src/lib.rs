//! # Infix expression calculator
//!
//! An expression is split into tokens, reordered into postfix notation with
//! the shunting-yard algorithm, and then evaluated on a value stack. All
//! numbers are 64-bit floats. Any result closer to zero than `1e-13` is
//! replaced with exact zero, so `sin(pi)` is `0` and not `1.2e-16`.
//!
//! Every successful calculation made with [`eval`] is recorded in the
//! history of a [`CalcState`]. The latest record can be undone.
//!
//! The list of supported functions:
//! * trigonometric functions (including inverted ones): sin, cos, tan, sec, csc (cosec), cot, asin, acos, atan
//! * hyperbolic functions (including inverted ones): sinh, cosh, tanh, asinh, acosh, atanh
//! * roots: sqrt and cbrt
//! * exponent, logarithms: exp, ln, log2, log (base 10), and `log_B(X)` - logarithm of X with base B
//! * rounding: ceil, floor, round
//! * absolute value: abs
//!
//! Operators (starting from highest priority):
//! * `!` - factorial (after a number, constant, or closing bracket)
//! * `-` - unary minus
//! * `^` and all functions
//! * `*`, `/`, `%` - multiplication, division, remainder
//! * `+`, `-` - addition, subtraction
//!
//! Operators of the same priority are evaluated from left to right, including
//! power: `2^3^2` is `64`. Unary minus binds tighter than power: `-2^2` is `4`.
//! A function or unary minus pops operators of the same or higher priority
//! before its operand is known, so a function used as an exponent must be put
//! in brackets: `2^(sqrt(4))`. A `-` right after `!` is a unary minus.
//!
//! Predefined constants:
//! * `pi` - 3.14159...
//! * `e` - 2.71828...
//! * `phi` - golden section - 1.6180...
//!
//! ```
//! use shunt_calc::{calculate, eval, CalcState};
//!
//! assert_eq!(calculate("2 + 3 * 4"), Ok(14.0));
//!
//! let mut state = CalcState::new();
//! assert_eq!(eval("5!", &mut state), Ok(120.0));
//! assert_eq!(state.result(), Some(120.0));
//! assert!(state.undo());
//! assert_eq!(state.result(), None);
//! ```

use std::sync::Once;

pub mod config;
pub mod errors;
pub mod func;
pub mod history;
pub mod parse;
pub mod stack;
pub mod state;

#[cfg(test)]
mod proptests;

pub use config::CalcConfig;
pub use errors::{CalcError, ErrorKind};
pub use func::{format_f64, CalcResult};
pub use history::{Entry, History};
pub use parse::{tokenize, Token};
pub use stack::{evaluate, to_postfix};
pub use state::{calculate, eval, CalcState};

static INIT_LOGGER: Once = Once::new();

/// Sets up `env_logger` once per process. The log level is taken from `RUST_LOG`
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}
