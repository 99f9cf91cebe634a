use std::env;

use log::warn;

pub const HISTORY_LIMIT_VAR: &str = "SHUNT_CALC_HISTORY_LIMIT";
pub const PROMPT_VAR: &str = "SHUNT_CALC_PROMPT";
const DEFAULT_PROMPT: &str = "Insert expression: ";

/// Calculator settings. No history limit by default
#[derive(Clone, Debug, PartialEq)]
pub struct CalcConfig {
    pub history_limit: Option<usize>,
    pub prompt: String,
}

impl Default for CalcConfig {
    fn default() -> CalcConfig {
        CalcConfig {
            history_limit: None,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl CalcConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    /// Reads settings from `SHUNT_CALC_HISTORY_LIMIT` and `SHUNT_CALC_PROMPT`.
    /// Invalid values are reported to the log and ignored
    pub fn from_env() -> Self {
        CalcConfig::from_vars(|name| env::var(name).ok())
    }

    pub(crate) fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = CalcConfig::default();
        if let Some(v) = get(HISTORY_LIMIT_VAR) {
            match v.trim().parse::<usize>() {
                Ok(0) | Err(..) => warn!("{}: invalid history limit '{}', ignored", HISTORY_LIMIT_VAR, v),
                Ok(n) => cfg.history_limit = Some(n),
            }
        }
        if let Some(v) = get(PROMPT_VAR) {
            if !v.is_empty() {
                cfg.prompt = v;
            }
        }
        cfg
    }
}
