use std::fmt;

use log::warn;

use crate::errors::*;
use crate::func::{format_f64, CalcErrorResult};

/// One successful calculation
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub expr: String,
    pub result: f64,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Equation: {}, Result: {}", self.expr, format_f64(self.result))
    }
}

/// Log of calculations in the order they were made. Only the latest entry
/// can be removed
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<Entry>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Default::default()
    }

    /// The log that refuses new entries after `limit` ones are recorded
    pub fn with_limit(limit: usize) -> Self {
        History {
            entries: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn append(&mut self, expr: &str, result: f64) -> CalcErrorResult {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit {
                warn!("history is full: {} entries", limit);
                return Err(CalcError::HistoryFull(limit));
            }
        }
        reserve(&mut self.entries, 1)?;
        self.entries.push(Entry {
            expr: expr.to_string(),
            result,
        });
        Ok(())
    }

    pub fn remove_last(&mut self) -> Option<Entry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Entries from the oldest to the newest one
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn reserve(entries: &mut Vec<Entry>, additional: usize) -> CalcErrorResult {
    entries.try_reserve(additional).map_err(|e| {
        warn!("failed to allocate a history entry: {}", e);
        CalcError::AllocFailed
    })
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
