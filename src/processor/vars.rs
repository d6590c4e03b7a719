//! The single global variable namespace of a run.

use std::collections::HashMap;

use crate::error::{Line, RuntimeErrorKind, ScriptError};

#[derive(Debug, Default)]
pub struct Variables {
    values: HashMap<String, i64>,
    limit: Option<usize>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses to hold more than `limit` distinct names.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            values: HashMap::new(),
            limit,
        }
    }

    /// Overwrite `name`, creating it if absent.
    pub fn set(&mut self, name: &str, value: i64, line: Line) -> Result<(), ScriptError> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if let Some(limit) = self.limit.filter(|&limit| self.values.len() >= limit) {
            return Err(ScriptError::runtime(
                RuntimeErrorKind::TooManyVariables(limit),
                line,
            ));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str, line: Line) -> Result<i64, ScriptError> {
        self.values.get(name).copied().ok_or_else(|| {
            ScriptError::runtime(RuntimeErrorKind::UndefinedVariable(name.to_string()), line)
        })
    }

    /// Knock one off a loop counter. Missing names are left alone.
    pub fn decrement(&mut self, name: &str) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = slot.wrapping_sub(1);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every variable, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, i64)> {
        let mut all: Vec<_> = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect();
        all.sort();
        all
    }
}
