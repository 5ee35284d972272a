//! Script execution context
//!
//! Variable environment and statistics kept across chunks.

use std::collections::HashMap;
use std::time::Duration;

use super::value::Value;

/// Execution statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStats {
    /// Chunks executed
    pub eval_count: usize,
    /// Time spent executing
    pub total_time: Duration,
}

/// Variables and counters of one engine instance
#[derive(Debug, Default)]
pub struct Context {
    /// Variable environment: name -> value
    variables: HashMap<String, Value>,
    /// Execution statistics
    stats: ExecutionStats,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or overwrite a variable
    pub fn define_var(
        &mut self,
        name: &str,
        value: Value,
    ) {
        self.variables.insert(name.to_string(), value);
    }

    /// Look up a variable
    pub fn get_var(
        &self,
        name: &str,
    ) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Defined names, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Record one executed chunk
    pub fn increment_eval(
        &mut self,
        duration: Duration,
    ) {
        self.stats.eval_count += 1;
        self.stats.total_time += duration;
    }

    /// Clear all state
    pub fn clear(&mut self) {
        self.variables.clear();
        self.stats = ExecutionStats::default();
    }

    /// Get statistics
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }
}
