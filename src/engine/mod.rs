//! Reference script engine
//!
//! A small expression language behind the [`Evaluator`] contract, so the shell is
//! usable without an embedding application:
//!
//! ```text
//! # x = 2
//! # if (x > 1) {
//! .   print("big", x)
//! . }
//! big 2
//! ```

mod builtins;
mod context;
mod error;
mod eval;
mod lexer;
mod parser;
mod value;

pub use context::{Context, ExecutionStats};
pub use error::EngineError;
pub use value::Value;

use std::time::Instant;

use crate::console::Console;
use crate::repl::{BlockPolicy, DelimiterPolicy, Evaluator, HostRef};
use crate::tlog;
use crate::util::i18n::MSG;
use eval::TreeWalker;
use lexer::Lexer;

/// Interpreter for the bundled script language
pub struct ScriptEngine {
    /// Variables and statistics
    context: Context,
    /// Completeness rule for pending input
    policy: Box<dyn BlockPolicy>,
}

impl ScriptEngine {
    /// Engine using delimiter counting for completeness
    pub fn new() -> Self {
        Self::with_policy(Box::new(DelimiterPolicy))
    }

    /// Engine with a custom completeness rule
    pub fn with_policy(policy: Box<dyn BlockPolicy>) -> Self {
        Self {
            context: Context::new(),
            policy,
        }
    }

    /// Parse and run `source`, returning the first error
    pub fn eval(
        &mut self,
        source: &str,
        console: &dyn Console,
    ) -> Result<(), EngineError> {
        let tokens = Lexer::new(source).tokenize()?;
        let stmts = parser::parse(tokens)?;
        TreeWalker::new(&mut self.context, console).run(&stmts)
    }

    /// Current value of a variable
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Value> {
        self.context.get_var(name)
    }

    /// Execution statistics
    pub fn stats(&self) -> &ExecutionStats {
        self.context.stats()
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for ScriptEngine {
    fn nesting_depth(
        &self,
        source: &str,
    ) -> usize {
        self.policy.depth(source)
    }

    fn execute(
        &mut self,
        source: &str,
        console: &dyn Console,
    ) {
        let start = Instant::now();
        let result = self.eval(source, console);
        self.context.increment_eval(start.elapsed());

        if let Err(e) = result {
            tlog!(debug, MSG::EngineScriptError, &e);
            console.writeln(&format!("error: {}", e));
        }
    }

    fn bind(
        &mut self,
        name: &str,
        value: HostRef,
    ) {
        self.context.define_var(name, Value::Host(value));
    }

    fn reset(&mut self) {
        self.context.clear();
    }

    fn symbols(&self) -> Vec<String> {
        self.context.symbols()
    }
}
