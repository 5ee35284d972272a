//! Evaluation engine contract
//!
//! The engine that parses and runs statements lives behind [`Evaluator`]. The
//! driver only asks it how deeply nested the pending text is, hands it complete
//! chunks, and binds host objects into its namespace.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::console::Console;

/// Evaluation engine as seen by the REPL.
///
/// Implementations report results and errors themselves, through the console
/// passed to [`execute`](Evaluator::execute).
pub trait Evaluator {
    /// Nesting depth of `source`; 0 means it is a complete chunk
    fn nesting_depth(
        &self,
        source: &str,
    ) -> usize;

    /// Run a complete chunk
    fn execute(
        &mut self,
        source: &str,
        console: &dyn Console,
    );

    /// Make a host object addressable as `name`
    fn bind(
        &mut self,
        name: &str,
        value: HostRef,
    );

    /// Drop all evaluation state (bindings are re-applied by the caller)
    fn reset(&mut self) {}

    /// Names currently defined, for listings
    fn symbols(&self) -> Vec<String> {
        Vec::new()
    }

    /// File name of the definitions file loaded when none is given
    fn default_include_name(&self) -> &str {
        "init.rpl"
    }
}

/// Plain data crossing the host boundary
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for HostData {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            HostData::Nil => write!(f, "nil"),
            HostData::Bool(b) => write!(f, "{}", b),
            HostData::Int(i) => write!(f, "{}", i),
            HostData::Float(x) => write!(f, "{}", x),
            HostData::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Error raised by a host method
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    #[error("{type_name} has no method '{method}'")]
    UnknownMethod { type_name: String, method: String },

    #[error("{method} expects {expected} argument(s), got {found}")]
    Arity {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("{0}")]
    Argument(String),
}

/// Application object exposed to evaluated code
pub trait HostObject: fmt::Debug {
    /// Type name shown in listings and errors
    fn type_name(&self) -> &'static str;

    /// Short human-readable description
    fn describe(&self) -> String {
        format!("<{}>", self.type_name())
    }

    /// Method names accepted by [`invoke`](HostObject::invoke)
    fn methods(&self) -> &'static [&'static str] {
        &[]
    }

    /// Call a method on the object
    fn invoke(
        &self,
        method: &str,
        args: &[HostData],
    ) -> Result<HostData, HostError>;

    fn as_any(&self) -> &dyn Any;
}

/// Shared reference to a host object
pub type HostRef = Rc<dyn HostObject>;

/// Check the argument count of a host method call
pub fn expect_args(
    method: &str,
    args: &[HostData],
    expected: usize,
) -> Result<(), HostError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(HostError::Arity {
            method: method.to_string(),
            expected,
            found: args.len(),
        })
    }
}
