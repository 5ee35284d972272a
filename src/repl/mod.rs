//! REPL Module
//!
//! This module contains:
//! - [`backend_trait::Evaluator`] - contract of the evaluation engine, plus host objects
//! - [`depth::BlockPolicy`] - pluggable completeness rule
//! - [`interpreter::Interpreter`] - session state and line accumulation
//! - [`commands::CommandHandler`] - `:` meta commands
//! - [`driver::Repl`] - read / process / prompt state machine

pub mod backend_trait;
pub mod commands;
pub mod depth;
pub mod driver;
pub mod interpreter;

pub use backend_trait::{Evaluator, HostData, HostError, HostObject, HostRef};
pub use commands::{CommandHandler, CommandResult};
pub use depth::{BlockPolicy, DelimiterPolicy};
pub use driver::{Prompts, Repl, ReplState};
pub use interpreter::{Interpreter, Session};

#[cfg(test)]
mod tests;
