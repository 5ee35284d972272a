//! Ripple - interactive shell front-end
//!
//! Reads lines from a console, accumulates them until the evaluation engine reports
//! a complete statement, hands the chunk to the engine and shows the prompt that
//! matches the current nesting depth.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use ripple::console::{SharedConsole, StdioConsole};
//! use ripple::engine::ScriptEngine;
//! use ripple::repl::{Interpreter, Prompts, Repl};
//!
//! let console: SharedConsole = Rc::new(StdioConsole::stdio());
//! let interpreter = Interpreter::new(console.clone(), ScriptEngine::new());
//! let mut repl = Repl::new(console, interpreter, Prompts::default());
//! repl.run();
//! ```

#![doc(html_root_url = "https://docs.rs/ripple")]
#![warn(rust_2018_idioms)]

pub mod console;
pub mod engine;
pub mod error;
pub mod repl;
pub mod tui;
pub mod util;

pub use error::{ReplError, Result};

use crate::util::i18n::{t_cur, MSG};

/// Shell version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shell name
pub const NAME: &str = "Ripple";

/// Banner shown before the first prompt
pub fn caption() -> String {
    t_cur(MSG::Caption, Some(&[&VERSION]))
}
