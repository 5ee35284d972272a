//! REPL driver
//!
//! Owns the read / process / prompt cycle. In stream mode [`Repl::run`] is the
//! scheduler; in widget mode the host event loop calls [`Repl::submit`] once per
//! submitted line and the same processing step runs.

use super::backend_trait::Evaluator;
use super::interpreter::Interpreter;
use crate::console::SharedConsole;
use crate::tlog;
use crate::util::config::ReplConfig;
use crate::util::i18n::MSG;

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    /// Waiting for the next line
    AwaitingInput,
    /// Handling a line
    Processing,
    /// Session over; terminal
    Terminated,
}

/// Prompt strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    /// Shown when ready for a new statement
    pub primary: String,
    /// Shown while a block is open
    pub continuation: String,
}

impl Prompts {
    /// Create prompts
    pub fn new(
        primary: impl Into<String>,
        continuation: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            continuation: continuation.into(),
        }
    }

    /// Text console prompts from config
    pub fn stream(config: &ReplConfig) -> Self {
        Self::new(&config.prompt, &config.continuation_prompt)
    }

    /// Windowed console prompts from config
    pub fn widget(config: &ReplConfig) -> Self {
        Self::new(&config.gui_prompt, &config.continuation_prompt)
    }

    /// Prompt for a nesting depth
    pub fn select(
        &self,
        depth: usize,
    ) -> &str {
        if depth > 0 {
            &self.continuation
        } else {
            &self.primary
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::stream(&ReplConfig::default())
    }
}

/// Read-eval-print driver
pub struct Repl<E: Evaluator> {
    /// Console shared with the interpreter
    console: SharedConsole,
    /// Engine adapter
    interpreter: Interpreter<E>,
    /// Prompt strings
    prompts: Prompts,
    /// Banner written by [`start`](Repl::start)
    caption: Option<String>,
    /// Current state
    state: ReplState,
}

impl<E: Evaluator> Repl<E> {
    /// Create a driver. The console should be the one the interpreter writes to.
    pub fn new(
        console: SharedConsole,
        interpreter: Interpreter<E>,
        prompts: Prompts,
    ) -> Self {
        Self {
            console,
            interpreter,
            prompts,
            caption: None,
            state: ReplState::AwaitingInput,
        }
    }

    /// Set the banner written before the first prompt
    pub fn with_caption(
        mut self,
        caption: impl Into<String>,
    ) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Write the banner and the first prompt
    pub fn start(&mut self) {
        if let Some(ref caption) = self.caption {
            self.console.writeln(caption);
        }
        self.write_prompt();
        self.state = ReplState::AwaitingInput;
    }

    /// One processing step. `None` is end of input.
    pub fn step(
        &mut self,
        line: Option<&str>,
    ) -> ReplState {
        if self.state == ReplState::Terminated {
            return self.state;
        }

        self.state = ReplState::Processing;
        if self.interpreter.process_line(line) {
            self.write_prompt();
            self.state = ReplState::AwaitingInput;
        } else {
            tlog!(debug, MSG::ReplTerminated);
            self.state = ReplState::Terminated;
        }
        self.state
    }

    /// Entry point for hosts that deliver input through callbacks
    pub fn submit(
        &mut self,
        line: &str,
    ) -> ReplState {
        self.step(Some(line))
    }

    /// Blocking loop for stream consoles: runs until end of input or an exit
    /// command
    pub fn run(&mut self) {
        self.start();
        while self.state != ReplState::Terminated {
            let line = self.console.read_line();
            self.step(line.as_deref());
        }
    }

    fn write_prompt(&self) {
        let prompt = self.prompts.select(self.interpreter.block_level());
        self.console.write(prompt);
    }

    /// Current state
    pub fn state(&self) -> ReplState {
        self.state
    }

    /// Nesting depth of the pending input
    pub fn block_level(&self) -> usize {
        self.interpreter.block_level()
    }

    /// Prompt strings
    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// The engine adapter
    pub fn interpreter(&self) -> &Interpreter<E> {
        &self.interpreter
    }

    /// The engine adapter, mutably (startup loading and host bindings)
    pub fn interpreter_mut(&mut self) -> &mut Interpreter<E> {
        &mut self.interpreter
    }
}
