//! Evaluation engine adapter
//!
//! [`Interpreter`] owns the session state of one REPL run and turns submitted
//! lines into complete chunks for the engine.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::backend_trait::{Evaluator, HostRef};
use super::commands::{CommandHandler, CommandResult};
use crate::console::SharedConsole;
use crate::error::ReplError;
use crate::tlog;
use crate::util::config::get_config_dir;
use crate::util::i18n::{t_cur, MSG};
use crate::Result;

/// Mutable state of one REPL run
#[derive(Debug, Default)]
pub struct Session {
    /// Text submitted since the last complete chunk
    buffer: String,
    /// Nesting depth of `buffer` as last reported by the engine
    depth: usize,
    /// Host objects bound into the engine, in binding order
    bindings: IndexMap<String, HostRef>,
    /// Chunks handed to the engine
    statements: usize,
    /// Lines received, including meta commands
    lines_read: usize,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending text
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Host bindings
    pub fn bindings(&self) -> &IndexMap<String, HostRef> {
        &self.bindings
    }

    /// Number of chunks executed
    pub fn statements(&self) -> usize {
        self.statements
    }

    /// Number of lines received
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Drop the pending text
    pub fn discard(&mut self) {
        self.buffer.clear();
        self.depth = 0;
    }
}

/// Adapter between the driver and an [`Evaluator`]
pub struct Interpreter<E: Evaluator> {
    /// Console used for every message
    console: SharedConsole,
    /// Evaluation engine
    engine: E,
    /// Session state
    session: Session,
    /// Inputs that end the session
    exit_commands: Vec<String>,
}

impl<E: Evaluator> Interpreter<E> {
    /// Create an adapter with the default exit commands
    pub fn new(
        console: SharedConsole,
        engine: E,
    ) -> Self {
        Self::with_exit_commands(
            console,
            engine,
            crate::util::config::ReplConfig::default().exit_commands,
        )
    }

    /// Create an adapter with custom exit commands
    pub fn with_exit_commands(
        console: SharedConsole,
        engine: E,
        exit_commands: Vec<String>,
    ) -> Self {
        Self {
            console,
            engine,
            session: Session::new(),
            exit_commands,
        }
    }

    /// Process one line of input.
    ///
    /// `None` is the end-of-input sentinel. Returns `false` when the session should
    /// end (end of input or an exit command, whatever is pending), `true` otherwise.
    pub fn process_line(
        &mut self,
        line: Option<&str>,
    ) -> bool {
        let Some(line) = line else {
            tlog!(debug, MSG::ReplEndOfInput);
            self.session.discard();
            return false;
        };

        self.session.lines_read += 1;
        tlog!(debug, MSG::ReplLineReceived, &self.session.depth, &line);

        let trimmed = line.trim();
        if self.is_exit(trimmed) {
            tlog!(debug, MSG::ReplExitDirective);
            self.session.discard();
            return false;
        }

        let is_command = CommandHandler::<E>::is_command(trimmed)
            && (self.session.depth == 0 || CommandHandler::<E>::applies_mid_block(trimmed));
        if is_command {
            let result = CommandHandler::new(&mut self.session, &mut self.engine).handle(trimmed);
            if let CommandResult::Output(text) = result {
                self.console.write(&text);
            }
            return true;
        }

        if trimmed.is_empty() && self.session.depth == 0 {
            return true;
        }

        self.session.buffer.push_str(line);
        self.session.buffer.push('\n');
        self.session.depth = self.engine.nesting_depth(&self.session.buffer);

        if self.session.depth == 0 {
            let chunk = std::mem::take(&mut self.session.buffer);
            tlog!(debug, MSG::ReplChunkComplete, &chunk.len());
            self.session.statements += 1;
            self.engine.execute(&chunk, &*self.console);
        } else {
            tlog!(debug, MSG::ReplChunkPending, &self.session.depth);
        }

        true
    }

    /// Nesting depth of the pending input; 0 when ready for a new statement
    pub fn block_level(&self) -> usize {
        self.session.depth
    }

    /// Feed a definitions file through the normal line path.
    ///
    /// A missing file is skipped quietly; other read failures are reported on the
    /// console. Neither stops the session.
    pub fn read_include_file(
        &mut self,
        path: &Path,
    ) {
        match self.load_include(path) {
            Ok(_) => {}
            Err(ReplError::IncludeFile { path, source })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tlog!(info, MSG::IncludeMissing, &path.display());
            }
            Err(e) => {
                let message = match &e {
                    ReplError::IncludeFile { path, source } => t_cur(
                        MSG::IncludeUnreadable,
                        Some(&[&path.display() as &dyn std::fmt::Display, source]),
                    ),
                    other => other.to_string(),
                };
                tlog!(warn, MSG::IncludeUnreadable, &path.display(), &e);
                self.console.writeln(&message);
            }
        }
    }

    /// Feed a definitions file, returning the number of lines processed
    pub fn load_include(
        &mut self,
        path: &Path,
    ) -> Result<usize> {
        tlog!(debug, MSG::IncludeLoading, &path.display());
        let source = std::fs::read_to_string(path).map_err(|source| ReplError::IncludeFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut count = 0;
        for line in source.lines() {
            count += 1;
            if !self.process_line(Some(line)) {
                break;
            }
        }

        if self.session.depth > 0 {
            self.session.discard();
            let message = t_cur(MSG::IncludeUnterminated, Some(&[&path.display()]));
            tlog!(warn, MSG::IncludeUnterminated, &path.display());
            self.console.writeln(&message);
        }

        tlog!(info, MSG::IncludeLoaded, &count, &path.display());
        Ok(count)
    }

    /// Definitions file used when none is given.
    ///
    /// `$RIPPLE_INIT`, then the engine's file name in the user config directory,
    /// then the same name next to the executable.
    pub fn default_include_file(&self) -> PathBuf {
        if let Ok(path) = std::env::var("RIPPLE_INIT") {
            return PathBuf::from(path);
        }

        let name = self.engine.default_include_name();
        if let Some(dir) = get_config_dir() {
            return dir.join(name);
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(name)))
            .unwrap_or_else(|| PathBuf::from(name))
    }

    /// Expose a host object to evaluated code under `name`
    pub fn bind(
        &mut self,
        name: &str,
        value: HostRef,
    ) {
        tlog!(debug, MSG::ReplBind, &name, &value.describe());
        self.session.bindings.insert(name.to_string(), value.clone());
        self.engine.bind(name, value);
    }

    fn is_exit(
        &self,
        trimmed: &str,
    ) -> bool {
        self.exit_commands.iter().any(|cmd| cmd == trimmed)
    }

    /// Session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The evaluation engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The evaluation engine, mutably
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The console
    pub fn console(&self) -> &SharedConsole {
        &self.console
    }
}
