//! Line-editing console with rustyline
//!
//! Behaves like a stream console on stdin/stdout, but reads through rustyline so
//! the user gets cursor movement and history. Rustyline draws its own prompt, so
//! any text written without a trailing newline is held back and handed to
//! `readline` as the prompt.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;

use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, EditMode};

use super::Console;
use crate::tlog;
use crate::util::config::ReplConfig;
use crate::util::i18n::MSG;
use crate::Result;

/// Console backed by a rustyline editor
pub struct EditorConsole {
    /// rustyline editor
    editor: RefCell<DefaultEditor>,
    /// Trailing text not yet terminated by a newline; becomes the next prompt
    pending_prompt: RefCell<String>,
    /// History file path
    history_file: Option<PathBuf>,
}

impl EditorConsole {
    /// Create an editor console from the REPL configuration
    pub fn new(config: &ReplConfig) -> Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(false)
            .max_history_size(config.history_size)?
            .edit_mode(EditMode::Emacs)
            .build();

        let mut editor = DefaultEditor::with_config(rl_config)?;

        // Load history if file exists
        if let Some(ref history_file) = config.history_file {
            if history_file.exists() {
                if let Err(e) = editor.load_history(history_file) {
                    tlog!(warn, MSG::HistoryLoadFailed, &history_file.display(), &e);
                }
            }
        }

        tlog!(debug, MSG::ConsoleEditor);
        Ok(Self {
            editor: RefCell::new(editor),
            pending_prompt: RefCell::new(String::new()),
            history_file: config.history_file.clone(),
        })
    }
}

impl Console for EditorConsole {
    fn read_line(&self) -> Option<String> {
        let prompt = std::mem::take(&mut *self.pending_prompt.borrow_mut());
        let mut editor = self.editor.borrow_mut();

        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            // Ctrl-C abandons the current line only
            Err(ReadlineError::Interrupted) => Some(String::new()),
            Err(ReadlineError::Eof) => None,
            Err(e) => {
                tlog!(warn, MSG::ConsoleReadFailed, &e);
                None
            }
        }
    }

    fn write(
        &self,
        text: &str,
    ) {
        let mut pending = self.pending_prompt.borrow_mut();
        pending.push_str(text);

        if let Some(end) = pending.rfind('\n') {
            let complete: String = pending.drain(..=end).collect();
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout
                .write_all(complete.as_bytes())
                .and_then(|_| stdout.flush())
            {
                tlog!(debug, MSG::ConsoleWriteFailed, &e);
            }
        }
    }
}

impl Drop for EditorConsole {
    fn drop(&mut self) {
        let pending = std::mem::take(self.pending_prompt.get_mut());
        if !pending.is_empty() {
            print!("{}", pending);
            let _ = io::stdout().flush();
        }

        if let Some(ref history_file) = self.history_file {
            if let Err(e) = self.editor.get_mut().save_history(history_file) {
                tlog!(warn, MSG::HistorySaveFailed, &history_file.display(), &e);
            }
        }
    }
}
