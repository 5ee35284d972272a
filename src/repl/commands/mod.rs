//! REPL Command Handler
//!
//! Handles meta commands starting with ':'. They act on the session, never reach
//! the evaluation engine as source text, and never end the session.

use super::backend_trait::Evaluator;
use super::interpreter::Session;
use crate::util::i18n::{t_cur, t_cur_simple, MSG};

/// Command result
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Nothing to print
    Continue,
    /// Print a message
    Output(String),
}

/// Command handler for the session
pub struct CommandHandler<'a, E: Evaluator> {
    session: &'a mut Session,
    engine: &'a mut E,
}

impl<'a, E: Evaluator> CommandHandler<'a, E> {
    /// Create a new command handler
    pub fn new(
        session: &'a mut Session,
        engine: &'a mut E,
    ) -> Self {
        Self { session, engine }
    }

    /// Whether `line` is a meta command
    pub fn is_command(line: &str) -> bool {
        line.trim_start().starts_with(':')
    }

    /// Whether `line` is a meta command that also applies inside an open block.
    ///
    /// Other `:` lines typed mid-block are ordinary input.
    pub fn applies_mid_block(line: &str) -> bool {
        let cmd = line.trim().trim_start_matches(':');
        matches!(cmd.split_whitespace().next(), Some("clear" | "c"))
    }

    /// Handle a command
    pub fn handle(
        &mut self,
        line: &str,
    ) -> CommandResult {
        let cmd = line.trim().trim_start_matches(':');
        let name = cmd.split_whitespace().next().unwrap_or("");

        match name {
            "help" | "h" | "?" => CommandResult::Output(t_cur_simple(MSG::ReplHelp)),
            "clear" | "c" => {
                self.session.discard();
                CommandResult::Output(format!("{}\n", t_cur_simple(MSG::ReplCleared)))
            }
            "bindings" | "b" => CommandResult::Output(self.list_bindings()),
            "vars" | "v" => {
                let symbols = self.engine.symbols();
                if symbols.is_empty() {
                    CommandResult::Output(format!("{}\n", t_cur_simple(MSG::ReplNoSymbols)))
                } else {
                    CommandResult::Output(format!("{}\n", symbols.join(" ")))
                }
            }
            "stats" => CommandResult::Output(format!(
                "{}\n",
                t_cur(
                    MSG::ReplStats,
                    Some(&[&self.session.statements(), &self.session.lines_read()]),
                )
            )),
            "reset" => {
                self.session.discard();
                self.engine.reset();
                for (name, value) in self.session.bindings() {
                    self.engine.bind(name, value.clone());
                }
                CommandResult::Output(format!("{}\n", t_cur_simple(MSG::ReplReset)))
            }
            "" => CommandResult::Continue,
            _ => CommandResult::Output(format!(
                "{}\n",
                t_cur(MSG::ReplUnknownCommand, Some(&[&line.trim()]))
            )),
        }
    }

    fn list_bindings(&self) -> String {
        if self.session.bindings().is_empty() {
            return format!("{}\n", t_cur_simple(MSG::ReplNoBindings));
        }

        let mut out = String::new();
        for (name, value) in self.session.bindings() {
            out.push_str(&format!("  {} = {}", name, value.describe()));
            let methods = value.methods();
            if !methods.is_empty() {
                out.push_str(&format!("  [{}]", methods.join(", ")));
            }
            out.push('\n');
        }
        out
    }
}
