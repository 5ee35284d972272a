//! Shared helpers

use std::io::Cursor;
use std::rc::Rc;

use ripple::console::{SharedConsole, StreamConsole};
use ripple::engine::ScriptEngine;
use ripple::repl::{Interpreter, Prompts, Repl};

pub type Captured = Rc<StreamConsole<Cursor<Vec<u8>>, Vec<u8>>>;

/// Console reading `lines`, with its output kept for inspection
pub fn console(lines: &[&str]) -> (SharedConsole, Captured) {
    let mut input = lines.join("\n");
    if !lines.is_empty() {
        input.push('\n');
    }
    let captured: Captured = Rc::new(StreamConsole::new(
        Cursor::new(input.into_bytes()),
        Vec::new(),
    ));
    let console: SharedConsole = captured.clone();
    (console, captured)
}

pub fn output(captured: &Captured) -> String {
    String::from_utf8(captured.writer().clone()).unwrap()
}

/// Stream-mode shell over the bundled engine with the default prompts
pub fn shell(lines: &[&str]) -> (Repl<ScriptEngine>, Captured) {
    let (console, captured) = console(lines);
    let interpreter = Interpreter::new(console.clone(), ScriptEngine::new());
    (Repl::new(console, interpreter, Prompts::default()), captured)
}
