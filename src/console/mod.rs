//! Console abstraction
//!
//! All session output goes through exactly one [`Console`], built once by the host
//! and shared (as an [`Rc`]) between the driver and the evaluation engine.
//!
//! - [`StreamConsole`] - blocking reads from any `BufRead`, writes to any `Write`
//! - [`EditorConsole`] - stdin/stdout through rustyline, with history
//! - [`WidgetConsole`] - output appended to a windowed text surface; input is pushed
//!   in by the host event loop through [`Repl::submit`](crate::repl::Repl::submit)

use std::rc::Rc;

mod editor;
mod stream;
mod widget;

pub use editor::EditorConsole;
pub use stream::{StdioConsole, StreamConsole};
pub use widget::WidgetConsole;

/// Capability set shared by every presentation mode
pub trait Console {
    /// Next line of input without its line terminator.
    ///
    /// `None` means no more input (end of stream or a failed read).
    fn read_line(&self) -> Option<String>;

    /// Emit text. Never fails from the caller's point of view.
    fn write(
        &self,
        text: &str,
    );

    /// Emit text followed by a newline
    fn writeln(
        &self,
        text: &str,
    ) {
        self.write(text);
        self.write("\n");
    }
}

/// The process-wide console handle
pub type SharedConsole = Rc<dyn Console>;

/// Strip one trailing `\n` or `\r\n`
pub(crate) fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
