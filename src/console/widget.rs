//! Widget-backed console

use std::cell::RefCell;
use std::rc::Rc;

use super::Console;
use crate::tui::components::OutputConsole;

/// Console whose output is a windowed text surface.
///
/// Input is not read synchronously: the host event loop hands each submitted line
/// to [`Repl::submit`](crate::repl::Repl::submit). `read_line` is a stub that
/// returns an empty line immediately.
#[derive(Debug, Clone)]
pub struct WidgetConsole {
    surface: Rc<RefCell<OutputConsole>>,
}

impl WidgetConsole {
    /// Create a console writing into the given output control
    pub fn new(surface: Rc<RefCell<OutputConsole>>) -> Self {
        Self { surface }
    }

    /// The output control this console writes to
    pub fn surface(&self) -> &Rc<RefCell<OutputConsole>> {
        &self.surface
    }
}

impl Console for WidgetConsole {
    fn read_line(&self) -> Option<String> {
        Some(String::new())
    }

    fn write(
        &self,
        text: &str,
    ) {
        self.surface.borrow_mut().append(text);
    }
}
