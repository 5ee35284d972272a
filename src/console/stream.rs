//! Stream-backed console

use std::cell::{Ref, RefCell};
use std::io::{self, BufRead, Write};

use super::{strip_line_ending, Console};
use crate::tlog;
use crate::util::i18n::MSG;

/// Console over a reader and a writer.
///
/// Every write is flushed so a prompt is visible before the next blocking read.
#[derive(Debug)]
pub struct StreamConsole<R, W> {
    reader: RefCell<R>,
    writer: RefCell<W>,
}

/// Console on the process's standard input and output
pub type StdioConsole = StreamConsole<io::StdinLock<'static>, io::Stdout>;

impl StdioConsole {
    /// Console on stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    /// Create a console over the given streams
    pub fn new(
        reader: R,
        writer: W,
    ) -> Self {
        Self {
            reader: RefCell::new(reader),
            writer: RefCell::new(writer),
        }
    }

    /// Borrow the writer, e.g. to inspect captured output
    pub fn writer(&self) -> Ref<'_, W> {
        self.writer.borrow()
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match self.reader.borrow_mut().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                strip_line_ending(&mut line);
                Some(line)
            }
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
        let mut writer = self.writer.borrow_mut();
        if let Err(e) = writer.write_all(text.as_bytes()).and_then(|_| writer.flush()) {
            tlog!(debug, MSG::ConsoleWriteFailed, &e);
        }
    }
}
