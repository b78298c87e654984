//! Blocking dialog backend

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use tracing::warn;

use super::{format_message, Acknowledgement, Level, Notifier};

/// A modal, blocking acknowledgement primitive
///
/// `alert` returns only once the user has dismissed the text.
pub trait Dialog {
    fn alert(&self, text: &str) -> io::Result<()>;
}

/// Notifier that shows every message in a blocking dialog
pub struct DialogNotifier<D> {
    dialog: D,
}

impl<D: Dialog> DialogNotifier<D> {
    pub fn new(dialog: D) -> Self {
        Self { dialog }
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }
}

impl<D: Dialog> Notifier for DialogNotifier<D> {
    fn notify(&self, level: Level, message: &str) -> Acknowledgement {
        match self.dialog.alert(&format_message(level, message)) {
            Ok(()) => Acknowledgement::Dismissed,
            Err(e) => {
                warn!(%level, error = %e, "dialog could not be shown");
                Acknowledgement::Dropped
            }
        }
    }
}

/// Dialog rendered on a terminal: prints the text, then waits for Enter
pub struct TerminalDialog<R, W> {
    io: RefCell<(R, W)>,
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: RefCell::new((input, output)),
        }
    }

    /// Hands back the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }
}

impl<R: BufRead, W: Write> Dialog for TerminalDialog<R, W> {
    fn alert(&self, text: &str) -> io::Result<()> {
        let mut io = self.io.borrow_mut();
        let (input, output) = &mut *io;

        writeln!(output, "{}", text)?;
        write!(output, "[Enter] ")?;
        output.flush()?;

        // EOF counts as dismissal
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(())
    }
}

/// Dialog on the process's own terminal
///
/// Reads through the shared stdin buffer, so it interleaves with other line readers.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioDialog;

impl Dialog for StdioDialog {
    fn alert(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        write!(stdout, "[Enter] ")?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(())
    }
}
