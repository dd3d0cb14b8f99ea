//! Terminal notifier and navigator

use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use crumb::actions::{Navigator, Notifier};
use tracing::warn;

/// Notifications on a terminal. Success goes to `out`, errors to `err`, and
/// confirmations are read from `input` unless `assume_yes` is set.
#[derive(Debug)]
pub(crate) struct TerminalNotifier<O, E, I> {
    out: RefCell<O>,
    err: RefCell<E>,
    input: RefCell<I>,
    assume_yes: bool,
}

impl TerminalNotifier<io::Stdout, io::Stderr, io::StdinLock<'static>> {
    pub(crate) fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), io::stdin().lock(), assume_yes)
    }
}

impl<O: Write, E: Write, I: BufRead> TerminalNotifier<O, E, I> {
    pub(crate) fn new(out: O, err: E, input: I, assume_yes: bool) -> Self {
        Self {
            out: RefCell::new(out),
            err: RefCell::new(err),
            input: RefCell::new(input),
            assume_yes,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

fn write_line(writer: &mut impl Write, message: &str) {
    if let Err(error) = writeln!(writer, "{message}") {
        warn!(%error, "failed to write notification");
    }
}

impl<O: Write, E: Write, I: BufRead> Notifier for TerminalNotifier<O, E, I> {
    fn success(&self, message: &str) {
        write_line(&mut *self.out.borrow_mut(), message);
    }

    fn error(&self, message: &str) {
        write_line(&mut *self.err.borrow_mut(), message);
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        {
            let mut out = self.out.borrow_mut();

            if let Err(error) = write!(out, "{question} [y/N] ").and_then(|()| out.flush()) {
                warn!(%error, "failed to write prompt");
            }
        }

        let mut answer = String::new();

        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(error) => {
                warn!(%error, "failed to read confirmation");

                false
            }
        }
    }
}

/// Stands in for page navigation: waits out the delay, then says where the
/// customer would land.
#[derive(Debug)]
pub(crate) struct TerminalNavigator<O> {
    out: RefCell<O>,
}

impl TerminalNavigator<io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<O: Write> TerminalNavigator<O> {
    pub(crate) fn new(out: O) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> O {
        self.out.into_inner()
    }
}

impl<O: Write> Navigator for TerminalNavigator<O> {
    fn redirect(&self, target: &str, delay: Duration) {
        thread::sleep(delay);

        write_line(&mut *self.out.borrow_mut(), &format!("Returning to {target}"));
    }
}
