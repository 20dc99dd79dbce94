//! Terminal line source.
//!
//! A helper thread reads stdin line by line and forwards each line over a
//! channel.  The quiz thread blocks on the channel rather than on stdin,
//! so the interrupt handler can post [`InputLine::Cancelled`] into the
//! same channel and end a prompt that is waiting for input.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, warn};

use crate::adapters::interrupt::CancelSignal;
use crate::app::ports::{InputLine, LineSource};

pub struct TerminalInput {
    rx: Receiver<InputLine>,
    tx: Sender<InputLine>,
    signal: CancelSignal,
    closed: bool,
}

impl TerminalInput {
    /// Start the stdin reader thread.
    pub fn spawn(signal: CancelSignal) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || read_lines(io::stdin().lock(), &reader_tx))?;
        Ok(Self::from_channel(tx, rx, signal))
    }

    fn from_channel(tx: Sender<InputLine>, rx: Receiver<InputLine>, signal: CancelSignal) -> Self {
        Self {
            rx,
            tx,
            signal,
            closed: false,
        }
    }

    /// Sender the interrupt handler uses to wake a blocked prompt.
    pub fn interrupt_sender(&self) -> Sender<InputLine> {
        self.tx.clone()
    }
}

/// Forward every line of `input` to `tx`, then a final
/// [`InputLine::Closed`].
fn read_lines(input: impl BufRead, tx: &Sender<InputLine>) {
    for line in input.lines() {
        let item = match line {
            Ok(text) => InputLine::Line(text),
            // Non-UTF-8 bytes count as a line that is not a number.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => InputLine::Line(String::new()),
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        };
        if tx.send(item).is_err() {
            return;
        }
    }
    debug!("stdin reached end of stream");
    let _ = tx.send(InputLine::Closed);
}

impl LineSource for TerminalInput {
    fn next_line(&mut self) -> InputLine {
        if self.signal.is_raised() {
            return InputLine::Cancelled;
        }
        if self.closed {
            return InputLine::Closed;
        }
        match self.rx.recv() {
            Ok(InputLine::Closed) | Err(_) => {
                self.closed = true;
                InputLine::Closed
            }
            Ok(item) => item,
        }
    }
}
