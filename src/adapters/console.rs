//! Serial console adapter for the startup configuration gate.
//!
//! Implements [`OperatorConsole`] over any buffered reader.  A small reader
//! thread polls the underlying stream and hands complete lines to the
//! caller over an `mpsc` channel, so the caller can wait with a hard
//! deadline via `recv_timeout`.
//!
//! On ESP-IDF, UART-backed stdin returns immediately when no byte is
//! waiting, so an empty read only means "nothing yet".  A line ends at
//! `'\n'`, or once input has started and no byte arrives for
//! [`LINE_IDLE_GAP`].  Serial monitors that send each keystroke as it is
//! typed therefore still deliver the whole line.
//!
//! The reader thread outlives a timed-out wait.  Dropping the console sets
//! a stop flag; the thread exits at its next poll.

use std::io::{self, BufRead, BufReader, ErrorKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use crate::app::ports::OperatorConsole;

/// Delay between reads while no byte is waiting.
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Silence after the last byte that ends an unterminated line.
pub const LINE_IDLE_GAP: Duration = Duration::from_millis(1_000);

const READER_STACK_SIZE: usize = 4096;

pub struct SerialConsole {
    lines: Receiver<String>,
    stop: Arc<AtomicBool>,
}

impl SerialConsole {
    /// Console over the process stdin.
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(BufReader::new(io::stdin()), POLL_INTERVAL, LINE_IDLE_GAP)
    }

    /// Console over an arbitrary reader.  Spawns the reader thread.
    pub fn spawn<R>(reader: R, poll: Duration, idle_gap: Duration) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        thread::Builder::new()
            .name("console".into())
            .stack_size(READER_STACK_SIZE)
            .spawn(move || {
                LineAssembler::new(idle_gap).run(reader, &tx, &flag, poll);
            })?;

        Ok(Self { lines: rx, stop })
    }
}

impl Drop for SerialConsole {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

impl OperatorConsole for SerialConsole {
    fn read_line(&mut self, timeout_ms: u64) -> Option<String> {
        self.lines.recv_timeout(Duration::from_millis(timeout_ms)).ok()
    }
}

/// Collects bytes until a newline or an idle gap.
struct LineAssembler {
    pending: Vec<u8>,
    last_byte_at: Option<Instant>,
    idle_gap: Duration,
}

impl LineAssembler {
    fn new(idle_gap: Duration) -> Self {
        Self {
            pending: Vec::new(),
            last_byte_at: None,
            idle_gap,
        }
    }

    fn run<R: BufRead>(&mut self, mut reader: R, tx: &Sender<String>, stop: &AtomicBool, poll: Duration) {
        while !stop.load(Ordering::Acquire) {
            let consumed = match reader.fill_buf() {
                Ok([]) => None,
                Ok(buf) => Some(self.take(buf, tx)),
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => None,
                Err(e) => {
                    warn!("console: read failed ({}), giving up", e);
                    return;
                }
            };

            match consumed {
                Some(n) => reader.consume(n),
                None => {
                    self.flush_if_idle(tx);
                    thread::sleep(poll);
                }
            }
        }
    }

    /// Absorb bytes up to and including the first newline.  Returns how
    /// many bytes were used.
    fn take(&mut self, buf: &[u8], tx: &Sender<String>) -> usize {
        self.last_byte_at = Some(Instant::now());
        match buf.iter().position(|&b| b == b'\n') {
            Some(i) => {
                self.pending.extend_from_slice(&buf[..i]);
                self.send(tx);
                i + 1
            }
            None => {
                self.pending.extend_from_slice(buf);
                buf.len()
            }
        }
    }

    fn flush_if_idle(&mut self, tx: &Sender<String>) {
        if self.last_byte_at.is_some_and(|t| t.elapsed() >= self.idle_gap) {
            self.send(tx);
        }
    }

    fn send(&mut self, tx: &Sender<String>) {
        let text = String::from_utf8_lossy(&self.pending)
            .trim_end_matches('\r')
            .to_owned();
        self.pending.clear();
        self.last_byte_at = None;
        // Receiver gone means the gate already timed out.
        let _ = tx.send(text);
    }
}
