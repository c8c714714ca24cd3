//! Keystroke source: a reader thread feeding characters into a channel.
//!
//! Bytes are decoded as soon as `read` returns them, so every keystroke reaches
//! the engine (and is timestamped) when it arrives, not when a line ends. The
//! channel keeps keystrokes in arrival order; the main thread drains it and
//! owns the engine, so processing stays single-threaded.

use std::{
    io::{ErrorKind, Read},
    str, thread,
};

use crossbeam_channel::{Receiver, unbounded};
use tracing::{debug, warn};

/// Bytes requested per `read` call.
const READ_CHUNK: usize = 64;

/// Spawn a thread that reads `reader` and sends every non-control character
/// as soon as it is complete. The channel closes at end of input.
pub fn spawn_reader<R>(mut reader: R) -> Receiver<char>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let mut buf = [0u8; READ_CHUNK];
        let mut pending = Vec::new();
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "stopped reading input");
                    break;
                }
            };
            pending.extend_from_slice(&buf[..n]);
            for ch in drain_chars(&mut pending) {
                if tx.send(ch).is_err() {
                    return;
                }
            }
        }
        if !pending.is_empty() {
            warn!(bytes = pending.len(), "input ended inside a UTF-8 sequence");
        }
        debug!("input closed");
    });
    rx
}

/// Decode every complete character at the front of `pending`, dropping control
/// characters and invalid bytes. A trailing incomplete sequence stays in
/// `pending` until more bytes arrive.
fn drain_chars(pending: &mut Vec<u8>) -> Vec<char> {
    let mut out = Vec::new();
    loop {
        let (valid, error_len) = match str::from_utf8(pending) {
            Ok(_) => (pending.len(), None),
            Err(e) => (e.valid_up_to(), Some(e.error_len())),
        };
        out.extend(
            String::from_utf8_lossy(&pending[..valid])
                .chars()
                .filter(|c| !c.is_control()),
        );
        match error_len {
            None => {
                pending.clear();
                break;
            }
            Some(None) => {
                pending.drain(..valid);
                break;
            }
            Some(Some(bad)) => {
                warn!(bytes = bad, "skipping invalid UTF-8 input");
                pending.drain(..valid + bad);
            }
        }
    }
    out
}
