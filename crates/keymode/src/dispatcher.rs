//! Incremental chord matching.
//!
//! A [`Dispatcher`] consumes one character at a time and accumulates a buffer
//! until it exactly matches a command code, cannot match any code, or goes
//! stale. It is either idle (empty buffer) or accumulating; no separate state
//! tag is kept. The timeout is checked lazily when the next character arrives.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use crate::{Clock, CommandSet};

/// Idle time after which a partial chord is discarded.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Marker appended to in-progress feedback.
const PENDING_MARKER: &str = " _";

/// Tunables for a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// A gap strictly longer than this between two characters resets the chord.
    pub timeout: Duration,
    /// Emit the full command name as feedback when a chord completes.
    pub announce_completion: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            announce_completion: false,
        }
    }
}

/// Effect requested by the dispatcher, applied by the caller in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResponse<M> {
    /// Replace the feedback line with this text.
    Feedback(String),
    /// A command completed; run its macro.
    Run {
        /// Full name of the completed command.
        name: String,
        /// The configured macro payload.
        payload: M,
    },
}

/// Accumulated input and the time of the last processed character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordState {
    /// Characters typed since the last reset.
    buffer: String,
    /// When the last character was processed (or the state was created).
    last_event: Instant,
}

impl ChordState {
    /// Fresh idle state stamped at `now`.
    fn new(now: Instant) -> Self {
        Self {
            buffer: String::new(),
            last_event: now,
        }
    }

    /// Characters typed since the last reset.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Time of the last processed character.
    pub fn last_event(&self) -> Instant {
        self.last_event
    }
}

/// Chord matcher bound to one scope's command set.
pub struct Dispatcher<M> {
    /// Commands this dispatcher resolves against.
    commands: CommandSet<M>,
    /// Current partial chord.
    state: ChordState,
    /// Time source for timeout evaluation.
    clock: Arc<dyn Clock>,
    /// Timeout and feedback settings.
    options: DispatchOptions,
}

impl<M> Dispatcher<M> {
    /// Create an idle dispatcher over `commands`.
    pub fn new(commands: CommandSet<M>, clock: Arc<dyn Clock>, options: DispatchOptions) -> Self {
        let state = ChordState::new(clock.now());
        Self {
            commands,
            state,
            clock,
            options,
        }
    }

    /// Process one character and return the resulting effects.
    ///
    /// Never fails: input that cannot lead to a command resets the chord.
    pub fn handle_key(&mut self, ch: char) -> Vec<KeyResponse<M>>
    where
        M: Clone,
    {
        let now = self.clock.now();
        let mut out = Vec::new();

        if now.saturating_duration_since(self.state.last_event) > self.options.timeout {
            debug!(buffer = %self.state.buffer, "chord timed out");
            out.push(KeyResponse::Feedback(self.truncated_name()));
            self.state.buffer.clear();
        }

        self.state.last_event = now;
        self.state.buffer.push(ch);
        trace!(buffer = %self.state.buffer, app = ?self.commands.app(), "chord input");

        if !self.commands.has_completion(&self.state.buffer) {
            trace!(buffer = %self.state.buffer, "no command matches, resetting");
            out.push(KeyResponse::Feedback(self.truncated_name()));
            self.state.buffer.clear();
            return out;
        }

        if let Some(cmd) = self.commands.get(&self.state.buffer) {
            debug!(command = %cmd.name, code = %cmd.code, "chord complete");
            if self.options.announce_completion {
                out.push(KeyResponse::Feedback(cmd.name.clone()));
            }
            out.push(KeyResponse::Run {
                name: cmd.name.clone(),
                payload: cmd.payload.clone(),
            });
            self.state.buffer.clear();
            return out;
        }

        out.push(KeyResponse::Feedback(format!(
            "{}{}",
            self.truncated_name(),
            PENDING_MARKER
        )));
        out
    }

    /// Discard any partial chord.
    pub fn reset(&mut self) {
        self.state = ChordState::new(self.clock.now());
    }

    /// Current chord state.
    pub fn state(&self) -> &ChordState {
        &self.state
    }

    /// Characters typed since the last reset.
    pub fn buffer(&self) -> &str {
        &self.state.buffer
    }

    /// True when no chord is in progress.
    pub fn is_idle(&self) -> bool {
        self.state.buffer.is_empty()
    }

    /// The command set this dispatcher matches against.
    pub fn command_set(&self) -> &CommandSet<M> {
        &self.commands
    }

    /// Active options.
    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// The first completion's name clipped to one word per typed character, or
    /// empty when nothing completes the buffer.
    fn truncated_name(&self) -> String {
        let typed = self.state.buffer.chars().count();
        self.commands
            .first_completion(&self.state.buffer)
            .map(|cmd| {
                cmd.name
                    .split_whitespace()
                    .take(typed)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}
