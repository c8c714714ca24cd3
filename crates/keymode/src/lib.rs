//! Chord resolution core.
//!
//! Command names mark their chord letters with capitals ([`codec`]). Each scope's
//! commands are validated into a prefix-free [`CommandSet`] backed by a
//! [`PrefixIndex`], and a [`Dispatcher`] matches keystrokes against it one
//! character at a time.

mod clock;
pub mod codec;
mod command_set;
mod dispatcher;
mod error;
mod index;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command_set::{Command, CommandSet};
pub use dispatcher::{ChordState, DEFAULT_TIMEOUT, DispatchOptions, Dispatcher, KeyResponse};
pub use error::{Error, Result};
pub use index::{Completions, IndexError, PrefixIndex};
