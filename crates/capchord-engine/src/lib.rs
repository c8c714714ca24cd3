//! capchord engine
//!
//! Ties the chord matcher to the outside world:
//! - asks a [`FocusSource`] which application has focus for every character
//! - routes the character to that application's dispatcher ([`Router`])
//! - applies the resulting effects in order: feedback to a [`Display`], completed
//!   macros to a [`MacroRunner`]
//!
//! The engine is synchronous. A collaborator that blocks blocks processing; the
//! caller feeds characters one at a time from a single thread.
use std::sync::Arc;

mod deps;
mod error;
mod router;
pub mod shell;
pub mod test_support;

use config::ChordConfig;
use keymode::{Clock, KeyResponse};
use tracing::{info, trace};

pub use deps::{Display, FocusSource, MacroRunner, StaticFocus};
pub use error::{Error, Result};
pub use router::{Router, router_from_config};
pub use shell::{ShellFocus, ShellMacroRunner};

/// Engine owns the router and the three collaborators it drives.
pub struct Engine<M> {
    /// Per-scope dispatchers.
    router: Router<M>,
    /// Feedback sink.
    display: Box<dyn Display>,
    /// Executes completed macros.
    runner: Box<dyn MacroRunner<M>>,
    /// Reports the focused application.
    focus: Box<dyn FocusSource>,
}

impl<M> Engine<M> {
    /// Assemble an engine from a built router and its collaborators.
    pub fn new(
        router: Router<M>,
        display: impl Display + 'static,
        runner: impl MacroRunner<M> + 'static,
        focus: impl FocusSource + 'static,
    ) -> Self {
        Self {
            router,
            display: Box::new(display),
            runner: Box::new(runner),
            focus: Box::new(focus),
        }
    }

    /// Feed one character through the scope of the focused application.
    pub fn process_chord(&mut self, ch: char)
    where
        M: Clone,
    {
        let app = self.focus.active_application();
        trace!(%app, ?ch, "processing character");
        for response in self.router.route(&app, ch) {
            match response {
                KeyResponse::Feedback(text) => self.display.display(&text),
                KeyResponse::Run { name, payload } => {
                    info!(command = %name, %app, "running command");
                    self.runner.run(&payload);
                }
            }
        }
    }

    /// The underlying router.
    pub fn router(&self) -> &Router<M> {
        &self.router
    }
}

impl Engine<String> {
    /// Build an engine from a loaded configuration: every scope is validated up
    /// front, and macros and focus detection use the configured shell commands.
    ///
    /// `focus` overrides the configured focus command when given.
    pub fn from_config(
        cfg: &ChordConfig,
        clock: &Arc<dyn Clock>,
        display: impl Display + 'static,
        focus: Option<Box<dyn FocusSource>>,
    ) -> Result<Self> {
        let router = router_from_config(cfg, clock)?;
        let runner = ShellMacroRunner::from_settings(&cfg.settings);
        let focus: Box<dyn FocusSource> = match focus {
            Some(f) => f,
            None => match ShellFocus::from_settings(&cfg.settings)? {
                Some(f) => Box::new(f),
                None => Box::new(StaticFocus::default()),
            },
        };
        Ok(Self {
            router,
            display: Box::new(display),
            runner: Box::new(runner),
            focus,
        })
    }
}
