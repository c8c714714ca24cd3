//! Recording collaborators for engine tests.
//! These helpers are public so integration tests can share them.
//! Clones share their recorded state, so a test keeps one handle and gives the
//! other to the engine.

use std::{mem, sync::Arc};

use parking_lot::Mutex;

use crate::{Display, FocusSource, MacroRunner};

/// Display that records every feedback line.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    /// Lines shown so far.
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything shown so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Return and forget everything shown so far.
    pub fn take(&self) -> Vec<String> {
        mem::take(&mut *self.lines.lock())
    }
}

impl Display for RecordingDisplay {
    fn display(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

/// Macro runner that records payloads instead of executing them.
#[derive(Debug)]
pub struct RecordingRunner<M> {
    /// Payloads run so far.
    runs: Arc<Mutex<Vec<M>>>,
}

impl<M> Default for RecordingRunner<M> {
    fn default() -> Self {
        Self {
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<M> Clone for RecordingRunner<M> {
    fn clone(&self) -> Self {
        Self {
            runs: Arc::clone(&self.runs),
        }
    }
}

impl<M: Clone> RecordingRunner<M> {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every payload run so far.
    pub fn runs(&self) -> Vec<M> {
        self.runs.lock().clone()
    }

    /// Return and forget every payload run so far.
    pub fn take(&self) -> Vec<M> {
        mem::take(&mut *self.runs.lock())
    }
}

impl<M: Clone + Send> MacroRunner<M> for RecordingRunner<M> {
    fn run(&self, payload: &M) {
        self.runs.lock().push(payload.clone());
    }
}

/// Focus source whose application can be changed mid-test.
#[derive(Debug, Clone, Default)]
pub struct SwitchableFocus {
    /// Currently reported application.
    app: Arc<Mutex<String>>,
}

impl SwitchableFocus {
    /// Start out reporting `app`.
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: Arc::new(Mutex::new(app.into())),
        }
    }

    /// Report `app` from now on.
    pub fn set(&self, app: impl Into<String>) {
        *self.app.lock() = app.into();
    }
}

impl FocusSource for SwitchableFocus {
    fn active_application(&self) -> String {
        self.app.lock().clone()
    }
}
