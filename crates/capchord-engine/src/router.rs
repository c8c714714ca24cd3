//! Scope selection.
//!
//! The router owns one dispatcher for the general commands and one per
//! application that defines its own commands. Each dispatcher keeps its own
//! chord state: moving focus to another application leaves a partial chord in
//! the previous scope untouched until that scope sees its next key.

use std::{iter, sync::Arc};

use indexmap::IndexMap;
use keymode::{Clock, CommandSet, DispatchOptions, Dispatcher, KeyResponse};
use tracing::{debug, trace};

use crate::Result;

/// Default dispatcher plus per-application dispatchers, built once.
pub struct Router<M> {
    /// General-scope dispatcher, used when the focused app has no overrides.
    default: Dispatcher<M>,
    /// Application name → dispatcher over general merged with that app's commands.
    apps: IndexMap<String, Dispatcher<M>>,
}

impl<M> Router<M> {
    /// Build every scope up front. Fails on the first scope whose codes are not
    /// prefix-free, checking the general scope before applications.
    pub fn new(
        general: &IndexMap<String, M>,
        app_specific: &IndexMap<String, IndexMap<String, M>>,
        clock: &Arc<dyn Clock>,
        options: DispatchOptions,
    ) -> Result<Self>
    where
        M: Clone,
    {
        let default = Dispatcher::new(
            CommandSet::general(general.clone())?,
            Arc::clone(clock),
            options,
        );
        let mut apps = IndexMap::with_capacity(app_specific.len());
        for (app, overrides) in app_specific {
            let set = CommandSet::for_app(app, general, overrides)?;
            apps.insert(app.clone(), Dispatcher::new(set, Arc::clone(clock), options));
        }
        debug!(apps = apps.len(), "router built");
        Ok(Self { default, apps })
    }

    /// Forward `ch` to the dispatcher for `app`, falling back to the general scope.
    pub fn route(&mut self, app: &str, ch: char) -> Vec<KeyResponse<M>>
    where
        M: Clone,
    {
        let dispatcher = match self.apps.get_mut(app) {
            Some(d) => {
                trace!(app, "routing to application scope");
                d
            }
            None => {
                trace!(app, "routing to general scope");
                &mut self.default
            }
        };
        dispatcher.handle_key(ch)
    }

    /// The dispatcher that handles keys while `app` has focus.
    pub fn dispatcher_for(&self, app: &str) -> &Dispatcher<M> {
        self.apps.get(app).unwrap_or(&self.default)
    }

    /// The general-scope dispatcher.
    pub fn default_dispatcher(&self) -> &Dispatcher<M> {
        &self.default
    }

    /// Applications with their own scope, in configuration order.
    pub fn apps(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    /// Every scope's command set: the general scope first, then applications.
    pub fn command_sets(&self) -> impl Iterator<Item = &CommandSet<M>> {
        iter::once(self.default.command_set())
            .chain(self.apps.values().map(Dispatcher::command_set))
    }
}

/// Build a router from a loaded configuration, taking timeout and feedback
/// options from its settings.
pub fn router_from_config(
    cfg: &config::ChordConfig,
    clock: &Arc<dyn Clock>,
) -> Result<Router<String>> {
    let options = DispatchOptions {
        timeout: cfg.settings.timeout(),
        announce_completion: cfg.settings.announce_completion,
    };
    Router::new(&cfg.general, &cfg.app_specific, clock, options)
}
