//! Parse results

use crate::flags::Argv;
use crate::registry::Handler;
use std::fmt;

/// What a successful parse produced
pub enum Outcome<R> {
    /// Rendered help text
    Help(String),
    /// `<bin>, <version>`
    Version(String),
    /// The handler ran and returned this
    Ran(R),
    /// Lazy mode: everything needed to run the handler later
    Deferred(Deferred<R>),
}

impl<R> Outcome<R> {
    /// The handler's return value, if it ran
    pub fn into_ran(self) -> Option<R> {
        match self {
            Outcome::Ran(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_deferred(self) -> Option<Deferred<R>> {
        match self {
            Outcome::Deferred(deferred) => Some(deferred),
            _ => None,
        }
    }

    /// Help or version text, if that is what was requested
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Help(text) | Outcome::Version(text) => Some(text),
            _ => None,
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Outcome<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Help(text) => f.debug_tuple("Help").field(text).finish(),
            Outcome::Version(text) => f.debug_tuple("Version").field(text).finish(),
            Outcome::Ran(value) => f.debug_tuple("Ran").field(value).finish(),
            Outcome::Deferred(deferred) => f.debug_tuple("Deferred").field(deferred).finish(),
        }
    }
}

/// A resolved command whose handler has not been called yet
pub struct Deferred<R> {
    /// Canonical command name (empty in single-command mode)
    pub name: String,
    /// Bound positionals
    pub args: Vec<Option<String>>,
    /// Options bag, passed last
    pub opts: Argv,
    pub handler: Handler<R>,
}

impl<R> Deferred<R> {
    /// Run the handler
    pub fn call(self) -> R {
        (self.handler)(self.args, self.opts)
    }
}

impl<R> fmt::Debug for Deferred<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}
