//! Caller-supplied parse configuration

use crate::flags::{AliasMap, DefaultMap, UnknownHandler, Value};
use std::fmt;
use std::rc::Rc;

/// Settings for one `parse`/`try_parse` call
#[derive(Clone)]
pub struct ParseOptions {
    /// Leading reserved slots of the raw vector (executable, script path)
    pub offset: usize,

    /// Return a deferred call instead of running the handler
    pub lazy: bool,

    /// Caller-scope aliases; override command and global ones
    pub alias: AliasMap,

    /// Caller-scope defaults; override command and global ones
    pub defaults: DefaultMap,

    /// Reject undeclared flags, with an optional custom message
    pub unknown: Option<UnknownHandler>,

    /// Exit status used by `parse` on user errors
    pub exit_code: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            offset: 1,
            lazy: false,
            alias: AliasMap::new(),
            defaults: DefaultMap::new(),
            unknown: None,
            exit_code: 1,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many leading slots to ignore
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Add a caller-scope alias, e.g. `alias("x", ["extra"])`
    pub fn alias<I, S>(mut self, short: &str, long: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias
            .insert(short.to_string(), long.into_iter().map(Into::into).collect());
        self
    }

    /// Add a caller-scope default value
    pub fn default_value(mut self, flag: &str, value: impl Into<Value>) -> Self {
        self.defaults.insert(flag.to_string(), Some(value.into()));
        self
    }

    /// Enable strict flag checking. The callback receives the flag as written
    /// and may return a custom error message.
    pub fn unknown<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.unknown = Some(Rc::new(handler));
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("offset", &self.offset)
            .field("lazy", &self.lazy)
            .field("alias", &self.alias)
            .field("defaults", &self.defaults)
            .field("strict", &self.unknown.is_some())
            .field("exit_code", &self.exit_code)
            .finish()
    }
}
