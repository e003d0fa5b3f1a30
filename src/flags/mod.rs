//! Flag tokenizing
//!
//! This module turns a flat argument slice into an options bag: flag names
//! mapped to typed values plus the leftover positional list. The router only
//! depends on the contract exposed here (`FlagConfig` in, `Argv` out).

pub mod lexer;
pub mod value;

use indexmap::IndexMap;
use std::rc::Rc;

// Re-export main types
pub use lexer::*;
pub use value::*;

/// Callback deciding the message for a rejected flag. Receives the flag as
/// written (e.g. `--bar`); `None` selects the default message.
pub type UnknownHandler = Rc<dyn Fn(&str) -> Option<String>>;

/// Short-to-long alias table, keyed by the alias
pub type AliasMap = IndexMap<String, Vec<String>>;

/// Declared defaults; `None` marks a flag that is known but has no default
pub type DefaultMap = IndexMap<String, Option<Value>>;

/// Configuration for a single tokenizer pass
#[derive(Clone, Default)]
pub struct FlagConfig {
    pub alias: AliasMap,
    pub defaults: DefaultMap,
    /// Enables strict checking when present
    pub unknown: Option<UnknownHandler>,
}

impl FlagConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration used to detect `-h/--help` and `-v/--version`
    pub fn reserved() -> Self {
        let mut config = Self::new();
        config.alias.insert("h".to_string(), vec!["help".to_string()]);
        config
            .alias
            .insert("v".to_string(), vec!["version".to_string()]);
        config
    }

    /// Overlay another scope on top of this one; keys in `other` win
    pub fn overlay(&mut self, alias: &AliasMap, defaults: &DefaultMap) {
        for (key, targets) in alias {
            self.alias.insert(key.clone(), targets.clone());
        }
        for (key, value) in defaults {
            self.defaults.insert(key.clone(), value.clone());
        }
    }
}

impl std::fmt::Debug for FlagConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagConfig")
            .field("alias", &self.alias)
            .field("defaults", &self.defaults)
            .field("strict", &self.unknown.is_some())
            .finish()
    }
}
