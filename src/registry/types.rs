//! Core registry types
//!
//! This module defines the records that make up a command tree.

use crate::flags::{AliasMap, Argv, DefaultMap, Value};
use crate::registry::parse::{placeholder_counts, FlagSpec};
use std::fmt;
use std::rc::Rc;

/// A command handler: bound positionals (required first, then optional) and
/// the options bag, which always comes last
pub type Handler<R> = Rc<dyn Fn(Vec<Option<String>>, Argv) -> R>;

/// One declared option, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// e.g. `-f, --force`
    pub flags: String,
    pub description: String,
    pub default: Option<Value>,
}

/// A registered command. Aliases resolve to the same entry.
pub struct CommandEntry<R> {
    /// Name words followed by placeholders
    pub usage: String,

    /// Alternate names, in registration order
    pub aliases: Vec<String>,

    pub options: Vec<OptionSpec>,

    /// Short flag to canonical long flag(s)
    pub option_aliases: AliasMap,

    /// Canonical flag to declared default (`None` = known, no default)
    pub defaults: DefaultMap,

    /// Description, one sentence per item
    pub description: Vec<String>,

    pub examples: Vec<String>,

    pub handler: Option<Handler<R>>,
}

impl<R> CommandEntry<R> {
    pub fn new(usage: impl Into<String>) -> Self {
        CommandEntry {
            usage: usage.into(),
            aliases: Vec::new(),
            options: Vec::new(),
            option_aliases: AliasMap::new(),
            defaults: DefaultMap::new(),
            description: Vec::new(),
            examples: Vec::new(),
            handler: None,
        }
    }

    /// Declare an option on this command
    pub fn add_option(&mut self, spec: &FlagSpec, description: &str, default: Option<Value>) {
        if let Some(short) = &spec.short {
            self.option_aliases
                .entry(short.clone())
                .or_default()
                .push(spec.long.clone());
        }

        match &default {
            Some(value) => {
                self.defaults.insert(spec.long.clone(), Some(value.clone()));
            }
            None if spec.short.is_none() => {
                self.defaults.insert(spec.long.clone(), None);
            }
            None => {}
        }

        self.options.push(OptionSpec {
            flags: spec.display(),
            description: description.to_string(),
            default,
        });
    }

    /// Number of required and optional placeholders in the usage
    pub fn arity(&self) -> (usize, usize) {
        placeholder_counts(&self.usage)
    }

    /// First description sentence, or an empty string
    pub fn summary(&self) -> &str {
        self.description.first().map(String::as_str).unwrap_or("")
    }
}

impl<R> fmt::Debug for CommandEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("usage", &self.usage)
            .field("aliases", &self.aliases)
            .field("options", &self.options)
            .field("option_aliases", &self.option_aliases)
            .field("defaults", &self.defaults)
            .field("description", &self.description)
            .field("examples", &self.examples)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Extra settings for `Program::command_with`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOpts {
    pub alias: Vec<String>,
    /// Use this command when no leading token matches; the last command
    /// registered with this flag wins
    pub default: bool,
}

impl CommandOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alternate name
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias.push(name.into());
        self
    }

    /// Mark the command as the fallback for unqualified invocations
    pub fn default_command(mut self) -> Self {
        self.default = true;
        self
    }
}
