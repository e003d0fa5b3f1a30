//! Command registration
//!
//! `Program` is a builder over the command tree. `command()` moves the
//! current-command cursor; `option()`, `describe()`, `alias()`, `example()`
//! and `action()` apply to whatever the cursor points at.

pub mod parse;
pub mod tree;
pub mod types;

// Re-export main types
pub use parse::*;
pub use tree::*;
pub use types::*;

use crate::error::{BuildError, BuildResult, ModeMisuse};
use crate::flags::{Argv, Value};
use crate::help;
use crate::{ALL, DEF};
use log::debug;
use std::rc::Rc;

/// A command-line program: its name, version and command tree
pub struct Program<R = ()> {
    pub(crate) bin: String,
    pub(crate) ver: String,
    pub(crate) tree: CommandTree<R>,
    pub(crate) default: Option<String>,
    pub(crate) single: bool,
    curr: Option<String>,
}

impl<R> Program<R> {
    /// Create a program. A name with extra tokens (`"bin <type> [dir]"`)
    /// selects single-command mode with that usage.
    pub fn new(name: &str) -> Self {
        Self::with_mode(name, false)
    }

    /// Create a program that behaves as one command
    pub fn single(name: &str) -> Self {
        Self::with_mode(name, true)
    }

    fn with_mode(name: &str, single: bool) -> Self {
        let mut tokens = name.split_whitespace();
        let bin = tokens.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = tokens.collect();
        let single = single || !rest.is_empty();

        let usage = if single {
            rest.join(" ")
        } else {
            "<command>".to_string()
        };

        let tree = CommandTree::with_reserved(usage);
        debug!("created program {:?} (single: {})", bin, single);

        Program {
            bin,
            ver: "0.0.0".to_string(),
            tree,
            default: None,
            single,
            curr: None,
        }
    }

    /// Register a command by usage pattern, e.g. `remote add <name> [url]`
    pub fn command(&mut self, usage: &str) -> BuildResult<&mut Self> {
        self.command_with(usage, "", CommandOpts::default())
    }

    /// Register a command with a description and extra settings
    pub fn command_with(
        &mut self,
        usage: &str,
        description: &str,
        opts: CommandOpts,
    ) -> BuildResult<&mut Self> {
        if self.single {
            return Err(BuildError::Mode(ModeMisuse::Command));
        }

        let pattern = UsagePattern::parse(usage);
        if pattern.name.is_empty() {
            return Err(BuildError::MissingName(usage.to_string()));
        }

        self.tree
            .insert(&pattern.name, CommandEntry::new(pattern.usage()))?;
        debug!("registered command {:?}", pattern.name);

        self.curr = Some(pattern.name.clone());
        if opts.default {
            debug!("default command is now {:?}", pattern.name);
            self.default = Some(pattern.name);
        }

        if !opts.alias.is_empty() {
            self.alias(opts.alias)?;
        }
        if !description.is_empty() {
            self.describe(description);
        }

        Ok(self)
    }

    /// Describe the current command (or the program), split into sentences
    pub fn describe(&mut self, text: &str) -> &mut Self {
        self.describe_lines(help::sentences(text))
    }

    /// Describe the current command with pre-split lines
    pub fn describe_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        self.scope_mut(DEF).description = lines;
        self
    }

    /// Declare an option on the current command, or globally before any
    /// command is registered
    pub fn option(&mut self, flags: &str, description: &str) -> &mut Self {
        self.add_option(flags, description, None)
    }

    /// Declare an option with a default value
    pub fn option_default(
        &mut self,
        flags: &str,
        description: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.add_option(flags, description, Some(value.into()))
    }

    fn add_option(&mut self, flags: &str, description: &str, value: Option<Value>) -> &mut Self {
        let spec = FlagSpec::parse(flags);
        debug!(
            "declared option {:?} on {:?}",
            spec.display(),
            self.curr.as_deref().unwrap_or(ALL)
        );
        self.scope_mut(ALL).add_option(&spec, description, value);
        self
    }

    /// Attach the handler for the current command
    pub fn action<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Vec<Option<String>>, Argv) -> R + 'static,
    {
        self.scope_mut(DEF).handler = Some(Rc::new(handler));
        self
    }

    /// Register alternate names for the current command
    pub fn alias<I, S>(&mut self, names: I) -> BuildResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.single {
            return Err(BuildError::Mode(ModeMisuse::Alias));
        }
        let target = self.curr.clone().ok_or(BuildError::AliasBeforeCommand)?;

        for name in names {
            let name: String = name.into();
            self.tree.add_alias(&name, &target)?;
            debug!("aliased {:?} to {:?}", name, target);
        }
        Ok(self)
    }

    /// Add a literal example invocation to the current command
    pub fn example(&mut self, text: &str) -> &mut Self {
        self.scope_mut(DEF).examples.push(text.to_string());
        self
    }

    /// Set the version printed by `-v/--version`
    pub fn version(&mut self, text: &str) -> &mut Self {
        self.ver = text.to_string();
        self
    }

    /// Render help for a command, or for the program when `None`
    pub fn help(&self, command: Option<&str>) -> String {
        let key = command
            .and_then(|name| self.tree.canonical(name))
            .unwrap_or(DEF);
        help::render(&self.bin, &self.tree, key, self.single)
    }

    pub fn print_help(&self, command: Option<&str>) {
        println!("{}", self.help(command));
    }

    pub fn name(&self) -> &str {
        &self.bin
    }

    pub fn version_text(&self) -> &str {
        &self.ver
    }

    pub fn tree(&self) -> &CommandTree<R> {
        &self.tree
    }

    pub fn default_command(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// The cursor's entry, or `fallback` when no command is active
    fn scope_mut(&mut self, fallback: &str) -> &mut CommandEntry<R> {
        let key = self.curr.as_deref().unwrap_or(fallback).to_string();
        self.tree.slot(&key)
    }
}
