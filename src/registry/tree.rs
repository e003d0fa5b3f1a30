//! The command tree
//!
//! Canonical names own their entries; aliases are an indirection table onto
//! those names, so every mutation through an alias lands on the one entry.

use crate::error::{BuildError, BuildResult};
use crate::registry::types::CommandEntry;
use crate::{ALL, DEF};
use indexmap::IndexMap;

/// Result of looking a name up in the tree
#[derive(Debug)]
pub enum Lookup<'a, R> {
    Command(&'a CommandEntry<R>),
    /// Canonical name the alias points to
    Alias(&'a str),
}

/// Mapping from command names (and aliases) to entries
pub struct CommandTree<R> {
    entries: IndexMap<String, CommandEntry<R>>,
    aliases: IndexMap<String, String>,
}

impl<R> Default for CommandTree<R> {
    fn default() -> Self {
        CommandTree {
            entries: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }
}

impl<R> CommandTree<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding only the reserved `__all__` and `__default__` entries
    pub fn with_reserved(default_usage: impl Into<String>) -> Self {
        let mut tree = Self::new();
        tree.entries.insert(ALL.to_string(), CommandEntry::new(""));
        tree.entries
            .insert(DEF.to_string(), CommandEntry::new(default_usage));
        tree
    }

    /// Check whether a name or alias is taken
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name) || self.aliases.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<Lookup<'_, R>> {
        if let Some(entry) = self.entries.get(name) {
            return Some(Lookup::Command(entry));
        }
        self.aliases
            .get(name)
            .map(|canonical| Lookup::Alias(canonical.as_str()))
    }

    /// Get an entry by canonical name or alias
    pub fn get(&self, name: &str) -> Option<&CommandEntry<R>> {
        let canonical = self.canonical(name)?;
        self.entries.get(canonical)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CommandEntry<R>> {
        let canonical = self.canonical(name)?.to_string();
        self.entries.get_mut(&canonical)
    }

    /// Mutable entry for a name or alias, created empty when missing
    pub(crate) fn slot(&mut self, name: &str) -> &mut CommandEntry<R> {
        let canonical = self.canonical(name).unwrap_or(name).to_string();
        self.entries
            .entry(canonical)
            .or_insert_with(|| CommandEntry::new(""))
    }

    /// Resolve a name or alias to its canonical name
    pub fn canonical<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.entries.contains_key(name) {
            return Some(name);
        }
        self.aliases.get(name).map(String::as_str)
    }

    /// Insert a new entry; fails if the name is already taken
    pub fn insert(&mut self, name: &str, entry: CommandEntry<R>) -> BuildResult<()> {
        if self.contains(name) {
            return Err(BuildError::DuplicateCommand(name.to_string()));
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Point `alias` at the canonical command `target`
    pub fn add_alias(&mut self, alias: &str, target: &str) -> BuildResult<()> {
        if self.contains(alias) {
            return Err(BuildError::DuplicateCommand(alias.to_string()));
        }
        let entry = self
            .entries
            .get_mut(target)
            .ok_or(BuildError::AliasBeforeCommand)?;
        entry.aliases.push(alias.to_string());
        self.aliases.insert(alias.to_string(), target.to_string());
        Ok(())
    }

    /// User-registered commands in registration order, aliases and internal
    /// entries excluded
    pub fn commands(&self) -> impl Iterator<Item = (&str, &CommandEntry<R>)> {
        self.entries
            .iter()
            .filter(|(name, _)| !is_internal(name))
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Every name that resolves to something, aliases included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
    }

    /// Number of names in the tree, aliases and internal entries included
    pub fn len(&self) -> usize {
        self.entries.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reserved entries (`__all__`, `__default__`) are never listed or matched
pub fn is_internal(name: &str) -> bool {
    name == ALL || name == DEF || name.starts_with("__")
}
