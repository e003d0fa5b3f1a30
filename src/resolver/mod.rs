//! Command resolution and dispatch
//!
//! A parse runs in fixed stages: find the command named by the leading
//! positionals (longest match, aliases spliced back to canonical words), fall
//! back to the default command, short-circuit `--help`/`--version`, merge the
//! three option scopes, tokenize the rest, bind placeholders and call the
//! handler.

pub mod options;
pub mod outcome;

// Re-export main types
pub use options::*;
pub use outcome::*;

use crate::error::{ParseError, ParseResult};
use crate::flags::{tokenize, Argv, FlagConfig};
use crate::help;
use crate::registry::{is_internal, Lookup, Program};
use crate::{ALL, DEF};
use log::debug;
use std::process;

/// How the leading positionals resolved
#[derive(Debug, Default)]
struct Resolution {
    /// Canonical command name
    name: Option<String>,
    /// Leading positionals that spell the name
    consumed: usize,
    /// Nothing matched and the default command stepped in
    fallback: bool,
}

impl<R> Program<R> {
    /// Resolve and dispatch without touching the process: help and version
    /// text come back in the `Outcome`, user errors as `ParseError`.
    pub fn try_parse<I, S>(&self, args: I, opts: ParseOptions) -> ParseResult<Outcome<R>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv: Vec<String> = args
            .into_iter()
            .map(Into::into)
            .skip(opts.offset)
            .collect();
        let mut scan = tokenize(&argv, &FlagConfig::reserved())?;

        let resolution = if self.single {
            Resolution::default()
        } else {
            self.resolve(&mut argv, &mut scan)?
        };

        // before flag validation, so malformed flags never block help
        if scan.flag("help") {
            let key = if self.single || resolution.fallback {
                None
            } else {
                resolution.name.as_deref()
            };
            return Ok(Outcome::Help(self.help(key)));
        }
        if scan.flag("version") {
            return Ok(Outcome::Version(format!("{}, {}", self.bin, self.ver)));
        }

        let key = if self.single {
            DEF.to_string()
        } else {
            resolution.name.clone().ok_or(ParseError::NoCommand)?
        };
        let cmd = self
            .tree
            .get(&key)
            .ok_or_else(|| ParseError::InvalidCommand(key.clone()))?;

        let mut config = FlagConfig::new();
        if let Some(all) = self.tree.get(ALL) {
            config.overlay(&all.option_aliases, &all.defaults);
        }
        config.overlay(&cmd.option_aliases, &cmd.defaults);
        config.overlay(&opts.alias, &opts.defaults);
        config.unknown = opts.unknown.clone();

        for &slot in scan.positions[..resolution.consumed].iter().rev() {
            argv.remove(slot);
        }

        let mut vals = tokenize(&argv, &config)?;
        let (args, rest) = bind(&mut vals, cmd.arity()).ok_or_else(|| {
            ParseError::InsufficientArguments {
                command: resolution.name.clone(),
            }
        })?;
        vals.positionals = rest;
        vals.positions.clear();

        let name = resolution.name.unwrap_or_default();
        let handler = cmd.handler.clone().ok_or_else(|| {
            ParseError::MissingHandler(if name.is_empty() {
                self.bin.clone()
            } else {
                name.clone()
            })
        })?;

        if opts.lazy {
            debug!("deferring {:?} with {:?}", name, args);
            return Ok(Outcome::Deferred(Deferred {
                name,
                args,
                opts: vals,
                handler,
            }));
        }

        debug!("dispatching {:?} with {:?}", name, args);
        Ok(Outcome::Ran(handler(args, vals)))
    }

    /// Like `try_parse`, but prints help/version to stdout and, on a user
    /// error, prints the error block to stderr and exits the process
    pub fn parse<I, S>(&self, args: I, opts: ParseOptions) -> Outcome<R>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let code = opts.exit_code;
        match self.try_parse(args, opts) {
            Ok(outcome) => {
                if let Some(text) = outcome.text() {
                    println!("{}", text);
                }
                outcome
            }
            Err(err) => {
                debug!("parse failed: {:?}", err);
                eprintln!(
                    "{}",
                    help::error_block(&err.help_target(&self.bin), &err.to_string())
                );
                process::exit(code);
            }
        }
    }

    /// Parse the current process arguments
    pub fn parse_env(&self, opts: ParseOptions) -> Outcome<R> {
        self.parse(std::env::args(), opts)
    }

    /// Find the longest run of leading positionals naming a command
    fn resolve(&self, argv: &mut Vec<String>, scan: &mut Argv) -> ParseResult<Resolution> {
        let mut name: Option<String> = None;
        let mut consumed = 0;
        let mut candidate = String::new();
        let mut i = 1;

        while i <= scan.positionals.len() {
            candidate = scan.positionals[..i].join(" ");
            match self.tree.lookup(&candidate) {
                Some(Lookup::Alias(canonical)) => {
                    let words: Vec<String> = canonical.split(' ').map(str::to_string).collect();
                    debug!("alias {:?} resolves to {:?}", candidate, canonical);
                    splice(argv, &scan.positions[..i], &words);
                    *scan = tokenize(argv, &FlagConfig::reserved())?;
                    i = words.len();
                    consumed = i;
                    name = Some(canonical.to_string());
                }
                Some(Lookup::Command(_)) if !is_internal(&candidate) => {
                    name = Some(candidate.clone());
                    consumed = i;
                }
                _ if name.is_some() => break,
                _ => {}
            }
            i += 1;
        }

        if let Some(name) = name {
            debug!("matched command {:?}", name);
            return Ok(Resolution {
                name: Some(name),
                consumed,
                fallback: false,
            });
        }

        match &self.default {
            Some(default) => {
                debug!("no command matched, using default {:?}", default);
                Ok(Resolution {
                    name: Some(default.clone()),
                    consumed: 0,
                    fallback: true,
                })
            }
            None if !candidate.is_empty() => Err(ParseError::InvalidCommand(candidate)),
            None => Ok(Resolution::default()),
        }
    }
}

/// Replace the tokens at `slots` with `words`, placed where the first was
fn splice(argv: &mut Vec<String>, slots: &[usize], words: &[String]) {
    let Some(&first) = slots.first() else {
        return;
    };
    for &slot in slots.iter().rev() {
        argv.remove(slot);
    }
    argv.splice(first..first, words.iter().cloned());
}

/// Bind leftover positionals to placeholders: every required slot first,
/// then one per optional slot while any remain. Returns the bound values and
/// the unconsumed rest, or `None` when required slots go unfilled.
fn bind(
    vals: &mut Argv,
    (required, optional): (usize, usize),
) -> Option<(Vec<Option<String>>, Vec<String>)> {
    if vals.positionals.len() < required {
        return None;
    }
    let mut rest = std::mem::take(&mut vals.positionals).into_iter();
    let mut args: Vec<Option<String>> = rest.by_ref().take(required).map(Some).collect();
    args.extend((0..optional).map(|_| rest.next()));
    Some((args, rest.collect()))
}
