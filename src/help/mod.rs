//! Help and error text rendering
//!
//! Rendering never mutates the tree: the `[options]` suffix and the synthetic
//! `--help`/`--version` rows are added to a local copy, so rendering the same
//! command twice yields identical text.

use crate::flags::Value;
use crate::registry::{CommandTree, OptionSpec};
use crate::DEF;
use once_cell::sync::Lazy;
use regex::Regex;

/// Gap between the flag column and the description column
const GAP: usize = 4;
const INDENT: &str = "  ";
const NL: &str = "\n";

/// Sentence end followed by an uppercase letter
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?!]\s*[A-Z]").expect("valid sentence regex"));

/// Split free text into sentences. A break needs `.`, `?` or `!` followed
/// (after optional whitespace) by an uppercase letter, so `$125.00` and
/// lowercase continuations stay intact.
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;

    for found in SENTENCE_BREAK.find_iter(text) {
        out.push(text[start..found.start() + 1].to_string());
        // the uppercase letter is ASCII, one byte
        start = found.end() - 1;
    }
    out.push(text[start..].to_string());
    out
}

/// A titled block of indented lines; empty when there are no lines
fn section(title: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = format!("{}{}{}", NL, INDENT, title);
    for line in lines {
        out.push_str(NL);
        out.push_str(INDENT);
        out.push_str(INDENT);
        out.push_str(line);
    }
    out.push_str(NL);
    out
}

/// Align rows into two columns; the left column is as wide as its longest
/// entry plus `GAP`
fn columns(rows: &[(String, String, Option<Value>)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(left, _, _)| left.chars().count())
        .max()
        .unwrap_or(0)
        + GAP;

    rows.iter()
        .map(|(left, right, default)| {
            let mut line = format!("{:<width$}{}", left, right, width = width);
            if let Some(value) = default {
                line.push_str(&format!("  (default {})", value));
            }
            line
        })
        .collect()
}

fn option_rows(options: &[OptionSpec]) -> Vec<(String, String, Option<Value>)> {
    options
        .iter()
        .map(|opt| (opt.flags.clone(), opt.description.clone(), opt.default.clone()))
        .collect()
}

fn synthetic(flags: &str, description: &str) -> OptionSpec {
    OptionSpec {
        flags: flags.to_string(),
        description: description.to_string(),
        default: None,
    }
}

/// Render the help text for `key` (a canonical command name or `__default__`)
pub fn render<R>(bin: &str, tree: &CommandTree<R>, key: &str, single: bool) -> String {
    let (key, cmd) = match tree.get(key) {
        Some(cmd) => (key, cmd),
        None => match tree.get(DEF) {
            Some(cmd) => (DEF, cmd),
            None => return String::new(),
        },
    };
    let prefix = |text: &str| {
        format!("$ {} {}", bin, text)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    };

    // command options, then global options, then the synthetic rows
    let mut options: Vec<OptionSpec> = cmd.options.clone();
    if let Some(all) = tree.get(crate::ALL) {
        options.extend(all.options.iter().cloned());
    }
    if key == DEF {
        options.push(synthetic("-v, --version", "Displays current version"));
    }
    options.push(synthetic("-h, --help", "Displays this message"));

    let mut usage = cmd.usage.clone();
    if !options.is_empty() {
        usage.push_str(" [options]");
    }

    let mut out = String::new();
    out.push_str(&section("Description", &cmd.description));
    out.push_str(&section("Usage", &[prefix(&usage)]));

    if !single && key == DEF {
        let rows: Vec<(String, String, Option<Value>)> = tree
            .commands()
            .map(|(name, entry)| (name.to_string(), entry.summary().to_string(), None))
            .collect();

        out.push_str(&section("Available Commands", &columns(&rows)));
        out.push_str(NL);
        out.push_str(INDENT);
        out.push_str("For more info, run any command with the `--help` flag");
        for (name, _, _) in rows.iter().take(2) {
            out.push_str(NL);
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push_str(&prefix(&format!("{} --help", name)));
        }
        out.push_str(NL);
    } else if !single {
        out.push_str(&section("Available Commands", &columns(&children(tree, key))));
        let aliases: Vec<String> = cmd.aliases.iter().map(|alias| prefix(alias.as_str())).collect();
        out.push_str(&section("Aliases", &aliases));
    }

    out.push_str(&section("Options", &columns(&option_rows(&options))));
    let examples: Vec<String> = cmd.examples.iter().map(|ex| prefix(ex.as_str())).collect();
    out.push_str(&section("Examples", &examples));

    out
}

/// Direct sub-commands of `key`: names exactly one word longer
fn children<R>(tree: &CommandTree<R>, key: &str) -> Vec<(String, String, Option<Value>)> {
    let scope = format!("{} ", key);
    tree.commands()
        .filter(|(name, _)| {
            name.strip_prefix(&scope)
                .is_some_and(|rest| !rest.is_empty() && !rest.contains(' '))
        })
        .map(|(name, entry)| (name.to_string(), entry.summary().to_string(), None))
        .collect()
}

/// The block written to stderr for user errors
pub fn error_block(bin: &str, message: &str) -> String {
    let mut out = section("ERROR", &[message.to_string()]);
    out.push_str(NL);
    out.push_str(INDENT);
    out.push_str(&format!("Run `$ {} --help` for more info.", bin));
    out.push_str(NL);
    out
}
