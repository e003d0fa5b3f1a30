//! Argument tokenizer
//!
//! Scans the slice left to right. Tokens without a leading `-` are
//! positionals, `--` ends flag parsing, `--no-name` negates, and a flag takes
//! the following token as its value unless that token starts with `-`.

use super::{AliasMap, Argv, FlagConfig, Value};
use crate::error::{ParseError, ParseResult};
use log::trace;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Bool,
    Str,
}

#[derive(Debug, Clone, Copy)]
enum Raw<'a> {
    /// Flag present without a value
    Present,
    Text(&'a str),
}

/// Lookup tables derived from a `FlagConfig` for one pass
struct Rules {
    /// Bidirectional alias table; its keys are every known flag name
    alias: AliasMap,
    kinds: HashMap<String, Kind>,
}

impl Rules {
    fn new(config: &FlagConfig) -> Self {
        let mut alias = config.alias.clone();

        let keys: Vec<String> = alias.keys().cloned().collect();
        for key in keys {
            let targets = alias.get(&key).cloned().unwrap_or_default();
            for (i, target) in targets.iter().enumerate() {
                let mut others: Vec<String> = targets
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, t)| t.clone())
                    .collect();
                others.push(key.clone());
                alias.insert(target.clone(), others);
            }
        }

        let mut kinds = HashMap::new();
        for (key, value) in &config.defaults {
            let peers = alias.entry(key.clone()).or_default().clone();
            let kind = match value {
                Some(Value::Bool(_)) => Kind::Bool,
                Some(Value::Str(_)) => Kind::Str,
                _ => continue,
            };
            kinds.insert(key.clone(), kind);
            for peer in peers {
                kinds.insert(peer, kind);
            }
        }

        Rules { alias, kinds }
    }

    fn check(&self, name: &str, written: &str, config: &FlagConfig) -> ParseResult<()> {
        match &config.unknown {
            Some(handler) if !self.alias.contains_key(name) => Err(ParseError::UnknownFlag {
                flag: written.to_string(),
                message: handler(written),
            }),
            _ => Ok(()),
        }
    }
}

/// Tokenize an argument slice into an options bag
pub fn tokenize(args: &[String], config: &FlagConfig) -> ParseResult<Argv> {
    trace!("tokenizing {:?} with {:?}", args, config);

    let rules = Rules::new(config);
    let mut out = Argv::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();

        if arg == "--" {
            for (j, rest) in args.iter().enumerate().skip(i + 1) {
                out.push_positional(rest, j);
            }
            break;
        }

        let dashes = arg.bytes().take_while(|b| *b == b'-').count();
        if dashes == 0 || dashes == arg.len() {
            out.push_positional(arg, i);
            i += 1;
            continue;
        }

        let body = &arg[dashes..];
        if let Some(name) = body.strip_prefix("no-") {
            rules.check(name, arg, config)?;
            out.assign(name, Value::Bool(false));
            i += 1;
            continue;
        }

        let (name, inline) = body.split_once('=').unwrap_or((body, ""));
        let raw = if !inline.is_empty() {
            Raw::Text(inline)
        } else if i + 1 < args.len() && !args[i + 1].starts_with('-') {
            i += 1;
            Raw::Text(args[i].as_str())
        } else {
            Raw::Present
        };

        // `-abc` is three short flags; only the last one receives the value
        let names: Vec<&str> = if dashes == 2 {
            vec![name]
        } else {
            name.char_indices()
                .map(|(at, c)| &name[at..at + c.len_utf8()])
                .collect()
        };

        let last = names.len().saturating_sub(1);
        for (k, flag) in names.iter().enumerate() {
            let written = format!("{}{}", "-".repeat(dashes), flag);
            rules.check(flag, &written, config)?;
            let given = if k < last { Raw::Present } else { raw };
            let value = coerce(&mut out, rules.kinds.get(*flag).copied(), given, i);
            out.set(flag, value);
        }

        i += 1;
    }

    for (key, value) in &config.defaults {
        if let Some(value) = value {
            if !out.contains(key) {
                out.assign(key, value.clone());
            }
        }
    }

    let keys: Vec<String> = out.flags.keys().cloned().collect();
    for key in keys {
        let Some(peers) = rules.alias.get(&key) else {
            continue;
        };
        if let Some(value) = out.get(&key).cloned() {
            for peer in peers {
                out.assign(peer, value.clone());
            }
        }
    }

    Ok(out)
}

/// Convert a raw occurrence into a typed value. Boolean flags hand a consumed
/// non-boolean token back to the positional list.
fn coerce(out: &mut Argv, kind: Option<Kind>, raw: Raw<'_>, index: usize) -> Value {
    match (kind, raw) {
        (Some(Kind::Str), Raw::Present) => Value::Str(String::new()),
        (Some(Kind::Str), Raw::Text(text)) => Value::Str(text.to_string()),
        (_, Raw::Present) => Value::Bool(true),
        (Some(Kind::Bool), Raw::Text("false")) => Value::Bool(false),
        (Some(Kind::Bool), Raw::Text("true")) => Value::Bool(true),
        (Some(Kind::Bool), Raw::Text(text)) => {
            out.push_positional(text, index);
            Value::Bool(!text.is_empty())
        }
        (None, Raw::Text(text)) => numeric(text)
            .map(Value::Num)
            .unwrap_or_else(|| Value::Str(text.to_string())),
    }
}

fn numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
