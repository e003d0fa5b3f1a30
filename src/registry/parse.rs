//! Usage-pattern and flag-spec parsing

use once_cell::sync::Lazy;
use regex::Regex;

/// Separators between the parts of a flag spec such as `-f, --force`
static FLAG_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-{1,2}|,|\s+-{1,2}|\s+").expect("valid flag separator regex"));

/// The kind of a single usage token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Part of the command name
    Word,
    /// `<name>`
    Required,
    /// `[name]`
    Optional,
}

/// Classify a usage token by its first character
pub fn classify(token: &str) -> Token {
    match token.chars().next() {
        Some('<') => Token::Required,
        Some('[') => Token::Optional,
        _ => Token::Word,
    }
}

/// A usage string split into its command name and placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePattern {
    /// Name words joined by single spaces, e.g. `remote add`
    pub name: String,
    /// Placeholder tokens in declaration order
    pub placeholders: Vec<String>,
}

impl UsagePattern {
    pub fn parse(usage: &str) -> Self {
        let mut words = Vec::new();
        let mut placeholders = Vec::new();

        for token in usage.split_whitespace() {
            match classify(token) {
                Token::Word => words.push(token),
                Token::Required | Token::Optional => placeholders.push(token.to_string()),
            }
        }

        UsagePattern {
            name: words.join(" "),
            placeholders,
        }
    }

    /// The displayed usage: name words followed by placeholders
    pub fn usage(&self) -> String {
        std::iter::once(self.name.as_str())
            .filter(|name| !name.is_empty())
            .chain(self.placeholders.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Count the required and optional placeholders of a usage string
pub fn placeholder_counts(usage: &str) -> (usize, usize) {
    usage
        .split_whitespace()
        .fold((0, 0), |(req, opt), token| match classify(token) {
            Token::Required => (req + 1, opt),
            Token::Optional => (req, opt + 1),
            Token::Word => (req, opt),
        })
}

/// A parsed option flag spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Canonical long name, without dashes
    pub long: String,
    /// Single-letter alias, without the dash
    pub short: Option<String>,
}

impl FlagSpec {
    /// Parse `-f, --force`, `--force -f`, `--force` and friends
    pub fn parse(spec: &str) -> Self {
        let parts = split_flags(spec);
        let mut long = parts.first().cloned().unwrap_or_default();
        let mut short = parts.get(1).cloned();

        if let Some(alias) = &short {
            if alias.chars().count() > 1 {
                let swapped = std::mem::replace(&mut long, alias.clone());
                short = Some(swapped);
            }
        }

        FlagSpec {
            long,
            short: short.filter(|s| !s.is_empty()),
        }
    }

    /// Display text with the short alias first: `-f, --force`
    pub fn display(&self) -> String {
        match &self.short {
            Some(short) => format!("-{}, --{}", short, self.long),
            None => format!("--{}", self.long),
        }
    }
}

/// Strip leading dashes and separators from a flag spec
pub fn split_flags(spec: &str) -> Vec<String> {
    FLAG_SEPARATOR
        .split(spec)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
