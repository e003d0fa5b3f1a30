//! Flag values and the options bag

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// A parsed (or declared default) flag value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
    /// A flag given more than once
    List(Vec<Value>),
}

impl Value {
    /// Truthiness used for `--help`/`--version` checks and `Argv::flag`
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Append another occurrence of the same flag
    pub(crate) fn push(self, next: Value) -> Value {
        match self {
            Value::List(mut items) => {
                items.push(next);
                Value::List(items)
            }
            old => Value::List(vec![old, next]),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

// Integral numbers serialize as integers so `--port 80` prints `80`, not `80.0`
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Num(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Num(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(f64::from(n))
    }
}

/// The options bag: parsed flags plus the positionals nobody consumed
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Argv {
    /// Leftover positional arguments
    #[serde(rename = "_")]
    pub positionals: Vec<String>,

    /// Flag values in the order they were first set
    #[serde(flatten)]
    pub flags: IndexMap<String, Value>,

    /// Index of each positional within the tokenized slice
    #[serde(skip)]
    pub(crate) positions: Vec<usize>,
}

impl Argv {
    /// Get a flag value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    /// Check whether a flag is present and truthy
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(Value::is_truthy)
    }

    /// Get a flag as a string slice (only for string values)
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub(crate) fn push_positional(&mut self, arg: &str, index: usize) {
        self.positionals.push(arg.to_string());
        self.positions.push(index);
    }

    /// Record an occurrence of a flag; repeats accumulate into a list
    pub(crate) fn set(&mut self, name: &str, value: Value) {
        match self.flags.get_mut(name) {
            Some(slot) => {
                let old = std::mem::replace(slot, Value::Bool(false));
                *slot = old.push(value);
            }
            None => {
                self.flags.insert(name.to_string(), value);
            }
        }
    }

    /// Overwrite a flag, keeping its original position
    pub(crate) fn assign(&mut self, name: &str, value: Value) {
        self.flags.insert(name.to_string(), value);
    }
}
