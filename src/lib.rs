//! cmdroute - a small command-line router
//!
//! Register commands by usage pattern (`remote add <name> [url]`), attach
//! options, aliases, examples and handlers, then hand over the argument
//! vector. The router finds the command, binds positional placeholders,
//! renders help and version text, and reports user errors.

// Public modules
pub mod error;
pub mod flags;
pub mod help;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use error::{BuildError, BuildResult, ParseError, ParseResult, Result, RouteError};
pub use flags::{Argv, Value};
pub use registry::{CommandOpts, Program};
pub use resolver::{Deferred, Outcome, ParseOptions};

/// Current version of cmdroute
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved entry holding global options
pub const ALL: &str = "__all__";

/// Reserved entry holding the program-level description, usage and handler
pub const DEF: &str = "__default__";
