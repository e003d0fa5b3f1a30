//! Common test utilities

#![allow(dead_code)]

use assert_cmd::Command;
use cmdroute::{Argv, ParseOptions};

/// What a recording handler saw
pub type Call = (Vec<Option<String>>, Argv);

/// Handler that hands its inputs back
pub fn echo(args: Vec<Option<String>>, opts: Argv) -> Call {
    (args, opts)
}

/// Options for argument lists without a leading executable slot
pub fn bare() -> ParseOptions {
    ParseOptions::new().offset(0)
}

/// Bound values, all present
pub fn some(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

/// The error block `parse` writes to stderr, including println's newline
pub fn error_text(bin: &str, message: &str) -> String {
    format!(
        "\n  ERROR\n    {}\n\n  Run `$ {} --help` for more info.\n\n",
        message, bin
    )
}

/// The demo binary, set up to run one fixture
pub fn demo(fixture: &str, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("cmdroute").unwrap();
    cmd.env_remove("RUST_LOG").arg(fixture).args(args);
    cmd
}
