//! Demo front end: `cmdroute <fixture> [args...]`

pub mod fixtures;

use anyhow::anyhow;
use cmdroute::{Outcome, ParseOptions, Program};
use fixtures::Fixture;

/// The outer program: picks a fixture by name
fn launcher() -> Program<String> {
    let mut prog: Program<String> = Program::new("cmdroute <fixture>");
    prog.version(cmdroute::VERSION)
        .describe(&format!(
            "Run one of the reference programs. Fixtures: {}.",
            fixtures::NAMES.join(", ")
        ))
        .example("subs remote rename origin upstream")
        .example("options foo --help")
        .action(|args, _| args[0].clone().unwrap_or_default());
    prog
}

/// Build the named fixture and route the remaining arguments through it
pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    // only the executable and the fixture name belong to the launcher
    let name = match launcher().parse(args.iter().take(2).cloned(), ParseOptions::new()) {
        Outcome::Ran(name) => name,
        _ => return Ok(()),
    };

    let build = fixtures::find(&name).ok_or_else(|| anyhow!("Unknown fixture: {}", name))?;
    let Fixture { program, options } = build()?;

    // slot 0 is the executable, slot 1 the fixture name
    if let Outcome::Ran(result) = program.parse(args, options.offset(2)) {
        result?;
    }
    Ok(())
}
