//! Reference programs
//!
//! Each builder wires a small program named `bin`. Handlers print a single
//! `~>` line so process-level tests can match stdout exactly.

use cmdroute::{Argv, BuildResult, CommandOpts, ParseOptions, Program};

/// Handler return type for every fixture
pub type Ran = anyhow::Result<()>;

/// A built program plus the options it parses with
pub struct Fixture {
    pub program: Program<Ran>,
    pub options: ParseOptions,
}

impl From<Program<Ran>> for Fixture {
    fn from(program: Program<Ran>) -> Self {
        Fixture {
            program,
            options: ParseOptions::new(),
        }
    }
}

type Builder = fn() -> BuildResult<Fixture>;

/// Fixture names accepted by the demo binary
pub const NAMES: &[&str] = &[
    "basic", "args", "options", "unknown1", "unknown2", "subs", "default", "single1", "single2",
    "single3", "repeat", "status",
];

/// Look up a fixture builder by name
pub fn find(name: &str) -> Option<Builder> {
    let builder: Builder = match name {
        "basic" => basic,
        "args" => args,
        "options" => options,
        "unknown1" => unknown1,
        "unknown2" => unknown2,
        "subs" => subs,
        "default" => default,
        "single1" => single1,
        "single2" => single2,
        "single3" => single3,
        "repeat" => repeat,
        "status" => status,
        _ => return None,
    };
    Some(builder)
}

fn json(opts: &Argv) -> anyhow::Result<String> {
    Ok(serde_json::to_string(opts)?)
}

fn basic() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.command("foo")?.action(|_, _| {
        println!("~> ran \"foo\" action");
        Ok(())
    });
    Ok(prog.into())
}

fn args() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.command("foo <dir>")?.action(|args, _| {
        println!("~> ran \"foo\" with \"{}\" arg", args[0].as_deref().unwrap_or_default());
        Ok(())
    });
    prog.command("bar [dir]")?.action(|args, _| {
        let dir = args[0].as_deref().unwrap_or("~default~");
        println!("~> ran \"bar\" with \"{}\" arg", dir);
        Ok(())
    });
    Ok(prog.into())
}

fn options() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.option("-g, --global", "global");

    prog.command("foo")?
        .alias(["f"])?
        .option("-l, --long", "long flag")
        .option("-s, --short", "short flag")
        .option("-h, --hello", "override")
        .action(|_, opts| {
            if opts.flag("long") {
                println!("~> ran \"long\" option");
            } else if opts.flag("short") {
                println!("~> ran \"short\" option");
            } else if opts.flag("hello") {
                println!("~> ran \"hello\" option");
            } else {
                println!("~> default with {}", json(&opts)?);
            }
            Ok(())
        });

    prog.command("bar <dir>")?
        .alias(["b"])?
        .option("--only", "no short alias")
        .action(|args, opts| {
            let pre = if opts.flag("only") { "~> (only)" } else { "~>" };
            println!(
                "{} \"bar\" with \"{}\" value",
                pre,
                args[0].as_deref().unwrap_or_default()
            );
            Ok(())
        });
    Ok(prog.into())
}

fn unknown1() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.option("--bool", "flag defined")
        .option("-g, --global", "global flag");

    prog.command_with("foo", "", CommandOpts::new().alias("f"))?
        .option("-l, --local", "command flag")
        .action(|_, opts| {
            println!("~> ran \"foo\" with {}", json(&opts)?);
            Ok(())
        });

    Ok(Fixture {
        program: prog,
        options: ParseOptions::new().unknown(|_| None),
    })
}

fn unknown2() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.option("-g, --global", "global flag")
        .option("--flag1", "no alias or default");

    prog.command("foo")?
        .option("-l, --local", "command flag")
        .option("--flag2", "no alias or default")
        .action(|_, opts| {
            println!("~> ran \"foo\" with {}", json(&opts)?);
            Ok(())
        });

    Ok(Fixture {
        program: prog,
        options: ParseOptions::new().unknown(|flag| Some(format!("Custom error: {}", flag))),
    })
}

fn subs() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.command("remote")?.action(|_, _| {
        println!("~> ran \"remote\" action");
        Ok(())
    });
    prog.command("remote add <name> <url>")?.action(|args, _| {
        println!(
            "~> ran \"remote add\" with \"{}\" and \"{}\" args",
            args[0].as_deref().unwrap_or_default(),
            args[1].as_deref().unwrap_or_default()
        );
        Ok(())
    });
    prog.command("remote rename <old> <new>")?
        .alias(["rr"])?
        .action(|args, _| {
            println!(
                "~> ran \"remote rename\" with \"{}\" and \"{}\" args",
                args[0].as_deref().unwrap_or_default(),
                args[1].as_deref().unwrap_or_default()
            );
            Ok(())
        });
    prog.command("remote child")?.action(|_, _| {
        println!("~> ran \"remote child\" action");
        Ok(())
    });
    prog.command("remote child grandchild <arg>")?.action(|args, _| {
        println!(
            "~> ran \"remote child grandchild\" with \"{}\" arg",
            args[0].as_deref().unwrap_or_default()
        );
        Ok(())
    });
    Ok(prog.into())
}

fn default() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.command_with(
        "foo [dir]",
        "",
        CommandOpts::new().alias("f").default_command(),
    )?
    .action(|args, _| {
        let dir = args[0].as_deref().unwrap_or("~EMPTY~");
        println!("~> ran \"foo\" action w/ \"{}\" arg", dir);
        Ok(())
    });

    prog.command("bar")?.alias(["b"])?.action(|_, _| {
        println!("~> ran \"bar\" action");
        Ok(())
    });
    Ok(prog.into())
}

fn single1() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin <type> [dir]");
    prog.describe("hello description")
        .option("-g, --global", "flag 1")
        .action(|args, _| {
            println!(
                "~> ran \"single\" w/ \"{}\" and \"{}\" values",
                args[0].as_deref().unwrap_or_default(),
                args[1].as_deref().unwrap_or("~default~")
            );
            Ok(())
        });
    Ok(prog.into())
}

fn single2() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::single("bin");
    prog.describe("hello description")
        .option("-g, --global", "flag 1")
        .action(|_, opts| {
            println!("~> ran \"single\" with: {}", json(&opts)?);
            Ok(())
        });
    Ok(prog.into())
}

fn single3() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::single("bin");
    prog.command("foo <bar>")?.action(|_, opts| {
        println!("~> ran \"foo\" with: {}", json(&opts)?);
        Ok(())
    });
    Ok(prog.into())
}

fn repeat() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.command_with("foo", "original", CommandOpts::new())?;
    prog.command_with("foo", "duplicate", CommandOpts::new())?
        .action(|_, _| {
            println!("~> ran \"foo\" action");
            Ok(())
        });
    Ok(prog.into())
}

fn status() -> BuildResult<Fixture> {
    let mut prog: Program<Ran> = Program::new("bin");
    prog.command("foo <dir>")?.action(|args, _| {
        println!("~> ran \"foo\" with \"{}\" arg", args[0].as_deref().unwrap_or_default());
        Ok(())
    });

    Ok(Fixture {
        program: prog,
        options: ParseOptions::new().exit_code(3),
    })
}
