//! Integration tests for registration and routing

mod common;

use cmdroute::{
    BuildError, CommandOpts, Outcome, ParseError, ParseOptions, Program, Value, ALL, DEF,
};
use common::{bare, echo, some, Call};

fn ran(outcome: Outcome<Call>) -> Call {
    outcome.into_ran().unwrap()
}

fn no_args() -> Vec<String> {
    Vec::new()
}

#[test]
fn test_program_defaults() {
    let prog: Program = Program::new("foo");
    assert_eq!(prog.name(), "foo");
    assert_eq!(prog.version_text(), "0.0.0");
    assert_eq!(prog.default_command(), None);
    assert!(!prog.is_single());

    let tree = prog.tree();
    assert_eq!(tree.len(), 2);
    for key in [ALL, DEF] {
        let entry = tree.get(key).unwrap();
        assert!(entry.options.is_empty());
        assert!(entry.examples.is_empty());
        assert!(entry.option_aliases.is_empty());
    }
    assert!(prog.help(None).contains("-v, --version    Displays current version"));
}

#[test]
fn test_version() {
    let mut prog: Program = Program::new("foo");
    prog.version("1.0.0");
    assert_eq!(prog.version_text(), "1.0.0");
}

#[test]
fn test_global_option_with_default() {
    let mut prog: Program = Program::new("foo");
    prog.option_default("--foo, -f", "bar", "baz.js");

    let all = prog.tree().get(ALL).unwrap();
    assert_eq!(all.options.len(), 1);
    assert_eq!(all.options[0].flags, "-f, --foo");
    assert_eq!(all.options[0].default, Some(Value::from("baz.js")));
    assert_eq!(all.option_aliases["f"], vec!["foo".to_string()]);
}

#[test]
fn test_global_describe_and_example() {
    let mut prog: Program = Program::new("foo");
    prog.describe("Who is on first. What is on second.")
        .example("hello --local");

    let def = prog.tree().get(DEF).unwrap();
    assert_eq!(def.description, vec!["Who is on first.", "What is on second."]);
    assert_eq!(def.examples, vec!["hello --local"]);
}

#[test]
fn test_command_scope_moves() {
    let mut prog: Program = Program::new("foo");
    prog.command("bar").unwrap();
    assert_eq!(prog.tree().get("bar").unwrap().usage, "bar");

    prog.option("-f, --force", "force")
        .example("bar --force")
        .describe("hello world");
    {
        let bar = prog.tree().get("bar").unwrap();
        assert_eq!(bar.options.len(), 1);
        assert_eq!(bar.option_aliases["f"], vec!["force".to_string()]);
        assert_eq!(bar.examples, vec!["bar --force"]);
        assert_eq!(bar.description, vec!["hello world"]);
    }

    prog.command("quz").unwrap().describe("this is quz");
    prog.command_with("fizz <buzz>", "FizzBuzz", CommandOpts::new().default_command())
        .unwrap()
        .example("fizz 15");

    let tree = prog.tree();
    assert_eq!(tree.get("quz").unwrap().description, vec!["this is quz"]);
    assert_eq!(tree.get("bar").unwrap().description, vec!["hello world"]);
    assert!(tree.get("quz").unwrap().examples.is_empty());
    assert_eq!(tree.get("fizz").unwrap().usage, "fizz <buzz>");
    assert_eq!(tree.get("fizz").unwrap().examples, vec!["fizz 15"]);
    assert_eq!(tree.get("fizz").unwrap().description, vec!["FizzBuzz"]);
    assert_eq!(prog.default_command(), Some("fizz"));
}

#[test]
fn test_usage_is_normalized() {
    let mut prog: Program = Program::new("foo");
    prog.command("  build   <src>  [dest] ").unwrap();
    assert_eq!(prog.tree().get("build").unwrap().usage, "build <src> [dest]");
}

#[test]
fn test_action_receives_required_value() {
    let mut prog: Program<Call> = Program::new("foo");
    prog.command("greet <name>")
        .unwrap()
        .option("--loud", "Be loud?")
        .action(echo);
    assert!(prog.tree().get("greet").unwrap().handler.is_some());

    let (args, opts) = ran(prog.try_parse(["greet", "Bob"], bare()).unwrap());
    assert_eq!(args, some(&["Bob"]));
    assert!(!opts.flag("loud"));

    let (args, opts) = ran(prog.try_parse(["greet", "Bob", "--loud"], bare()).unwrap());
    assert_eq!(args, some(&["Bob"]));
    assert!(opts.flag("loud"));
}

#[test]
fn test_action_multiple_required() {
    let mut prog: Program<Call> = Program::new("foo");
    prog.command("build <src> <dest>")
        .unwrap()
        .option("-f, --force", "Force foo overwrite")
        .action(echo);

    let (args, opts) = ran(prog.try_parse(["build", "aaa", "bbb"], bare()).unwrap());
    assert_eq!(args, some(&["aaa", "bbb"]));
    assert!(!opts.flag("force"));

    let (_, opts) = ran(prog.try_parse(["build", "aaa", "bbb", "-f"], bare()).unwrap());
    assert!(opts.flag("force"));
    assert!(opts.flag("f"));
}

#[test]
fn test_default_offset_skips_executable() {
    let mut prog: Program<Call> = Program::new("foo");
    prog.command("greet <name>").unwrap().action(echo);

    let (args, _) = ran(
        prog.try_parse(["/usr/bin/foo", "greet", "Bob"], ParseOptions::new())
            .unwrap(),
    );
    assert_eq!(args, some(&["Bob"]));
}

#[test]
fn test_optional_placeholders() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.command("bar [dir] [mode]").unwrap().action(echo);

    let (args, opts) = ran(prog.try_parse(["bar"], bare()).unwrap());
    assert_eq!(args, vec![None, None]);
    assert!(opts.positionals.is_empty());

    let (args, _) = ran(prog.try_parse(["bar", "src"], bare()).unwrap());
    assert_eq!(args, vec![Some("src".to_string()), None]);

    let (args, opts) = ran(prog.try_parse(["bar", "a", "b", "c"], bare()).unwrap());
    assert_eq!(args, some(&["a", "b"]));
    assert_eq!(opts.positionals, vec!["c"]);
}

#[test]
fn test_handler_return_value() {
    let mut prog: Program<usize> = Program::new("bin");
    prog.command("count <a> [b]")
        .unwrap()
        .action(|args, _| args.iter().flatten().count());

    let outcome = prog.try_parse(["count", "x", "y"], bare()).unwrap();
    assert_eq!(outcome.into_ran(), Some(2));
}

fn subs() -> Program<Call> {
    let mut prog = Program::new("bin");
    prog.command("remote").unwrap().action(echo);
    prog.command("remote add <name> <url>").unwrap().action(echo);
    prog.command("remote rename <old> <new>")
        .unwrap()
        .alias(["rr"])
        .unwrap()
        .action(echo);
    prog
}

#[test]
fn test_longest_prefix_wins() {
    let prog = subs();

    let (args, _) = ran(prog.try_parse(["remote"], bare()).unwrap());
    assert!(args.is_empty());

    let (args, _) = ran(
        prog.try_parse(["remote", "add", "origin", "git@x"], bare())
            .unwrap(),
    );
    assert_eq!(args, some(&["origin", "git@x"]));

    // an unknown word after a match is an argument of the match
    let (args, opts) = ran(prog.try_parse(["remote", "foobar"], bare()).unwrap());
    assert!(args.is_empty());
    assert_eq!(opts.positionals, vec!["foobar"]);
}

#[test]
fn test_alias_matches_canonical() {
    let prog = subs();
    let canonical = ran(
        prog.try_parse(["remote", "rename", "a", "b"], bare())
            .unwrap(),
    );
    let aliased = ran(prog.try_parse(["rr", "a", "b"], bare()).unwrap());
    assert_eq!(aliased, canonical);
    assert_eq!(aliased.0, some(&["a", "b"]));
}

#[test]
fn test_alias_after_flags() {
    let prog = subs();
    let (args, opts) = ran(prog.try_parse(["--x=1", "rr", "a", "b"], bare()).unwrap());
    assert_eq!(args, some(&["a", "b"]));
    assert_eq!(opts.get("x"), Some(&Value::from(1)));
    assert!(opts.positionals.is_empty());
}

#[test]
fn test_alias_help_renders_canonical() {
    let prog = subs();
    let help = prog.try_parse(["rr", "--help"], bare()).unwrap();
    let text = help.text().unwrap();
    assert!(text.contains("Usage\n    $ bin remote rename <old> <new> [options]"));
    assert!(text.contains("Aliases\n    $ bin rr\n"));
}

#[test]
fn test_invalid_and_missing_command() {
    let prog = subs();
    assert_eq!(
        prog.try_parse(["foobar"], bare()).unwrap_err(),
        ParseError::InvalidCommand("foobar".into())
    );
    assert_eq!(
        prog.try_parse(["foo", "bar"], bare()).unwrap_err(),
        ParseError::InvalidCommand("foo bar".into())
    );
    assert_eq!(
        prog.try_parse(no_args(), bare()).unwrap_err(),
        ParseError::NoCommand
    );
}

#[test]
fn test_insufficient_arguments_names_command() {
    let prog = subs();
    let err = prog.try_parse(["remote", "add", "origin"], bare()).unwrap_err();
    assert_eq!(
        err,
        ParseError::InsufficientArguments {
            command: Some("remote add".into())
        }
    );
    assert_eq!(err.to_string(), "Insufficient arguments!");
    assert_eq!(err.help_target("bin"), "bin remote add");
}

fn with_default() -> Program<Call> {
    let mut prog = Program::new("bin");
    prog.command_with(
        "foo [dir]",
        "",
        CommandOpts::new().alias("f").default_command(),
    )
    .unwrap()
    .action(echo);
    prog.command("bar").unwrap().alias(["b"]).unwrap().action(echo);
    prog
}

#[test]
fn test_default_command() {
    let prog = with_default();

    let (args, _) = ran(prog.try_parse(no_args(), bare()).unwrap());
    assert_eq!(args, vec![None]);

    let (args, _) = ran(prog.try_parse(["foo", "src"], bare()).unwrap());
    assert_eq!(args, some(&["src"]));

    let (args, _) = ran(prog.try_parse(["f"], bare()).unwrap());
    assert_eq!(args, vec![None]);

    // unmatched words bind to the default's placeholders
    let (args, _) = ran(prog.try_parse(["xyz"], bare()).unwrap());
    assert_eq!(args, some(&["xyz"]));
}

#[test]
fn test_default_command_help() {
    let prog = with_default();

    let root = prog.try_parse(["--help"], bare()).unwrap();
    assert!(root
        .text()
        .unwrap()
        .contains("Available Commands\n    foo    \n    bar    \n"));

    let foo = prog.try_parse(["foo", "-h"], bare()).unwrap();
    assert!(foo.text().unwrap().contains("Usage\n    $ bin foo [dir] [options]"));
}

#[test]
fn test_version_outcome() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.version("1.2.3").command("foo").unwrap().action(echo);

    for flag in ["-v", "--version"] {
        match prog.try_parse([flag], bare()).unwrap() {
            Outcome::Version(text) => assert_eq!(text, "bin, 1.2.3"),
            other => panic!("expected version, got {:?}", other),
        }
    }
}

#[test]
fn test_help_beats_version() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.version("1.2.3").command("foo").unwrap().action(echo);

    for args in [["--version", "--help"], ["-v", "-h"], ["-h", "-v"]] {
        match prog.try_parse(args, bare()).unwrap() {
            Outcome::Help(text) => {
                assert!(text.contains("Available Commands"));
                assert!(!text.contains("bin, 1.2.3"));
            }
            other => panic!("expected help for {:?}, got {:?}", args, other),
        }
    }

    match prog.try_parse(["foo", "-v", "-h"], bare()).unwrap() {
        Outcome::Help(text) => assert!(text.contains("Usage\n    $ bin foo [options]")),
        other => panic!("expected command help, got {:?}", other),
    }
}

#[test]
fn test_help_is_reserved() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.command("foo")
        .unwrap()
        .option("-h, --hello", "override")
        .action(echo);

    let help = prog.try_parse(["foo", "-h"], bare()).unwrap();
    assert!(help.text().unwrap().contains("-h, --help     Displays this message"));

    let (_, opts) = ran(prog.try_parse(["foo", "--hello"], bare()).unwrap());
    assert!(opts.flag("hello"));
}

#[test]
fn test_help_is_stable_across_parses() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.command("foo").unwrap().option("-x", "x").action(echo);

    let first = prog.try_parse(["foo", "--help"], bare()).unwrap();
    let second = prog.try_parse(["foo", "--help"], bare()).unwrap();
    assert_eq!(first.text(), second.text());
    assert_eq!(first.text().unwrap().matches("[options]").count(), 1);
}

fn strict() -> Program<Call> {
    let mut prog = Program::new("bin");
    prog.option("--bool", "flag defined")
        .option("-g, --global", "global flag");
    prog.command("foo")
        .unwrap()
        .option("-l, --local", "command flag")
        .action(echo);
    prog
}

#[test]
fn test_unknown_flags_default_message() {
    let prog = strict();
    let opts = || bare().unknown(|_| None);

    let (_, argv) = ran(prog.try_parse(["foo", "--global"], opts()).unwrap());
    assert_eq!(
        serde_json::to_string(&argv).unwrap(),
        r#"{"_":[],"global":true,"g":true}"#
    );

    let (_, argv) = ran(prog.try_parse(["foo", "-l", "--bool"], opts()).unwrap());
    assert!(argv.flag("local"));
    assert!(argv.flag("bool"));

    let err = prog.try_parse(["foo", "--bar"], opts()).unwrap_err();
    assert_eq!(err.to_string(), "Parsed unknown option flag(s)!");
    assert_eq!(err.help_target("bin"), "bin");
}

#[test]
fn test_unknown_flags_custom_message() {
    let prog = strict();
    let opts = bare().unknown(|flag| Some(format!("Custom error: {}", flag)));

    let err = prog.try_parse(["foo", "--bar"], opts).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownFlag {
            flag: "--bar".into(),
            message: Some("Custom error: --bar".into()),
        }
    );
    assert_eq!(err.to_string(), "Custom error: --bar");
}

#[test]
fn test_help_wins_over_unknown_flags() {
    let prog = strict();
    let outcome = prog
        .try_parse(["foo", "--bar", "--help"], bare().unknown(|_| None))
        .unwrap();
    assert!(matches!(outcome, Outcome::Help(_)));
}

#[test]
fn test_option_scope_precedence() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.option_default("-o, --out", "output", "global");
    prog.command("build").unwrap().action(echo);
    prog.command("pack")
        .unwrap()
        .option_default("-o, --out", "output", "command")
        .action(echo);

    let (_, opts) = ran(prog.try_parse(["build"], bare()).unwrap());
    assert_eq!(opts.get_str("out"), Some("global"));
    assert_eq!(opts.get_str("o"), Some("global"));

    let (_, opts) = ran(prog.try_parse(["pack"], bare()).unwrap());
    assert_eq!(opts.get_str("out"), Some("command"));

    let caller = bare().default_value("out", "caller");
    let (_, opts) = ran(prog.try_parse(["pack"], caller).unwrap());
    assert_eq!(opts.get_str("out"), Some("caller"));

    let (_, opts) = ran(prog.try_parse(["pack", "-o", "cli"], bare()).unwrap());
    assert_eq!(opts.get_str("out"), Some("cli"));
}

#[test]
fn test_caller_alias() {
    let mut prog: Program<Call> = Program::new("bin");
    prog.command("foo").unwrap().action(echo);

    let (_, opts) = ran(
        prog.try_parse(["foo", "-x"], bare().alias("x", ["extra"]))
            .unwrap(),
    );
    assert!(opts.flag("extra"));
}

#[test]
fn test_lazy_defers_handler() {
    let prog = subs();
    let deferred = prog
        .try_parse(["rr", "old", "new", "--force"], bare().lazy())
        .unwrap()
        .into_deferred()
        .unwrap();

    assert_eq!(deferred.name, "remote rename");
    assert_eq!(deferred.args, some(&["old", "new"]));
    assert!(deferred.opts.flag("force"));

    let (args, opts) = deferred.call();
    assert_eq!(args, some(&["old", "new"]));
    assert!(opts.flag("force"));
}

#[test]
fn test_single_mode_from_usage() {
    let mut prog: Program<Call> = Program::new("bin <type> [dir]");
    prog.describe("hello description")
        .option("-g, --global", "flag 1")
        .action(echo);

    let (args, _) = ran(prog.try_parse(["type"], bare()).unwrap());
    assert_eq!(args, vec![Some("type".to_string()), None]);

    let (args, _) = ran(prog.try_parse(["type", "dir"], bare()).unwrap());
    assert_eq!(args, some(&["type", "dir"]));

    let err = prog.try_parse(no_args(), bare()).unwrap_err();
    assert_eq!(err, ParseError::InsufficientArguments { command: None });
    assert_eq!(err.help_target("bin"), "bin");

    let help = prog.try_parse(["bar", "--help"], bare()).unwrap();
    assert!(help
        .text()
        .unwrap()
        .contains("Usage\n    $ bin <type> [dir] [options]"));
}

#[test]
fn test_single_mode_catch_all() {
    let mut prog: Program<Call> = Program::single("bin");
    prog.option("-g, --global", "flag 1").action(echo);

    let (args, opts) = ran(
        prog.try_parse(["type", "dir", "--global"], bare())
            .unwrap(),
    );
    assert!(args.is_empty());
    assert_eq!(
        serde_json::to_string(&opts).unwrap(),
        r#"{"_":["type","dir"],"global":true,"g":true}"#
    );
}

#[test]
fn test_build_errors() {
    let mut prog: Program = Program::new("bin");
    assert_eq!(
        prog.alias(["x"]).err(),
        Some(BuildError::AliasBeforeCommand)
    );
    prog.command("foo").unwrap();
    assert_eq!(
        prog.command("foo").err(),
        Some(BuildError::DuplicateCommand("foo".into()))
    );
    assert_eq!(
        prog.alias(["foo"]).err(),
        Some(BuildError::DuplicateCommand("foo".into()))
    );

    let mut single: Program = Program::single("bin");
    let err = single.command("foo <bar>").err().unwrap();
    assert_eq!(err.to_string(), "Disable \"single\" mode to add commands");
    let err = single.alias(["x"]).err().unwrap();
    assert_eq!(err.to_string(), "Cannot call `alias()` in \"single\" mode");
}

#[test]
fn test_missing_handler() {
    let mut prog: Program = Program::new("bin");
    prog.command("foo").unwrap();
    assert_eq!(
        prog.try_parse(["foo"], bare()).unwrap_err(),
        ParseError::MissingHandler("foo".into())
    );
}
