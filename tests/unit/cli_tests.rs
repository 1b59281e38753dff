//! Unit tests for CLI argument parsing

use clap::Parser;
use keydiff::cli::{Cli, Commands};
use std::path::PathBuf;

#[test]
fn test_cli_compare_defaults() {
    let cli = Cli::try_parse_from(["keydiff", "compare", "a.csv", "b.csv", "--name", "run"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Compare {
            a,
            b,
            name,
            key,
            outdir,
            prefix,
            report,
            excel,
            no_combined,
            as_given,
            no_trim,
            config,
            json,
            quiet,
        } => {
            assert_eq!(a, PathBuf::from("a.csv"));
            assert_eq!(b, PathBuf::from("b.csv"));
            assert_eq!(name, "run");
            assert!(key.is_none());
            assert!(outdir.is_none());
            assert!(prefix.is_none());
            assert!(config.is_none());
            assert!(!report && !excel && !no_combined && !as_given && !no_trim && !json && !quiet);
        }
        _ => panic!("Expected Compare command"),
    }
}

#[test]
fn test_cli_compare_with_options() {
    let cli = Cli::try_parse_from([
        "keydiff",
        "compare",
        "old.csv",
        "new.csv",
        "--name",
        "nightly",
        "--key",
        "snap,inst",
        "--outdir",
        "out",
        "--prefix",
        "nightly",
        "--report",
        "--excel",
        "--no-combined",
        "--as-given",
        "--json",
    ])
    .unwrap();
    match cli.command {
        Commands::Compare {
            key,
            outdir,
            prefix,
            report,
            excel,
            no_combined,
            as_given,
            json,
            ..
        } => {
            assert_eq!(key.as_deref(), Some("snap,inst"));
            assert_eq!(outdir, Some(PathBuf::from("out")));
            assert_eq!(prefix.as_deref(), Some("nightly"));
            assert!(report && excel && no_combined && as_given && json);
        }
        _ => panic!("Expected Compare command"),
    }
}

#[test]
fn test_cli_check_command() {
    let cli = Cli::try_parse_from(["keydiff", "check", "a.csv", "b.csv", "--key", "id"]).unwrap();
    match cli.command {
        Commands::Check { a, b, key } => {
            assert_eq!(a, PathBuf::from("a.csv"));
            assert_eq!(b, PathBuf::from("b.csv"));
            assert_eq!(key.as_deref(), Some("id"));
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_cli_verbose_is_global() {
    let cli = Cli::try_parse_from(["keydiff", "--verbose", "check", "a.csv", "b.csv"]).unwrap();
    assert!(cli.verbose);
}

#[test]
fn test_cli_rejects_missing_inputs() {
    assert!(Cli::try_parse_from(["keydiff", "compare", "a.csv", "--name", "x"]).is_err());
    assert!(Cli::try_parse_from(["keydiff", "check"]).is_err());
    assert!(Cli::try_parse_from(["keydiff", "snapshot", "a.csv"]).is_err());
}
