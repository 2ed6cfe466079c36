use super::{Cli, Commands};
use clap::Parser;
use std::path::Path;

#[test]
fn test_parse_generate_command() {
    let cli = Cli::try_parse_from([
        "tplforge",
        "generate",
        "--input",
        "api.yaml",
        "--config",
        "ts.yaml",
        "--name",
        "typescript",
    ])
    .unwrap();
    match cli.command {
        Commands::Generate {
            input,
            config,
            name,
            templates,
            output,
            dry_run,
        } => {
            assert_eq!(input, Path::new("api.yaml"));
            assert_eq!(config, Path::new("ts.yaml"));
            assert_eq!(name, "typescript");
            assert_eq!(templates, Path::new("./templates"));
            assert!(output.is_none());
            assert!(!dry_run);
        }
        _ => panic!("expected generate command"),
    }
}

#[test]
fn test_parse_check_with_template_root() {
    let cli = Cli::try_parse_from([
        "tplforge",
        "check",
        "--config",
        "ts.json",
        "--name",
        "ts",
        "--templates",
        "custom/templates",
    ])
    .unwrap();
    match cli.command {
        Commands::Check {
            config,
            name,
            templates,
        } => {
            assert_eq!(config, Path::new("ts.json"));
            assert_eq!(name, "ts");
            assert_eq!(templates, Path::new("custom/templates"));
        }
        _ => panic!("expected check command"),
    }
}

#[test]
fn test_generate_requires_name() {
    let result = Cli::try_parse_from([
        "tplforge",
        "generate",
        "--input",
        "api.yaml",
        "--config",
        "ts.yaml",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_global_verbose_flag() {
    let cli = Cli::try_parse_from([
        "tplforge",
        "check",
        "--config",
        "ts.yaml",
        "--name",
        "ts",
        "--verbose",
    ])
    .unwrap();
    assert!(cli.verbose);
}
