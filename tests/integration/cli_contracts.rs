use clap::{CommandFactory, Parser};
use finder::config::FinderConfig;
use finder::tooling::cli::{Cli, CliContext, CollectionCommands, Commands};
use tempfile::TempDir;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_valid_command_matrix() {
    let cli = Cli::try_parse_from(["finder", "--store", "/tmp/s", "collection", "create", "home"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Collection {
            command: CollectionCommands::Create { .. }
        }
    ));

    let cli = Cli::try_parse_from(["finder", "request", "1", "cmd=open", "target=fc1_"]).unwrap();
    match cli.command {
        Commands::Request { collection, pairs } => {
            assert_eq!(collection, 1);
            assert_eq!(pairs, vec!["cmd=open", "target=fc1_"]);
        }
        _ => panic!("expected request"),
    }

    assert!(Cli::try_parse_from(["finder", "request", "1"]).is_err());
    assert!(Cli::try_parse_from(["finder", "request", "home", "cmd=open"]).is_err());
}

#[test]
fn logging_flags_override_config() {
    let cli = Cli::try_parse_from([
        "finder",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "collection",
        "list",
    ])
    .unwrap();
    let mut config = FinderConfig::default();
    cli.apply_logging_overrides(&mut config);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn request_output_is_connector_json() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = CliContext::with_config(FinderConfig::default(), Some(temp_dir.path().join("store"))).unwrap();
    ctx.library().create_collection("home").unwrap();

    let output = ctx
        .execute(&Commands::Request {
            collection: 1,
            pairs: vec!["cmd=nope".to_string()],
        })
        .unwrap();
    assert_eq!(output, r#"{"error":"Unknown command"}"#);

    let output = ctx
        .execute(&Commands::Collection {
            command: CollectionCommands::List {
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(output.contains("home"));
    assert!(output.contains("Total: 1 collection(s)"));
}

#[test]
fn context_from_parsed_cli_opens_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("store");
    let cli = Cli::try_parse_from([
        "finder",
        "--store",
        store.to_str().unwrap(),
        "--log-level",
        "off",
        "collection",
        "list",
    ])
    .unwrap();

    let ctx = CliContext::new(&cli).unwrap();
    assert_eq!(ctx.execute(&cli.command).unwrap(), "No collections found.");
    assert!(store.exists());
}
