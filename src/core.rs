use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::config::Config;
use crate::curl::{generate_curl, generate_curl_multiline, parse_curl_command, validate};
use crate::errors::CurlbridgeError;
use crate::models::RequestModel;
use crate::status::ExitStatus;
use crate::variables::{Collection, FileSecretStore, VariableResolver};

/// Main entry point for the CLI.
///
/// Handles argument parsing, configuration loading and logging setup, then
/// dispatches to the subcommand handler.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    let loaded = match &parsed.config_dir {
        Some(dir) => Config::load_from(dir),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            Config::default()
        }
    };

    init_tracing(parsed.log.as_deref(), &config);
    debug!(config_dir = %config.config_dir.display(), "Configuration loaded");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => return handle_error(e.into()),
    };

    match runtime.block_on(program(parsed, config)) {
        Ok(status) => status,
        Err(e) => handle_error(e),
    }
}

/// Install the stderr log subscriber: `--log`, then `RUST_LOG`, then config
fn init_tracing(cli_filter: Option<&str>, config: &Config) {
    let filter = cli_filter
        .map(str::to_string)
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| config.log_filter.clone());
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn program(args: Args, config: Config) -> Result<ExitStatus, CurlbridgeError> {
    match args.command {
        Command::Validate { command } => {
            let command = read_arg(&command)?;
            let violations = validate(command.as_str());
            if violations.is_empty() {
                println!("Command is valid");
            }
            for violation in &violations {
                println!("- {}", violation);
            }
            Ok(ExitStatus::from_violations(violations.len()))
        }

        Command::Parse { command, compact } => {
            let command = read_arg(&command)?;
            let violations = validate(command.as_str());
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("Error: {}", violation);
                }
                return Ok(ExitStatus::Error);
            }

            let model = parse_curl_command(&command)?;
            let json = if compact {
                serde_json::to_string(&model)?
            } else {
                serde_json::to_string_pretty(&model)?
            };
            println!("{}", json);
            Ok(ExitStatus::Success)
        }

        Command::Generate { input, multiline, collection, secrets_dir } => {
            let mut model: RequestModel = serde_json::from_str(&read_file(&input)?)?;
            if model.url.is_empty() {
                return Err(CurlbridgeError::Argument("request has no url".to_string()));
            }

            if let Some(path) = collection {
                let collection = Collection::load(&path)?;
                let resolver = VariableResolver::new(secret_store(secrets_dir, &config));
                model = resolver.resolve_request(&model, &collection).await;
            }

            let cmd = if multiline || config.multiline {
                generate_curl_multiline(&model)
            } else {
                generate_curl(&model)
            };
            println!("{}", cmd);
            Ok(ExitStatus::Success)
        }

        Command::Resolve { text, collection, secrets_dir } => {
            let text = read_arg(&text)?;
            let collection = Collection::load(&collection)?;
            let resolver = VariableResolver::new(secret_store(secrets_dir, &config));

            let scope = resolver.load_scope(&collection).await;
            let unresolved = scope.unresolved(&text);
            if !unresolved.is_empty() {
                eprintln!("Warning: unresolved variables: {}", unresolved.join(", "));
            }
            println!("{}", scope.resolve_text(&text));
            Ok(ExitStatus::Success)
        }
    }
}

fn secret_store(secrets_dir: Option<PathBuf>, config: &Config) -> FileSecretStore {
    FileSecretStore::new(secrets_dir.unwrap_or_else(|| config.secrets_dir.clone()))
}

/// Argument text, or stdin when the argument is "-"
fn read_arg(arg: &str) -> Result<String, CurlbridgeError> {
    if arg == "-" {
        return read_stdin();
    }
    Ok(arg.to_string())
}

/// File contents, or stdin when the path is "-"
fn read_file(path: &str) -> Result<String, CurlbridgeError> {
    if path == "-" {
        return read_stdin();
    }
    std::fs::read_to_string(Path::new(path))
        .map_err(|e| CurlbridgeError::Argument(format!("Cannot read {}: {}", path, e)))
}

fn read_stdin() -> Result<String, CurlbridgeError> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn handle_error(error: CurlbridgeError) -> ExitStatus {
    eprintln!("Error: {}", error);
    ExitStatus::Error
}
