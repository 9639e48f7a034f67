//! IntentBridge - conversational intent-to-plan client
//!
//! CLI entry point for chatting with the synthesis service and rendering plans.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches};
use eyre::{Context, Result};
use tracing::{debug, info};

use intentbridge::cli::{Cli, Command, OutputFormat, generate_after_help, get_log_path};
use intentbridge::config::Config;
use intentbridge::plan::Plan;
use intentbridge::render::{format_outline, render};
use intentbridge::repl;
use intentbridge::synthesis::{Conversation, TurnOutcome, create_client};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Build command with dynamic after_help that shows endpoint, config and log locations
    let mut cmd = Cli::command().after_help(generate_after_help());

    let cli = Cli::from_arg_matches(&cmd.clone().get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(api_base) = &cli.api_base {
        debug!(%api_base, "main: overriding api.base-url from --api-base");
        config.api.base_url = api_base.clone();
    }

    info!("IntentBridge loaded config: base-url={}", config.api.base_url);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Chat { initial }) => {
            debug!("main: matched Chat command");
            repl::run_interactive(&config, initial).await
        }
        Some(Command::Ask { input, format }) => {
            debug!(?format, "main: matched Ask command");
            cmd_ask(&config, &input, format).await
        }
        Some(Command::Render { file, format }) => {
            debug!(?file, ?format, "main: matched Render command");
            cmd_render(&file, format)
        }
        Some(Command::Logs { follow, lines }) => {
            debug!(follow, lines, "main: matched Logs command");
            cmd_logs(follow, lines)
        }
        None => {
            debug!("main: no command, printing help");
            cmd.print_help()?;
            Ok(())
        }
    }
}

/// Send one message in a fresh session and print what came back
async fn cmd_ask(config: &Config, input: &str, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_ask: called");
    config.validate()?;

    let client = create_client(&config.api).context("Failed to create synthesis client")?;
    let mut conversation = Conversation::new(client, config.clarity.clone());

    let outcome = conversation.submit(input).await?;
    info!(outcome = outcome.as_str(), "cmd_ask: turn settled");

    let state = conversation.state();
    let turn = state.history().last();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "session_id": conversation.session_id(),
                "outcome": outcome.as_str(),
                "turn": turn,
                "plan": state.plan(),
                "clarity": conversation.clarity(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if let Some(turn) = turn {
                println!("{}", turn.content());
                for question in turn.questions() {
                    println!("  ? {}", question);
                }
            }
            if outcome == TurnOutcome::PlanGenerated
                && let Some(plan) = state.plan()
            {
                println!();
                print!("{}", format_outline(&render(plan)));
            }
            println!();
            println!("Clarity Score: {}%", conversation.clarity());
        }
    }

    if outcome == TurnOutcome::TransportFailed {
        return Err(eyre::eyre!("Could not reach the synthesis service at {}", config.api.base_url));
    }
    Ok(())
}

/// Render a plan document from a file or stdin
fn cmd_render(file: &Path, format: OutputFormat) -> Result<()> {
    debug!(?file, ?format, "cmd_render: called");
    let content = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read plan from stdin")?;
        buf
    } else {
        fs::read_to_string(file).context(format!("Failed to read plan from {}", file.display()))?
    };

    let value: serde_json::Value = serde_json::from_str(&content).context("Plan is not valid JSON")?;
    let plan = Plan::from_value(value).ok_or_else(|| eyre::eyre!("Plan must be a JSON object"))?;
    let sections = render(&plan);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
        OutputFormat::Text => print!("{}", format_outline(&sections)),
    }
    Ok(())
}

/// Show log file contents
fn cmd_logs(follow: bool, lines: usize) -> Result<()> {
    debug!(follow, lines, "cmd_logs: called");
    let log_path: PathBuf = get_log_path();

    if !log_path.exists() {
        debug!(?log_path, "cmd_logs: log file does not exist");
        println!("No log file found at: {}", log_path.display());
        return Ok(());
    }

    if follow {
        debug!(?log_path, "cmd_logs: following log file");
        println!("Following log file: {} (Ctrl+C to stop)", log_path.display());
        println!();

        let mut child = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&log_path)
            .spawn()
            .context("Failed to run tail -f")?;

        child.wait()?;
    } else {
        debug!(?log_path, lines, "cmd_logs: reading last N lines");
        let file = fs::File::open(&log_path).context("Failed to open log file")?;
        let reader = BufReader::new(file);
        let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

        let start = all_lines.len().saturating_sub(lines);
        for line in &all_lines[start..] {
            println!("{}", line);
        }
    }

    Ok(())
}
