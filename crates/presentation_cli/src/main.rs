//! InnerNode CLI
//!
//! Runs the classifier and playbook locally, and talks to a running server
//! for the model-backed commands.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;

use anyhow::Context;
use application::{PlaybookEngine, ScriptTable, TriggerClassifier};
use clap::{Parser, Subcommand};
use domain::Tone;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// InnerNode CLI
#[derive(Parser)]
#[command(name = "innernode-cli")]
#[command(author, version, about = "InnerNode Equalizer CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify text without running a playbook
    Classify {
        /// Text to classify
        text: String,
    },

    /// Run the deterministic playbook locally
    ///
    /// Example: innernode-cli playbook "I'm about to text my ex" --tone direct
    Playbook {
        /// What just happened, or what you're about to do
        text: String,

        /// gentle, direct, playful or firm
        #[arg(short, long)]
        tone: Option<Tone>,

        /// Script table TOML replacing the built-in content
        #[arg(long, env = "INNERNODE_SCRIPTS")]
        scripts: Option<PathBuf>,
    },

    /// Run a quick reset on the server (playbook plus reflection)
    Reset {
        /// What just happened, or what you're about to do
        text: String,

        /// gentle, direct, playful or firm
        #[arg(short, long)]
        tone: Option<Tone>,

        /// Server URL
        #[arg(short, long, env = "INNERNODE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Send one message to the companion
    Companion {
        /// Message to send
        message: String,

        /// Server URL
        #[arg(short, long, env = "INNERNODE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Check server readiness (exit code 1 when not ready)
    Health {
        /// Server URL
        #[arg(short, long, env = "INNERNODE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn load_scripts(path: Option<&PathBuf>) -> anyhow::Result<ScriptTable> {
    match path {
        Some(path) => infrastructure::load_script_table(path)
            .with_context(|| format!("loading script table {}", path.display())),
        None => Ok(ScriptTable::builtin()),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: serde_json::Value,
) -> anyhow::Result<serde_json::Value> {
    debug!(%url, "POST");
    let resp = client.post(&url).json(&body).send().await?;
    let status = resp.status();
    let value = resp.json::<serde_json::Value>().await?;

    if !status.is_success() {
        let message = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("request failed");
        anyhow::bail!("HTTP {status}: {message}");
    }
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Classify { text } => {
            let (classification, trace) = TriggerClassifier::new().classify_with_trace(&text);
            if cli.json {
                print_json(&serde_json::json!({
                    "classification": classification,
                    "matched_terms": trace.matched_terms,
                }))?;
            } else {
                print!("{}", render::classification(&classification, &trace.matched_terms));
            }
        },

        Commands::Playbook {
            text,
            tone,
            scripts,
        } => {
            let engine = PlaybookEngine::new(load_scripts(scripts.as_ref())?);
            let result = engine.run(&text, tone);
            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", render::playbook(&result));
            }
        },

        Commands::Reset { text, tone, url } => {
            let mut body = serde_json::json!({ "text": text });
            if let Some(tone) = tone {
                body["tone"] = serde_json::Value::from(tone.as_str());
            }
            let resp = post_json(&client, endpoint_url(&url, "/v1/equalizer/reset"), body).await?;

            if cli.json {
                print_json(&resp)?;
            } else {
                let playbook: domain::PlaybookResult =
                    serde_json::from_value(resp["playbook"].clone())
                        .context("unexpected reset response")?;
                print!("{}", render::playbook(&playbook));

                if let Some(reflection) = resp.get("reflection") {
                    if let Some(summary) = reflection.get("summary").and_then(|v| v.as_str()) {
                        println!("\n{summary}");
                    }
                    for step in reflection["steps"].as_array().into_iter().flatten() {
                        if let Some(step) = step.as_str() {
                            println!("  - {step}");
                        }
                    }
                }
            }
        },

        Commands::Companion { message, url } => {
            let body = serde_json::json!({
                "messages": [{ "role": "user", "content": message }]
            });
            let resp = post_json(&client, endpoint_url(&url, "/v1/companion"), body).await?;

            if cli.json {
                print_json(&resp)?;
            } else if let Some(content) = resp.get("content").and_then(|v| v.as_str()) {
                println!("{content}");
            }
        },

        Commands::Health { url } => {
            match client.get(endpoint_url(&url, "/ready")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("Ready");
                },
                Ok(resp) => {
                    println!("Not ready: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unreachable: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
