//! oxide-form-demo CLI
//!
//! Renders one of the demo screens as a Bootstrap 5 form after replaying
//! values and field events against it.

mod screens;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_form_state::{FieldEvent, FormOptions, LogSubmit, SubmitOutcome};
use oxide_forms::FormScreen;

use crate::screens::{AddressScreen, ProfileScreen};

/// Available screens.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Screen {
    /// First name and comments.
    Profile,
    /// Postal address and preferences.
    Address,
}

impl Screen {
    const fn name(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Address => "address",
        }
    }
}

/// Render demo form screens.
#[derive(Parser)]
#[command(name = "oxide-form-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Screen to render.
    #[arg(short, long, value_enum, default_value = "address")]
    screen: Screen,

    /// Values to enter before rendering, as a JSON object.
    #[arg(long)]
    values: Option<String>,

    /// File of field events, one JSON object per line.
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Form options as a JSON file.
    #[arg(short, long, env = "OXIDE_FORM_CONFIG")]
    config: Option<PathBuf>,

    /// Form action URL.
    #[arg(long, default_value = "/submit")]
    action: String,

    /// Submit the form after replaying input.
    #[arg(long)]
    submit: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            FormOptions::from_json(&json)?
        }
        None => FormOptions::default(),
    };
    debug!(?options, "form options loaded");

    let html = match cli.screen {
        Screen::Profile => run::<ProfileScreen>(&cli, options)?,
        Screen::Address => run::<AddressScreen>(&cli, options)?,
    };
    println!("{html}");
    Ok(())
}

fn run<S: FormScreen + 'static>(cli: &Cli, options: FormOptions) -> anyhow::Result<String> {
    let (layout, mut form) = S::form_state(options)?;

    if let Some(json) = &cli.values {
        let pairs = value_pairs(json)?;
        let values = layout.decode(&pairs)?;
        for (name, value) in values.iter() {
            if pairs.iter().any(|(key, _)| key == name) {
                form.change(name, value.clone());
            }
        }
    }

    if let Some(path) = &cli.events {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading events {}", path.display()))?;
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event: FieldEvent = serde_json::from_str(line)
                .with_context(|| format!("event on line {}", number + 1))?;
            form.dispatch(event)?;
        }
    }

    if cli.submit {
        match form.handle_submit(&LogSubmit::named(cli.screen.name()))? {
            SubmitOutcome::Submitted => info!(screen = cli.screen.name(), "Form submitted."),
            SubmitOutcome::Invalid(errors) => {
                for (field, message) in errors.iter() {
                    warn!(field, error = message, "Validation failed.");
                }
            }
            SubmitOutcome::Failed(error) => warn!(%error, "Submit handler failed."),
        }
    }

    Ok(layout.render(&form, &cli.action, "post"))
}

/// Flattens a JSON object into posted `name=value` pairs. Arrays post one
/// pair per item.
fn value_pairs(json: &str) -> anyhow::Result<Vec<(String, String)>> {
    let Value::Object(map) = serde_json::from_str::<Value>(json).context("parsing --values")? else {
        anyhow::bail!("--values must be a JSON object");
    };
    let mut pairs = Vec::new();
    for (name, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((name.clone(), scalar(&name, item)?));
                }
            }
            other => pairs.push((name.clone(), scalar(&name, other)?)),
        }
    }
    Ok(pairs)
}

fn scalar(name: &str, value: Value) -> anyhow::Result<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Bool(flag) => Ok(if flag { "true".to_string() } else { String::new() }),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        _ => anyhow::bail!("unsupported value for {name}"),
    }
}
